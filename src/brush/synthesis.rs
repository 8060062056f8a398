//! 笔刷核生成
//!
//! 根据内/外半径和权重生成圆形、椭圆形笔刷核。
//! 半径单位为网格单元格（调用方已乘以高度图尺寸）。
//!
//! 剖面规则：
//! - 外半径之外为 0
//! - 内半径之内为满值 `weight`
//! - 两者之间按 [`Falloff`] 曲线衰减，`t = 0` 处为满值，`t = 1` 处为 0

use super::kernel::Kernel;
use crate::error::{ModifyError, ModifyResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// 内外半径之间的衰减曲线
///
/// 所有曲线在 `[0, 1]` 上单调不增，`shape(0) = 1`，`shape(1) = 0`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Falloff {
    /// `1 - t`
    Linear,
    /// `1 - t²(3 - 2t)`
    #[default]
    Smoothstep,
    /// `(1 + cos(πt)) / 2`
    Cosine,
}

impl Falloff {
    pub fn shape(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let value = match self {
            Falloff::Linear => 1.0 - t,
            Falloff::Smoothstep => 1.0 - t * t * (3.0 - 2.0 * t),
            Falloff::Cosine => 0.5 * (1.0 + (PI * t).cos()),
        };
        value.clamp(0.0, 1.0)
    }
}

/// 椭圆笔刷半径（网格单元格），`a` 沿列方向，`b` 沿行方向
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseRadii {
    pub outer_a: f32,
    pub outer_b: f32,
    pub inner_a: f32,
    pub inner_b: f32,
}

impl EllipseRadii {
    pub fn new(outer_a: f32, outer_b: f32, inner_a: f32, inner_b: f32) -> Self {
        Self {
            outer_a,
            outer_b,
            inner_a,
            inner_b,
        }
    }

    /// 所有半径乘以同一系数
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            outer_a: self.outer_a * factor,
            outer_b: self.outer_b * factor,
            inner_a: self.inner_a * factor,
            inner_b: self.inner_b * factor,
        }
    }

    pub fn validate(&self) -> ModifyResult<()> {
        if !(self.outer_a > 0.0 && self.outer_b > 0.0)
            || !self.outer_a.is_finite()
            || !self.outer_b.is_finite()
        {
            return Err(ModifyError::InvalidParameter(
                "outer_radius a & b has to be positive".into(),
            ));
        }
        if !(self.inner_a >= 0.0 && self.inner_b >= 0.0) {
            return Err(ModifyError::InvalidParameter(
                "inner_radius a & b can't be negative".into(),
            ));
        }
        if self.inner_a > self.outer_a || self.inner_b > self.outer_b {
            return Err(ModifyError::InvalidParameter(
                "inner_radius can't exceed outer_radius value".into(),
            ));
        }
        Ok(())
    }
}

/// 校验圆形笔刷半径
pub fn validate_circle(outer_radius: f32, inner_radius: f32) -> ModifyResult<()> {
    if !(outer_radius > 0.0) || !outer_radius.is_finite() {
        return Err(ModifyError::InvalidParameter(
            "outer_radius has to be a positive number".into(),
        ));
    }
    if !(inner_radius >= 0.0) {
        return Err(ModifyError::InvalidParameter(
            "inner_radius can't be negative".into(),
        ));
    }
    if inner_radius > outer_radius {
        return Err(ModifyError::InvalidParameter(
            "inner_radius can't exceed outer_radius value".into(),
        ));
    }
    Ok(())
}

/// 按半径计算的笔刷核边长（奇数半径截断）
fn extent(radius: f32) -> usize {
    (2.0 * radius + 1.0) as usize
}

/// 圆形剖面，返回 `[0, 1]` 的比例
fn radial_profile(r: f32, inner: f32, outer: f32, falloff: Falloff) -> f32 {
    if r > outer {
        0.0
    } else if r <= inner {
        1.0
    } else {
        falloff.shape((r - inner) / (outer - inner))
    }
}

/// 椭圆归一化距离的单轴平方项；半径为 0 的轴只包含 `d = 0`
fn axis_term(d: f32, radius: f32) -> f32 {
    if d == 0.0 {
        0.0
    } else if radius <= 0.0 {
        f32::INFINITY
    } else {
        (d / radius) * (d / radius)
    }
}

/// 椭圆剖面
///
/// 沿单元格所在射线，在内椭圆边界与外椭圆边界之间线性取 `t`：
/// `t = ρo(ρi - 1) / (ρi - ρo)`，内椭圆为空时退化为 `t = ρo`。
fn elliptic_profile(dx: f32, dy: f32, radii: &EllipseRadii, falloff: Falloff) -> f32 {
    let rho_outer = (axis_term(dx, radii.outer_a) + axis_term(dy, radii.outer_b)).sqrt();
    if rho_outer > 1.0 {
        return 0.0;
    }
    let rho_inner = (axis_term(dx, radii.inner_a) + axis_term(dy, radii.inner_b)).sqrt();
    if rho_inner <= 1.0 {
        return 1.0;
    }
    let t = if rho_inner.is_infinite() {
        rho_outer
    } else {
        rho_outer * (rho_inner - 1.0) / (rho_inner - rho_outer)
    };
    falloff.shape(t)
}

/// 生成圆形笔刷核
///
/// 尺寸为 `(2·outer_radius+1)²`，中心单元格为 `(size/2, size/2)`。
pub fn circle(
    outer_radius: f32,
    inner_radius: f32,
    weight: f32,
    falloff: Falloff,
) -> ModifyResult<Kernel> {
    validate_circle(outer_radius, inner_radius)?;

    let size = extent(outer_radius);
    let center = (size / 2) as f32;
    let mut kernel = Kernel::zeros(size, size);

    kernel
        .as_mut_slice()
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(row, line)| {
            let dy = row as f32 - center;
            for (col, cell) in line.iter_mut().enumerate() {
                let dx = col as f32 - center;
                let r = (dx * dx + dy * dy).sqrt();
                *cell = weight * radial_profile(r, inner_radius, outer_radius, falloff);
            }
        });

    Ok(kernel)
}

/// 生成椭圆笔刷核（未旋转）
///
/// 行数为 `2·outer_b+1`，列数为 `2·outer_a+1`。
pub fn ellipse(radii: &EllipseRadii, weight: f32, falloff: Falloff) -> ModifyResult<Kernel> {
    radii.validate()?;

    let rows = extent(radii.outer_b);
    let cols = extent(radii.outer_a);
    let center_row = (rows / 2) as f32;
    let center_col = (cols / 2) as f32;
    let mut kernel = Kernel::zeros(rows, cols);

    kernel
        .as_mut_slice()
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, line)| {
            let dy = row as f32 - center_row;
            for (col, cell) in line.iter_mut().enumerate() {
                let dx = col as f32 - center_col;
                *cell = weight * elliptic_profile(dx, dy, radii, falloff);
            }
        });

    Ok(kernel)
}
