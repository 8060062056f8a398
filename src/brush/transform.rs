//! 笔刷核几何变换
//!
//! 旋转前先扩展画布，保证任意角度旋转都不会裁掉非零单元格。
//! 扩展与旋转是两个独立的步骤：扩展尺寸只取决于几何尺寸，旋转是纯重采样。

use super::kernel::{Kernel, KernelView};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// 旋转重采样方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    Nearest,
    /// 双线性插值，避免阶梯状边缘
    #[default]
    Bilinear,
}

/// 扩展后的画布尺寸 `(rows, cols)`
///
/// 边长取原矩形对角线长度向上取整；每个方向的补边必须左右相等，
/// 奇偶不一致时该方向再加一格。
pub fn expanded_dimensions(rows: usize, cols: usize) -> (usize, usize) {
    let diagonal = ((rows * rows + cols * cols) as f64).sqrt().ceil() as usize;
    let side = diagonal.max(rows).max(cols);
    let fit = |n: usize| side + (side - n) % 2;
    (fit(rows), fit(cols))
}

/// 将笔刷核居中放到足以容纳任意旋转的画布上，新单元格为 0
pub fn expand(kernel: KernelView<'_>) -> Kernel {
    let (rows, cols) = expanded_dimensions(kernel.rows(), kernel.cols());
    let top = (rows - kernel.rows()) / 2;
    let left = (cols - kernel.cols()) / 2;

    let mut canvas = Kernel::zeros(rows, cols);
    if kernel.cols() == 0 {
        return canvas;
    }

    let source = kernel.as_slice();
    let target = canvas.as_mut_slice();
    for (row, line) in source.chunks_exact(kernel.cols()).enumerate() {
        let start = (top + row) * cols + left;
        target[start..start + line.len()].copy_from_slice(line);
    }

    canvas
}

#[inline]
fn sample_or_zero(kernel: &Kernel, x: i64, y: i64) -> f32 {
    if x < 0 || y < 0 || x >= kernel.cols() as i64 || y >= kernel.rows() as i64 {
        0.0
    } else {
        kernel.get(y as usize, x as usize)
    }
}

fn sample_nearest(kernel: &Kernel, x: f32, y: f32) -> f32 {
    sample_or_zero(kernel, x.round() as i64, y.round() as i64)
}

fn sample_bilinear(kernel: &Kernel, x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (ix, iy) = (x0 as i64, y0 as i64);

    let v00 = sample_or_zero(kernel, ix, iy);
    let v10 = sample_or_zero(kernel, ix + 1, iy);
    let v01 = sample_or_zero(kernel, ix, iy + 1);
    let v11 = sample_or_zero(kernel, ix + 1, iy + 1);

    let top = v00 * (1.0 - fx) + v10 * fx;
    let bottom = v01 * (1.0 - fx) + v11 * fx;
    top * (1.0 - fy) + bottom * fy
}

/// 绕画布中心旋转笔刷核
///
/// `orientation` 为弧度，行向下为 y 轴时按顺时针方向旋转。
/// 输出尺寸与输入相同，采样落在画布外的单元格为 0。
pub fn rotate(kernel: &Kernel, orientation: f32, interpolation: Interpolation) -> Kernel {
    let rows = kernel.rows();
    let cols = kernel.cols();
    let mut output = Kernel::zeros(rows, cols);
    if cols == 0 {
        return output;
    }

    // 与 expand 和合成器使用同一个中心单元格
    let cx = (cols / 2) as f32;
    let cy = (rows / 2) as f32;
    let (sin, cos) = orientation.sin_cos();

    output
        .as_mut_slice()
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(row, line)| {
            let dy = row as f32 - cy;
            for (col, cell) in line.iter_mut().enumerate() {
                let dx = col as f32 - cx;
                // 逆映射：输出单元格反向旋转回源画布
                let sx = cx + dx * cos + dy * sin;
                let sy = cy - dx * sin + dy * cos;
                *cell = match interpolation {
                    Interpolation::Nearest => sample_nearest(kernel, sx, sy),
                    Interpolation::Bilinear => sample_bilinear(kernel, sx, sy),
                };
            }
        });

    output
}
