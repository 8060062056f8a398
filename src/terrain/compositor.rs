//! 高度场合成器
//!
//! 把笔刷核居中放到 `(cx, cy)`，裁剪到 `[0, size]` 后逐单元格合并。
//! 圆形、椭圆和图块请求最终都走同一个合成调用。

use super::heightmap::HeightField;
use crate::brush::{KernelView, MergeOperation};
use crate::error::{ModifyError, ModifyResult};
use log::debug;

/// 网格坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// 归一化坐标乘以网格尺寸后四舍五入（远离零）
    pub fn from_normalized(normalized: [f32; 2], size: i64) -> Self {
        Self {
            x: (size as f32 * normalized[0]).round() as i64,
            y: (size as f32 * normalized[1]).round() as i64,
        }
    }
}

/// 裁剪后的作用区域 `[left, right] × [top, bottom]`（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Footprint {
    /// 笔刷核居中放在 `center` 上并裁剪到 `[0, size]`
    ///
    /// 半宽使用截断整数除法。中心远离网格时（包括饱和的坐标）结果为空。
    pub fn place(center: GridPoint, rows: usize, cols: usize, size: i64) -> Self {
        let (rows, cols) = (rows as i64, cols as i64);
        let origin_x = center.x.saturating_sub(cols / 2);
        let origin_y = center.y.saturating_sub(rows / 2);
        Self {
            left: origin_x.max(0),
            top: origin_y.max(0),
            right: origin_x.saturating_add(cols - 1).min(size),
            bottom: origin_y.saturating_add(rows - 1).min(size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    pub fn width(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        self.right - self.left + 1
    }

    pub fn height(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        self.bottom - self.top + 1
    }

    /// 作用单元格数量
    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }
}

/// 将笔刷核合并到高度场
///
/// 按行优先顺序（从上到下、每行从左到右）对作用区域内的每个单元格调用
/// `set(x, y, merge(get(x, y), kernel[y - top][x - left]))`。
/// 作用区域为空时不访问高度场。
pub fn apply_kernel<F: HeightField + ?Sized>(
    field: &mut F,
    center: GridPoint,
    kernel: KernelView<'_>,
    merge: MergeOperation,
) -> ModifyResult<Footprint> {
    if !field.is_ready() {
        return Err(ModifyError::MissingResource(
            "heightmap has no associated terrain object".into(),
        ));
    }

    let size = field.size();
    let footprint = Footprint::place(center, kernel.rows(), kernel.cols(), size);

    debug!(
        "compositing {}x{} kernel at ({}, {}) with {} merge, footprint {:?}",
        kernel.rows(),
        kernel.cols(),
        center.x,
        center.y,
        merge.name(),
        footprint
    );

    if footprint.is_empty() {
        return Ok(footprint);
    }

    for y in footprint.top..=footprint.bottom {
        let row = (y - footprint.top) as usize;
        for x in footprint.left..=footprint.right {
            let col = (x - footprint.left) as usize;
            let height = merge.apply(field.get(x, y), kernel.get(row, col));
            field.set(x, y, height);
        }
    }

    Ok(footprint)
}
