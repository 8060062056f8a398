//! 笔刷核（kernel）图像
//!
//! `rows × cols` 的单精度浮点网格，行优先存储。

use crate::error::{ModifyError, ModifyResult};

/// 拥有数据的笔刷核
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Kernel {
    /// 创建全零笔刷核
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// 从行优先数据创建，长度必须等于 `rows * cols`
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> ModifyResult<Self> {
        if data.len() != rows * cols {
            return Err(ModifyError::InvalidParameter(format!(
                "kernel data has {} cells, expected {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn view(&self) -> KernelView<'_> {
        KernelView {
            rows: self.rows,
            cols: self.cols,
            data: &self.data,
        }
    }

    /// 最大值，空核返回 0
    pub fn peak(&self) -> f32 {
        self.data.iter().copied().reduce(f32::max).unwrap_or(0.0)
    }

    /// 非零单元格数量
    pub fn support(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0.0).count()
    }
}

/// 借用的笔刷核视图，用于不拷贝外部图块数据
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelView<'a> {
    rows: usize,
    cols: usize,
    data: &'a [f32],
}

impl<'a> KernelView<'a> {
    pub fn new(rows: usize, cols: usize, data: &'a [f32]) -> ModifyResult<Self> {
        if data.len() != rows * cols {
            return Err(ModifyError::InvalidParameter(format!(
                "kernel data has {} cells, expected {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// 调用方已保证 `data.len() == rows * cols`
    pub(crate) fn from_parts(rows: usize, cols: usize, data: &'a [f32]) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    pub fn to_kernel(&self) -> Kernel {
        Kernel {
            rows: self.rows,
            cols: self.cols,
            data: self.data.to_vec(),
        }
    }
}
