//! 合并操作
//!
//! `merge(existing, kernel_value) -> new_value`，全部为纯函数。

use serde::{Deserialize, Serialize};

/// 单元格合并规则
///
/// 新增规则只需要在这里加一个变体，合成器不需要改动。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum MergeOperation {
    /// `min(existing, value)`
    Min,
    /// `max(existing, value)`
    Max,
    /// 直接写入笔刷值
    Replace,
    /// `existing + value`
    Add,
    /// 按笔刷深度下挖，永不抬高：`min(existing, existing - value)`
    #[default]
    Dig,
    /// 调用方提供的函数
    #[serde(skip)]
    Custom(fn(f32, f32) -> f32),
}

impl MergeOperation {
    #[inline]
    pub fn apply(&self, existing: f32, value: f32) -> f32 {
        match self {
            MergeOperation::Min => existing.min(value),
            MergeOperation::Max => existing.max(value),
            MergeOperation::Replace => value,
            MergeOperation::Add => existing + value,
            MergeOperation::Dig => existing.min(existing - value),
            MergeOperation::Custom(merge) => merge(existing, value),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MergeOperation::Min => "min",
            MergeOperation::Max => "max",
            MergeOperation::Replace => "replace",
            MergeOperation::Add => "add",
            MergeOperation::Dig => "dig",
            MergeOperation::Custom(_) => "custom",
        }
    }
}
