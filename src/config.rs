use crate::brush::{Falloff, Interpolation, MergeOperation};
use serde::{Deserialize, Serialize};

/// 地形修改器配置
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierConfig {
    /// 内外半径之间的衰减曲线
    pub falloff: Falloff,
    /// 椭圆和图块旋转时的重采样方式
    pub interpolation: Interpolation,
    /// 默认合并规则
    pub merge: MergeOperation,
}

impl Default for ModifierConfig {
    fn default() -> Self {
        Self {
            falloff: Falloff::Smoothstep,
            interpolation: Interpolation::Bilinear,
            merge: MergeOperation::Dig,
        }
    }
}

impl ModifierConfig {
    /// 使用指定合并规则
    pub fn with_merge(merge: MergeOperation) -> Self {
        Self {
            merge,
            ..Default::default()
        }
    }

    pub fn falloff(mut self, falloff: Falloff) -> Self {
        self.falloff = falloff;
        self
    }

    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }
}
