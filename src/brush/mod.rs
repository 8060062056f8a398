//! 笔刷合成模块
//!
//! 将圆形、椭圆形参数或外部图块转换为笔刷核，供高度图合成器使用。
//!
//! # 流程
//!
//! ```text
//! 圆形参数 ──► synthesis::circle ───────────────────────────┐
//!                                                           │
//! 椭圆参数 ──► synthesis::ellipse ──┐                       │
//!                                   ├─► transform::expand ──► transform::rotate ──► Kernel
//! 外部图块 ──► patch::import_patch ─┘                       │
//!                                                           ▼
//!                                            terrain::compositor（按 MergeOperation 合并）
//! ```
//!
//! # 模块结构
//!
//! - `kernel`: 笔刷核数据结构
//! - `merge`: 合并规则
//! - `synthesis`: 圆形/椭圆剖面生成
//! - `transform`: 画布扩展与旋转
//! - `patch`: 外部图块校验与导入

pub mod kernel;
pub mod merge;
pub mod patch;
pub mod synthesis;
pub mod transform;

pub use kernel::{Kernel, KernelView};
pub use merge::MergeOperation;
pub use patch::{import_patch, ImportedPatch, PatchImage, ENCODING_32FC1};
pub use synthesis::{circle, ellipse, EllipseRadii, Falloff};
pub use transform::{expand, rotate, Interpolation};
