//! 地形修改错误类型
//!
//! 所有错误都在检测点记录日志并提前返回，返回前不会写入任何高度图单元格。

use thiserror::Error;

/// 错误类别标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParameter,
    MissingResource,
    UnsupportedFormat,
    DecodeFailure,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModifyError {
    /// 半径非正、内半径超过外半径等参数错误
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// 高度图缺失或尚未就绪
    #[error("missing resource: {0}")]
    MissingResource(String),

    /// 图块编码不是 32FC1
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// 图块缓冲区无法解码
    #[error("decode failure: {0}")]
    DecodeFailure(String),
}

impl ModifyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModifyError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            ModifyError::MissingResource(_) => ErrorKind::MissingResource,
            ModifyError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            ModifyError::DecodeFailure(_) => ErrorKind::DecodeFailure,
        }
    }

    /// 格式不支持与解码失败对调用方而言是同一种结果
    pub fn is_format_rejection(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UnsupportedFormat | ErrorKind::DecodeFailure
        )
    }
}

pub type ModifyResult<T> = Result<T, ModifyError>;
