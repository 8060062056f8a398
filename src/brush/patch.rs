//! 外部图块导入
//!
//! 图块数据以 `sensor_msgs/Image` 的形式到达：编码标签、宽高、行跨度、字节序和原始字节。
//! 只接受单通道 32 位浮点（`32FC1`），其它编码一律拒绝，不做任何转换。

use super::kernel::KernelView;
use crate::error::{ModifyError, ModifyResult};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// 唯一支持的图块编码
pub const ENCODING_32FC1: &str = "32FC1";

const CELL_BYTES: usize = std::mem::size_of::<f32>();

/// 外部提供的原始图块缓冲区
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchImage {
    pub encoding: String,
    pub width: u32,
    pub height: u32,
    /// 每行字节数
    pub step: u32,
    pub is_bigendian: bool,
    pub data: Vec<u8>,
}

impl PatchImage {
    /// 用本机字节序、紧凑行跨度打包浮点数据
    pub fn from_f32(width: u32, height: u32, values: &[f32]) -> Self {
        Self {
            encoding: ENCODING_32FC1.to_string(),
            width,
            height,
            step: width * CELL_BYTES as u32,
            is_bigendian: cfg!(target_endian = "big"),
            data: bytemuck::cast_slice(values).to_vec(),
        }
    }
}

/// 导入后的图块，能借用时不拷贝原始缓冲区
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedPatch<'a> {
    rows: usize,
    cols: usize,
    data: Cow<'a, [f32]>,
}

impl<'a> ImportedPatch<'a> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 是否直接借用了原始缓冲区
    pub fn is_borrowed(&self) -> bool {
        matches!(self.data, Cow::Borrowed(_))
    }

    pub fn view(&self) -> KernelView<'_> {
        KernelView::from_parts(self.rows, self.cols, &self.data)
    }
}

fn decode_failure(reason: impl Into<String>) -> ModifyError {
    ModifyError::DecodeFailure(reason.into())
}

/// 校验并导入图块
///
/// - 编码不是 `32FC1` 时返回 `UnsupportedFormat`
/// - 尺寸、行跨度或数据长度不一致时返回 `DecodeFailure`
pub fn import_patch(patch: &PatchImage) -> ModifyResult<ImportedPatch<'_>> {
    if patch.encoding != ENCODING_32FC1 {
        return Err(ModifyError::UnsupportedFormat(format!(
            "only {} formats are supported, got '{}'",
            ENCODING_32FC1, patch.encoding
        )));
    }

    let cols = patch.width as usize;
    let rows = patch.height as usize;
    let step = patch.step as usize;
    if cols == 0 || rows == 0 {
        return Err(decode_failure(format!(
            "patch has empty dimensions {}x{}",
            patch.width, patch.height
        )));
    }

    let row_bytes = cols
        .checked_mul(CELL_BYTES)
        .ok_or_else(|| decode_failure("patch width overflows"))?;
    if step < row_bytes || step % CELL_BYTES != 0 {
        return Err(decode_failure(format!(
            "row step {} does not hold {} float cells",
            step, cols
        )));
    }

    let needed = step
        .checked_mul(rows - 1)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or_else(|| decode_failure("patch size overflows"))?;
    if patch.data.len() < needed {
        return Err(decode_failure(format!(
            "patch buffer holds {} bytes, expected at least {}",
            patch.data.len(),
            needed
        )));
    }

    let native = patch.is_bigendian == cfg!(target_endian = "big");
    let packed = &patch.data[..needed];

    // 紧凑、对齐且为本机字节序时直接借用
    if native && step == row_bytes {
        if let Ok(values) = bytemuck::try_cast_slice::<u8, f32>(packed) {
            return Ok(ImportedPatch {
                rows,
                cols,
                data: Cow::Borrowed(values),
            });
        }
    }

    let read: fn([u8; CELL_BYTES]) -> f32 = if patch.is_bigendian {
        f32::from_be_bytes
    } else {
        f32::from_le_bytes
    };

    let mut values = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let line = &packed[row * step..row * step + row_bytes];
        values.extend(line.chunks_exact(CELL_BYTES).map(|cell| {
            let mut bytes = [0u8; CELL_BYTES];
            bytes.copy_from_slice(cell);
            read(bytes)
        }));
    }

    Ok(ImportedPatch {
        rows,
        cols,
        data: Cow::Owned(values),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_values() -> Vec<f32> {
        (0..12).map(|i| i as f32 * 0.5).collect()
    }

    #[test]
    fn test_import_tightly_packed_patch() {
        let values = sample_values();
        let patch = PatchImage::from_f32(4, 3, &values);
        let imported = import_patch(&patch).unwrap();

        assert_eq!((imported.rows(), imported.cols()), (3, 4));
        assert_eq!(imported.view().as_slice(), values.as_slice());
        assert_eq!(imported.view().get(2, 1), 4.5);
    }

    #[test]
    fn test_rejects_other_encodings() {
        let mut patch = PatchImage::from_f32(4, 3, &sample_values());
        for encoding in ["8UC3", "32FC3", "mono8", "64FC1", ""] {
            patch.encoding = encoding.to_string();
            let err = import_patch(&patch).unwrap_err();
            assert!(matches!(err, ModifyError::UnsupportedFormat(_)), "{}", encoding);
        }
    }

    #[test]
    fn test_rejects_truncated_buffer() {
        let mut patch = PatchImage::from_f32(4, 3, &sample_values());
        patch.data.truncate(40);
        let err = import_patch(&patch).unwrap_err();
        assert!(matches!(err, ModifyError::DecodeFailure(_)));
    }

    #[test]
    fn test_rejects_bad_step_and_dimensions() {
        let mut patch = PatchImage::from_f32(4, 3, &sample_values());
        patch.step = 12;
        assert!(matches!(import_patch(&patch), Err(ModifyError::DecodeFailure(_))));

        patch.step = 18;
        assert!(matches!(import_patch(&patch), Err(ModifyError::DecodeFailure(_))));

        let mut empty = PatchImage::from_f32(0, 0, &[]);
        empty.step = 0;
        assert!(matches!(import_patch(&empty), Err(ModifyError::DecodeFailure(_))));
    }

    #[test]
    fn test_strided_rows_are_repacked() {
        // 每行 2 个浮点，行跨度 12 字节（末尾 4 字节填充）
        let mut data = Vec::new();
        for row in 0..2 {
            for col in 0..2 {
                data.extend_from_slice(&((row * 2 + col) as f32).to_le_bytes());
            }
            data.extend_from_slice(&[0xAA; 4]);
        }
        let patch = PatchImage {
            encoding: ENCODING_32FC1.to_string(),
            width: 2,
            height: 2,
            step: 12,
            is_bigendian: false,
            data,
        };

        let imported = import_patch(&patch).unwrap();
        assert!(!imported.is_borrowed());
        assert_eq!(imported.view().as_slice(), &[0.0f32, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_big_endian_buffer() {
        let values = [1.5f32, -2.0, 0.25];
        let data: Vec<u8> = values.iter().flat_map(|v| v.to_be_bytes()).collect();
        let patch = PatchImage {
            encoding: ENCODING_32FC1.to_string(),
            width: 3,
            height: 1,
            step: 12,
            is_bigendian: true,
            data,
        };

        let imported = import_patch(&patch).unwrap();
        assert_eq!(imported.view().as_slice(), &values);
    }
}
