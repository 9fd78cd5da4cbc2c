//! Binary box-corner records
//!
//! Level geometry is shipped as flat arrays of [`BoxRecord`]s, four `f32`
//! corners each in native byte order. Decompression and file access happen
//! elsewhere; this module only turns already-loaded bytes into [`AABB`]s.

use crate::physics::collision::AABB;
use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// One box as stored in a level blob
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BoxRecord {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BoxRecord {
    /// Size of one record in bytes
    pub const SIZE: usize = std::mem::size_of::<BoxRecord>();

    /// Corners as a box
    pub fn to_aabb(self) -> AABB {
        AABB::from_coords(self.x0, self.y0, self.x1, self.y1)
    }
}

impl From<AABB> for BoxRecord {
    fn from(aabb: AABB) -> Self {
        Self {
            x0: aabb.min.x,
            y0: aabb.min.y,
            x1: aabb.max.x,
            y1: aabb.max.y,
        }
    }
}

/// Asset decoding errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A record decoded to an inverted or non-finite box
    #[error("Invalid box at record {index}: {aabb:?}")]
    InvalidBox {
        /// Record position in the blob
        index: usize,
        /// The decoded box
        aabb: AABB,
    },
}

/// Decode a blob of [`BoxRecord`]s
///
/// The input does not need to be aligned. Its length must be a multiple of
/// [`BoxRecord::SIZE`], and every record must describe a finite box with
/// `min <= max`.
pub fn boxes_from_bytes(bytes: &[u8]) -> Result<Vec<AABB>, AssetError> {
    if bytes.len() % BoxRecord::SIZE != 0 {
        return Err(AssetError::InvalidData(format!(
            "blob length {} is not a multiple of {}",
            bytes.len(),
            BoxRecord::SIZE
        )));
    }

    bytes
        .chunks_exact(BoxRecord::SIZE)
        .enumerate()
        .map(|(index, chunk)| {
            let aabb = bytemuck::pod_read_unaligned::<BoxRecord>(chunk).to_aabb();
            let finite = [aabb.min.x, aabb.min.y, aabb.max.x, aabb.max.y]
                .iter()
                .all(|v| v.is_finite());
            if finite && aabb.is_valid() {
                Ok(aabb)
            } else {
                Err(AssetError::InvalidBox { index, aabb })
            }
        })
        .collect()
}

/// Encode boxes as a blob readable by [`boxes_from_bytes`]
pub fn boxes_to_bytes(boxes: &[AABB]) -> Vec<u8> {
    let records: Vec<BoxRecord> = boxes.iter().copied().map(BoxRecord::from).collect();
    bytemuck::cast_slice(&records).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_layout() {
        assert_eq!(BoxRecord::SIZE, 16);
        let record = BoxRecord { x0: 1.0, y0: 2.0, x1: 3.0, y1: 4.0 };
        let bytes = bytemuck::bytes_of(&record);
        assert_eq!(&bytes[4..8], &2.0f32.to_ne_bytes());
    }

    #[test]
    fn test_decode_level_blob() {
        let boxes = vec![
            AABB::from_coords(0.0, 9.0, 20.0, 10.0),
            AABB::from_coords(-1.0, 0.0, 0.0, 10.0),
        ];
        assert_eq!(boxes_from_bytes(&boxes_to_bytes(&boxes)).unwrap(), boxes);
        assert!(boxes_from_bytes(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_unaligned_input_accepted() {
        let mut bytes = vec![0u8];
        bytes.extend(boxes_to_bytes(&[AABB::from_coords(1.0, 1.0, 2.0, 2.0)]));
        let decoded = boxes_from_bytes(&bytes[1..]).unwrap();
        assert_eq!(decoded, vec![AABB::from_coords(1.0, 1.0, 2.0, 2.0)]);
    }

    #[test]
    fn test_bad_blobs_rejected() {
        let bytes = boxes_to_bytes(&[AABB::from_coords(0.0, 0.0, 1.0, 1.0)]);
        assert!(matches!(boxes_from_bytes(&bytes[..15]), Err(AssetError::InvalidData(_))));

        let mut bytes = boxes_to_bytes(&[AABB::from_coords(0.0, 0.0, 1.0, 1.0)]);
        bytes.extend(boxes_to_bytes(&[AABB::from_coords(3.0, 0.0, 2.0, 1.0)]));
        assert!(matches!(boxes_from_bytes(&bytes), Err(AssetError::InvalidBox { index: 1, .. })));
    }
}
