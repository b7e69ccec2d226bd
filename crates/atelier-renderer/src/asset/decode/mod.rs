//! Incremental decoders for downloaded asset bytes.
//!
//! Bytes arrive in arbitrary chunks; each decoder buffers only what it
//! needs to finish the current record and turns complete records into
//! [`Splat`]s as they come in.

mod packed;
mod ply;

pub use packed::{PackedDecoder, RECORD_SIZE};
pub use ply::PlyDecoder;

use super::{AssetKind, Splat, SplatAsset};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("file contains no splats")]
    Empty,

    #[error("{0} trailing bytes after the last complete record")]
    TrailingBytes(usize),

    #[error("malformed PLY header: {0}")]
    Header(String),

    #[error("unsupported PLY layout: {0}")]
    Unsupported(String),

    #[error("PLY vertex element has no '{0}' property")]
    MissingProperty(&'static str),

    #[error("expected {expected} vertices, got {got}")]
    Truncated { expected: usize, got: usize },
}

/// Decoder for one asset kind.
#[derive(Debug)]
pub enum StreamDecoder {
    Packed(PackedDecoder),
    Ply(PlyDecoder),
}

impl StreamDecoder {
    /// `None` for [`AssetKind::Unsupported`].
    pub fn for_kind(kind: AssetKind) -> Option<Self> {
        match kind {
            AssetKind::Splat => Some(StreamDecoder::Packed(PackedDecoder::default())),
            AssetKind::PointCloud => Some(StreamDecoder::Ply(PlyDecoder::default())),
            AssetKind::Unsupported => None,
        }
    }

    pub fn push(&mut self, chunk: &[u8]) -> Result<(), DecodeError> {
        match self {
            StreamDecoder::Packed(decoder) => {
                decoder.push(chunk);
                Ok(())
            }
            StreamDecoder::Ply(decoder) => decoder.push(chunk),
        }
    }

    pub fn finish(self) -> Result<SplatAsset, DecodeError> {
        let splats = match self {
            StreamDecoder::Packed(decoder) => decoder.finish()?,
            StreamDecoder::Ply(decoder) => decoder.finish()?,
        };
        if splats.is_empty() {
            return Err(DecodeError::Empty);
        }
        Ok(SplatAsset::new(splats))
    }
}

/// Normalize a `[w, x, y, z]` quaternion, falling back to identity when
/// it has no usable length.
pub(crate) fn normalize_quat(q: [f32; 4]) -> [f32; 4] {
    let len = q.iter().map(|c| c * c).sum::<f32>().sqrt();
    if !len.is_finite() || len < 1e-8 {
        return Splat::IDENTITY_ROTATION;
    }
    [q[0] / len, q[1] / len, q[2] / len, q[3] / len]
}

pub(crate) fn read_f32_le(bytes: &[u8], offset: usize) -> f32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&bytes[offset..offset + 4]);
    f32::from_le_bytes(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_kind_has_no_decoder() {
        assert!(StreamDecoder::for_kind(AssetKind::Unsupported).is_none());
        assert!(matches!(
            StreamDecoder::for_kind(AssetKind::Splat),
            Some(StreamDecoder::Packed(_))
        ));
        assert!(matches!(
            StreamDecoder::for_kind(AssetKind::PointCloud),
            Some(StreamDecoder::Ply(_))
        ));
    }

    #[test]
    fn empty_stream_is_an_error() {
        let decoder = StreamDecoder::for_kind(AssetKind::Splat).unwrap();
        assert_eq!(decoder.finish(), Err(DecodeError::Empty));
    }

    #[test]
    fn normalize_quat_handles_zero_and_scale() {
        assert_eq!(normalize_quat([0.0; 4]), Splat::IDENTITY_ROTATION);
        assert_eq!(normalize_quat([2.0, 0.0, 0.0, 0.0]), [1.0, 0.0, 0.0, 0.0]);
        let q = normalize_quat([1.0, 1.0, 1.0, 1.0]);
        assert!(q.iter().all(|c| (c - 0.5).abs() < 1e-6));
    }

    #[test]
    fn normalize_quat_rejects_nan() {
        assert_eq!(normalize_quat([f32::NAN, 0.0, 0.0, 0.0]), Splat::IDENTITY_ROTATION);
    }
}
