//! The packed `.splat` format: a headerless run of 32-byte records.
//!
//! | bytes  | field                                   |
//! |--------|-----------------------------------------|
//! | 0..12  | position, 3 × f32 LE                    |
//! | 12..24 | scale, 3 × f32 LE (linear)              |
//! | 24..28 | colour RGBA, 4 × u8                     |
//! | 28..32 | rotation `[w, x, y, z]`, `(b - 128) / 128` |

use super::{normalize_quat, read_f32_le, DecodeError};
use crate::asset::Splat;

pub const RECORD_SIZE: usize = 32;

#[derive(Debug, Default)]
pub struct PackedDecoder {
    pending: Vec<u8>,
    splats: Vec<Splat>,
}

impl PackedDecoder {
    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
        let whole = self.pending.len() / RECORD_SIZE * RECORD_SIZE;
        for record in self.pending[..whole].chunks_exact(RECORD_SIZE) {
            self.splats.push(decode_record(record));
        }
        self.pending.drain(..whole);
    }

    /// Splats decoded so far.
    pub fn decoded(&self) -> usize {
        self.splats.len()
    }

    pub fn finish(self) -> Result<Vec<Splat>, DecodeError> {
        if !self.pending.is_empty() {
            return Err(DecodeError::TrailingBytes(self.pending.len()));
        }
        Ok(self.splats)
    }
}

fn decode_record(record: &[u8]) -> Splat {
    let rotation = [
        unpack_unit(record[28]),
        unpack_unit(record[29]),
        unpack_unit(record[30]),
        unpack_unit(record[31]),
    ];
    Splat {
        position: [
            read_f32_le(record, 0),
            read_f32_le(record, 4),
            read_f32_le(record, 8),
        ],
        scale: [
            read_f32_le(record, 12),
            read_f32_le(record, 16),
            read_f32_le(record, 20),
        ],
        color: [record[24], record[25], record[26], record[27]],
        rotation: normalize_quat(rotation),
    }
}

fn unpack_unit(byte: u8) -> f32 {
    (f32::from(byte) - 128.0) / 128.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(position: [f32; 3], scale: [f32; 3], color: [u8; 4], rot: [u8; 4]) -> Vec<u8> {
        let mut out = Vec::with_capacity(RECORD_SIZE);
        for v in position.iter().chain(scale.iter()) {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out.extend_from_slice(&color);
        out.extend_from_slice(&rot);
        out
    }

    #[test]
    fn decodes_one_record() {
        let mut decoder = PackedDecoder::default();
        decoder.push(&record(
            [1.0, 2.0, 3.0],
            [0.1, 0.2, 0.3],
            [250, 240, 230, 128],
            [255, 128, 128, 128],
        ));
        let splats = decoder.finish().unwrap();
        assert_eq!(splats.len(), 1);
        let s = splats[0];
        assert_eq!(s.position, [1.0, 2.0, 3.0]);
        assert_eq!(s.scale, [0.1, 0.2, 0.3]);
        assert_eq!(s.color, [250, 240, 230, 128]);
        assert!((s.rotation[0] - 1.0).abs() < 1e-6);
        assert!(s.rotation[1..].iter().all(|c| c.abs() < 1e-6));
    }

    #[test]
    fn records_split_across_chunks() {
        let mut bytes = record([0.0; 3], [1.0; 3], [1, 2, 3, 4], [200, 128, 128, 128]);
        bytes.extend(record([5.0; 3], [1.0; 3], [5, 6, 7, 8], [128, 200, 128, 128]));

        let mut decoder = PackedDecoder::default();
        for chunk in bytes.chunks(7) {
            decoder.push(chunk);
        }
        assert_eq!(decoder.decoded(), 2);
        let splats = decoder.finish().unwrap();
        assert_eq!(splats[1].position, [5.0; 3]);
        assert_eq!(splats[1].color, [5, 6, 7, 8]);
    }

    #[test]
    fn partial_record_is_trailing_bytes() {
        let mut decoder = PackedDecoder::default();
        let bytes = record([0.0; 3], [1.0; 3], [0; 4], [128; 4]);
        decoder.push(&bytes);
        decoder.push(&bytes[..10]);
        assert_eq!(decoder.finish(), Err(DecodeError::TrailingBytes(10)));
    }
}
