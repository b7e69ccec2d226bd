//! Binary little-endian PLY.
//!
//! Two vertex layouts are understood: trained Gaussian exports
//! (`f_dc_*`, `opacity`, `scale_*`, `rot_*`, log-space scale and logit
//! opacity) and plain coloured point clouds (`red`, `green`, `blue`).
//! Only the vertex element is read; anything after it is ignored.

use super::{normalize_quat, DecodeError};
use crate::asset::Splat;

const HEADER_END: &[u8] = b"end_header";
/// Zeroth-order spherical harmonic, `1 / (2 √π)`.
const SH_C0: f32 = 0.282_094_8;
/// Isotropic size given to points that carry no scale.
const POINT_SCALE: f32 = 0.01;
/// Upper bound on the up-front reservation; the header count is untrusted.
const MAX_RESERVE: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl Scalar {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "char" | "int8" => Scalar::I8,
            "uchar" | "uint8" => Scalar::U8,
            "short" | "int16" => Scalar::I16,
            "ushort" | "uint16" => Scalar::U16,
            "int" | "int32" => Scalar::I32,
            "uint" | "uint32" => Scalar::U32,
            "float" | "float32" => Scalar::F32,
            "double" | "float64" => Scalar::F64,
            _ => return None,
        })
    }

    fn size(self) -> usize {
        match self {
            Scalar::I8 | Scalar::U8 => 1,
            Scalar::I16 | Scalar::U16 => 2,
            Scalar::I32 | Scalar::U32 | Scalar::F32 => 4,
            Scalar::F64 => 8,
        }
    }

    fn is_float(self) -> bool {
        matches!(self, Scalar::F32 | Scalar::F64)
    }

    fn read(self, b: &[u8]) -> f32 {
        match self {
            Scalar::I8 => f32::from(b[0] as i8),
            Scalar::U8 => f32::from(b[0]),
            Scalar::I16 => f32::from(i16::from_le_bytes([b[0], b[1]])),
            Scalar::U16 => f32::from(u16::from_le_bytes([b[0], b[1]])),
            Scalar::I32 => i32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f32,
            Scalar::U32 => u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f32,
            Scalar::F32 => f32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            Scalar::F64 => {
                f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]) as f32
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Property {
    name: String,
    scalar: Scalar,
    offset: usize,
}

#[derive(Debug, Clone)]
enum Layout {
    Gaussian {
        dc: [usize; 3],
        opacity: usize,
        scale: [usize; 3],
        rot: [usize; 4],
    },
    Colored {
        rgb: [usize; 3],
        alpha: Option<usize>,
    },
}

#[derive(Debug, Clone)]
struct Header {
    vertex_count: usize,
    stride: usize,
    properties: Vec<Property>,
    position: [usize; 3],
    layout: Layout,
}

impl Header {
    fn parse(text: &str) -> Result<Self, DecodeError> {
        let mut lines = text.lines().map(str::trim);
        if lines.next() != Some("ply") {
            return Err(DecodeError::Header("missing 'ply' magic".into()));
        }

        let mut format = None;
        let mut vertex_count = None;
        let mut in_vertex = false;
        let mut properties = Vec::new();
        let mut stride = 0;

        for line in lines {
            let mut words = line.split_whitespace();
            match words.next() {
                Some("format") => format = words.next().map(str::to_string),
                Some("element") => {
                    let name = words.next().unwrap_or_default();
                    let count: usize = words
                        .next()
                        .and_then(|c| c.parse().ok())
                        .ok_or_else(|| DecodeError::Header(format!("bad element line '{line}'")))?;
                    if name == "vertex" {
                        vertex_count = Some(count);
                        in_vertex = true;
                    } else {
                        if vertex_count.is_none() && count > 0 {
                            return Err(DecodeError::Unsupported(format!(
                                "element '{name}' precedes vertex"
                            )));
                        }
                        in_vertex = false;
                    }
                }
                Some("property") if in_vertex => {
                    let ty = words.next().unwrap_or_default();
                    if ty == "list" {
                        return Err(DecodeError::Unsupported("list property on vertex".into()));
                    }
                    let scalar = Scalar::parse(ty).ok_or_else(|| {
                        DecodeError::Header(format!("unknown property type '{ty}'"))
                    })?;
                    let name = words
                        .next()
                        .ok_or_else(|| DecodeError::Header(format!("unnamed property '{line}'")))?;
                    properties.push(Property {
                        name: name.to_string(),
                        scalar,
                        offset: stride,
                    });
                    stride += scalar.size();
                }
                _ => {}
            }
        }

        match format.as_deref() {
            Some("binary_little_endian") => {}
            Some(other) => return Err(DecodeError::Unsupported(format!("format '{other}'"))),
            None => return Err(DecodeError::Header("missing format line".into())),
        }
        let vertex_count =
            vertex_count.ok_or_else(|| DecodeError::Header("missing vertex element".into()))?;
        if vertex_count.checked_mul(stride).is_none() {
            return Err(DecodeError::Header(format!(
                "vertex count {vertex_count} is too large"
            )));
        }

        let find = |name: &'static str| -> Result<usize, DecodeError> {
            properties
                .iter()
                .position(|p| p.name == name)
                .ok_or(DecodeError::MissingProperty(name))
        };

        let position = [find("x")?, find("y")?, find("z")?];
        let layout = if properties.iter().any(|p| p.name == "f_dc_0") {
            Layout::Gaussian {
                dc: [find("f_dc_0")?, find("f_dc_1")?, find("f_dc_2")?],
                opacity: find("opacity")?,
                scale: [find("scale_0")?, find("scale_1")?, find("scale_2")?],
                rot: [find("rot_0")?, find("rot_1")?, find("rot_2")?, find("rot_3")?],
            }
        } else if properties.iter().any(|p| p.name == "red") {
            Layout::Colored {
                rgb: [find("red")?, find("green")?, find("blue")?],
                alpha: find("alpha").ok(),
            }
        } else {
            return Err(DecodeError::MissingProperty("f_dc_0"));
        };

        Ok(Self {
            vertex_count,
            stride,
            properties,
            position,
            layout,
        })
    }

    fn value(&self, row: &[u8], index: usize) -> f32 {
        let p = &self.properties[index];
        p.scalar.read(&row[p.offset..p.offset + p.scalar.size()])
    }

    /// A colour channel as a byte. Integer channels are taken as-is, float
    /// channels are read as `0.0..=1.0`.
    fn channel(&self, row: &[u8], index: usize) -> u8 {
        let value = self.value(row, index);
        let scaled = if self.properties[index].scalar.is_float() {
            value * 255.0
        } else {
            value
        };
        to_byte(scaled)
    }

    fn decode_row(&self, row: &[u8]) -> Splat {
        let position = self.position.map(|i| self.value(row, i));
        match &self.layout {
            Layout::Gaussian {
                dc,
                opacity,
                scale,
                rot,
            } => {
                let rgb = dc.map(|i| to_byte((0.5 + SH_C0 * self.value(row, i)) * 255.0));
                let alpha = to_byte(sigmoid(self.value(row, *opacity)) * 255.0);
                Splat {
                    position,
                    scale: scale.map(|i| self.value(row, i).exp()),
                    rotation: normalize_quat(rot.map(|i| self.value(row, i))),
                    color: [rgb[0], rgb[1], rgb[2], alpha],
                }
            }
            Layout::Colored { rgb, alpha } => {
                let rgb = rgb.map(|i| self.channel(row, i));
                let alpha = alpha.map_or(255, |i| self.channel(row, i));
                Splat {
                    position,
                    scale: [POINT_SCALE; 3],
                    rotation: Splat::IDENTITY_ROTATION,
                    color: [rgb[0], rgb[1], rgb[2], alpha],
                }
            }
        }
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn to_byte(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

#[derive(Debug, Default)]
pub struct PlyDecoder {
    header: Option<Header>,
    buffer: Vec<u8>,
    splats: Vec<Splat>,
}

impl PlyDecoder {
    pub fn push(&mut self, chunk: &[u8]) -> Result<(), DecodeError> {
        if let Some(header) = &self.header {
            if self.splats.len() >= header.vertex_count {
                return Ok(());
            }
        }
        self.buffer.extend_from_slice(chunk);

        if self.header.is_none() {
            let Some(body_start) = find_body_start(&self.buffer) else {
                return Ok(());
            };
            let text = String::from_utf8_lossy(&self.buffer[..body_start]).into_owned();
            let header = Header::parse(&text)?;
            tracing::debug!(
                vertices = header.vertex_count,
                stride = header.stride,
                "parsed PLY header"
            );
            self.splats.reserve(header.vertex_count.min(MAX_RESERVE));
            self.buffer.drain(..body_start);
            self.header = Some(header);
        }

        if let Some(header) = &self.header {
            let remaining = header.vertex_count - self.splats.len();
            let rows = (self.buffer.len() / header.stride.max(1)).min(remaining);
            let used = rows * header.stride;
            for row in self.buffer[..used].chunks_exact(header.stride.max(1)) {
                self.splats.push(header.decode_row(row));
            }
            self.buffer.drain(..used);
        }
        Ok(())
    }

    pub fn finish(self) -> Result<Vec<Splat>, DecodeError> {
        let header = self
            .header
            .ok_or_else(|| DecodeError::Header("stream ended inside the header".into()))?;
        if self.splats.len() < header.vertex_count {
            return Err(DecodeError::Truncated {
                expected: header.vertex_count,
                got: self.splats.len(),
            });
        }
        Ok(self.splats)
    }
}

/// Offset of the first body byte, just past the `end_header` line.
fn find_body_start(buffer: &[u8]) -> Option<usize> {
    let marker = buffer
        .windows(HEADER_END.len())
        .position(|w| w == HEADER_END)?;
    let newline = buffer[marker..].iter().position(|&b| b == b'\n')?;
    Some(marker + newline + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gaussian_ply(rows: &[[f32; 14]]) -> Vec<u8> {
        let mut out = format!(
            "ply\nformat binary_little_endian 1.0\ncomment trained\nelement vertex {}\n",
            rows.len()
        )
        .into_bytes();
        for name in [
            "x", "y", "z", "f_dc_0", "f_dc_1", "f_dc_2", "opacity", "scale_0", "scale_1",
            "scale_2", "rot_0", "rot_1", "rot_2", "rot_3",
        ] {
            out.extend_from_slice(format!("property float {name}\n").as_bytes());
        }
        out.extend_from_slice(b"end_header\n");
        for row in rows {
            for v in row {
                out.extend_from_slice(&v.to_le_bytes());
            }
        }
        out
    }

    fn colored_ply() -> Vec<u8> {
        let mut out = b"ply\nformat binary_little_endian 1.0\nelement vertex 2\n\
property float x\nproperty float y\nproperty float z\n\
property uchar red\nproperty uchar green\nproperty uchar blue\n\
element face 0\nproperty list uchar int vertex_indices\nend_header\n"
            .to_vec();
        for (pos, rgb) in [([0.0f32, 1.0, 2.0], [255u8, 0, 10]), ([3.0, 4.0, 5.0], [1, 2, 3])] {
            for v in pos {
                out.extend_from_slice(&v.to_le_bytes());
            }
            out.extend_from_slice(&rgb);
        }
        out
    }

    #[test]
    fn decodes_gaussian_rows_across_chunks() {
        let bytes = gaussian_ply(&[
            [1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            [-1.0, 0.0, 0.5, 1.0, -10.0, 0.0, 20.0, -1.0, -2.0, -3.0, 0.0, 0.0, 2.0, 0.0],
        ]);
        let mut decoder = PlyDecoder::default();
        for chunk in bytes.chunks(5) {
            decoder.push(chunk).unwrap();
        }
        let splats = decoder.finish().unwrap();
        assert_eq!(splats.len(), 2);

        let a = splats[0];
        assert_eq!(a.position, [1.0, 2.0, 3.0]);
        assert_eq!(a.color, [128, 128, 128, 128]);
        assert_eq!(a.scale, [1.0; 3]);
        assert_eq!(a.rotation, [1.0, 0.0, 0.0, 0.0]);

        let b = splats[1];
        // 0.5 + 0.2821 = 0.7821 → 199; 0.5 - 2.821 clamps to 0.
        assert_eq!(b.color[0], 199);
        assert_eq!(b.color[1], 0);
        assert_eq!(b.color[3], 255);
        assert!((b.scale[0] - (-1.0f32).exp()).abs() < 1e-6);
        assert_eq!(b.rotation, [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn decodes_colored_point_cloud_and_ignores_faces() {
        let mut decoder = PlyDecoder::default();
        decoder.push(&colored_ply()).unwrap();
        let splats = decoder.finish().unwrap();
        assert_eq!(splats.len(), 2);
        assert_eq!(splats[0].color, [255, 0, 10, 255]);
        assert_eq!(splats[1].position, [3.0, 4.0, 5.0]);
        assert_eq!(splats[1].scale, [POINT_SCALE; 3]);
    }

    #[test]
    fn ascii_format_is_unsupported() {
        let mut decoder = PlyDecoder::default();
        let err = decoder
            .push(b"ply\nformat ascii 1.0\nelement vertex 1\nproperty float x\nend_header\n")
            .unwrap_err();
        assert_eq!(err, DecodeError::Unsupported("format 'ascii'".into()));
    }

    #[test]
    fn missing_magic_is_a_header_error() {
        let mut decoder = PlyDecoder::default();
        let err = decoder.push(b"plx\nend_header\n").unwrap_err();
        assert!(matches!(err, DecodeError::Header(_)));
    }

    #[test]
    fn missing_position_is_reported() {
        let mut decoder = PlyDecoder::default();
        let err = decoder
            .push(
                b"ply\nformat binary_little_endian 1.0\nelement vertex 1\n\
property float y\nproperty float z\nproperty uchar red\nend_header\n",
            )
            .unwrap_err();
        assert_eq!(err, DecodeError::MissingProperty("x"));
    }

    #[test]
    fn short_body_is_truncated() {
        let mut bytes = gaussian_ply(&[[0.0; 14], [0.0; 14]]);
        bytes.truncate(bytes.len() - 10);
        let mut decoder = PlyDecoder::default();
        decoder.push(&bytes).unwrap();
        assert_eq!(
            decoder.finish(),
            Err(DecodeError::Truncated {
                expected: 2,
                got: 1
            })
        );
    }

    fn header_with_count(count: &str) -> Vec<u8> {
        format!(
            "ply\nformat binary_little_endian 1.0\nelement vertex {count}\n\
property float x\nproperty float y\nproperty float z\n\
property uchar red\nproperty uchar green\nproperty uchar blue\nend_header\n"
        )
        .into_bytes()
    }

    #[test]
    fn overflowing_vertex_count_is_a_header_error() {
        let mut decoder = PlyDecoder::default();
        let err = decoder
            .push(&header_with_count("18446744073709551615"))
            .unwrap_err();
        assert!(matches!(err, DecodeError::Header(ref m) if m.contains("too large")), "{err:?}");
    }

    #[test]
    fn huge_vertex_count_does_not_preallocate() {
        // Representable, but far more than any real download carries.
        let mut decoder = PlyDecoder::default();
        let mut bytes = header_with_count("1000000000000");
        bytes.extend_from_slice(&[0u8; 15 * 3]);
        decoder.push(&bytes).unwrap();
        assert_eq!(
            decoder.finish(),
            Err(DecodeError::Truncated {
                expected: 1_000_000_000_000,
                got: 3
            })
        );
    }

    #[test]
    fn stream_ending_in_header_fails() {
        let mut decoder = PlyDecoder::default();
        decoder.push(b"ply\nformat binary_little_endian 1.0\n").unwrap();
        assert!(matches!(decoder.finish(), Err(DecodeError::Header(_))));
    }
}
