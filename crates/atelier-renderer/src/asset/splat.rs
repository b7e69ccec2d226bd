use super::Bounds;

/// One Gaussian primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splat {
    pub position: [f32; 3],
    /// Linear (not log-space) standard deviations along the local axes.
    pub scale: [f32; 3],
    /// Unit quaternion, `[w, x, y, z]`.
    pub rotation: [f32; 4],
    /// sRGB colour with opacity in the alpha channel.
    pub color: [u8; 4],
}

impl Splat {
    pub const IDENTITY_ROTATION: [f32; 4] = [1.0, 0.0, 0.0, 0.0];
}

/// A decoded asset. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SplatAsset {
    splats: Vec<Splat>,
    bounds: Bounds,
}

impl SplatAsset {
    pub fn new(splats: Vec<Splat>) -> Self {
        let bounds = Bounds::from_points(splats.iter().map(|s| s.position));
        Self { splats, bounds }
    }

    pub fn splats(&self) -> &[Splat] {
        &self.splats
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.splats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.splats.is_empty()
    }
}
