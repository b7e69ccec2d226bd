//! Unlit Gaussian splats with no sparkle or outline.

use super::{
    gaussian_exponent, Fragment, MaterialUniforms, ShadeInputs, Shaded, ShadingStrategy,
    GAUSSIAN_CUTOFF,
};

/// Alpha below this is dropped.
const PLAIN_ALPHA_TEST: f32 = 1.0 / 255.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlainMaterial;

impl ShadingStrategy for PlainMaterial {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn fragment_wgsl(&self) -> &'static str {
        include_str!("../shaders/plain_fragment.wgsl")
    }

    fn uniforms(&self, _inputs: &ShadeInputs) -> MaterialUniforms {
        MaterialUniforms {
            alpha_test: PLAIN_ALPHA_TEST,
            shine_phase: 0.0,
            shine_strength: 0.0,
            shine_power: 1.0,
            outline_thickness: 0.0,
            selected: 0.0,
            _padding: [0.0; 2],
            outline_color: [0.0; 4],
        }
    }

    fn shade(&self, fragment: &Fragment, uniforms: &MaterialUniforms) -> Shaded {
        let a = gaussian_exponent(fragment.p);
        if a < -GAUSSIAN_CUTOFF {
            return Shaded::Discard;
        }
        let w = a.exp();
        let [r, g, b, opacity] = fragment.color;
        let alpha = w * opacity.clamp(0.0, 1.0);
        if alpha < uniforms.alpha_test {
            return Shaded::Discard;
        }
        Shaded::Color([w * r, w * g, w * b, alpha])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_selection() {
        let u = PlainMaterial.uniforms(&ShadeInputs {
            time_secs: 0.0,
            forward: [0.0, 0.0, -1.0],
            selected: true,
        });
        assert_eq!(u.selected, 0.0);
        let f = Fragment {
            p: [1.9, 0.0],
            frag_coord: [0.0; 2],
            color: [1.0; 4],
            size: 1.0,
        };
        match PlainMaterial.shade(&f, &u) {
            Shaded::Color([r, _, _, a]) => {
                assert!((a - (-3.61f32).exp()).abs() < 1e-6);
                assert!((r - a).abs() < 1e-6);
            }
            Shaded::Discard => panic!("rim fragment discarded"),
        }
    }
}
