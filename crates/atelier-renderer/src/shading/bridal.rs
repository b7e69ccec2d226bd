//! Translucent fabric material: Gaussian falloff with alpha test, a
//! view-dependent sparkle, and a flat outline band for selected splats.

use atelier_common::Color;
use atelier_config::schema::MaterialConfig;

use super::{
    gaussian_exponent, shine_phase, smoothstep, sparkle_noise, Fragment, MaterialUniforms,
    ShadeInputs, Shaded, ShadingStrategy, GAUSSIAN_CUTOFF,
};

/// Warm white so the sparkle reads as satin rather than chrome.
const SHINE_TINT: [f32; 3] = [1.0, 0.97, 0.92];

/// Used when the configured outline colour does not parse (`#ff8000`).
const FALLBACK_OUTLINE: [f32; 4] = [1.0, 128.0 / 255.0, 0.0, 1.0];

#[derive(Debug, Clone, PartialEq)]
pub struct BridalMaterial {
    pub alpha_test: f32,
    pub shine_strength: f32,
    pub shine_power: f32,
    pub outline_thickness: f32,
    pub outline_color: [f32; 4],
}

impl BridalMaterial {
    pub fn from_config(config: &MaterialConfig) -> Self {
        let outline_color = Color::from_hex(&config.outline_color)
            .map(|c| c.to_f32_array())
            .unwrap_or_else(|| {
                tracing::warn!(color = %config.outline_color, "invalid outline colour, using default");
                FALLBACK_OUTLINE
            });
        Self {
            alpha_test: config.alpha_test as f32,
            shine_strength: config.shine_strength as f32,
            shine_power: config.shine_power as f32,
            outline_thickness: config.outline_thickness as f32,
            outline_color,
        }
    }
}

impl Default for BridalMaterial {
    fn default() -> Self {
        Self::from_config(&MaterialConfig::default())
    }
}

impl ShadingStrategy for BridalMaterial {
    fn name(&self) -> &'static str {
        "bridal"
    }

    fn fragment_wgsl(&self) -> &'static str {
        include_str!("../shaders/bridal_fragment.wgsl")
    }

    fn uniforms(&self, inputs: &ShadeInputs) -> MaterialUniforms {
        MaterialUniforms {
            alpha_test: self.alpha_test,
            shine_phase: shine_phase(inputs.time_secs, inputs.forward),
            shine_strength: self.shine_strength,
            shine_power: self.shine_power,
            outline_thickness: self.outline_thickness,
            selected: if inputs.selected { 1.0 } else { 0.0 },
            _padding: [0.0; 2],
            outline_color: self.outline_color,
        }
    }

    fn shade(&self, fragment: &Fragment, uniforms: &MaterialUniforms) -> Shaded {
        let a = gaussian_exponent(fragment.p);
        if a < -GAUSSIAN_CUTOFF {
            return Shaded::Discard;
        }

        if uniforms.selected > 0.5 {
            let threshold = -GAUSSIAN_CUTOFF + uniforms.outline_thickness / fragment.size.max(1e-4);
            if a < threshold {
                return Shaded::Color(uniforms.outline_color);
            }
        }

        let w = a.exp();
        let [r, g, b, opacity] = fragment.color;
        let alpha = w * opacity.clamp(0.0, 1.0);
        if alpha < uniforms.alpha_test {
            return Shaded::Discard;
        }

        let [px, py] = fragment.p;
        let uv = [
            fragment.frag_coord[0] * 0.015 + px * 2.25,
            fragment.frag_coord[1] * 0.015 + py * 2.25,
        ];
        let sparkle = sparkle_noise(uv, uniforms.shine_phase).powf(uniforms.shine_power);
        let edge = smoothstep(0.2, 1.0, 1.0 - (px * py).abs());
        let shine = sparkle * edge * uniforms.shine_strength * alpha;

        Shaded::Color([
            w * r + SHINE_TINT[0] * shine,
            w * g + SHINE_TINT[1] * shine,
            w * b + SHINE_TINT[2] * shine,
            alpha,
        ])
    }
}
