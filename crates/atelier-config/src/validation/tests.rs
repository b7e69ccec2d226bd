//! Tests for the full validation pipeline.

use super::*;
use crate::schema::AtelierConfig;

#[test]
fn default_config_validates() {
    let config = AtelierConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_far_not_beyond_near() {
    let mut config = AtelierConfig::default();
    config.viewer.camera.near = 5.0;
    config.viewer.camera.far = 4.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("viewer.camera.far"));
}

#[test]
fn catches_non_finite_default_eye() {
    let mut config = AtelierConfig::default();
    config.viewer.camera.default_eye = [0.0, f64::NAN, 4.3];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("default_eye"));
}

#[test]
fn catches_zoom_limits_inverted() {
    let mut config = AtelierConfig::default();
    config.viewer.controls.min_zoom = 30.0;
    config.viewer.controls.max_zoom = 10.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("viewer.controls.max_zoom"));
}

#[test]
fn catches_pitch_beyond_half_pi() {
    let mut config = AtelierConfig::default();
    config.viewer.controls.max_angle = 2.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("viewer.controls.max_angle"));
}

#[test]
fn catches_zero_dampening() {
    let mut config = AtelierConfig::default();
    config.viewer.controls.dampening = 0.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("viewer.controls.dampening"));
}

#[test]
fn catches_alpha_test_out_of_range() {
    let mut config = AtelierConfig::default();
    config.viewer.material.alpha_test = -0.1;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("viewer.material.alpha_test"));
}

#[test]
fn catches_nan_shine_strength() {
    let mut config = AtelierConfig::default();
    config.viewer.material.shine_strength = f64::NAN;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("viewer.material.shine_strength"));
}

#[test]
fn catches_bad_outline_color() {
    let mut config = AtelierConfig::default();
    config.viewer.material.outline_color = "orange".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("viewer.material.outline_color"));
}

#[test]
fn catches_max_fps_too_high() {
    let mut config = AtelierConfig::default();
    config.viewer.frame.max_fps = 500;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("viewer.frame.max_fps"));
}

#[test]
fn throttled_frame_rate_is_valid() {
    let mut config = AtelierConfig::default();
    config.viewer.frame.max_fps = 30;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_deposit_rate_above_one() {
    let mut config = AtelierConfig::default();
    config.rental.deposit_rate = 1.5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("rental.deposit_rate"));
}

#[test]
fn catches_empty_proxy_tag() {
    let mut config = AtelierConfig::default();
    config.network.proxy_tag = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("network.proxy_tag"));
}

#[test]
fn catches_empty_conversion_models() {
    let mut config = AtelierConfig::default();
    config.conversion.models.clear();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("conversion.models"));
}

#[test]
fn catches_non_http_conversion_model() {
    let mut config = AtelierConfig::default();
    config.conversion.models = vec!["ftp://models.test/gown.splat".into()];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("conversion.models[0]"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = AtelierConfig::default();
    config.viewer.material.alpha_test = 2.0;
    config.rental.deposit_rate = -1.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("viewer.material.alpha_test"));
    assert!(err.contains("rental.deposit_rate"));
    assert!(err.contains("; "));
}
