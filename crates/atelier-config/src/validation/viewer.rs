//! Viewer validation: camera projection, orbit limits, material, frame pacing.

use crate::schema::AtelierConfig;

use super::helpers::{validate_hex_color, validate_range, validate_range_f64};

const HALF_PI: f64 = std::f64::consts::FRAC_PI_2;

pub(crate) fn validate_camera(errors: &mut Vec<String>, config: &AtelierConfig) {
    let camera = &config.viewer.camera;
    validate_range_f64(errors, "viewer.camera.near", camera.near, 1e-4, 10.0);
    validate_range_f64(errors, "viewer.camera.far", camera.far, 1.0, 100_000.0);
    if camera.far <= camera.near {
        errors.push(format!(
            "viewer.camera.far = {} must be greater than near = {}",
            camera.far, camera.near
        ));
    }
    validate_range_f64(
        errors,
        "viewer.camera.fov_y_degrees",
        camera.fov_y_degrees,
        10.0,
        120.0,
    );
    if camera.default_eye.iter().any(|c| !c.is_finite()) {
        errors.push("viewer.camera.default_eye must be finite".into());
    }
    validate_range_f64(
        errors,
        "viewer.camera.default_distance",
        camera.default_distance,
        0.1,
        1000.0,
    );
}

pub(crate) fn validate_controls(errors: &mut Vec<String>, config: &AtelierConfig) {
    let controls = &config.viewer.controls;
    validate_range_f64(errors, "viewer.controls.min_zoom", controls.min_zoom, 0.01, 1000.0);
    validate_range_f64(errors, "viewer.controls.max_zoom", controls.max_zoom, 0.01, 1000.0);
    if controls.max_zoom < controls.min_zoom {
        errors.push(format!(
            "viewer.controls.max_zoom = {} is below min_zoom = {}",
            controls.max_zoom, controls.min_zoom
        ));
    }
    validate_range_f64(errors, "viewer.controls.min_angle", controls.min_angle, -HALF_PI, HALF_PI);
    validate_range_f64(errors, "viewer.controls.max_angle", controls.max_angle, -HALF_PI, HALF_PI);
    if controls.max_angle <= controls.min_angle {
        errors.push("viewer.controls.max_angle must be greater than min_angle".into());
    }
    validate_range_f64(errors, "viewer.controls.orbit_speed", controls.orbit_speed, 0.01, 10.0);
    validate_range_f64(errors, "viewer.controls.zoom_speed", controls.zoom_speed, 0.01, 10.0);
    validate_range_f64(errors, "viewer.controls.dampening", controls.dampening, 0.01, 1.0);
}

pub(crate) fn validate_material(errors: &mut Vec<String>, config: &AtelierConfig) {
    let material = &config.viewer.material;
    validate_range_f64(errors, "viewer.material.alpha_test", material.alpha_test, 0.0, 1.0);
    validate_range_f64(
        errors,
        "viewer.material.shine_strength",
        material.shine_strength,
        0.0,
        4.0,
    );
    validate_range_f64(errors, "viewer.material.shine_power", material.shine_power, 1.0, 64.0);
    validate_range_f64(
        errors,
        "viewer.material.outline_thickness",
        material.outline_thickness,
        0.0,
        100.0,
    );
    validate_hex_color(errors, "viewer.material.outline_color", &material.outline_color);
    validate_hex_color(errors, "viewer.material.background", &material.background);
}

pub(crate) fn validate_frame(errors: &mut Vec<String>, config: &AtelierConfig) {
    let frame = &config.viewer.frame;
    validate_range(errors, "viewer.frame.max_fps", frame.max_fps as u64, 0, 240);
    validate_range_f64(errors, "viewer.frame.fade_in_secs", frame.fade_in_secs, 0.0, 10.0);
}
