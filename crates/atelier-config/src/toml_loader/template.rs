//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Atelier Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[viewer.camera]
# near = 0.01
# far = 500.0
# fov_y_degrees = 50.0    # 10-120
# default_eye = [0.0, 1.15, 4.3]
# default_distance = 4.5

[viewer.controls]
# alpha = -0.3            # initial yaw (radians)
# beta = -0.22            # initial pitch (radians)
# radius = 4.5
# min_zoom = 1.1
# max_zoom = 24.0
# min_angle = -1.508      # -0.48 pi
# max_angle = 1.508
# orbit_speed = 0.7
# zoom_speed = 1.0
# dampening = 0.14        # 0.01-1.0

[viewer.material]
# alpha_test = 0.02       # 0.0-1.0
# shine_strength = 0.28   # 0.0-4.0
# shine_power = 10.0      # 1.0-64.0
# outline_thickness = 10.0
# outline_color = "#ff8000"
# background = "#00000000"

[viewer.frame]
# max_fps = 0             # 0 = every display refresh, otherwise 1-240
# fade_in_secs = 0.85

[rental]
# deposit_rate = 0.35     # 0.0-1.0
# lead_time_days = 2
# currency_symbol = "$"

[network]
# connect_timeout_secs = 10
# request_timeout_secs = 120
# proxy_tag = "bridal3d"

[conversion]
# delay_ms = 2200
# seed = 42
# models = ["https://example.com/gown.splat"]

[logging]
# level = "info"          # trace, debug, info, warn, error
"##
    .to_string()
}
