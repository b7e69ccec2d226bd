//! Full configuration validation.
//!
//! Validates numeric ranges and colour formats. Each domain has its own
//! submodule; this orchestrator calls them all and collects errors into a
//! single `ConfigError`.

mod helpers;
mod store;
mod viewer;

#[cfg(test)]
mod tests;

use crate::schema::AtelierConfig;
use atelier_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AtelierConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    viewer::validate_camera(&mut errors, config);
    viewer::validate_controls(&mut errors, config);
    viewer::validate_material(&mut errors, config);
    viewer::validate_frame(&mut errors, config);
    store::validate_rental(&mut errors, config);
    store::validate_network(&mut errors, config);
    store::validate_conversion(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
