//! Rental, network, and conversion validation.

use crate::schema::AtelierConfig;

use super::helpers::{validate_range, validate_range_f64};

pub(crate) fn validate_rental(errors: &mut Vec<String>, config: &AtelierConfig) {
    validate_range_f64(errors, "rental.deposit_rate", config.rental.deposit_rate, 0.0, 1.0);
    validate_range(
        errors,
        "rental.lead_time_days",
        config.rental.lead_time_days as u64,
        0,
        365,
    );
}

pub(crate) fn validate_network(errors: &mut Vec<String>, config: &AtelierConfig) {
    validate_range(
        errors,
        "network.connect_timeout_secs",
        config.network.connect_timeout_secs,
        1,
        600,
    );
    validate_range(
        errors,
        "network.request_timeout_secs",
        config.network.request_timeout_secs,
        1,
        3600,
    );
    if config.network.proxy_tag.trim().is_empty() {
        errors.push("network.proxy_tag must not be empty".into());
    }
}

pub(crate) fn validate_conversion(errors: &mut Vec<String>, config: &AtelierConfig) {
    validate_range(errors, "conversion.delay_ms", config.conversion.delay_ms, 0, 60_000);
    if config.conversion.models.is_empty() {
        errors.push("conversion.models must list at least one model URL".into());
    }
    for (i, model) in config.conversion.models.iter().enumerate() {
        if !(model.starts_with("http://") || model.starts_with("https://")) {
            errors.push(format!("conversion.models[{i}] = {model:?} is not an http(s) URL"));
        }
    }
}
