use std::num::NonZeroUsize;

use crate::error::{AppError, AppResult, ValidationError};
use crate::i18n::Locale;

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

pub(crate) fn parse_locale(s: &str) -> AppResult<Locale> {
    s.trim().parse::<Locale>().map_err(AppError::locale)
}

pub(crate) fn parse_threshold(s: &str) -> Result<f64, ValidationError> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|err| ValidationError::InvalidThreshold {
            value: s.to_owned(),
            source: err,
        })?;
    check_threshold(value)
}

pub(crate) fn check_threshold(value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::ThresholdOutOfRange { value })
    }
}

pub(crate) fn parse_window(s: &str) -> Result<NonZeroUsize, ValidationError> {
    let value = s
        .trim()
        .parse::<usize>()
        .map_err(|err| ValidationError::InvalidWindow {
            value: s.to_owned(),
            source: err,
        })?;
    check_window(value)
}

pub(crate) fn check_window(value: usize) -> Result<NonZeroUsize, ValidationError> {
    NonZeroUsize::new(value)
        .filter(|window| window.get() >= 2)
        .ok_or(ValidationError::WindowTooSmall)
}

pub(crate) fn parse_brand(s: &str) -> Result<String, ValidationError> {
    let brand = s.trim();
    if brand.is_empty() {
        return Err(ValidationError::EmptyBrand);
    }
    Ok(brand.to_owned())
}
