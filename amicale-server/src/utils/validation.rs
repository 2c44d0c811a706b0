//! Input validation helpers
//!
//! Centralized validation for the CRUD handlers. SQLite TEXT has no
//! built-in length enforcement, so limits live here.

use crate::utils::AppError;

/// Entity names: username, nom, prenom, lieu, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, agendas, comments.
pub const MAX_NOTE_LEN: usize = 500;

/// PIN length (exactly 4 numeric digits).
pub const PIN_LEN: usize = 4;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} est obligatoire")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} est trop long ({} caractères, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        if v.len() > max_len {
            return Err(AppError::validation(format!(
                "{field} est trop long ({} caractères, max {max_len})",
                v.len()
            )));
        }
    }
    Ok(())
}

/// Validate a member PIN: exactly 4 characters, all ASCII digits.
pub fn validate_pin(pin: &str) -> Result<(), AppError> {
    if pin.len() != PIN_LEN || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(
            "Le code PIN doit contenir exactement 4 chiffres",
        ));
    }
    Ok(())
}

/// Validate a positive numeric id arriving as a query string value.
pub fn parse_id(raw: &str, field: &str) -> Result<i64, AppError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::validation(format!("{field} invalide"))),
    }
}
