//! Helpers for turning `validator` results into [`CoreError`]s.

use validator::ValidationErrors;

use crate::error::CoreError;

/// Pick the first failing field from `errors`, walking `field_order`.
///
/// `ValidationErrors` keeps fields in a hash map, so the caller supplies the
/// declaration order to make "the first error" deterministic.
pub fn first_field_error(errors: &ValidationErrors, field_order: &[&str]) -> CoreError {
    let field_errors = errors.field_errors();
    for field in field_order {
        let Some(first) = field_errors.get(*field).and_then(|errs| errs.first()) else {
            continue;
        };
        let message = first
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid value for {field}"));
        return CoreError::invalid_field(*field, message);
    }
    CoreError::Validation(errors.to_string())
}

/// Trim a string in place and collapse blank values to `None`.
pub fn trim_opt(value: &mut Option<String>) {
    if let Some(s) = value.take() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            *value = Some(trimmed.to_string());
        }
    }
}

/// Trim every entry of a string list and drop the blank ones.
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
