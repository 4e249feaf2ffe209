//! Validation helpers for DTOs.

use validator::ValidationErrors;

/// Pick the first human-readable message out of `errors`.
///
/// Falls back to the validator code, then to a generic message, so callers always get text
/// they can return to the client.
pub fn first_error_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .next()
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => err.code.to_string(),
        })
        .unwrap_or_else(|| "validation failed".to_string())
}
