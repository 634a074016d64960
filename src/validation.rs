use crate::error::ApiError;

const MAX_FILTER_LEN: usize = 128;

/// Blank filter values count as absent. Surrounding whitespace is kept
/// because every filter compares exactly.
pub fn normalize_filter(name: &str, value: Option<String>) -> Result<Option<String>, ApiError> {
    match value {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) if v.chars().count() > MAX_FILTER_LEN => Err(ApiError::BadRequest(format!(
            "{name} must be at most {MAX_FILTER_LEN} characters"
        ))),
        Some(v) => Ok(Some(v)),
    }
}
