use super::ValidationResult;

/// Reusable text field checks. Lengths are counted in characters, not bytes.
pub struct FieldRules;

impl FieldRules {
    /// Field must be present and non-blank, and at most `max` characters.
    pub fn required_text(field: &str, value: &str, max: usize) -> ValidationResult {
        if value.trim().is_empty() {
            return ValidationResult::invalid(format!("{} cannot be empty", field));
        }
        Self::max_length(field, value, max)
    }

    /// Optional field: only the length is checked.
    pub fn optional_text(field: &str, value: Option<&str>, max: usize) -> ValidationResult {
        match value {
            Some(v) => Self::max_length(field, v, max),
            None => ValidationResult::valid(),
        }
    }

    pub fn max_length(field: &str, value: &str, max: usize) -> ValidationResult {
        if value.chars().count() > max {
            ValidationResult::invalid(format!("{} too long (max {} characters)", field, max))
        } else {
            ValidationResult::valid()
        }
    }
}
