use serde::{Deserialize, Serialize};

/// Outcome of validating a payload.
///
/// Collects every failure instead of stopping at the first one so callers can
/// surface all problems at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(error: String) -> Self {
        Self {
            is_valid: false,
            errors: vec![error],
        }
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.errors.push(error);
        self.is_valid = false;
        self
    }

    /// Record `error` when `failed` is true.
    pub fn check(self, failed: bool, error: impl Into<String>) -> Self {
        if failed {
            self.with_error(error.into())
        } else {
            self
        }
    }

    /// Merge two validation results
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.is_valid = self.is_valid && other.is_valid;
        self
    }

    /// All errors joined into a single message
    pub fn message(&self) -> String {
        self.errors.join("; ")
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}
