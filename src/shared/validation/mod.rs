pub mod field_rules;
pub mod validation_result;

pub use field_rules::FieldRules;
pub use validation_result::ValidationResult;
