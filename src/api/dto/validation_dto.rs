//! Draft validation DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DraftShowtime;
use crate::validation::{
    RuleCategory, ValidationError, ValidationField, ValidationRule, first_message, format_all,
};

/// Request body for `POST /events/validate`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ValidateEventRequest {
    /// Event name as entered.
    #[serde(default)]
    pub name: String,
    /// Showtimes as entered.
    #[serde(default)]
    pub showtimes: Vec<DraftShowtime>,
}

/// Result of validating a draft event.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationReport {
    /// `true` when the draft may be submitted.
    pub valid: bool,
    /// Number of findings.
    pub error_count: usize,
    /// Findings in evaluation order.
    pub errors: Vec<ValidationError>,
    /// All messages, one per line.
    pub summary: String,
    /// The first message, for compact displays.
    pub first_message: Option<String>,
}

impl From<Vec<ValidationError>> for ValidationReport {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            error_count: errors.len(),
            summary: format_all(&errors),
            first_message: first_message(&errors).map(str::to_string),
            errors,
        }
    }
}

/// One entry of the rule catalog served at `/config/validation-rules`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValidationRuleInfo {
    /// Rule identifier.
    pub rule: ValidationRule,
    /// Rule category.
    pub category: RuleCategory,
    /// Fields a finding of this rule is reported on.
    pub fields: Vec<ValidationField>,
}

impl From<ValidationRule> for ValidationRuleInfo {
    fn from(rule: ValidationRule) -> Self {
        Self {
            rule,
            category: rule.category(),
            fields: rule.fields().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_valid() {
        let report = ValidationReport::from(Vec::new());
        assert!(report.valid);
        assert_eq!(report.error_count, 0);
        assert!(report.summary.is_empty());
        assert!(report.first_message.is_none());
    }

    #[test]
    fn report_summarises_messages() {
        let report = ValidationReport::from(vec![
            ValidationError::new(ValidationField::Name, ValidationRule::NameRequired, "a"),
            ValidationError::new(
                ValidationField::Showtimes,
                ValidationRule::ShowtimesRequired,
                "b",
            ),
        ]);
        assert!(!report.valid);
        assert_eq!(report.error_count, 2);
        assert_eq!(report.summary, "a\nb");
        assert_eq!(report.first_message.as_deref(), Some("a"));
    }

    #[test]
    fn rule_info_lists_reported_fields() {
        let info = ValidationRuleInfo::from(ValidationRule::InvalidTimestamp);
        assert_eq!(info.category, RuleCategory::Malformed);
        assert_eq!(
            info.fields,
            vec![ValidationField::StartTime, ValidationField::EndTime]
        );
        let info = ValidationRuleInfo::from(ValidationRule::NonPositiveQuantity);
        assert_eq!(info.fields, vec![ValidationField::Quantity]);
    }
}
