use crate::constants::{DEFAULT_MAX_EXPENSE_AMOUNT, DEFAULT_MAX_PARTICIPANTS, DEFAULT_MAX_TEXT_LENGTH};
use crate::core::errors::{CentsibleError, FieldError};
use rust_decimal::Decimal;

/// Caps applied by the ledger service before anything reaches the engines.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerLimits {
    pub max_amount: Decimal,
    pub max_participants: usize,
    pub max_text_length: usize,
}

impl Default for LedgerLimits {
    fn default() -> Self {
        LedgerLimits {
            max_amount: Decimal::from(DEFAULT_MAX_EXPENSE_AMOUNT),
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

fn invalid(field: &str, title: impl Into<String>, description: impl Into<String>) -> CentsibleError {
    CentsibleError::InvalidInput(
        field.to_string(),
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        },
    )
}

pub fn validate_string_input(field: &str, value: &str, max_length: usize) -> Result<(), CentsibleError> {
    if value.trim().is_empty() {
        return Err(invalid(field, format!("Invalid {}", field), format!("{} cannot be empty", field)));
    }
    if value.chars().count() > max_length {
        return Err(invalid(
            field,
            format!("{} Too Long", field),
            format!("{} cannot exceed {} characters", field, max_length),
        ));
    }
    if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
        return Err(invalid(
            field,
            format!("Invalid {}", field),
            format!("{} contains invalid characters", field),
        ));
    }
    Ok(())
}

pub fn validate_optional_string(field: &str, value: Option<&str>, max_length: usize) -> Result<(), CentsibleError> {
    match value {
        Some(value) => validate_string_input(field, value, max_length),
        None => Ok(()),
    }
}

pub fn validate_amount_input(field: &str, amount: Decimal, limits: &LedgerLimits) -> Result<(), CentsibleError> {
    if amount <= Decimal::ZERO {
        return Err(invalid(field, "Invalid Amount", "Amount must be greater than 0"));
    }
    if amount > limits.max_amount {
        return Err(invalid(
            field,
            "Amount Too Large",
            format!("Amount cannot exceed {}", limits.max_amount),
        ));
    }
    if amount.normalize().scale() > 2 {
        return Err(invalid(
            field,
            "Invalid Amount",
            "Amount cannot have more than 2 decimal places",
        ));
    }
    Ok(())
}
