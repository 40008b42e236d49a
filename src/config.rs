use crate::constants::{DEFAULT_MAX_EXPENSE_AMOUNT, DEFAULT_MAX_PARTICIPANTS, DEFAULT_MAX_TEXT_LENGTH};
use crate::core::errors::CentsibleError;
use crate::core::validation::LedgerLimits;
use dotenv::dotenv;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug)]
pub struct Config {
    pub log_level: String,
    pub max_expense_amount: String,
    pub max_participants: usize,
    pub max_text_length: usize,
    pub ledger_path: Option<PathBuf>,
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            max_expense_amount: env::var("MAX_EXPENSE_AMOUNT")
                .unwrap_or_else(|_| DEFAULT_MAX_EXPENSE_AMOUNT.to_string()),
            max_participants: env::var("MAX_PARTICIPANTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_PARTICIPANTS),
            max_text_length: env::var("MAX_TEXT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_TEXT_LENGTH),
            ledger_path: env::var("LEDGER_PATH").ok().map(PathBuf::from),
        }
    }

    pub fn limits(&self) -> Result<LedgerLimits, CentsibleError> {
        let max_amount = Decimal::from_str(&self.max_expense_amount).map_err(|e| {
            CentsibleError::ConfigError(format!(
                "MAX_EXPENSE_AMOUNT `{}` is not a decimal: {}",
                self.max_expense_amount, e
            ))
        })?;
        Ok(LedgerLimits {
            max_amount,
            max_participants: self.max_participants,
            max_text_length: self.max_text_length,
        })
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
