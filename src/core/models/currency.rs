use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Three-letter uppercase currency code, e.g. `USD`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn usd() -> Self {
        Currency("USD".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Records loaded from persistence skip construction, so the aggregator
    /// re-checks the code.
    pub fn is_valid(&self) -> bool {
        Self::valid_code(&self.0)
    }

    fn valid_code(code: &str) -> bool {
        code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if Self::valid_code(&code) {
            Ok(Currency(code))
        } else {
            Err(format!("Invalid currency code: {}", s))
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
