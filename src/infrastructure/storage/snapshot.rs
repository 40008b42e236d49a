use crate::core::errors::CentsibleError;
use crate::core::models::{Expense, Group, Member, Payment};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full ledger contents as a JSON document, used to seed in-memory storage.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl LedgerSnapshot {
    pub fn from_json(json: &str) -> Result<Self, CentsibleError> {
        serde_json::from_str(json)
            .map_err(|e| CentsibleError::StorageError(format!("Failed to parse ledger snapshot: {}", e)))
    }

    pub async fn load(path: &Path) -> Result<Self, CentsibleError> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            CentsibleError::StorageError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}
