pub mod in_memory;

use crate::core::errors::CentsibleError;
use crate::core::models::AppLog;
use async_trait::async_trait;

/// Application action log: one entry per ledger mutation or query.
#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        member_id: Option<&str>,
    ) -> Result<(), CentsibleError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, CentsibleError>;
}
