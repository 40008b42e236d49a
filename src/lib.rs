pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::activity::member_activity;
pub use crate::core::balances::{compute_balances, compute_balances_by_currency, compute_balances_in};
pub use crate::core::errors::{CentsibleError, MalformedRecordError, SplitError};
pub use crate::core::services::{LedgerService, NewExpense, NewPayment};
pub use crate::core::settle_up::suggest_settlements;
pub use crate::core::split::{Split, SplitMethod, compute_split};
pub use crate::infrastructure::logging::in_memory::InMemoryLogging;
pub use crate::infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
