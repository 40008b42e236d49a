pub mod activity;
pub mod balances;
pub mod errors;
pub mod models;
pub mod services;
pub mod settle_up;
pub mod split;
pub mod validation;
