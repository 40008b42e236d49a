mod activity_tests;
mod split_tests;

use crate::core::models::{Currency, Expense, GroupId, MemberId, Money, Payment, RecordId, SplitKind};
use crate::core::services::LedgerService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

pub fn create_test_service() -> LedgerService<InMemoryStorage, InMemoryLogging> {
    let _ = env_logger::try_init();
    LedgerService::new(InMemoryStorage::new(), InMemoryLogging::new())
}

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn cents(value: i64) -> Money {
    Money::from_minor(value)
}

pub fn member(id: &str) -> MemberId {
    MemberId::from(id)
}

pub fn members(ids: &[&str]) -> Vec<MemberId> {
    ids.iter().map(|id| MemberId::from(*id)).collect()
}

pub fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, minute, 0).unwrap()
}

/// Stored expense whose amount is the sum of the given shares (in cents).
pub fn expense(id: &str, group: &str, payer: &str, shares: &[(&str, i64)]) -> Expense {
    let shares: BTreeMap<MemberId, Money> = shares.iter().map(|(m, c)| (member(m), cents(*c))).collect();
    Expense {
        id: RecordId::from(id),
        group_id: GroupId::from(group),
        payer: member(payer),
        amount: shares.values().sum(),
        currency: Currency::usd(),
        split_kind: SplitKind::Exact,
        participants: shares.keys().cloned().collect(),
        shares,
        category: None,
        memo: None,
        attachments: Vec::new(),
        timestamp: at(0),
    }
}

pub fn payment(id: &str, group: &str, payer: &str, payee: &str, amount: i64) -> Payment {
    Payment {
        id: RecordId::from(id),
        group_id: GroupId::from(group),
        payer: member(payer),
        payee: member(payee),
        amount: cents(amount),
        currency: Currency::usd(),
        memo: None,
        timestamp: at(0),
    }
}
