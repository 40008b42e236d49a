use super::currency::Currency;
use super::ids::{GroupId, MemberId};
use super::member::Member;
use super::money::Money;
use crate::core::errors::MalformedRecordError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which records an aggregation covers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Group(GroupId),
    All,
}

impl Scope {
    pub fn includes(&self, group_id: &GroupId) -> bool {
        match self {
            Scope::Group(id) => id == group_id,
            Scope::All => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    pub member_id: MemberId,
    pub amount: Money,
}

/// Derived view of one member's position. Never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub member_id: MemberId,
    pub owes: Money,
    pub is_owed: Money,
    /// `is_owed - owes`
    pub net: Money,
    pub owes_breakdown: Vec<Counterparty>,
    pub is_owed_breakdown: Vec<Counterparty>,
}

impl Balance {
    pub fn empty(member_id: MemberId) -> Self {
        Balance {
            member_id,
            owes: Money::ZERO,
            is_owed: Money::ZERO,
            net: Money::ZERO,
            owes_breakdown: Vec::new(),
            is_owed_breakdown: Vec::new(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.owes.is_zero() && self.is_owed.is_zero()
    }

    /// What this member owes `counterparty`, zero if nothing.
    pub fn owed_to(&self, counterparty: &MemberId) -> Money {
        self.owes_breakdown
            .iter()
            .find(|c| c.member_id == *counterparty)
            .map(|c| c.amount)
            .unwrap_or(Money::ZERO)
    }

    /// What `counterparty` owes this member, zero if nothing.
    pub fn owed_by(&self, counterparty: &MemberId) -> Money {
        self.is_owed_breakdown
            .iter()
            .find(|c| c.member_id == *counterparty)
            .map(|c| c.amount)
            .unwrap_or(Money::ZERO)
    }
}

/// Result of one aggregation run: balances for every member seen in a valid
/// record, plus the records that were rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub scope: Scope,
    pub currency: Option<Currency>,
    pub balances: BTreeMap<MemberId, Balance>,
    pub skipped: Vec<MalformedRecordError>,
}

impl BalanceReport {
    pub fn balance_of(&self, member_id: &MemberId) -> Option<&Balance> {
        self.balances.get(member_id)
    }
}

/// A suggested payment that clears debt between two members.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

/// Balance joined with the member's display name, as a group page lists it.
#[derive(Clone, Debug, Serialize)]
pub struct MemberBalanceView {
    pub member: Member,
    pub balance: Balance,
}

/// Dashboard totals for one member across all of their groups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub member_id: MemberId,
    pub currency: Currency,
    pub owed_by_me: Money,
    pub owed_to_me: Money,
    pub net_balance: Money,
}

/// One group's balances and settle-up suggestions, as the ledger report lists them.
#[derive(Clone, Debug, Serialize)]
pub struct GroupReport {
    pub group_id: GroupId,
    pub name: String,
    pub report: BalanceReport,
    pub settle_up: Vec<Transfer>,
}
