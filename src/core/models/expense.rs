use super::currency::Currency;
use super::ids::{GroupId, MemberId, RecordId};
use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How an expense was divided. The per-participant inputs are not kept once
/// the shares are materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitKind {
    Equal,
    Percentage,
    Exact,
}

impl std::fmt::Display for SplitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SplitKind::Equal => "equal",
            SplitKind::Percentage => "percentage",
            SplitKind::Exact => "exact",
        };
        write!(f, "{}", s)
    }
}

/// A validated expense that has not been stored yet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpenseCandidate {
    pub group_id: GroupId,
    pub payer: MemberId,
    pub amount: Money,
    pub currency: Currency,
    pub split_kind: SplitKind,
    pub shares: BTreeMap<MemberId, Money>,
    pub category: Option<String>,
    pub memo: Option<String>,
    pub attachments: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Expense {
    pub id: RecordId,
    pub group_id: GroupId,
    pub payer: MemberId,
    pub amount: Money,
    pub currency: Currency,
    pub split_kind: SplitKind,
    pub participants: BTreeSet<MemberId>,
    pub shares: BTreeMap<MemberId, Money>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl Expense {
    pub fn from_candidate(id: RecordId, timestamp: DateTime<Utc>, candidate: ExpenseCandidate) -> Self {
        Expense {
            id,
            group_id: candidate.group_id,
            payer: candidate.payer,
            amount: candidate.amount,
            currency: candidate.currency,
            split_kind: candidate.split_kind,
            participants: candidate.shares.keys().cloned().collect(),
            shares: candidate.shares,
            category: candidate.category,
            memo: candidate.memo,
            attachments: candidate.attachments,
            timestamp,
        }
    }

    pub fn involves(&self, member_id: &MemberId) -> bool {
        self.payer == *member_id || self.participants.contains(member_id)
    }

    pub fn share_of(&self, member_id: &MemberId) -> Money {
        self.shares.get(member_id).copied().unwrap_or(Money::ZERO)
    }
}
