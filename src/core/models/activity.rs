use super::currency::Currency;
use super::ids::{GroupId, MemberId, RecordId};
use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Expense,
    Payment,
}

/// How the viewing member relates to a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Involvement {
    YouPaid,
    TheyPaid,
    YouWerePaid,
    NotInvolved,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub record_id: RecordId,
    pub kind: ActivityKind,
    pub group_id: GroupId,
    pub amount: Money,
    pub currency: Currency,
    pub payer: MemberId,
    /// Set for payments only.
    pub payee: Option<MemberId>,
    pub memo: Option<String>,
    pub category: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub involvement: Involvement,
    /// Signed change to the viewer's net balance caused by this record.
    pub impact: Money,
}
