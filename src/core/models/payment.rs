use super::currency::Currency;
use super::ids::{GroupId, MemberId, RecordId};
use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentCandidate {
    pub group_id: GroupId,
    pub payer: MemberId,
    pub payee: MemberId,
    pub amount: Money,
    pub currency: Currency,
    pub memo: Option<String>,
}

/// A direct settlement transfer from `payer` to `payee`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Payment {
    pub id: RecordId,
    pub group_id: GroupId,
    pub payer: MemberId,
    pub payee: MemberId,
    pub amount: Money,
    pub currency: Currency,
    #[serde(default)]
    pub memo: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Payment {
    pub fn from_candidate(id: RecordId, timestamp: DateTime<Utc>, candidate: PaymentCandidate) -> Self {
        Payment {
            id,
            group_id: candidate.group_id,
            payer: candidate.payer,
            payee: candidate.payee,
            amount: candidate.amount,
            currency: candidate.currency,
            memo: candidate.memo,
            timestamp,
        }
    }
}
