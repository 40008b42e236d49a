use super::currency::Currency;
use super::ids::{GroupId, MemberId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub members: Vec<MemberId>,
    #[serde(default = "Currency::usd")]
    pub default_currency: Currency,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn has_member(&self, member_id: &MemberId) -> bool {
        self.members.iter().any(|m| m == member_id)
    }
}
