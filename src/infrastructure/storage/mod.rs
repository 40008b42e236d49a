use crate::core::errors::CentsibleError;
use crate::core::models::{
    Expense, ExpenseCandidate, Group, GroupId, Member, MemberId, Payment, PaymentCandidate,
};
use async_trait::async_trait;

/// Persistence port. Stored expenses and payments are immutable; inserting a
/// candidate assigns its id and timestamp.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_member(&self, member: Member) -> Result<(), CentsibleError>;
    async fn get_member(&self, member_id: &MemberId) -> Result<Option<Member>, CentsibleError>;
    async fn save_group(&self, group: Group) -> Result<(), CentsibleError>;
    async fn get_group(&self, group_id: &GroupId) -> Result<Option<Group>, CentsibleError>;
    async fn list_groups(&self) -> Result<Vec<Group>, CentsibleError>;
    async fn get_member_groups(&self, member_id: &MemberId) -> Result<Vec<Group>, CentsibleError>;
    async fn insert_expense(&self, candidate: ExpenseCandidate) -> Result<Expense, CentsibleError>;
    async fn insert_payment(&self, candidate: PaymentCandidate) -> Result<Payment, CentsibleError>;
    async fn get_expenses(&self, group_id: &GroupId) -> Result<Vec<Expense>, CentsibleError>;
    async fn get_payments(&self, group_id: &GroupId) -> Result<Vec<Payment>, CentsibleError>;
}

pub mod in_memory;
pub mod snapshot;
