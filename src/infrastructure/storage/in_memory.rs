use super::snapshot::LedgerSnapshot;
use crate::core::errors::CentsibleError;
use crate::core::models::{
    Expense, ExpenseCandidate, Group, GroupId, Member, MemberId, Payment, PaymentCandidate, RecordId,
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    members: Arc<RwLock<HashMap<MemberId, Member>>>,
    groups: Arc<RwLock<HashMap<GroupId, Group>>>,
    // Vecs keep insertion order, which aggregation depends on.
    expenses: Arc<RwLock<Vec<Expense>>>,
    payments: Arc<RwLock<Vec<Payment>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        InMemoryStorage {
            members: Arc::new(RwLock::new(
                snapshot.members.into_iter().map(|m| (m.id.clone(), m)).collect(),
            )),
            groups: Arc::new(RwLock::new(
                snapshot.groups.into_iter().map(|g| (g.id.clone(), g)).collect(),
            )),
            expenses: Arc::new(RwLock::new(snapshot.expenses)),
            payments: Arc::new(RwLock::new(snapshot.payments)),
        }
    }

    fn next_record_id() -> RecordId {
        RecordId::new(Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_member(&self, member: Member) -> Result<(), CentsibleError> {
        let mut members = self.members.write().await;
        members.insert(member.id.clone(), member);
        Ok(())
    }

    async fn get_member(&self, member_id: &MemberId) -> Result<Option<Member>, CentsibleError> {
        let members = self.members.read().await;
        Ok(members.get(member_id).cloned())
    }

    async fn save_group(&self, group: Group) -> Result<(), CentsibleError> {
        let mut groups = self.groups.write().await;
        groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &GroupId) -> Result<Option<Group>, CentsibleError> {
        let groups = self.groups.read().await;
        Ok(groups.get(group_id).cloned())
    }

    async fn list_groups(&self) -> Result<Vec<Group>, CentsibleError> {
        let groups = self.groups.read().await;
        let mut all: Vec<Group> = groups.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn get_member_groups(&self, member_id: &MemberId) -> Result<Vec<Group>, CentsibleError> {
        let groups = self.groups.read().await;
        let mut member_groups: Vec<Group> = groups
            .values()
            .filter(|g| g.has_member(member_id))
            .cloned()
            .collect();
        member_groups.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(member_groups)
    }

    async fn insert_expense(&self, candidate: ExpenseCandidate) -> Result<Expense, CentsibleError> {
        let expense = Expense::from_candidate(Self::next_record_id(), Utc::now(), candidate);
        let mut expenses = self.expenses.write().await;
        expenses.push(expense.clone());
        Ok(expense)
    }

    async fn insert_payment(&self, candidate: PaymentCandidate) -> Result<Payment, CentsibleError> {
        let payment = Payment::from_candidate(Self::next_record_id(), Utc::now(), candidate);
        let mut payments = self.payments.write().await;
        payments.push(payment.clone());
        Ok(payment)
    }

    async fn get_expenses(&self, group_id: &GroupId) -> Result<Vec<Expense>, CentsibleError> {
        let expenses = self.expenses.read().await;
        Ok(expenses.iter().filter(|e| e.group_id == *group_id).cloned().collect())
    }

    async fn get_payments(&self, group_id: &GroupId) -> Result<Vec<Payment>, CentsibleError> {
        let payments = self.payments.read().await;
        Ok(payments.iter().filter(|p| p.group_id == *group_id).cloned().collect())
    }
}
