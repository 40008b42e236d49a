use crate::constants::{
    ACTIVITY_QUERIED, BALANCE_QUERIED, EXPENSE_ADDED, GROUP_CREATED, GROUP_MEMBER_ADDED, MEMBER_ADDED,
    PAYMENT_RECORDED, SETTLEMENTS_SUGGESTED, SUMMARY_QUERIED,
};
use crate::core::activity::member_activity;
use crate::core::balances::{compute_balances_by_currency, compute_balances_in};
use crate::core::errors::{CentsibleError, FieldError};
use crate::core::models::{
    ActivityEntry, AppLog, BalanceReport, Currency, Expense, ExpenseCandidate, Group, GroupId, GroupReport, Member,
    MemberBalanceView, MemberId, MemberSummary, Money, Payment, PaymentCandidate, Scope, Transfer,
};
use crate::core::settle_up::suggest_settlements;
use crate::core::split::{SplitMethod, compute_split};
use crate::core::validation::{LedgerLimits, validate_amount_input, validate_optional_string, validate_string_input};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use log::{info, warn};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeSet;

/// A proposed expense as the HTTP layer hands it over.
#[derive(Clone, Debug, Deserialize)]
pub struct NewExpense {
    pub group_id: GroupId,
    pub payer: MemberId,
    pub amount: Decimal,
    /// Falls back to the group's default currency, and must match it.
    #[serde(default)]
    pub currency: Option<Currency>,
    pub split: SplitMethod,
    pub participants: Vec<MemberId>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPayment {
    pub group_id: GroupId,
    pub payer: MemberId,
    pub payee: MemberId,
    pub amount: Decimal,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub memo: Option<String>,
}

pub struct LedgerService<S: Storage, L: LoggingService> {
    storage: S,
    logging: L,
    limits: LedgerLimits,
}

impl<S: Storage, L: LoggingService> LedgerService<S, L> {
    pub fn new(storage: S, logging: L) -> Self {
        LedgerService {
            storage,
            logging,
            limits: LedgerLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: LedgerLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &LedgerLimits {
        &self.limits
    }

    async fn validate_members(&self, member_ids: &[&MemberId]) -> Result<(), CentsibleError> {
        for &member_id in member_ids {
            if self.storage.get_member(member_id).await?.is_none() {
                return Err(CentsibleError::MemberNotFound(member_id.to_string()));
            }
        }
        Ok(())
    }

    async fn validate_group_membership(
        &self,
        group_id: &GroupId,
        member_id: &MemberId,
    ) -> Result<Group, CentsibleError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| CentsibleError::GroupNotFound(group_id.to_string()))?;
        if !group.has_member(member_id) {
            return Err(CentsibleError::NotGroupMember(member_id.to_string()));
        }
        Ok(group)
    }

    async fn log(
        &self,
        action: &str,
        details: serde_json::Value,
        member_id: Option<&MemberId>,
    ) -> Result<(), CentsibleError> {
        self.logging
            .log_action(action, details, member_id.map(MemberId::as_str))
            .await
    }

    pub async fn add_member(&self, member: Member) -> Result<Member, CentsibleError> {
        if member.id.is_blank() {
            return Err(CentsibleError::InvalidInput(
                "id".to_string(),
                FieldError {
                    field: "id".to_string(),
                    title: "Invalid id".to_string(),
                    description: "id cannot be empty".to_string(),
                },
            ));
        }
        validate_string_input("name", &member.name, self.limits.max_text_length)?;
        if self.storage.get_member(&member.id).await?.is_some() {
            return Err(CentsibleError::MemberAlreadyExists(member.id.to_string()));
        }

        self.storage.save_member(member.clone()).await?;
        self.log(
            MEMBER_ADDED,
            json!({ "member_id": member.id, "name": member.name }),
            Some(&member.id),
        )
        .await?;
        Ok(member)
    }

    pub async fn get_member(&self, member_id: &MemberId) -> Result<Option<Member>, CentsibleError> {
        self.storage.get_member(member_id).await
    }

    pub async fn create_group(
        &self,
        name: String,
        member_ids: Vec<MemberId>,
        default_currency: Currency,
        created_by: &MemberId,
    ) -> Result<Group, CentsibleError> {
        self.validate_members(&[created_by]).await?;
        validate_string_input("name", &name, self.limits.max_text_length)?;
        if !default_currency.is_valid() {
            return Err(invalid_currency(format!(
                "{} is not a three-letter currency code",
                default_currency
            )));
        }

        let mut members: Vec<MemberId> = Vec::new();
        for id in std::iter::once(created_by).chain(member_ids.iter()) {
            if !members.contains(id) {
                members.push(id.clone());
            }
        }
        self.validate_members(&members.iter().collect::<Vec<_>>()).await?;

        let group = Group {
            id: GroupId::new(uuid::Uuid::new_v4().to_string()),
            name,
            members,
            default_currency,
            created_at: Utc::now(),
        };
        self.storage.save_group(group.clone()).await?;

        self.log(
            GROUP_CREATED,
            json!({
                "group_id": group.id,
                "name": group.name,
                "member_ids": group.members,
                "currency": group.default_currency,
            }),
            Some(created_by),
        )
        .await?;
        info!("Group {} created with {} members", group.id, group.members.len());
        Ok(group)
    }

    pub async fn add_group_member(
        &self,
        group_id: &GroupId,
        member_id: &MemberId,
        added_by: &MemberId,
    ) -> Result<Group, CentsibleError> {
        let mut group = self.validate_group_membership(group_id, added_by).await?;
        self.validate_members(&[member_id]).await?;
        if group.has_member(member_id) {
            return Err(CentsibleError::AlreadyGroupMember(member_id.to_string()));
        }

        group.members.push(member_id.clone());
        self.storage.save_group(group.clone()).await?;
        self.log(
            GROUP_MEMBER_ADDED,
            json!({ "group_id": group_id, "member_id": member_id }),
            Some(added_by),
        )
        .await?;
        Ok(group)
    }

    pub async fn add_expense(&self, new: NewExpense, created_by: &MemberId) -> Result<Expense, CentsibleError> {
        let group = self.validate_group_membership(&new.group_id, created_by).await?;
        if !group.has_member(&new.payer) {
            return Err(CentsibleError::NotGroupMember(new.payer.to_string()));
        }
        if let Some(outsider) = new.participants.iter().find(|p| !group.has_member(p)) {
            return Err(CentsibleError::NotGroupMember(outsider.to_string()));
        }
        if new.participants.len() > self.limits.max_participants {
            return Err(CentsibleError::InvalidInput(
                "participants".to_string(),
                FieldError {
                    field: "participants".to_string(),
                    title: "Too Many Participants".to_string(),
                    description: format!(
                        "An expense cannot have more than {} participants",
                        self.limits.max_participants
                    ),
                },
            ));
        }
        validate_amount_input("amount", new.amount, &self.limits)?;
        validate_optional_string("memo", new.memo.as_deref(), self.limits.max_text_length)?;
        validate_optional_string("category", new.category.as_deref(), self.limits.max_text_length)?;
        let currency = record_currency(new.currency, &group)?;

        let split = compute_split(new.amount, &new.split, &new.participants)?;
        let candidate = ExpenseCandidate {
            group_id: group.id.clone(),
            payer: new.payer,
            amount: split.total(),
            currency,
            split_kind: new.split.kind(),
            shares: split.shares,
            category: new.category,
            memo: new.memo,
            attachments: new.attachments,
        };

        let expense = self.storage.insert_expense(candidate).await?;
        self.log(
            EXPENSE_ADDED,
            json!({
                "expense_id": expense.id,
                "group_id": expense.group_id,
                "amount": expense.amount,
                "currency": expense.currency,
                "payer": expense.payer,
                "split": expense.split_kind,
            }),
            Some(created_by),
        )
        .await?;
        info!("Expense {} of {} added to group {}", expense.id, expense.amount, expense.group_id);
        Ok(expense)
    }

    pub async fn record_payment(&self, new: NewPayment, created_by: &MemberId) -> Result<Payment, CentsibleError> {
        let group = self.validate_group_membership(&new.group_id, created_by).await?;
        if new.payer == new.payee {
            return Err(CentsibleError::SelfPayment);
        }
        for member_id in [&new.payer, &new.payee] {
            if !group.has_member(member_id) {
                return Err(CentsibleError::NotGroupMember(member_id.to_string()));
            }
        }
        validate_amount_input("amount", new.amount, &self.limits)?;
        validate_optional_string("memo", new.memo.as_deref(), self.limits.max_text_length)?;
        let currency = record_currency(new.currency, &group)?;

        let amount = Money::from_decimal(new.amount).map_err(|e| {
            CentsibleError::InvalidInput(
                "amount".to_string(),
                FieldError {
                    field: "amount".to_string(),
                    title: "Invalid Amount".to_string(),
                    description: e.to_string(),
                },
            )
        })?;
        let candidate = PaymentCandidate {
            group_id: group.id.clone(),
            payer: new.payer,
            payee: new.payee,
            amount,
            currency,
            memo: new.memo,
        };

        let payment = self.storage.insert_payment(candidate).await?;
        self.log(
            PAYMENT_RECORDED,
            json!({
                "payment_id": payment.id,
                "group_id": payment.group_id,
                "payer": payment.payer,
                "payee": payment.payee,
                "amount": payment.amount,
                "currency": payment.currency,
            }),
            Some(created_by),
        )
        .await?;
        info!(
            "Payment {} of {} from {} to {} recorded",
            payment.id, payment.amount, payment.payer, payment.payee
        );
        Ok(payment)
    }

    pub async fn group_balances(
        &self,
        group_id: &GroupId,
        queried_by: &MemberId,
    ) -> Result<BalanceReport, CentsibleError> {
        let group = self.validate_group_membership(group_id, queried_by).await?;
        let expenses = self.storage.get_expenses(group_id).await?;
        let payments = self.storage.get_payments(group_id).await?;

        let report = compute_balances_in(
            &expenses,
            &payments,
            &Scope::Group(group_id.clone()),
            &group.default_currency,
        );
        if !report.skipped.is_empty() {
            warn!(
                "Group {} aggregation skipped {} malformed records",
                group_id,
                report.skipped.len()
            );
        }
        self.log(
            BALANCE_QUERIED,
            json!({ "group_id": group_id, "skipped": report.skipped.len() }),
            Some(queried_by),
        )
        .await?;
        Ok(report)
    }

    /// Group balances paired with member display names, ordered by member id.
    pub async fn group_balance_views(
        &self,
        group_id: &GroupId,
        queried_by: &MemberId,
    ) -> Result<Vec<MemberBalanceView>, CentsibleError> {
        let report = self.group_balances(group_id, queried_by).await?;
        let mut views = Vec::with_capacity(report.balances.len());
        for (member_id, balance) in report.balances {
            let member = self
                .storage
                .get_member(&member_id)
                .await?
                .unwrap_or_else(|| Member::new(member_id.clone(), member_id.to_string()));
            views.push(MemberBalanceView { member, balance });
        }
        Ok(views)
    }

    /// Dashboard totals across every group the member belongs to, one entry
    /// per currency the member has records in.
    pub async fn member_summary(&self, member_id: &MemberId) -> Result<Vec<MemberSummary>, CentsibleError> {
        self.validate_members(&[member_id]).await?;
        let (expenses, payments) = self.member_records(member_id).await?;

        let summaries = compute_balances_by_currency(&expenses, &payments, &Scope::All)
            .into_iter()
            .filter_map(|(currency, report)| {
                report.balances.get(member_id).map(|balance| MemberSummary {
                    member_id: member_id.clone(),
                    currency,
                    owed_by_me: balance.owes,
                    owed_to_me: balance.is_owed,
                    net_balance: balance.net,
                })
            })
            .collect();

        self.log(SUMMARY_QUERIED, json!({ "member_id": member_id }), Some(member_id))
            .await?;
        Ok(summaries)
    }

    pub async fn member_activity(&self, member_id: &MemberId) -> Result<Vec<ActivityEntry>, CentsibleError> {
        self.validate_members(&[member_id]).await?;
        let (expenses, payments) = self.member_records(member_id).await?;
        let entries = member_activity(member_id, &expenses, &payments);

        self.log(
            ACTIVITY_QUERIED,
            json!({ "member_id": member_id, "entries": entries.len() }),
            Some(member_id),
        )
        .await?;
        Ok(entries)
    }

    pub async fn suggested_settlements(
        &self,
        group_id: &GroupId,
        queried_by: &MemberId,
    ) -> Result<Vec<Transfer>, CentsibleError> {
        let report = self.group_balances(group_id, queried_by).await?;
        let transfers = suggest_settlements(&report.balances);
        self.log(
            SETTLEMENTS_SUGGESTED,
            json!({ "group_id": group_id, "transfers": transfers.len() }),
            Some(queried_by),
        )
        .await?;
        Ok(transfers)
    }

    /// Balances and settle-up suggestions for every stored group. Used by
    /// operators, so no membership check applies.
    pub async fn ledger_report(&self) -> Result<Vec<GroupReport>, CentsibleError> {
        let mut reports = Vec::new();
        for group in self.storage.list_groups().await? {
            let expenses = self.storage.get_expenses(&group.id).await?;
            let payments = self.storage.get_payments(&group.id).await?;
            let report = compute_balances_in(
                &expenses,
                &payments,
                &Scope::Group(group.id.clone()),
                &group.default_currency,
            );
            for skipped in &report.skipped {
                warn!("Group {}: {}", group.id, skipped);
            }
            let settle_up = suggest_settlements(&report.balances);
            reports.push(GroupReport {
                group_id: group.id,
                name: group.name,
                report,
                settle_up,
            });
        }
        Ok(reports)
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, CentsibleError> {
        self.logging.get_logs().await
    }

    async fn member_records(&self, member_id: &MemberId) -> Result<(Vec<Expense>, Vec<Payment>), CentsibleError> {
        let groups = self.storage.get_member_groups(member_id).await?;
        let group_ids: BTreeSet<GroupId> = groups.into_iter().map(|g| g.id).collect();

        let mut expenses = Vec::new();
        let mut payments = Vec::new();
        for group_id in &group_ids {
            expenses.extend(self.storage.get_expenses(group_id).await?);
            payments.extend(self.storage.get_payments(group_id).await?);
        }
        Ok((expenses, payments))
    }
}

/// Every record in a group is kept in the group's currency.
fn record_currency(requested: Option<Currency>, group: &Group) -> Result<Currency, CentsibleError> {
    let currency = requested.unwrap_or_else(|| group.default_currency.clone());
    if !currency.is_valid() {
        return Err(invalid_currency(format!("{} is not a three-letter currency code", currency)));
    }
    if currency != group.default_currency {
        return Err(invalid_currency(format!(
            "Group {} keeps its ledger in {}, not {}",
            group.id, group.default_currency, currency
        )));
    }
    Ok(currency)
}

fn invalid_currency(description: String) -> CentsibleError {
    CentsibleError::InvalidInput(
        "currency".to_string(),
        FieldError {
            field: "currency".to_string(),
            title: "Invalid Currency".to_string(),
            description,
        },
    )
}
