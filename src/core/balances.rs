//! Balance aggregator: folds expenses and payments into net pairwise debts
//! and per-member totals.

use crate::core::errors::MalformedRecordError;
use crate::core::models::{
    Balance, BalanceReport, Counterparty, Currency, Expense, MemberId, Money, Payment, Scope,
};
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};

/// Directed amounts keyed by (debtor, creditor).
type DirectedLedger = BTreeMap<(MemberId, MemberId), Money>;

/// Gross amount each member has been party to. Every figure later derived
/// for a member (pair debts, owes, is_owed, net) is bounded by it, so a record
/// is only accepted while every involved member's exposure fits in range.
type Exposure = BTreeMap<MemberId, Money>;

const OUT_OF_RANGE: &str = "amount out of range";

/// Aggregates every in-scope record in a single currency.
///
/// Malformed records are skipped and listed in [`BalanceReport::skipped`];
/// aggregation carries on with the rest. The report currency is taken from
/// the first well-formed record, and records in any other currency are
/// skipped as mismatched.
pub fn compute_balances(expenses: &[Expense], payments: &[Payment], scope: &Scope) -> BalanceReport {
    aggregate(expenses, payments, scope, None)
}

/// Like [`compute_balances`], but the report currency is fixed up front, so
/// the result does not depend on which record happens to come first.
pub fn compute_balances_in(
    expenses: &[Expense],
    payments: &[Payment],
    scope: &Scope,
    currency: &Currency,
) -> BalanceReport {
    aggregate(expenses, payments, scope, Some(currency.clone()))
}

fn aggregate(
    expenses: &[Expense],
    payments: &[Payment],
    scope: &Scope,
    mut currency: Option<Currency>,
) -> BalanceReport {
    let mut ledger = DirectedLedger::new();
    let mut exposure = Exposure::new();
    let mut members = BTreeSet::new();
    let mut skipped = Vec::new();

    for expense in expenses.iter().filter(|e| scope.includes(&e.group_id)) {
        let checked = check_expense(expense)
            .and_then(|_| check_currency(currency.as_ref(), &expense.currency))
            .and_then(|_| reserve(&mut exposure, expense_flows(expense)?))
            .map_err(|reason| MalformedRecordError::expense(&expense.id, reason));
        if let Err(err) = checked {
            warn!("Skipping expense {}: {}", expense.id, err.reason);
            skipped.push(err);
            continue;
        }

        currency.get_or_insert_with(|| expense.currency.clone());
        members.insert(expense.payer.clone());
        for (participant, share) in &expense.shares {
            members.insert(participant.clone());
            if *participant == expense.payer || share.is_zero() {
                continue;
            }
            *ledger
                .entry((participant.clone(), expense.payer.clone()))
                .or_insert(Money::ZERO) += *share;
        }
    }

    for payment in payments.iter().filter(|p| scope.includes(&p.group_id)) {
        let checked = check_payment(payment)
            .and_then(|_| check_currency(currency.as_ref(), &payment.currency))
            .and_then(|_| {
                reserve(
                    &mut exposure,
                    vec![
                        (payment.payer.clone(), payment.amount),
                        (payment.payee.clone(), payment.amount),
                    ],
                )
            })
            .map_err(|reason| MalformedRecordError::payment(&payment.id, reason));
        if let Err(err) = checked {
            warn!("Skipping payment {}: {}", payment.id, err.reason);
            skipped.push(err);
            continue;
        }

        currency.get_or_insert_with(|| payment.currency.clone());
        members.insert(payment.payer.clone());
        members.insert(payment.payee.clone());
        *ledger
            .entry((payment.payer.clone(), payment.payee.clone()))
            .or_insert(Money::ZERO) -= payment.amount;
    }

    let balances = build_balances(members, net_pairs(ledger));
    debug!(
        "Aggregated {} balances for scope {:?} ({} records skipped)",
        balances.len(),
        scope,
        skipped.len()
    );

    BalanceReport {
        scope: scope.clone(),
        currency,
        balances,
        skipped,
    }
}

/// What an expense moves through each member: the payer fronts every other
/// participant's share, each participant takes on their own.
fn expense_flows(expense: &Expense) -> Result<Vec<(MemberId, Money)>, String> {
    let mut fronted = Money::ZERO;
    let mut flows = Vec::with_capacity(expense.shares.len() + 1);
    for (participant, share) in &expense.shares {
        if *participant == expense.payer || share.is_zero() {
            continue;
        }
        fronted = fronted.checked_add(*share).ok_or_else(|| OUT_OF_RANGE.to_string())?;
        flows.push((participant.clone(), *share));
    }
    flows.push((expense.payer.clone(), fronted));
    Ok(flows)
}

/// Adds a record's flows to the running exposure, all or nothing.
/// Members in `flows` are distinct.
fn reserve(exposure: &mut Exposure, flows: Vec<(MemberId, Money)>) -> Result<(), String> {
    let mut updated = Vec::with_capacity(flows.len());
    for (member, amount) in flows {
        let current = exposure.get(&member).copied().unwrap_or(Money::ZERO);
        let total = current.checked_add(amount).ok_or_else(|| OUT_OF_RANGE.to_string())?;
        updated.push((member, total));
    }
    exposure.extend(updated);
    Ok(())
}

/// Partitions records by currency code and aggregates each partition on its own.
pub fn compute_balances_by_currency(
    expenses: &[Expense],
    payments: &[Payment],
    scope: &Scope,
) -> BTreeMap<Currency, BalanceReport> {
    let mut expense_groups: BTreeMap<Currency, Vec<Expense>> = BTreeMap::new();
    let mut payment_groups: BTreeMap<Currency, Vec<Payment>> = BTreeMap::new();
    for expense in expenses.iter().filter(|e| scope.includes(&e.group_id)) {
        expense_groups
            .entry(expense.currency.clone())
            .or_default()
            .push(expense.clone());
    }
    for payment in payments.iter().filter(|p| scope.includes(&p.group_id)) {
        payment_groups
            .entry(payment.currency.clone())
            .or_default()
            .push(payment.clone());
    }

    let currencies: BTreeSet<Currency> = expense_groups
        .keys()
        .chain(payment_groups.keys())
        .cloned()
        .collect();
    currencies
        .into_iter()
        .map(|currency| {
            let expenses = expense_groups.remove(&currency).unwrap_or_default();
            let payments = payment_groups.remove(&currency).unwrap_or_default();
            let report = compute_balances(&expenses, &payments, scope);
            (currency, report)
        })
        .collect()
}

fn check_currency(current: Option<&Currency>, record_currency: &Currency) -> Result<(), String> {
    match current {
        Some(currency) if currency != record_currency => Err(format!(
            "currency mismatch: {} in a {} aggregation",
            record_currency, currency
        )),
        _ => Ok(()),
    }
}

fn check_expense(expense: &Expense) -> Result<(), String> {
    if expense.payer.is_blank() {
        return Err("missing payer".to_string());
    }
    if !expense.amount.is_positive() {
        return Err(format!("non-positive amount {}", expense.amount));
    }
    if !expense.currency.is_valid() {
        return Err(format!("invalid currency `{}`", expense.currency));
    }
    if expense.participants.is_empty() {
        return Err("empty participant set".to_string());
    }
    if expense.participants.iter().any(MemberId::is_blank) {
        return Err("blank participant id".to_string());
    }
    if !expense.shares.keys().eq(expense.participants.iter()) {
        return Err("shares do not match the participant set".to_string());
    }
    if let Some((id, share)) = expense.shares.iter().find(|(_, share)| share.is_negative()) {
        return Err(format!("negative share {} for {}", share, id));
    }
    let share_sum = expense
        .shares
        .values()
        .try_fold(Money::ZERO, |sum, share| sum.checked_add(*share))
        .ok_or_else(|| OUT_OF_RANGE.to_string())?;
    if share_sum != expense.amount {
        return Err(format!("shares sum to {}, expected {}", share_sum, expense.amount));
    }
    Ok(())
}

fn check_payment(payment: &Payment) -> Result<(), String> {
    if payment.payer.is_blank() {
        return Err("missing payer".to_string());
    }
    if payment.payee.is_blank() {
        return Err("missing payee".to_string());
    }
    if payment.payer == payment.payee {
        return Err("payer and payee are the same member".to_string());
    }
    if !payment.amount.is_positive() {
        return Err(format!("non-positive amount {}", payment.amount));
    }
    if !payment.currency.is_valid() {
        return Err(format!("invalid currency `{}`", payment.currency));
    }
    Ok(())
}

/// Collapses A->B and B->A into one signed value per unordered pair.
/// Positive means the first (lower id) member owes the second.
fn net_pairs(ledger: DirectedLedger) -> BTreeMap<(MemberId, MemberId), Money> {
    let mut net: BTreeMap<(MemberId, MemberId), Money> = BTreeMap::new();
    for ((debtor, creditor), amount) in ledger {
        let (key, signed) = if debtor < creditor {
            ((debtor, creditor), amount)
        } else {
            ((creditor, debtor), -amount)
        };
        *net.entry(key).or_insert(Money::ZERO) += signed;
    }
    net
}

fn build_balances(
    members: BTreeSet<MemberId>,
    net: BTreeMap<(MemberId, MemberId), Money>,
) -> BTreeMap<MemberId, Balance> {
    let mut balances: BTreeMap<MemberId, Balance> = members
        .into_iter()
        .map(|id| (id.clone(), Balance::empty(id)))
        .collect();

    for ((low, high), amount) in net {
        if amount.is_zero() {
            continue;
        }
        let (debtor, creditor, owed) = if amount.is_positive() {
            (low, high, amount)
        } else {
            (high, low, -amount)
        };
        if let Some(balance) = balances.get_mut(&debtor) {
            balance.owes += owed;
            balance.owes_breakdown.push(Counterparty {
                member_id: creditor.clone(),
                amount: owed,
            });
        }
        if let Some(balance) = balances.get_mut(&creditor) {
            balance.is_owed += owed;
            balance.is_owed_breakdown.push(Counterparty {
                member_id: debtor,
                amount: owed,
            });
        }
    }

    for balance in balances.values_mut() {
        balance.net = balance.is_owed - balance.owes;
        balance.owes_breakdown.sort_by(|a, b| a.member_id.cmp(&b.member_id));
        balance.is_owed_breakdown.sort_by(|a, b| a.member_id.cmp(&b.member_id));
    }
    balances
}
