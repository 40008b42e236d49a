use crate::core::models::{Balance, MemberId, Money, Transfer};
use log::debug;
use std::collections::BTreeMap;

/// Suggests payments that bring every member's net balance to zero.
///
/// Largest debtor is matched with largest creditor until both sides are
/// exhausted; equal amounts are ordered by member id.
pub fn suggest_settlements(balances: &BTreeMap<MemberId, Balance>) -> Vec<Transfer> {
    let mut creditors: Vec<(MemberId, Money)> = balances
        .values()
        .filter(|b| b.net.is_positive())
        .map(|b| (b.member_id.clone(), b.net))
        .collect();
    let mut debtors: Vec<(MemberId, Money)> = balances
        .values()
        .filter(|b| b.net.is_negative())
        .map(|b| (b.member_id.clone(), -b.net))
        .collect();

    creditors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    debtors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut transfers = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < debtors.len() && j < creditors.len() {
        let amount = debtors[i].1.min(creditors[j].1);
        transfers.push(Transfer {
            from: debtors[i].0.clone(),
            to: creditors[j].0.clone(),
            amount,
        });
        debtors[i].1 -= amount;
        creditors[j].1 -= amount;
        if debtors[i].1.is_zero() {
            i += 1;
        }
        if creditors[j].1.is_zero() {
            j += 1;
        }
    }

    debug!("Suggested {} settlement transfers", transfers.len());
    transfers
}
