use crate::core::models::{ActivityEntry, ActivityKind, Expense, Involvement, MemberId, Money, Payment};

/// Lists every given record from `member_id`'s point of view, newest first.
///
/// The returned entries are the whole input an export or report needs; they
/// are passed along explicitly rather than kept around.
pub fn member_activity(member_id: &MemberId, expenses: &[Expense], payments: &[Payment]) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = expenses
        .iter()
        .map(|expense| expense_entry(member_id, expense))
        .chain(payments.iter().map(|payment| payment_entry(member_id, payment)))
        .collect();

    entries.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.record_id.cmp(&b.record_id))
    });
    entries
}

fn expense_entry(member_id: &MemberId, expense: &Expense) -> ActivityEntry {
    let (involvement, impact) = if expense.payer == *member_id {
        (Involvement::YouPaid, expense.amount - expense.share_of(member_id))
    } else if expense.participants.contains(member_id) {
        (Involvement::TheyPaid, -expense.share_of(member_id))
    } else {
        (Involvement::NotInvolved, Money::ZERO)
    };

    ActivityEntry {
        record_id: expense.id.clone(),
        kind: ActivityKind::Expense,
        group_id: expense.group_id.clone(),
        amount: expense.amount,
        currency: expense.currency.clone(),
        payer: expense.payer.clone(),
        payee: None,
        memo: expense.memo.clone(),
        category: expense.category.clone(),
        timestamp: expense.timestamp,
        involvement,
        impact,
    }
}

fn payment_entry(member_id: &MemberId, payment: &Payment) -> ActivityEntry {
    let (involvement, impact) = if payment.payer == *member_id {
        (Involvement::YouPaid, payment.amount)
    } else if payment.payee == *member_id {
        (Involvement::YouWerePaid, -payment.amount)
    } else {
        (Involvement::NotInvolved, Money::ZERO)
    };

    ActivityEntry {
        record_id: payment.id.clone(),
        kind: ActivityKind::Payment,
        group_id: payment.group_id.clone(),
        amount: payment.amount,
        currency: payment.currency.clone(),
        payer: payment.payer.clone(),
        payee: Some(payment.payee.clone()),
        memo: payment.memo.clone(),
        category: None,
        timestamp: payment.timestamp,
        involvement,
        impact,
    }
}
