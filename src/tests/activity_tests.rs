use super::{at, cents, expense, member, payment};
use crate::core::activity::member_activity;
use crate::core::balances::compute_balances;
use crate::core::models::{ActivityKind, Involvement, Money, Scope};

#[test]
fn entries_are_listed_newest_first() {
    let mut lunch = expense("e1", "g1", "A", &[("A", 600), ("B", 600)]);
    lunch.timestamp = at(5);
    let mut taxi = expense("e2", "g1", "B", &[("A", 900), ("B", 900)]);
    taxi.timestamp = at(20);
    let mut repay = payment("p1", "g1", "A", "B", 300);
    repay.timestamp = at(10);

    let entries = member_activity(&member("A"), &[lunch, taxi], &[repay]);
    let order: Vec<&str> = entries.iter().map(|e| e.record_id.as_str()).collect();
    assert_eq!(order, vec!["e2", "p1", "e1"]);
    assert_eq!(entries[1].kind, ActivityKind::Payment);
    assert_eq!(entries[1].payee, Some(member("B")));
}

#[test]
fn simultaneous_records_are_ordered_by_id() {
    let entries = member_activity(
        &member("A"),
        &[expense("e2", "g1", "A", &[("B", 100)]), expense("e1", "g1", "A", &[("B", 100)])],
        &[],
    );
    let order: Vec<&str> = entries.iter().map(|e| e.record_id.as_str()).collect();
    assert_eq!(order, vec!["e1", "e2"]);
}

#[test]
fn involvement_and_impact_follow_the_viewer() {
    let dinner = expense("e1", "g1", "A", &[("A", 1000), ("B", 1000), ("C", 1000)]);
    let settle = payment("p1", "g1", "B", "A", 1000);
    let expenses = vec![dinner];
    let payments = vec![settle];

    let payer_view = member_activity(&member("A"), &expenses, &payments);
    let expense_entry = payer_view.iter().find(|e| e.kind == ActivityKind::Expense).unwrap();
    let payment_entry = payer_view.iter().find(|e| e.kind == ActivityKind::Payment).unwrap();
    assert_eq!(expense_entry.involvement, Involvement::YouPaid);
    assert_eq!(expense_entry.impact, cents(2000));
    assert_eq!(payment_entry.involvement, Involvement::YouWerePaid);
    assert_eq!(payment_entry.impact, cents(-1000));

    let participant_view = member_activity(&member("C"), &expenses, &payments);
    let expense_entry = participant_view.iter().find(|e| e.kind == ActivityKind::Expense).unwrap();
    let payment_entry = participant_view.iter().find(|e| e.kind == ActivityKind::Payment).unwrap();
    assert_eq!(expense_entry.involvement, Involvement::TheyPaid);
    assert_eq!(expense_entry.impact, cents(-1000));
    assert_eq!(payment_entry.involvement, Involvement::NotInvolved);
    assert_eq!(payment_entry.impact, Money::ZERO);
}

#[test]
fn impacts_add_up_to_the_net_balance() {
    let expenses = vec![
        expense("e1", "g1", "A", &[("A", 1000), ("B", 1000), ("C", 1000)]),
        expense("e2", "g1", "C", &[("A", 450), ("C", 450)]),
        expense("e3", "g1", "B", &[("C", 700)]),
    ];
    let payments = vec![payment("p1", "g1", "B", "A", 600), payment("p2", "g1", "A", "C", 50)];
    let report = compute_balances(&expenses, &payments, &Scope::All);

    for id in ["A", "B", "C"] {
        let impact: Money = member_activity(&member(id), &expenses, &payments)
            .iter()
            .map(|e| e.impact)
            .sum();
        assert_eq!(impact, report.balance_of(&member(id)).unwrap().net, "member {}", id);
    }
}
