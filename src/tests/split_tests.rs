use super::{cents, dec, member, members};
use crate::core::errors::SplitError;
use crate::core::models::{MemberId, Money, SplitKind};
use crate::core::split::{SplitMethod, compute_split};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

fn inputs(pairs: &[(&str, &str)]) -> BTreeMap<MemberId, Decimal> {
    pairs.iter().map(|(id, value)| (member(id), dec(value))).collect()
}

fn numbered(count: usize) -> Vec<MemberId> {
    (0..count).map(|i| MemberId::new(format!("m{:02}", i))).collect()
}

#[test]
fn equal_split_gives_leftover_cent_to_lowest_id() {
    let split = compute_split(dec("10.00"), &SplitMethod::Equal, &members(&["A", "B", "C"])).unwrap();

    assert_eq!(split.shares[&member("A")], cents(334));
    assert_eq!(split.shares[&member("B")], cents(333));
    assert_eq!(split.shares[&member("C")], cents(333));
    assert_eq!(split.total(), cents(1000));
}

#[test]
fn equal_split_is_deterministic_regardless_of_input_order() {
    let first = compute_split(dec("10.00"), &SplitMethod::Equal, &members(&["A", "B", "C"])).unwrap();
    let again = compute_split(dec("10.00"), &SplitMethod::Equal, &members(&["A", "B", "C"])).unwrap();
    let shuffled = compute_split(dec("10.00"), &SplitMethod::Equal, &members(&["C", "A", "B"])).unwrap();

    assert_eq!(first, again);
    assert_eq!(first, shuffled);
}

#[test]
fn single_participant_takes_everything() {
    let split = compute_split(dec("7.31"), &SplitMethod::Equal, &members(&["solo"])).unwrap();
    assert_eq!(split.shares.len(), 1);
    assert_eq!(split.shares[&member("solo")], cents(731));
}

#[test]
fn percentage_split_must_total_one_hundred() {
    let participants = members(&["A", "B"]);

    let short = SplitMethod::Percentage(inputs(&[("A", "60"), ("B", "39")]));
    assert!(matches!(
        compute_split(dec("100"), &short, &participants),
        Err(SplitError::SplitMismatch { .. })
    ));

    let exact = SplitMethod::Percentage(inputs(&[("A", "60"), ("B", "40")]));
    let split = compute_split(dec("100"), &exact, &participants).unwrap();
    assert_eq!(split.shares[&member("A")], cents(6000));
    assert_eq!(split.shares[&member("B")], cents(4000));
}

#[test]
fn percentage_split_accepts_totals_within_a_hundredth() {
    let method = SplitMethod::Percentage(inputs(&[("A", "33.33"), ("B", "33.33"), ("C", "33.33")]));
    let split = compute_split(dec("1.00"), &method, &members(&["A", "B", "C"])).unwrap();

    assert_eq!(split.shares[&member("A")], cents(34));
    assert_eq!(split.shares[&member("B")], cents(33));
    assert_eq!(split.shares[&member("C")], cents(33));

    let too_far = SplitMethod::Percentage(inputs(&[("A", "33.33"), ("B", "33.33"), ("C", "33.32")]));
    assert!(compute_split(dec("1.00"), &too_far, &members(&["A", "B", "C"])).is_err());
}

#[test]
fn percentage_rounding_overshoot_takes_back_a_cent() {
    // 2.5 cents each rounds up to 3 + 3 = 6 > 5
    let method = SplitMethod::Percentage(inputs(&[("A", "50"), ("B", "50")]));
    let split = compute_split(dec("0.05"), &method, &members(&["A", "B"])).unwrap();

    assert_eq!(split.shares[&member("A")], cents(2));
    assert_eq!(split.shares[&member("B")], cents(3));
}

#[test]
fn percentage_leftover_skips_zero_percent_participants() {
    let method = SplitMethod::Percentage(inputs(&[("A", "0"), ("B", "33.33"), ("C", "66.66")]));
    let split = compute_split(dec("100.00"), &method, &members(&["A", "B", "C"])).unwrap();

    assert_eq!(split.shares[&member("A")], Money::ZERO);
    assert_eq!(split.total(), cents(10_000));
}

#[test]
fn exact_split_must_reconcile_to_amount() {
    let participants = members(&["A", "B"]);

    let over = SplitMethod::Exact(inputs(&[("A", "20"), ("B", "31")]));
    match compute_split(dec("50"), &over, &participants) {
        Err(SplitError::SplitMismatch { expected, actual }) => {
            assert_eq!(expected, dec("50"));
            assert_eq!(actual, dec("51"));
        }
        other => panic!("expected mismatch, got {:?}", other),
    }

    let exact = SplitMethod::Exact(inputs(&[("A", "20"), ("B", "30")]));
    let split = compute_split(dec("50"), &exact, &participants).unwrap();
    assert_eq!(split.shares[&member("A")], cents(2000));
    assert_eq!(split.shares[&member("B")], cents(3000));
}

#[test]
fn exact_split_absorbs_a_one_cent_residual() {
    let method = SplitMethod::Exact(inputs(&[("A", "20.00"), ("B", "29.99")]));
    let split = compute_split(dec("50.00"), &method, &members(&["A", "B"])).unwrap();

    assert_eq!(split.total(), cents(5000));
    assert_eq!(split.shares[&member("A")], cents(2001));
    assert_eq!(split.shares[&member("B")], cents(2999));
}

#[test]
fn participants_without_inputs_get_zero_shares() {
    let method = SplitMethod::Exact(inputs(&[("A", "50")]));
    let split = compute_split(dec("50"), &method, &members(&["A", "B"])).unwrap();

    assert_eq!(split.shares[&member("B")], Money::ZERO);
    assert_eq!(split.shares.len(), 2);
}

#[test]
fn invalid_participant_sets_are_rejected() {
    assert!(matches!(
        compute_split(dec("10"), &SplitMethod::Equal, &[]),
        Err(SplitError::InvalidParticipants(_))
    ));
    assert!(matches!(
        compute_split(dec("10"), &SplitMethod::Equal, &members(&["A", "A"])),
        Err(SplitError::InvalidParticipants(_))
    ));
    assert!(matches!(
        compute_split(dec("10"), &SplitMethod::Equal, &members(&["A", " "])),
        Err(SplitError::InvalidParticipants(_))
    ));

    let stranger = SplitMethod::Exact(inputs(&[("A", "5"), ("Z", "5")]));
    assert!(matches!(
        compute_split(dec("10"), &stranger, &members(&["A", "B"])),
        Err(SplitError::InvalidParticipants(_))
    ));

    let negative = SplitMethod::Percentage(inputs(&[("A", "110"), ("B", "-10")]));
    assert!(matches!(
        compute_split(dec("10"), &negative, &members(&["A", "B"])),
        Err(SplitError::InvalidParticipants(_))
    ));
}

#[test]
fn invalid_amounts_are_rejected() {
    let participants = members(&["A", "B"]);
    assert!(matches!(
        compute_split(dec("0"), &SplitMethod::Equal, &participants),
        Err(SplitError::InvalidAmount(_))
    ));
    assert!(matches!(
        compute_split(dec("-4"), &SplitMethod::Equal, &participants),
        Err(SplitError::InvalidAmount(_))
    ));
    assert!(matches!(
        compute_split(dec("1.001"), &SplitMethod::Equal, &participants),
        Err(SplitError::InvalidAmount(_))
    ));
}

#[test]
fn oversized_inputs_fail_without_panicking() {
    let participants = members(&["A", "B"]);
    let mut huge = BTreeMap::new();
    huge.insert(member("A"), Decimal::MAX);
    huge.insert(member("B"), Decimal::ONE);

    assert!(matches!(
        compute_split(dec("10"), &SplitMethod::Exact(huge.clone()), &participants),
        Err(SplitError::InvalidAmount(_))
    ));
    assert!(matches!(
        compute_split(dec("10"), &SplitMethod::Percentage(huge), &participants),
        Err(SplitError::InvalidAmount(_))
    ));

    let mut lopsided = BTreeMap::new();
    lopsided.insert(member("A"), Decimal::MAX);
    assert!(matches!(
        compute_split(dec("10"), &SplitMethod::Exact(lopsided), &participants),
        Err(SplitError::SplitMismatch { .. })
    ));
}

#[test]
fn string_tagged_methods_parse_into_variants() {
    let raw = inputs(&[("A", "100")]);

    assert_eq!(SplitMethod::from_parts("equal", Some(raw.clone())).unwrap(), SplitMethod::Equal);
    assert_eq!(
        SplitMethod::from_parts("Percentage", Some(raw.clone())).unwrap().kind(),
        SplitKind::Percentage
    );
    assert_eq!(SplitMethod::from_parts("exact", None).unwrap(), SplitMethod::Exact(BTreeMap::new()));
    assert!(matches!(
        SplitMethod::from_parts("shares", Some(raw)),
        Err(SplitError::InvalidMethod(_))
    ));
}

#[test]
fn split_method_json_shape() {
    let method: SplitMethod =
        serde_json::from_str(r#"{"method":"percentage","inputs":{"A":"60","B":"40"}}"#).unwrap();
    assert_eq!(method, SplitMethod::Percentage(inputs(&[("A", "60"), ("B", "40")])));

    let equal: SplitMethod = serde_json::from_str(r#"{"method":"equal"}"#).unwrap();
    assert_eq!(equal, SplitMethod::Equal);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn equal_shares_sum_to_amount(amount in 1i64..100_000_000i64, count in 1usize..=50) {
        let participants = numbered(count);
        let split = compute_split(Decimal::new(amount, 2), &SplitMethod::Equal, &participants).unwrap();

        prop_assert_eq!(split.total(), Money::from_minor(amount));
        prop_assert_eq!(split.shares.len(), count);
        let largest = split.shares.values().max().unwrap().minor_units();
        let smallest = split.shares.values().min().unwrap().minor_units();
        prop_assert!(largest - smallest <= 1);
    }

    #[test]
    fn percentage_shares_sum_to_amount(
        amount in 1i64..100_000_000i64,
        weights in prop::collection::vec(1u64..1_000u64, 1..=50)
    ) {
        let total_weight: u64 = weights.iter().sum();
        let mut hundredths: Vec<i64> = weights
            .iter()
            .map(|w| (w * 10_000 / total_weight) as i64)
            .collect();
        let assigned: i64 = hundredths.iter().sum();
        hundredths[0] += 10_000 - assigned;

        let participants = numbered(weights.len());
        let percentages: BTreeMap<MemberId, Decimal> = participants
            .iter()
            .cloned()
            .zip(hundredths.iter().map(|h| Decimal::new(*h, 2)))
            .collect();
        let split = compute_split(
            Decimal::new(amount, 2),
            &SplitMethod::Percentage(percentages),
            &participants,
        )
        .unwrap();

        prop_assert_eq!(split.total(), Money::from_minor(amount));
        prop_assert!(split.shares.values().all(|s| !s.is_negative()));
    }

    #[test]
    fn exact_shares_sum_to_amount(parts in prop::collection::vec(0i64..10_000_000i64, 1..=50)) {
        let amount: i64 = parts.iter().sum();
        prop_assume!(amount > 0);

        let participants = numbered(parts.len());
        let amounts: BTreeMap<MemberId, Decimal> = participants
            .iter()
            .cloned()
            .zip(parts.iter().map(|p| Decimal::new(*p, 2)))
            .collect();
        let split = compute_split(Decimal::new(amount, 2), &SplitMethod::Exact(amounts), &participants).unwrap();

        prop_assert_eq!(split.total(), Money::from_minor(amount));
        for (id, part) in participants.iter().zip(parts.iter()) {
            prop_assert_eq!(split.shares[id], Money::from_minor(*part));
        }
    }
}
