//! Split engine: turns a proposed expense into materialized per-participant
//! shares whose sum equals the expense amount to the cent.

use crate::core::errors::SplitError;
use crate::core::models::{MemberId, Money, SplitKind};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Tolerance for percentage totals (in percentage points) and exact totals
/// (in currency units).
pub fn split_epsilon() -> Decimal {
    Decimal::new(1, 2)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "inputs", rename_all = "lowercase")]
pub enum SplitMethod {
    Equal,
    Percentage(BTreeMap<MemberId, Decimal>),
    Exact(BTreeMap<MemberId, Decimal>),
}

impl SplitMethod {
    /// Builds a method from the string-tagged form used by HTTP payloads.
    /// Raw inputs are ignored for `equal`.
    pub fn from_parts(
        method: &str,
        raw_inputs: Option<BTreeMap<MemberId, Decimal>>,
    ) -> Result<Self, SplitError> {
        match method.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(SplitMethod::Equal),
            "percentage" => Ok(SplitMethod::Percentage(raw_inputs.unwrap_or_default())),
            "exact" => Ok(SplitMethod::Exact(raw_inputs.unwrap_or_default())),
            _ => Err(SplitError::InvalidMethod(method.to_string())),
        }
    }

    pub fn kind(&self) -> SplitKind {
        match self {
            SplitMethod::Equal => SplitKind::Equal,
            SplitMethod::Percentage(_) => SplitKind::Percentage,
            SplitMethod::Exact(_) => SplitKind::Exact,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Split {
    pub shares: BTreeMap<MemberId, Money>,
}

impl Split {
    pub fn total(&self) -> Money {
        self.shares.values().sum()
    }
}

pub fn compute_split(
    amount: Decimal,
    method: &SplitMethod,
    participants: &[MemberId],
) -> Result<Split, SplitError> {
    let members = participant_set(participants)?;
    if amount <= Decimal::ZERO {
        return Err(SplitError::InvalidAmount(format!("{} must be greater than 0", amount)));
    }
    let total = Money::from_decimal(amount)?;

    let shares = match method {
        SplitMethod::Equal => equal_shares(total, &members),
        SplitMethod::Percentage(percentages) => percentage_shares(total, percentages, &members)?,
        SplitMethod::Exact(amounts) => exact_shares(amount, total, amounts, &members)?,
    };

    debug!(
        "Computed {} split of {} across {} participants",
        method.kind(),
        total,
        shares.len()
    );
    Ok(Split { shares })
}

fn participant_set(participants: &[MemberId]) -> Result<BTreeSet<MemberId>, SplitError> {
    if participants.is_empty() {
        return Err(SplitError::InvalidParticipants("participant set is empty".to_string()));
    }
    let mut members = BTreeSet::new();
    for id in participants {
        if id.is_blank() {
            return Err(SplitError::InvalidParticipants("participant id is blank".to_string()));
        }
        if !members.insert(id.clone()) {
            return Err(SplitError::InvalidParticipants(format!("{} is listed more than once", id)));
        }
    }
    Ok(members)
}

fn validate_inputs(
    inputs: &BTreeMap<MemberId, Decimal>,
    members: &BTreeSet<MemberId>,
) -> Result<(), SplitError> {
    for (id, value) in inputs {
        if !members.contains(id) {
            return Err(SplitError::InvalidParticipants(format!("{} is not a participant", id)));
        }
        if *value < Decimal::ZERO {
            return Err(SplitError::InvalidParticipants(format!(
                "{} has a negative input {}",
                id, value
            )));
        }
    }
    Ok(())
}

fn checked_total(inputs: &BTreeMap<MemberId, Decimal>) -> Result<Decimal, SplitError> {
    inputs
        .values()
        .try_fold(Decimal::ZERO, |sum, value| sum.checked_add(*value))
        .ok_or_else(|| SplitError::InvalidAmount("split inputs are out of range".to_string()))
}

fn equal_shares(total: Money, members: &BTreeSet<MemberId>) -> BTreeMap<MemberId, Money> {
    let count = members.len() as i64;
    let base = total.minor_units() / count;
    let leftover = total.minor_units() % count;
    members
        .iter()
        .enumerate()
        .map(|(position, id)| {
            let extra = if (position as i64) < leftover { 1 } else { 0 };
            (id.clone(), Money::from_minor(base + extra))
        })
        .collect()
}

fn percentage_shares(
    total: Money,
    percentages: &BTreeMap<MemberId, Decimal>,
    members: &BTreeSet<MemberId>,
) -> Result<BTreeMap<MemberId, Money>, SplitError> {
    validate_inputs(percentages, members)?;
    let percent_sum = checked_total(percentages)?;
    if (percent_sum - Decimal::ONE_HUNDRED).abs() > split_epsilon() {
        return Err(SplitError::SplitMismatch {
            expected: Decimal::ONE_HUNDRED,
            actual: percent_sum,
        });
    }

    let mut shares = BTreeMap::new();
    let mut weighted = Vec::new();
    for id in members {
        let percentage = percentages.get(id).copied().unwrap_or(Decimal::ZERO);
        let raw = total.to_decimal() * percentage / Decimal::ONE_HUNDRED;
        shares.insert(id.clone(), Money::from_decimal_rounded(raw)?);
        if percentage > Decimal::ZERO {
            weighted.push(id.clone());
        }
    }
    distribute_leftover(total, shares, &weighted)
}

fn exact_shares(
    amount: Decimal,
    total: Money,
    amounts: &BTreeMap<MemberId, Decimal>,
    members: &BTreeSet<MemberId>,
) -> Result<BTreeMap<MemberId, Money>, SplitError> {
    validate_inputs(amounts, members)?;
    let supplied = checked_total(amounts)?;
    if (supplied - amount).abs() > split_epsilon() {
        return Err(SplitError::SplitMismatch {
            expected: amount,
            actual: supplied,
        });
    }

    let mut shares = BTreeMap::new();
    let mut weighted = Vec::new();
    for id in members {
        let value = amounts.get(id).copied().unwrap_or(Decimal::ZERO);
        shares.insert(id.clone(), Money::from_decimal_rounded(value)?);
        if value > Decimal::ZERO {
            weighted.push(id.clone());
        }
    }
    distribute_leftover(total, shares, &weighted)
}

/// Moves one cent at a time, in ascending member order and cycling, until
/// the shares sum to `total`. Cents are added only to `weighted` members
/// (everyone if none) and removed only from positive shares.
fn distribute_leftover(
    total: Money,
    mut shares: BTreeMap<MemberId, Money>,
    weighted: &[MemberId],
) -> Result<BTreeMap<MemberId, Money>, SplitError> {
    let cent = Money::from_minor(1);
    let mut leftover = total.minor_units() - shares.values().sum::<Money>().minor_units();

    let receivers: Vec<MemberId> = if weighted.is_empty() {
        shares.keys().cloned().collect()
    } else {
        weighted.to_vec()
    };
    while leftover > 0 {
        for id in &receivers {
            if leftover == 0 {
                break;
            }
            if let Some(share) = shares.get_mut(id) {
                *share += cent;
                leftover -= 1;
            }
        }
    }

    while leftover < 0 {
        let mut progressed = false;
        for share in shares.values_mut() {
            if leftover == 0 {
                break;
            }
            if share.is_positive() {
                *share -= cent;
                leftover += 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    let distributed: Money = shares.values().sum();
    if distributed != total {
        return Err(SplitError::SplitMismatch {
            expected: total.to_decimal(),
            actual: distributed.to_decimal(),
        });
    }
    Ok(shares)
}
