//! DRG cost calculation.
//!
//! `total = weight × base_rate + (nursing + room + chief) × stay + supplement`
//!
//! Per-category breakdown lines (`coefficient × base_rate`) are reported
//! alongside the total but never added to it.

use log::debug;
use thiserror::Error;

use crate::models::{BreakdownLine, EstimateInput, EstimateResult, TreatmentCode};

/// Stays shorter than this are billed as this many days.
pub const MIN_BILLABLE_STAY_DAYS: u32 = 3;

/// Calculation errors. Both are fixed by correcting the form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    #[error("no treatment code selected")]
    MissingSelection,

    #[error("base rate must be provided")]
    InvalidRate,
}

pub type CalcResult<T> = Result<T, EstimateError>;

/// Stay length used for day-based costs.
pub fn effective_stay_days(stay_days: u32) -> u32 {
    stay_days.max(MIN_BILLABLE_STAY_DAYS)
}

/// Compute an itemized estimate.
///
/// Pure: the same code and input always give the same result.
pub fn compute(selected: Option<&TreatmentCode>, input: &EstimateInput) -> CalcResult<EstimateResult> {
    let item = selected.ok_or(EstimateError::MissingSelection)?;
    let base_rate = input
        .base_rate
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .ok_or(EstimateError::InvalidRate)?;

    let weight = item.effective_weight();
    let stay = effective_stay_days(input.stay_days);
    let days = f64::from(stay);

    let drg_revenue = weight * base_rate;
    let nursing_cost = input.daily_nursing_rate * days;
    let room_cost = input.daily_room_rate * days;
    let chief_cost = input.daily_chief_rate * days;
    let supplement_cost = input.fixed_supplement;
    let total = drg_revenue + nursing_cost + room_cost + chief_cost + supplement_cost;

    let breakdown = item
        .breakdown
        .iter()
        .map(|(&category, &coefficient)| BreakdownLine {
            category,
            coefficient,
            amount: coefficient * base_rate,
        })
        .collect();

    debug!(
        "Estimate for {}: weight={} base_rate={} stay={} total={}",
        item.code, weight, base_rate, stay, total
    );

    Ok(EstimateResult {
        code: item.code.clone(),
        weight,
        base_rate,
        effective_stay_days: stay,
        drg_revenue,
        nursing_cost,
        room_cost,
        chief_cost,
        supplement_cost,
        total,
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BreakdownCategory;

    fn scenario_input(stay_days: u32) -> EstimateInput {
        EstimateInput {
            base_rate: Some(100.0),
            stay_days,
            daily_nursing_rate: 250.0,
            daily_room_rate: 250.0,
            daily_chief_rate: 1000.0,
            fixed_supplement: 700.0,
        }
    }

    #[test]
    fn test_short_stay_is_clamped() {
        let code = TreatmentCode::new("X01", 2.0);
        let result = compute(Some(&code), &scenario_input(1)).unwrap();

        assert_eq!(result.effective_stay_days, 3);
        assert_eq!(result.drg_revenue, 200.0);
        assert_eq!(result.nursing_cost, 750.0);
        assert_eq!(result.room_cost, 750.0);
        assert_eq!(result.chief_cost, 3000.0);
        assert_eq!(result.supplement_cost, 700.0);
        assert_eq!(result.total, 5400.0);
    }

    #[test]
    fn test_longer_stay() {
        let code = TreatmentCode::new("X01", 2.0);
        let result = compute(Some(&code), &scenario_input(5)).unwrap();

        assert_eq!(result.effective_stay_days, 5);
        assert_eq!(result.nursing_cost, 1250.0);
        assert_eq!(result.room_cost, 1250.0);
        assert_eq!(result.chief_cost, 5000.0);
        assert_eq!(result.total, 8400.0);
    }

    #[test]
    fn test_invalid_base_rate() {
        let code = TreatmentCode::new("X01", 2.0);
        for rate in [None, Some(0.0), Some(-5.0), Some(f64::NAN), Some(f64::INFINITY)] {
            let mut input = scenario_input(3);
            input.base_rate = rate;
            assert_eq!(compute(Some(&code), &input), Err(EstimateError::InvalidRate));
        }
    }

    #[test]
    fn test_missing_selection_checked_first() {
        let mut input = scenario_input(3);
        input.base_rate = None;
        assert_eq!(compute(None, &input), Err(EstimateError::MissingSelection));
    }

    #[test]
    fn test_breakdown_lines_not_in_total() {
        let code = TreatmentCode::new("X01", 2.0)
            .with_category(BreakdownCategory::Surgery, 0.8)
            .with_category(BreakdownCategory::Nursing, 0.4);
        let result = compute(Some(&code), &scenario_input(1)).unwrap();

        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].category, BreakdownCategory::Nursing);
        assert_eq!(result.breakdown[0].amount, 40.0);
        assert_eq!(result.breakdown[1].amount, 80.0);
        assert_eq!(result.total, 5400.0);
    }

    #[test]
    fn test_unusable_weight_defaults_to_one() {
        let code = TreatmentCode::new("X01", f64::NAN);
        let result = compute(Some(&code), &scenario_input(3)).unwrap();

        assert_eq!(result.weight, 1.0);
        assert_eq!(result.drg_revenue, 100.0);
    }
}
