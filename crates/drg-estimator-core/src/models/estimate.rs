//! Estimate input and result models.

use serde::{Deserialize, Serialize};

use super::BreakdownCategory;

/// User-supplied parameters for a single calculation.
///
/// The selected code is passed to the calculator separately so that a
/// missing selection can be reported on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimateInput {
    /// Monetary value of one weight unit
    pub base_rate: Option<f64>,
    /// Requested length of stay; clamped to the billable minimum
    pub stay_days: u32,
    /// Nursing charge per day
    pub daily_nursing_rate: f64,
    /// Room charge per day
    pub daily_room_rate: f64,
    /// Chief physician charge per day
    pub daily_chief_rate: f64,
    /// Flat add-on
    pub fixed_supplement: f64,
}

impl Default for EstimateInput {
    fn default() -> Self {
        Self {
            base_rate: None,
            stay_days: 0,
            daily_nursing_rate: 0.0,
            daily_room_rate: 0.0,
            daily_chief_rate: 0.0,
            fixed_supplement: 0.0,
        }
    }
}

/// One per-category line of an estimate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakdownLine {
    pub category: BreakdownCategory,
    /// Coefficient from the catalog
    pub coefficient: f64,
    /// coefficient × base rate
    pub amount: f64,
}

/// Itemized cost estimate.
///
/// `breakdown` is informational: its amounts are not part of `total`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimateResult {
    /// Selected DRG code
    pub code: String,
    /// Weight actually applied (after defaulting)
    pub weight: f64,
    pub base_rate: f64,
    /// Stay length after the billable minimum is applied
    pub effective_stay_days: u32,
    /// weight × base rate
    pub drg_revenue: f64,
    pub nursing_cost: f64,
    pub room_cost: f64,
    pub chief_cost: f64,
    pub supplement_cost: f64,
    pub total: f64,
    pub breakdown: Vec<BreakdownLine>,
}

impl EstimateResult {
    /// Sum of the per-category lines.
    pub fn breakdown_total(&self) -> f64 {
        self.breakdown.iter().map(|line| line.amount).sum()
    }

    /// Sum of the day-based costs.
    pub fn daily_costs(&self) -> f64 {
        self.nursing_cost + self.room_cost + self.chief_cost
    }
}
