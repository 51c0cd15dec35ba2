//! Localized, currency-formatted rendering of an estimate.

use serde::{Deserialize, Serialize};

use super::strings::{category_label, cost_line_label, CostLine};
use crate::config::CurrencyFormat;
use crate::models::{EstimateResult, LabelTable, Locale, TextDirection};

/// One formatted line of output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderedLine {
    /// Stable machine key (`drg_revenue`, `surgery`, ...)
    pub key: String,
    pub label: String,
    pub amount: f64,
    /// Amount rounded for display, with currency symbol
    pub formatted: String,
}

/// An estimate ready to show to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderedEstimate {
    pub code: String,
    /// Localized label of the treatment code
    pub title: String,
    pub locale: Locale,
    pub direction: TextDirection,
    /// Effective stay used for the day-based lines
    pub stay_days: u32,
    /// DRG revenue, nursing, room, chief physician, supplement
    pub lines: Vec<RenderedLine>,
    /// Per-category detail; empty when the code has no breakdown
    pub breakdown: Vec<RenderedLine>,
    pub total: RenderedLine,
}

/// Render an estimate for display.
pub fn render(
    result: &EstimateResult,
    locale: Locale,
    labels: &LabelTable,
    currency: &CurrencyFormat,
) -> RenderedEstimate {
    let line = |cost: CostLine, amount: f64| RenderedLine {
        key: cost.key().to_string(),
        label: cost_line_label(cost, locale).to_string(),
        amount,
        formatted: currency.format(amount),
    };

    let lines = vec![
        line(CostLine::DrgRevenue, result.drg_revenue),
        line(CostLine::Nursing, result.nursing_cost),
        line(CostLine::Room, result.room_cost),
        line(CostLine::Chief, result.chief_cost),
        line(CostLine::Supplement, result.supplement_cost),
    ];

    let breakdown = result
        .breakdown
        .iter()
        .map(|item| RenderedLine {
            key: item.category.key().to_string(),
            label: category_label(item.category, locale).to_string(),
            amount: item.amount,
            formatted: currency.format(item.amount),
        })
        .collect();

    RenderedEstimate {
        code: result.code.clone(),
        title: labels.label(&result.code, locale.code()).to_string(),
        locale,
        direction: locale.direction(),
        stay_days: result.effective_stay_days,
        lines,
        breakdown,
        total: line(CostLine::Total, result.total),
    }
}

impl RenderedEstimate {
    /// Plain-text summary, one `label: amount` per line.
    pub fn to_text(&self) -> String {
        let mut text = format!("{} ({})\n", self.title, self.code);

        for line in &self.lines {
            text.push_str(&format!("{}: {}\n", line.label, line.formatted));
        }
        for line in &self.breakdown {
            text.push_str(&format!("  {}: {}\n", line.label, line.formatted));
        }
        text.push_str(&format!("{}: {}\n", self.total.label, self.total.formatted));

        text
    }
}

/// Exported estimate with timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateExport {
    /// Export timestamp
    pub generated_at: String,
    pub estimate: RenderedEstimate,
}

impl EstimateExport {
    pub fn new(estimate: RenderedEstimate) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            estimate,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("code,section,key,label,amount,formatted,generated_at\n");

        let estimate = &self.estimate;
        let sections = estimate
            .lines
            .iter()
            .map(|line| ("cost", line))
            .chain(estimate.breakdown.iter().map(|line| ("breakdown", line)))
            .chain(std::iter::once(("total", &estimate.total)));

        for (section, line) in sections {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&estimate.code),
                section,
                line.key,
                escape_csv(&line.label),
                line.amount,
                escape_csv(&line.formatted),
                self.generated_at,
            ));
        }

        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
