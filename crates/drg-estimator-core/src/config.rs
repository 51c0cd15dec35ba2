//! Estimator configuration.

use serde::{Deserialize, Serialize};

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPlacement {
    Prefix,
    Suffix,
}

/// Currency display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub placement: SymbolPlacement,
    /// Decimal places shown; calculation itself never rounds
    pub decimals: usize,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "€".into(),
            placement: SymbolPlacement::Prefix,
            decimals: 2,
        }
    }
}

impl CurrencyFormat {
    /// Format an amount, e.g. `€5400.00` or `-€12.50`.
    pub fn format(&self, amount: f64) -> String {
        // Avoid printing "-0.00" for values that round to zero.
        let rounded = format!("{:.*}", self.decimals, amount.abs());
        let is_zero = rounded.chars().all(|c| c == '0' || c == '.');
        let sign = if amount.is_sign_negative() && !is_zero { "-" } else { "" };

        match self.placement {
            SymbolPlacement::Prefix => format!("{}{}{}", sign, self.symbol, rounded),
            SymbolPlacement::Suffix => format!("{}{} {}", sign, rounded, self.symbol),
        }
    }
}

/// Values the estimate form is pre-filled with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DefaultRates {
    pub stay_days: u32,
    pub daily_nursing_rate: f64,
    pub daily_room_rate: f64,
    pub daily_chief_rate: f64,
    pub fixed_supplement: f64,
}

impl Default for DefaultRates {
    fn default() -> Self {
        Self {
            stay_days: 3,
            daily_nursing_rate: 250.0,
            daily_room_rate: 250.0,
            daily_chief_rate: 1000.0,
            fixed_supplement: 700.0,
        }
    }
}

/// Top-level estimator settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EstimatorConfig {
    pub currency: CurrencyFormat,
    /// Locale used until the host sets one
    pub default_locale: String,
    /// Maximum number of search results returned
    pub search_limit: usize,
    pub default_rates: DefaultRates,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyFormat::default(),
            default_locale: "en".into(),
            search_limit: 50,
            default_rates: DefaultRates::default(),
        }
    }
}

impl EstimatorConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
