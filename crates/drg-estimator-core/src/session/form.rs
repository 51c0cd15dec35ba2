//! Raw form fields and their conversion to an [`EstimateInput`].

use serde::{Deserialize, Serialize};

use crate::config::DefaultRates;
use crate::models::{EstimateInput, Locale};

/// Form state exactly as the user typed it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimateForm {
    /// Search box text
    pub query: String,
    /// Code picked from the search results
    pub selected_code: Option<String>,
    pub base_rate: String,
    pub stay_days: String,
    pub daily_nursing_rate: String,
    pub daily_room_rate: String,
    pub daily_chief_rate: String,
    pub fixed_supplement: String,
}

impl Default for EstimateForm {
    fn default() -> Self {
        Self::with_defaults(&DefaultRates::default())
    }
}

impl EstimateForm {
    /// Empty form with the rate fields pre-filled. Base rate starts blank.
    pub fn with_defaults(rates: &DefaultRates) -> Self {
        Self {
            query: String::new(),
            selected_code: None,
            base_rate: String::new(),
            stay_days: rates.stay_days.to_string(),
            daily_nursing_rate: rates.daily_nursing_rate.to_string(),
            daily_room_rate: rates.daily_room_rate.to_string(),
            daily_chief_rate: rates.daily_chief_rate.to_string(),
            fixed_supplement: rates.fixed_supplement.to_string(),
        }
    }

    /// Coerce the text fields to numbers, reading separators the way
    /// `locale` writes them.
    ///
    /// A blank or unreadable base rate stays `None` so the calculator can
    /// report it. Other unreadable fields count as zero; the stay is
    /// floored to whole days.
    pub fn to_input(&self, locale: Locale) -> EstimateInput {
        let amount = |text: &str| parse_amount(text, locale);
        EstimateInput {
            base_rate: amount(&self.base_rate),
            stay_days: parse_days(&self.stay_days, locale),
            daily_nursing_rate: amount(&self.daily_nursing_rate).unwrap_or(0.0),
            daily_room_rate: amount(&self.daily_room_rate).unwrap_or(0.0),
            daily_chief_rate: amount(&self.daily_chief_rate).unwrap_or(0.0),
            fixed_supplement: amount(&self.fixed_supplement).unwrap_or(0.0),
        }
    }
}

/// Decimal separator used by the locale. The other of `,` and `.` groups
/// thousands.
pub fn decimal_separator(locale: Locale) -> char {
    match locale {
        Locale::Ru | Locale::Pl => ',',
        Locale::En | Locale::Ar => '.',
    }
}

/// Parse a user-entered amount.
///
/// Whitespace (including no-break spaces) is ignored. With both `,` and `.`
/// present, the last one is the decimal separator. A separator repeated on
/// its own groups thousands. A single separator is decimal unless it is the
/// locale's grouping separator in a `1,250`-shaped number. Grouping must
/// come in threes; anything else is rejected rather than guessed at.
pub fn parse_amount(text: &str, locale: Locale) -> Option<f64> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let commas = compact.matches(',').count();
    let dots = compact.matches('.').count();
    let decimal = match (commas, dots) {
        (0, 0) => None,
        (1, 0) | (0, 1) => {
            let sep = if commas == 1 { ',' } else { '.' };
            if sep != decimal_separator(locale) && looks_grouped(&compact, sep) {
                None
            } else {
                Some(sep)
            }
        }
        (_, 0) | (0, _) => None,
        _ => compact.chars().rev().find(|c| matches!(c, ',' | '.')),
    };

    let (whole, fraction) = match decimal {
        Some(sep) => {
            let (whole, fraction) = compact.rsplit_once(sep)?;
            if whole.contains(sep) {
                return None;
            }
            (whole, Some(fraction))
        }
        None => (compact.as_str(), None),
    };

    let mut number = match whole.chars().find(|c| matches!(c, ',' | '.')) {
        Some(group) => strip_grouping(whole, group)?,
        None => whole.to_string(),
    };
    if let Some(fraction) = fraction {
        number.push('.');
        number.push_str(fraction);
    }

    number.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// `1,250` or `-12.500`: one to three leading digits, then exactly three.
fn looks_grouped(text: &str, sep: char) -> bool {
    match text.split_once(sep) {
        Some((head, tail)) => {
            let head = head.trim_start_matches(['-', '+']);
            (1..=3).contains(&head.len())
                && tail.len() == 3
                && head.bytes().chain(tail.bytes()).all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn strip_grouping(whole: &str, group: char) -> Option<String> {
    let mut groups = whole.split(group);
    let first = groups.next()?;
    let lead = first.trim_start_matches(['-', '+']);
    if lead.is_empty() || lead.len() > 3 {
        return None;
    }

    let mut digits = first.to_string();
    for chunk in groups {
        if chunk.len() != 3 || !chunk.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(chunk);
    }
    Some(digits)
}

/// Parse a stay length in whole days; anything unreadable or negative is 0.
pub fn parse_days(text: &str, locale: Locale) -> u32 {
    match parse_amount(text, locale) {
        // Float-to-int `as` saturates at u32::MAX.
        Some(days) if days > 0.0 => days.floor() as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        for locale in [Locale::En, Locale::Ru, Locale::Pl, Locale::Ar] {
            assert_eq!(parse_amount("100", locale), Some(100.0));
            assert_eq!(parse_amount(" 2.5 ", locale), Some(2.5));
            assert_eq!(parse_amount("1,5", locale), Some(1.5));
            assert_eq!(parse_amount("1,250.75", locale), Some(1250.75));
            assert_eq!(parse_amount("1.250,75", locale), Some(1250.75));
            assert_eq!(parse_amount("1,250,000", locale), Some(1_250_000.0));
            assert_eq!(parse_amount("12 500", locale), Some(12500.0));
            assert_eq!(parse_amount("12\u{a0}500,50", locale), Some(12500.5));
            assert_eq!(parse_amount("", locale), None);
            assert_eq!(parse_amount("abc", locale), None);
            assert_eq!(parse_amount("inf", locale), None);
        }
    }

    #[test]
    fn test_single_separator_follows_locale() {
        assert_eq!(parse_amount("1,250", Locale::En), Some(1250.0));
        assert_eq!(parse_amount("-1,250", Locale::Ar), Some(-1250.0));
        assert_eq!(parse_amount("1,250", Locale::Ru), Some(1.25));
        assert_eq!(parse_amount("1.250", Locale::Pl), Some(1250.0));
        assert_eq!(parse_amount("1.250", Locale::En), Some(1.25));
        // Not grouping-shaped, so the separator can only be decimal.
        assert_eq!(parse_amount("1000.125", Locale::Ru), Some(1000.125));
        assert_eq!(parse_amount("1,2345", Locale::En), Some(1.2345));
    }

    #[test]
    fn test_malformed_grouping_is_rejected() {
        assert_eq!(parse_amount("1,25,000", Locale::En), None);
        assert_eq!(parse_amount("1,250,", Locale::En), None);
        assert_eq!(parse_amount("1.2.3,4", Locale::Ru), None);
        assert_eq!(parse_amount("1,2.3,4", Locale::En), None);
    }

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("5", Locale::En), 5);
        assert_eq!(parse_days("4.9", Locale::En), 4);
        assert_eq!(parse_days("4,9", Locale::Pl), 4);
        assert_eq!(parse_days("-2", Locale::En), 0);
        assert_eq!(parse_days("two", Locale::En), 0);
        assert_eq!(parse_days("", Locale::En), 0);
    }

    #[test]
    fn test_grouped_rates_reach_the_input() {
        let form = EstimateForm {
            base_rate: "1,250".into(),
            daily_chief_rate: "1,250,000".into(),
            ..EstimateForm::default()
        };

        let english = form.to_input(Locale::En);
        assert_eq!(english.base_rate, Some(1250.0));
        assert_eq!(english.daily_chief_rate, 1_250_000.0);

        let russian = form.to_input(Locale::Ru);
        assert_eq!(russian.base_rate, Some(1.25));
        assert_eq!(russian.daily_chief_rate, 1_250_000.0);
    }

    #[test]
    fn test_default_form() {
        let form = EstimateForm::default();
        let input = form.to_input(Locale::En);

        assert_eq!(input.base_rate, None);
        assert_eq!(input.stay_days, 3);
        assert_eq!(input.daily_nursing_rate, 250.0);
        assert_eq!(input.daily_room_rate, 250.0);
        assert_eq!(input.daily_chief_rate, 1000.0);
        assert_eq!(input.fixed_supplement, 700.0);
    }

    #[test]
    fn test_blank_rates_are_zero() {
        let form = EstimateForm {
            base_rate: "100".into(),
            daily_nursing_rate: String::new(),
            daily_room_rate: "n/a".into(),
            ..EstimateForm::default()
        };
        let input = form.to_input(Locale::En);

        assert_eq!(input.base_rate, Some(100.0));
        assert_eq!(input.daily_nursing_rate, 0.0);
        assert_eq!(input.daily_room_rate, 0.0);
    }
}
