//! Localized display text for treatment codes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Locale every label lookup falls back to.
pub const FALLBACK_LOCALE: &str = "en";

/// Locales the site is published in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ru,
    Pl,
    Ar,
}

/// Text direction for rendered output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Locale {
    /// Parse a locale tag such as `"ru"`, `"ru-RU"` or `"PL_pl"`.
    pub fn parse(tag: &str) -> Option<Self> {
        match normalize_locale(tag).as_str() {
            "en" => Some(Self::En),
            "ru" => Some(Self::Ru),
            "pl" => Some(Self::Pl),
            "ar" => Some(Self::Ar),
            _ => None,
        }
    }

    /// Parse a tag, falling back to English for unsupported locales.
    pub fn parse_or_default(tag: &str) -> Self {
        Self::parse(tag).unwrap_or(Self::En)
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Pl => "pl",
            Self::Ar => "ar",
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Self::Ar => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }
}

/// Normalize a locale tag to its lowercase primary language subtag.
pub fn normalize_locale(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Serialized shape of a [`LabelTable`]: `{code: {locale: text}}`.
type RawLabels = HashMap<String, HashMap<String, String>>;

/// Two-level table: code → locale → label.
///
/// Locale keys are normalized on insert, so lookups with `"ru-RU"` hit
/// labels stored under `"ru"`. Deserialization goes through the same path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawLabels", into = "RawLabels")]
pub struct LabelTable {
    entries: RawLabels,
}

impl From<RawLabels> for LabelTable {
    fn from(raw: RawLabels) -> Self {
        let mut labels = Self::new();
        for (code, texts) in raw {
            for (locale, text) in texts {
                labels.insert(code.clone(), &locale, text);
            }
        }
        labels
    }
}

impl From<LabelTable> for RawLabels {
    fn from(labels: LabelTable) -> Self {
        labels.entries
    }
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label. Blank text is ignored.
    pub fn insert(&mut self, code: impl Into<String>, locale: &str, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            return;
        }
        self.entries
            .entry(code.into())
            .or_default()
            .insert(normalize_locale(locale), text);
    }

    /// Label in exactly this locale, without fallback.
    pub fn get(&self, code: &str, locale: &str) -> Option<&str> {
        self.entries
            .get(code)?
            .get(&normalize_locale(locale))
            .map(String::as_str)
    }

    /// Label for the locale, falling back to English.
    pub fn lookup(&self, code: &str, locale: &str) -> Option<&str> {
        self.get(code, locale)
            .or_else(|| self.get(code, FALLBACK_LOCALE))
    }

    /// Display label: locale, then English, then the code itself.
    pub fn label<'a>(&'a self, code: &'a str, locale: &str) -> &'a str {
        self.lookup(code, locale).unwrap_or(code)
    }

    pub fn has_english(&self, code: &str) -> bool {
        self.get(code, FALLBACK_LOCALE).is_some()
    }

    /// Codes that have at least one label.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
