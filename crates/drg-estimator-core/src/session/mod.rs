//! Estimator state for an interactive front-end.
//!
//! The session only stages input; every calculation goes through the pure
//! [`compute`](crate::calculator::compute) with a fresh [`EstimateInput`].

mod form;

pub use form::*;

use std::sync::Arc;

use log::{error, warn};

use crate::calculator::{compute, CalcResult};
use crate::config::EstimatorConfig;
use crate::data::{DataResult, ReferenceData};
use crate::export::{render, RenderedEstimate};
use crate::models::{EstimateInput, EstimateResult, Locale, TreatmentCode};
use crate::search::CodeSearch;

/// Whether reference data is usable.
#[derive(Debug, Clone)]
pub enum EstimatorState {
    Ready(Arc<ReferenceData>),
    /// Load failed; the front-end shows a "data unavailable" notice
    Unavailable(String),
}

/// Loaded estimator; hands out sessions when data is available.
#[derive(Debug, Clone)]
pub struct Estimator {
    state: EstimatorState,
    config: EstimatorConfig,
}

impl Estimator {
    /// Wrap a load result. A failed load gives an unavailable estimator
    /// instead of an error.
    pub fn new(load: DataResult<ReferenceData>, config: EstimatorConfig) -> Self {
        let state = match load {
            Ok(data) => EstimatorState::Ready(Arc::new(data)),
            Err(e) => {
                error!("Reference data unavailable: {}", e);
                EstimatorState::Unavailable(e.to_string())
            }
        };
        Self { state, config }
    }

    pub fn state(&self) -> &EstimatorState {
        &self.state
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state, EstimatorState::Ready(_))
    }

    pub fn data(&self) -> Option<&ReferenceData> {
        match &self.state {
            EstimatorState::Ready(data) => Some(data.as_ref()),
            EstimatorState::Unavailable(_) => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            EstimatorState::Ready(_) => None,
            EstimatorState::Unavailable(reason) => Some(reason.as_str()),
        }
    }

    /// Start a session, or `None` if the data is unavailable.
    pub fn session(&self) -> Option<EstimatorSession> {
        match &self.state {
            EstimatorState::Ready(data) => Some(EstimatorSession::new(
                Arc::clone(data),
                self.config.clone(),
            )),
            EstimatorState::Unavailable(_) => None,
        }
    }
}

/// One user's form plus the last computed estimate.
#[derive(Debug, Clone)]
pub struct EstimatorSession {
    data: Arc<ReferenceData>,
    config: EstimatorConfig,
    locale: Locale,
    form: EstimateForm,
    last: Option<EstimateResult>,
}

impl EstimatorSession {
    pub fn new(data: Arc<ReferenceData>, config: EstimatorConfig) -> Self {
        let locale = Locale::parse_or_default(&config.default_locale);
        let form = EstimateForm::with_defaults(&config.default_rates);
        Self {
            data,
            config,
            locale,
            form,
            last: None,
        }
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn form(&self) -> &EstimateForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EstimateForm {
        &mut self.form
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.form.query = query.into();
    }

    /// Codes matching the current query in the session locale.
    pub fn matches(&self) -> Vec<&TreatmentCode> {
        CodeSearch::new(&self.data)
            .with_limit(self.config.search_limit)
            .search(&self.form.query, self.locale.code())
    }

    /// Select a code. Unknown codes leave the selection unchanged.
    pub fn select(&mut self, code: &str) -> bool {
        if self.data.get(code).is_none() {
            warn!("Ignoring selection of unknown code {}", code);
            return false;
        }
        self.form.selected_code = Some(code.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.form.selected_code = None;
    }

    pub fn selected(&self) -> Option<&TreatmentCode> {
        self.form
            .selected_code
            .as_deref()
            .and_then(|code| self.data.get(code))
    }

    pub fn set_base_rate(&mut self, text: impl Into<String>) {
        self.form.base_rate = text.into();
    }

    pub fn set_stay_days(&mut self, text: impl Into<String>) {
        self.form.stay_days = text.into();
    }

    pub fn set_daily_nursing_rate(&mut self, text: impl Into<String>) {
        self.form.daily_nursing_rate = text.into();
    }

    pub fn set_daily_room_rate(&mut self, text: impl Into<String>) {
        self.form.daily_room_rate = text.into();
    }

    pub fn set_daily_chief_rate(&mut self, text: impl Into<String>) {
        self.form.daily_chief_rate = text.into();
    }

    pub fn set_fixed_supplement(&mut self, text: impl Into<String>) {
        self.form.fixed_supplement = text.into();
    }

    /// Current form as a calculator input, read in the session locale.
    pub fn input(&self) -> EstimateInput {
        self.form.to_input(self.locale)
    }

    /// Compute from the current form, replacing the last estimate.
    ///
    /// A failed calculation clears the last estimate.
    pub fn calculate(&mut self) -> CalcResult<&EstimateResult> {
        let input = self.form.to_input(self.locale);
        match compute(self.selected(), &input) {
            Ok(result) => Ok(self.last.insert(result)),
            Err(e) => {
                self.last = None;
                Err(e)
            }
        }
    }

    pub fn last_result(&self) -> Option<&EstimateResult> {
        self.last.as_ref()
    }

    /// Render the last estimate in the session locale.
    pub fn render_last(&self) -> Option<RenderedEstimate> {
        self.last.as_ref().map(|result| {
            render(
                result,
                self.locale,
                self.data.labels(),
                &self.config.currency,
            )
        })
    }
}
