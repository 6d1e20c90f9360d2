pub mod engine;
pub mod equipment;
pub mod predicted_usage;
pub mod seasonal;
pub mod smart_schedule;
pub mod usage_trends;
pub mod weather_conditions;

pub use engine::{RecommendationEngine, MAX_RECOMMENDATIONS};

use crate::models::{
    PredictionResult, Recommendation, UsagePattern, UserPreferences, Weather, WateringSchedule,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Everything the advisors may look at for one generation call.
///
/// Each analysis source is optional; an advisor whose source is missing
/// contributes nothing.
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryContext<'a> {
    pub pattern: Option<&'a UsagePattern>,
    pub prediction: Option<&'a PredictionResult>,
    pub weather: Option<&'a Weather>,
    pub schedule: Option<&'a WateringSchedule>,
    /// Carried through for callers; no advisor reads it yet.
    pub preferences: Option<&'a UserPreferences>,
    pub now: NaiveDateTime,
}

impl<'a> AdvisoryContext<'a> {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            pattern: None,
            prediction: None,
            weather: None,
            schedule: None,
            preferences: None,
            now,
        }
    }

    pub fn with_pattern(mut self, pattern: &'a UsagePattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn with_prediction(mut self, prediction: &'a PredictionResult) -> Self {
        self.prediction = Some(prediction);
        self
    }

    pub fn with_weather(mut self, weather: &'a Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_schedule(mut self, schedule: &'a WateringSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn with_preferences(mut self, preferences: &'a UserPreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn days_ahead(&self, days: i64) -> NaiveDate {
        self.today() + Duration::days(days)
    }

    /// Recommendation id, unique within one generation call as long as each
    /// advisor uses distinct suffixes.
    pub fn rec_id(&self, suffix: &str) -> String {
        format!("rec_{}_{}", self.now.format("%Y%m%d%H%M%S"), suffix)
    }
}

/// A source of recommendations
pub trait Advisor: Send + Sync {
    /// Unique identifier for this advisor
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Inspect the context and return zero or more recommendations
    fn advise(&self, ctx: &AdvisoryContext) -> Vec<Recommendation>;
}
