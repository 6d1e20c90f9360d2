use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    WateringSchedule,
    ConservationTip,
    EfficiencyImprovement,
    AnomalyAlert,
    PredictiveWarning,
    SeasonalAdvice,
    EquipmentSuggestion,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::WateringSchedule => "watering_schedule",
            RecommendationType::ConservationTip => "conservation_tip",
            RecommendationType::EfficiencyImprovement => "efficiency_improvement",
            RecommendationType::AnomalyAlert => "anomaly_alert",
            RecommendationType::PredictiveWarning => "predictive_warning",
            RecommendationType::SeasonalAdvice => "seasonal_advice",
            RecommendationType::EquipmentSuggestion => "equipment_suggestion",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendationType::WateringSchedule => "Watering Schedule",
            RecommendationType::ConservationTip => "Conservation Tip",
            RecommendationType::EfficiencyImprovement => "Efficiency Improvement",
            RecommendationType::AnomalyAlert => "Anomaly Alert",
            RecommendationType::PredictiveWarning => "Predictive Warning",
            RecommendationType::SeasonalAdvice => "Seasonal Advice",
            RecommendationType::EquipmentSuggestion => "Equipment Suggestion",
        }
    }
}

impl std::fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ordered from least to most urgent, so `Ord` ranks `Critical` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    /// Sort key used when ranking recommendations; higher is more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Critical => 4,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub action_items: Vec<String>,
    pub estimated_savings_liters: f64,
    pub estimated_savings_percent: f64,
    pub reasoning: String,
    pub confidence: f64,
    pub valid_until: Option<NaiveDate>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Recommendation {
    pub fn new(
        id: impl Into<String>,
        kind: RecommendationType,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            priority,
            title: title.into(),
            description: description.into(),
            action_items: Vec::new(),
            estimated_savings_liters: 0.0,
            estimated_savings_percent: 0.0,
            reasoning: String::new(),
            confidence: 0.5,
            valid_until: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.action_items.extend(actions.into_iter().map(Into::into));
        self
    }

    pub fn with_savings(mut self, liters: f64, percent: f64) -> Self {
        self.estimated_savings_liters = liters;
        self.estimated_savings_percent = percent;
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn valid_until(mut self, date: NaiveDate) -> Self {
        self.valid_until = Some(date);
        self
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn first_action(&self) -> Option<&str> {
        self.action_items.first().map(String::as_str)
    }
}

/// Free-form user preferences passed alongside an advisory request.
pub type UserPreferences = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityBreakdown {
    pub fn count(&mut self, priority: Priority) {
        match priority {
            Priority::Critical => self.critical += 1,
            Priority::High => self.high += 1,
            Priority::Medium => self.medium += 1,
            Priority::Low => self.low += 1,
        }
    }
}

/// Digest of a generated recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSummary {
    pub total_recommendations: usize,
    pub estimated_monthly_savings: f64,
    pub priority_breakdown: PriorityBreakdown,
    pub by_type: BTreeMap<RecommendationType, usize>,
    pub top_actions: Vec<String>,
    pub generated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ordering() {
        assert!(Priority::Critical > Priority::High);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
        assert_eq!(Priority::Critical.rank(), 4);
        assert_eq!(Priority::Low.rank(), 1);
    }

    #[test]
    fn recommendation_builder_pattern() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let rec = Recommendation::new(
            "rec_1",
            RecommendationType::ConservationTip,
            Priority::Low,
            "Mulch beds",
            "Mulch keeps moisture in",
        )
        .with_actions(["Spread 5cm of mulch", "Top up in spring"])
        .with_savings(300.0, 10.0)
        .with_reasoning("Mulch reduces evaporation")
        .with_confidence(1.4)
        .valid_until(date)
        .with_metadata("season", "spring");

        assert_eq!(rec.action_items.len(), 2);
        assert_eq!(rec.first_action(), Some("Spread 5cm of mulch"));
        assert_eq!(rec.estimated_savings_liters, 300.0);
        assert_eq!(rec.confidence, 1.0);
        assert_eq!(rec.valid_until, Some(date));
        assert_eq!(rec.metadata["season"], "spring");
    }

    #[test]
    fn recommendation_serializes_kind_as_type() {
        let rec = Recommendation::new(
            "r",
            RecommendationType::AnomalyAlert,
            Priority::Critical,
            "t",
            "d",
        );
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["type"], "anomaly_alert");
        assert_eq!(json["priority"], "critical");
    }

    #[test]
    fn priority_breakdown_counts() {
        let mut breakdown = PriorityBreakdown::default();
        breakdown.count(Priority::High);
        breakdown.count(Priority::High);
        breakdown.count(Priority::Low);
        assert_eq!(breakdown.high, 2);
        assert_eq!(breakdown.low, 1);
        assert_eq!(breakdown.critical, 0);
    }
}
