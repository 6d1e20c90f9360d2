use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of metered water usage, as supplied by the persistence layer.
///
/// `date` is kept as the caller's string so that a malformed date only
/// suppresses seasonal tagging instead of rejecting the whole history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub date: String,
    #[serde(default)]
    pub usage_liters: f64,
}

impl UsageRecord {
    pub fn new(date: impl Into<String>, usage_liters: f64) -> Self {
        Self {
            date: date.into(),
            usage_liters,
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
    Volatile,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
            Trend::Volatile => "volatile",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalPattern {
    SummerHigh,
    WinterLow,
    SpringModerate,
    FallModerate,
    #[default]
    None,
}

impl SeasonalPattern {
    pub fn from_month(month: u32) -> Self {
        match month {
            6..=8 => SeasonalPattern::SummerHigh,
            12 | 1 | 2 => SeasonalPattern::WinterLow,
            3..=5 => SeasonalPattern::SpringModerate,
            _ => SeasonalPattern::FallModerate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonalPattern::SummerHigh => "summer_high",
            SeasonalPattern::WinterLow => "winter_low",
            SeasonalPattern::SpringModerate => "spring_moderate",
            SeasonalPattern::FallModerate => "fall_moderate",
            SeasonalPattern::None => "none",
        }
    }
}

impl std::fmt::Display for SeasonalPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    HighUsageSpike,
    UnusuallyLowUsage,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::HighUsageSpike => "High usage spike",
            AnomalyKind::UnusuallyLowUsage => "Unusually low usage",
        }
    }
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    Moderate,
    High,
}

impl AnomalySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalySeverity::Moderate => "moderate",
            AnomalySeverity::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub date: String,
    pub usage: f64,
    /// Signed distance from the mean, in litres.
    pub deviation: f64,
    pub z_score: f64,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    pub severity: AnomalySeverity,
}

impl Anomaly {
    pub fn is_high(&self) -> bool {
        self.severity == AnomalySeverity::High
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsagePattern {
    pub trend: Trend,
    pub average_daily: f64,
    pub peak_usage: f64,
    pub peak_day: Option<String>,
    pub lowest_usage: f64,
    pub lowest_day: Option<String>,
    pub variance: f64,
    pub standard_deviation: f64,
    pub seasonal_pattern: SeasonalPattern,
    pub anomalies: Vec<Anomaly>,
    pub efficiency_score: f64,
}

impl UsagePattern {
    pub fn high_severity_anomalies(&self) -> impl Iterator<Item = &Anomaly> {
        self.anomalies.iter().filter(|a| a.is_high())
    }
}

impl Default for UsagePattern {
    /// Placeholder returned when there is too little history to analyse.
    fn default() -> Self {
        Self {
            trend: Trend::Stable,
            average_daily: 0.0,
            peak_usage: 0.0,
            peak_day: None,
            lowest_usage: 0.0,
            lowest_day: None,
            variance: 0.0,
            standard_deviation: 0.0,
            seasonal_pattern: SeasonalPattern::None,
            anomalies: Vec::new(),
            efficiency_score: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_record_parses_iso_date() {
        let record = UsageRecord::new("2024-06-15", 120.0);
        assert_eq!(
            record.parsed_date(),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
    }

    #[test]
    fn usage_record_rejects_malformed_date() {
        assert!(UsageRecord::new("15/06/2024", 1.0).parsed_date().is_none());
        assert!(UsageRecord::new("", 1.0).parsed_date().is_none());
    }

    #[test]
    fn usage_record_missing_liters_defaults_to_zero() {
        let record: UsageRecord = serde_json::from_str(r#"{"date": "2024-01-01"}"#).unwrap();
        assert_eq!(record.usage_liters, 0.0);
    }

    #[test]
    fn seasonal_pattern_from_month() {
        assert_eq!(SeasonalPattern::from_month(7), SeasonalPattern::SummerHigh);
        assert_eq!(SeasonalPattern::from_month(1), SeasonalPattern::WinterLow);
        assert_eq!(SeasonalPattern::from_month(3), SeasonalPattern::SpringModerate);
        assert_eq!(SeasonalPattern::from_month(10), SeasonalPattern::FallModerate);
    }

    #[test]
    fn anomaly_serializes_kind_as_type() {
        let anomaly = Anomaly {
            date: "2024-01-01".into(),
            usage: 500.0,
            deviation: 380.0,
            z_score: 3.2,
            kind: AnomalyKind::HighUsageSpike,
            severity: AnomalySeverity::High,
        };
        let json = serde_json::to_value(&anomaly).unwrap();
        assert_eq!(json["type"], "high_usage_spike");
        assert_eq!(json["severity"], "high");
    }

    #[test]
    fn default_pattern_is_benign() {
        let pattern = UsagePattern::default();
        assert_eq!(pattern.trend, Trend::Stable);
        assert_eq!(pattern.efficiency_score, 50.0);
        assert!(pattern.anomalies.is_empty());
        assert!(pattern.peak_day.is_none());
    }
}
