use super::calculations::{
    argmax, argmin, coefficient_of_variation, linear_slope, mean, round_to, std_dev, variance,
    z_score,
};
use crate::models::{
    Anomaly, AnomalyKind, AnomalySeverity, Outcome, SeasonalPattern, Trend, UsagePattern,
    UsageRecord,
};
use chrono::Datelike;

/// Minimum number of days needed before a pattern is computed.
pub const MIN_PATTERN_RECORDS: usize = 7;

const VOLATILE_CV: f64 = 0.3;
const STEADY_CV: f64 = 0.1;
const TREND_SLOPE_LPD: f64 = 5.0;
const ANOMALY_Z: f64 = 2.0;
const HIGH_SEVERITY_Z: f64 = 3.0;

/// Reduces a daily usage history to trend, spread, seasonality, anomalies and
/// an efficiency score.
///
/// Records are analysed in the order given. By convention the history is
/// newest-first, so the first record's month drives the seasonal tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternAnalyzer;

impl PatternAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, records: &[UsageRecord]) -> Outcome<UsagePattern> {
        if records.len() < MIN_PATTERN_RECORDS {
            tracing::debug!(
                records = records.len(),
                required = MIN_PATTERN_RECORDS,
                "Insufficient history for pattern analysis"
            );
            return Outcome::Default(UsagePattern::default());
        }

        let values: Vec<f64> = records.iter().map(|r| r.usage_liters).collect();

        let avg = mean(&values);
        let var = variance(&values);
        let sd = std_dev(&values);
        let cv = coefficient_of_variation(&values);

        // Non-empty, so both indices exist
        let peak_idx = argmax(&values).unwrap_or(0);
        let lowest_idx = argmin(&values).unwrap_or(0);

        let trend = classify_trend(&values, cv);
        let seasonal_pattern = seasonal_pattern(records);
        let anomalies = detect_anomalies(records, avg, sd);
        let efficiency_score = efficiency_score(avg, cv, trend, &anomalies);

        tracing::debug!(
            avg,
            sd,
            cv,
            ?trend,
            anomalies = anomalies.len(),
            efficiency_score,
            "Usage pattern computed"
        );

        Outcome::Computed(UsagePattern {
            trend,
            average_daily: round_to(avg, 2),
            peak_usage: round_to(values[peak_idx], 2),
            peak_day: Some(records[peak_idx].date.clone()),
            lowest_usage: round_to(values[lowest_idx], 2),
            lowest_day: Some(records[lowest_idx].date.clone()),
            variance: round_to(var, 2),
            standard_deviation: round_to(sd, 2),
            seasonal_pattern,
            anomalies,
            efficiency_score: round_to(efficiency_score, 1),
        })
    }
}

/// Volatility wins over direction: a noisy series is `Volatile` whatever its slope.
fn classify_trend(values: &[f64], cv: f64) -> Trend {
    if values.len() < 2 {
        return Trend::Stable;
    }

    let slope = linear_slope(values);
    tracing::trace!(slope, cv, "Trend fit");

    if cv > VOLATILE_CV {
        Trend::Volatile
    } else if slope > TREND_SLOPE_LPD {
        Trend::Increasing
    } else if slope < -TREND_SLOPE_LPD {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

fn seasonal_pattern(records: &[UsageRecord]) -> SeasonalPattern {
    records
        .first()
        .and_then(UsageRecord::parsed_date)
        .map(|date| SeasonalPattern::from_month(date.month()))
        .unwrap_or(SeasonalPattern::None)
}

fn detect_anomalies(records: &[UsageRecord], avg: f64, sd: f64) -> Vec<Anomaly> {
    records
        .iter()
        .filter_map(|record| {
            let usage = record.usage_liters;
            let z = z_score(usage, avg, sd);
            if z <= ANOMALY_Z {
                return None;
            }

            let kind = if usage > avg {
                AnomalyKind::HighUsageSpike
            } else {
                AnomalyKind::UnusuallyLowUsage
            };
            let severity = if z > HIGH_SEVERITY_Z {
                AnomalySeverity::High
            } else {
                AnomalySeverity::Moderate
            };

            Some(Anomaly {
                date: record.date.clone(),
                usage,
                deviation: round_to(usage - avg, 2),
                z_score: round_to(z, 2),
                kind,
                severity,
            })
        })
        .collect()
}

/// Heuristic 0-100 score: rewards falling or steady usage, low spread and a
/// low daily average.
fn efficiency_score(avg: f64, cv: f64, trend: Trend, anomalies: &[Anomaly]) -> f64 {
    let mut score = 50.0;

    score += match trend {
        Trend::Decreasing => 30.0,
        Trend::Stable => 20.0,
        Trend::Increasing => -20.0,
        Trend::Volatile => -10.0,
    };

    if cv < STEADY_CV {
        score += 15.0;
    } else if cv > VOLATILE_CV {
        score -= 15.0;
    }

    let high_severity = anomalies.iter().filter(|a| a.is_high()).count();
    score -= high_severity as f64 * 5.0;

    // Benchmark: 150 L/day
    if avg < 100.0 {
        score += 15.0;
    } else if avg < 150.0 {
        score += 10.0;
    } else if avg > 250.0 {
        score -= 10.0;
    }

    score.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(values: &[f64]) -> Vec<UsageRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| UsageRecord::new(format!("2024-07-{:02}", i + 1), *v))
            .collect()
    }

    #[test]
    fn short_history_returns_default() {
        for n in 0..MIN_PATTERN_RECORDS {
            let outcome = PatternAnalyzer::new().analyze(&history(&vec![300.0; n]));
            assert!(outcome.is_default());
            let pattern = outcome.value();
            assert_eq!(pattern.trend, Trend::Stable);
            assert_eq!(pattern.efficiency_score, 50.0);
            assert!(pattern.anomalies.is_empty());
        }
    }

    #[test]
    fn ascending_history_is_increasing() {
        let values: Vec<f64> = (0..10).map(|i| 100.0 + 8.0 * i as f64).collect();
        let pattern = PatternAnalyzer::new().analyze(&history(&values)).into_value();
        assert_eq!(pattern.trend, Trend::Increasing);
    }

    #[test]
    fn descending_history_is_decreasing() {
        let values: Vec<f64> = (0..10).map(|i| 200.0 - 8.0 * i as f64).collect();
        let pattern = PatternAnalyzer::new().analyze(&history(&values)).into_value();
        assert_eq!(pattern.trend, Trend::Decreasing);
    }

    #[test]
    fn noisy_history_is_volatile() {
        let values = [20.0, 200.0, 30.0, 220.0, 25.0, 210.0, 40.0, 190.0];
        let pattern = PatternAnalyzer::new().analyze(&history(&values)).into_value();
        assert_eq!(pattern.trend, Trend::Volatile);
    }

    #[test]
    fn flat_history_has_no_anomalies() {
        let pattern = PatternAnalyzer::new()
            .analyze(&history(&[120.0; 10]))
            .into_value();
        assert_eq!(pattern.standard_deviation, 0.0);
        assert!(pattern.anomalies.is_empty());
        assert_eq!(pattern.trend, Trend::Stable);
        // 50 + 20 stable + 15 steady + 10 under 150 L
        assert_eq!(pattern.efficiency_score, 95.0);
    }

    #[test]
    fn spike_is_flagged() {
        let mut values = vec![100.0; 19];
        values.push(400.0);
        let pattern = PatternAnalyzer::new().analyze(&history(&values)).into_value();

        assert_eq!(pattern.anomalies.len(), 1);
        let anomaly = &pattern.anomalies[0];
        assert_eq!(anomaly.kind, AnomalyKind::HighUsageSpike);
        assert_eq!(anomaly.severity, AnomalySeverity::High);
        assert_eq!(anomaly.date, "2024-07-20");
        assert!(anomaly.deviation > 0.0);
        assert_eq!(pattern.peak_usage, 400.0);
        assert_eq!(pattern.peak_day.as_deref(), Some("2024-07-20"));
    }

    #[test]
    fn dip_is_flagged_as_low_usage() {
        let mut values = vec![150.0; 9];
        values.push(10.0);
        let pattern = PatternAnalyzer::new().analyze(&history(&values)).into_value();

        assert_eq!(pattern.anomalies.len(), 1);
        assert_eq!(pattern.anomalies[0].kind, AnomalyKind::UnusuallyLowUsage);
        assert_eq!(pattern.lowest_day.as_deref(), Some("2024-07-10"));
    }

    #[test]
    fn seasonal_tag_uses_first_record() {
        let mut records = history(&[100.0; 8]);
        records[0].date = "2024-01-15".into();
        let pattern = PatternAnalyzer::new().analyze(&records).into_value();
        assert_eq!(pattern.seasonal_pattern, SeasonalPattern::WinterLow);
    }

    #[test]
    fn unparsable_first_date_only_drops_season() {
        let mut records = history(&[100.0; 8]);
        records[0].date = "yesterday".into();
        let outcome = PatternAnalyzer::new().analyze(&records);
        assert!(outcome.is_computed());
        let pattern = outcome.value();
        assert_eq!(pattern.seasonal_pattern, SeasonalPattern::None);
        assert_eq!(pattern.average_daily, 100.0);
    }

    #[test]
    fn efficiency_score_is_clamped() {
        let high = vec![
            Anomaly {
                date: String::new(),
                usage: 0.0,
                deviation: 0.0,
                z_score: 4.0,
                kind: AnomalyKind::HighUsageSpike,
                severity: AnomalySeverity::High,
            };
            20
        ];
        assert_eq!(efficiency_score(400.0, 0.5, Trend::Volatile, &high), 0.0);
        assert_eq!(efficiency_score(50.0, 0.0, Trend::Decreasing, &[]), 100.0);
    }

    #[test]
    fn high_average_is_penalised() {
        let pattern = PatternAnalyzer::new()
            .analyze(&history(&[300.0; 7]))
            .into_value();
        // 50 + 20 stable + 15 steady - 10 above 250 L
        assert_eq!(pattern.efficiency_score, 75.0);
    }
}
