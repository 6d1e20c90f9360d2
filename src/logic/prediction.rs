use super::calculations::{mean, round_to};
use super::pattern::PatternAnalyzer;
use crate::clock::Clock;
use crate::models::{
    DailyPrediction, Outcome, PredictionResult, Trend, UsagePattern, UsageRecord, Weather,
    WeeklyPrediction,
};
use chrono::{Duration, Weekday};

/// Minimum number of days needed before a prediction is computed.
pub const MIN_PREDICTION_RECORDS: usize = 3;

/// Number of most recent days averaged for the base prediction.
const RECENT_WINDOW: usize = 7;

/// Daily usage considered ideal for an average garden, in litres.
const IDEAL_DAILY_USAGE: f64 = 120.0;

const DEFAULT_PREDICTED_USAGE: f64 = 150.0;
const DEFAULT_CONFIDENCE: f64 = 0.3;
const STANDARD_WINDOW: &str = "6:00 AM - 8:00 AM";

/// Projects next-day and next-week usage by blending the recent average,
/// the usage trend and weather adjustments.
#[derive(Debug, Clone, Copy, Default)]
pub struct PredictionEngine {
    analyzer: PatternAnalyzer,
}

impl PredictionEngine {
    pub fn new() -> Self {
        Self {
            analyzer: PatternAnalyzer::new(),
        }
    }

    /// Predict usage for the next day.
    ///
    /// `day_of_week` is accepted for callers that know it but does not affect the
    /// result yet.
    pub fn predict_daily(
        &self,
        records: &[UsageRecord],
        forecast: Option<&Weather>,
        day_of_week: Option<Weekday>,
    ) -> Outcome<PredictionResult> {
        if records.len() < MIN_PREDICTION_RECORDS {
            tracing::debug!(
                records = records.len(),
                required = MIN_PREDICTION_RECORDS,
                "Insufficient history for prediction"
            );
            return Outcome::Default(default_prediction());
        }

        let pattern = self.analyzer.analyze(records).into_value();

        let recent: Vec<f64> = records
            .iter()
            .take(RECENT_WINDOW)
            .map(|r| r.usage_liters)
            .collect();
        let mut base = mean(&recent);

        match pattern.trend {
            Trend::Increasing => base *= 1.1,
            Trend::Decreasing => base *= 0.9,
            Trend::Stable | Trend::Volatile => {}
        }

        let mut factors = Vec::new();
        let adjustment = forecast
            .map(|w| weather_adjustment(w, &mut factors))
            .unwrap_or(0.0);

        let predicted = (base + adjustment).max(0.0);
        let confidence = confidence(&pattern, records.len());

        tracing::debug!(
            base,
            adjustment,
            predicted,
            confidence,
            ?day_of_week,
            "Daily usage predicted"
        );

        Outcome::Computed(PredictionResult {
            predicted_usage: round_to(predicted, 1),
            confidence: round_to(confidence, 2),
            factors,
            recommendation: advice_text(predicted, &pattern, forecast),
            savings_potential: round_to((predicted - IDEAL_DAILY_USAGE).max(0.0), 1),
            optimal_watering_time: optimal_window(forecast).to_string(),
        })
    }

    /// Predict each of the next seven days.
    ///
    /// Every day is predicted from the same historical window; only the
    /// per-day forecast (when supplied) differs. The daily values are therefore
    /// not chained on one another.
    pub fn predict_weekly(
        &self,
        records: &[UsageRecord],
        forecasts: Option<&[Weather]>,
        clock: &dyn Clock,
    ) -> WeeklyPrediction {
        let today = clock.today();

        let daily_predictions: Vec<DailyPrediction> = (1..=7u32)
            .map(|day| {
                let forecast = forecasts.and_then(|f| f.get(day as usize - 1));
                let outcome = self.predict_daily(records, forecast, None);
                let is_default = outcome.is_default();
                let result = outcome.into_value();

                DailyPrediction {
                    day,
                    date: today + Duration::days(day as i64),
                    predicted_usage: result.predicted_usage,
                    confidence: result.confidence,
                    optimal_time: result.optimal_watering_time,
                    is_default,
                }
            })
            .collect();

        let total: f64 = daily_predictions.iter().map(|d| d.predicted_usage).sum();
        let confidences: Vec<f64> = daily_predictions.iter().map(|d| d.confidence).collect();

        WeeklyPrediction {
            total_weekly_predicted: round_to(total, 1),
            average_daily_predicted: round_to(total / 7.0, 1),
            confidence_average: round_to(mean(&confidences), 2),
            daily_predictions,
        }
    }
}

fn default_prediction() -> PredictionResult {
    PredictionResult {
        predicted_usage: DEFAULT_PREDICTED_USAGE,
        confidence: DEFAULT_CONFIDENCE,
        factors: vec!["Insufficient historical data".to_string()],
        recommendation: "Not enough data for accurate prediction. Continue logging usage."
            .to_string(),
        savings_potential: 0.0,
        optimal_watering_time: STANDARD_WINDOW.to_string(),
    }
}

/// Additive litre adjustment for the forecast. Each rule that fires appends a
/// factor string.
fn weather_adjustment(weather: &Weather, factors: &mut Vec<String>) -> f64 {
    let temp = weather.forecast_max_temp();
    let rain = weather.forecast_precip_mm();
    let humidity = weather.current_humidity();
    let mut adjustment = 0.0;

    if temp > 30.0 {
        adjustment += 20.0;
        factors.push("High temperature (+20L)".to_string());
    } else if temp > 25.0 {
        adjustment += 10.0;
        factors.push("Warm temperature (+10L)".to_string());
    } else if temp < 15.0 {
        adjustment -= 10.0;
        factors.push("Cool temperature (-10L)".to_string());
    }

    if rain > 5.0 {
        adjustment -= 50.0;
        factors.push(format!("Heavy rain expected ({:.1}mm, -50L)", rain));
    } else if rain > 2.0 {
        adjustment -= 30.0;
        factors.push(format!("Rain expected ({:.1}mm, -30L)", rain));
    }

    if humidity > 80.0 {
        adjustment -= 10.0;
        factors.push("High humidity (-10L)".to_string());
    } else if humidity < 40.0 {
        adjustment += 10.0;
        factors.push("Low humidity (+10L)".to_string());
    }

    adjustment
}

fn confidence(pattern: &UsagePattern, data_points: usize) -> f64 {
    let mut confidence: f64 = 0.5;

    if data_points >= 30 {
        confidence += 0.3;
    } else if data_points >= 14 {
        confidence += 0.2;
    } else if data_points >= 7 {
        confidence += 0.1;
    }

    match pattern.trend {
        Trend::Stable | Trend::Decreasing => confidence += 0.15,
        Trend::Volatile => confidence -= 0.2,
        Trend::Increasing => {}
    }

    if pattern.variance < 100.0 {
        confidence += 0.1;
    } else if pattern.variance > 500.0 {
        confidence -= 0.1;
    }

    if pattern.anomalies.is_empty() {
        confidence += 0.1;
    } else if pattern.anomalies.len() > 3 {
        confidence -= 0.15;
    }

    confidence.clamp(0.1, 1.0)
}

fn advice_text(predicted: f64, pattern: &UsagePattern, forecast: Option<&Weather>) -> String {
    let mut advice = Vec::new();

    if predicted > pattern.average_daily * 1.2 {
        advice.push("High water usage predicted. Consider reducing watering duration.");
    }

    if forecast.is_some_and(|w| w.forecast_precip_mm() > 2.0) {
        advice.push("Skip watering due to expected rain.");
    }

    if pattern.trend == Trend::Increasing {
        advice.push("Your usage is trending up. Review your watering schedule.");
    }

    if pattern.efficiency_score < 50.0 {
        advice.push("Low efficiency score. Optimize watering times and check for leaks.");
    }

    if advice.is_empty() {
        advice.push("Usage prediction looks normal. Continue current practices.");
    }

    advice.join(" ")
}

fn optimal_window(forecast: Option<&Weather>) -> &'static str {
    let Some(weather) = forecast else {
        return STANDARD_WINDOW;
    };

    let temp = weather.forecast_max_temp();
    if temp > 30.0 {
        "5:00 AM - 7:00 AM (very early to avoid evaporation)"
    } else if temp > 25.0 {
        "6:00 AM - 8:00 AM or 7:00 PM - 9:00 PM"
    } else {
        "7:00 AM - 9:00 AM"
    }
}
