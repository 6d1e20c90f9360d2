use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_usage: f64,
    pub confidence: f64,
    /// Weather adjustments applied, in the order they were evaluated.
    pub factors: Vec<String>,
    pub recommendation: String,
    pub savings_potential: f64,
    pub optimal_watering_time: String,
}

/// One day of a seven-day outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub day: u32,
    pub date: NaiveDate,
    pub predicted_usage: f64,
    pub confidence: f64,
    pub optimal_time: String,
    /// Whether this day fell back to the insufficient-data placeholder.
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPrediction {
    pub daily_predictions: Vec<DailyPrediction>,
    pub total_weekly_predicted: f64,
    pub average_daily_predicted: f64,
    pub confidence_average: f64,
}
