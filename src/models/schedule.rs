use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WateringSchedule {
    pub should_water_today: bool,
    /// Zero when not watering, otherwise within 5..=60.
    pub recommended_duration_minutes: u32,
    pub optimal_start_time: String,
    pub optimal_end_time: String,
    pub water_amount_liters: f64,
    pub frequency_days: u32,
    pub next_watering_date: NaiveDate,
    /// Ordered trace of how the decision was reached. User facing.
    pub reasoning: Vec<String>,
    pub confidence: f64,
    /// Litres saved against a fixed 20 minute session. Negative when the
    /// schedule uses more.
    pub savings_vs_fixed: f64,
}

impl WateringSchedule {
    pub fn timing_window(&self) -> String {
        format!("{} - {}", self.optimal_start_time, self.optimal_end_time)
    }
}
