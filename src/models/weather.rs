use serde::{Deserialize, Serialize};

/// Temperature assumed when a snapshot carries none, in °C.
pub const NEUTRAL_TEMP_C: f64 = 20.0;
/// Relative humidity assumed when a snapshot carries none, in %.
pub const NEUTRAL_HUMIDITY: f64 = 60.0;

/// Weather snapshot handed over by the weather client layer.
///
/// Mirrors the nested `current` / `forecast.today` layout the client produces.
/// Every field is optional; the accessors supply the fallback values the
/// engine works with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentConditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Forecast>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub temp_c: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub precip_mm: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub today: Option<DailyOutlook>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyOutlook {
    #[serde(default)]
    pub max_temp: Option<f64>,
    #[serde(default)]
    pub min_temp: Option<f64>,
    /// Probability of rain in percent (0-100).
    #[serde(default)]
    pub chance_of_rain: Option<f64>,
    #[serde(default)]
    pub total_precip_mm: Option<f64>,
}

impl Weather {
    pub fn new(current: CurrentConditions, today: DailyOutlook) -> Self {
        Self {
            current: Some(current),
            forecast: Some(Forecast { today: Some(today) }),
        }
    }

    /// True when the snapshot carries no data at all.
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.forecast.is_none()
    }

    fn today(&self) -> Option<&DailyOutlook> {
        self.forecast.as_ref().and_then(|f| f.today.as_ref())
    }

    pub fn current_temp_c(&self) -> f64 {
        self.current
            .as_ref()
            .and_then(|c| c.temp_c)
            .unwrap_or(NEUTRAL_TEMP_C)
    }

    pub fn current_humidity(&self) -> f64 {
        self.current
            .as_ref()
            .and_then(|c| c.humidity)
            .unwrap_or(NEUTRAL_HUMIDITY)
    }

    pub fn current_precip_mm(&self) -> f64 {
        self.current
            .as_ref()
            .and_then(|c| c.precip_mm)
            .unwrap_or(0.0)
    }

    pub fn forecast_max_temp(&self) -> f64 {
        self.today()
            .and_then(|t| t.max_temp)
            .unwrap_or(NEUTRAL_TEMP_C)
    }

    pub fn forecast_min_temp(&self) -> Option<f64> {
        self.today().and_then(|t| t.min_temp)
    }

    pub fn forecast_precip_mm(&self) -> f64 {
        self.today()
            .and_then(|t| t.total_precip_mm)
            .unwrap_or(0.0)
    }

    pub fn forecast_chance_of_rain(&self) -> f64 {
        self.today()
            .and_then(|t| t.chance_of_rain)
            .unwrap_or(0.0)
    }

    /// Rain already fallen plus rain still expected today.
    pub fn rainfall_mm(&self) -> f64 {
        self.current_precip_mm() + self.forecast_precip_mm()
    }
}
