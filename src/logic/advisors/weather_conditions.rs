use super::{AdvisoryContext, Advisor};
use crate::models::{Priority, Recommendation, RecommendationType, Weather};

const SKIP_RAIN_MM: f64 = 5.0;
const HEAVY_RAIN_MM: f64 = 10.0;
const SKIP_RAIN_CHANCE: f64 = 70.0;
const EXTREME_HEAT_C: f64 = 35.0;
const HUMID_PCT: f64 = 80.0;

/// Weather advisor - reacts to today's forecast and current humidity
///
/// Conditions:
/// - Forecast rain > 5mm or chance > 70%: skip watering today
/// - Forecast max > 35°C: shift watering to very early
/// - Current humidity > 80%: trim watering
pub struct WeatherConditionsAdvisor;

impl Advisor for WeatherConditionsAdvisor {
    fn id(&self) -> &'static str {
        "weather_conditions"
    }

    fn name(&self) -> &'static str {
        "Weather Conditions"
    }

    fn advise(&self, ctx: &AdvisoryContext) -> Vec<Recommendation> {
        let Some(weather) = ctx.weather.filter(|w| !w.is_empty()) else {
            return Vec::new();
        };

        let mut recs = Vec::new();

        if let Some(rec) = rain_skip(ctx, weather) {
            recs.push(rec);
        }
        if let Some(rec) = heat_timing(ctx, weather) {
            recs.push(rec);
        }
        if let Some(rec) = humidity_trim(ctx, weather) {
            recs.push(rec);
        }

        recs
    }
}

fn rain_skip(ctx: &AdvisoryContext, weather: &Weather) -> Option<Recommendation> {
    let rain_mm = weather.forecast_precip_mm();
    let chance = weather.forecast_chance_of_rain();

    if rain_mm <= SKIP_RAIN_MM && chance <= SKIP_RAIN_CHANCE {
        return None;
    }

    let confidence = if rain_mm > HEAVY_RAIN_MM { 0.9 } else { 0.7 };

    Some(
        Recommendation::new(
            ctx.rec_id("rain"),
            RecommendationType::WateringSchedule,
            Priority::High,
            "Skip Watering Today - Rain Expected",
            format!("Forecast shows {:.1}mm rain ({:.0}% chance)", rain_mm, chance),
        )
        .with_actions([
            "Disable automatic irrigation for today",
            "Check rain gauge to confirm actual rainfall",
            "Resume watering only if rain doesn't materialize",
        ])
        // One average day of watering
        .with_savings(150.0, 100.0)
        .with_reasoning("Natural rainfall eliminates need for irrigation")
        .with_confidence(confidence)
        .valid_until(ctx.today())
        .with_metadata("rain_forecast", rain_mm)
        .with_metadata("chance", chance),
    )
}

fn heat_timing(ctx: &AdvisoryContext, weather: &Weather) -> Option<Recommendation> {
    let max_temp = weather.forecast_max_temp();
    if max_temp <= EXTREME_HEAT_C {
        return None;
    }

    Some(
        Recommendation::new(
            ctx.rec_id("heat"),
            RecommendationType::WateringSchedule,
            Priority::Medium,
            "Extreme Heat - Adjust Watering Time",
            format!("High temperature forecasted: {:.1}°C", max_temp),
        )
        .with_actions([
            "Water very early (5-6 AM) to minimize evaporation",
            "Consider light evening watering if needed",
            "Increase frequency but reduce duration",
            "Apply mulch to retain soil moisture",
        ])
        .with_savings(20.0, 10.0)
        .with_reasoning("Extreme heat increases evaporation; timing is critical")
        .with_confidence(0.85)
        .valid_until(ctx.today())
        .with_metadata("temperature", max_temp),
    )
}

fn humidity_trim(ctx: &AdvisoryContext, weather: &Weather) -> Option<Recommendation> {
    let humidity = weather.current_humidity();
    if humidity <= HUMID_PCT {
        return None;
    }

    Some(
        Recommendation::new(
            ctx.rec_id("humidity"),
            RecommendationType::WateringSchedule,
            Priority::Low,
            "High Humidity - Reduce Watering",
            format!("Current humidity: {:.0}%", humidity),
        )
        .with_actions([
            "Reduce watering duration by 20-25%",
            "Skip watering if soil feels moist",
            "Monitor for fungal issues due to high moisture",
        ])
        .with_savings(30.0, 20.0)
        .with_reasoning("High humidity reduces evaporation and plant water loss")
        .with_confidence(0.6)
        .valid_until(ctx.days_ahead(1))
        .with_metadata("humidity", humidity),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CurrentConditions, DailyOutlook};
    use chrono::NaiveDate;

    fn weather(humidity: f64, max_temp: f64, rain_mm: f64, chance: f64) -> Weather {
        Weather::new(
            CurrentConditions {
                temp_c: Some(max_temp - 5.0),
                humidity: Some(humidity),
                precip_mm: Some(0.0),
            },
            DailyOutlook {
                max_temp: Some(max_temp),
                min_temp: Some(max_temp - 12.0),
                chance_of_rain: Some(chance),
                total_precip_mm: Some(rain_mm),
            },
        )
    }

    fn advise(w: &Weather) -> Vec<Recommendation> {
        let now = NaiveDate::from_ymd_opt(2024, 6, 20)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap();
        WeatherConditionsAdvisor.advise(&AdvisoryContext::new(now).with_weather(w))
    }

    #[test]
    fn mild_day_is_quiet() {
        assert!(advise(&weather(55.0, 24.0, 0.0, 10.0)).is_empty());
    }

    #[test]
    fn empty_snapshot_is_quiet() {
        assert!(advise(&Weather::default()).is_empty());
    }

    #[test]
    fn heavy_rain_skips_with_high_confidence() {
        let recs = advise(&weather(60.0, 22.0, 12.0, 90.0));
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.kind, RecommendationType::WateringSchedule);
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.confidence, 0.9);
        assert_eq!(rec.estimated_savings_percent, 100.0);
        assert_eq!(rec.valid_until, NaiveDate::from_ymd_opt(2024, 6, 20));
    }

    #[test]
    fn likely_rain_skips_with_lower_confidence() {
        let recs = advise(&weather(60.0, 22.0, 1.0, 75.0));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].confidence, 0.7);
    }

    #[test]
    fn boundary_rain_does_not_trigger() {
        assert!(advise(&weather(60.0, 22.0, 5.0, 70.0)).is_empty());
    }

    #[test]
    fn heat_and_humidity_each_contribute() {
        let recs = advise(&weather(85.0, 37.0, 0.0, 0.0));
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert_eq!(recs[0].title, "Extreme Heat - Adjust Watering Time");
        assert_eq!(recs[1].priority, Priority::Low);
        assert_eq!(recs[1].valid_until, NaiveDate::from_ymd_opt(2024, 6, 21));
    }
}
