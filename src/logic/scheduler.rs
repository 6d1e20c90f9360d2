use super::calculations::round_to;
use crate::clock::{Clock, Season};
use crate::models::{IrrigationZone, Weather, WateringSchedule};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// Baseline evapotranspiration in mm/day.
const BASE_ET_MM: f64 = 4.0;
const MIN_ET_MM: f64 = 1.0;

/// Water when soil moisture is at or below this percentage.
const MOISTURE_THRESHOLD: f64 = 40.0;
/// Target saturation after watering, in percent.
const TARGET_MOISTURE: f64 = 80.0;
/// Moisture assumed once the soil's retention window has passed.
const DRY_SOIL_MOISTURE: f64 = 30.0;
/// Days since watering when the zone has no recorded watering. The ET drain
/// over this many days always clamps the estimate to 0 %, so an unrecorded
/// zone reads as bone-dry and never earns the moisture confidence bonus.
const NEVER_WATERED_DAYS: i64 = 999;

const RAIN_SKIP_MM: f64 = 5.0;
const RAIN_REDUCE_MM: f64 = 2.0;
const HEAVY_FORECAST_MM: f64 = 10.0;
const MIN_WATERING_TEMP_C: f64 = 5.0;

const MIN_DURATION_MIN: u32 = 5;
const MAX_DURATION_MIN: u32 = 60;
/// Length of the naive fixed session the schedule is compared against.
const FIXED_SESSION_MIN: f64 = 20.0;

/// Turns a zone definition plus a weather snapshot into a watering decision.
///
/// Each call is independent: the only state read besides the arguments is the
/// injected clock (for the season and the next watering date).
pub struct IrrigationScheduler<'a> {
    clock: &'a dyn Clock,
}

impl<'a> IrrigationScheduler<'a> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self { clock }
    }

    pub fn create_schedule(
        &self,
        zone: &IrrigationZone,
        weather: &Weather,
        last_watered: Option<NaiveDate>,
        soil_moisture: Option<f64>,
    ) -> WateringSchedule {
        let today = self.clock.today();
        let mut reasoning = Vec::new();

        let et_rate = evapotranspiration(weather, zone);
        reasoning.push(format!("Evapotranspiration rate: {:.1}mm/day", et_rate));

        let daily_need_mm = zone.weekly_need_mm() / 7.0;
        reasoning.push(format!(
            "Plant water need: {:.1}mm/day ({})",
            daily_need_mm,
            zone.plant_type.map(|p| p.as_str()).unwrap_or("unspecified")
        ));

        let rainfall_mm = weather.rainfall_mm();
        reasoning.push(format!("Recent rainfall: {:.1}mm", rainfall_mm));

        let moisture = match soil_moisture {
            Some(m) => m,
            None => {
                let days = days_since(last_watered, today);
                estimate_soil_moisture(zone, days, rainfall_mm, et_rate)
            }
        };
        reasoning.push(format!("Estimated soil moisture: {:.0}%", moisture));

        let should_water = should_water(moisture, rainfall_mm, weather, &mut reasoning);

        let (duration_minutes, water_liters) = if should_water {
            let (minutes, liters) = watering_amount(zone, moisture, daily_need_mm);
            reasoning.push(format!("Calculated duration: {} minutes", minutes));
            reasoning.push(format!("Water amount: {:.1} liters", liters));
            (minutes, liters)
        } else {
            (0, 0.0)
        };

        let (start, end) = timing_window(weather);

        let season = Season::from_month(self.clock.month());
        let frequency_days = watering_frequency(zone, season);

        let next_watering_date = if should_water {
            today + Duration::days(frequency_days as i64)
        } else {
            today + Duration::days(1)
        };

        let fixed_liters = FIXED_SESSION_MIN * zone.irrigation_method.flow_rate_lpm();
        let savings = fixed_liters - water_liters;
        if savings > 0.0 {
            reasoning.push(format!("Saving {:.1}L vs fixed schedule", savings));
        }

        let confidence = schedule_confidence(weather, moisture, zone);

        tracing::debug!(
            zone = %zone.zone_id,
            et_rate,
            moisture,
            should_water,
            duration_minutes,
            frequency_days,
            %season,
            "Schedule created"
        );

        WateringSchedule {
            should_water_today: should_water,
            recommended_duration_minutes: duration_minutes,
            optimal_start_time: start.to_string(),
            optimal_end_time: end.to_string(),
            water_amount_liters: round_to(water_liters, 1),
            frequency_days,
            next_watering_date,
            reasoning,
            confidence: round_to(confidence, 2),
            savings_vs_fixed: round_to(savings, 1),
        }
    }

    /// Schedule every zone against the same weather snapshot.
    ///
    /// Zones missing from `last_watered` are treated as never watered and
    /// estimated at 0 % moisture.
    ///
    /// Zones are scheduled independently; shared water supply is not modelled.
    pub fn create_multi_zone_schedule(
        &self,
        zones: &[IrrigationZone],
        weather: &Weather,
        last_watered: &HashMap<String, NaiveDate>,
    ) -> BTreeMap<String, WateringSchedule> {
        let mut schedules = BTreeMap::new();

        for zone in zones {
            let schedule =
                self.create_schedule(zone, weather, last_watered.get(&zone.zone_id).copied(), None);
            if schedules.insert(zone.zone_id.clone(), schedule).is_some() {
                tracing::warn!(zone = %zone.zone_id, "Duplicate zone id, keeping last schedule");
            }
        }

        schedules
    }
}

/// ET in mm/day, adjusted for temperature, humidity and sun exposure.
pub fn evapotranspiration(weather: &Weather, zone: &IrrigationZone) -> f64 {
    let temp = weather.current_temp_c();
    let humidity = weather.current_humidity();

    let temp_factor = 1.0 + (temp - 20.0) * 0.02;
    let humidity_factor = 1.0 - (humidity - 50.0) * 0.01;
    let sun_factor = zone.sun_exposure.et_factor();

    (BASE_ET_MM * temp_factor * humidity_factor * sun_factor).max(MIN_ET_MM)
}

/// Whole days between the last watering and today. A future date counts as today.
fn days_since(last_watered: Option<NaiveDate>, today: NaiveDate) -> i64 {
    last_watered
        .map(|d| (today - d).num_days().max(0))
        .unwrap_or(NEVER_WATERED_DAYS)
}

/// Moisture percentage from days since watering, rainfall and ET.
///
/// A long gap is dominated by the ET drain: with `NEVER_WATERED_DAYS` the
/// result is 0 whatever the rainfall.
pub fn estimate_soil_moisture(
    zone: &IrrigationZone,
    days_since_watering: i64,
    rainfall_mm: f64,
    et_rate: f64,
) -> f64 {
    let mut moisture = if days_since_watering == 0 {
        100.0
    } else if days_since_watering <= zone.retention_days() {
        100.0 - days_since_watering as f64 * 20.0
    } else {
        DRY_SOIL_MOISTURE
    };

    // 10mm of rain restores 20 points
    moisture += rainfall_mm * 2.0;
    moisture -= et_rate * days_since_watering as f64 * 1.5;

    moisture.clamp(0.0, 100.0)
}

/// Every check runs and logs its outcome; any failing check vetoes watering.
fn should_water(
    moisture: f64,
    rainfall_mm: f64,
    weather: &Weather,
    reasoning: &mut Vec<String>,
) -> bool {
    let mut water = true;

    if moisture > MOISTURE_THRESHOLD {
        water = false;
        reasoning.push(format!(
            "Soil moisture adequate ({:.0}% > {:.0}%)",
            moisture, MOISTURE_THRESHOLD
        ));
    } else {
        reasoning.push(format!(
            "Soil moisture low ({:.0}% <= {:.0}%)",
            moisture, MOISTURE_THRESHOLD
        ));
    }

    if rainfall_mm > RAIN_SKIP_MM {
        water = false;
        reasoning.push(format!("Sufficient rainfall ({:.1}mm)", rainfall_mm));
    } else if rainfall_mm > RAIN_REDUCE_MM {
        reasoning.push(format!(
            "Some rain expected ({:.1}mm), reduce watering",
            rainfall_mm
        ));
    }

    let forecast_rain = weather.forecast_precip_mm();
    if forecast_rain > HEAVY_FORECAST_MM {
        water = false;
        reasoning.push(format!("Heavy rain forecasted ({:.1}mm)", forecast_rain));
    }

    let temp = weather.current_temp_c();
    if temp < MIN_WATERING_TEMP_C {
        water = false;
        reasoning.push(format!("Temperature too low ({:.1}°C)", temp));
    }

    water
}

/// Duration in minutes and the litres it delivers.
///
/// The volume is recomputed from the clamped duration, so it can differ from the
/// raw deficit-driven requirement.
fn watering_amount(zone: &IrrigationZone, moisture: f64, daily_need_mm: f64) -> (u32, f64) {
    let deficit = TARGET_MOISTURE - moisture;
    let needed_mm = (deficit / 100.0) * daily_need_mm * 2.0;

    // 1mm over 1 m² is 1 litre
    let liters = needed_mm * zone.area_sqm;

    let method = zone.irrigation_method;
    let adjusted = liters / method.efficiency();
    let flow_rate = method.flow_rate_lpm();

    let raw_minutes = (adjusted / flow_rate).trunc().max(0.0) as u32;
    let minutes = raw_minutes.clamp(MIN_DURATION_MIN, MAX_DURATION_MIN);

    (minutes, minutes as f64 * flow_rate * method.efficiency())
}

fn timing_window(weather: &Weather) -> (&'static str, &'static str) {
    let temp = weather.forecast_max_temp();
    if temp > 30.0 {
        ("5:00 AM", "7:00 AM")
    } else if temp > 25.0 {
        ("6:00 AM", "8:00 AM")
    } else {
        ("7:00 AM", "9:00 AM")
    }
}

fn watering_frequency(zone: &IrrigationZone, season: Season) -> u32 {
    let factor = match season {
        Season::Summer => 0.7,
        Season::Spring => 1.0,
        Season::Fall => 1.2,
        Season::Winter => 1.5,
    };

    ((zone.retention_days() as f64 * factor) as u32).max(1)
}

fn schedule_confidence(weather: &Weather, moisture: f64, zone: &IrrigationZone) -> f64 {
    let mut confidence: f64 = 0.5;

    if !weather.is_empty() {
        confidence += 0.2;
    }
    if moisture > 0.0 {
        confidence += 0.15;
    }
    if zone.is_fully_described() {
        confidence += 0.15;
    }

    confidence.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{
        CurrentConditions, DailyOutlook, IrrigationMethod, PlantType, SoilType, SunExposure,
    };

    fn clock(y: i32, m: u32, d: u32) -> FixedClock {
        FixedClock::on(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn lawn() -> IrrigationZone {
        IrrigationZone::new("front", "Front Lawn", IrrigationMethod::Sprinkler, 50.0)
            .with_plant(PlantType::Lawn)
            .with_soil(SoilType::Loam)
            .with_sun(SunExposure::Full)
    }

    fn weather(temp: f64, humidity: f64, precip: f64, forecast_precip: f64) -> Weather {
        Weather::new(
            CurrentConditions {
                temp_c: Some(temp),
                humidity: Some(humidity),
                precip_mm: Some(precip),
            },
            DailyOutlook {
                max_temp: Some(temp + 4.0),
                min_temp: Some(temp - 6.0),
                chance_of_rain: Some(10.0),
                total_precip_mm: Some(forecast_precip),
            },
        )
    }

    #[test]
    fn et_known_value() {
        let w = weather(25.0, 40.0, 0.0, 0.0);
        // 4.0 * 1.1 * 1.1 * 1.2
        assert!((evapotranspiration(&w, &lawn()) - 5.808).abs() < 1e-9);
    }

    #[test]
    fn et_has_floor() {
        let w = weather(-20.0, 100.0, 0.0, 0.0);
        assert_eq!(evapotranspiration(&w, &lawn()), MIN_ET_MM);
    }

    #[test]
    fn moisture_decays_within_retention() {
        let zone = lawn();
        assert_eq!(estimate_soil_moisture(&zone, 0, 0.0, 4.0), 100.0);
        // 100 - 40 - 4 * 2 * 1.5
        assert!((estimate_soil_moisture(&zone, 2, 0.0, 4.0) - 48.0).abs() < 1e-9);
        // past the window: 30 + 10 - 4 * 4 * 1.5
        assert!((estimate_soil_moisture(&zone, 4, 5.0, 4.0) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn never_watered_zone_is_dry() {
        let zone = lawn();
        assert_eq!(
            estimate_soil_moisture(&zone, NEVER_WATERED_DAYS, 3.0, 2.0),
            0.0
        );
    }

    #[test]
    fn unrecorded_zone_reads_bone_dry() {
        let clock = clock(2024, 4, 10);
        let schedule = IrrigationScheduler::new(&clock).create_schedule(
            &lawn(),
            &weather(20.0, 50.0, 0.0, 0.0),
            None,
            None,
        );

        assert!(schedule.should_water_today);
        assert!(schedule
            .reasoning
            .contains(&"Estimated soil moisture: 0%".to_string()));
        // weather + described zone, no moisture bonus
        assert_eq!(schedule.confidence, 0.85);
    }

    #[test]
    fn dry_mild_day_waters() {
        let clock = clock(2024, 4, 10);
        let schedule = IrrigationScheduler::new(&clock).create_schedule(
            &lawn(),
            &weather(20.0, 50.0, 0.0, 0.0),
            None,
            Some(30.0),
        );

        assert!(schedule.should_water_today);
        assert!((5..=60).contains(&schedule.recommended_duration_minutes));
        assert!(schedule.water_amount_liters > 0.0);
        assert_eq!(schedule.optimal_start_time, "7:00 AM");
        // loam in spring: 3 days
        assert_eq!(schedule.frequency_days, 3);
        assert_eq!(
            schedule.next_watering_date,
            NaiveDate::from_ymd_opt(2024, 4, 13).unwrap()
        );
        assert_eq!(schedule.confidence, 1.0);
    }

    #[test]
    fn clamped_duration_drives_volume() {
        // 50 m² lawn at 30%: 50/100 * 25/7 * 2 * 50 = 178.6 L, / 0.6 / 15 = 19 min
        let (minutes, liters) = watering_amount(&lawn(), 30.0, 25.0 / 7.0);
        assert_eq!(minutes, 19);
        assert!((liters - 19.0 * 15.0 * 0.6).abs() < 1e-9);

        // Tiny bed would need under a minute; clamped up to 5
        let bed = IrrigationZone::new("bed", "Bed", IrrigationMethod::Drip, 1.0)
            .with_plant(PlantType::Succulents);
        let (minutes, liters) = watering_amount(&bed, 35.0, 5.0 / 7.0);
        assert_eq!(minutes, MIN_DURATION_MIN);
        assert!((liters - 5.0 * 4.0 * 0.9).abs() < 1e-9);

        // Huge field is capped at an hour
        let field = IrrigationZone::new("field", "Field", IrrigationMethod::Sprinkler, 5000.0);
        let (minutes, _) = watering_amount(&field, 0.0, 5.0);
        assert_eq!(minutes, MAX_DURATION_MIN);
    }

    #[test]
    fn heavy_forecast_overrides_low_moisture() {
        let clock = clock(2024, 7, 1);
        let schedule = IrrigationScheduler::new(&clock).create_schedule(
            &lawn(),
            &weather(22.0, 50.0, 0.0, 12.0),
            None,
            Some(5.0),
        );

        assert!(!schedule.should_water_today);
        assert_eq!(schedule.recommended_duration_minutes, 0);
        assert_eq!(schedule.water_amount_liters, 0.0);
        assert!(schedule
            .reasoning
            .iter()
            .any(|r| r.starts_with("Heavy rain forecasted")));
        assert_eq!(
            schedule.next_watering_date,
            NaiveDate::from_ymd_opt(2024, 7, 2).unwrap()
        );
    }

    #[test]
    fn cold_snap_skips_watering() {
        let clock = clock(2024, 1, 15);
        let schedule = IrrigationScheduler::new(&clock).create_schedule(
            &lawn(),
            &weather(2.0, 50.0, 0.0, 0.0),
            None,
            Some(10.0),
        );

        assert!(!schedule.should_water_today);
        assert!(schedule
            .reasoning
            .iter()
            .any(|r| r.starts_with("Temperature too low")));
        // loam in winter: 3 * 1.5
        assert_eq!(schedule.frequency_days, 4);
    }

    #[test]
    fn moderate_rain_adds_note_only() {
        let mut reasoning = Vec::new();
        let w = weather(20.0, 50.0, 1.0, 2.5);
        assert!(should_water(20.0, w.rainfall_mm(), &w, &mut reasoning));
        assert!(reasoning.iter().any(|r| r.contains("reduce watering")));
    }

    #[test]
    fn reasoning_trail_is_ordered() {
        let clock = clock(2024, 4, 10);
        let schedule = IrrigationScheduler::new(&clock).create_schedule(
            &lawn(),
            &weather(20.0, 50.0, 0.0, 0.0),
            None,
            Some(30.0),
        );

        assert!(schedule.reasoning[0].starts_with("Evapotranspiration rate"));
        assert!(schedule.reasoning[1].starts_with("Plant water need"));
        assert!(schedule.reasoning[2].starts_with("Recent rainfall"));
        assert!(schedule.reasoning[3].starts_with("Estimated soil moisture"));
        assert!(schedule.reasoning[4].starts_with("Soil moisture low"));
        assert!(schedule.reasoning[5].starts_with("Calculated duration"));
        assert!(schedule.reasoning[6].starts_with("Water amount"));
        assert!(schedule.reasoning[7].starts_with("Saving"));
    }

    #[test]
    fn savings_can_be_negative() {
        let clock = clock(2024, 7, 1);
        let field = IrrigationZone::new("field", "Field", IrrigationMethod::Drip, 400.0)
            .with_plant(PlantType::Vegetables)
            .with_soil(SoilType::Sandy);
        let schedule = IrrigationScheduler::new(&clock).create_schedule(
            &field,
            &weather(28.0, 30.0, 0.0, 0.0),
            None,
            Some(0.0),
        );

        // 60 min drip delivers 216 L; fixed 20 min is 80 L
        assert_eq!(schedule.recommended_duration_minutes, 60);
        assert_eq!(schedule.savings_vs_fixed, -136.0);
        assert!(!schedule.reasoning.iter().any(|r| r.starts_with("Saving")));
        // zero moisture and no confidence bonus for it
        assert_eq!(schedule.confidence, 0.85);
        // sandy in summer: max(1, 0.7)
        assert_eq!(schedule.frequency_days, 1);
    }

    #[test]
    fn frequency_by_season_and_soil() {
        let clay = lawn().with_soil(SoilType::Clay);
        assert_eq!(watering_frequency(&clay, Season::Summer), 3);
        assert_eq!(watering_frequency(&clay, Season::Fall), 6);
        assert_eq!(watering_frequency(&clay, Season::Winter), 7);
        assert_eq!(watering_frequency(&lawn(), Season::Fall), 3);
    }

    #[test]
    fn confidence_without_weather_or_types() {
        let bare = IrrigationZone::new("x", "X", IrrigationMethod::Manual, 5.0);
        assert_eq!(schedule_confidence(&Weather::default(), 0.0, &bare), 0.5);
        assert!((schedule_confidence(&Weather::default(), 20.0, &bare) - 0.65).abs() < 1e-9);
    }

    #[test]
    fn last_watering_date_drives_estimate() {
        let clock = clock(2024, 5, 10);
        let scheduler = IrrigationScheduler::new(&clock);
        let w = weather(20.0, 50.0, 0.0, 0.0);

        let fresh = scheduler.create_schedule(
            &lawn(),
            &w,
            NaiveDate::from_ymd_opt(2024, 5, 10),
            None,
        );
        assert!(!fresh.should_water_today);

        let stale = scheduler.create_schedule(
            &lawn(),
            &w,
            NaiveDate::from_ymd_opt(2024, 5, 1),
            None,
        );
        assert!(stale.should_water_today);
    }

    #[test]
    fn multi_zone_schedules_each_zone() {
        let clock = clock(2024, 6, 1);
        let zones = vec![
            lawn(),
            IrrigationZone::new("beds", "Flower Beds", IrrigationMethod::Drip, 8.0)
                .with_plant(PlantType::Flowers)
                .with_soil(SoilType::Clay),
        ];
        let mut last = HashMap::new();
        last.insert("beds".to_string(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        let schedules = IrrigationScheduler::new(&clock).create_multi_zone_schedule(
            &zones,
            &weather(24.0, 50.0, 0.0, 0.0),
            &last,
        );

        assert_eq!(schedules.len(), 2);
        assert!(schedules["front"].should_water_today);
        assert!(!schedules["beds"].should_water_today);
    }
}
