mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use watersaver::config::Config;
use watersaver::models::{UsageRecord, Weather};
use watersaver::{
    AdvisoryContext, Clock, FixedClock, IrrigationScheduler, PatternAnalyzer, PredictionEngine,
    RecommendationEngine, SystemClock,
};

/// A weather file holds either one snapshot or one snapshot per day.
#[derive(Deserialize)]
#[serde(untagged)]
enum WeatherInput {
    Daily(Vec<Weather>),
    Single(Weather),
}

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let clock: Box<dyn Clock> = match cli.today {
        Some(date) => Box::new(FixedClock::on(date)),
        None => Box::new(SystemClock),
    };

    match cli.command {
        Some(Commands::Analyze { history }) => {
            let config = optional_config(cli.config)?;
            let records = load_history(&history, config.max_history_days)?;
            print_json(&PatternAnalyzer::new().analyze(&records))
        }
        Some(Commands::Predict {
            history,
            weather,
            week,
        }) => {
            let config = optional_config(cli.config)?;
            let records = load_history(&history, config.max_history_days)?;
            let engine = PredictionEngine::new();

            if week {
                let forecasts = match weather {
                    Some(path) => match read_json::<WeatherInput>(&path)? {
                        WeatherInput::Daily(days) => Some(days),
                        WeatherInput::Single(w) => Some(vec![w; 7]),
                    },
                    None => None,
                };
                print_json(&engine.predict_weekly(
                    &records,
                    forecasts.as_deref(),
                    clock.as_ref(),
                ))
            } else {
                let forecast = weather.map(|p| read_json::<Weather>(&p)).transpose()?;
                print_json(&engine.predict_daily(&records, forecast.as_ref(), None))
            }
        }
        Some(Commands::Schedule {
            weather,
            zone,
            moisture,
        }) => {
            let config = Config::load(cli.config)?;
            let weather: Weather = read_json(&weather)?;
            let scheduler = IrrigationScheduler::new(clock.as_ref());
            let last_watered = config.last_watered();

            let zones = match zone {
                Some(id) => vec![config.zone(&id)?],
                None => config.zones()?,
            };
            if zones.is_empty() {
                bail!("No zones configured. Run `watersaver init` to add one.");
            }

            let schedules = match moisture {
                None => scheduler.create_multi_zone_schedule(&zones, &weather, &last_watered),
                Some(pct) => zones
                    .iter()
                    .map(|z| {
                        let last = last_watered.get(&z.zone_id).copied();
                        (
                            z.zone_id.clone(),
                            scheduler.create_schedule(z, &weather, last, Some(pct)),
                        )
                    })
                    .collect::<BTreeMap<_, _>>(),
            };
            print_json(&schedules)
        }
        Some(Commands::Advise {
            history,
            weather,
            zone,
        }) => {
            let config = optional_config(cli.config)?;
            let records = load_history(&history, config.max_history_days)?;
            let weather = weather.map(|p| read_json::<Weather>(&p)).transpose()?;

            let pattern = PatternAnalyzer::new().analyze(&records).into_value();
            let prediction = PredictionEngine::new()
                .predict_daily(&records, weather.as_ref(), None)
                .into_value();

            let schedule = match &zone {
                Some(id) => {
                    let zone = config.zone(id)?;
                    let last = config.last_watered().get(id).copied();
                    let snapshot = weather.clone().unwrap_or_default();
                    Some(
                        IrrigationScheduler::new(clock.as_ref())
                            .create_schedule(&zone, &snapshot, last, None),
                    )
                }
                None => None,
            };

            let mut ctx = AdvisoryContext::new(clock.now())
                .with_pattern(&pattern)
                .with_prediction(&prediction);
            if let Some(w) = &weather {
                ctx = ctx.with_weather(w);
            }
            if let Some(s) = &schedule {
                ctx = ctx.with_schedule(s);
            }

            let engine = RecommendationEngine::new();
            let recommendations = engine.generate(&ctx);
            let summary = engine.summarize(&recommendations, clock.as_ref());

            print_json(&serde_json::json!({
                "recommendations": recommendations,
                "summary": summary,
            }))
        }
        Some(Commands::Init) => {
            let (config, path) = Config::setup_interactive()?;
            println!(
                "Wrote {} zone(s) to {}",
                config.zones.len(),
                path.display()
            );
            Ok(())
        }
        Some(Commands::Check) => run_check(cli.config),
        None => {
            if !Config::exists(cli.config.as_ref()) {
                println!("No configuration found. Run `watersaver init` to set up.");
            } else {
                println!("Run `watersaver --help` to see available commands.");
            }
            Ok(())
        }
    }
}

fn run_check(config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path).context("Configuration check failed")?;
    let zones = config.zones()?;

    println!("Configuration OK");
    println!("  History window: {} days", config.max_history_days);
    println!("  Zones: {}", zones.len());
    for zone in &zones {
        println!(
            "    {} ({}): {} m², {}, {}, {} sun{}",
            zone.zone_id,
            zone.name,
            zone.area_sqm,
            zone.plant_type.map(|p| p.as_str()).unwrap_or("unspecified plant"),
            zone.irrigation_method,
            zone.sun_exposure,
            if zone.is_fully_described() {
                ""
            } else {
                " [incomplete]"
            }
        );
    }

    Ok(())
}

/// Config is only needed for the history window here, so a missing file is fine.
fn optional_config(config_path: Option<PathBuf>) -> Result<Config> {
    if Config::exists(config_path.as_ref()) {
        return Ok(Config::load(config_path)?);
    }
    tracing::debug!("No config found, using defaults");
    Ok(Config::from_yaml("{}")?)
}

/// Newest records first, capped at `max_days`.
fn load_history(path: &Path, max_days: usize) -> Result<Vec<UsageRecord>> {
    let mut records: Vec<UsageRecord> = read_json(path)?;
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records.truncate(max_days);
    tracing::debug!(records = records.len(), "Loaded usage history");
    Ok(records)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
