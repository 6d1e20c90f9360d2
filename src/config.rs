use crate::error::{Result, WaterSaverError};
use crate::models::{IrrigationMethod, IrrigationZone, PlantType, SoilType, SunExposure};
use chrono::NaiveDate;
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

const APP_DIR: &str = "watersaver";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
    /// Most recent usage records passed to the engine.
    #[serde(default = "default_max_history_days")]
    pub max_history_days: usize,
}

fn default_max_history_days() -> usize {
    30
}

/// A zone as written in config.yaml. Categories stay strings until
/// [`ZoneConfig::to_zone`] validates them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    pub zone_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    pub area_sqm: f64,
    pub irrigation_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun_exposure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_watered: Option<NaiveDate>,
}

impl ZoneConfig {
    /// Unknown plant, soil or sun values are logged and left unset. A bad
    /// irrigation method, empty id or non-positive area is an error.
    pub fn to_zone(&self) -> Result<IrrigationZone> {
        let zone_id = self.zone_id.trim();
        if zone_id.is_empty() {
            return Err(WaterSaverError::Config(format!(
                "zone '{}' has an empty zone_id",
                self.name
            )));
        }

        if !(self.area_sqm > 0.0) {
            return Err(WaterSaverError::Config(format!(
                "zone '{}' area_sqm must be positive, got {}",
                zone_id, self.area_sqm
            )));
        }

        let method = IrrigationMethod::from_str(&self.irrigation_method).ok_or_else(|| {
            WaterSaverError::Config(format!(
                "zone '{}' has unknown irrigation_method '{}'",
                zone_id, self.irrigation_method
            ))
        })?;

        let mut zone = IrrigationZone::new(zone_id, self.name.clone(), method, self.area_sqm);

        if let Some(raw) = &self.plant_type {
            match PlantType::from_str(raw) {
                Some(plant) => zone = zone.with_plant(plant),
                None => tracing::warn!(zone = zone_id, plant_type = %raw, "Unknown plant type"),
            }
        }

        if let Some(raw) = &self.soil_type {
            match SoilType::from_str(raw) {
                Some(soil) => zone = zone.with_soil(soil),
                None => tracing::warn!(zone = zone_id, soil_type = %raw, "Unknown soil type"),
            }
        }

        if let Some(raw) = &self.sun_exposure {
            match SunExposure::from_str(raw) {
                Some(sun) => zone = zone.with_sun(sun),
                None => tracing::warn!(zone = zone_id, sun_exposure = %raw, "Unknown sun exposure"),
            }
        }

        Ok(zone)
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(WaterSaverError::Config(format!(
                "Config file not found at {:?}. Run `watersaver init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| WaterSaverError::Config(format!("Failed to read config: {}", e)))?;

        tracing::debug!(path = %config_path.display(), "Loading config");
        Self::from_yaml(&config_str)
    }

    /// Parse and validate config text, substituting `${VAR}` references first.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| WaterSaverError::Config(format!("Failed to parse config: {}", e)))?;

        config.zones()?;
        Ok(config)
    }

    /// Validated engine zones, in file order.
    pub fn zones(&self) -> Result<Vec<IrrigationZone>> {
        let mut seen = HashSet::new();
        let mut zones = Vec::with_capacity(self.zones.len());

        for zc in &self.zones {
            let zone = zc.to_zone()?;
            if !seen.insert(zone.zone_id.clone()) {
                return Err(WaterSaverError::Config(format!(
                    "duplicate zone_id '{}'",
                    zone.zone_id
                )));
            }
            zones.push(zone);
        }

        Ok(zones)
    }

    pub fn zone(&self, zone_id: &str) -> Result<IrrigationZone> {
        self.zones
            .iter()
            .find(|z| z.zone_id.trim() == zone_id)
            .ok_or_else(|| WaterSaverError::NotFound(format!("zone '{}'", zone_id)))?
            .to_zone()
    }

    /// Last watering date per zone, for zones that record one.
    pub fn last_watered(&self) -> HashMap<String, NaiveDate> {
        self.zones
            .iter()
            .filter_map(|z| z.last_watered.map(|d| (z.zone_id.trim().to_string(), d)))
            .collect()
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/watersaver/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WaterSaverError::Config("Cannot determine config directory".into()))?
            .join(APP_DIR);
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's describe your first irrigation zone.");
        println!();

        let zone_id: String = Input::new()
            .with_prompt("  Zone id")
            .default("front_lawn".into())
            .interact_text()
            .map_err(input_error)?;

        let name: String = Input::new()
            .with_prompt("  Zone name")
            .default("Front Lawn".into())
            .interact_text()
            .map_err(input_error)?;

        let plant = PlantType::all()[pick("  Plant type", PlantType::all())?];
        let soil = SoilType::all()[pick("  Soil type", SoilType::all())?];
        let method = IrrigationMethod::all()[pick("  Irrigation method", IrrigationMethod::all())?];
        let sun = SunExposure::all()[pick("  Sun exposure", SunExposure::all())?];

        let area_sqm: f64 = Input::new()
            .with_prompt("  Area (m²)")
            .default(50.0)
            .validate_with(|v: &f64| {
                if *v > 0.0 {
                    Ok(())
                } else {
                    Err("area must be positive")
                }
            })
            .interact_text()
            .map_err(input_error)?;

        println!();

        let config = Config {
            zones: vec![ZoneConfig {
                zone_id,
                name,
                plant_type: Some(plant.as_str().into()),
                soil_type: Some(soil.as_str().into()),
                area_sqm,
                irrigation_method: method.as_str().into(),
                sun_exposure: Some(sun.as_str().into()),
                last_watered: None,
            }],
            max_history_days: default_max_history_days(),
        };
        config.zones()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| WaterSaverError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# WaterSaver Configuration\n# Generated by `watersaver init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| WaterSaverError::Config(format!("Bad substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

fn pick<T: std::fmt::Display>(prompt: &str, options: &[T]) -> Result<usize> {
    let labels: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .map_err(input_error)
}

fn input_error(e: dialoguer::Error) -> WaterSaverError {
    WaterSaverError::Config(format!("Input error: {}", e))
}
