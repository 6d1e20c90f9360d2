use serde::{Deserialize, Serialize};

/// Weekly water need assumed for a zone whose plant type is not set.
pub const DEFAULT_WEEKLY_NEED_MM: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantType {
    Lawn,
    Flowers,
    Vegetables,
    Shrubs,
    Trees,
    Succulents,
}

impl PlantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantType::Lawn => "lawn",
            PlantType::Flowers => "flowers",
            PlantType::Vegetables => "vegetables",
            PlantType::Shrubs => "shrubs",
            PlantType::Trees => "trees",
            PlantType::Succulents => "succulents",
        }
    }

    /// Water requirement in mm per week.
    pub fn weekly_need_mm(&self) -> f64 {
        match self {
            PlantType::Lawn => 25.0,
            PlantType::Flowers => 30.0,
            PlantType::Vegetables => 35.0,
            PlantType::Shrubs => 20.0,
            PlantType::Trees => 15.0,
            PlantType::Succulents => 5.0,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lawn" | "grass" | "turf" => Some(PlantType::Lawn),
            "flowers" | "flower" => Some(PlantType::Flowers),
            "vegetables" | "vegetable" | "veg" => Some(PlantType::Vegetables),
            "shrubs" | "shrub" => Some(PlantType::Shrubs),
            "trees" | "tree" => Some(PlantType::Trees),
            "succulents" | "succulent" => Some(PlantType::Succulents),
            _ => None,
        }
    }

    pub fn all() -> &'static [PlantType] {
        &[
            PlantType::Lawn,
            PlantType::Flowers,
            PlantType::Vegetables,
            PlantType::Shrubs,
            PlantType::Trees,
            PlantType::Succulents,
        ]
    }
}

impl std::fmt::Display for PlantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Sandy,
    Loam,
    Clay,
}

impl SoilType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Sandy => "sandy",
            SoilType::Loam => "loam",
            SoilType::Clay => "clay",
        }
    }

    /// Days moisture persists before the soil is treated as dry.
    pub fn retention_days(&self) -> i64 {
        match self {
            SoilType::Sandy => 1,
            SoilType::Loam => 3,
            SoilType::Clay => 5,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sandy" | "sand" => Some(SoilType::Sandy),
            "loam" => Some(SoilType::Loam),
            "clay" => Some(SoilType::Clay),
            _ => None,
        }
    }

    pub fn all() -> &'static [SoilType] {
        &[SoilType::Sandy, SoilType::Loam, SoilType::Clay]
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationMethod {
    Sprinkler,
    Drip,
    SoakerHose,
    Manual,
}

impl IrrigationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationMethod::Sprinkler => "sprinkler",
            IrrigationMethod::Drip => "drip",
            IrrigationMethod::SoakerHose => "soaker_hose",
            IrrigationMethod::Manual => "manual",
        }
    }

    /// Fraction of delivered water that reaches the root zone.
    pub fn efficiency(&self) -> f64 {
        match self {
            IrrigationMethod::Sprinkler => 0.60,
            IrrigationMethod::Drip => 0.90,
            IrrigationMethod::SoakerHose => 0.80,
            IrrigationMethod::Manual => 0.70,
        }
    }

    /// Typical flow rate in litres per minute.
    pub fn flow_rate_lpm(&self) -> f64 {
        match self {
            IrrigationMethod::Sprinkler => 15.0,
            IrrigationMethod::Drip => 4.0,
            IrrigationMethod::SoakerHose => 8.0,
            IrrigationMethod::Manual => 10.0,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sprinkler" => Some(IrrigationMethod::Sprinkler),
            "drip" => Some(IrrigationMethod::Drip),
            "soaker_hose" | "soakerhose" | "soaker hose" | "soaker" => {
                Some(IrrigationMethod::SoakerHose)
            }
            "manual" | "hose" | "hand" => Some(IrrigationMethod::Manual),
            _ => None,
        }
    }

    pub fn all() -> &'static [IrrigationMethod] {
        &[
            IrrigationMethod::Sprinkler,
            IrrigationMethod::Drip,
            IrrigationMethod::SoakerHose,
            IrrigationMethod::Manual,
        ]
    }
}

impl std::fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SunExposure {
    Full,
    #[default]
    Partial,
    Shade,
}

impl SunExposure {
    pub fn as_str(&self) -> &'static str {
        match self {
            SunExposure::Full => "full",
            SunExposure::Partial => "partial",
            SunExposure::Shade => "shade",
        }
    }

    /// Multiplier applied to the evapotranspiration rate.
    pub fn et_factor(&self) -> f64 {
        match self {
            SunExposure::Full => 1.2,
            SunExposure::Partial => 1.0,
            SunExposure::Shade => 0.7,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "full" | "full sun" => Some(SunExposure::Full),
            "partial" | "part" | "partial shade" => Some(SunExposure::Partial),
            "shade" | "full shade" => Some(SunExposure::Shade),
            _ => None,
        }
    }

    pub fn all() -> &'static [SunExposure] {
        &[SunExposure::Full, SunExposure::Partial, SunExposure::Shade]
    }
}

impl std::fmt::Display for SunExposure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An irrigation zone as described by configuration.
///
/// Plant and soil type may be unset; the scheduler then falls back to a
/// 25 mm/week need and loam retention and lowers its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationZone {
    pub zone_id: String,
    pub name: String,
    pub plant_type: Option<PlantType>,
    pub soil_type: Option<SoilType>,
    pub area_sqm: f64,
    pub irrigation_method: IrrigationMethod,
    #[serde(default)]
    pub sun_exposure: SunExposure,
}

impl IrrigationZone {
    pub fn new(
        zone_id: impl Into<String>,
        name: impl Into<String>,
        irrigation_method: IrrigationMethod,
        area_sqm: f64,
    ) -> Self {
        Self {
            zone_id: zone_id.into(),
            name: name.into(),
            plant_type: None,
            soil_type: None,
            area_sqm,
            irrigation_method,
            sun_exposure: SunExposure::default(),
        }
    }

    pub fn with_plant(mut self, plant_type: PlantType) -> Self {
        self.plant_type = Some(plant_type);
        self
    }

    pub fn with_soil(mut self, soil_type: SoilType) -> Self {
        self.soil_type = Some(soil_type);
        self
    }

    pub fn with_sun(mut self, sun_exposure: SunExposure) -> Self {
        self.sun_exposure = sun_exposure;
        self
    }

    pub fn weekly_need_mm(&self) -> f64 {
        self.plant_type
            .map(|p| p.weekly_need_mm())
            .unwrap_or(DEFAULT_WEEKLY_NEED_MM)
    }

    pub fn retention_days(&self) -> i64 {
        self.soil_type.unwrap_or(SoilType::Loam).retention_days()
    }

    pub fn is_fully_described(&self) -> bool {
        self.plant_type.is_some() && self.soil_type.is_some()
    }
}
