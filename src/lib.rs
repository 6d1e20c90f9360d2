//! Water-saving decision engine.
//!
//! Turns a daily usage history, a weather snapshot and irrigation zone
//! descriptions into a usage pattern, a usage prediction, per-zone watering
//! schedules and a ranked list of conservation recommendations. All engine
//! entry points are pure computations over their inputs plus an injected
//! [`clock::Clock`].

pub mod clock;
pub mod config;
pub mod error;
pub mod logic;
pub mod models;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Result, WaterSaverError};
pub use logic::{
    AdvisoryContext, IrrigationScheduler, PatternAnalyzer, PredictionEngine, RecommendationEngine,
};
