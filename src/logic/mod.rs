pub mod advisors;
pub mod calculations;
pub mod pattern;
pub mod prediction;
pub mod scheduler;

pub use advisors::{AdvisoryContext, Advisor, RecommendationEngine};
pub use pattern::PatternAnalyzer;
pub use prediction::PredictionEngine;
pub use scheduler::IrrigationScheduler;
