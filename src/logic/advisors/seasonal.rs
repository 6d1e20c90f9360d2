use super::{AdvisoryContext, Advisor};
use crate::clock::Season;
use crate::models::{Priority, Recommendation, RecommendationType};
use chrono::Datelike;

/// Seasonal advisor - exactly one tip for the current month's season
pub struct SeasonalAdvisor;

impl Advisor for SeasonalAdvisor {
    fn id(&self) -> &'static str {
        "seasonal"
    }

    fn name(&self) -> &'static str {
        "Seasonal Advice"
    }

    fn advise(&self, ctx: &AdvisoryContext) -> Vec<Recommendation> {
        let season = Season::from_month(ctx.now.month());
        vec![seasonal_tip(season)]
    }
}

fn seasonal_tip(season: Season) -> Recommendation {
    let rec = match season {
        Season::Summer => Recommendation::new(
            "rec_seasonal_summer",
            RecommendationType::SeasonalAdvice,
            Priority::Medium,
            "Summer Water Conservation Tips",
            "Peak watering season - optimize for efficiency",
        )
        .with_actions([
            "Water deeply but less frequently to encourage deep roots",
            "Apply 2-4 inches of mulch around plants",
            "Water early morning (5-8 AM) to reduce evaporation",
            "Consider drought-resistant plants for new landscaping",
            "Use rain barrels to collect and reuse water",
        ])
        .with_savings(100.0 * 30.0, 15.0)
        .with_reasoning("Summer strategies maximize efficiency during high-demand period")
        .with_confidence(0.8),

        Season::Fall => Recommendation::new(
            "rec_seasonal_fall",
            RecommendationType::SeasonalAdvice,
            Priority::Medium,
            "Fall Watering Adjustments",
            "Reduce watering as temperatures cool",
        )
        .with_actions([
            "Gradually reduce watering frequency",
            "Prepare irrigation system for winter",
            "Focus watering on newly planted trees and shrubs",
            "Drain hoses and irrigation lines before first freeze",
        ])
        .with_savings(75.0 * 30.0, 20.0)
        .with_reasoning("Plants need less water as they prepare for dormancy")
        .with_confidence(0.75),

        Season::Winter => Recommendation::new(
            "rec_seasonal_winter",
            RecommendationType::SeasonalAdvice,
            Priority::Low,
            "Winter Water Conservation",
            "Minimal watering needed in dormant season",
        )
        .with_actions([
            "Water only during warm spells (above 4°C)",
            "Focus on evergreens and new plantings",
            "Water mid-day when temperatures are warmest",
            "Inspect system for freeze damage",
        ])
        .with_savings(120.0 * 30.0, 40.0)
        .with_reasoning("Most plants are dormant and require minimal water")
        .with_confidence(0.85),

        Season::Spring => Recommendation::new(
            "rec_seasonal_spring",
            RecommendationType::SeasonalAdvice,
            Priority::Medium,
            "Spring Watering Preparation",
            "Prepare for growing season",
        )
        .with_actions([
            "Gradually increase watering as growth resumes",
            "Inspect and repair irrigation system",
            "Apply fresh mulch before temperatures rise",
            "Adjust sprinkler heads and check for leaks",
            "Consider installing rain sensors",
        ])
        .with_savings(50.0 * 30.0, 12.0)
        .with_reasoning("Spring preparation ensures efficient summer watering")
        .with_confidence(0.75),
    };

    rec.with_metadata("season", season.as_str())
}
