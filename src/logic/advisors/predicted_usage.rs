use super::{AdvisoryContext, Advisor};
use crate::logic::calculations::round_to;
use crate::models::{PredictionResult, Priority, Recommendation, RecommendationType};

const HIGH_USAGE_L: f64 = 200.0;
const MIN_WARNING_CONFIDENCE: f64 = 0.6;
const NOTABLE_SAVINGS_L: f64 = 30.0;

/// Prediction advisor - warns ahead of heavy days and flags savings gaps
pub struct PredictedUsageAdvisor;

impl Advisor for PredictedUsageAdvisor {
    fn id(&self) -> &'static str {
        "predicted_usage"
    }

    fn name(&self) -> &'static str {
        "Predicted Usage"
    }

    fn advise(&self, ctx: &AdvisoryContext) -> Vec<Recommendation> {
        let Some(prediction) = ctx.prediction else {
            return Vec::new();
        };

        let mut recs = Vec::new();

        if prediction.predicted_usage > HIGH_USAGE_L
            && prediction.confidence > MIN_WARNING_CONFIDENCE
        {
            recs.push(high_usage_warning(ctx, prediction));
        }

        if prediction.savings_potential > NOTABLE_SAVINGS_L {
            recs.push(savings_gap(ctx, prediction));
        }

        recs
    }
}

fn high_usage_warning(ctx: &AdvisoryContext, prediction: &PredictionResult) -> Recommendation {
    let predicted = prediction.predicted_usage;

    Recommendation::new(
        ctx.rec_id("prediction"),
        RecommendationType::PredictiveWarning,
        Priority::High,
        "High Water Usage Predicted Tomorrow",
        format!(
            "Predicted usage: {:.1}L (confidence: {:.0}%)",
            predicted,
            prediction.confidence * 100.0
        ),
    )
    .with_actions([
        "Pre-check weather forecast before watering",
        "Reduce watering duration if rain expected",
        "Skip watering if soil is already moist",
        "Consider splitting watering into two shorter sessions",
    ])
    .with_savings(round_to(predicted * 0.2, 1), 20.0)
    .with_reasoning("Predictive analytics suggests unusually high usage tomorrow")
    .with_confidence(prediction.confidence)
    .valid_until(ctx.days_ahead(1))
    .with_metadata("predicted_usage", predicted)
}

fn savings_gap(ctx: &AdvisoryContext, prediction: &PredictionResult) -> Recommendation {
    let daily = prediction.savings_potential;

    Recommendation::new(
        ctx.rec_id("savings"),
        RecommendationType::EfficiencyImprovement,
        Priority::Medium,
        "Significant Water Savings Possible",
        format!("You could save {:.1}L per day with optimizations", daily),
    )
    .with_actions([
        "Follow the recommended watering schedule",
        "Water only when soil moisture is low",
        "Use weather-based scheduling",
        "Implement zone-based watering",
    ])
    .with_savings(round_to(daily * 30.0, 1), 30.0)
    .with_reasoning("Analysis shows gap between actual and optimal usage")
    .with_confidence(0.75)
    .with_metadata("daily_savings_potential", daily)
}
