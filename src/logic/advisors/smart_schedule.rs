use super::{AdvisoryContext, Advisor};
use crate::logic::calculations::round_to;
use crate::models::{Priority, Recommendation, RecommendationType};

const NOTABLE_DAILY_SAVINGS_L: f64 = 50.0;

/// Irrigation advisor - credits a computed schedule that beats fixed timing
pub struct SmartScheduleAdvisor;

impl Advisor for SmartScheduleAdvisor {
    fn id(&self) -> &'static str {
        "smart_schedule"
    }

    fn name(&self) -> &'static str {
        "Smart Schedule"
    }

    fn advise(&self, ctx: &AdvisoryContext) -> Vec<Recommendation> {
        let Some(schedule) = ctx.schedule else {
            return Vec::new();
        };

        let savings = schedule.savings_vs_fixed;
        if savings <= NOTABLE_DAILY_SAVINGS_L {
            return Vec::new();
        }

        vec![Recommendation::new(
            ctx.rec_id("smart_schedule"),
            RecommendationType::EfficiencyImprovement,
            Priority::Medium,
            "Smart Scheduling Saves Water",
            format!("Current schedule saves {:.1}L vs fixed timing", savings),
        )
        .with_actions([
            "Continue using smart schedule recommendations",
            "Enable automatic schedule adjustments",
            "Review schedule weekly for optimal savings",
        ])
        .with_savings(round_to(savings * 30.0, 1), 25.0)
        .with_reasoning("Data-driven scheduling outperforms fixed schedules")
        .with_confidence(0.85)
        .with_metadata("daily_savings", savings)]
    }
}
