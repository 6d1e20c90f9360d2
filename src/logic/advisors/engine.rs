use super::{
    equipment::EquipmentAdvisor, predicted_usage::PredictedUsageAdvisor,
    seasonal::SeasonalAdvisor, smart_schedule::SmartScheduleAdvisor,
    usage_trends::UsageTrendsAdvisor, weather_conditions::WeatherConditionsAdvisor,
    AdvisoryContext, Advisor,
};
use crate::clock::Clock;
use crate::logic::calculations::round_to;
use crate::models::{PriorityBreakdown, Recommendation, RecommendationSummary};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Most recommendations handed back from one generation call.
pub const MAX_RECOMMENDATIONS: usize = 10;
const TOP_ACTIONS: usize = 3;

pub struct RecommendationEngine {
    advisors: Vec<Box<dyn Advisor>>,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        let advisors: Vec<Box<dyn Advisor>> = vec![
            Box::new(UsageTrendsAdvisor),
            Box::new(PredictedUsageAdvisor),
            Box::new(WeatherConditionsAdvisor),
            Box::new(SmartScheduleAdvisor),
            Box::new(SeasonalAdvisor),
            Box::new(EquipmentAdvisor),
        ];

        Self { advisors }
    }

    /// Runs every advisor, ranks the results by priority then confidence and
    /// keeps the top ten. Ties keep advisor order.
    pub fn generate(&self, ctx: &AdvisoryContext) -> Vec<Recommendation> {
        let mut recs: Vec<Recommendation> = self
            .advisors
            .iter()
            .flat_map(|advisor| {
                let found = advisor.advise(ctx);
                tracing::debug!(advisor = advisor.id(), count = found.len(), "Advisor ran");
                found
            })
            .collect();

        recs.sort_by(rank);

        if recs.len() > MAX_RECOMMENDATIONS {
            tracing::debug!(
                dropped = recs.len() - MAX_RECOMMENDATIONS,
                "Truncating recommendation list"
            );
            recs.truncate(MAX_RECOMMENDATIONS);
        }

        recs
    }

    pub fn generate_from(&self, advisor_id: &str, ctx: &AdvisoryContext) -> Vec<Recommendation> {
        self.advisors
            .iter()
            .find(|a| a.id() == advisor_id)
            .map(|advisor| advisor.advise(ctx))
            .unwrap_or_default()
    }

    pub fn list_advisors(&self) -> Vec<(&'static str, &'static str)> {
        self.advisors.iter().map(|a| (a.id(), a.name())).collect()
    }

    /// Digest of a recommendation list, expected already ranked.
    pub fn summarize(&self, recs: &[Recommendation], clock: &dyn Clock) -> RecommendationSummary {
        let mut priority_breakdown = PriorityBreakdown::default();
        let mut by_type = BTreeMap::new();

        for rec in recs {
            priority_breakdown.count(rec.priority);
            *by_type.entry(rec.kind).or_insert(0) += 1;
        }

        let total: f64 = recs.iter().map(|r| r.estimated_savings_liters).sum();

        let top_actions = recs
            .iter()
            .take(TOP_ACTIONS)
            .filter_map(|r| r.first_action().map(str::to_string))
            .collect();

        RecommendationSummary {
            total_recommendations: recs.len(),
            estimated_monthly_savings: round_to(total, 1),
            priority_breakdown,
            by_type,
            top_actions,
            generated_at: clock.now(),
        }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Priority descending, then confidence descending.
fn rank(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.priority.rank().cmp(&a.priority.rank()).then_with(|| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    })
}
