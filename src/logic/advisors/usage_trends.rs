use super::{AdvisoryContext, Advisor};
use crate::logic::calculations::round_to;
use crate::models::{Priority, Recommendation, RecommendationType, Trend, UsagePattern};
use serde_json::json;

/// Usage pattern advisor - reacts to the analysed usage history
///
/// Conditions:
/// - Increasing trend: high-priority efficiency improvement (15% over 30 days)
/// - More than one high-severity anomaly: critical anomaly alert
/// - Efficiency score below 50: medium efficiency tip
pub struct UsageTrendsAdvisor;

impl Advisor for UsageTrendsAdvisor {
    fn id(&self) -> &'static str {
        "usage_trends"
    }

    fn name(&self) -> &'static str {
        "Usage Trends"
    }

    fn advise(&self, ctx: &AdvisoryContext) -> Vec<Recommendation> {
        let Some(pattern) = ctx.pattern else {
            return Vec::new();
        };

        let mut recs = Vec::new();

        if pattern.trend == Trend::Increasing {
            recs.push(self.rising_usage(ctx, pattern));
        }

        if let Some(rec) = self.anomaly_alert(ctx, pattern) {
            recs.push(rec);
        }

        if pattern.efficiency_score < 50.0 {
            recs.push(self.low_efficiency(ctx, pattern));
        }

        recs
    }
}

impl UsageTrendsAdvisor {
    fn rising_usage(&self, ctx: &AdvisoryContext, pattern: &UsagePattern) -> Recommendation {
        let avg = pattern.average_daily;

        Recommendation::new(
            ctx.rec_id("trend"),
            RecommendationType::EfficiencyImprovement,
            Priority::High,
            "Rising Water Usage Detected",
            format!(
                "Your water usage has been increasing. Current average: {:.1}L/day",
                avg
            ),
        )
        .with_actions([
            "Review your watering schedule for inefficiencies",
            "Check for leaks in irrigation system",
            "Consider switching to drip irrigation",
            "Reduce watering duration by 10-15%",
        ])
        .with_savings(round_to(avg * 0.15 * 30.0, 1), 15.0)
        .with_reasoning(
            "Increasing usage trends often indicate schedule drift or system inefficiencies",
        )
        .with_confidence(0.8)
        .valid_until(ctx.days_ahead(7))
        .with_metadata("trend", pattern.trend.as_str())
        .with_metadata("current_avg", avg)
    }

    fn anomaly_alert(
        &self,
        ctx: &AdvisoryContext,
        pattern: &UsagePattern,
    ) -> Option<Recommendation> {
        let high: Vec<_> = pattern.high_severity_anomalies().collect();
        // A single spike is left to the efficiency score
        if high.len() <= 1 {
            return None;
        }

        let excess: f64 = high.iter().map(|a| a.deviation).sum();
        let details: Vec<serde_json::Value> = high
            .iter()
            .map(|a| {
                json!({
                    "date": a.date,
                    "usage": a.usage,
                    "deviation": a.deviation,
                    "z_score": a.z_score,
                })
            })
            .collect();

        Some(
            Recommendation::new(
                ctx.rec_id("anomaly"),
                RecommendationType::AnomalyAlert,
                Priority::Critical,
                "Unusual Water Usage Detected",
                format!(
                    "Detected {} days with abnormally high water usage",
                    high.len()
                ),
            )
            .with_actions([
                "Inspect irrigation system for malfunctions",
                "Check for stuck valves or timers",
                "Verify automatic schedules are correct",
                "Look for visible leaks",
            ])
            .with_savings(round_to(excess.max(0.0), 1), 25.0)
            .with_reasoning("High usage spikes may indicate system malfunctions or leaks")
            .with_confidence(0.9)
            .valid_until(ctx.days_ahead(3))
            .with_metadata("anomalies", details),
        )
    }

    fn low_efficiency(&self, ctx: &AdvisoryContext, pattern: &UsagePattern) -> Recommendation {
        Recommendation::new(
            ctx.rec_id("efficiency"),
            RecommendationType::EfficiencyImprovement,
            Priority::Medium,
            "Low Water Efficiency Score",
            format!(
                "Your efficiency score is {:.0}/100. There's room for improvement!",
                pattern.efficiency_score
            ),
        )
        .with_actions([
            "Water during early morning (5-8 AM)",
            "Avoid watering on windy days",
            "Use mulch to retain moisture",
            "Group plants by water needs",
            "Upgrade to efficient irrigation methods",
        ])
        .with_savings(50.0 * 30.0, 20.0)
        .with_reasoning("Low efficiency indicates suboptimal watering practices")
        .with_confidence(0.7)
        .with_metadata("efficiency_score", pattern.efficiency_score)
    }
}
