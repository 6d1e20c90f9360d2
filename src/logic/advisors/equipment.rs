use super::{AdvisoryContext, Advisor};
use crate::logic::calculations::round_to;
use crate::models::{Priority, Recommendation, RecommendationType};

/// Daily usage assumed when no pattern is available, in litres.
const ASSUMED_DAILY_L: f64 = 200.0;
const DRIP_UPGRADE_DAILY_L: f64 = 250.0;

/// Equipment advisor - always suggests a smart controller, plus drip
/// irrigation for heavy users.
pub struct EquipmentAdvisor;

impl Advisor for EquipmentAdvisor {
    fn id(&self) -> &'static str {
        "equipment"
    }

    fn name(&self) -> &'static str {
        "Equipment Suggestions"
    }

    fn advise(&self, ctx: &AdvisoryContext) -> Vec<Recommendation> {
        let avg = ctx
            .pattern
            .map(|p| p.average_daily)
            .unwrap_or(ASSUMED_DAILY_L);

        let mut recs = Vec::new();

        if avg > DRIP_UPGRADE_DAILY_L {
            recs.push(
                Recommendation::new(
                    "rec_equipment_drip",
                    RecommendationType::EquipmentSuggestion,
                    Priority::Medium,
                    "Consider Drip Irrigation System",
                    "Drip irrigation can reduce water usage by 30-50%",
                )
                .with_actions([
                    "Research drip irrigation systems for your garden size",
                    "Get quotes from irrigation professionals",
                    "Start with high-use zones first",
                    "Consider DIY kits for smaller areas",
                ])
                .with_savings(round_to(avg * 0.4 * 30.0, 1), 40.0)
                .with_reasoning(
                    "Drip irrigation delivers water directly to roots with 90% efficiency",
                )
                .with_confidence(0.8)
                .with_metadata("current_usage", avg)
                .with_metadata("upgrade", "drip"),
            );
        }

        recs.push(
            Recommendation::new(
                "rec_equipment_controller",
                RecommendationType::EquipmentSuggestion,
                Priority::Low,
                "Upgrade to Smart Irrigation Controller",
                "Weather-based controllers automatically adjust watering",
            )
            .with_actions([
                "Research EPA WaterSense certified controllers",
                "Look for models with weather integration",
                "Consider soil moisture sensor integration",
                "Check for utility rebates on smart controllers",
            ])
            .with_savings(75.0 * 30.0, 25.0)
            .with_reasoning("Smart controllers optimize watering based on real-time conditions")
            .with_confidence(0.75)
            .with_metadata("upgrade", "smart_controller"),
        );

        recs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UsagePattern;
    use chrono::NaiveDate;

    fn now() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn controller_always_suggested() {
        let recs = EquipmentAdvisor.advise(&AdvisoryContext::new(now()));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].id, "rec_equipment_controller");
        assert_eq!(recs[0].priority, Priority::Low);
        assert_eq!(recs[0].estimated_savings_liters, 2250.0);
    }

    #[test]
    fn heavy_users_get_drip_suggestion() {
        let pattern = UsagePattern {
            average_daily: 300.0,
            ..UsagePattern::default()
        };
        let recs = EquipmentAdvisor.advise(&AdvisoryContext::new(now()).with_pattern(&pattern));
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id, "rec_equipment_drip");
        assert_eq!(recs[0].estimated_savings_liters, 3600.0);
    }

    #[test]
    fn boundary_usage_skips_drip() {
        let pattern = UsagePattern {
            average_daily: 250.0,
            ..UsagePattern::default()
        };
        let recs = EquipmentAdvisor.advise(&AdvisoryContext::new(now()).with_pattern(&pattern));
        assert_eq!(recs.len(), 1);
    }
}
