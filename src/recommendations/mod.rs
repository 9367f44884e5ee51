//! Management recommendations per risk category.
//!
//! The wording is clinical reference text and is kept verbatim.

use serde::Serialize;

use crate::scoring::RiskCategory;

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct RecommendationBundle {
    pub pre_treatment: &'static [&'static str],
    pub treatment: &'static [&'static str],
    pub monitoring: &'static [&'static str],
}

impl RecommendationBundle {
    /// Titled sections in display order
    pub fn sections(&self) -> [(&'static str, &'static [&'static str]); 3] {
        [
            ("Pre-treatment", self.pre_treatment),
            ("Treatment", self.treatment),
            ("Monitoring", self.monitoring),
        ]
    }
}

static LOW_RISK: RecommendationBundle = RecommendationBundle {
    pre_treatment: &[
        "Standard pre-treatment workup",
        "Consider single-session treatment",
        "Standard liver function assessment",
        "Optional multidisciplinary review",
    ],
    treatment: &[
        "Target dose: 120-150 Gy",
        "Consider whole-lobe treatment if indicated",
        "Standard personalized dosimetry",
        "Single-session approach preferred",
        "Consider selective/superselective approach",
    ],
    monitoring: &[
        "Follow-up imaging at 3 months",
        "Liver function tests every 4-6 weeks",
        "Consider AFP monitoring q3 months",
        "Standard toxicity monitoring",
    ],
};

static INTERMEDIATE_RISK: RecommendationBundle = RecommendationBundle {
    pre_treatment: &[
        "Mandatory multidisciplinary review",
        "Detailed vascular mapping",
        "Consider advanced liver function testing",
        "Assess portal vein flow dynamics",
        "Consider pre-treatment portal vein embolization",
    ],
    treatment: &[
        "Target dose: 100-120 Gy",
        "Sequential lobar treatment recommended",
        "Consider radiation segmentectomy for small lesions",
        "Personalized dosimetry mandatory",
        "Consider prophylactic antibiotics",
    ],
    monitoring: &[
        "Early follow-up imaging (6-8 weeks)",
        "Liver function tests every 2-3 weeks",
        "Monthly AFP monitoring",
        "Enhanced toxicity monitoring",
        "Consider admission for first treatment",
    ],
};

static HIGH_RISK: RecommendationBundle = RecommendationBundle {
    pre_treatment: &[
        "Extensive pre-treatment evaluation",
        "Full performance status assessment",
        "Detailed quality of life assessment",
        "Consider alternative treatments",
        "Mandatory portal pressure assessment",
        "Detailed nutritional assessment",
    ],
    treatment: &[
        "Target dose: 80-100 Gy",
        "Selective/superselective approach mandatory",
        "Sequential treatment with 4-6 week interval",
        "Consider dose reduction",
        "Prophylactic antibiotics mandatory",
        "Consider systemic therapy combination",
    ],
    monitoring: &[
        "Weekly monitoring first month",
        "Imaging at 4-6 weeks",
        "Biweekly liver function tests",
        "Consider hospital admission",
        "Enhanced toxicity monitoring",
        "Early palliative care consultation",
    ],
};

pub fn recommendations_for(category: RiskCategory) -> &'static RecommendationBundle {
    match category {
        RiskCategory::Low => &LOW_RISK,
        RiskCategory::Intermediate => &INTERMEDIATE_RISK,
        RiskCategory::High => &HIGH_RISK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_three_populated_sections() {
        for category in RiskCategory::ALL {
            let bundle = recommendations_for(category);
            for (title, items) in bundle.sections() {
                assert!(!items.is_empty(), "{} / {} is empty", category, title);
            }
        }
    }

    #[test]
    fn test_section_order() {
        let titles: Vec<&str> = recommendations_for(RiskCategory::Low)
            .sections()
            .iter()
            .map(|(t, _)| *t)
            .collect();
        assert_eq!(titles, vec!["Pre-treatment", "Treatment", "Monitoring"]);
    }

    #[test]
    fn test_low_risk_text() {
        let bundle = recommendations_for(RiskCategory::Low);
        assert_eq!(bundle.pre_treatment.len(), 4);
        assert_eq!(bundle.treatment.len(), 5);
        assert_eq!(bundle.monitoring.len(), 4);
        assert_eq!(bundle.treatment[0], "Target dose: 120-150 Gy");
        assert_eq!(bundle.monitoring[2], "Consider AFP monitoring q3 months");
    }

    #[test]
    fn test_intermediate_risk_text() {
        let bundle = recommendations_for(RiskCategory::Intermediate);
        assert_eq!(bundle.pre_treatment[0], "Mandatory multidisciplinary review");
        assert_eq!(bundle.treatment[0], "Target dose: 100-120 Gy");
        assert_eq!(bundle.monitoring[0], "Early follow-up imaging (6-8 weeks)");
        assert_eq!(bundle.monitoring.len(), 5);
    }

    #[test]
    fn test_high_risk_text() {
        let bundle = recommendations_for(RiskCategory::High);
        assert_eq!(bundle.pre_treatment.len(), 6);
        assert_eq!(bundle.treatment.len(), 6);
        assert_eq!(bundle.monitoring.len(), 6);
        assert_eq!(bundle.treatment[0], "Target dose: 80-100 Gy");
        assert_eq!(bundle.monitoring[5], "Early palliative care consultation");
    }

    #[test]
    fn test_bundles_are_distinct() {
        assert_ne!(
            recommendations_for(RiskCategory::Low),
            recommendations_for(RiskCategory::High)
        );
    }

    #[test]
    fn test_serializes_section_names() {
        let json = serde_json::to_value(recommendations_for(RiskCategory::Low)).unwrap();
        assert!(json.get("pre_treatment").is_some());
        assert_eq!(json["treatment"][0], "Target dose: 120-150 Gy");
    }
}
