use serde::Serialize;

use super::factors::{self, StepMatch};
use super::inputs::ClinicalInputs;
use super::risk::Y90rsResult;
use crate::recommendations::{recommendations_for, RecommendationBundle};

/// Highest attainable Y90RS. The published range is 0-23, but the size/volume
/// rule never awards 3 points, so the domain maxima add up to 22.
pub const MAX_SCORE: u32 = 22;

/// Upper end of the published Y90RS range.
pub const SCORE_UPPER_BOUND: u32 = 23;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    TumorBurden,
    Vascular,
    LiverFunction,
    InflammatoryPerformance,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::TumorBurden,
        Domain::Vascular,
        Domain::LiverFunction,
        Domain::InflammatoryPerformance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Domain::TumorBurden => "Tumor Burden",
            Domain::Vascular => "Vascular Status",
            Domain::LiverFunction => "Liver Function/Reserve",
            Domain::InflammatoryPerformance => "Inflammatory/Performance Status",
        }
    }

    pub fn max_points(&self) -> u32 {
        match self {
            Domain::TumorBurden => 7,
            Domain::Vascular => 5,
            Domain::LiverFunction => 6,
            Domain::InflammatoryPerformance => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentScore {
    pub label: &'static str, // e.g. "AFP", "Shunt fraction"
    pub points: u32,
    pub max_points: u32,
    pub description: String, // e.g. "250 ng/mL, matched '<=400' -> +1"
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainScore {
    pub domain: Domain,
    pub components: Vec<ComponentScore>,
}

impl DomainScore {
    pub fn points(&self) -> u32 {
        self.components.iter().map(|c| c.points).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub domains: Vec<DomainScore>,
}

impl ScoreBreakdown {
    pub fn domain(&self, domain: Domain) -> Option<&DomainScore> {
        self.domains.iter().find(|d| d.domain == domain)
    }

    /// Points contributed by a domain (0 if absent)
    pub fn domain_points(&self, domain: Domain) -> u32 {
        self.domain(domain).map(DomainScore::points).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: u32,
    pub breakdown: ScoreBreakdown,
}

fn component(label: &'static str, max_points: u32, shown: String, m: StepMatch) -> ComponentScore {
    ComponentScore {
        label,
        points: m.points,
        max_points,
        description: format!("{}, matched '{}' -> +{}", shown, m.rule, m.points),
    }
}

pub fn calculate_score(inputs: &ClinicalInputs) -> ScoreResult {
    let tumor_burden = DomainScore {
        domain: Domain::TumorBurden,
        components: vec![
            component(
                "Size/volume",
                factors::SIZE_VOLUME_MAX,
                format!("{} cm, {} cc", inputs.tumor_size, inputs.tumor_volume),
                factors::size_volume(inputs.tumor_size, inputs.tumor_volume),
            ),
            component(
                "AFP",
                factors::AFP.max_points(),
                format!("{} ng/mL", inputs.afp),
                factors::AFP.evaluate(inputs.afp),
            ),
        ],
    };

    let portal_points = portal_vein_points(inputs);
    let vascular = DomainScore {
        domain: Domain::Vascular,
        components: vec![
            ComponentScore {
                label: "Portal vein",
                points: portal_points,
                max_points: 3,
                description: format!("{} -> +{}", inputs.portal_vein, portal_points),
            },
            component(
                "Shunt fraction",
                factors::SHUNT_FRACTION.max_points(),
                format!("{}%", inputs.shunt_fraction),
                factors::SHUNT_FRACTION.evaluate(inputs.shunt_fraction),
            ),
        ],
    };

    let liver = DomainScore {
        domain: Domain::LiverFunction,
        components: vec![
            component(
                "MELD 3.0",
                factors::MELD3.max_points(),
                format!("MELD {}", inputs.meld3),
                factors::MELD3.evaluate(f64::from(inputs.meld3)),
            ),
            component(
                "Albumin",
                factors::ALBUMIN.max_points(),
                format!("{} g/L", inputs.albumin),
                factors::ALBUMIN.evaluate(inputs.albumin),
            ),
            component(
                "ALT/AST ratio",
                factors::ALT_AST_RATIO.max_points(),
                format!("ratio {}", inputs.alt_ast_ratio),
                factors::ALT_AST_RATIO.evaluate(inputs.alt_ast_ratio),
            ),
        ],
    };

    let inflammatory = DomainScore {
        domain: Domain::InflammatoryPerformance,
        components: vec![
            component(
                "NLR",
                factors::NLR.max_points(),
                format!("NLR {}", inputs.nlr),
                factors::NLR.evaluate(inputs.nlr),
            ),
            component(
                "ECOG",
                factors::ECOG_MAX,
                format!("ECOG {}", inputs.ecog),
                factors::ecog(inputs.ecog),
            ),
        ],
    };

    let domains = vec![tumor_burden, vascular, liver, inflammatory];
    let score = domains.iter().map(DomainScore::points).sum();

    ScoreResult {
        score,
        breakdown: ScoreBreakdown { domains },
    }
}

fn portal_vein_points(inputs: &ClinicalInputs) -> u32 {
    use super::inputs::PortalVeinStatus;

    match inputs.portal_vein {
        PortalVeinStatus::NoThrombosis => 0,
        PortalVeinStatus::Bland => 1,
        PortalVeinStatus::SegmentalTumor => 2,
        PortalVeinStatus::MainLobarTumor => 3,
    }
}

/// Total Y90RS, 0..=MAX_SCORE.
pub fn calculate_y90rs(inputs: &ClinicalInputs) -> u32 {
    calculate_score(inputs).score
}

/// Score, category and recommendations for one patient.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub result: Y90rsResult,
    pub breakdown: ScoreBreakdown,
    pub recommendations: &'static RecommendationBundle,
}

pub fn assess(inputs: &ClinicalInputs) -> Assessment {
    let ScoreResult { score, breakdown } = calculate_score(inputs);
    let result = Y90rsResult::from_score(score);
    Assessment {
        result,
        breakdown,
        recommendations: recommendations_for(result.category),
    }
}
