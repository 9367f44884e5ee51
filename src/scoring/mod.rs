pub mod engine;
pub mod factors;
pub mod inputs;
pub mod meld;
pub mod risk;

pub use engine::{
    assess, calculate_score, calculate_y90rs, Assessment, ComponentScore, Domain, DomainScore,
    ScoreBreakdown, ScoreResult, MAX_SCORE, SCORE_UPPER_BOUND,
};
pub use inputs::{ClinicalInputs, MeldLabValues, PortalVeinStatus};
pub use meld::{calculate_meld3, meld3_raw};
pub use risk::{classify, RiskCategory, Y90rsResult};
