use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::intake::labs_entered;
use crate::recommendations::RecommendationBundle;
use crate::scoring::{
    meld3_raw, Assessment, ClinicalInputs, MeldLabValues, RiskCategory, ScoreBreakdown,
};

/// Machine-readable score report (`--json`)
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub generated_at: DateTime<Utc>,
    pub inputs: &'a ClinicalInputs,
    pub score: u32,
    pub max_score: u32,
    pub category: RiskCategory,
    pub mortality: &'static str,
    pub breakdown: &'a ScoreBreakdown,
    pub recommendations: &'static RecommendationBundle,
}

impl<'a> Report<'a> {
    pub fn new(inputs: &'a ClinicalInputs, assessment: &'a Assessment) -> Self {
        Self {
            generated_at: Utc::now(),
            inputs,
            score: assessment.result.score,
            max_score: crate::scoring::MAX_SCORE,
            category: assessment.result.category,
            mortality: assessment.result.mortality,
            breakdown: &assessment.breakdown,
            recommendations: assessment.recommendations,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeldReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub labs: &'a MeldLabValues,
    pub meld3: u32,
    /// None when the panel is incomplete and the formula was not applied
    pub unrounded: Option<f64>,
}

impl<'a> MeldReport<'a> {
    pub fn new(labs: &'a MeldLabValues, meld3: u32) -> Self {
        Self {
            generated_at: Utc::now(),
            labs,
            meld3,
            unrounded: labs_entered(labs).then(|| meld3_raw(labs)),
        }
    }
}

pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}
