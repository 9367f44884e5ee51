use super::inputs::MeldLabValues;

/// µmol/L per mg/dL
pub const BILIRUBIN_UMOL_PER_MGDL: f64 = 17.1;
/// µmol/L per mg/dL
pub const CREATININE_UMOL_PER_MGDL: f64 = 88.4;

const SODIUM_MIN: f64 = 125.0;
const SODIUM_MAX: f64 = 137.0;
const CREATININE_MAX_MGDL: f64 = 4.0;

/// Lab values after unit conversion and the MELD 3.0 bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedLabs {
    pub bilirubin_mgdl: f64,
    pub creatinine_mgdl: f64,
    pub inr: f64,
    pub sodium: f64,
}

/// Convert to mg/dL and apply the bounds. Every log argument ends up >= 1.
pub fn clamp_labs(labs: &MeldLabValues) -> ClampedLabs {
    let bilirubin_mgdl = labs.bilirubin / BILIRUBIN_UMOL_PER_MGDL;
    let creatinine_mgdl = labs.creatinine / CREATININE_UMOL_PER_MGDL;

    ClampedLabs {
        bilirubin_mgdl: bilirubin_mgdl.max(1.0),
        creatinine_mgdl: creatinine_mgdl.min(CREATININE_MAX_MGDL).max(1.0),
        inr: labs.inr.max(1.0),
        sodium: labs.sodium.min(SODIUM_MAX).max(SODIUM_MIN),
    }
}

/// Unrounded MELD 3.0 value.
pub fn meld3_raw(labs: &MeldLabValues) -> f64 {
    let c = clamp_labs(labs);
    let female = if labs.female { 1.0 } else { 0.0 };

    (1.33 * female)
        + (0.047 * (SODIUM_MAX - c.sodium).max(0.0))
        + (1.42 * c.bilirubin_mgdl.ln())
        + (1.18 * c.inr.ln())
        + (3.09 * c.creatinine_mgdl.ln())
}

/// MELD 3.0 score, rounded half-to-even.
pub fn calculate_meld3(labs: &MeldLabValues) -> u32 {
    meld3_raw(labs).round_ties_even() as u32
}
