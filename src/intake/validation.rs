use super::case::PatientCase;
use crate::scoring::MeldLabValues;

/// Accepted range for one intake field, as offered by the form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FormRange {
    const fn new(field: &'static str, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    fn check(&self, value: f64, errors: &mut Vec<String>) {
        if !self.contains(value) {
            errors.push(format!(
                "{}: {} is outside {}..={}",
                self.field, value, self.min, self.max
            ));
        }
    }
}

pub const TUMOR_SIZE: FormRange = FormRange::new("tumor_size", 0.0, 30.0);
pub const TUMOR_VOLUME: FormRange = FormRange::new("tumor_volume", 0.0, 5000.0);
pub const AFP: FormRange = FormRange::new("afp", 0.0, 1_000_000.0);
pub const SHUNT_FRACTION: FormRange = FormRange::new("shunt_fraction", 0.0, 100.0);
pub const MELD3: FormRange = FormRange::new("liver.meld3", 0.0, 40.0);
pub const BILIRUBIN: FormRange = FormRange::new("liver.labs.bilirubin", 0.0, 1000.0);
pub const CREATININE: FormRange = FormRange::new("liver.labs.creatinine", 0.0, 1000.0);
pub const INR: FormRange = FormRange::new("liver.labs.inr", 0.0, 10.0);
pub const SODIUM: FormRange = FormRange::new("liver.labs.sodium", 115.0, 160.0);
pub const ALBUMIN: FormRange = FormRange::new("albumin", 0.0, 60.0);
pub const ALT_AST_RATIO: FormRange = FormRange::new("alt_ast_ratio", 0.0, 10.0);
pub const NLR: FormRange = FormRange::new("nlr", 0.0, 50.0);
pub const ECOG: FormRange = FormRange::new("ecog", 0.0, 3.0);

pub fn validate_labs(labs: &MeldLabValues, errors: &mut Vec<String>) {
    BILIRUBIN.check(labs.bilirubin, errors);
    CREATININE.check(labs.creatinine, errors);
    INR.check(labs.inr, errors);
    SODIUM.check(labs.sodium, errors);
}

/// Check a case against the form ranges before scoring.
/// Returns all validation errors at once (not just the first).
pub fn validate_case(case: &PatientCase) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    TUMOR_SIZE.check(case.tumor_size, &mut errors);
    TUMOR_VOLUME.check(case.tumor_volume, &mut errors);
    AFP.check(case.afp, &mut errors);
    SHUNT_FRACTION.check(case.shunt_fraction, &mut errors);

    match (case.liver.meld3, &case.liver.labs) {
        (Some(_), Some(_)) => errors.push("liver: set either meld3 or labs, not both".to_string()),
        (None, None) => errors.push("liver: one of meld3 or labs is required".to_string()),
        (Some(score), None) => MELD3.check(f64::from(score), &mut errors),
        (None, Some(labs)) => validate_labs(labs, &mut errors),
    }

    ALBUMIN.check(case.albumin, &mut errors);
    ALT_AST_RATIO.check(case.alt_ast_ratio, &mut errors);
    NLR.check(case.nlr, &mut errors);
    ECOG.check(f64::from(case.ecog), &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
