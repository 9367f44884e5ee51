use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::scoring::{calculate_meld3, ClinicalInputs, MeldLabValues, PortalVeinStatus};

/// Where the MELD 3.0 score comes from: entered directly, or derived from labs.
/// Exactly one of the two must be set.
///
/// Example YAML:
/// ```yaml
/// liver:
///   labs: { bilirubin: 34.2, creatinine: 88.4, inr: 1.2, sodium: 140 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LiverInput {
    #[serde(default)]
    pub meld3: Option<u32>,

    #[serde(default)]
    pub labs: Option<MeldLabValues>,
}

impl LiverInput {
    pub fn direct(meld3: u32) -> Self {
        Self {
            meld3: Some(meld3),
            labs: None,
        }
    }

    pub fn from_labs(labs: MeldLabValues) -> Self {
        Self {
            meld3: None,
            labs: Some(labs),
        }
    }

    /// Resolve to a MELD 3.0 score.
    ///
    /// Lab panels with a non-positive bilirubin, creatinine, INR or sodium are
    /// treated as not entered and yield 0.
    pub fn resolve(&self) -> Result<u32> {
        match (self.meld3, &self.labs) {
            (Some(_), Some(_)) => bail!("liver: set either meld3 or labs, not both"),
            (None, None) => bail!("liver: one of meld3 or labs is required"),
            (Some(score), None) => Ok(score),
            (None, Some(labs)) => Ok(meld3_from_labs(labs)),
        }
    }
}

/// True when every lab value is positive. A zero means the field was left blank.
pub fn labs_entered(labs: &MeldLabValues) -> bool {
    [labs.bilirubin, labs.creatinine, labs.inr, labs.sodium]
        .iter()
        .all(|v| *v > 0.0)
}

/// MELD 3.0 for a lab panel, or 0 when the panel is incomplete.
pub fn meld3_from_labs(labs: &MeldLabValues) -> u32 {
    if labs_entered(labs) {
        let score = calculate_meld3(labs);
        tracing::debug!(meld3 = score, "derived MELD 3.0 from labs");
        score
    } else {
        tracing::warn!("MELD 3.0 labs incomplete (a value is <= 0); using MELD 3.0 = 0");
        0
    }
}

/// One patient's intake record as read from a case file or the prompt.
///
/// Example YAML:
/// ```yaml
/// tumor_size: 6
/// tumor_volume: 400
/// afp: 500
/// portal_vein: segmental_tumor
/// shunt_fraction: 8
/// liver:
///   meld3: 12
/// albumin: 30
/// alt_ast_ratio: 1.8
/// nlr: 3.0
/// ecog: 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatientCase {
    pub tumor_size: f64,
    pub tumor_volume: f64,
    pub afp: f64,
    pub portal_vein: PortalVeinStatus,
    pub shunt_fraction: f64,
    pub liver: LiverInput,
    pub albumin: f64,
    pub alt_ast_ratio: f64,
    pub nlr: f64,
    pub ecog: u8,
}

impl PatientCase {
    pub fn to_inputs(&self) -> Result<ClinicalInputs> {
        Ok(ClinicalInputs {
            tumor_size: self.tumor_size,
            tumor_volume: self.tumor_volume,
            afp: self.afp,
            portal_vein: self.portal_vein,
            shunt_fraction: self.shunt_fraction,
            meld3: self.liver.resolve()?,
            albumin: self.albumin,
            alt_ast_ratio: self.alt_ast_ratio,
            nlr: self.nlr,
            ecog: self.ecog,
        })
    }
}

/// Parse a case from YAML (or JSON) text
pub fn parse_case(content: &str) -> Result<PatientCase> {
    serde_saphyr::from_str(content).context("Failed to parse patient case")
}

/// Load a patient case file
pub fn load_case(path: &Path) -> Result<PatientCase> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read case file at {}", path.display()))?;
    let case = parse_case(&content).with_context(|| format!("Invalid case file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded patient case");
    Ok(case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    const INTERMEDIATE_CASE: &str = r#"
tumor_size: 6
tumor_volume: 400
afp: 500
portal_vein: segmental_tumor
shunt_fraction: 8
liver:
  meld3: 12
albumin: 30
alt_ast_ratio: 1.8
nlr: 3.0
ecog: 2
"#;

    fn labs(bilirubin: f64, creatinine: f64, inr: f64, sodium: f64) -> MeldLabValues {
        MeldLabValues {
            bilirubin,
            creatinine,
            inr,
            sodium,
            female: false,
        }
    }

    #[test]
    fn test_parse_direct_meld_case() {
        let case = parse_case(INTERMEDIATE_CASE).unwrap();
        assert_eq!(case.portal_vein, PortalVeinStatus::SegmentalTumor);
        assert_eq!(case.liver, LiverInput::direct(12));
        let inputs = case.to_inputs().unwrap();
        assert_eq!(inputs.meld3, 12);
        assert_eq!(inputs.ecog, 2);
        assert_eq!(crate::scoring::calculate_y90rs(&inputs), 12);
    }

    #[test]
    fn test_parse_labs_case_with_form_label() {
        let yaml = r#"
tumor_size: 2
tumor_volume: 50
afp: 10
portal_vein: "No thrombosis"
shunt_fraction: 3
liver:
  labs:
    bilirubin: 34.2
    creatinine: 88.4
    inr: 1.2
    sodium: 140
    female: true
albumin: 40
alt_ast_ratio: 1.0
nlr: 1.5
ecog: 0
"#;
        let case = parse_case(yaml).unwrap();
        assert_eq!(case.portal_vein, PortalVeinStatus::NoThrombosis);
        let inputs = case.to_inputs().unwrap();
        assert_eq!(inputs.meld3, 3);
    }

    #[test]
    fn test_parse_json_case() {
        let json = r#"{"tumor_size": 2, "tumor_volume": 50, "afp": 10,
            "portal_vein": "bland", "shunt_fraction": 3, "liver": {"meld3": 8},
            "albumin": 40, "alt_ast_ratio": 1.0, "nlr": 1.5, "ecog": 0}"#;
        let case = parse_case(json).unwrap();
        assert_eq!(case.portal_vein, PortalVeinStatus::Bland);
    }

    #[test]
    fn test_unknown_portal_vein_rejected() {
        let yaml = INTERMEDIATE_CASE.replace("segmental_tumor", "partial");
        assert!(parse_case(&yaml).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = format!("{}\nbmi: 24\n", INTERMEDIATE_CASE);
        assert!(parse_case(&yaml).is_err());
    }

    #[test]
    fn test_missing_field_rejected() {
        let yaml = INTERMEDIATE_CASE.replace("nlr: 3.0\n", "");
        assert!(parse_case(&yaml).is_err());
    }

    #[test]
    fn test_liver_both_sources_rejected() {
        let liver = LiverInput {
            meld3: Some(10),
            labs: Some(labs(34.2, 88.4, 1.2, 140.0)),
        };
        let err = liver.resolve().unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn test_liver_no_source_rejected() {
        let err = LiverInput::default().resolve().unwrap_err();
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn test_liver_labs_resolve() {
        let liver = LiverInput::from_labs(labs(34.2, 88.4, 1.2, 140.0));
        assert_eq!(liver.resolve().unwrap(), 1);
    }

    #[test]
    fn test_liver_incomplete_labs_yield_zero() {
        // Severe values, but creatinine missing: the form skips the calculation
        let liver = LiverInput::from_labs(labs(500.0, 0.0, 3.0, 120.0));
        assert_eq!(liver.resolve().unwrap(), 0);
    }

    #[test]
    fn test_labs_entered_checks_every_value() {
        assert!(labs_entered(&labs(34.2, 88.4, 1.2, 140.0)));
        assert!(!labs_entered(&labs(0.0, 300.0, 2.0, 130.0)));
        assert!(!labs_entered(&labs(34.2, 88.4, 1.2, 0.0)));
        assert!(!labs_entered(&labs(34.2, 88.4, -1.0, 140.0)));
    }

    #[test]
    fn test_meld3_from_labs() {
        assert_eq!(meld3_from_labs(&labs(0.0, 300.0, 2.0, 130.0)), 0);
        let complete = labs(34.2, 300.0, 2.0, 130.0);
        assert_eq!(meld3_from_labs(&complete), calculate_meld3(&complete));
    }

    #[test]
    fn test_load_case_file() {
        let temp_path = env::temp_dir().join("y90rs_test_case.yaml");
        fs::write(&temp_path, INTERMEDIATE_CASE).unwrap();

        let case = load_case(&temp_path).unwrap();
        assert_eq!(case.tumor_volume, 400.0);

        let _ = fs::remove_file(&temp_path);
    }

    #[test]
    fn test_load_missing_case_file() {
        let temp_path = env::temp_dir().join("y90rs_test_missing_case.yaml");
        let _ = fs::remove_file(&temp_path);

        let err = load_case(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Failed to read case file"));
    }
}
