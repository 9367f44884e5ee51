use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Portal vein involvement, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalVeinStatus {
    #[serde(alias = "No thrombosis")]
    NoThrombosis,
    #[serde(alias = "Bland thrombosis")]
    Bland,
    #[serde(alias = "Segmental tumor thrombosis")]
    SegmentalTumor,
    #[serde(alias = "Main/Lobar tumor thrombosis")]
    MainLobarTumor,
}

impl PortalVeinStatus {
    pub const ALL: [PortalVeinStatus; 4] = [
        PortalVeinStatus::NoThrombosis,
        PortalVeinStatus::Bland,
        PortalVeinStatus::SegmentalTumor,
        PortalVeinStatus::MainLobarTumor,
    ];

    /// Human-readable label as shown on the intake form
    pub fn label(&self) -> &'static str {
        match self {
            PortalVeinStatus::NoThrombosis => "No thrombosis",
            PortalVeinStatus::Bland => "Bland thrombosis",
            PortalVeinStatus::SegmentalTumor => "Segmental tumor thrombosis",
            PortalVeinStatus::MainLobarTumor => "Main/Lobar tumor thrombosis",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            PortalVeinStatus::NoThrombosis => "no_thrombosis",
            PortalVeinStatus::Bland => "bland",
            PortalVeinStatus::SegmentalTumor => "segmental_tumor",
            PortalVeinStatus::MainLobarTumor => "main_lobar_tumor",
        }
    }
}

impl fmt::Display for PortalVeinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PortalVeinStatus {
    type Err = anyhow::Error;

    /// Accepts the snake_case key, its kebab-case form, or the form label
    /// (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let normalized = s.to_ascii_lowercase().replace('-', "_");
        for status in PortalVeinStatus::ALL {
            if normalized == status.key() || s.eq_ignore_ascii_case(status.label()) {
                return Ok(status);
            }
        }
        bail!(
            "Unknown portal vein status '{}'. Expected one of: {}",
            s,
            PortalVeinStatus::ALL
                .iter()
                .map(|p| p.key())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// The ten clinical variables the Y90RS is computed from.
///
/// Numeric fields are expected to be non-negative; the scorer does not check
/// this (see `intake::validation` for the form ranges).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClinicalInputs {
    /// Largest tumor diameter (cm)
    pub tumor_size: f64,
    /// Tumor volume (cc)
    pub tumor_volume: f64,
    /// Alpha-fetoprotein (ng/mL)
    pub afp: f64,
    pub portal_vein: PortalVeinStatus,
    /// Hepatopulmonary shunt fraction (%)
    pub shunt_fraction: f64,
    /// MELD 3.0 score, entered directly or derived from labs
    pub meld3: u32,
    /// Serum albumin (g/L)
    pub albumin: f64,
    pub alt_ast_ratio: f64,
    /// Neutrophil-to-lymphocyte ratio
    pub nlr: f64,
    /// ECOG performance status (0-3)
    pub ecog: u8,
}

/// Lab values the MELD 3.0 score is derived from, in SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeldLabValues {
    /// Total bilirubin (µmol/L)
    pub bilirubin: f64,
    /// Creatinine (µmol/L)
    pub creatinine: f64,
    pub inr: f64,
    /// Sodium (mmol/L)
    pub sodium: f64,
    #[serde(default)]
    pub female: bool,
}
