use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Highest score still classified as low risk
pub const LOW_RISK_MAX: i64 = 6;
/// Highest score still classified as intermediate risk
pub const INTERMEDIATE_RISK_MAX: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Intermediate Risk")]
    Intermediate,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [
        RiskCategory::Low,
        RiskCategory::Intermediate,
        RiskCategory::High,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Intermediate => "Intermediate Risk",
            RiskCategory::High => "High Risk",
        }
    }

    /// Expected mortality band for the category
    pub fn mortality_band(&self) -> &'static str {
        match self {
            RiskCategory::Low => "<10%",
            RiskCategory::Intermediate => "10-30%",
            RiskCategory::High => ">30%",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for RiskCategory {
    type Err = anyhow::Error;

    /// Accepts "low", "intermediate", "high", with or without a trailing
    /// "risk" (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_ascii_lowercase();
        let word = lowered
            .strip_suffix("risk")
            .map(|w| w.trim_end_matches([' ', '-', '_']))
            .unwrap_or(&lowered);
        match word {
            "low" => Ok(RiskCategory::Low),
            "intermediate" => Ok(RiskCategory::Intermediate),
            "high" => Ok(RiskCategory::High),
            _ => bail!(
                "Unknown risk category '{}'. Expected low, intermediate or high",
                s.trim()
            ),
        }
    }
}

/// Map a score to its category. Defined for every integer.
pub fn classify(score: i64) -> RiskCategory {
    if score <= LOW_RISK_MAX {
        RiskCategory::Low
    } else if score <= INTERMEDIATE_RISK_MAX {
        RiskCategory::Intermediate
    } else {
        RiskCategory::High
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Y90rsResult {
    pub score: u32,
    pub category: RiskCategory,
    pub mortality: &'static str,
}

impl Y90rsResult {
    pub fn from_score(score: u32) -> Self {
        let category = classify(i64::from(score));
        Self {
            score,
            category,
            mortality: category.mortality_band(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_boundaries() {
        assert_eq!(classify(0), RiskCategory::Low);
        assert_eq!(classify(6), RiskCategory::Low);
        assert_eq!(classify(7), RiskCategory::Intermediate);
        assert_eq!(classify(12), RiskCategory::Intermediate);
        assert_eq!(classify(13), RiskCategory::High);
        assert_eq!(classify(23), RiskCategory::High);
    }

    #[test]
    fn test_classifier_outside_score_range() {
        assert_eq!(classify(-5), RiskCategory::Low);
        assert_eq!(classify(100), RiskCategory::High);
        assert_eq!(classify(i64::MAX), RiskCategory::High);
    }

    #[test]
    fn test_mortality_bands() {
        assert_eq!(RiskCategory::Low.mortality_band(), "<10%");
        assert_eq!(RiskCategory::Intermediate.mortality_band(), "10-30%");
        assert_eq!(RiskCategory::High.mortality_band(), ">30%");
    }

    #[test]
    fn test_result_from_score() {
        let result = Y90rsResult::from_score(12);
        assert_eq!(result.category, RiskCategory::Intermediate);
        assert_eq!(result.mortality, "10-30%");
    }

    #[test]
    fn test_parse_category() {
        assert_eq!("low".parse::<RiskCategory>().unwrap(), RiskCategory::Low);
        assert_eq!(
            "Intermediate Risk".parse::<RiskCategory>().unwrap(),
            RiskCategory::Intermediate
        );
        assert_eq!("HIGH-risk".parse::<RiskCategory>().unwrap(), RiskCategory::High);
        assert!("moderate".parse::<RiskCategory>().is_err());
        assert!("".parse::<RiskCategory>().is_err());
    }

    #[test]
    fn test_labels_roundtrip_through_parse() {
        for category in RiskCategory::ALL {
            assert_eq!(category.label().parse::<RiskCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_ordering() {
        assert!(RiskCategory::Low < RiskCategory::Intermediate);
        assert!(RiskCategory::Intermediate < RiskCategory::High);
    }

    #[test]
    fn test_serialize_uses_label() {
        let json = serde_json::to_string(&RiskCategory::High).unwrap();
        assert_eq!(json, "\"High Risk\"");
    }
}
