use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Display preferences.
///
/// Example YAML:
/// ```yaml
/// color: never
/// format: json
/// show_breakdown: false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub color: Option<ColorChoice>,

    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Print per-domain points under the result (default: true)
    #[serde(default)]
    pub show_breakdown: Option<bool>,
}

impl Config {
    pub fn color(&self) -> ColorChoice {
        self.color.unwrap_or_default()
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn show_breakdown(&self) -> bool {
        self.show_breakdown.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.color(), ColorChoice::Auto);
        assert_eq!(config.format(), OutputFormat::Text);
        assert!(config.show_breakdown());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
color: never
format: json
show_breakdown: false
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.color(), ColorChoice::Never);
        assert_eq!(config.format(), OutputFormat::Json);
        assert!(!config.show_breakdown());
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.color.is_none());
        assert!(config.format.is_none());
        assert!(config.show_breakdown.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("theme: dark\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            color: Some(ColorChoice::Always),
            format: Some(OutputFormat::Text),
            show_breakdown: Some(false),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }
}
