use crate::app::report::ReportFormat;
use crate::core::tables::ScoringTables;
use crate::domain::model::JobRequirements;
use crate::utils::error::{RankError, Result};
use crate::utils::validation::{validate_one_of, validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

pub const MIN_REFERENCE_YEAR: i32 = 2000;
pub const MAX_REFERENCE_YEAR: i32 = 2099;

/// Settings file for a ranking run. Every section is optional.
///
/// ```toml
/// [scoring]
/// reference_year = 2026
///
/// [job]
/// role = "Backend Developer"
/// required_skills = ["Java", "Spring"]
///
/// [output]
/// output_path = "./results"
/// formats = ["text", "json"]
///
/// [tables]
/// recognized_certifications = ["aws", "terraform"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub scoring: ScoringSection,
    pub job: JobRequirements,
    pub output: OutputSection,
    pub logging: LoggingSection,
    /// Overrides for the built-in lookup tables; keys left out keep their built-in value.
    pub tables: Option<ScoringTables>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSection {
    pub reference_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub output_path: Option<String>,
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub json: bool,
}

impl RankingConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| RankError::ConfigError {
                message: format!("Cannot read {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RankError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn reference_year(&self) -> Option<i32> {
        self.scoring.reference_year
    }

    /// Built-in tables with this file's overrides applied.
    pub fn scoring_tables(&self) -> ScoringTables {
        self.tables.clone().unwrap_or_default()
    }

    pub fn json_logging(&self) -> bool {
        self.logging.json
    }
}

impl Validate for RankingConfig {
    fn validate(&self) -> Result<()> {
        if let Some(year) = self.scoring.reference_year {
            validate_range(
                "scoring.reference_year",
                year,
                MIN_REFERENCE_YEAR,
                MAX_REFERENCE_YEAR,
            )?;
        }
        if let Some(path) = &self.output.output_path {
            validate_path("output.output_path", path)?;
        }
        validate_one_of("output.formats", &self.output.formats, &ReportFormat::NAMES)?;
        if let Some(tables) = &self.tables {
            tables.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[scoring]
reference_year = 2025

[job]
role = "Backend Developer"
required_skills = ["Java", "Spring"]
field = "Computer Science"

[output]
output_path = "./results"
formats = ["text", "csv"]

[logging]
json = true
"#;

        let config = RankingConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.reference_year(), Some(2025));
        assert_eq!(config.job.role(), Some("Backend Developer"));
        assert_eq!(config.job.required_skills, vec!["Java", "Spring"]);
        assert_eq!(config.output.formats, vec!["text", "csv"]);
        assert!(config.json_logging());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RankingConfig::from_toml_str("").unwrap();
        assert_eq!(config.reference_year(), None);
        assert!(config.output.formats.is_empty());
        assert_eq!(config.scoring_tables().version, ScoringTables::default().version);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CV_RANK_TEST_ROLE", "Data Engineer");

        let config = RankingConfig::from_toml_str(
            r#"
[job]
role = "${CV_RANK_TEST_ROLE}"
field = "${CV_RANK_TEST_UNSET_FIELD}"
"#,
        )
        .unwrap();
        assert_eq!(config.job.role(), Some("Data Engineer"));
        assert_eq!(config.job.field(), Some("${CV_RANK_TEST_UNSET_FIELD}"));

        std::env::remove_var("CV_RANK_TEST_ROLE");
    }

    #[test]
    fn test_table_overrides() {
        let config = RankingConfig::from_toml_str(
            r#"
[tables]
version = "acme-2"
fake_project_keywords = ["boilerplate"]
"#,
        )
        .unwrap();
        let tables = config.scoring_tables();
        assert_eq!(tables.version, "acme-2");
        assert!(tables.is_fake_project("Boilerplate API", ""));
        assert!(!tables.is_fake_project("Demo", ""));
        assert_eq!(tables.tier_of("Google").1, 1.0);
    }

    #[test]
    fn test_validation_errors() {
        let bad_year = RankingConfig::from_toml_str("[scoring]\nreference_year = 1999\n").unwrap();
        assert!(bad_year.validate().is_err());

        let bad_format = RankingConfig::from_toml_str("[output]\nformats = [\"xml\"]\n").unwrap();
        assert!(bad_format.validate().is_err());

        let bad_tier = RankingConfig::from_toml_str(
            r#"
[[tables.company_tiers]]
id = "tier1"
multiplier = 2.0
companies = ["acme"]
"#,
        )
        .unwrap();
        assert!(bad_tier.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = RankingConfig::from_toml_str("[scoring\nreference_year = ").unwrap_err();
        assert!(matches!(err, RankError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[job]\nrequired_skills = [\"Rust\"]\n")
            .unwrap();

        let config = RankingConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.job.required_skills, vec!["Rust"]);

        let missing = RankingConfig::from_file("/nonexistent/cv-rank.toml").unwrap_err();
        assert!(matches!(missing, RankError::ConfigError { .. }));
    }
}
