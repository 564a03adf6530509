pub mod cli;
pub mod toml_config;

use crate::app::report::ReportFormat;
use crate::domain::model::JobRequirements;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_not_empty, validate_one_of, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use toml_config::{RankingConfig, MAX_REFERENCE_YEAR, MIN_REFERENCE_YEAR};

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "cv-rank"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Rank candidate profiles against a job with an explainable scoring model")
)]
pub struct CliConfig {
    /// Candidate JSON files (one profile or an array of profiles per file)
    #[cfg_attr(feature = "cli", arg(required = true))]
    pub files: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long))]
    pub job_role: Option<String>,

    /// Required skills, comma separated
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub skills: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long))]
    pub field: Option<String>,

    /// TOML settings file; flags given on the command line take precedence
    #[cfg_attr(feature = "cli", arg(long))]
    pub config: Option<String>,

    /// Year recency is measured against (defaults to the current year)
    #[cfg_attr(feature = "cli", arg(long))]
    pub reference_year: Option<i32>,

    /// Directory for ranking.txt / ranking.json / ranking.csv
    #[cfg_attr(feature = "cli", arg(long))]
    pub output_path: Option<String>,

    /// Output formats written under --output-path: text, json, csv
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub format: Vec<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl CliConfig {
    /// Fills every option left unset on the command line from the settings file.
    pub fn merge_file(&mut self, file: &RankingConfig) {
        if self.job_role.is_none() {
            self.job_role = file.job.role.clone();
        }
        if self.skills.is_empty() {
            self.skills = file.job.required_skills.clone();
        }
        if self.field.is_none() {
            self.field = file.job.field.clone();
        }
        if self.reference_year.is_none() {
            self.reference_year = file.reference_year();
        }
        if self.output_path.is_none() {
            self.output_path = file.output.output_path.clone();
        }
        if self.format.is_empty() {
            self.format = file.output.formats.clone();
        }
    }

    /// Applies the remaining defaults once all sources have been merged.
    pub fn with_defaults(mut self, current_year: i32) -> Self {
        if self.format.is_empty() {
            self.format = vec![DEFAULT_FORMAT.to_string()];
        }
        if self.reference_year.is_none() {
            self.reference_year = Some(current_year);
        }
        self
    }
}

impl ConfigProvider for CliConfig {
    fn candidate_files(&self) -> &[String] {
        &self.files
    }

    fn job_requirements(&self) -> JobRequirements {
        JobRequirements {
            role: self.job_role.clone(),
            required_skills: self
                .skills
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            field: self.field.clone(),
        }
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn output_formats(&self) -> &[String] {
        &self.format
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_not_empty("files", &self.files)?;
        for file in &self.files {
            validate_path("files", file)?;
        }
        if let Some(path) = &self.output_path {
            validate_path("output_path", path)?;
        }
        if let Some(year) = self.reference_year {
            validate_range("reference_year", year, MIN_REFERENCE_YEAR, MAX_REFERENCE_YEAR)?;
        }
        validate_one_of("format", &self.format, &ReportFormat::NAMES)?;
        Ok(())
    }
}
