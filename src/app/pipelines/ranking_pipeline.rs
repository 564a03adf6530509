use crate::app::report::{render_csv, render_json, render_text, ReportFormat};
use crate::core::engine::RankingEngine;
use crate::domain::model::CandidateProfile;
use crate::domain::ports::{
    ConfigProvider, LoadedCandidates, Pipeline, RankingOutput, RankingResult, SkippedFile, Storage,
};
use crate::utils::error::{RankError, Result};
use serde::Deserialize;
use std::path::Path;

/// A candidate file holds either one profile or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum CandidateFile {
    Many(Vec<CandidateProfile>),
    One(Box<CandidateProfile>),
}

impl CandidateFile {
    fn into_profiles(self) -> Vec<CandidateProfile> {
        match self {
            CandidateFile::Many(profiles) => profiles,
            CandidateFile::One(profile) => vec![*profile],
        }
    }
}

pub struct RankingPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) engine: RankingEngine,
}

impl<S: Storage, C: ConfigProvider> RankingPipeline<S, C> {
    pub fn new(storage: S, config: C, engine: RankingEngine) -> Self {
        Self {
            storage,
            config,
            engine,
        }
    }

    fn load_file(&self, path: &str) -> Result<Vec<CandidateProfile>> {
        let data = self.storage.read_file(path)?;
        let file: CandidateFile =
            serde_json::from_slice(&data).map_err(|e| RankError::CandidateLoadError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        Ok(file.into_profiles())
    }

    fn render(&self, format: ReportFormat, result: &RankingResult, text: &str) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(text.to_string()),
            ReportFormat::Json => render_json(
                &result.ranked,
                &result.job,
                self.engine.settings().reference_year,
                &result.skipped,
            ),
            ReportFormat::Csv => render_csv(&result.ranked),
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for RankingPipeline<S, C> {
    fn extract(&self) -> Result<LoadedCandidates> {
        let files = self.config.candidate_files();
        let mut loaded = LoadedCandidates::default();

        for path in files {
            match self.load_file(path) {
                Ok(profiles) => {
                    tracing::debug!("Loaded {} profile(s) from {}", profiles.len(), path);
                    loaded.profiles.extend(profiles);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Skipping {}: {}", path, e);
                    loaded.skipped.push(SkippedFile {
                        path: path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if loaded.profiles.is_empty() {
            return Err(RankError::NoCandidatesError {
                attempted: files.len(),
            });
        }
        Ok(loaded)
    }

    fn transform(&self, loaded: LoadedCandidates) -> Result<RankingResult> {
        let job = self.config.job_requirements();
        tracing::debug!(
            role = job.role().unwrap_or("-"),
            required_skills = job.required_skills.len(),
            "Ranking against job requirements"
        );
        let ranked = self.engine.rank(&loaded.profiles, &job);
        Ok(RankingResult {
            job,
            ranked,
            skipped: loaded.skipped,
        })
    }

    fn load(&self, result: RankingResult) -> Result<RankingOutput> {
        let report = render_text(&result.ranked);
        let mut written = Vec::new();

        if let Some(output_path) = self.config.output_path() {
            for name in self.config.output_formats() {
                let format =
                    ReportFormat::parse(name).ok_or_else(|| RankError::InvalidConfigValueError {
                        field: "output.formats".to_string(),
                        value: name.clone(),
                        reason: format!("Valid formats: {}", ReportFormat::NAMES.join(", ")),
                    })?;
                let content = self.render(format, &result, &report)?;
                let target = Path::new(output_path).join(format.file_name());
                let target = target.to_string_lossy().into_owned();
                tracing::debug!("Writing {} bytes to {}", content.len(), target);
                self.storage.write_file(&target, content.as_bytes())?;
                written.push(target);
            }
        }

        Ok(RankingOutput { report, written })
    }
}
