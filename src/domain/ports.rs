use crate::domain::model::{CandidateProfile, JobRequirements, RankedCandidate};
use crate::utils::error::Result;
use serde::Serialize;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn candidate_files(&self) -> &[String];
    fn job_requirements(&self) -> JobRequirements;
    fn output_path(&self) -> Option<&str>;
    fn output_formats(&self) -> &[String];
}

/// A candidate file that could not be turned into profiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedCandidates {
    pub profiles: Vec<CandidateProfile>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Clone)]
pub struct RankingResult {
    pub job: JobRequirements,
    pub ranked: Vec<RankedCandidate>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Clone, Default)]
pub struct RankingOutput {
    /// Plain-text report, always rendered.
    pub report: String,
    /// Files written through the storage backend.
    pub written: Vec<String>,
}

pub trait Pipeline: Send + Sync {
    fn extract(&self) -> Result<LoadedCandidates>;
    fn transform(&self, loaded: LoadedCandidates) -> Result<RankingResult>;
    fn load(&self, result: RankingResult) -> Result<RankingOutput>;
}
