//! Deterministic, explainable ranking of candidate profiles against job requirements.
//!
//! [`RankingEngine`] is the pure core: five bounded component scores per candidate, an
//! explanation line, and a close-gap tie-break. [`RankingPipeline`] wraps it with file
//! loading and report output for the `cv-rank` binary.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::pipelines::RankingPipeline;
pub use config::{cli::LocalStorage, toml_config::RankingConfig, CliConfig};
pub use core::{engine::RankingEngine, engine::ScoringSettings, runner::PipelineRunner};
pub use core::tables::ScoringTables;
pub use domain::model::{CandidateProfile, JobRequirements, RankedCandidate};
pub use utils::error::{RankError, Result};
