pub mod engine;
pub mod normalize;
pub mod ranking;
pub mod runner;
pub mod scorers;
pub mod skills;
pub mod tables;

pub use crate::domain::model::{CandidateProfile, JobRequirements, RankedCandidate};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
pub use engine::{RankingEngine, ScoringSettings};
pub use tables::ScoringTables;
