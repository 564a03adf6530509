//! The five component scorers.
//!
//! Each scorer is independent: it reads a shared [`ScoringInput`] and returns a bounded
//! [`ComponentScore`]. None of them hold mutable state, so a candidate can be scored by
//! any scorer in any order.

pub mod education;
pub mod experience;
pub mod projects;
pub mod signal;
pub mod skills;

pub use education::EducationScorer;
pub use experience::ExperienceScorer;
pub use projects::ProjectsScorer;
pub use signal::SignalScorer;
pub use skills::SkillsScorer;

use crate::core::tables::ScoringTables;
use crate::domain::model::{CandidateProfile, Component, ComponentScore, JobRequirements};

/// Per-candidate data shared by all scorers, derived once from the raw profile.
#[derive(Debug, Clone)]
pub struct ScoringInput<'a> {
    pub profile: &'a CandidateProfile,
    pub job: &'a JobRequirements,
    /// Technical skills across categories, de-duplicated, first occurrence kept.
    pub skills: Vec<&'a str>,
    pub experience_technologies: Vec<&'a str>,
}

impl<'a> ScoringInput<'a> {
    pub fn new(
        profile: &'a CandidateProfile,
        job: &'a JobRequirements,
        tables: &ScoringTables,
    ) -> Self {
        let mut skills: Vec<&'a str> = Vec::new();
        for (category, entries) in &profile.skills {
            if !tables.is_technical_category(category) {
                continue;
            }
            for skill in entries {
                let skill = skill.trim();
                if !skill.is_empty() && !skills.contains(&skill) {
                    skills.push(skill);
                }
            }
        }

        Self {
            profile,
            job,
            skills,
            experience_technologies: profile.experience_technologies(),
        }
    }
}

pub trait ComponentScorer: Send + Sync {
    fn component(&self) -> Component;
    fn score(&self, input: &ScoringInput<'_>) -> ComponentScore;
}
