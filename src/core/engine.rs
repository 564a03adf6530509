use crate::core::ranking::{build_explanation, order_candidates};
use crate::core::scorers::{
    ComponentScorer, EducationScorer, ExperienceScorer, ProjectsScorer, ScoringInput,
    SignalScorer, SkillsScorer,
};
use crate::core::tables::ScoringTables;
use crate::domain::model::{
    CandidateProfile, ComponentScores, JobRequirements, RankedCandidate,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Year recency is measured against when nothing else is configured.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2026;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringSettings {
    pub reference_year: i32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
        }
    }
}

/// Scores and ranks candidates against one job. Pure: no I/O, no shared mutable state,
/// the same input always gives the same output.
pub struct RankingEngine {
    tables: Arc<ScoringTables>,
    settings: ScoringSettings,
    experience: ExperienceScorer,
    skills: SkillsScorer,
    projects: ProjectsScorer,
    education: EducationScorer,
    signal: SignalScorer,
}

impl RankingEngine {
    pub fn new(tables: ScoringTables, settings: ScoringSettings) -> Self {
        let tables = Arc::new(tables);
        Self {
            experience: ExperienceScorer::new(tables.clone(), settings.reference_year),
            skills: SkillsScorer::new(tables.clone()),
            projects: ProjectsScorer::new(tables.clone()),
            education: EducationScorer::new(tables.clone()),
            signal: SignalScorer::new(tables.clone()),
            tables,
            settings,
        }
    }

    pub fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    pub fn settings(&self) -> ScoringSettings {
        self.settings
    }

    pub fn score_candidate(
        &self,
        profile: &CandidateProfile,
        job: &JobRequirements,
    ) -> ComponentScores {
        let input = ScoringInput::new(profile, job, &self.tables);
        ComponentScores {
            experience_quality: self.experience.score(&input),
            technical_skills: self.skills.score(&input),
            projects_impact: self.projects.score(&input),
            education_certifications: self.education.score(&input),
            signal_consistency: self.signal.score(&input),
        }
    }

    /// Scores every profile, then orders them with the close-gap tie-break.
    pub fn rank(
        &self,
        profiles: &[CandidateProfile],
        job: &JobRequirements,
    ) -> Vec<RankedCandidate> {
        let scored = profiles
            .iter()
            .map(|profile| {
                let scores = self.score_candidate(profile, job);
                tracing::debug!(
                    candidate = profile.display_name(),
                    total = scores.total(),
                    "candidate scored"
                );
                RankedCandidate {
                    rank: 0,
                    candidate_name: profile.display_name().to_string(),
                    total_score: scores.total(),
                    explanation: build_explanation(&scores, job),
                    scores,
                    profile: profile.clone(),
                }
            })
            .collect();
        order_candidates(scored)
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(ScoringTables::default(), ScoringSettings::default())
    }
}
