use super::{ComponentScorer, ScoringInput};
use crate::core::normalize::loosely_related;
use crate::core::skills::SkillMatcher;
use crate::core::tables::ScoringTables;
use crate::domain::model::{
    CandidateProfile, Component, ComponentScore, CoreMatch, ScoreExplanation, SkillsExplanation,
};
use std::sync::Arc;

const CORE_MAX: f64 = 15.0;
const BREADTH_MAX: f64 = 10.0;
const BREADTH_PER_SKILL: f64 = 0.5;
const DEPTH_MAX: f64 = 5.0;
const LANGUAGE_FRAMEWORK_BONUS: f64 = 2.0;

/// Technical skills (0-25): coverage of the required stack, plus depth from skills
/// that also show up in experience. Listing many languages is not penalized.
pub struct SkillsScorer {
    tables: Arc<ScoringTables>,
}

impl SkillsScorer {
    pub fn new(tables: Arc<ScoringTables>) -> Self {
        Self { tables }
    }

    fn has_any(&self, profile: &CandidateProfile, categories: &[String]) -> bool {
        categories
            .iter()
            .any(|category| !profile.skills_in(category).is_empty())
    }
}

impl ComponentScorer for SkillsScorer {
    fn component(&self) -> Component {
        Component::TechnicalSkills
    }

    fn score(&self, input: &ScoringInput<'_>) -> ComponentScore {
        let skills = &input.skills;
        if skills.is_empty() {
            return ComponentScore::new(
                self.component(),
                0.0,
                "No technical skills found",
                ScoreExplanation::TechnicalSkills(SkillsExplanation::default()),
            );
        }

        let core_match = if input.job.has_required_skills() {
            let result =
                SkillMatcher::new(&self.tables).match_skills(skills, &input.job.required_skills);
            CoreMatch::Required {
                matched: result.matched,
                total_required: result.required_total,
                score: CORE_MAX * result.ratio(),
            }
        } else {
            CoreMatch::Breadth {
                skill_count: skills.len(),
                score: (skills.len() as f64 * BREADTH_PER_SKILL).min(BREADTH_MAX),
            }
        };
        let core_score = match core_match {
            CoreMatch::Required { score, .. } | CoreMatch::Breadth { score, .. } => score,
        };

        let mut depth = 0.0;
        if !input.experience_technologies.is_empty() {
            let used = skills
                .iter()
                .filter(|skill| {
                    input
                        .experience_technologies
                        .iter()
                        .any(|tech| loosely_related(skill, tech))
                })
                .count();
            depth = DEPTH_MAX * used as f64 / skills.len() as f64;
        }
        let language_framework = self.has_any(input.profile, &self.tables.language_categories)
            && self.has_any(input.profile, &self.tables.framework_categories);
        if language_framework {
            depth += LANGUAGE_FRAMEWORK_BONUS;
        }
        let depth = depth.min(DEPTH_MAX);

        let language_count = self
            .tables
            .language_categories
            .iter()
            .map(|category| input.profile.skills_in(category).len())
            .sum();

        ComponentScore::new(
            self.component(),
            (core_score + depth).min(Component::TechnicalSkills.max()),
            format!("Technical skills assessment ({} skills)", skills.len()),
            ScoreExplanation::TechnicalSkills(SkillsExplanation {
                skill_count: skills.len(),
                core_match,
                depth_score: depth,
                language_framework_bonus: language_framework,
                language_count,
            }),
        )
    }
}
