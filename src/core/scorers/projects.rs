use super::{ComponentScorer, ScoringInput};
use crate::core::normalize::loosely_related;
use crate::core::skills::SkillMatcher;
use crate::core::tables::ScoringTables;
use crate::domain::model::{
    Component, ComponentScore, Project, ProjectsExplanation, ScoreExplanation,
};
use std::sync::Arc;

const NO_PROJECTS_SCORE: f64 = 5.0;
const FAKE_PROJECT_PENALTY: f64 = 2.0;
const DESCRIPTION_MIN_CHARS: usize = 50;
const MIN_TECHNOLOGIES: usize = 3;
const RELEVANCE_BONUS_MAX: f64 = 5.0;
const NO_RELEVANT_PROJECT_PENALTY: f64 = -6.0;
const FEW_RELEVANT_PROJECTS_PENALTY: f64 = -3.0;

/// Projects & impact (0-20). Quality beats quantity; demo/tutorial projects cost points.
pub struct ProjectsScorer {
    tables: Arc<ScoringTables>,
}

#[derive(Debug, Default)]
struct Tally {
    fake: usize,
    quality: usize,
    relevant: usize,
    relevance_bonus: f64,
}

impl ProjectsScorer {
    pub fn new(tables: Arc<ScoringTables>) -> Self {
        Self { tables }
    }

    fn inspect(&self, project: &Project, input: &ScoringInput<'_>, tally: &mut Tally) {
        if self
            .tables
            .is_fake_project(&project.title, &project.description)
        {
            tally.fake += 1;
            return;
        }

        if project.description.chars().count() > DESCRIPTION_MIN_CHARS {
            tally.quality += 1;
        }
        if project.technologies.len() >= MIN_TECHNOLOGIES {
            tally.quality += 1;
        }

        if input.job.has_required_skills() && !project.technologies.is_empty() {
            let matched = SkillMatcher::new(&self.tables)
                .match_skills(&project.technologies, &input.job.required_skills)
                .matched;
            if matched > 0 {
                tally.relevant += 1;
                tally.quality += 1;
                tally.relevance_bonus += match matched {
                    1 => 1.0,
                    2 => 1.5,
                    _ => 2.5,
                };
            }
        }

        let realistic = project.technologies.iter().any(|tech| {
            input
                .experience_technologies
                .iter()
                .any(|used| loosely_related(tech, used))
        });
        if realistic {
            tally.quality += 1;
        }
    }
}

/// Volume/quality tier. Counts every listed project, fakes included.
fn base_score(project_count: usize, quality: usize) -> f64 {
    let high = quality >= project_count * 2;
    let decent = quality >= project_count;
    match project_count {
        n if n >= 3 && high => 15.0,
        n if n >= 3 && decent => 13.0,
        n if n <= 2 && high => 12.0,
        n if n <= 2 && decent => 10.0,
        n if n > 5 => 8.0,
        _ => 6.0,
    }
}

impl ComponentScorer for ProjectsScorer {
    fn component(&self) -> Component {
        Component::ProjectsImpact
    }

    fn score(&self, input: &ScoringInput<'_>) -> ComponentScore {
        let projects = &input.profile.projects;
        if projects.is_empty() {
            return ComponentScore::new(
                self.component(),
                NO_PROJECTS_SCORE,
                "No projects listed (low score - projects expected)",
                ScoreExplanation::Projects(ProjectsExplanation::default()),
            );
        }

        let mut tally = Tally::default();
        for project in projects {
            self.inspect(project, input, &mut tally);
        }

        let base = base_score(projects.len(), tally.quality);
        let bonus = tally.relevance_bonus.min(RELEVANCE_BONUS_MAX);
        let penalty = if !input.job.has_required_skills() {
            0.0
        } else if tally.relevant == 0 {
            NO_RELEVANT_PROJECT_PENALTY
        } else if (tally.relevant as f64) < projects.len() as f64 / 2.0 {
            FEW_RELEVANT_PROJECTS_PENALTY
        } else {
            0.0
        };
        let raw = base + bonus + penalty - FAKE_PROJECT_PENALTY * tally.fake as f64;

        tracing::trace!(projects = projects.len(), fake = tally.fake, raw, "projects scored");

        ComponentScore::new(
            self.component(),
            raw.clamp(0.0, Component::ProjectsImpact.max()),
            format!(
                "{} project(s) with {} quality indicators, {} relevant to job",
                projects.len(),
                tally.quality,
                tally.relevant
            ),
            ScoreExplanation::Projects(ProjectsExplanation {
                project_count: projects.len(),
                fake_projects: tally.fake,
                quality_indicators: tally.quality,
                base_score: base,
                relevance_bonus: bonus,
                relevance_penalty: penalty,
                projects_with_required_skills: tally.relevant,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CandidateProfile, Experience, JobRequirements};

    fn project(title: &str, description: &str, techs: &[&str]) -> Project {
        Project {
            title: title.to_string(),
            description: description.to_string(),
            technologies: techs.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn score(profile: &CandidateProfile, job: &JobRequirements) -> ComponentScore {
        let tables = Arc::new(ScoringTables::default());
        let input = ScoringInput::new(profile, job, &tables);
        ProjectsScorer::new(tables.clone()).score(&input)
    }

    fn with_projects(projects: Vec<Project>) -> CandidateProfile {
        CandidateProfile {
            projects,
            ..CandidateProfile::default()
        }
    }

    fn rust_job() -> JobRequirements {
        JobRequirements {
            required_skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            ..JobRequirements::default()
        }
    }

    const LONG: &str = "A distributed job scheduler with persistent queues and retries across nodes";

    #[test]
    fn test_no_projects_scores_five() {
        let result = score(&CandidateProfile::default(), &JobRequirements::default());
        assert_eq!(result.value, 5.0);
    }

    #[test]
    fn test_demo_project_floors_at_zero() {
        let profile = with_projects(vec![project("Demo app", "", &[])]);
        let result = score(&profile, &rust_job());
        assert_eq!(result.value, 0.0);
        match &result.explanation {
            ScoreExplanation::Projects(e) => {
                assert_eq!(e.fake_projects, 1);
                assert_eq!(e.relevance_penalty, -6.0);
            }
            other => panic!("unexpected explanation {:?}", other),
        }
    }

    #[test]
    fn test_single_relevant_quality_project() {
        // long description + 3 techs + relevance => 3 indicators, base 12, bonus 1.5
        let profile = with_projects(vec![project(
            "Scheduler",
            LONG,
            &["Rust", "PostgreSQL", "Redis"],
        )]);
        let result = score(&profile, &rust_job());
        assert_eq!(result.value, 13.5);
        assert_eq!(
            result.reason,
            "1 project(s) with 3 quality indicators, 1 relevant to job"
        );
    }

    #[test]
    fn test_realism_counts_experience_overlap() {
        let profile = CandidateProfile {
            projects: vec![project("Scheduler", "short", &["Go"])],
            experience: vec![Experience {
                technologies: vec!["Go".to_string()],
                ..Experience::default()
            }],
            ..CandidateProfile::default()
        };
        // one indicator for one project => base 10
        let result = score(&profile, &JobRequirements::default());
        assert_eq!(result.value, 10.0);
    }

    #[test]
    fn test_irrelevant_projects_are_penalized() {
        let profile = with_projects(vec![
            project("Shop", LONG, &["PHP", "MySQL", "jQuery"]),
            project("Blog", LONG, &["Ruby", "Rails", "Redis"]),
            project("Chat", LONG, &["Elixir", "Phoenix", "Redis"]),
        ]);
        // 6 indicators over 3 projects => 15, none relevant => -6
        let result = score(&profile, &rust_job());
        assert_eq!(result.value, 9.0);
    }

    #[test]
    fn test_many_shallow_projects() {
        let profile = with_projects((0..6).map(|i| project(&format!("P{}", i), "", &[])).collect());
        let result = score(&profile, &JobRequirements::default());
        assert_eq!(result.value, 8.0);
    }

    #[test]
    fn test_base_tiers() {
        assert_eq!(base_score(3, 6), 15.0);
        assert_eq!(base_score(3, 3), 13.0);
        assert_eq!(base_score(2, 4), 12.0);
        assert_eq!(base_score(2, 2), 10.0);
        assert_eq!(base_score(6, 1), 8.0);
        assert_eq!(base_score(4, 1), 6.0);
    }
}
