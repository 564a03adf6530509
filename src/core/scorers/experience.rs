use super::{ComponentScorer, ScoringInput};
use crate::core::normalize::{
    duration_bucket_score, duration_months, normalize_company, recency_bonus,
};
use crate::core::skills::SkillMatcher;
use crate::core::tables::ScoringTables;
use crate::domain::model::{
    round2, Component, ComponentScore, Experience, ExperienceDetail, ExperienceExplanation,
    JobRequirements, ScoreExplanation,
};
use std::sync::Arc;

const COMPANY_MAX: f64 = 15.0;
const ROLE_MAX: f64 = 10.0;
const DURATION_MAX: f64 = 10.0;
/// Role score when the job gives nothing to compare against.
const ROLE_BASE: f64 = 5.0;
const ROLE_KEYWORD_MIN_LEN: usize = 3;
const MULTI_EXPERIENCE_STEP: f64 = 1.5;
const MULTI_EXPERIENCE_MAX_EXTRA: usize = 3;

/// Experience quality (0-35): company reputation, role relevance and tenure per entry,
/// combined so one standout entry dominates while extra history still counts.
pub struct ExperienceScorer {
    tables: Arc<ScoringTables>,
    reference_year: i32,
}

impl ExperienceScorer {
    pub fn new(tables: Arc<ScoringTables>, reference_year: i32) -> Self {
        Self {
            tables,
            reference_year,
        }
    }

    fn role_relevance(&self, exp: &Experience, job: &JobRequirements) -> f64 {
        if job.has_required_skills() && !exp.technologies.is_empty() {
            let result =
                SkillMatcher::new(&self.tables).match_skills(&exp.technologies, &job.required_skills);
            return ROLE_MAX * result.ratio();
        }

        if let Some(job_role) = job.role() {
            let job_role = normalize_company(job_role);
            let role = normalize_company(&exp.role);
            let keywords: Vec<&str> = job_role.split_whitespace().collect();
            let matches = keywords
                .iter()
                .filter(|kw| kw.chars().count() > ROLE_KEYWORD_MIN_LEN && role.contains(**kw))
                .count();
            return ROLE_MAX * matches as f64 / keywords.len().max(1) as f64;
        }

        ROLE_BASE
    }

    fn score_entry(&self, exp: &Experience, job: &JobRequirements) -> ExperienceDetail {
        let (tier, multiplier) = self.tables.tier_of(&exp.company);
        let company_score = COMPANY_MAX * multiplier;
        let role_score = self.role_relevance(exp, job).min(ROLE_MAX);

        let months = duration_months(&exp.period, exp.duration.as_deref(), &self.tables);
        let duration_score = (duration_bucket_score(months)
            + recency_bonus(&exp.period, self.reference_year, &self.tables))
        .min(DURATION_MAX);

        ExperienceDetail {
            company: exp.company.clone(),
            tier: tier.to_string(),
            company_score: round2(company_score),
            role_score: round2(role_score),
            duration_months: (months * 10.0).round() / 10.0,
            duration_score: round2(duration_score),
            experience_score: round2(company_score + role_score + duration_score),
        }
    }
}

/// Best entry weighs half, the mean of the others the other half, plus a breadth bonus.
fn aggregate(entry_scores: &[f64]) -> (f64, f64) {
    let max = Component::ExperienceQuality.max();
    match entry_scores {
        [] => (0.0, 0.0),
        [only] => (only.min(max), 0.0),
        _ => {
            let mut sorted = entry_scores.to_vec();
            sorted.sort_by(|a, b| b.total_cmp(a));
            let best = sorted[0];
            let rest = &sorted[1..];
            let rest_avg = rest.iter().sum::<f64>() / rest.len() as f64;
            let bonus =
                MULTI_EXPERIENCE_STEP * rest.len().min(MULTI_EXPERIENCE_MAX_EXTRA) as f64;
            ((best * 0.5 + rest_avg * 0.5 + bonus).min(max), bonus)
        }
    }
}

impl ComponentScorer for ExperienceScorer {
    fn component(&self) -> Component {
        Component::ExperienceQuality
    }

    fn score(&self, input: &ScoringInput<'_>) -> ComponentScore {
        let experiences = &input.profile.experience;
        if experiences.is_empty() {
            return ComponentScore::new(
                self.component(),
                0.0,
                "No experience",
                ScoreExplanation::Experience(ExperienceExplanation::default()),
            );
        }

        let details: Vec<ExperienceDetail> = experiences
            .iter()
            .map(|exp| self.score_entry(exp, input.job))
            .collect();
        let entry_scores: Vec<f64> = details.iter().map(|d| d.experience_score).collect();
        let (score, bonus) = aggregate(&entry_scores);

        tracing::trace!(entries = details.len(), score, "experience scored");

        ComponentScore::new(
            self.component(),
            score,
            format!("Experience at {} company/ies", experiences.len()),
            ScoreExplanation::Experience(ExperienceExplanation {
                total_experiences: experiences.len(),
                details,
                multi_experience_bonus: bonus,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CandidateProfile;

    fn experience(company: &str, role: &str, period: &str, techs: &[&str]) -> Experience {
        Experience {
            company: company.to_string(),
            role: role.to_string(),
            period: period.to_string(),
            technologies: techs.iter().map(|t| t.to_string()).collect(),
            ..Experience::default()
        }
    }

    fn scorer() -> ExperienceScorer {
        ExperienceScorer::new(Arc::new(ScoringTables::default()), 2026)
    }

    fn score_profile(experiences: Vec<Experience>, job: &JobRequirements) -> ComponentScore {
        let profile = CandidateProfile {
            experience: experiences,
            ..CandidateProfile::default()
        };
        let tables = ScoringTables::default();
        scorer().score(&ScoringInput::new(&profile, job, &tables))
    }

    fn details(score: &ComponentScore) -> &[ExperienceDetail] {
        match &score.explanation {
            ScoreExplanation::Experience(e) => &e.details,
            other => panic!("unexpected explanation {:?}", other),
        }
    }

    #[test]
    fn test_no_experience_scores_zero() {
        let score = score_profile(vec![], &JobRequirements::default());
        assert_eq!(score.value, 0.0);
        assert_eq!(score.reason, "No experience");
    }

    #[test]
    fn test_tier_one_company_score() {
        let score = score_profile(
            vec![experience("Google", "Engineer", "2020 - 2023", &[])],
            &JobRequirements::default(),
        );
        assert_eq!(details(&score)[0].company_score, 15.0);
        assert_eq!(details(&score)[0].tier, "tier1");
    }

    #[test]
    fn test_unknown_company_score() {
        let score = score_profile(
            vec![experience("Acme Corp", "Engineer", "2020 - 2023", &[])],
            &JobRequirements::default(),
        );
        assert!((details(&score)[0].company_score - 4.95).abs() < 1e-9);
    }

    #[test]
    fn test_single_entry_breakdown() {
        // Google (15) + base role (5) + 36 months (10) capped with recency 0 => 30
        let score = score_profile(
            vec![experience("Google", "Engineer", "2020 - 2023", &[])],
            &JobRequirements::default(),
        );
        let d = &details(&score)[0];
        assert_eq!(d.role_score, 5.0);
        assert_eq!(d.duration_months, 36.0);
        assert_eq!(d.duration_score, 10.0);
        assert_eq!(score.value, 30.0);
    }

    #[test]
    fn test_role_relevance_from_required_skills() {
        let job = JobRequirements {
            required_skills: vec!["Java".to_string(), "Spring".to_string()],
            ..JobRequirements::default()
        };
        let score = score_profile(
            vec![experience("Acme", "Dev", "2024 - 2025", &["Java", "Docker"])],
            &job,
        );
        assert_eq!(details(&score)[0].role_score, 5.0);
    }

    #[test]
    fn test_role_relevance_from_job_role_keywords() {
        let job = JobRequirements {
            role: Some("Backend Developer".to_string()),
            ..JobRequirements::default()
        };
        let score = score_profile(
            vec![experience("Acme", "Senior Backend Engineer", "2024 - 2025", &[])],
            &job,
        );
        assert_eq!(details(&score)[0].role_score, 5.0);
    }

    #[test]
    fn test_duration_with_recency_is_capped() {
        // 24 months (9) + ended last year (1.5) => capped at 10
        let score = score_profile(
            vec![experience("Acme", "Dev", "2023 - 2025", &[])],
            &JobRequirements::default(),
        );
        assert_eq!(details(&score)[0].duration_score, 10.0);
    }

    #[test]
    fn test_old_experience_loses_recency() {
        // 12 months (7) ended 6 years before the reference year (-1) => 6
        let score = score_profile(
            vec![experience("Acme", "Dev", "2019 - 2020", &[])],
            &JobRequirements::default(),
        );
        assert_eq!(details(&score)[0].duration_score, 6.0);
    }

    #[test]
    fn test_aggregate_weights_best_and_rest() {
        let (score, bonus) = aggregate(&[30.0, 10.0, 20.0]);
        // 30*0.5 + 15*0.5 + 2*1.5
        assert_eq!(bonus, 3.0);
        assert_eq!(score, 25.5);
    }

    #[test]
    fn test_aggregate_bonus_stops_after_three_extra_entries() {
        let (_, bonus) = aggregate(&[10.0; 6]);
        assert_eq!(bonus, 4.5);
        let (score, _) = aggregate(&[35.0; 5]);
        assert_eq!(score, 35.0);
    }
}
