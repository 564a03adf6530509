use super::{ComponentScorer, ScoringInput};
use crate::core::normalize::{loosely_related, normalize_skill};
use crate::core::tables::ScoringTables;
use crate::domain::model::{Component, ComponentScore, ScoreExplanation, SignalExplanation};
use std::collections::BTreeSet;
use std::sync::Arc;

const COHERENCE_MAX: f64 = 5.0;
const CAREER_STEP: f64 = 1.5;
const CAREER_MIN: f64 = -1.5;
const CAREER_MAX: f64 = 3.0;
const RED_FLAG_STEP: f64 = 0.5;
const RED_FLAG_MAX: f64 = 2.0;

const MANY_SKILLS: usize = 10;
const DIVERSE_STACK: usize = 15;
const FEW_EXPERIENCES: usize = 3;
const STUCK_JUNIOR_EXPERIENCES: usize = 3;

/// Signal & consistency (0-10). Penalty-only: starts at full credit and deducts for
/// incoherence, career red flags and missing information. Career progression can win
/// back deducted points but never lifts the score above 10.
pub struct SignalScorer {
    tables: Arc<ScoringTables>,
}

fn related_ratio(items: &[&str], pool: &[&str]) -> f64 {
    let related = items
        .iter()
        .filter(|item| pool.iter().any(|other| loosely_related(item, other)))
        .count();
    related as f64 / items.len() as f64
}

impl SignalScorer {
    pub fn new(tables: Arc<ScoringTables>) -> Self {
        Self { tables }
    }

    fn coherence_issues(&self, input: &ScoringInput<'_>) -> u32 {
        let mut issues = 0;
        if input.skills.is_empty() {
            return issues;
        }

        if !input.experience_technologies.is_empty() {
            let ratio = related_ratio(&input.skills, &input.experience_technologies);
            if ratio < 0.3 {
                issues += 2;
            } else if ratio < 0.5 {
                issues += 1;
            }
        }

        let project_techs: Vec<&str> = input
            .profile
            .projects
            .iter()
            .flat_map(|p| p.technologies.iter().map(String::as_str))
            .collect();
        if !project_techs.is_empty() && related_ratio(&project_techs, &input.skills) < 0.3 {
            issues += 1;
        }
        issues
    }

    /// Career issue count: positive when stuck in junior roles, negative on progression.
    fn career(&self, input: &ScoringInput<'_>) -> (f64, bool) {
        let roles = input
            .profile
            .experience
            .iter()
            .map(|exp| exp.role.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        let mentions = |keywords: &[String]| keywords.iter().any(|kw| roles.contains(kw.as_str()));
        let junior = mentions(&self.tables.junior_role_keywords);
        let senior = mentions(&self.tables.senior_role_keywords);

        let mut issues = 0.0;
        if junior && !senior && input.profile.experience.len() > STUCK_JUNIOR_EXPERIENCES {
            issues += 0.5;
        }
        let progression = junior && senior;
        if progression {
            issues -= 0.5;
        }
        (issues, progression)
    }

    fn red_flags(&self, input: &ScoringInput<'_>) -> (Vec<String>, f64) {
        let mut flags = Vec::new();
        let mut count = 0.0;
        let experiences = input.profile.experience.len();

        if input.skills.len() > MANY_SKILLS && experiences == 0 {
            count += 1.0;
            flags.push("Many skills listed without experience".to_string());
        }

        let distinct: BTreeSet<String> = input
            .experience_technologies
            .iter()
            .map(|tech| normalize_skill(tech))
            .collect();
        if distinct.len() > DIVERSE_STACK && experiences < FEW_EXPERIENCES {
            count += 1.0;
            flags.push("Unusually diverse tech stack for experience level".to_string());
        }

        if input.profile.contact_email().is_none() {
            count += 0.5;
            flags.push("Missing contact information".to_string());
        }
        (flags, count)
    }
}

impl ComponentScorer for SignalScorer {
    fn component(&self) -> Component {
        Component::SignalConsistency
    }

    fn score(&self, input: &ScoringInput<'_>) -> ComponentScore {
        let coherence_issues = self.coherence_issues(input);
        let coherence_deduction = f64::from(coherence_issues).min(COHERENCE_MAX);

        let (career_issues, progression) = self.career(input);
        let career_deduction = (career_issues * CAREER_STEP).clamp(CAREER_MIN, CAREER_MAX);

        let (red_flags, red_flag_count) = self.red_flags(input);
        let red_flag_deduction = (red_flag_count * RED_FLAG_STEP).min(RED_FLAG_MAX);

        let max = Component::SignalConsistency.max();
        let raw = max - coherence_deduction - career_deduction - red_flag_deduction;

        ComponentScore::new(
            self.component(),
            raw.clamp(0.0, max),
            "CV coherence and consistency check",
            ScoreExplanation::Signal(SignalExplanation {
                coherence_issues,
                coherence_deduction,
                progression_bonus: progression,
                career_deduction,
                red_flags,
                red_flag_count,
                red_flag_deduction,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CandidateProfile, Experience, JobRequirements, Project};
    use std::collections::BTreeMap;

    fn exp(role: &str, techs: &[&str]) -> Experience {
        Experience {
            role: role.to_string(),
            technologies: techs.iter().map(|t| t.to_string()).collect(),
            ..Experience::default()
        }
    }

    fn with_email(mut profile: CandidateProfile) -> CandidateProfile {
        profile.personal_info.email = Some("dev@example.com".to_string());
        profile
    }

    fn skills(items: &[&str]) -> BTreeMap<String, Vec<String>> {
        let mut map = BTreeMap::new();
        map.insert(
            "other".to_string(),
            items.iter().map(|s| s.to_string()).collect(),
        );
        map
    }

    fn score(profile: &CandidateProfile) -> ComponentScore {
        let tables = Arc::new(ScoringTables::default());
        let job = JobRequirements::default();
        let input = ScoringInput::new(profile, &job, &tables);
        SignalScorer::new(tables.clone()).score(&input)
    }

    fn explanation(score: &ComponentScore) -> &SignalExplanation {
        match &score.explanation {
            ScoreExplanation::Signal(e) => e,
            other => panic!("unexpected explanation {:?}", other),
        }
    }

    #[test]
    fn test_clean_profile_keeps_full_score() {
        let profile = with_email(CandidateProfile {
            experience: vec![exp("Developer", &["Rust", "Go"])],
            skills: skills(&["Rust", "Go"]),
            ..CandidateProfile::default()
        });
        assert_eq!(score(&profile).value, 10.0);
    }

    #[test]
    fn test_missing_email_is_a_half_flag() {
        let result = score(&CandidateProfile::default());
        assert_eq!(result.value, 9.75);
        assert_eq!(explanation(&result).red_flags, vec!["Missing contact information"]);
    }

    #[test]
    fn test_skills_unrelated_to_experience() {
        let profile = with_email(CandidateProfile {
            experience: vec![exp("Developer", &["Cobol"])],
            skills: skills(&["Rust", "Go", "Haskell", "Elm"]),
            projects: vec![Project {
                technologies: vec!["Fortran".to_string()],
                ..Project::default()
            }],
            ..CandidateProfile::default()
        });
        let result = score(&profile);
        assert_eq!(explanation(&result).coherence_issues, 3);
        assert_eq!(result.value, 7.0);
    }

    #[test]
    fn test_progression_offsets_deductions_but_never_exceeds_max() {
        let clean = with_email(CandidateProfile {
            experience: vec![exp("Intern", &[]), exp("Senior Engineer", &[])],
            ..CandidateProfile::default()
        });
        let result = score(&clean);
        assert!(explanation(&result).progression_bonus);
        assert_eq!(explanation(&result).career_deduction, -0.75);
        assert_eq!(result.value, 10.0);

        let no_email = CandidateProfile {
            experience: clean.experience.clone(),
            ..CandidateProfile::default()
        };
        assert_eq!(score(&no_email).value, 10.0);
    }

    #[test]
    fn test_stuck_in_junior_roles() {
        let profile = with_email(CandidateProfile {
            experience: (0..4).map(|_| exp("Junior Developer", &[])).collect(),
            ..CandidateProfile::default()
        });
        assert_eq!(score(&profile).value, 9.25);
    }

    #[test]
    fn test_many_skills_without_experience() {
        let many: Vec<String> = (0..11).map(|i| format!("skill{}", i)).collect();
        let refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let profile = with_email(CandidateProfile {
            skills: skills(&refs),
            ..CandidateProfile::default()
        });
        assert_eq!(score(&profile).value, 9.5);
    }

    #[test]
    fn test_diverse_stack_for_short_history() {
        let techs: Vec<String> = (0..16).map(|i| format!("tech{}", i)).collect();
        let refs: Vec<&str> = techs.iter().map(String::as_str).collect();
        let profile = with_email(CandidateProfile {
            experience: vec![exp("Developer", &refs)],
            ..CandidateProfile::default()
        });
        let result = score(&profile);
        assert_eq!(result.value, 9.5);
        assert_eq!(
            explanation(&result).red_flags,
            vec!["Unusually diverse tech stack for experience level"]
        );
    }
}
