//! Aggregation of component scores into an explanation line and a ranked order.

use crate::domain::model::{
    Component, ComponentScores, JobRequirements, RankedCandidate, ScoreExplanation,
};
use std::cmp::Ordering;

/// Adjacent candidates closer than this (and not exactly tied) go through the cascade.
pub const CLOSE_GAP: f64 = 2.0;
const TIE_BREAK_CASCADE: [Component; 3] = [
    Component::ExperienceQuality,
    Component::TechnicalSkills,
    Component::ProjectsImpact,
];
const COMPANY_DISPLAY_MAX: usize = 30;
const COMPANY_DISPLAY_KEEP: usize = 27;
const DEFAULT_EXPLANATION: &str = "Standard candidate profile";
const SEPARATOR: &str = " | ";

fn display_company(name: &str) -> String {
    if name.is_empty() {
        return "company".to_string();
    }
    if name.chars().count() > COMPANY_DISPLAY_MAX {
        let short: String = name.chars().take(COMPANY_DISPLAY_KEEP).collect();
        return format!("{}...", short);
    }
    name.to_string()
}

fn experience_phrase(scores: &ComponentScores) -> Option<String> {
    let component = &scores.experience_quality;
    let ScoreExplanation::Experience(explanation) = &component.explanation else {
        return None;
    };
    // first entry wins on equal scores
    let best = explanation.details.iter().reduce(|best, detail| {
        if detail.experience_score > best.experience_score {
            detail
        } else {
            best
        }
    })?;
    let company = display_company(&best.company);

    match component.value {
        v if v >= 25.0 => Some(format!("+ Strong experience at {}", company)),
        v if v >= 15.0 => Some(format!("+ Good experience at {}", company)),
        v if v < 10.0 => Some("- Limited experience".to_string()),
        _ => None,
    }
}

fn skills_phrase(scores: &ComponentScores, job: &JobRequirements) -> Option<String> {
    let component = &scores.technical_skills;
    let matched = match &component.explanation {
        ScoreExplanation::TechnicalSkills(explanation) => explanation.core_match.matched(),
        _ => 0,
    };

    if matched > 0 && job.has_required_skills() {
        let stack = job
            .required_skills
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("/");
        return Some(match component.value {
            v if v >= 18.0 => format!("+ High {} relevance", stack),
            v if v >= 12.0 => "+ Good technical skills match".to_string(),
            _ => "- Lower technical skills relevance".to_string(),
        });
    }
    (component.value < 10.0).then(|| "- Lower technical skills relevance".to_string())
}

fn projects_phrase(scores: &ComponentScores) -> Option<String> {
    match scores.projects_impact.value {
        v if v >= 15.0 => Some("+ Strong projects".to_string()),
        v if v < 8.0 => Some("- Fewer personal projects".to_string()),
        _ => None,
    }
}

fn signal_phrase(scores: &ComponentScores) -> Option<String> {
    (scores.signal_consistency.value < 7.0).then(|| "- CV consistency issues".to_string())
}

/// Signed phrases for the remarkable components, in component order.
pub fn build_explanation(scores: &ComponentScores, job: &JobRequirements) -> String {
    let phrases: Vec<String> = [
        experience_phrase(scores),
        skills_phrase(scores, job),
        projects_phrase(scores),
        signal_phrase(scores),
    ]
    .into_iter()
    .flatten()
    .collect();

    if phrases.is_empty() {
        DEFAULT_EXPLANATION.to_string()
    } else {
        phrases.join(SEPARATOR)
    }
}

/// Whether `lower` should move above `upper`: the first component of the cascade where
/// they differ decides.
fn should_swap(upper: &ComponentScores, lower: &ComponentScores) -> bool {
    for component in TIE_BREAK_CASCADE {
        let (a, b) = (upper.get(component).value, lower.get(component).value);
        match a.partial_cmp(&b) {
            Some(Ordering::Less) => return true,
            Some(Ordering::Equal) => continue,
            _ => return false,
        }
    }
    false
}

/// Stable sort by total score, one forward pass of adjacent tie-breaks, then 1-based ranks.
///
/// The pass is local: a candidate swapped down is compared again with its new
/// neighbour, but nothing is revisited, so ties are not resolved transitively.
pub fn order_candidates(mut candidates: Vec<RankedCandidate>) -> Vec<RankedCandidate> {
    candidates.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));

    for i in 1..candidates.len() {
        let gap = candidates[i - 1].total_score - candidates[i].total_score;
        if gap > 0.0
            && gap <= CLOSE_GAP
            && should_swap(&candidates[i - 1].scores, &candidates[i].scores)
        {
            tracing::debug!(
                upper = %candidates[i - 1].candidate_name,
                lower = %candidates[i].candidate_name,
                gap,
                "tie-break swap"
            );
            candidates.swap(i - 1, i);
        }
    }

    for (position, candidate) in candidates.iter_mut().enumerate() {
        candidate.rank = position + 1;
    }
    candidates
}
