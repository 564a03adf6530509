use super::{ComponentScorer, ScoringInput};
use crate::core::normalize::normalize_company;
use crate::core::tables::ScoringTables;
use crate::domain::model::{
    Component, ComponentScore, EducationEntry, EducationExplanation, ScoreExplanation,
};
use std::sync::Arc;

const DEGREE_MAX: f64 = 5.0;
const FIELD_RELEVANCE: f64 = 3.0;
const FIELD_KEYWORD_MIN_LEN: usize = 3;
const INSTITUTION_SCORE: f64 = 1.5;
const INSTITUTION_MAX: f64 = 3.0;
const CERTIFICATION_STEP: f64 = 0.5;
const CERTIFICATIONS_MAX: f64 = 2.0;

pub struct EducationScorer {
    tables: Arc<ScoringTables>,
}

impl EducationScorer {
    pub fn new(tables: Arc<ScoringTables>) -> Self {
        Self { tables }
    }

    fn degree_level(&self, degree: &str) -> f64 {
        let degree = degree.to_lowercase();
        let has = |terms: &[String]| terms.iter().any(|t| degree.contains(t.as_str()));
        if has(&self.tables.master_degree_terms) {
            2.0
        } else if has(&self.tables.bachelor_degree_terms) {
            1.5
        } else {
            1.0
        }
    }

    /// Returns the degree sub-score and whether a field matched the job field.
    ///
    /// The entry used for the level is the last one carrying a degree, scanning stops at
    /// the first field match.
    fn degree_score(&self, education: &[EducationEntry], job_field: Option<&str>) -> (f64, bool) {
        let job_keywords: Vec<String> = job_field
            .map(normalize_company)
            .map(|field| {
                field
                    .split_whitespace()
                    .filter(|kw| kw.chars().count() > FIELD_KEYWORD_MIN_LEN)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut chosen: Option<&EducationEntry> = None;
        let mut relevant = false;
        for entry in education {
            if chosen.is_none() || !entry.degree.is_empty() {
                chosen = Some(entry);
            }
            let field = normalize_company(&entry.field);
            if job_keywords.iter().any(|kw| field.contains(kw.as_str())) {
                relevant = true;
                break;
            }
        }

        let Some(chosen) = chosen else {
            return (0.0, false);
        };
        let mut score = self.degree_level(&chosen.degree);
        if relevant {
            score += FIELD_RELEVANCE;
        }
        (score.min(DEGREE_MAX), relevant)
    }

    fn institution_score(&self, education: &[EducationEntry]) -> f64 {
        let known = education.iter().any(|entry| {
            let institution = entry.institution.to_lowercase();
            self.tables
                .institution_keywords
                .iter()
                .any(|kw| institution.contains(kw.as_str()))
        });
        if known {
            INSTITUTION_SCORE.min(INSTITUTION_MAX)
        } else {
            0.0
        }
    }
}

impl ComponentScorer for EducationScorer {
    fn component(&self) -> Component {
        Component::EducationCertifications
    }

    fn score(&self, input: &ScoringInput<'_>) -> ComponentScore {
        let profile = input.profile;
        let (degree_score, field_relevant) =
            self.degree_score(&profile.education, input.job.field());
        let institution_score = self.institution_score(&profile.education);
        let recognized = profile
            .certifications
            .iter()
            .filter(|cert| self.tables.is_recognized_certification(cert))
            .count();
        let certifications_score = (recognized as f64 * CERTIFICATION_STEP).min(CERTIFICATIONS_MAX);

        ComponentScore::new(
            self.component(),
            (degree_score + institution_score + certifications_score)
                .min(Component::EducationCertifications.max()),
            format!(
                "Education: {} entry/ies, {} certification(s)",
                profile.education.len(),
                profile.certifications.len()
            ),
            ScoreExplanation::Education(EducationExplanation {
                education_entries: profile.education.len(),
                certifications: profile.certifications.len(),
                field_relevant,
                degree_score,
                institution_score,
                certifications_score,
            }),
        )
    }
}
