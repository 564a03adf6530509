//! Renders ranked candidates as a text report, a JSON document or a CSV summary.

use crate::domain::model::{Component, JobRequirements, RankedCandidate};
use crate::domain::ports::SkippedFile;
use crate::utils::error::{RankError, Result};
use serde::Serialize;

pub const RANKING_PHILOSOPHY: &str = "Candidates are ranked using a structured, explainable \
scoring model inspired by real recruiter decision processes, not AI intuition.";

const BANNER_WIDTH: usize = 80;
const LABEL_WIDTH: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub const NAMES: [&'static str; 3] = ["text", "json", "csv"];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            _ => None,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ReportFormat::Text => "ranking.txt",
            ReportFormat::Json => "ranking.json",
            ReportFormat::Csv => "ranking.csv",
        }
    }
}

pub fn render_text(ranked: &[RankedCandidate]) -> String {
    let heavy = "=".repeat(BANNER_WIDTH);
    let light = "-".repeat(BANNER_WIDTH);
    let mut lines = vec![
        heavy.clone(),
        "CV RANKING RESULTS".to_string(),
        heavy,
        String::new(),
        "Philosophy: Candidates are ranked using a structured, explainable".to_string(),
        "scoring model inspired by real recruiter decision processes,".to_string(),
        "not AI intuition.".to_string(),
        String::new(),
        light.clone(),
        String::new(),
    ];

    for candidate in ranked {
        lines.push(format!("Rank #{}: {}", candidate.rank, candidate.candidate_name));
        lines.push(format!("Total Score: {:.2}/100", candidate.total_score));
        lines.push(String::new());
        lines.push("Score Breakdown:".to_string());
        for component in Component::ALL {
            let score = candidate.scores.get(component);
            lines.push(format!(
                "  {:<width$}{:.2}/{}",
                format!("{}:", component.label()),
                score.value,
                score.max,
                width = LABEL_WIDTH
            ));
        }
        lines.push(String::new());
        lines.push(format!("Explanation: {}", candidate.explanation));
        lines.push(String::new());
        lines.push(light.clone());
        lines.push(String::new());
    }

    lines.join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    ranking_philosophy: &'a str,
    job_requirements: &'a JobRequirements,
    reference_year: i32,
    ranked_candidates: &'a [RankedCandidate],
    skipped_files: &'a [SkippedFile],
}

pub fn render_json(
    ranked: &[RankedCandidate],
    job: &JobRequirements,
    reference_year: i32,
    skipped: &[SkippedFile],
) -> Result<String> {
    let report = JsonReport {
        ranking_philosophy: RANKING_PHILOSOPHY,
        job_requirements: job,
        reference_year,
        ranked_candidates: ranked,
        skipped_files: skipped,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[derive(Serialize)]
struct CsvRow<'a> {
    rank: usize,
    candidate_name: &'a str,
    total_score: f64,
    experience_quality: f64,
    technical_skills: f64,
    projects_impact: f64,
    education_certifications: f64,
    signal_consistency: f64,
    explanation: &'a str,
}

pub fn render_csv(ranked: &[RankedCandidate]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for candidate in ranked {
        let scores = &candidate.scores;
        writer.serialize(CsvRow {
            rank: candidate.rank,
            candidate_name: &candidate.candidate_name,
            total_score: candidate.total_score,
            experience_quality: scores.experience_quality.value,
            technical_skills: scores.technical_skills.value,
            projects_impact: scores.projects_impact.value,
            education_certifications: scores.education_certifications.value,
            signal_consistency: scores.signal_consistency.value,
            explanation: &candidate.explanation,
        })?;
    }
    let data = writer.into_inner().map_err(|e| RankError::ProcessingError {
        message: format!("Failed to flush CSV output: {}", e),
    })?;
    String::from_utf8(data).map_err(|e| RankError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::RankingEngine;
    use crate::domain::model::CandidateProfile;

    fn ranked() -> Vec<RankedCandidate> {
        let mut profile = CandidateProfile::default();
        profile.personal_info.full_name = Some("Ada, Lovelace".to_string());
        RankingEngine::default().rank(&[profile], &JobRequirements::default())
    }

    #[test]
    fn test_text_report_layout() {
        let text = render_text(&ranked());
        assert!(text.starts_with(&"=".repeat(80)));
        assert!(text.contains("CV RANKING RESULTS"));
        assert!(text.contains("Rank #1: Ada, Lovelace"));
        assert!(text.contains("Total Score: 14.75/100"));
        assert!(text.contains("  Experience Quality:         0.00/35"));
        assert!(text.contains("  Projects & Impact:          5.00/20"));
        assert!(text.contains("Explanation: - Lower technical skills relevance"));
    }

    #[test]
    fn test_empty_text_report_has_banner_only() {
        let text = render_text(&[]);
        assert!(text.contains("CV RANKING RESULTS"));
        assert!(!text.contains("Rank #"));
    }

    #[test]
    fn test_json_report_fields() {
        let skipped = [SkippedFile {
            path: "broken.json".to_string(),
            reason: "expected value at line 1 column 1".to_string(),
        }];
        let json = render_json(&ranked(), &JobRequirements::default(), 2026, &skipped).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ranking_philosophy"], RANKING_PHILOSOPHY);
        assert_eq!(value["reference_year"], 2026);
        assert_eq!(value["skipped_files"][0]["path"], "broken.json");
        let first = &value["ranked_candidates"][0];
        assert_eq!(first["rank"], 1);
        assert_eq!(first["scores"]["projects_impact"]["value"], 5.0);
        assert_eq!(
            first["scores"]["signal_consistency"]["explanation"]["component"],
            "signal"
        );
        assert_eq!(first["profile"]["personal_info"]["full_name"], "Ada, Lovelace");
    }

    #[test]
    fn test_csv_quotes_names() {
        let csv = render_csv(&ranked()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("rank,candidate_name,total_score,experience_quality,technical_skills,projects_impact,education_certifications,signal_consistency,explanation")
        );
        assert!(lines.next().unwrap().starts_with("1,\"Ada, Lovelace\",14.75,0.0,0.0,5.0,0.0,9.75,"));
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ReportFormat::parse("json"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::parse("JSON"), None);
        assert_eq!(ReportFormat::parse("xml"), None);
        assert_eq!(ReportFormat::Csv.file_name(), "ranking.csv");
    }
}
