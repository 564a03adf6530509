use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Extraction output often carries `null` where a list or string is expected.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn skill_categories<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<Vec<String>>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(category, skills)| (category, skills.unwrap_or_default()))
        .collect())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub emails: Vec<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    /// Free-text range such as "June 2023 - Present" or "2019 - 2022".
    #[serde(deserialize_with = "null_as_default")]
    pub period: String,
    pub duration: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(alias = "name", deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub field: String,
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
}

/// Structured resume as produced by the extraction step. Read-only for the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub personal_info: PersonalInfo,
    #[serde(alias = "experiences", deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "skill_categories")]
    pub skills: BTreeMap<String, Vec<String>>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub certifications: Vec<String>,
}

impl CandidateProfile {
    pub fn display_name(&self) -> &str {
        self.personal_info
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown")
    }

    pub fn contact_email(&self) -> Option<&str> {
        self.personal_info
            .email
            .iter()
            .chain(self.personal_info.emails.iter())
            .map(|e| e.trim())
            .find(|e| !e.is_empty())
    }

    /// Technologies of every experience entry, in entry order.
    pub fn experience_technologies(&self) -> Vec<&str> {
        self.experience
            .iter()
            .flat_map(|exp| exp.technologies.iter().map(String::as_str))
            .collect()
    }

    pub fn skills_in(&self, category: &str) -> &[String] {
        self.skills.get(category).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRequirements {
    pub role: Option<String>,
    /// Order matters: the first entries name the stack in explanations.
    #[serde(deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
    pub field: Option<String>,
}

impl JobRequirements {
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref().filter(|r| !r.trim().is_empty())
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref().filter(|f| !f.trim().is_empty())
    }

    pub fn has_required_skills(&self) -> bool {
        !self.required_skills.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    ExperienceQuality,
    TechnicalSkills,
    ProjectsImpact,
    EducationCertifications,
    SignalConsistency,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::ExperienceQuality,
        Component::TechnicalSkills,
        Component::ProjectsImpact,
        Component::EducationCertifications,
        Component::SignalConsistency,
    ];

    pub fn max(self) -> f64 {
        match self {
            Component::ExperienceQuality => 35.0,
            Component::TechnicalSkills => 25.0,
            Component::ProjectsImpact => 20.0,
            Component::EducationCertifications => 10.0,
            Component::SignalConsistency => 10.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Component::ExperienceQuality => "Experience Quality",
            Component::TechnicalSkills => "Technical Skills",
            Component::ProjectsImpact => "Projects & Impact",
            Component::EducationCertifications => "Education & Certifications",
            Component::SignalConsistency => "Signal & Consistency",
        }
    }
}

// ---------------------------------------------------------------------------
// Explanation records, one per scorer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceDetail {
    pub company: String,
    pub tier: String,
    pub company_score: f64,
    pub role_score: f64,
    pub duration_months: f64,
    pub duration_score: f64,
    pub experience_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceExplanation {
    pub total_experiences: usize,
    pub details: Vec<ExperienceDetail>,
    pub multi_experience_bonus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CoreMatch {
    /// Scored against the job's required skills.
    Required {
        matched: usize,
        total_required: usize,
        score: f64,
    },
    /// No required skills: breadth of the listed skills.
    Breadth { skill_count: usize, score: f64 },
}

impl CoreMatch {
    pub fn matched(&self) -> usize {
        match self {
            CoreMatch::Required { matched, .. } => *matched,
            CoreMatch::Breadth { .. } => 0,
        }
    }
}

impl Default for CoreMatch {
    fn default() -> Self {
        CoreMatch::Breadth {
            skill_count: 0,
            score: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsExplanation {
    pub skill_count: usize,
    pub core_match: CoreMatch,
    pub depth_score: f64,
    pub language_framework_bonus: bool,
    pub language_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectsExplanation {
    pub project_count: usize,
    pub fake_projects: usize,
    pub quality_indicators: usize,
    pub base_score: f64,
    pub relevance_bonus: f64,
    pub relevance_penalty: f64,
    pub projects_with_required_skills: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationExplanation {
    pub education_entries: usize,
    pub certifications: usize,
    pub field_relevant: bool,
    pub degree_score: f64,
    pub institution_score: f64,
    pub certifications_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalExplanation {
    pub coherence_issues: u32,
    pub coherence_deduction: f64,
    pub progression_bonus: bool,
    pub career_deduction: f64,
    pub red_flags: Vec<String>,
    pub red_flag_count: f64,
    pub red_flag_deduction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component", rename_all = "snake_case")]
pub enum ScoreExplanation {
    Experience(ExperienceExplanation),
    TechnicalSkills(SkillsExplanation),
    Projects(ProjectsExplanation),
    Education(EducationExplanation),
    Signal(SignalExplanation),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub component: Component,
    pub value: f64,
    pub max: f64,
    pub reason: String,
    pub explanation: ScoreExplanation,
}

impl ComponentScore {
    pub fn new(
        component: Component,
        value: f64,
        reason: impl Into<String>,
        explanation: ScoreExplanation,
    ) -> Self {
        Self {
            component,
            value: round2(value.clamp(0.0, component.max())),
            max: component.max(),
            reason: reason.into(),
            explanation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub experience_quality: ComponentScore,
    pub technical_skills: ComponentScore,
    pub projects_impact: ComponentScore,
    pub education_certifications: ComponentScore,
    pub signal_consistency: ComponentScore,
}

impl ComponentScores {
    pub fn get(&self, component: Component) -> &ComponentScore {
        match component {
            Component::ExperienceQuality => &self.experience_quality,
            Component::TechnicalSkills => &self.technical_skills,
            Component::ProjectsImpact => &self.projects_impact,
            Component::EducationCertifications => &self.education_certifications,
            Component::SignalConsistency => &self.signal_consistency,
        }
    }

    pub fn total(&self) -> f64 {
        round2(Component::ALL.iter().map(|c| self.get(*c).value).sum())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub candidate_name: String,
    pub total_score: f64,
    pub scores: ComponentScores,
    /// Signed phrases joined with " | ".
    pub explanation: String,
    pub profile: CandidateProfile,
}

/// Two-decimal rounding applied to every published score.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
