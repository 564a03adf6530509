//! Lookup tables used by the scorers.
//!
//! The tables are plain data: built-in defaults live here, and a `[tables]` section in the
//! TOML configuration can replace any of them. Scorers receive a shared `Arc<ScoringTables>`
//! at construction time, so a test can rank against a substituted table set.

use crate::core::normalize::{normalize_company, normalize_skill};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};

pub const BUILTIN_TABLES_VERSION: &str = "2026.1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyTier {
    pub id: String,
    /// Fraction of the maximum company-reputation score.
    pub multiplier: f64,
    #[serde(default)]
    pub companies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionKeywords {
    pub section: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTables {
    pub version: String,
    /// Ordered from highest reputation to lowest; the first tier with a matching name wins.
    pub company_tiers: Vec<CompanyTier>,
    pub default_tier: CompanyTier,
    /// Match tier names of at most three characters ("x", "ey", "hp") only as whole words.
    /// Off by default: every tier name matches as a plain substring.
    pub short_names_whole_word: bool,
    pub skill_variations: Vec<Vec<String>>,
    pub recognized_certifications: Vec<String>,
    pub fake_project_keywords: Vec<String>,
    pub junior_role_keywords: Vec<String>,
    pub senior_role_keywords: Vec<String>,
    pub institution_keywords: Vec<String>,
    pub master_degree_terms: Vec<String>,
    pub bachelor_degree_terms: Vec<String>,
    pub ongoing_markers: Vec<String>,
    pub month_names: Vec<(String, u32)>,
    pub language_categories: Vec<String>,
    pub framework_categories: Vec<String>,
    /// Skill categories left out of technical scoring.
    pub excluded_skill_categories: Vec<String>,
    pub section_keywords: Vec<SectionKeywords>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn tier(id: &str, multiplier: f64, companies: &[&str]) -> CompanyTier {
    CompanyTier {
        id: id.to_string(),
        multiplier,
        companies: strings(companies),
    }
}

fn section(name: &str, keywords: &[&str]) -> SectionKeywords {
    SectionKeywords {
        section: name.to_string(),
        keywords: strings(keywords),
    }
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self {
            version: BUILTIN_TABLES_VERSION.to_string(),
            company_tiers: vec![
                tier(
                    "tier1",
                    1.0,
                    &[
                        "google", "microsoft", "amazon", "apple", "meta", "facebook", "netflix",
                        "oracle", "salesforce", "adobe", "nvidia", "intel", "ibm", "cisco",
                        "vmware", "palantir", "uber", "airbnb", "linkedin", "twitter", "x",
                        "tesla", "spacex", "spotify", "snap", "snapchat", "pinterest", "reddit",
                        "dropbox", "twitch", "github", "atlassian", "slack", "zoom", "bytedance",
                        "tiktok", "tencent", "alibaba",
                    ],
                ),
                tier(
                    "tier2",
                    0.8,
                    &[
                        "capgemini", "accenture", "atos", "cgi", "sopra steria", "deloitte",
                        "pwc", "kpmg", "ey", "ernst & young", "thales", "dassault", "sopra",
                        "steria", "orange", "bouygues", "hp", "dell", "lenovo", "siemens",
                        "bosch", "philips",
                    ],
                ),
                tier(
                    "tier3",
                    0.67,
                    &[
                        "sap", "red hat", "redhat", "mongodb", "elastic", "databricks",
                        "snowflake", "datadog", "splunk", "servicenow", "workday", "zendesk",
                        "shopify", "stripe", "square", "paypal", "ebay", "booking", "expedia",
                        "trivago", "delivery hero", "doordash", "instacart", "lyft", "grab",
                        "gojek", "yelp", "glassdoor",
                    ],
                ),
                tier(
                    "tier4",
                    0.47,
                    &[
                        "criteo", "blablacar", "doctolib", "veepee", "vinted", "mano mano",
                        "backmarket", "qonto", "alan", "ledger", "swile", "payfit",
                        "contentsquare", "algolia", "talend",
                    ],
                ),
            ],
            default_tier: tier("tier5", 0.33, &[]),
            short_names_whole_word: false,
            skill_variations: vec![
                strings(&["javascript", "js", "ecmascript"]),
                // kept alone so "java" never pairs with "javascript"
                strings(&["java"]),
                strings(&["typescript", "ts"]),
                strings(&["python", "py"]),
                strings(&["springboot", "spring"]),
                strings(&["nodejs", "node"]),
                strings(&["reactjs", "react"]),
                strings(&["vuejs", "vue"]),
                strings(&["angularjs", "angular"]),
            ],
            recognized_certifications: strings(&[
                "aws", "azure", "gcp", "google cloud", "kubernetes", "docker", "scrum", "pmp",
                "cisco", "ccna", "ccnp", "comptia", "itil", "oracle", "salesforce", "microsoft",
                "red hat", "mongodb",
            ]),
            fake_project_keywords: strings(&["example", "demo", "test", "tutorial", "hello world"]),
            junior_role_keywords: strings(&["intern", "stage", "junior", "trainee", "stagiaire"]),
            senior_role_keywords: strings(&[
                "senior", "lead", "architect", "manager", "chef", "principal", "staff",
            ]),
            institution_keywords: strings(&[
                "engineering", "école", "ecole", "school", "university", "université",
            ]),
            master_degree_terms: strings(&["master"]),
            bachelor_degree_terms: strings(&["bachelor", "licence"]),
            ongoing_markers: strings(&["present", "en cours", "in progress"]),
            month_names: [
                ("january", 1), ("february", 2), ("march", 3), ("april", 4), ("may", 5),
                ("june", 6), ("july", 7), ("august", 8), ("september", 9), ("october", 10),
                ("november", 11), ("december", 12), ("janvier", 1), ("fevrier", 2),
                ("mars", 3), ("avril", 4), ("mai", 5), ("juin", 6), ("juillet", 7),
                ("aout", 8), ("septembre", 9), ("octobre", 10), ("novembre", 11),
                ("decembre", 12),
            ]
            .iter()
            .map(|(name, month)| (name.to_string(), *month))
            .collect(),
            language_categories: strings(&["programming_languages"]),
            framework_categories: strings(&["frameworks"]),
            excluded_skill_categories: strings(&["soft_skills"]),
            section_keywords: vec![
                section(
                    "education",
                    &[
                        "education", "educ", "formation", "form", "academic", "academique",
                        "diploma", "diplome", "degree", "degrees", "studies", "etudes",
                        "university", "universite", "school", "ecole", "college",
                    ],
                ),
                section(
                    "experience",
                    &[
                        "experience", "exp", "experiences", "work", "travail", "employment",
                        "emploi", "career", "carriere", "professional", "professionnel",
                        "history", "historique", "positions", "postes", "jobs",
                    ],
                ),
                section(
                    "projects",
                    &[
                        "project", "projects", "projet", "projets", "portfolio", "portefolio",
                        "works", "realisations", "realization", "achievements",
                        "accomplissements",
                    ],
                ),
                section(
                    "skills",
                    &[
                        "skills", "skill", "competences", "competence", "technical",
                        "technique", "technologies", "technology", "tech", "tools", "outils",
                        "expertise", "abilities", "capacites", "know-how", "savoir-faire",
                    ],
                ),
                section(
                    "certifications",
                    &[
                        "certification", "certifications", "certificat", "certificats",
                        "certif", "certifcations", "certifcation", "cert", "certs",
                        "credentials", "credential", "license", "licence", "qualification",
                        "qualifications", "badge", "badges",
                    ],
                ),
                section(
                    "languages",
                    &[
                        "language", "languages", "langue", "langues", "linguistic",
                        "linguistique", "lang", "langs", "speaking", "parle", "bilingual",
                        "bilingue",
                    ],
                ),
                section(
                    "soft_skills",
                    &[
                        "soft skills", "softskill", "softskills", "personal", "personnel",
                        "interpersonal", "interpersonnel", "traits", "caracteristiques",
                        "attributes", "attributs", "qualities", "qualites",
                    ],
                ),
                section(
                    "contact",
                    &[
                        "contact", "contacts", "info", "information", "informations",
                        "details", "coordonnees", "address", "adresse", "phone", "telephone",
                        "email", "mail", "e-mail", "tel", "mobile", "cell",
                    ],
                ),
            ],
        }
    }
}

const SHORT_NAME_LEN: usize = 3;

fn contains_company(company: &str, name: &str, short_names_whole_word: bool) -> bool {
    if name.is_empty() {
        return false;
    }
    if short_names_whole_word && name.chars().count() <= SHORT_NAME_LEN {
        company
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| token == name)
    } else {
        company.contains(name)
    }
}

impl ScoringTables {
    /// Returns the tier id and multiplier for a company name.
    pub fn tier_of(&self, company: &str) -> (&str, f64) {
        let company = normalize_company(company);
        if !company.is_empty() {
            for tier in &self.company_tiers {
                if tier
                    .companies
                    .iter()
                    .any(|name| {
                        contains_company(
                            &company,
                            &normalize_company(name),
                            self.short_names_whole_word,
                        )
                    })
                {
                    return (&tier.id, tier.multiplier);
                }
            }
        }
        (&self.default_tier.id, self.default_tier.multiplier)
    }

    /// True when both normalized skills belong to the same variation group.
    pub fn same_variation_group(&self, a: &str, b: &str) -> bool {
        self.skill_variations.iter().any(|group| {
            let mut has_a = false;
            let mut has_b = false;
            for variant in group {
                let variant = normalize_skill(variant);
                has_a |= variant == a;
                has_b |= variant == b;
            }
            has_a && has_b
        })
    }

    pub fn is_recognized_certification(&self, certification: &str) -> bool {
        let certification = certification.to_lowercase();
        self.recognized_certifications
            .iter()
            .any(|known| certification.contains(known.as_str()))
    }

    pub fn is_fake_project(&self, title: &str, description: &str) -> bool {
        let title = title.to_lowercase();
        let description = description.to_lowercase();
        self.fake_project_keywords
            .iter()
            .any(|kw| title.contains(kw.as_str()) || description.contains(kw.as_str()))
    }

    pub fn is_technical_category(&self, category: &str) -> bool {
        !self.excluded_skill_categories.iter().any(|c| c == category)
    }

    /// Classifies a resume heading, returning the section name and a confidence.
    ///
    /// Exact keyword containment scores 1.0; a second pass folds the digits OCR tends to
    /// confuse with letters (0, 1, 5) and scores 0.8.
    pub fn section_for(&self, heading: &str) -> Option<(&str, f64)> {
        let text = heading.trim().to_lowercase();
        if let Some(section) = self.find_section(&text) {
            return Some((section, 1.0));
        }

        let folded: String = text
            .chars()
            .map(|c| match c {
                '0' => 'o',
                '1' => 'i',
                '5' => 's',
                other => other,
            })
            .collect();
        self.find_section(&folded).map(|section| (section, 0.8))
    }

    fn find_section(&self, text: &str) -> Option<&str> {
        self.section_keywords
            .iter()
            .find(|entry| entry.keywords.iter().any(|kw| text.contains(kw.as_str())))
            .map(|entry| entry.section.as_str())
    }
}

impl Validate for ScoringTables {
    fn validate(&self) -> Result<()> {
        for tier in self.company_tiers.iter().chain(std::iter::once(&self.default_tier)) {
            validate_range(
                &format!("tables.company_tiers.{}.multiplier", tier.id),
                tier.multiplier,
                0.0,
                1.0,
            )?;
        }
        for (name, month) in &self.month_names {
            validate_range(&format!("tables.month_names.{}", name), *month, 1, 12)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_one_company() {
        let tables = ScoringTables::default();
        assert_eq!(tables.tier_of("Google France"), ("tier1", 1.0));
        assert_eq!(tables.tier_of("  MICROSOFT  "), ("tier1", 1.0));
    }

    #[test]
    fn test_unknown_company_falls_to_default_tier() {
        let tables = ScoringTables::default();
        assert_eq!(tables.tier_of("Acme Corp"), ("tier5", 0.33));
        assert_eq!(tables.tier_of(""), ("tier5", 0.33));
    }

    #[test]
    fn test_multi_word_names_ignore_spacing() {
        let tables = ScoringTables::default();
        assert_eq!(tables.tier_of("Sopra   Steria Group"), ("tier2", 0.8));
        assert_eq!(tables.tier_of("Red Hat"), ("tier3", 0.67));
    }

    #[test]
    fn test_short_names_match_as_substrings_by_default() {
        let tables = ScoringTables::default();
        assert_eq!(tables.tier_of("Exxon"), ("tier1", 1.0));
        assert_eq!(tables.tier_of("Sapient"), ("tier3", 0.67));
        assert_eq!(tables.tier_of("Dexter Labs"), ("tier1", 1.0));
        assert_eq!(tables.tier_of("EY Advisory").0, "tier2");
    }

    #[test]
    fn test_short_names_whole_word_when_enabled() {
        let tables = ScoringTables {
            short_names_whole_word: true,
            ..ScoringTables::default()
        };
        // "x" and "ey" must not fire inside longer words
        assert_eq!(tables.tier_of("Exxon Mobil").0, "tier5");
        assert_eq!(tables.tier_of("Disney").0, "tier5");
        assert_eq!(tables.tier_of("Sapient").0, "tier5");
        assert_eq!(tables.tier_of("EY Advisory").0, "tier2");
        assert_eq!(tables.tier_of("HP Inc.").0, "tier2");
        assert_eq!(tables.tier_of("Google France").0, "tier1");
    }

    #[test]
    fn test_whole_word_flag_from_toml() {
        let tables: ScoringTables = toml::from_str("short_names_whole_word = true\n").unwrap();
        assert!(tables.short_names_whole_word);
        assert_eq!(tables.tier_of("Sapient").0, "tier5");
    }

    #[test]
    fn test_first_matching_tier_wins() {
        let mut tables = ScoringTables::default();
        tables.company_tiers[1].companies.push("google".to_string());
        assert_eq!(tables.tier_of("Google").0, "tier1");
    }

    #[test]
    fn test_substituted_tables() {
        let tables = ScoringTables {
            company_tiers: vec![tier("boutique", 0.9, &["acme"])],
            ..ScoringTables::default()
        };
        assert_eq!(tables.tier_of("Acme Corp"), ("boutique", 0.9));
        assert_eq!(tables.tier_of("Google").0, "tier5");
    }

    #[test]
    fn test_variation_groups() {
        let tables = ScoringTables::default();
        assert!(tables.same_variation_group("js", "javascript"));
        assert!(tables.same_variation_group("ecmascript", "js"));
        assert!(!tables.same_variation_group("java", "javascript"));
        assert!(!tables.same_variation_group("rust", "rust"));
    }

    #[test]
    fn test_recognized_certifications() {
        let tables = ScoringTables::default();
        assert!(tables.is_recognized_certification("AWS Solutions Architect"));
        assert!(tables.is_recognized_certification("CCNA Routing"));
        assert!(!tables.is_recognized_certification("First Aid"));
    }

    #[test]
    fn test_fake_project_keywords() {
        let tables = ScoringTables::default();
        assert!(tables.is_fake_project("Todo Demo", ""));
        assert!(tables.is_fake_project("App", "Built from a tutorial"));
        assert!(!tables.is_fake_project("Payment gateway", "Stripe integration"));
    }

    #[test]
    fn test_section_for_direct_and_folded() {
        let tables = ScoringTables::default();
        assert_eq!(tables.section_for("EDUCATION"), Some(("education", 1.0)));
        assert_eq!(tables.section_for("Work History"), Some(("experience", 1.0)));
        assert_eq!(tables.section_for("5KILLS"), Some(("skills", 0.8)));
        assert_eq!(tables.section_for("Hobbies"), None);
    }

    #[test]
    fn test_validate_rejects_bad_multiplier() {
        let mut tables = ScoringTables::default();
        assert!(tables.validate().is_ok());
        tables.company_tiers[0].multiplier = 1.5;
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_partial_override_from_toml() {
        let tables: ScoringTables = toml::from_str(
            r#"
version = "custom-1"
recognized_certifications = ["terraform"]
"#,
        )
        .unwrap();
        assert_eq!(tables.version, "custom-1");
        assert!(tables.is_recognized_certification("Terraform Associate"));
        assert!(!tables.is_recognized_certification("AWS"));
        assert_eq!(tables.tier_of("Google").0, "tier1");
    }
}
