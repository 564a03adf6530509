use crate::core::tables::ScoringTables;
use regex::Regex;
use std::sync::LazyLock;

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20\d{2})\b").expect("year pattern is valid"));

static EXPLICIT_MONTHS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(?:mois|months?)").expect("duration pattern is valid")
});

/// Months assumed when a period cannot be resolved.
pub const MIN_DURATION_MONTHS: f64 = 2.0;

/// Lowercased, trimmed, inner whitespace collapsed to single spaces.
pub fn normalize_company(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Canonical key for a skill: lowercase with whitespace and periods removed.
pub fn normalize_skill(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Containment in either direction on normalized skill keys.
pub fn loosely_related(a: &str, b: &str) -> bool {
    let a = normalize_skill(a);
    let b = normalize_skill(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

pub fn is_ongoing(period: &str, tables: &ScoringTables) -> bool {
    let period = period.to_lowercase();
    tables
        .ongoing_markers
        .iter()
        .any(|marker| period.contains(marker.as_str()))
}

pub fn years_in(period: &str) -> Vec<i32> {
    YEAR_RE
        .captures_iter(period)
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

/// Derives a month count from the explicit duration text or the period string.
///
/// Resolution order: "N months"/"N mois" in `duration`, an ongoing marker (floors to the
/// minimum), two 20xx years, two month names, then the minimum.
pub fn duration_months(period: &str, duration: Option<&str>, tables: &ScoringTables) -> f64 {
    if let Some(duration) = duration {
        let duration = duration.to_lowercase();
        if let Some(months) = EXPLICIT_MONTHS_RE
            .captures(&duration)
            .and_then(|caps| caps[1].parse::<f64>().ok())
        {
            return months;
        }
    }

    if period.trim().is_empty() || is_ongoing(period, tables) {
        return MIN_DURATION_MONTHS;
    }

    let years = years_in(period);
    if years.len() >= 2 {
        return (f64::from(years[1] - years[0]) * 12.0).max(0.0);
    }

    let period = period.to_lowercase();
    let months: Vec<u32> = tables
        .month_names
        .iter()
        .filter(|(name, _)| period.contains(name.as_str()))
        .map(|(_, month)| *month)
        .collect();
    if months.len() >= 2 {
        return f64::from(months[1].abs_diff(months[0]));
    }

    MIN_DURATION_MONTHS
}

/// Bucketed tenure credit; flat from 24 months on.
pub fn duration_bucket_score(months: f64) -> f64 {
    if months < 3.0 {
        2.0
    } else if months <= 6.0 {
        5.0
    } else if months <= 12.0 {
        7.0
    } else if months <= 24.0 {
        9.0
    } else {
        10.0
    }
}

/// Recency adjustment from the last year mentioned in the period.
pub fn recency_bonus(period: &str, reference_year: i32, tables: &ScoringTables) -> f64 {
    if period.trim().is_empty() {
        return 0.0;
    }
    if is_ongoing(period, tables) {
        return 2.0;
    }
    let Some(end_year) = years_in(period).last().copied() else {
        return 0.0;
    };
    let years_ago = reference_year - end_year;
    if years_ago <= 1 {
        1.5
    } else if years_ago <= 2 {
        1.0
    } else if years_ago >= 5 {
        -1.0
    } else {
        0.0
    }
}
