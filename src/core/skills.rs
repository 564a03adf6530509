use crate::core::normalize::normalize_skill;
use crate::core::tables::ScoringTables;
use serde::{Deserialize, Serialize};

/// Fuzzy containment is only trusted between keys longer than this.
const FUZZY_MIN_LEN: usize = 3;
/// Fuzzy containment also requires key lengths to differ by at most this much.
/// "java" and "javascript" differ by 6, so they never match this way.
const FUZZY_MAX_LEN_DIFF: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Variation,
    Fuzzy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub matched: usize,
    pub required_total: usize,
}

impl SkillMatch {
    pub fn ratio(&self) -> f64 {
        if self.required_total == 0 {
            0.0
        } else {
            self.matched as f64 / self.required_total as f64
        }
    }
}

pub struct SkillMatcher<'a> {
    tables: &'a ScoringTables,
}

impl<'a> SkillMatcher<'a> {
    pub fn new(tables: &'a ScoringTables) -> Self {
        Self { tables }
    }

    /// How a single required skill is satisfied by a candidate skill, if at all.
    /// Both arguments must already be normalized.
    pub fn match_kind(&self, required: &str, candidate: &str) -> Option<MatchKind> {
        if required == candidate {
            return Some(MatchKind::Exact);
        }
        if self.tables.same_variation_group(required, candidate) {
            return Some(MatchKind::Variation);
        }
        let (req_len, cand_len) = (required.chars().count(), candidate.chars().count());
        if req_len > FUZZY_MIN_LEN
            && cand_len > FUZZY_MIN_LEN
            && req_len.abs_diff(cand_len) <= FUZZY_MAX_LEN_DIFF
            && (candidate.contains(required) || required.contains(candidate))
        {
            return Some(MatchKind::Fuzzy);
        }
        None
    }

    /// Best way any candidate skill satisfies `required`: exact, then variation, then fuzzy.
    pub fn best_match<S: AsRef<str>>(&self, candidate: &[S], required: &str) -> Option<MatchKind> {
        let required = normalize_skill(required);
        let mut best: Option<MatchKind> = None;
        for skill in candidate {
            let skill = normalize_skill(skill.as_ref());
            match self.match_kind(&required, &skill) {
                Some(MatchKind::Exact) => return Some(MatchKind::Exact),
                Some(MatchKind::Variation) => best = Some(MatchKind::Variation),
                Some(MatchKind::Fuzzy) if best.is_none() => best = Some(MatchKind::Fuzzy),
                _ => {}
            }
        }
        best
    }

    /// Counts required skills covered by the candidate list; each required skill counts once.
    pub fn match_skills<S: AsRef<str>, R: AsRef<str>>(
        &self,
        candidate: &[S],
        required: &[R],
    ) -> SkillMatch {
        let matched = required
            .iter()
            .filter(|req| self.best_match(candidate, req.as_ref()).is_some())
            .count();
        SkillMatch {
            matched,
            required_total: required.len(),
        }
    }
}
