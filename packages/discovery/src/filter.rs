//! Thesis filtering with fallback-to-unfiltered.
//!
//! A candidate passes when its sector and stage each satisfy the
//! corresponding thesis list (absent list means the predicate passes).
//! Matching is case-insensitive substring matching, bidirectional for
//! sectors, so "FinTech" matches a "FinTech Infrastructure" thesis entry
//! and vice versa. The `select` policy prefers the filtered set but
//! substitutes the unfiltered set rather than returning nothing, signalling
//! the substitution upward so the job can surface `filters_matched = false`.

use crate::types::candidate::Candidate;
use crate::types::thesis::ThesisFilter;

/// Outcome of applying a filter to one source's candidate set.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Candidates to keep for this source
    pub candidates: Vec<Candidate>,

    /// False iff a filter was requested, matched nothing, and the
    /// unfiltered set was substituted
    pub matched_any: bool,
}

/// Whether a candidate sector satisfies the thesis sector list.
pub fn sector_matches(sector: &str, filter: &ThesisFilter) -> bool {
    if filter.sectors.is_empty() || filter.is_sector_agnostic() {
        return true;
    }
    let sector = sector.to_lowercase();
    filter.sectors.iter().any(|thesis_sector| {
        let thesis_sector = thesis_sector.to_lowercase();
        sector.contains(&thesis_sector) || thesis_sector.contains(&sector)
    })
}

/// Whether a candidate stage satisfies the thesis stage list.
pub fn stage_matches(stage: &str, filter: &ThesisFilter) -> bool {
    if filter.stages.is_empty() {
        return true;
    }
    let stage = stage.to_lowercase();
    filter
        .stages
        .iter()
        .any(|thesis_stage| stage.contains(&thesis_stage.to_lowercase()))
}

/// Whether a candidate passes both independently-evaluated predicates.
pub fn candidate_matches(candidate: &Candidate, filter: &ThesisFilter) -> bool {
    sector_matches(&candidate.sector, filter) && stage_matches(&candidate.stage, filter)
}

/// Apply the filter to one source's candidates, falling back to the
/// unfiltered set when the filter eliminates everything.
///
/// This is the single shared implementation of the filter-with-fallback
/// policy; every connector routes its fetched or embedded set through it.
/// Both sets are truncated to `limit`.
pub fn select(candidates: Vec<Candidate>, filter: Option<&ThesisFilter>, limit: usize) -> Selection {
    let filter = match filter {
        Some(f) if !f.is_empty() => f,
        _ => {
            let mut candidates = candidates;
            candidates.truncate(limit);
            return Selection {
                candidates,
                matched_any: true,
            };
        }
    };

    let matched: Vec<Candidate> = candidates
        .iter()
        .filter(|c| candidate_matches(c, filter))
        .take(limit)
        .cloned()
        .collect();

    if !matched.is_empty() {
        return Selection {
            candidates: matched,
            matched_any: true,
        };
    }

    // Show something rather than nothing: substitute the unfiltered set
    // and signal the miss upward.
    let mut unfiltered = candidates;
    unfiltered.truncate(limit);
    let matched_any = unfiltered.is_empty();
    Selection {
        candidates: unfiltered,
        matched_any,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::connector::SourceId;
    use crate::types::thesis::SECTOR_AGNOSTIC;

    fn candidate(name: &str, sector: &str, stage: &str) -> Candidate {
        Candidate::new(name, sector, stage, SourceId::Yc)
    }

    #[test]
    fn sector_match_is_case_insensitive_and_bidirectional() {
        let filter = ThesisFilter::new().with_sectors(["fintech"]);
        assert!(sector_matches("FinTech", &filter));

        let filter = ThesisFilter::new().with_sectors(["FinTech Infrastructure"]);
        assert!(sector_matches("FinTech", &filter));
    }

    #[test]
    fn wildcard_accepts_every_sector() {
        let filter = ThesisFilter::new().with_sectors([SECTOR_AGNOSTIC]);
        assert!(sector_matches("Underwater Basket Weaving", &filter));
        assert!(sector_matches("", &filter));
    }

    #[test]
    fn absent_stage_list_always_passes() {
        let filter = ThesisFilter::new().with_sectors(["FinTech"]);
        assert!(stage_matches("Series A", &filter));
    }

    #[test]
    fn both_predicates_must_pass() {
        let filter = ThesisFilter::new()
            .with_sectors(["FinTech"])
            .with_stages(["Seed"]);

        assert!(candidate_matches(&candidate("a", "FinTech", "Seed"), &filter));
        assert!(!candidate_matches(
            &candidate("b", "FinTech", "Series B"),
            &filter
        ));
        assert!(!candidate_matches(&candidate("c", "EdTech", "Seed"), &filter));
    }

    #[test]
    fn select_returns_filtered_set_when_non_empty() {
        let filter = ThesisFilter::new().with_sectors(["FinTech"]);
        let candidates = vec![
            candidate("a", "FinTech", "Seed"),
            candidate("b", "EdTech", "Seed"),
        ];

        let selection = select(candidates, Some(&filter), 10);

        assert!(selection.matched_any);
        assert_eq!(selection.candidates.len(), 1);
        assert_eq!(selection.candidates[0].name, "a");
    }

    #[test]
    fn select_falls_back_to_unfiltered_when_filter_matches_nothing() {
        let filter = ThesisFilter::new().with_sectors(["Underwater Basket Weaving"]);
        let candidates = vec![
            candidate("a", "FinTech", "Seed"),
            candidate("b", "EdTech", "Seed"),
        ];

        let selection = select(candidates.clone(), Some(&filter), 10);

        assert!(!selection.matched_any);
        assert_eq!(selection.candidates.len(), candidates.len());
    }

    #[test]
    fn select_without_filter_truncates_to_limit() {
        let candidates = vec![
            candidate("a", "FinTech", "Seed"),
            candidate("b", "EdTech", "Seed"),
            candidate("c", "AI/ML", "Seed"),
        ];

        let selection = select(candidates, None, 2);

        assert!(selection.matched_any);
        assert_eq!(selection.candidates.len(), 2);
    }

    #[test]
    fn select_on_empty_input_matches_trivially() {
        let filter = ThesisFilter::new().with_sectors(["FinTech"]);
        let selection = select(Vec::new(), Some(&filter), 10);

        assert!(selection.matched_any);
        assert!(selection.candidates.is_empty());
    }
}
