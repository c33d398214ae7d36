//! Whitespace-insensitive text locator.
//!
//! The search string and the file are both projected into whitespace-free
//! "flat" space ([`flat::FlatView`]), where matching happens in three
//! phases:
//!
//! 1. **Exact** — occurrences of the flat pattern in the flat text, found
//!    left-to-right with the scan resuming one position after each hit (so
//!    overlapping occurrences surface consistently for disambiguation),
//!    capped at three.
//! 2. **Fuzzy** (only when exact finds nothing) — candidate regions that
//!    match a prefix of the pattern, a suffix, a strict-interior substring
//!    ([`automaton::SuffixAutomaton`]), or a prefix+suffix pair, ranked by
//!    matched length and materialized to token-aligned raw spans.
//! 3. On multiple exact matches, [`disambiguate`] grows each span until the
//!    occurrences become textually distinct, yielding retry suggestions.

pub mod automaton;
pub mod disambiguate;
pub mod flat;
pub mod span;
pub mod zarray;

use tracing::debug;

use self::flat::FlatView;

/// Maximum matches or candidates returned per search.
const MAX_RESULTS: usize = 3;

/// Patterns at most this long use the fixed short-pattern threshold.
const SHORT_PATTERN_LEN: usize = 8;
const SHORT_MIN_MATCH: usize = 3;

/// Length-scaled fuzzy threshold: the required fraction of the pattern
/// grows linearly from `MIN_PERCENT` to `MAX_PERCENT` as the pattern
/// approaches `PERCENT_SCALE_LEN` scalars.
const MIN_PERCENT: f64 = 0.4;
const MAX_PERCENT: f64 = 0.8;
const PERCENT_SCALE_LEN: f64 = 1500.0;

/// A combined prefix+suffix candidate must span between these multiples of
/// the pattern length.
const COMBINED_SPAN_LOWER: f64 = 0.75;
const COMBINED_SPAN_UPPER: f64 = 1.25;

/// Which part of the pattern a fuzzy candidate matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Prefix,
    Suffix,
    Mid,
    Combined,
}

/// A fuzzy candidate in flat coordinates, before materialization.
/// `matched_len` counts pattern scalars matched, not span width.
#[derive(Debug, Clone, Copy)]
pub struct RawMatch {
    pub kind: MatchKind,
    pub flat_start: usize,
    pub flat_end: usize,
    pub matched_len: usize,
}

/// A located region, in both coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub flat_start: usize,
    pub flat_end: usize,
    pub raw_start: usize,
    pub raw_end: usize,
}

/// Outcome of a search: exact occurrences, or ranked fuzzy candidates
/// (possibly none).
#[derive(Debug)]
pub enum Matches {
    Exact(Vec<MatchSpan>),
    Fuzzy(Vec<MatchSpan>),
}

/// Locate `search` in the file underlying `view`.
///
/// The search string is whitespace-stripped before matching; a search that
/// normalizes to nothing matches nothing.
pub fn find_matches(view: &FlatView, search: &str) -> Matches {
    let pattern: Vec<char> = search.chars().filter(|c| !c.is_whitespace()).collect();
    if pattern.is_empty() {
        return Matches::Fuzzy(Vec::new());
    }

    let text = view.flat();
    let exact = exact_occurrences(text, &pattern);
    if !exact.is_empty() {
        debug!(count = exact.len(), "exact matches");
        return Matches::Exact(
            exact
                .iter()
                .map(|&p| exact_span(view, p, p + pattern.len()))
                .collect(),
        );
    }

    let candidates = fuzzy_candidates(view, &pattern);
    debug!(count = candidates.len(), "fuzzy candidates");
    Matches::Fuzzy(candidates)
}

/// Minimum number of pattern scalars a fuzzy candidate must match.
fn min_match_len(m: usize) -> usize {
    if m <= SHORT_PATTERN_LEN {
        m.min(SHORT_MIN_MATCH)
    } else {
        let ratio = (m as f64 / PERCENT_SCALE_LEN).min(1.0);
        let percent = MIN_PERCENT + (MAX_PERCENT - MIN_PERCENT) * ratio;
        (m as f64 * percent).ceil() as usize
    }
}

/// Left-to-right occurrences of `pattern` in `text`, resuming one position
/// after each hit, capped at [`MAX_RESULTS`].
fn exact_occurrences(text: &[char], pattern: &[char]) -> Vec<usize> {
    let mut out = Vec::new();
    let mut from = 0usize;
    while out.len() < MAX_RESULTS {
        match find_from(text, pattern, from) {
            Some(p) => {
                out.push(p);
                from = p + 1;
            }
            None => break,
        }
    }
    out
}

fn find_from(text: &[char], pattern: &[char], from: usize) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > text.len() || from > text.len() - pattern.len() {
        return None;
    }
    (from..=text.len() - pattern.len()).find(|&p| text[p..p + pattern.len()] == *pattern)
}

fn exact_span(view: &FlatView, flat_start: usize, flat_end: usize) -> MatchSpan {
    let (raw_start, raw_end) = span::reconstruct_raw_span(view, flat_start, flat_end);
    MatchSpan {
        flat_start,
        flat_end,
        raw_start,
        raw_end,
    }
}

fn fuzzy_candidates(view: &FlatView, pattern: &[char]) -> Vec<MatchSpan> {
    let text = view.flat();
    let m = pattern.len();
    let min_len = min_match_len(m);

    let prefixes: Vec<RawMatch> = zarray::prefix_match_lengths(pattern, text)
        .iter()
        .enumerate()
        .filter(|&(_, &l)| l > 0)
        .map(|(p, &l)| RawMatch {
            kind: MatchKind::Prefix,
            flat_start: p,
            flat_end: p + l,
            matched_len: l,
        })
        .collect();

    let suffixes: Vec<RawMatch> = zarray::suffix_match_lengths(pattern, text)
        .iter()
        .enumerate()
        .filter(|&(_, &l)| l > 0)
        .map(|(s, &l)| RawMatch {
            kind: MatchKind::Suffix,
            flat_start: s,
            flat_end: s + l,
            matched_len: l,
        })
        .collect();

    let mids = automaton::SuffixAutomaton::build(pattern).interior_matches(text, min_len);
    let combined = combined_candidates(&prefixes, &suffixes, m, min_len);

    let mut pool: Vec<RawMatch> = Vec::new();
    pool.extend(prefixes.iter().filter(|r| r.matched_len >= min_len));
    pool.extend(suffixes.iter().filter(|r| r.matched_len >= min_len));
    pool.extend(mids);
    pool.extend(combined);

    if pool.is_empty() {
        return Vec::new();
    }

    // Keep only the best matched length, dedupe by flat span, first three
    // in text order.
    let best = pool.iter().map(|r| r.matched_len).max().unwrap_or(0);
    pool.retain(|r| r.matched_len == best);
    pool.sort_by_key(|r| (r.flat_start, r.flat_end));
    pool.dedup_by_key(|r| (r.flat_start, r.flat_end));
    pool.truncate(MAX_RESULTS);

    pool.iter().map(|r| materialize(view, r, m)).collect()
}

/// Pair prefix matches with later suffix matches into combined candidates.
///
/// Both halves must reach `half_threshold`; the paired span must lie within
/// [`COMBINED_SPAN_LOWER`, `COMBINED_SPAN_UPPER`] times the pattern length
/// and the halves together must reach `min_len`.
fn combined_candidates(
    prefixes: &[RawMatch],
    suffixes: &[RawMatch],
    m: usize,
    min_len: usize,
) -> Vec<RawMatch> {
    let half_threshold = (min_len / 2).max(1);

    let kept_prefixes: Vec<&RawMatch> = prefixes
        .iter()
        .filter(|r| r.matched_len >= half_threshold)
        .collect();
    let mut kept_suffixes: Vec<&RawMatch> = suffixes
        .iter()
        .filter(|r| r.matched_len >= half_threshold)
        .collect();
    kept_suffixes.sort_by_key(|r| r.flat_start);

    let mut out = Vec::new();
    for pre in &kept_prefixes {
        for suf in &kept_suffixes {
            if suf.flat_start < pre.flat_end {
                continue;
            }
            let span = suf.flat_end - pre.flat_start;
            if (span as f64) > COMBINED_SPAN_UPPER * m as f64 {
                break;
            }
            if (span as f64) < COMBINED_SPAN_LOWER * m as f64 {
                continue;
            }
            if pre.matched_len + suf.matched_len < min_len {
                continue;
            }
            out.push(RawMatch {
                kind: MatchKind::Combined,
                flat_start: pre.flat_start,
                flat_end: suf.flat_end,
                matched_len: pre.matched_len + suf.matched_len,
            });
        }
    }
    out
}

/// Turn a ranked raw-match into a raw span widened to token boundaries
/// until it covers at least `m` non-whitespace scalars (combined matches
/// are taken as reconstructed).
fn materialize(view: &FlatView, rm: &RawMatch, m: usize) -> MatchSpan {
    let raw = view.raw();
    let (raw_lo, raw_hi) = span::reconstruct_raw_span(view, rm.flat_start, rm.flat_end);

    let (start, end) = match rm.kind {
        MatchKind::Prefix => {
            let start = raw_lo;
            let mut end = span::expand_right(raw, start);
            while span::count_non_ws(raw, start, end) < m && end < raw.len() {
                end = span::expand_right(raw, end + 1);
            }
            (start, end)
        }
        MatchKind::Suffix => {
            let end = raw_hi;
            let mut start = span::expand_left(raw, end.saturating_sub(1));
            while span::count_non_ws(raw, start, end) < m && start > 0 {
                start = span::expand_left(raw, start - 1);
            }
            (start, end)
        }
        MatchKind::Mid => {
            let mut start = span::token_start(raw, raw_lo);
            let mut end = span::token_end(raw, raw_hi);
            let mut count = span::count_non_ws(raw, start, end);
            while count < m {
                let before = count;
                if start > 0 {
                    start = span::expand_left(raw, start - 1);
                }
                count = span::count_non_ws(raw, start, end);
                if count >= m {
                    break;
                }
                if end < raw.len() {
                    end = span::expand_right(raw, end + 1);
                }
                count = span::count_non_ws(raw, start, end);
                if count == before {
                    break;
                }
            }
            (start, end)
        }
        MatchKind::Combined => (raw_lo, raw_hi),
    };

    MatchSpan {
        flat_start: view.flat_index(start),
        flat_end: view.flat_end(end),
        raw_start: start,
        raw_end: end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn raw_slice(raw: &[char], s: &MatchSpan) -> String {
        raw[s.raw_start..s.raw_end].iter().collect()
    }

    // -- thresholds --

    #[test]
    fn test_min_match_len_short_patterns() {
        assert_eq!(min_match_len(1), 1);
        assert_eq!(min_match_len(2), 2);
        assert_eq!(min_match_len(3), 3);
        assert_eq!(min_match_len(8), 3);
    }

    #[test]
    fn test_min_match_len_scaled() {
        // m = 15: percent = 0.4 + 0.4 * 15/1500 = 0.404 → ceil(6.06) = 7.
        assert_eq!(min_match_len(15), 7);
        // m = 1500 caps at 0.8.
        assert_eq!(min_match_len(1500), 1200);
        assert_eq!(min_match_len(3000), 2400);
    }

    // -- exact phase --

    #[test]
    fn test_exact_match_whitespace_insensitive() {
        let raw = chars("  const  x  =  1;  ");
        let view = FlatView::build(&raw);
        match find_matches(&view, "const x=1") {
            Matches::Exact(spans) => {
                assert_eq!(spans.len(), 1);
                assert_eq!(raw_slice(&raw, &spans[0]), "const  x  =  1");
            }
            Matches::Fuzzy(_) => panic!("expected exact match"),
        }
    }

    #[test]
    fn test_exact_scan_advances_by_one() {
        // Overlapping seeds: "aa" in "aaaa" yields three occurrences.
        let raw = chars("aaaa");
        let view = FlatView::build(&raw);
        match find_matches(&view, "aa") {
            Matches::Exact(spans) => {
                assert_eq!(spans.len(), 3);
                assert_eq!(spans[0].flat_start, 0);
                assert_eq!(spans[1].flat_start, 1);
                assert_eq!(spans[2].flat_start, 2);
            }
            Matches::Fuzzy(_) => panic!("expected exact matches"),
        }
    }

    #[test]
    fn test_exact_matches_capped_at_three() {
        let raw = chars("ab ab ab ab ab");
        let view = FlatView::build(&raw);
        match find_matches(&view, "ab") {
            Matches::Exact(spans) => assert_eq!(spans.len(), 3),
            Matches::Fuzzy(_) => panic!("expected exact matches"),
        }
    }

    #[test]
    fn test_whitespace_only_search_matches_nothing() {
        let raw = chars("anything at all");
        let view = FlatView::build(&raw);
        match find_matches(&view, " \t\n ") {
            Matches::Fuzzy(spans) => assert!(spans.is_empty()),
            Matches::Exact(_) => panic!("whitespace-only search must not match"),
        }
    }

    #[test]
    fn test_exact_span_flat_content_equals_pattern() {
        let raw = chars("alpha beta\n\tgamma");
        let view = FlatView::build(&raw);
        match find_matches(&view, "betagamma") {
            Matches::Exact(spans) => {
                let s = &spans[0];
                let flat: String = view.flat()[s.flat_start..s.flat_end].iter().collect();
                assert_eq!(flat, "betagamma");
            }
            Matches::Fuzzy(_) => panic!("expected exact match"),
        }
    }

    // -- fuzzy phase --

    #[test]
    fn test_fuzzy_prefix_candidate() {
        let raw = chars("function helloWorld() {\n  console.log('hi');\n}");
        let view = FlatView::build(&raw);
        match find_matches(&view, "console.log(hi)") {
            Matches::Fuzzy(spans) => {
                assert_eq!(spans.len(), 1);
                assert!(raw_slice(&raw, &spans[0]).contains("console.log('hi')"));
            }
            Matches::Exact(_) => panic!("expected fuzzy candidates"),
        }
    }

    #[test]
    fn test_fuzzy_suffix_candidate() {
        // Only the tail of the pattern appears in the text.
        let raw = chars("prelude\nlet total_count = 0;\n");
        let view = FlatView::build(&raw);
        match find_matches(&view, "int total_count = 0;") {
            Matches::Fuzzy(spans) => {
                assert!(!spans.is_empty());
                assert!(raw_slice(&raw, &spans[0]).contains("total_count = 0;"));
            }
            Matches::Exact(_) => panic!("expected fuzzy candidates"),
        }
    }

    #[test]
    fn test_fuzzy_mid_candidate() {
        // Pattern interior occurs; its ends do not.
        let raw = chars("xx middle_section_here xx");
        let view = FlatView::build(&raw);
        match find_matches(&view, "AAAAmiddle_section_hereBBBB") {
            Matches::Fuzzy(spans) => {
                assert!(!spans.is_empty());
                assert!(raw_slice(&raw, &spans[0]).contains("middle_section_here"));
            }
            Matches::Exact(_) => panic!("expected fuzzy candidates"),
        }
    }

    #[test]
    fn test_fuzzy_combined_candidate() {
        // Head and tail of the pattern straddle a differing interior.
        let search = "let value = compute(alpha, beta);";
        let raw = chars("begin\nlet value = produce(alpha, beta);\nend\n");
        let view = FlatView::build(&raw);
        match find_matches(&view, search) {
            Matches::Fuzzy(spans) => {
                assert!(!spans.is_empty());
                let slice = raw_slice(&raw, &spans[0]);
                assert!(slice.starts_with("let"));
                assert!(slice.ends_with("beta);"));
            }
            Matches::Exact(_) => panic!("expected fuzzy candidates"),
        }
    }

    #[test]
    fn test_fuzzy_no_candidates_below_threshold() {
        let raw = chars("completely unrelated content");
        let view = FlatView::build(&raw);
        match find_matches(&view, "zzqqxxyyvvww") {
            Matches::Fuzzy(spans) => assert!(spans.is_empty()),
            Matches::Exact(_) => panic!("nothing should match exactly"),
        }
    }

    #[test]
    fn test_fuzzy_candidates_capped_at_three() {
        let raw = chars(
            "console.log('a');\nconsole.log('b');\nconsole.log('c');\nconsole.log('d');\n",
        );
        let view = FlatView::build(&raw);
        match find_matches(&view, "console.log(x)") {
            Matches::Fuzzy(spans) => assert!(spans.len() <= 3),
            Matches::Exact(_) => panic!("expected fuzzy candidates"),
        }
    }

    #[test]
    fn test_materialized_span_covers_pattern_length() {
        let raw = chars("aaa console.log('hi') bbb ccc ddd");
        let view = FlatView::build(&raw);
        let m = "console.log(hi)xx".chars().filter(|c| !c.is_whitespace()).count();
        match find_matches(&view, "console.log(hi)xx") {
            Matches::Fuzzy(spans) => {
                assert!(!spans.is_empty());
                let s = &spans[0];
                let covered = span::count_non_ws(view.raw(), s.raw_start, s.raw_end);
                assert!(covered >= m || s.raw_end == raw.len());
            }
            Matches::Exact(_) => panic!("expected fuzzy candidates"),
        }
    }
}
