//! Disambiguation of repeated exact matches.
//!
//! When a search hits more than one place, the occurrences all project to
//! the same flat content. Each one is grown outward by one token per side
//! per round until every occurrence reads differently, and the grown raw
//! slices are returned as ready-to-retry search strings.

use std::collections::HashMap;

use super::flat::FlatView;
use super::span;
use super::MatchSpan;

#[derive(Debug)]
struct Candidate {
    start: usize,
    end: usize,
    expandable: bool,
}

/// One widened raw slice per input span, in input order.
pub fn disambiguation_suggestions(view: &FlatView, spans: &[MatchSpan]) -> Vec<String> {
    let raw = view.raw();
    let mut candidates: Vec<Candidate> = spans
        .iter()
        .map(|s| Candidate {
            start: s.raw_start,
            end: s.raw_end,
            expandable: true,
        })
        .collect();

    loop {
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, c) in candidates.iter().enumerate() {
            groups.entry(projection(raw, c.start, c.end)).or_default().push(i);
        }

        // Still-colliding groups with at least two members able to grow.
        let mut to_expand: Vec<usize> = Vec::new();
        for members in groups.values() {
            if members.len() < 2 {
                continue;
            }
            let expandable = members
                .iter()
                .filter(|&&i| candidates[i].expandable)
                .count();
            if expandable >= 2 {
                to_expand.extend(members.iter().copied());
            }
        }
        if to_expand.is_empty() {
            break;
        }

        for i in to_expand {
            let c = &mut candidates[i];
            if !c.expandable {
                continue;
            }
            let new_start = if c.start > 0 {
                span::expand_left(raw, c.start - 1)
            } else {
                c.start
            };
            let new_end = if c.end < raw.len() {
                span::expand_right(raw, c.end + 1)
            } else {
                c.end
            };
            if new_start == c.start && new_end == c.end {
                c.expandable = false;
            } else {
                c.start = new_start;
                c.end = new_end;
            }
        }
    }

    candidates
        .iter()
        .map(|c| raw[c.start..c.end].iter().collect())
        .collect()
}

fn projection(raw: &[char], start: usize, end: usize) -> String {
    raw[start..end].iter().filter(|c| !c.is_whitespace()).collect()
}
