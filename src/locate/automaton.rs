//! Suffix automaton over the search pattern.
//!
//! Supports a streaming longest-substring-of-pattern scan over the text.
//! Every state is augmented with the minimum and maximum end position (in
//! the pattern) over all occurrences of the strings it represents, which
//! lets the scan tell pattern-prefix and pattern-suffix occurrences apart
//! from strict interior ones without re-scanning the pattern per candidate.

use std::collections::HashMap;

use super::{MatchKind, RawMatch};

#[derive(Debug, Clone)]
struct State {
    /// Length of the longest string represented by this state.
    len: usize,
    /// Suffix link.
    link: Option<usize>,
    next: HashMap<char, usize>,
    /// Minimum end position in the pattern over represented occurrences.
    min_end: usize,
    /// Maximum end position in the pattern over represented occurrences.
    max_end: usize,
}

#[derive(Debug)]
pub struct SuffixAutomaton {
    states: Vec<State>,
    pattern_len: usize,
}

impl SuffixAutomaton {
    /// Build the automaton for `pattern` online, one scalar at a time, then
    /// propagate the `(min_end, max_end)` bounds bottom-up along suffix
    /// links (states visited in descending `len` order).
    pub fn build(pattern: &[char]) -> Self {
        let mut sam = Self {
            states: vec![State {
                len: 0,
                link: None,
                next: HashMap::new(),
                min_end: usize::MAX,
                max_end: 0,
            }],
            pattern_len: pattern.len(),
        };

        let mut last = 0usize;
        for (i, &c) in pattern.iter().enumerate() {
            last = sam.extend(last, c, i);
        }

        sam.propagate_end_bounds();
        sam
    }

    fn extend(&mut self, last: usize, c: char, end_pos: usize) -> usize {
        let cur = self.states.len();
        self.states.push(State {
            len: self.states[last].len + 1,
            link: None,
            next: HashMap::new(),
            min_end: end_pos,
            max_end: end_pos,
        });

        let mut p = Some(last);
        while let Some(pi) = p {
            if self.states[pi].next.contains_key(&c) {
                break;
            }
            self.states[pi].next.insert(c, cur);
            p = self.states[pi].link;
        }

        match p {
            None => self.states[cur].link = Some(0),
            Some(pi) => {
                let q = self.states[pi].next[&c];
                if self.states[pi].len + 1 == self.states[q].len {
                    self.states[cur].link = Some(q);
                } else {
                    // Split: the clone keeps q's transitions, link, and its
                    // representative end positions on both bounds.
                    let clone = self.states.len();
                    let mut cloned = self.states[q].clone();
                    cloned.len = self.states[pi].len + 1;
                    self.states.push(cloned);

                    let mut pp = Some(pi);
                    while let Some(ppi) = pp {
                        if self.states[ppi].next.get(&c) == Some(&q) {
                            self.states[ppi].next.insert(c, clone);
                            pp = self.states[ppi].link;
                        } else {
                            break;
                        }
                    }
                    self.states[q].link = Some(clone);
                    self.states[cur].link = Some(clone);
                }
            }
        }

        cur
    }

    fn propagate_end_bounds(&mut self) {
        let mut order: Vec<usize> = (1..self.states.len()).collect();
        order.sort_unstable_by_key(|&v| self.states[v].len);

        for &v in order.iter().rev() {
            if let Some(u) = self.states[v].link {
                self.states[u].min_end = self.states[u].min_end.min(self.states[v].min_end);
                self.states[u].max_end = self.states[u].max_end.max(self.states[v].max_end);
            }
        }
    }

    /// Stream `text` through the automaton and emit strict-interior `mid`
    /// occurrences of length at least `min_len`.
    ///
    /// At each text position the current match is the longest substring of
    /// the pattern ending there. An occurrence that can start at the
    /// pattern's first scalar (`min_end == len − 1`) or end at its last
    /// (`max_end == m − 1`) is excluded: those are covered by the Z-array
    /// prefix/suffix analysis.
    pub fn interior_matches(&self, text: &[char], min_len: usize) -> Vec<RawMatch> {
        let m = self.pattern_len;
        let mut out = Vec::new();
        let mut s = 0usize;
        let mut len = 0usize;

        for (i, &c) in text.iter().enumerate() {
            while s != 0 && !self.states[s].next.contains_key(&c) {
                s = self.states[s].link.unwrap_or(0);
                len = self.states[s].len;
            }
            if let Some(&t) = self.states[s].next.get(&c) {
                s = t;
                len += 1;
            } else {
                s = 0;
                len = 0;
            }

            if len >= min_len && min_len > 0 {
                let is_prefix_occurrence = self.states[s].min_end == len - 1;
                let is_suffix_occurrence = self.states[s].max_end == m - 1;
                if !is_prefix_occurrence && !is_suffix_occurrence {
                    out.push(RawMatch {
                        kind: MatchKind::Mid,
                        flat_start: i + 1 - len,
                        flat_end: i + 1,
                        matched_len: len,
                    });
                }
            }
        }

        out
    }

    #[cfg(test)]
    fn check_link_bound_invariants(&self) {
        for v in 1..self.states.len() {
            if let Some(u) = self.states[v].link {
                assert!(self.states[u].min_end <= self.states[v].min_end);
                assert!(self.states[u].max_end >= self.states[v].max_end);
            }
        }
    }
}
