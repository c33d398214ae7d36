//! Flat-to-raw span reconstruction and token boundary arithmetic.
//!
//! A token is a maximal run of non-whitespace scalars in the raw text.
//! Candidate materialization and disambiguation both grow spans token by
//! token, so the boundary helpers live here next to the reconstruction.

use super::flat::FlatView;

/// Map a flat-view span back to raw coordinates.
///
/// The raw end is derived from the last covered flat scalar, so the raw
/// span never includes trailing whitespace.
pub fn reconstruct_raw_span(view: &FlatView, flat_start: usize, flat_end: usize) -> (usize, usize) {
    if flat_end == 0 || flat_start >= flat_end {
        return (0, 0);
    }
    let end = flat_end.min(view.flat_len());
    (view.raw_index(flat_start), view.raw_index(end - 1) + 1)
}

/// Start index of the token covering `i` (no-op when `raw[i - 1]` is
/// whitespace or `i` is 0).
pub fn token_start(raw: &[char], mut i: usize) -> usize {
    while i > 0 && !raw[i - 1].is_whitespace() {
        i -= 1;
    }
    i
}

/// Exclusive end index of the token covering `i` (no-op when `raw[i]` is
/// whitespace or `i` is at the end).
pub fn token_end(raw: &[char], mut i: usize) -> usize {
    while i < raw.len() && !raw[i].is_whitespace() {
        i += 1;
    }
    i
}

/// Move left over whitespace, then to the start of the token found there.
pub fn expand_left(raw: &[char], mut i: usize) -> usize {
    while i > 0 && raw[i].is_whitespace() {
        i -= 1;
    }
    token_start(raw, i)
}

/// Move right over whitespace, then to the exclusive end of the token
/// found there.
pub fn expand_right(raw: &[char], mut i: usize) -> usize {
    while i < raw.len() && raw[i].is_whitespace() {
        i += 1;
    }
    token_end(raw, i)
}

/// Number of non-whitespace scalars in `raw[start..end]`.
pub fn count_non_ws(raw: &[char], start: usize, end: usize) -> usize {
    raw[start..end.min(raw.len())]
        .iter()
        .filter(|c| !c.is_whitespace())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_reconstruct_basic() {
        let raw = chars("  ab  cd");
        let view = FlatView::build(&raw);
        // Flat "abcd": span [1, 3) is "bc" → raw 'b' at 3 .. 'c' at 7.
        assert_eq!(reconstruct_raw_span(&view, 1, 3), (3, 7));
    }

    #[test]
    fn test_reconstruct_empty_and_overlong_end() {
        let raw = chars("ab");
        let view = FlatView::build(&raw);
        assert_eq!(reconstruct_raw_span(&view, 0, 0), (0, 0));
        assert_eq!(reconstruct_raw_span(&view, 0, 99), (0, 2));
    }

    #[test]
    fn test_token_boundaries() {
        let raw = chars("foo  bar");
        assert_eq!(token_start(&raw, 2), 0);
        assert_eq!(token_end(&raw, 1), 3);
        assert_eq!(token_start(&raw, 6), 5);
        // Index at whitespace: both are no-ops.
        assert_eq!(token_start(&raw, 4), 4);
        assert_eq!(token_end(&raw, 3), 3);
    }

    #[test]
    fn test_expand_left_crosses_whitespace_then_token() {
        let raw = chars("and  foo");
        // From the space before "foo" back to the start of "and".
        assert_eq!(expand_left(&raw, 4), 0);
        // From inside a token: just the token start.
        assert_eq!(expand_left(&raw, 6), 5);
    }

    #[test]
    fn test_expand_right_crosses_whitespace_then_token() {
        let raw = chars("foo  bar baz");
        assert_eq!(expand_right(&raw, 3), 8);
        assert_eq!(expand_right(&raw, 9), 12);
        assert_eq!(expand_right(&raw, 12), 12);
    }

    #[test]
    fn test_expand_crosses_newlines() {
        let raw = chars("foo\nbar");
        assert_eq!(expand_right(&raw, 3), 7);
        assert_eq!(expand_left(&raw, 3), 0);
    }

    #[test]
    fn test_count_non_ws() {
        let raw = chars(" a b\tc ");
        assert_eq!(count_non_ws(&raw, 0, raw.len()), 3);
        assert_eq!(count_non_ws(&raw, 2, 5), 2);
        assert_eq!(count_non_ws(&raw, 0, 0), 0);
    }
}
