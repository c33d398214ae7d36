//! In-memory edit planning over the raw scalar vector.
//!
//! Everything here is pure: the operators in `tools/` read the file once,
//! plan the mutation through these functions, and write the result back in
//! a single step. Failures therefore never leave a half-edited file.

pub mod newline;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EditError, EditResult};
use self::newline::LineEnding;

/// Half-open range in raw (scalar) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRange {
    pub start: usize,
    pub end: usize,
}

impl RawRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }
}

/// Placement of inserted or moved text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPosition {
    Before,
    After,
}

/// Splice `replacement` over every span, in descending start order so that
/// earlier splices cannot invalidate later raw indices.
pub fn splice_all(raw: &mut Vec<char>, spans: &[RawRange], replacement: &[char]) {
    let mut ordered: Vec<RawRange> = spans.to_vec();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));
    for span in ordered {
        raw.splice(span.start..span.end, replacement.iter().copied());
    }
}

/// The scalars to insert for an insert operation, with the line-ending
/// literal attached when the text must land on its own line.
pub fn insert_payload(
    text: &str,
    position: AnchorPosition,
    add_new_line: bool,
    eol: LineEnding,
) -> Vec<char> {
    if !add_new_line {
        return text.chars().collect();
    }
    match position {
        AnchorPosition::Before => text.chars().chain(eol.as_str().chars()).collect(),
        AnchorPosition::After => eol.as_str().chars().chain(text.chars()).collect(),
    }
}

/// Walk left from `i` across non-newline whitespace. Returns the line
/// boundary (index right after a newline, or 0) or `None` if a
/// non-whitespace scalar sits between `i` and the line start.
pub fn line_boundary_left(raw: &[char], mut i: usize) -> Option<usize> {
    loop {
        if i == 0 {
            return Some(0);
        }
        let c = raw[i - 1];
        if c == '\n' || c == '\r' {
            return Some(i);
        }
        if c.is_whitespace() {
            i -= 1;
        } else {
            return None;
        }
    }
}

/// Mirror of [`line_boundary_left`]: walks right to the newline (returning
/// its index) or the end of the text.
pub fn line_boundary_right(raw: &[char], mut i: usize) -> Option<usize> {
    loop {
        if i == raw.len() {
            return Some(i);
        }
        let c = raw[i];
        if c == '\n' || c == '\r' {
            return Some(i);
        }
        if c.is_whitespace() {
            i += 1;
        } else {
            return None;
        }
    }
}

/// A fully resolved move: what to delete, where to insert, what to insert.
#[derive(Debug)]
pub struct MovePlan {
    pub deletion: RawRange,
    pub insert_at: usize,
    pub payload: Vec<char>,
}

/// Decide between line-granular and intra-line semantics and lay out the
/// splices for a move.
///
/// Line mode requires the moved text to sit alone on its line(s) *and* the
/// anchor edge facing the insertion to touch a line boundary. In line mode
/// the deletion swallows the surrounding indentation and the trailing
/// newline run, and the payload gains a line-ending literal so the text
/// arrives on its own line; otherwise the spans are used verbatim.
pub fn plan_move(
    raw: &[char],
    moved: RawRange,
    anchor: RawRange,
    position: AnchorPosition,
    eol: LineEnding,
) -> EditResult<MovePlan> {
    let move_left = line_boundary_left(raw, moved.start);
    let move_right = line_boundary_right(raw, moved.end);
    let anchor_boundary = match position {
        AnchorPosition::Before => line_boundary_left(raw, anchor.start),
        AnchorPosition::After => line_boundary_right(raw, anchor.end),
    };

    let plan = match (move_left, move_right, anchor_boundary) {
        (Some(line_start), Some(line_end), Some(insert_at)) => {
            debug!("line-boundary move");
            let mut del_end = line_end;
            while del_end < raw.len() && (raw[del_end] == '\n' || raw[del_end] == '\r') {
                del_end += 1;
            }
            let line: Vec<char> = raw[line_start..line_end].to_vec();
            let payload: Vec<char> = match position {
                AnchorPosition::Before => {
                    line.into_iter().chain(eol.as_str().chars()).collect()
                }
                AnchorPosition::After => eol.as_str().chars().chain(line).collect(),
            };
            MovePlan {
                deletion: RawRange::new(line_start, del_end),
                insert_at,
                payload,
            }
        }
        _ => {
            debug!("intra-line move");
            let insert_at = match position {
                AnchorPosition::Before => anchor.start,
                AnchorPosition::After => anchor.end,
            };
            MovePlan {
                deletion: moved,
                insert_at,
                payload: raw[moved.start..moved.end].to_vec(),
            }
        }
    };

    if plan.insert_at > plan.deletion.start && plan.insert_at < plan.deletion.end {
        return Err(EditError::OverlappingMove);
    }
    Ok(plan)
}

/// Apply a [`MovePlan`]: deletion first, then insertion at the
/// deletion-adjusted point.
pub fn apply_move(raw: &mut Vec<char>, plan: &MovePlan) {
    let deleted = plan.deletion.len();
    raw.splice(plan.deletion.start..plan.deletion.end, std::iter::empty());
    let at = if plan.insert_at > plan.deletion.start {
        plan.insert_at - deleted
    } else {
        plan.insert_at
    };
    raw.splice(at..at, plan.payload.iter().copied());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn text(raw: &[char]) -> String {
        raw.iter().collect()
    }

    fn find(raw: &[char], needle: &str) -> RawRange {
        let hay = text(raw);
        let byte_start = hay.find(needle).expect("needle present");
        let start = hay[..byte_start].chars().count();
        RawRange::new(start, start + needle.chars().count())
    }

    // -- splicing --

    #[test]
    fn test_splice_all_descending_order() {
        let mut raw = chars("aa bb aa");
        let spans = [RawRange::new(0, 2), RawRange::new(6, 8)];
        splice_all(&mut raw, &spans, &chars("XYZ"));
        assert_eq!(text(&raw), "XYZ bb XYZ");
    }

    #[test]
    fn test_splice_all_matches_sequential_right_to_left() {
        let original = chars("one two one two one");
        let spans = [
            RawRange::new(0, 3),
            RawRange::new(8, 11),
            RawRange::new(16, 19),
        ];

        let mut bulk = original.clone();
        splice_all(&mut bulk, &spans, &chars("#"));

        let mut sequential = original.clone();
        for span in spans.iter().rev() {
            sequential.splice(span.start..span.end, "#".chars());
        }
        assert_eq!(text(&bulk), text(&sequential));
    }

    #[test]
    fn test_splice_round_trip_is_noop() {
        let mut raw = chars("keep this text");
        let span = find(&raw, "this");
        splice_all(&mut raw, &[span], &chars("this"));
        assert_eq!(text(&raw), "keep this text");
    }

    // -- line boundaries --

    #[test]
    fn test_line_boundary_left() {
        let raw = chars("ab\n  cd");
        assert_eq!(line_boundary_left(&raw, 5), Some(3));
        assert_eq!(line_boundary_left(&raw, 3), Some(3));
        assert_eq!(line_boundary_left(&raw, 1), None);
        assert_eq!(line_boundary_left(&raw, 0), Some(0));
    }

    #[test]
    fn test_line_boundary_right() {
        let raw = chars("ab  \ncd");
        assert_eq!(line_boundary_right(&raw, 2), Some(4));
        assert_eq!(line_boundary_right(&raw, 4), Some(4));
        assert_eq!(line_boundary_right(&raw, 5), None);
        assert_eq!(line_boundary_right(&raw, 7), Some(7));
    }

    // -- move planning --

    #[test]
    fn test_move_line_boundary_before() {
        let raw = chars("function alpha() {\n  const a = 1;\n  const b = 2;\n  const c = 3;\n}");
        let moved = find(&raw, "const b = 2;");
        let anchor = find(&raw, "const a = 1;");

        let plan = plan_move(&raw, moved, anchor, AnchorPosition::Before, LineEnding::Lf)
            .expect("plan");
        let mut out = raw.clone();
        apply_move(&mut out, &plan);
        assert_eq!(
            text(&out),
            "function alpha() {\n  const b = 2;\n  const a = 1;\n  const c = 3;\n}"
        );
    }

    #[test]
    fn test_move_intra_line_after() {
        let raw =
            chars("function alpha() {\n  const a = 1;\n  const b = 2;\n  const c = 3; return c;\n}");
        let moved = find(&raw, "const b = 2;");
        let anchor = find(&raw, "const c = 3;");

        let plan = plan_move(&raw, moved, anchor, AnchorPosition::After, LineEnding::Lf)
            .expect("plan");
        let mut out = raw.clone();
        apply_move(&mut out, &plan);
        assert_eq!(
            text(&out),
            "function alpha() {\n  const a = 1;\n  \n  const c = 3;const b = 2; return c;\n}"
        );
    }

    #[test]
    fn test_move_line_boundary_after_prepends_newline() {
        let raw = chars("a1\nb2\nc3\n");
        let moved = find(&raw, "a1");
        let anchor = find(&raw, "c3");

        let plan =
            plan_move(&raw, moved, anchor, AnchorPosition::After, LineEnding::Lf).expect("plan");
        let mut out = raw.clone();
        apply_move(&mut out, &plan);
        assert_eq!(text(&out), "b2\nc3\na1\n");
    }

    #[test]
    fn test_move_overlap_rejected() {
        let raw = chars("prefix moved block suffix");
        let moved = find(&raw, "moved block");
        // Anchor inside the moved text.
        let anchor = find(&raw, "block");

        let err = plan_move(&raw, moved, anchor, AnchorPosition::Before, LineEnding::Lf)
            .expect_err("must overlap");
        assert!(matches!(err, EditError::OverlappingMove));
    }

    #[test]
    fn test_move_deletion_consumes_crlf_run() {
        let raw = chars("l1\r\nl2\r\nl3");
        let moved = find(&raw, "l1");
        let anchor = find(&raw, "l3");

        let plan = plan_move(&raw, moved, anchor, AnchorPosition::Before, LineEnding::CrLf)
            .expect("plan");
        let mut out = raw.clone();
        apply_move(&mut out, &plan);
        assert_eq!(text(&out), "l2\r\nl1\r\nl3");
    }

    // -- insert payloads --

    #[test]
    fn test_insert_payload_plain() {
        let p = insert_payload("new", AnchorPosition::After, false, LineEnding::Lf);
        assert_eq!(text(&p), "new");
    }

    #[test]
    fn test_insert_payload_own_line() {
        let before = insert_payload("new", AnchorPosition::Before, true, LineEnding::Lf);
        assert_eq!(text(&before), "new\n");
        let after = insert_payload("new", AnchorPosition::After, true, LineEnding::CrLf);
        assert_eq!(text(&after), "\r\nnew");
    }
}
