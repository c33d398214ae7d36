//! Flat view — whitespace-stripped projection of a scalar vector.
//!
//! All matching runs against the flat view so that any difference in
//! indentation, spacing, or line endings between the search string and the
//! file is invisible to the matcher. Two index maps tie every flat position
//! back to the raw text so matched spans can be reconstructed exactly.

/// Whitespace-free projection of a raw Unicode scalar vector, with
/// bidirectional index maps.
///
/// For raw text `R` and flat view `F`:
/// - `raw_to_flat` has length `|R|` and is non-decreasing; a whitespace run
///   projects to the flat index of the next emitted scalar (or `|F|` when
///   the run reaches the end of the text).
/// - `flat_to_raw` has length `|F|` and is strictly increasing; it holds the
///   raw index of every emitted scalar.
#[derive(Debug)]
pub struct FlatView<'a> {
    raw: &'a [char],
    flat: Vec<char>,
    raw_to_flat: Vec<usize>,
    flat_to_raw: Vec<usize>,
}

impl<'a> FlatView<'a> {
    /// Build the projection in a single left-to-right pass. O(|R|).
    pub fn build(raw: &'a [char]) -> Self {
        let mut flat = Vec::with_capacity(raw.len());
        let mut raw_to_flat = Vec::with_capacity(raw.len());
        let mut flat_to_raw = Vec::with_capacity(raw.len());

        for (i, &c) in raw.iter().enumerate() {
            raw_to_flat.push(flat.len());
            if !c.is_whitespace() {
                flat_to_raw.push(i);
                flat.push(c);
            }
        }

        Self {
            raw,
            flat,
            raw_to_flat,
            flat_to_raw,
        }
    }

    /// The raw scalar vector the view was built from.
    pub fn raw(&self) -> &'a [char] {
        self.raw
    }

    /// The whitespace-free scalar sequence.
    pub fn flat(&self) -> &[char] {
        &self.flat
    }

    pub fn flat_len(&self) -> usize {
        self.flat.len()
    }

    /// Raw index of the scalar at flat index `j`.
    pub fn raw_index(&self, j: usize) -> usize {
        self.flat_to_raw[j]
    }

    /// Flat index that raw index `i` projects to.
    pub fn flat_index(&self, i: usize) -> usize {
        self.raw_to_flat[i]
    }

    /// Map an exclusive raw end to an exclusive flat end.
    ///
    /// Full-length endpoints map to full-length endpoints; otherwise the
    /// exclusive end is derived from the projection of the last covered
    /// scalar.
    pub fn flat_end(&self, raw_end: usize) -> usize {
        if raw_end == 0 {
            return 0;
        }
        if raw_end >= self.raw_to_flat.len() {
            return self.flat.len();
        }
        self.raw_to_flat[raw_end - 1] + 1
    }
}
