//! Mixed-radix combination counter.
//!
//! Enumerates every tuple `(i_1..i_n)` with `0 <= i_k < radix_k`. The counter
//! advances the *lowest* position that still has room and resets all lower
//! positions, so the first dimension cycles fastest:
//!
//! ```text
//! radices [1, 3, 1, 2] -> 0000 0100 0200 0001 0101 0201
//! ```
//!
//! ## Label encoding
//! Each index is rendered in decimal, zero-padded to the width of the largest
//! index any dimension can reach. With every radix at or below 10 this is one
//! unseparated digit per dimension. Wider radices keep labels unambiguous
//! because every index occupies the same number of characters.

use std::fmt;

use crate::diagnostics::{BuilderError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationCounter {
    indexes: Vec<usize>,
    radices: Vec<usize>,
    width: usize,
}

impl CombinationCounter {
    /// Creates a counter positioned at the all-zero tuple.
    ///
    /// Fails with [`BuilderError::ZeroRadix`] if any radix is zero.
    pub fn new(radices: impl Into<Vec<usize>>) -> Result<Self> {
        let radices = radices.into();
        if let Some(dimension) = radices.iter().position(|&radix| radix == 0) {
            return Err(BuilderError::ZeroRadix { dimension });
        }
        Ok(Self::from_radices(radices))
    }

    /// Callers guarantee every radix is at least one.
    pub(crate) fn from_radices(radices: Vec<usize>) -> Self {
        debug_assert!(radices.iter().all(|&radix| radix >= 1));
        let largest_index = radices.iter().max().map_or(0, |radix| radix - 1);
        Self {
            indexes: vec![0; radices.len()],
            width: digit_count(largest_index),
            radices,
        }
    }

    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    pub fn radices(&self) -> &[usize] {
        &self.radices
    }

    /// Number of distinct tuples, or `None` if it does not fit in `usize`.
    ///
    /// An empty radix list has exactly one tuple.
    pub fn checked_total(&self) -> Option<usize> {
        checked_product(&self.radices)
    }

    /// Like [`checked_total`](Self::checked_total), saturating at `usize::MAX`.
    pub fn total(&self) -> usize {
        self.checked_total().unwrap_or(usize::MAX)
    }

    /// Steps to the next tuple.
    ///
    /// Returns `true` once the enumeration has wrapped back to all-zero.
    pub fn advance(&mut self) -> bool {
        let next = self
            .indexes
            .iter()
            .zip(&self.radices)
            .position(|(&index, &radix)| index + 1 < radix);

        match next {
            Some(position) => {
                self.indexes[position] += 1;
                self.indexes[..position].fill(0);
                false
            }
            None => {
                self.indexes.fill(0);
                true
            }
        }
    }

    /// Renders the current tuple as a compact label.
    pub fn label(&self) -> String {
        let width = self.width;
        self.indexes
            .iter()
            .map(|index| format!("{index:0width$}"))
            .collect()
    }
}

impl fmt::Display for CombinationCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

pub(crate) fn checked_product(values: &[usize]) -> Option<usize> {
    values
        .iter()
        .try_fold(1usize, |product, &value| product.checked_mul(value))
}

fn digit_count(mut value: usize) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}
