//! Combination expander: turns the registered stages into concrete paths.
//!
//! A path selects exactly one alternative from every stage, in stage order.
//! The number of paths is the product of the per-stage alternative counts.
//! Paths are produced lazily by driving a [`CombinationCounter`]; nothing is
//! computed for a combination until the iterator reaches it.
//!
//! - No stages: no paths at all.
//! - Every stage with a single alternative: exactly one unlabelled path.
//! - Any stage with several alternatives: every path carries the counter label.
//!
//! When the path count does not fit in `usize` the iterator still streams
//! paths in order; only its upper size bound is lost.

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use crate::context::TestContext;
use crate::counter::{checked_product, CombinationCounter};
use crate::registry::{Alternative, Stage, StageRegistry};

/// One concrete linear sequence of alternatives.
pub struct Path<'a, Sut, State, Assert, Ctx = TestContext> {
    label: Option<String>,
    indexes: Vec<usize>,
    alternatives: Arc<[&'a Alternative<Sut, State, Assert, Ctx>]>,
}

impl<'a, Sut, State, Assert, Ctx> Path<'a, Sut, State, Assert, Ctx> {
    /// Combination label, present only when more than one path exists.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Chosen alternative index per stage.
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    pub fn alternatives(&self) -> &[&'a Alternative<Sut, State, Assert, Ctx>] {
        &self.alternatives
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Alternative names along the path.
    pub fn names(&self) -> Vec<&'a str> {
        self.alternatives.iter().map(|&alternative| alternative.name()).collect()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (Option<String>, Arc<[&'a Alternative<Sut, State, Assert, Ctx>]>) {
        (self.label, self.alternatives)
    }
}

impl<Sut, State, Assert, Ctx> fmt::Debug for Path<'_, Sut, State, Assert, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("label", &self.label)
            .field("indexes", &self.indexes)
            .field("names", &self.names())
            .finish()
    }
}

/// Lazy iterator over every path of a registry.
pub struct Paths<'a, Sut, State, Assert, Ctx = TestContext> {
    stages: &'a [Stage<Sut, State, Assert, Ctx>],
    counter: Option<CombinationCounter>,
    labelled: bool,
    /// `None` once the path count overflowed `usize`.
    remaining: Option<usize>,
}

impl<'a, Sut, State, Assert, Ctx> Paths<'a, Sut, State, Assert, Ctx> {
    pub(crate) fn new(stages: &'a [Stage<Sut, State, Assert, Ctx>]) -> Self {
        if stages.is_empty() {
            return Self {
                stages,
                counter: None,
                labelled: false,
                remaining: Some(0),
            };
        }

        let counts: Vec<usize> = stages.iter().map(Stage::len).collect();
        let labelled = counts.iter().any(|&count| count > 1);
        let counter = CombinationCounter::from_radices(counts);
        let remaining = counter.checked_total();
        tracing::debug!(
            stages = stages.len(),
            paths = ?remaining,
            labelled,
            "expanding stage combinations"
        );

        Self {
            stages,
            counter: Some(counter),
            labelled,
            remaining,
        }
    }

    /// True when generated names carry combination labels.
    pub fn is_labelled(&self) -> bool {
        self.labelled
    }
}

impl<'a, Sut, State, Assert, Ctx> Iterator for Paths<'a, Sut, State, Assert, Ctx> {
    type Item = Path<'a, Sut, State, Assert, Ctx>;

    fn next(&mut self) -> Option<Self::Item> {
        let counter = self.counter.as_mut()?;

        let indexes = counter.indexes().to_vec();
        let alternatives: Arc<[_]> = self
            .stages
            .iter()
            .zip(&indexes)
            .map(|(stage, &index)| &stage.alternatives()[index])
            .collect();
        let label = self.labelled.then(|| counter.label());

        if counter.advance() {
            self.counter = None;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }

        Some(Path {
            label,
            indexes,
            alternatives,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

impl<Sut, State, Assert, Ctx> FusedIterator for Paths<'_, Sut, State, Assert, Ctx> {}

impl<Sut, State, Assert, Ctx> StageRegistry<Sut, State, Assert, Ctx> {
    /// Every path implied by the registered stages, in counter order.
    pub fn paths(&self) -> Paths<'_, Sut, State, Assert, Ctx> {
        Paths::new(self.stages())
    }

    /// Product of the per-stage alternative counts; zero without stages.
    ///
    /// `None` when the product does not fit in `usize`.
    pub fn checked_path_count(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        checked_product(&self.alternative_counts())
    }

    /// Like [`checked_path_count`](Self::checked_path_count), saturating at `usize::MAX`.
    pub fn path_count(&self) -> usize {
        self.checked_path_count().unwrap_or(usize::MAX)
    }
}
