//! Test materializer: named, replayable fixture builders for every path position.
//!
//! For each path and each stage position `i` along it, the materializer emits a
//! unique name and a [`FixtureBuilder`]. Calling [`FixtureBuilder::build`]:
//!
//! 1. defaults a fresh system under test and a fresh state,
//! 2. runs the cumulative setup of positions `0..=i` in order,
//! 3. runs the one-shot setup of position `i` once,
//! 4. returns both values with the assertion payload of position `i`.
//!
//! Nothing is cached between calls, so two builds of the same position never
//! share storage. Production is pull-based: dropping or breaking out of
//! [`Tests`] is the stop signal and no cleanup is needed, because nothing is
//! allocated until a builder runs.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::ControlFlow;
use std::sync::Arc;

use crate::config::NamingConfig;
use crate::context::TestContext;
use crate::expander::Paths;
use crate::registry::{Alternative, StageRegistry};

/// Values produced for a single generated test.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture<'a, Sut, State, Assert> {
    pub sut: Sut,
    pub state: State,
    /// Assertion payload of the alternative at this position, if one was set.
    pub assertion: Option<&'a Assert>,
}

/// Deferred builder for one `(path, position)` pair.
pub struct FixtureBuilder<'a, Sut, State, Assert, Ctx = TestContext> {
    path: Arc<[&'a Alternative<Sut, State, Assert, Ctx>]>,
    position: usize,
    label: Option<Arc<str>>,
}

impl<'a, Sut, State, Assert, Ctx> FixtureBuilder<'a, Sut, State, Assert, Ctx> {
    /// Stage position this builder materializes.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Combination label of the path, if the registry has alternatives.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Registered name of the alternative at this position.
    pub fn base_name(&self) -> &'a str {
        let alternative: &'a Alternative<Sut, State, Assert, Ctx> = self.path[self.position];
        alternative.name()
    }

    /// Replays setup for this position on freshly defaulted values.
    ///
    /// Setup panics propagate unchanged to the caller.
    pub fn build(&self, ctx: &Ctx) -> Fixture<'a, Sut, State, Assert>
    where
        Sut: Default,
        State: Default,
    {
        let mut sut = Sut::default();
        let mut state = State::default();

        let steps = &self.path[..=self.position];
        for alternative in steps {
            alternative.apply_cumulative(ctx, &mut sut, &mut state);
        }

        let current = self.path[self.position];
        current.apply_one_shot(ctx, &mut sut, &mut state);
        tracing::trace!(
            position = self.position,
            label = self.label.as_deref().unwrap_or(""),
            name = current.name(),
            "built fixture"
        );

        Fixture {
            sut,
            state,
            assertion: current.assertion(),
        }
    }
}

impl<Sut, State, Assert, Ctx> Clone for FixtureBuilder<'_, Sut, State, Assert, Ctx> {
    fn clone(&self) -> Self {
        Self {
            path: Arc::clone(&self.path),
            position: self.position,
            label: self.label.clone(),
        }
    }
}

impl<Sut, State, Assert, Ctx> fmt::Debug for FixtureBuilder<'_, Sut, State, Assert, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureBuilder")
            .field("label", &self.label)
            .field("position", &self.position)
            .field("name", &self.base_name())
            .finish()
    }
}

/// Sequential producer of `(name, builder)` pairs over every path.
pub struct Tests<'a, Sut, State, Assert, Ctx = TestContext> {
    paths: Paths<'a, Sut, State, Assert, Ctx>,
    naming: &'a NamingConfig,
    current: Option<(Option<Arc<str>>, Arc<[&'a Alternative<Sut, State, Assert, Ctx>]>)>,
    position: usize,
    stage_count: usize,
}

impl<'a, Sut, State, Assert, Ctx> Iterator for Tests<'a, Sut, State, Assert, Ctx> {
    type Item = (String, FixtureBuilder<'a, Sut, State, Assert, Ctx>);

    fn next(&mut self) -> Option<Self::Item> {
        let exhausted = self
            .current
            .as_ref()
            .map_or(true, |(_, path)| self.position >= path.len());
        if exhausted {
            let (label, path) = self.paths.next()?.into_parts();
            self.current = Some((label.map(Arc::from), path));
            self.position = 0;
        }

        let (label, path) = self.current.as_ref()?;
        let builder = FixtureBuilder {
            path: Arc::clone(path),
            position: self.position,
            label: label.clone(),
        };
        self.position += 1;

        let name = self.naming.test_name(builder.label(), builder.base_name());
        Some((name, builder))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let in_current = self
            .current
            .as_ref()
            .map_or(0, |(_, path)| path.len().saturating_sub(self.position));
        let remaining = self
            .paths
            .size_hint()
            .1
            .and_then(|paths| paths.checked_mul(self.stage_count))
            .and_then(|tests| tests.checked_add(in_current));
        match remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (usize::MAX, None),
        }
    }
}

impl<Sut, State, Assert, Ctx> FusedIterator for Tests<'_, Sut, State, Assert, Ctx> {}

impl<Sut, State, Assert, Ctx> StageRegistry<Sut, State, Assert, Ctx> {
    /// Lazily yields one `(name, builder)` pair per stage position of every path.
    pub fn tests(&self) -> Tests<'_, Sut, State, Assert, Ctx> {
        Tests {
            paths: self.paths(),
            naming: self.naming(),
            current: None,
            position: 0,
            stage_count: self.stage_count(),
        }
    }

    /// Total number of generated tests (`paths * stages`), or `None` on overflow.
    pub fn checked_test_count(&self) -> Option<usize> {
        self.checked_path_count()?.checked_mul(self.stage_count())
    }

    /// Like [`checked_test_count`](Self::checked_test_count), saturating at `usize::MAX`.
    pub fn test_count(&self) -> usize {
        self.checked_test_count().unwrap_or(usize::MAX)
    }

    /// Hands each `(name, builder)` pair to `visitor` until it breaks.
    ///
    /// Returns how many pairs were delivered, including the one that broke.
    pub fn visit_tests<F>(&self, mut visitor: F) -> usize
    where
        F: FnMut(&str, FixtureBuilder<'_, Sut, State, Assert, Ctx>) -> ControlFlow<()>,
    {
        let mut delivered = 0;
        for (name, builder) in self.tests() {
            delivered += 1;
            if visitor(&name, builder).is_break() {
                tracing::debug!(delivered, "test production stopped by consumer");
                break;
            }
        }
        delivered
    }
}
