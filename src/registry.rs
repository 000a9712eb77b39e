//! Stage registry: the ordered stages and their alternatives.
//!
//! A stage is one position in the setup sequence. It is created together with
//! its first alternative, so a stage is never empty. Later alternatives are
//! appended to the most recently created stage and multiply the number of
//! generated paths.
//!
//! ## Usage Workflow
//! ```rust
//! use testbuilder::{StageRegistry, TestContext};
//!
//! let mut registry: StageRegistry<String, u32, &'static str> = StageRegistry::new();
//! registry
//!     .append_stage("connect")
//!     .with_cumulative_setup(|_ctx, sut, _state| sut.push_str("connected"))
//!     .with_assertion("is connected");
//! registry
//!     .append_alternative("connect over tls")
//!     .with_cumulative_setup(|_ctx, sut, _state| sut.push_str("tls"));
//!
//! assert_eq!(registry.path_count(), 2);
//! for (name, builder) in registry.tests() {
//!     let fixture = builder.build(&TestContext::new(name));
//!     assert!(!fixture.sut.is_empty());
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::config::NamingConfig;
use crate::context::TestContext;
use crate::diagnostics::{BuilderError, Result};

/// Setup logic that mutates the system under test and the state in place.
pub type SetupFn<Sut, State, Ctx> = Arc<dyn Fn(&Ctx, &mut Sut, &mut State) + Send + Sync>;

// ============================================================================
// ALTERNATIVE
// ============================================================================

/// One concrete setup variant of a stage.
///
/// Configuration methods overwrite the previous value and return the same
/// alternative, so calls chain on the stored object.
pub struct Alternative<Sut, State, Assert, Ctx = TestContext> {
    name: String,
    cumulative_setup: Option<SetupFn<Sut, State, Ctx>>,
    one_shot_setup: Option<SetupFn<Sut, State, Ctx>>,
    assertion: Option<Assert>,
}

impl<Sut, State, Assert, Ctx> Alternative<Sut, State, Assert, Ctx> {
    fn new(name: String) -> Self {
        Self {
            name,
            cumulative_setup: None,
            one_shot_setup: None,
            assertion: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Setup applied for this position and every later position on a path.
    pub fn with_cumulative_setup<F>(&mut self, setup: F) -> &mut Self
    where
        F: Fn(&Ctx, &mut Sut, &mut State) + Send + Sync + 'static,
    {
        self.cumulative_setup = Some(Arc::new(setup));
        self
    }

    /// Setup applied once, only for the test generated at this position.
    pub fn with_one_shot_setup<F>(&mut self, setup: F) -> &mut Self
    where
        F: Fn(&Ctx, &mut Sut, &mut State) + Send + Sync + 'static,
    {
        self.one_shot_setup = Some(Arc::new(setup));
        self
    }

    /// Opaque assertion payload forwarded with every fixture built at this position.
    pub fn with_assertion(&mut self, assertion: Assert) -> &mut Self {
        self.assertion = Some(assertion);
        self
    }

    pub fn assertion(&self) -> Option<&Assert> {
        self.assertion.as_ref()
    }

    pub fn has_cumulative_setup(&self) -> bool {
        self.cumulative_setup.is_some()
    }

    pub fn has_one_shot_setup(&self) -> bool {
        self.one_shot_setup.is_some()
    }

    pub(crate) fn apply_cumulative(&self, ctx: &Ctx, sut: &mut Sut, state: &mut State) {
        if let Some(setup) = &self.cumulative_setup {
            setup(ctx, sut, state);
        }
    }

    pub(crate) fn apply_one_shot(&self, ctx: &Ctx, sut: &mut Sut, state: &mut State) {
        if let Some(setup) = &self.one_shot_setup {
            setup(ctx, sut, state);
        }
    }
}

impl<Sut, State, Assert, Ctx> fmt::Debug for Alternative<Sut, State, Assert, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alternative")
            .field("name", &self.name)
            .field("cumulative_setup", &self.has_cumulative_setup())
            .field("one_shot_setup", &self.has_one_shot_setup())
            .field("assertion", &self.assertion.is_some())
            .finish()
    }
}

// ============================================================================
// STAGE
// ============================================================================

/// A position in the setup sequence holding one or more alternatives.
pub struct Stage<Sut, State, Assert, Ctx = TestContext> {
    alternatives: Vec<Alternative<Sut, State, Assert, Ctx>>,
}

impl<Sut, State, Assert, Ctx> Stage<Sut, State, Assert, Ctx> {
    fn new(first: Alternative<Sut, State, Assert, Ctx>) -> Self {
        Self {
            alternatives: vec![first],
        }
    }

    /// Name of the alternative the stage was created with.
    pub fn name(&self) -> &str {
        self.alternatives[0].name()
    }

    pub fn alternatives(&self) -> &[Alternative<Sut, State, Assert, Ctx>] {
        &self.alternatives
    }

    pub fn alternative(&self, index: usize) -> Option<&Alternative<Sut, State, Assert, Ctx>> {
        self.alternatives.get(index)
    }

    /// Always at least one.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Always false: a stage is created together with its first alternative.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    fn push(&mut self, alternative: Alternative<Sut, State, Assert, Ctx>) -> &mut Alternative<Sut, State, Assert, Ctx> {
        self.alternatives.push(alternative);
        let last = self.alternatives.len() - 1;
        &mut self.alternatives[last]
    }
}

impl<Sut, State, Assert, Ctx> fmt::Debug for Stage<Sut, State, Assert, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.alternatives).finish()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Ordered collection of stages for one system under test.
///
/// Type parameters:
/// - `Sut`: the system under test, freshly defaulted for every fixture
/// - `State`: mutable test state, freshly defaulted for every fixture
/// - `Assert`: assertion payload, stored and forwarded but never invoked
/// - `Ctx`: harness context forwarded to every setup call
pub struct StageRegistry<Sut, State, Assert, Ctx = TestContext> {
    stages: Vec<Stage<Sut, State, Assert, Ctx>>,
    naming: NamingConfig,
}

impl<Sut, State, Assert, Ctx> Default for StageRegistry<Sut, State, Assert, Ctx> {
    fn default() -> Self {
        Self {
            stages: Vec::new(),
            naming: NamingConfig::default(),
        }
    }
}

impl<Sut, State, Assert, Ctx> StageRegistry<Sut, State, Assert, Ctx> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the naming used for labelled test names.
    pub fn with_naming(mut self, naming: NamingConfig) -> Self {
        self.naming = naming;
        self
    }

    pub fn naming(&self) -> &NamingConfig {
        &self.naming
    }

    /// Creates a new stage holding a single alternative named `name`.
    pub fn append_stage(&mut self, name: impl Into<String>) -> &mut Alternative<Sut, State, Assert, Ctx> {
        let name = name.into();
        tracing::debug!(stage = self.stages.len(), name = %name, "registered stage");
        self.stages.push(Stage::new(Alternative::new(name)));
        let last = self.stages.len() - 1;
        &mut self.stages[last].alternatives[0]
    }

    /// Appends an alternative to the most recently created stage.
    ///
    /// # Panics
    /// Panics if no stage has been registered yet. Registering an alternative
    /// first is a mistake in the test definition itself; use
    /// [`StageRegistry::try_append_alternative`] to get the error instead.
    pub fn append_alternative(&mut self, name: impl Into<String>) -> &mut Alternative<Sut, State, Assert, Ctx> {
        match self.try_append_alternative(name) {
            Ok(alternative) => alternative,
            Err(err) => panic!("{err}; call `append_stage(name)` before defining alternatives"),
        }
    }

    /// Appends an alternative to the most recently created stage, or reports
    /// [`BuilderError::AlternativeWithoutStage`] when there is none.
    pub fn try_append_alternative(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut Alternative<Sut, State, Assert, Ctx>> {
        let name = name.into();
        let stage_index = self.stages.len().checked_sub(1);
        let Some(stage_index) = stage_index else {
            return Err(BuilderError::AlternativeWithoutStage { name });
        };
        let stage = &mut self.stages[stage_index];
        tracing::debug!(
            stage = stage_index,
            alternative = stage.len(),
            name = %name,
            "registered alternative"
        );
        Ok(stage.push(Alternative::new(name)))
    }

    pub fn stages(&self) -> &[Stage<Sut, State, Assert, Ctx>] {
        &self.stages
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Number of alternatives per stage, in stage order.
    pub fn alternative_counts(&self) -> Vec<usize> {
        self.stages.iter().map(Stage::len).collect()
    }

    /// True when any stage offers more than one alternative.
    pub fn has_alternatives(&self) -> bool {
        self.stages.iter().any(|stage| stage.len() > 1)
    }
}

impl<Sut, State, Assert, Ctx> fmt::Debug for StageRegistry<Sut, State, Assert, Ctx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageRegistry")
            .field("stages", &self.stages)
            .field("naming", &self.naming)
            .finish()
    }
}
