//! # testbuilder
//!
//! Combinatorial, incrementally-built test fixtures.
//!
//! A test author registers an ordered sequence of setup *stages*. Each stage
//! may offer several mutually exclusive *alternatives*. The registry expands
//! every combination of alternatives into a *path* and, for every stage
//! position on every path, yields a name plus a builder that replays the
//! cumulative setup from scratch on fresh values.
//!
//! ```rust
//! use testbuilder::{StageRegistry, TestContext};
//!
//! type Check = fn(&str) -> bool;
//!
//! let mut registry: StageRegistry<String, (), Check> = StageRegistry::new();
//! registry
//!     .append_stage("empty")
//!     .with_assertion(|sut| sut.is_empty());
//! registry
//!     .append_stage("greeting")
//!     .with_cumulative_setup(|_ctx, sut, _state| sut.push_str("hello"))
//!     .with_assertion(|sut| sut == "hello");
//! registry
//!     .append_alternative("farewell")
//!     .with_cumulative_setup(|_ctx, sut, _state| sut.push_str("bye"))
//!     .with_assertion(|sut| sut == "bye");
//!
//! for (name, builder) in registry.tests() {
//!     let ctx = TestContext::new(name);
//!     let fixture = builder.build(&ctx);
//!     if let Some(check) = fixture.assertion {
//!         assert!(check(&fixture.sut), "{}", ctx.name());
//!     }
//! }
//! ```
//!
//! The crate never runs assertion payloads; they are forwarded to the caller.

pub use crate::config::NamingConfig;
pub use crate::context::TestContext;
pub use crate::counter::CombinationCounter;
pub use crate::diagnostics::{BuilderError, Result};
pub use crate::expander::{Path, Paths};
pub use crate::layout::{StageLayout, StageOutline};
pub use crate::materializer::{Fixture, FixtureBuilder, Tests};
pub use crate::plan::{PlanEntry, TestPlan};
pub use crate::registry::{Alternative, SetupFn, Stage, StageRegistry};

pub mod cli;
pub mod config;
pub mod context;
pub mod counter;
pub mod diagnostics;
pub mod expander;
pub mod layout;
pub mod materializer;
pub mod plan;
pub mod registry;

/// Common imports for test code using the builder.
pub mod prelude {
    pub use crate::{
        Alternative, BuilderError, Fixture, FixtureBuilder, NamingConfig, StageRegistry,
        TestContext,
    };
}
