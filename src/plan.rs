//! Serializable snapshot of the tests a registry will generate.
//!
//! A [`TestPlan`] records, in production order, the emitted name of every
//! generated test together with the path and position it came from. It never
//! runs any setup, so it is cheap to build and convenient for golden checks of
//! the enumeration order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{BuilderError, Result};
use crate::registry::StageRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Name as emitted by [`StageRegistry::tests`].
    pub name: String,
    /// Registered alternative name.
    pub base_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Index of the path in enumeration order.
    pub path: usize,
    /// Stage position along the path.
    pub position: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPlan {
    pub stages: usize,
    pub paths: usize,
    pub tests: Vec<PlanEntry>,
}

impl TestPlan {
    pub fn names(&self) -> Vec<&str> {
        self.tests.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| BuilderError::Serialize { source })
    }
}

impl fmt::Display for TestPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.tests {
            writeln!(f, "{}", entry.name)?;
        }
        Ok(())
    }
}

impl<Sut, State, Assert, Ctx> StageRegistry<Sut, State, Assert, Ctx> {
    /// Lists every generated test without building any fixture.
    pub fn plan(&self) -> TestPlan {
        let mut tests = Vec::new();
        let mut path = 0;
        for (name, builder) in self.tests() {
            if builder.position() == 0 && !tests.is_empty() {
                path += 1;
            }
            tests.push(PlanEntry {
                name,
                base_name: builder.base_name().to_string(),
                label: builder.label().map(str::to_string),
                path,
                position: builder.position(),
            });
        }

        TestPlan {
            stages: self.stage_count(),
            paths: self.path_count(),
            tests,
        }
    }
}
