//! Naming configuration for generated tests.

use serde::{Deserialize, Serialize};

/// Controls how a combination label is folded into a generated test name.
///
/// Labels are only attached when more than one path exists; the rendered
/// name is `"{label_prefix}{label}{label_separator}{name}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub label_prefix: String,
    pub label_separator: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            label_prefix: "Test Alternative #".to_string(),
            label_separator: "_".to_string(),
        }
    }
}

impl NamingConfig {
    /// Renders the emitted name for an alternative on a path.
    pub fn test_name(&self, label: Option<&str>, base_name: &str) -> String {
        match label {
            Some(label) => format!(
                "{}{}{}{}",
                self.label_prefix, label, self.label_separator, base_name
            ),
            None => base_name.to_string(),
        }
    }
}
