//! Declarative stage outlines loaded from YAML or JSON.
//!
//! A layout names stages and their alternatives without any setup logic. It is
//! used to preview the generated test names for a registry shape:
//!
//! ```yaml
//! naming:
//!   label_prefix: "combo "
//! stages:
//!   - name: login
//!     alternatives: [login-admin]
//!   - name: fetch
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::NamingConfig;
use crate::diagnostics::{offset_of, BuilderError, Result};
use crate::registry::StageRegistry;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageLayout {
    #[serde(default)]
    pub naming: Option<NamingConfig>,
    #[serde(default)]
    pub stages: Vec<StageOutline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutline {
    pub name: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

impl StageLayout {
    pub fn from_yaml(source_name: &str, content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| {
            let offset = e.location().map(|location| location.index());
            BuilderError::layout(e.to_string(), source_name, content, offset)
                .with_help("a layout is a `stages` list of `{ name, alternatives }` entries")
        })
    }

    pub fn from_json(source_name: &str, content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            let offset = offset_of(content, e.line(), e.column());
            BuilderError::layout(e.to_string(), source_name, content, offset)
                .with_help("a layout is a `stages` list of `{ name, alternatives }` entries")
        })
    }

    /// Reads a layout, choosing the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| BuilderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source_name = path.display().to_string();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&source_name, &content),
            Some("json") => Self::from_json(&source_name, &content),
            _ => Err(BuilderError::UnsupportedLayout {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Registers every outlined stage and alternative, without setup logic.
    pub fn to_registry<Sut, State, Assert, Ctx>(&self) -> StageRegistry<Sut, State, Assert, Ctx> {
        let mut registry =
            StageRegistry::new().with_naming(self.naming.clone().unwrap_or_default());
        for stage in &self.stages {
            registry.append_stage(stage.name.as_str());
            for alternative in &stage.alternatives {
                registry.append_alternative(alternative.as_str());
            }
        }
        registry
    }
}
