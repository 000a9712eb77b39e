//! Unified error type for stage registration, combination counting and layout loading.
//!
//! Every fallible operation in the crate returns [`BuilderError`]. The type is a
//! `miette` diagnostic, so the command-line tool can render errors with a code,
//! help text and, for layout files, the offending source location.
//!
//! Registration misuse is a programmer error. The panicking registration API
//! formats its panic message from the same variant it would otherwise return,
//! so both paths report identical text.

use std::path::PathBuf;
use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// Type aliases for clarity and brevity
pub type SourceArc = Arc<NamedSource<String>>;
pub type Result<T> = std::result::Result<T, BuilderError>;

/// All failure modes of the crate.
#[derive(Debug, Error, Diagnostic)]
pub enum BuilderError {
    #[error("cannot create alternative '{name}': no stage is registered yet")]
    #[diagnostic(
        code(testbuilder::registry::no_stage),
        help("call `append_stage(name)` first, before defining alternatives")
    )]
    AlternativeWithoutStage { name: String },

    #[error("radix at dimension {dimension} is zero; every dimension needs at least one alternative")]
    #[diagnostic(code(testbuilder::counter::zero_radix))]
    ZeroRadix { dimension: usize },

    #[error("I/O error on '{}'", .path.display())]
    #[diagnostic(code(testbuilder::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported layout format '{}'", .path.display())]
    #[diagnostic(
        code(testbuilder::layout::format),
        help("use a .yaml, .yml or .json file")
    )]
    UnsupportedLayout { path: PathBuf },

    #[error("invalid stage layout: {message}")]
    #[diagnostic(code(testbuilder::layout::invalid))]
    Layout {
        message: String,
        #[source_code]
        src: SourceArc,
        #[label("here")]
        span: Option<SourceSpan>,
        #[help]
        help: Option<String>,
    },

    #[error("failed to render test plan")]
    #[diagnostic(code(testbuilder::plan::serialize))]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

impl BuilderError {
    /// Builds a layout error pointing at `offset` (if known) inside `content`.
    pub(crate) fn layout(
        message: impl Into<String>,
        name: &str,
        content: &str,
        offset: Option<usize>,
    ) -> Self {
        let span = offset.map(|start| {
            let len = if start < content.len() { 1 } else { 0 };
            SourceSpan::from((start, len))
        });
        BuilderError::Layout {
            message: message.into(),
            src: Arc::new(NamedSource::new(name, content.to_string())),
            span,
            help: None,
        }
    }

    /// Attaches a help message to a layout error; other variants are returned unchanged.
    pub(crate) fn with_help(self, text: impl Into<String>) -> Self {
        match self {
            BuilderError::Layout {
                message, src, span, ..
            } => BuilderError::Layout {
                message,
                src,
                span,
                help: Some(text.into()),
            },
            other => other,
        }
    }
}

/// Converts a 1-based line/column pair into a byte offset within `content`.
pub(crate) fn offset_of(content: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (index, text) in content.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            return Some(offset + column.saturating_sub(1).min(text.len()));
        }
        offset += text.len();
    }
    None
}
