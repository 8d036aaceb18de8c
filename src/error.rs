//! Error types surfaced by template assembly, parsing, and generation.

use thiserror::Error;

use crate::node::TemplateKind;

/// Everything that can go wrong while building a template or generating from
/// one. Failures are deterministic for a given input, so nothing is retried
/// and nothing is cached in a failed state.
#[derive(Debug, Clone, Error)]
pub enum TemplateError {
    /// A placeholder sequence could not be assembled into template source.
    /// Surfaced by the template builders, never deferred to generation time.
    #[error("cannot assemble template: {0}")]
    Assembly(String),

    /// The assembled template text failed to parse. Carries the full
    /// assembled source so a caller can see exactly what was handed to the
    /// parser after placeholder splicing.
    #[error("failed to parse {kind} template: {message}\n--- assembled source ---\n{source_text}")]
    Parse {
        kind: TemplateKind,
        message: String,
        source_text: String,
    },

    /// Parsing succeeded but the kind-specific wrapper shape was missing,
    /// e.g. an `expression` template whose first statement was not the
    /// synthetic assignment.
    #[error("{kind} template did not produce {expected}")]
    Extraction {
        kind: TemplateKind,
        expected: &'static str,
    },

    /// A caller asked for the source range of a synthetic node. Generated
    /// trees carry no valid positions, and answering with stale or zeroed
    /// offsets would be worse than refusing.
    #[error("synthetic node carries no source position")]
    PositionAccess,
}
