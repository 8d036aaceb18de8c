//! The generator produced by compiling a template.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::cache::SourceCache;
use crate::error::TemplateError;
use crate::node::{Binding, Bindings, SyntaxNode, TemplateKind};
use crate::{subst, synth};

/// A compiled template: call [`generate`](Generator::generate) to produce a
/// fresh tree with placeholders bound.
///
/// Generators hold no tree themselves — only the template kind, the
/// assembled source, the lazy sub-generator map, and a handle to the cache.
/// Each call fetches the template by key (re-parsing if the entry was
/// evicted or the cache cleared), detaches a clone, and substitutes into it,
/// so no two calls can ever return aliased trees and a cache `clear` never
/// invalidates an existing generator.
#[derive(Debug, Clone)]
pub struct Generator {
    kind: TemplateKind,
    source: String,
    lazy: FxHashMap<String, Generator>,
    cache: Arc<SourceCache>,
}

impl Generator {
    pub(crate) fn new(
        kind: TemplateKind,
        source: String,
        lazy: FxHashMap<String, Generator>,
        cache: Arc<SourceCache>,
    ) -> Self {
        Self {
            kind,
            source,
            lazy,
            cache,
        }
    }

    /// The kind of node every call produces.
    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// The assembled template source this generator was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Produces a fresh synthetic tree with `bindings` substituted.
    ///
    /// Lazy sub-generators are resolved first, each invoked with the same
    /// binding map as this call, so outer bindings satisfy nested templates
    /// without being respecified. Their results are merged under synthetic
    /// keys that cannot collide with caller-chosen names. Names bound but
    /// absent from the template are ignored; names present but unbound stay
    /// as written.
    pub fn generate(&self, bindings: &Bindings) -> Result<SyntaxNode, TemplateError> {
        let mut merged = bindings.clone();
        for (key, generator) in &self.lazy {
            trace!(key, "resolving lazy sub-generator");
            let node = generator.generate(bindings)?;
            merged.insert(key.clone(), Binding::try_from(node)?);
        }

        let template = self.cache.get_or_parse(self.kind, &self.source)?;
        let mut out = synth::detach(template.as_ref());
        subst::substitute(&mut out, &merged);
        Ok(out)
    }

    /// [`generate`](Generator::generate) with no bindings.
    pub fn generate_default(&self) -> Result<SyntaxNode, TemplateError> {
        self.generate(&Bindings::default())
    }
}
