//! The template front end: five named builders over one assembly routine.

use std::sync::Arc;

use crate::assemble::{Placeholder, assemble};
use crate::cache::SourceCache;
use crate::error::TemplateError;
use crate::generate::Generator;
use crate::node::TemplateKind;

/// Compiles template text into [`Generator`]s, sharing one [`SourceCache`].
///
/// Each kind has two entry points: a whole-string form for templates whose
/// placeholders are all resolved by name at generation time, and a `_parts`
/// form taking interleaved fragments and [`Placeholder`] values for
/// assembly-time splicing. Both parse eagerly, so a malformed template fails
/// here rather than on first use.
pub struct TemplateBuilder {
    cache: Arc<SourceCache>,
}

impl Default for TemplateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateBuilder {
    /// A builder with its own cache at the default capacity.
    pub fn new() -> Self {
        Self::with_cache(Arc::new(SourceCache::new()))
    }

    /// A builder over an existing cache, for sharing one cache between
    /// builders or bounding its capacity explicitly.
    pub fn with_cache(cache: Arc<SourceCache>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<SourceCache> {
        &self.cache
    }

    /// Compiles a type template, e.g. `"{ a: number }"`.
    pub fn ty(&self, source: &str) -> Result<Generator, TemplateError> {
        self.build(TemplateKind::Type, &[source], vec![])
    }

    pub fn ty_parts(
        &self,
        fragments: &[&str],
        placeholders: Vec<Placeholder>,
    ) -> Result<Generator, TemplateError> {
        self.build(TemplateKind::Type, fragments, placeholders)
    }

    /// Compiles an expression template, e.g. `"100 + TOTAL"`.
    pub fn expression(&self, source: &str) -> Result<Generator, TemplateError> {
        self.build(TemplateKind::Expression, &[source], vec![])
    }

    pub fn expression_parts(
        &self,
        fragments: &[&str],
        placeholders: Vec<Placeholder>,
    ) -> Result<Generator, TemplateError> {
        self.build(TemplateKind::Expression, fragments, placeholders)
    }

    /// Compiles a statement template, e.g. `"const x = INIT;"`.
    pub fn statement(&self, source: &str) -> Result<Generator, TemplateError> {
        self.build(TemplateKind::Statement, &[source], vec![])
    }

    pub fn statement_parts(
        &self,
        fragments: &[&str],
        placeholders: Vec<Placeholder>,
    ) -> Result<Generator, TemplateError> {
        self.build(TemplateKind::Statement, fragments, placeholders)
    }

    /// Compiles a JSX attribute template, e.g. `"data-x={100}"`.
    pub fn attribute(&self, source: &str) -> Result<Generator, TemplateError> {
        self.build(TemplateKind::Attribute, &[source], vec![])
    }

    pub fn attribute_parts(
        &self,
        fragments: &[&str],
        placeholders: Vec<Placeholder>,
    ) -> Result<Generator, TemplateError> {
        self.build(TemplateKind::Attribute, fragments, placeholders)
    }

    /// Compiles a whole-file template.
    pub fn source_file(&self, source: &str) -> Result<Generator, TemplateError> {
        self.build(TemplateKind::SourceFile, &[source], vec![])
    }

    pub fn source_file_parts(
        &self,
        fragments: &[&str],
        placeholders: Vec<Placeholder>,
    ) -> Result<Generator, TemplateError> {
        self.build(TemplateKind::SourceFile, fragments, placeholders)
    }

    fn build(
        &self,
        kind: TemplateKind,
        fragments: &[&str],
        placeholders: Vec<Placeholder>,
    ) -> Result<Generator, TemplateError> {
        let (source, lazy) = assemble(fragments, placeholders)?;
        // Validate the template now and warm the cache for the first call.
        self.cache.get_or_parse(kind, &source)?;
        Ok(Generator::new(kind, source, lazy, Arc::clone(&self.cache)))
    }
}
