//! The closed set of tree shapes templates can produce, and the binding
//! values that can be substituted into them.

use std::fmt;
use std::ops::Range;

use swc_core::common::Spanned;
use swc_core::ecma::ast::{Expr, JSXAttr, Module, Stmt, TsType};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use crate::error::TemplateError;
use crate::print::print_node;

/// The five template kinds. Each kind wraps template text differently before
/// parsing and extracts a different subtree afterwards, so the kind is part
/// of every cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Type,
    Expression,
    Statement,
    Attribute,
    SourceFile,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateKind::Type => "type",
            TemplateKind::Expression => "expression",
            TemplateKind::Statement => "statement",
            TemplateKind::Attribute => "attribute",
            TemplateKind::SourceFile => "source file",
        };
        f.write_str(name)
    }
}

/// A generated (or cached) tree, one variant per template kind.
///
/// Values handed out by [`Generator::generate`](crate::Generator::generate)
/// are always synthetic: every span has been scrubbed, so
/// [`source_range`](SyntaxNode::source_range) fails on them.
#[derive(Debug, Clone)]
pub enum SyntaxNode {
    Type(TsType),
    Expression(Expr),
    Statement(Stmt),
    Attribute(JSXAttr),
    SourceFile(Module),
}

impl SyntaxNode {
    pub fn kind(&self) -> TemplateKind {
        match self {
            SyntaxNode::Type(_) => TemplateKind::Type,
            SyntaxNode::Expression(_) => TemplateKind::Expression,
            SyntaxNode::Statement(_) => TemplateKind::Statement,
            SyntaxNode::Attribute(_) => TemplateKind::Attribute,
            SyntaxNode::SourceFile(_) => TemplateKind::SourceFile,
        }
    }

    /// Renders the node back to TypeScript source.
    pub fn to_source(&self) -> String {
        print_node(self)
    }

    /// Byte range of this node in the source it was parsed from.
    ///
    /// Synthetic nodes have no such source, and every node returned by a
    /// generator is synthetic; asking is an error rather than a zeroed range
    /// that could be mistaken for a real one.
    pub fn source_range(&self) -> Result<Range<u32>, TemplateError> {
        let span = match self {
            SyntaxNode::Type(n) => n.span(),
            SyntaxNode::Expression(n) => n.span(),
            SyntaxNode::Statement(n) => n.span(),
            SyntaxNode::Attribute(n) => n.span(),
            SyntaxNode::SourceFile(n) => n.span(),
        };
        if span.is_dummy() {
            return Err(TemplateError::PositionAccess);
        }
        Ok(span.lo.0..span.hi.0)
    }

    pub fn into_type(self) -> Option<TsType> {
        match self {
            SyntaxNode::Type(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_expression(self) -> Option<Expr> {
        match self {
            SyntaxNode::Expression(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_statement(self) -> Option<Stmt> {
        match self {
            SyntaxNode::Statement(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_attribute(self) -> Option<JSXAttr> {
        match self {
            SyntaxNode::Attribute(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_source_file(self) -> Option<Module> {
        match self {
            SyntaxNode::SourceFile(n) => Some(n),
            _ => None,
        }
    }

    /// Runs a `VisitMut` pass over whichever variant is held.
    pub(crate) fn visit_mut_with<V: VisitMut>(&mut self, visitor: &mut V) {
        match self {
            SyntaxNode::Type(n) => n.visit_mut_with(visitor),
            SyntaxNode::Expression(n) => n.visit_mut_with(visitor),
            SyntaxNode::Statement(n) => n.visit_mut_with(visitor),
            SyntaxNode::Attribute(n) => n.visit_mut_with(visitor),
            SyntaxNode::SourceFile(n) => n.visit_mut_with(visitor),
        }
    }
}

impl From<TsType> for SyntaxNode {
    fn from(n: TsType) -> Self {
        SyntaxNode::Type(n)
    }
}

impl From<Expr> for SyntaxNode {
    fn from(n: Expr) -> Self {
        SyntaxNode::Expression(n)
    }
}

impl From<Stmt> for SyntaxNode {
    fn from(n: Stmt) -> Self {
        SyntaxNode::Statement(n)
    }
}

impl From<JSXAttr> for SyntaxNode {
    fn from(n: JSXAttr) -> Self {
        SyntaxNode::Attribute(n)
    }
}

impl From<Module> for SyntaxNode {
    fn from(n: Module) -> Self {
        SyntaxNode::SourceFile(n)
    }
}

/// A value bound to a placeholder name at generation time.
///
/// Attribute and source-file nodes cannot stand in for an identifier
/// occurrence, so only these three shapes are bindable.
#[derive(Debug, Clone)]
pub enum Binding {
    Expression(Expr),
    Type(TsType),
    Statement(Stmt),
}

impl From<Expr> for Binding {
    fn from(n: Expr) -> Self {
        Binding::Expression(n)
    }
}

impl From<TsType> for Binding {
    fn from(n: TsType) -> Self {
        Binding::Type(n)
    }
}

impl From<Stmt> for Binding {
    fn from(n: Stmt) -> Self {
        Binding::Statement(n)
    }
}

impl TryFrom<SyntaxNode> for Binding {
    type Error = TemplateError;

    fn try_from(node: SyntaxNode) -> Result<Self, Self::Error> {
        match node {
            SyntaxNode::Expression(n) => Ok(Binding::Expression(n)),
            SyntaxNode::Type(n) => Ok(Binding::Type(n)),
            SyntaxNode::Statement(n) => Ok(Binding::Statement(n)),
            other => Err(TemplateError::Assembly(format!(
                "{} nodes cannot be bound to a placeholder name",
                other.kind()
            ))),
        }
    }
}

/// Placeholder name → bound node, supplied by the caller per generation call.
/// Unknown names are inert; names absent from the template are ignored.
pub type Bindings = rustc_hash::FxHashMap<String, Binding>;
