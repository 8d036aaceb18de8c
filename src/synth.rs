//! Detaching trees from the cache.
//!
//! SWC trees are plain owned values, so a clone already shares no storage
//! with the cached original. What a clone does inherit is the original's
//! spans, which point into the assembled template source; a detached tree
//! scrubs them all so the output is unmistakably synthetic.

use swc_core::common::{DUMMY_SP, Span};
use swc_core::ecma::visit::VisitMut;

use crate::node::SyntaxNode;

struct ScrubSpans;

impl VisitMut for ScrubSpans {
    fn visit_mut_span(&mut self, span: &mut Span) {
        *span = DUMMY_SP;
    }
}

/// Clones a cached tree into an independent, position-less copy.
///
/// Every child is carried over positionally; the walk rewrites spans only,
/// so no part of the structure can be dropped. Asking the result for a
/// source range fails with `PositionAccess`.
pub(crate) fn detach(node: &SyntaxNode) -> SyntaxNode {
    let mut out = node.clone();
    out.visit_mut_with(&mut ScrubSpans);
    out
}
