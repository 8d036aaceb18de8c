//! Printing generated trees back to TypeScript source.

use swc_core::ecma::codegen::to_code;

use crate::node::SyntaxNode;

/// Renders a node to TypeScript source text.
///
/// Used both as the public stringifier and internally to splice node-valued
/// placeholders into template text as syntax.
pub fn print_node(node: &SyntaxNode) -> String {
    let code = match node {
        SyntaxNode::Type(n) => to_code(n),
        SyntaxNode::Expression(n) => to_code(n),
        SyntaxNode::Statement(n) => to_code(n),
        SyntaxNode::Attribute(n) => to_code(n),
        SyntaxNode::SourceFile(n) => to_code(n),
    };
    code.trim_end().to_string()
}
