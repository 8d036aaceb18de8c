//! Kind-specific wrapping, parsing, and subtree extraction.
//!
//! Template text cannot always be parsed in isolation: a bare type or
//! expression is not a valid compilation unit. Each [`TemplateKind`] wraps
//! the text in a minimal host construct, parses the result as a module, and
//! unwraps the target subtree again. The wrapper uses a reserved identifier,
//! [`RESERVED_IDENT`], which callers must not use as a placeholder or
//! binding name.

use swc_core::common::{FileName, SourceMap, sync::Lrc};
use swc_core::ecma::ast::{
    Decl, EsVersion, Expr, JSXAttrOrSpread, Module, ModuleItem, Stmt,
};
use swc_core::ecma::parser::{Parser, StringInput, Syntax, TsSyntax, lexer::Lexer};
use tracing::debug;

use crate::error::TemplateError;
use crate::node::{SyntaxNode, TemplateKind};

/// Reserved identifier used for the synthetic wrapper constructs.
pub const RESERVED_IDENT: &str = "__TS_SPLICE_HIDDEN__";

/// Parses assembled template text under the given kind and extracts the
/// target subtree. Any failure is fatal for this text; nothing is retried.
pub(crate) fn parse_template(
    kind: TemplateKind,
    source: &str,
) -> Result<SyntaxNode, TemplateError> {
    let wrapped = wrap(kind, source);
    debug!(%kind, len = wrapped.len(), "parsing template source");
    let module = parse_module(kind, &wrapped)?;
    extract(kind, module)
}

fn wrap(kind: TemplateKind, source: &str) -> String {
    match kind {
        TemplateKind::Type => format!("type {RESERVED_IDENT} = {source};"),
        TemplateKind::Expression => format!("{RESERVED_IDENT} = {source};"),
        TemplateKind::Statement | TemplateKind::SourceFile => source.to_string(),
        TemplateKind::Attribute => format!("<{RESERVED_IDENT} {source} />;"),
    }
}

fn syntax_for(kind: TemplateKind) -> Syntax {
    // TSX changes how `<` is parsed, so it is enabled only where the wrapper
    // itself is a JSX element.
    match kind {
        TemplateKind::Attribute => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        _ => Syntax::Typescript(TsSyntax::default()),
    }
}

fn parse_module(kind: TemplateKind, wrapped: &str) -> Result<Module, TemplateError> {
    let cm: Lrc<SourceMap> = Lrc::new(SourceMap::default());
    let fm = cm.new_source_file(FileName::Anon.into(), wrapped.to_string());

    let lexer = Lexer::new(
        syntax_for(kind),
        EsVersion::latest(),
        StringInput::from(&*fm),
        None,
    );
    let mut parser = Parser::new_from(lexer);

    let parse_error = |err: swc_core::ecma::parser::error::Error| TemplateError::Parse {
        kind,
        message: format!("{err:?}"),
        source_text: wrapped.to_string(),
    };

    let module = parser.parse_module().map_err(&parse_error)?;

    // The parser recovers from some syntax errors and hands back a repaired
    // tree. A repaired template is still a malformed template; reject it so
    // the cache never holds a tree the caller did not write.
    if let Some(err) = parser.take_errors().into_iter().next() {
        return Err(parse_error(err));
    }

    Ok(module)
}

fn extract(kind: TemplateKind, module: Module) -> Result<SyntaxNode, TemplateError> {
    if kind == TemplateKind::SourceFile {
        return Ok(SyntaxNode::SourceFile(module));
    }

    let first = module.body.into_iter().next();
    match kind {
        TemplateKind::Type => match first {
            Some(ModuleItem::Stmt(Stmt::Decl(Decl::TsTypeAlias(alias)))) => {
                Ok(SyntaxNode::Type(*alias.type_ann))
            }
            _ => Err(TemplateError::Extraction {
                kind,
                expected: "a type alias declaration",
            }),
        },
        TemplateKind::Expression => match first {
            Some(ModuleItem::Stmt(Stmt::Expr(stmt))) => match *stmt.expr {
                Expr::Assign(assign) => Ok(SyntaxNode::Expression(*assign.right)),
                _ => Err(TemplateError::Extraction {
                    kind,
                    expected: "the synthetic assignment wrapper",
                }),
            },
            _ => Err(TemplateError::Extraction {
                kind,
                expected: "an expression statement",
            }),
        },
        TemplateKind::Statement => match first {
            Some(ModuleItem::Stmt(stmt)) => Ok(SyntaxNode::Statement(stmt)),
            // Imports and exports are module declarations in SWC, not
            // statements; a source-file template covers those.
            _ => Err(TemplateError::Extraction {
                kind,
                expected: "a top-level statement",
            }),
        },
        TemplateKind::Attribute => match first {
            Some(ModuleItem::Stmt(Stmt::Expr(stmt))) => match *stmt.expr {
                Expr::JSXElement(element) => {
                    match element.opening.attrs.into_iter().next() {
                        Some(JSXAttrOrSpread::JSXAttr(attr)) => {
                            Ok(SyntaxNode::Attribute(attr))
                        }
                        _ => Err(TemplateError::Extraction {
                            kind,
                            expected: "at least one attribute",
                        }),
                    }
                }
                _ => Err(TemplateError::Extraction {
                    kind,
                    expected: "the synthetic element wrapper",
                }),
            },
            _ => Err(TemplateError::Extraction {
                kind,
                expected: "an expression statement",
            }),
        },
        TemplateKind::SourceFile => unreachable!("handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_template_unwraps_alias() {
        let node = parse_template(TemplateKind::Type, "{ a: 1 }").unwrap();
        assert!(matches!(node, SyntaxNode::Type(_)));
        assert!(node.to_source().contains("a: 1"));
    }

    #[test]
    fn expression_template_unwraps_assignment() {
        let node = parse_template(TemplateKind::Expression, "60 * 1000").unwrap();
        assert!(matches!(node, SyntaxNode::Expression(_)));
        assert_eq!(node.to_source(), "60 * 1000");
    }

    #[test]
    fn statement_template_takes_first_statement() {
        let node = parse_template(TemplateKind::Statement, "type a = 100;").unwrap();
        assert!(matches!(node, SyntaxNode::Statement(Stmt::Decl(_))));
    }

    #[test]
    fn attribute_template_takes_first_attribute() {
        let node = parse_template(TemplateKind::Attribute, "data-x={100}").unwrap();
        assert!(matches!(node, SyntaxNode::Attribute(_)));
    }

    #[test]
    fn source_file_template_keeps_whole_module() {
        let node =
            parse_template(TemplateKind::SourceFile, "import x from \"y\";\nconst a = x;")
                .unwrap();
        assert!(matches!(node, SyntaxNode::SourceFile(_)));
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = parse_template(TemplateKind::Expression, "((").unwrap_err();
        assert!(matches!(err, TemplateError::Parse { .. }));
    }

    #[test]
    fn import_is_not_a_statement() {
        let err = parse_template(TemplateKind::Statement, "import x from \"y\";").unwrap_err();
        assert!(matches!(err, TemplateError::Extraction { .. }));
    }

    #[test]
    fn parsed_template_keeps_real_positions() {
        // Only generator output is synthetic; the cached tree itself still
        // points into the assembled source.
        let node = parse_template(TemplateKind::Expression, "1 + 2").unwrap();
        assert!(node.source_range().is_ok());
    }
}
