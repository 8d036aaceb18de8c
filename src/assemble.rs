//! Assembling template source text from fragments and placeholder values.
//!
//! A template arrives as `n` literal fragments with `n - 1` placeholders
//! interleaved between them. Each placeholder is spliced according to its
//! kind: text verbatim, nodes through the printer, and sub-generators as a
//! synthetic identifier that is resolved lazily at generation time.

use rustc_hash::FxHashMap;

use crate::error::TemplateError;
use crate::generate::Generator;
use crate::node::SyntaxNode;
use crate::print::print_node;

/// Prefix shared by every identifier the crate synthesizes. Fragments and
/// text placeholders must not contain it.
pub const RESERVED_PREFIX: &str = "__TS_SPLICE";

const LAZY_PREFIX: &str = "__TS_SPLICE_LAZY_";

/// A value filling one hole between two template fragments.
pub enum Placeholder {
    /// Spliced verbatim. No escaping is applied; the caller is responsible
    /// for supplying syntactically valid text.
    Text(String),
    /// Spliced as source text via the printer, so the tree is rebuilt from
    /// syntax rather than grafted in by reference.
    Node(SyntaxNode),
    /// Deferred: a synthetic identifier stands in for the generator's
    /// output until generation time.
    Lazy(Generator),
}

impl From<&str> for Placeholder {
    fn from(text: &str) -> Self {
        Placeholder::Text(text.to_string())
    }
}

impl From<String> for Placeholder {
    fn from(text: String) -> Self {
        Placeholder::Text(text)
    }
}

impl From<SyntaxNode> for Placeholder {
    fn from(node: SyntaxNode) -> Self {
        Placeholder::Node(node)
    }
}

impl From<Generator> for Placeholder {
    fn from(generator: Generator) -> Self {
        Placeholder::Lazy(generator)
    }
}

/// Builds the final source string plus the map of lazily-resolved
/// sub-generators keyed by the synthetic identifiers spliced into it.
pub(crate) fn assemble(
    fragments: &[&str],
    placeholders: Vec<Placeholder>,
) -> Result<(String, FxHashMap<String, Generator>), TemplateError> {
    let Some((first, rest)) = fragments.split_first() else {
        return Err(TemplateError::Assembly(
            "a template needs at least one text fragment".to_string(),
        ));
    };
    if placeholders.len() != rest.len() {
        return Err(TemplateError::Assembly(format!(
            "{} fragments take {} interleaved placeholders, got {}",
            fragments.len(),
            rest.len(),
            placeholders.len()
        )));
    }

    reject_reserved(first)?;
    let mut source = String::from(*first);
    let mut lazy = FxHashMap::default();

    for (ordinal, (value, fragment)) in placeholders.into_iter().zip(rest).enumerate() {
        match value {
            Placeholder::Text(text) => {
                reject_reserved(&text)?;
                source.push_str(&text);
            }
            Placeholder::Node(node) => source.push_str(&print_node(&node)),
            Placeholder::Lazy(generator) => {
                let key = format!("{LAZY_PREFIX}{ordinal}__");
                source.push_str(&key);
                lazy.insert(key, generator);
            }
        }
        reject_reserved(fragment)?;
        source.push_str(fragment);
    }

    Ok((source, lazy))
}

fn reject_reserved(text: &str) -> Result<(), TemplateError> {
    if text.contains(RESERVED_PREFIX) {
        return Err(TemplateError::Assembly(format!(
            "`{RESERVED_PREFIX}` identifiers are reserved for internal use"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TemplateBuilder;
    use crate::node::TemplateKind;
    use crate::parse::parse_template;

    #[test]
    fn single_fragment_passes_through() {
        let (source, lazy) = assemble(&["1 + 2"], vec![]).unwrap();
        assert_eq!(source, "1 + 2");
        assert!(lazy.is_empty());
    }

    #[test]
    fn text_placeholders_splice_verbatim() {
        let (source, _) = assemble(
            &["{ a: ", ", b: ", " }"],
            vec![Placeholder::from("A"), Placeholder::from("B")],
        )
        .unwrap();
        assert_eq!(source, "{ a: A, b: B }");
    }

    #[test]
    fn node_placeholders_splice_as_printed_syntax() {
        let node = parse_template(TemplateKind::Expression, "200 * 300").unwrap();
        let (source, _) = assemble(&["100 + ", ""], vec![Placeholder::Node(node)]).unwrap();
        assert_eq!(source, "100 + 200 * 300");
    }

    #[test]
    fn lazy_placeholders_become_synthetic_identifiers() {
        let builder = TemplateBuilder::new();
        let inner = builder.expression("1 + 2").unwrap();
        let (source, lazy) = assemble(&["f(", ")"], vec![Placeholder::Lazy(inner)]).unwrap();
        assert_eq!(source, "f(__TS_SPLICE_LAZY_0__)");
        assert_eq!(lazy.len(), 1);
        assert!(lazy.contains_key("__TS_SPLICE_LAZY_0__"));
    }

    #[test]
    fn placeholder_count_must_match() {
        let err = assemble(&["a", "b"], vec![]).unwrap_err();
        assert!(matches!(err, TemplateError::Assembly(_)));
    }

    #[test]
    fn no_fragments_is_an_error() {
        assert!(assemble(&[], vec![]).is_err());
    }

    #[test]
    fn reserved_identifiers_are_rejected() {
        let err = assemble(&["__TS_SPLICE_HIDDEN__ + 1"], vec![]).unwrap_err();
        assert!(matches!(err, TemplateError::Assembly(_)));
    }
}
