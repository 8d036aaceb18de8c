//! Compile TypeScript source templates into reusable AST generators.
//!
//! A template is ordinary TypeScript text with holes. Holes are filled
//! through two channels:
//!
//! - **Assembly time** — the `_parts` builders take interleaved text
//!   fragments and [`Placeholder`] values (literal text, a printed node, or
//!   a nested generator) that are spliced into the source before parsing.
//! - **Generation time** — any identifier in the parsed template can be
//!   rebound by name via a [`Bindings`] map when the generator is invoked.
//!
//! Assembly-time splices always win: they are resolved before the tree
//! exists, so generation-time binding only ever sees names still present in
//! the parsed source.
//!
//! Parsed templates are held in an LRU [`SourceCache`] keyed by kind and
//! assembled text, so reusing a template never re-runs the parser. Every
//! generated tree is an independent synthetic copy: it shares nothing with
//! the cache or with other calls, and asking it for a source range fails
//! with [`TemplateError::PositionAccess`].
//!
//! Identifiers starting with `__TS_SPLICE` are reserved for the synthetic
//! wrappers and lazy-placeholder keys; don't use them in templates or as
//! binding names.
//!
//! ```
//! use ts_splice::{Binding, Bindings, TemplateBuilder};
//!
//! # fn main() -> Result<(), ts_splice::TemplateError> {
//! let builder = TemplateBuilder::new();
//!
//! let product = builder.expression("200 * 300")?.generate_default()?;
//!
//! let sum = builder.expression("100 + TOTAL")?;
//! let mut bindings = Bindings::default();
//! bindings.insert("TOTAL".to_string(), Binding::try_from(product)?);
//!
//! assert_eq!(sum.generate(&bindings)?.to_source(), "100 + 200 * 300");
//! # Ok(())
//! # }
//! ```

mod assemble;
mod builder;
mod cache;
mod error;
mod generate;
mod node;
mod parse;
mod print;
mod subst;
mod synth;

pub use assemble::{Placeholder, RESERVED_PREFIX};
pub use builder::TemplateBuilder;
pub use cache::{CacheStats, DEFAULT_CAPACITY, SourceCache};
pub use error::TemplateError;
pub use generate::Generator;
pub use node::{Binding, Bindings, SyntaxNode, TemplateKind};
pub use parse::RESERVED_IDENT;
pub use print::print_node;
