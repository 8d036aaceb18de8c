//! Identifier rebinding over a detached template tree.
//!
//! The template is walked depth-first; every occurrence of a bound name is
//! rewritten, every unbound name is left alone. TypeScript collapses most of
//! these occurrences into one `Identifier` node kind, but SWC splits them —
//! expression idents, member props, property names, binding patterns, and
//! type-reference heads are distinct kinds — so each position gets its own
//! hook and all of them consult the same binding map. One binding therefore
//! rebinds every occurrence of the name consistently.

use swc_core::ecma::ast::{
    Expr, Ident, IdentName, MemberProp, Pat, PropName, Stmt, TsEntityName, TsType,
};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};

use crate::node::{Binding, Bindings, SyntaxNode};

/// Rewrites `node` in place, replacing bound identifier occurrences.
///
/// `node` must already be detached; substitution never runs against a cached
/// tree directly.
pub(crate) fn substitute(node: &mut SyntaxNode, bindings: &Bindings) {
    if bindings.is_empty() {
        return;
    }
    node.visit_mut_with(&mut Substitutor { bindings });
}

struct Substitutor<'a> {
    bindings: &'a Bindings,
}

impl Substitutor<'_> {
    fn bound_ident(&self, name: &str) -> Option<&Ident> {
        match self.bindings.get(name) {
            Some(Binding::Expression(Expr::Ident(id))) => Some(id),
            _ => None,
        }
    }
}

impl VisitMut for Substitutor<'_> {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if let Expr::Ident(ident) = expr
            && let Some(Binding::Expression(bound)) = self.bindings.get(ident.sym.as_ref())
        {
            // The bound value is spliced in as-is; placeholder names inside
            // a caller-supplied node are the caller's own business.
            *expr = bound.clone();
            return;
        }
        expr.visit_mut_children_with(self);
    }

    fn visit_mut_stmt(&mut self, stmt: &mut Stmt) {
        // A bare bound identifier in statement position splices a whole
        // statement. Lazy sub-generators of statement kind land here.
        if let Stmt::Expr(expr_stmt) = stmt
            && let Expr::Ident(ident) = &*expr_stmt.expr
            && let Some(Binding::Statement(bound)) = self.bindings.get(ident.sym.as_ref())
        {
            *stmt = bound.clone();
            return;
        }
        stmt.visit_mut_children_with(self);
    }

    fn visit_mut_ts_type(&mut self, ty: &mut TsType) {
        if let TsType::TsTypeRef(type_ref) = ty
            && let TsEntityName::Ident(head) = &type_ref.type_name
            && let Some(binding) = self.bindings.get(head.sym.as_ref())
        {
            match binding {
                // A bound type name (plain or qualified, no arguments of its
                // own) rewrites just the head, so the template's own type
                // arguments survive and are substituted recursively.
                Binding::Type(TsType::TsTypeRef(bound)) if bound.type_params.is_none() => {
                    type_ref.type_name = bound.type_name.clone();
                    type_ref.type_params.visit_mut_with(self);
                    return;
                }
                Binding::Expression(Expr::Ident(id)) => {
                    type_ref.type_name = TsEntityName::Ident(id.clone());
                    type_ref.type_params.visit_mut_with(self);
                    return;
                }
                // Any other bound type replaces the reference wholesale.
                Binding::Type(bound) => {
                    *ty = bound.clone();
                    return;
                }
                _ => {}
            }
        }
        ty.visit_mut_children_with(self);
    }

    fn visit_mut_member_prop(&mut self, prop: &mut MemberProp) {
        if let MemberProp::Ident(ident) = prop
            && let Some(bound) = self.bound_ident(ident.sym.as_ref())
        {
            *ident = IdentName::from(bound.clone());
            return;
        }
        prop.visit_mut_children_with(self);
    }

    fn visit_mut_prop_name(&mut self, prop: &mut PropName) {
        if let PropName::Ident(ident) = prop
            && let Some(bound) = self.bound_ident(ident.sym.as_ref())
        {
            *ident = IdentName::from(bound.clone());
            return;
        }
        prop.visit_mut_children_with(self);
    }

    fn visit_mut_pat(&mut self, pat: &mut Pat) {
        if let Pat::Ident(binding_ident) = pat
            && let Some(bound) = self.bound_ident(binding_ident.id.sym.as_ref())
        {
            binding_ident.id = bound.clone();
            binding_ident.type_ann.visit_mut_with(self);
            return;
        }
        pat.visit_mut_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use swc_core::common::{DUMMY_SP, SyntaxContext};
    use swc_core::ecma::ast::Ident;

    use super::*;
    use crate::node::TemplateKind;
    use crate::parse::parse_template;

    fn expr(source: &str) -> Expr {
        parse_template(TemplateKind::Expression, source)
            .unwrap()
            .into_expression()
            .unwrap()
    }

    fn ty(source: &str) -> TsType {
        parse_template(TemplateKind::Type, source)
            .unwrap()
            .into_type()
            .unwrap()
    }

    fn stmt(source: &str) -> Stmt {
        parse_template(TemplateKind::Statement, source)
            .unwrap()
            .into_statement()
            .unwrap()
    }

    fn ident_expr(name: &str) -> Expr {
        Expr::Ident(Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty()))
    }

    fn bindings(entries: Vec<(&str, Binding)>) -> Bindings {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn run(kind: TemplateKind, source: &str, bindings: &Bindings) -> String {
        let mut node = parse_template(kind, source).unwrap();
        substitute(&mut node, bindings);
        node.to_source()
    }

    #[test]
    fn replaces_expression_identifier() {
        let b = bindings(vec![("X", Binding::Expression(expr("200 * 300")))]);
        assert_eq!(run(TemplateKind::Expression, "100 + X", &b), "100 + 200 * 300");
    }

    #[test]
    fn replaces_every_occurrence_with_the_same_value() {
        let b = bindings(vec![("X", Binding::Expression(expr("f()")))]);
        assert_eq!(run(TemplateKind::Expression, "X + X", &b), "f() + f()");
    }

    #[test]
    fn unbound_names_are_inert() {
        let b = bindings(vec![("OTHER", Binding::Expression(expr("1")))]);
        assert_eq!(run(TemplateKind::Expression, "100 + X", &b), "100 + X");
    }

    #[test]
    fn renames_member_props() {
        let b = bindings(vec![("NAME", Binding::Expression(ident_expr("prop")))]);
        assert_eq!(run(TemplateKind::Expression, "obj.NAME", &b), "obj.prop");
    }

    #[test]
    fn renames_property_names() {
        let b = bindings(vec![("NAME", Binding::Expression(ident_expr("a")))]);
        let out = run(TemplateKind::Expression, "{ NAME: 1 }", &b);
        assert!(out.contains("a: 1"), "got: {out}");
    }

    #[test]
    fn renames_binding_patterns() {
        let b = bindings(vec![("NAME", Binding::Expression(ident_expr("total")))]);
        let out = run(TemplateKind::Statement, "const NAME = 1;", &b);
        assert!(out.contains("const total = 1"), "got: {out}");
    }

    #[test]
    fn rewrites_type_reference_head_keeping_arguments() {
        let b = bindings(vec![
            ("LIST", Binding::Type(ty("Array"))),
            ("ITEM", Binding::Type(ty("string"))),
        ]);
        assert_eq!(run(TemplateKind::Type, "LIST<ITEM>", &b), "Array<string>");
    }

    #[test]
    fn rewrites_type_reference_head_to_qualified_name() {
        let b = bindings(vec![("HEAD", Binding::Type(ty("ns.Thing")))]);
        assert_eq!(run(TemplateKind::Type, "HEAD<number>", &b), "ns.Thing<number>");
    }

    #[test]
    fn replaces_whole_type_reference_with_non_name_type() {
        let b = bindings(vec![("T", Binding::Type(ty("string | number")))]);
        assert_eq!(run(TemplateKind::Type, "T[]", &b), "(string | number)[]");
    }

    #[test]
    fn splices_statement_bindings() {
        let b = bindings(vec![("HOLE", Binding::Statement(stmt("const x = 1;")))]);
        let out = run(TemplateKind::Statement, "HOLE", &b);
        assert!(out.contains("const x = 1"), "got: {out}");
    }
}
