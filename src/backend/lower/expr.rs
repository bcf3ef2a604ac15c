//! Expression dispatch.

use calcgen_core::lang::members::MemberId;
use calcgen_core::lang::operators::BinaryOperator;
use calcgen_core::lang::types::ValueType;
use calcgen_syntax::{Expr, Literal, Member};

use super::Lowerer;
use crate::backend::errors::{GenerationError, GenerationResult};
use crate::backend::target::MemberMapping;

impl Lowerer<'_> {
    /// Lower one expression to its token sequence.
    ///
    /// ## Errors
    /// - [`GenerationError::UnmappedOperation`] for a member the adapter does not map.
    /// - [`GenerationError::UnsupportedConstructorInference`] for a value-of argument the policy cannot classify.
    /// - [`GenerationError::UnsupportedNodeKind`] for a node in a position lowering has no rule for.
    pub fn expr(&self, expr: &Expr) -> GenerationResult<Vec<String>> {
        match expr {
            Expr::Name(name) => Ok(self.name(name)),
            Expr::Literal(lit) => Ok(vec![self.literal(lit)]),
            Expr::Attribute(receiver, member) => self.attribute(expr, receiver, member),
            Expr::Call(callee, args) => self.call(expr, callee, args),
            Expr::Binary(left, op, right) => self.binary(left, *op, right),
            Expr::List(items, element) => self.list(items, *element),
        }
    }

    pub(super) fn name(&self, name: &str) -> Vec<String> {
        if self.fields.contains(name) {
            let syntax = self.adapter.syntax();
            vec![syntax.receiver.to_string(), syntax.accessor.to_string(), name.to_string()]
        } else {
            vec![name.to_string()]
        }
    }

    fn literal(&self, lit: &Literal) -> String {
        match lit {
            Literal::Integer(text) | Literal::Decimal(text) => text.clone(),
            Literal::Str(text) => quote(text),
            Literal::Bool(value) => {
                let (t, f) = self.adapter.syntax().bool_literals;
                if *value { t.to_string() } else { f.to_string() }
            }
        }
    }

    /// Resolve a member through the adapter table.
    pub(super) fn resolve(&self, member: &Member, node: &Expr) -> GenerationResult<(MemberId, MemberMapping)> {
        let Member::Known(id) = member else {
            return Err(self.unmapped(member.spelling(), node));
        };
        match self.adapter.map_member(*id) {
            Some(mapping) => Ok((*id, mapping)),
            None => Err(self.unmapped(member.spelling(), node)),
        }
    }

    pub(super) fn class_scoped(&self, member: &str) -> Vec<String> {
        vec![
            self.adapter.class_scope().to_string(),
            self.adapter.syntax().accessor.to_string(),
            member.to_string(),
        ]
    }

    fn attribute(&self, node: &Expr, receiver: &Expr, member: &Member) -> GenerationResult<Vec<String>> {
        let (_, mapping) = self.resolve(member, node)?;
        match mapping {
            MemberMapping::ClassConstant(token) => Ok(self.class_scoped(token)),
            MemberMapping::Instance(token) => {
                let mut tokens = self.expr(receiver)?;
                tokens.push(self.adapter.syntax().accessor.to_string());
                tokens.push(token.to_string());
                Ok(tokens)
            }
            MemberMapping::Constructor => Err(GenerationError::UnsupportedNodeKind {
                kind: "Attribute",
                context: "naming the value-of factory without calling it",
                node: node.to_string(),
            }),
            // Mode constants only exist as arguments of rounding calls in the target.
            MemberMapping::RoundingMode(_) => Err(self.unmapped(member.spelling(), node)),
        }
    }

    fn binary(&self, left: &Expr, op: BinaryOperator, right: &Expr) -> GenerationResult<Vec<String>> {
        let mut tokens = self.operand(left, op, false)?;
        tokens.push(format!(" {} ", self.adapter.binary_operator(op)));
        tokens.extend(self.operand(right, op, true)?);
        Ok(tokens)
    }

    fn operand(&self, operand: &Expr, parent: BinaryOperator, is_right: bool) -> GenerationResult<Vec<String>> {
        let tokens = self.expr(operand)?;
        let precedence = |op: BinaryOperator| self.adapter.operator_precedence(op);
        let needs_parens = match operand {
            Expr::Binary(_, op, _) if is_right => precedence(*op) <= precedence(parent),
            Expr::Binary(_, op, _) => precedence(*op) < precedence(parent),
            _ => false,
        };
        if !needs_parens {
            return Ok(tokens);
        }
        let mut wrapped = Vec::with_capacity(tokens.len() + 2);
        wrapped.push("(".to_string());
        wrapped.extend(tokens);
        wrapped.push(")".to_string());
        Ok(wrapped)
    }

    fn list(&self, items: &[Expr], element: ValueType) -> GenerationResult<Vec<String>> {
        let syntax = self.adapter.syntax();
        let mut tokens = vec![self.adapter.list_prefix(element), syntax.list_parens.0.to_string()];
        tokens.extend(self.joined(items)?);
        tokens.push(syntax.list_parens.1.to_string());
        Ok(tokens)
    }

    /// Lower `items` left to right, separated by the argument delimiter.
    pub(super) fn joined(&self, items: &[Expr]) -> GenerationResult<Vec<String>> {
        let mut tokens = Vec::new();
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                tokens.push(self.adapter.syntax().arg_delim.to_string());
            }
            tokens.extend(self.expr(item)?);
        }
        Ok(tokens)
    }
}

/// Double-quoted string literal.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
