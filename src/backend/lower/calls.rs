//! Call lowering and call-shape rewrites.
//!
//! Two source calls do not translate argument-for-argument:
//!
//! - `x.setScale(scale, MODE)`: the target picks a rounding callee from the mode and the mode argument is dropped.
//! - `x.divide(d, scale[, MODE])`: becomes the target's scaled divide with exactly `(d, scale)`. A mode argument is
//!   discarded with a warning, so the generated division does not honor it.
//!
//! The value-of factory is written once in the source but needs an integer or a floating-point constructor in
//! stricter targets; [`ConstructorPolicy`] decides per call site.

use calcgen_core::NumericTy;
use calcgen_core::lang::members::{self, MemberId, MemberKind, RoundingMode};
use calcgen_syntax::{Expr, Literal, Member};

use super::Lowerer;
use crate::backend::errors::{GenerationError, GenerationResult};
use crate::backend::target::MemberMapping;

/// Rule choosing the numeric constructor for a value-of argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorPolicy {
    /// Integer literals are integers and non-integer literals are floats. Names and calls are taken to hold
    /// whole-unit amounts and get the integer constructor. Arithmetic follows its left operand.
    ///
    /// This holds for statutory payroll-tax procedures, where decimals are only materialized from whole amounts
    /// (cents, euros, counts). Outside that domain it can misclassify, so anything it cannot see is rejected.
    WholeUnitAmounts,
}

impl ConstructorPolicy {
    /// Classify the sole argument of a value-of call.
    ///
    /// ## Returns
    /// - The numeric category, or a short description of the argument shape that could not be classified.
    pub fn infer(self, arg: &Expr) -> Result<NumericTy, String> {
        match self {
            ConstructorPolicy::WholeUnitAmounts => whole_unit_amounts(arg),
        }
    }
}

fn whole_unit_amounts(arg: &Expr) -> Result<NumericTy, String> {
    match arg {
        Expr::Literal(Literal::Integer(_)) => Ok(NumericTy::Int),
        Expr::Literal(Literal::Decimal(_)) => Ok(NumericTy::Float),
        Expr::Name(_) | Expr::Call(..) => Ok(NumericTy::Int),
        Expr::Binary(left, _, _) => whole_unit_amounts(left),
        Expr::Literal(Literal::Str(_)) => Err("a string literal".to_string()),
        Expr::Literal(Literal::Bool(_)) => Err("a boolean literal".to_string()),
        Expr::Attribute(..) => Err("an attribute".to_string()),
        Expr::List(..) => Err("a list literal".to_string()),
    }
}

impl Lowerer<'_> {
    pub(super) fn call(&self, node: &Expr, callee: &Expr, args: &[Expr]) -> GenerationResult<Vec<String>> {
        let (receiver, id, mapping) = match callee {
            Expr::Attribute(receiver, member) => {
                let (id, mapping) = self.resolve(member, node)?;
                (Some(&**receiver), id, mapping)
            }
            // A bare factory call (`valueOf(2)`) is the class-scoped factory without its qualifier.
            Expr::Name(name) => match members::from_str(name) {
                Some(id) if id.kind() == MemberKind::Factory => {
                    let (id, mapping) = self.resolve(&Member::Known(id), node)?;
                    (None, id, mapping)
                }
                Some(_) => {
                    return Err(GenerationError::UnsupportedNodeKind {
                        kind: "Name",
                        context: "calling a member without its receiver",
                        node: node.to_string(),
                    });
                }
                None => return Err(self.unmapped(name, node)),
            },
            other => {
                return Err(GenerationError::UnsupportedNodeKind {
                    kind: other.kind_name(),
                    context: "as call target",
                    node: node.to_string(),
                });
            }
        };

        match (mapping, receiver) {
            (MemberMapping::Constructor, _) => self.constructor_call(node, args),
            (MemberMapping::Instance(token), Some(receiver)) => match id {
                MemberId::SetScale => self.round_call(node, receiver, token, args),
                MemberId::Divide => self.divide_call(node, receiver, token, args),
                _ => self.member_call(receiver, token, args),
            },
            _ => Err(GenerationError::UnsupportedNodeKind {
                kind: "Attribute",
                context: "called as a function",
                node: node.to_string(),
            }),
        }
    }

    /// `receiver.callee(args...)`
    fn member_call(&self, receiver: &Expr, callee: &str, args: &[Expr]) -> GenerationResult<Vec<String>> {
        let mut tokens = self.expr(receiver)?;
        tokens.push(self.adapter.syntax().accessor.to_string());
        tokens.push(callee.to_string());
        tokens.extend(self.call_args(args)?);
        Ok(tokens)
    }

    fn call_args(&self, args: &[Expr]) -> GenerationResult<Vec<String>> {
        let (open, close) = self.adapter.syntax().call_parens;
        let mut tokens = vec![open.to_string()];
        tokens.extend(self.joined(args)?);
        tokens.push(close.to_string());
        Ok(tokens)
    }

    fn constructor_call(&self, node: &Expr, args: &[Expr]) -> GenerationResult<Vec<String>> {
        let [arg] = args else {
            let shape = match args.len() {
                0 => "no argument".to_string(),
                n => format!("{} arguments", n),
            };
            return Err(GenerationError::UnsupportedConstructorInference {
                shape,
                node: node.to_string(),
            });
        };
        let ty = self
            .adapter
            .constructor_policy()
            .infer(arg)
            .map_err(|shape| GenerationError::UnsupportedConstructorInference {
                shape,
                node: node.to_string(),
            })?;
        let mut tokens = self.class_scoped(self.adapter.constructor(ty));
        tokens.extend(self.call_args(args)?);
        Ok(tokens)
    }

    fn round_call(&self, node: &Expr, receiver: &Expr, callee: &str, args: &[Expr]) -> GenerationResult<Vec<String>> {
        match args {
            [_] => self.member_call(receiver, callee, args),
            [scale, mode] => {
                let mode = self.rounding_mode_arg(node, mode)?;
                let callee = self.adapter.round_callee(mode);
                self.member_call(receiver, callee, std::slice::from_ref(scale))
            }
            _ => Err(GenerationError::UnsupportedNodeKind {
                kind: "Call",
                context: "with an argument count setScale does not take",
                node: node.to_string(),
            }),
        }
    }

    fn divide_call(&self, node: &Expr, receiver: &Expr, callee: &str, args: &[Expr]) -> GenerationResult<Vec<String>> {
        let scaled = match args {
            [_] => return self.member_call(receiver, callee, args),
            [_, scale] if is_rounding_mode(scale) => {
                return Err(GenerationError::UnsupportedNodeKind {
                    kind: "Attribute",
                    context: "as divide rounding mode without a scale",
                    node: node.to_string(),
                });
            }
            [_, _] => &args[..2],
            [_, _, mode] if is_rounding_mode(mode) => {
                self.rounding_mode_arg(node, mode)?;
                tracing::warn!(
                    target_lang = %self.adapter.kind(),
                    mode = %mode,
                    node = %node,
                    "rounding mode dropped from divide; the generated division does not honor it"
                );
                &args[..2]
            }
            [_, _, mode] => {
                return Err(GenerationError::UnsupportedNodeKind {
                    kind: mode.kind_name(),
                    context: "as divide rounding mode",
                    node: node.to_string(),
                });
            }
            _ => {
                return Err(GenerationError::UnsupportedNodeKind {
                    kind: "Call",
                    context: "with an argument count divide does not take",
                    node: node.to_string(),
                });
            }
        };
        let Some(scaled_callee) = self.adapter.scaled_divide_callee() else {
            return Err(self.unmapped("divide", node));
        };
        self.member_call(receiver, scaled_callee, scaled)
    }

    /// The rounding mode named by `arg`, if the adapter accepts it.
    fn rounding_mode_arg(&self, node: &Expr, arg: &Expr) -> GenerationResult<RoundingMode> {
        let Expr::Attribute(_, member) = arg else {
            return Err(GenerationError::UnsupportedNodeKind {
                kind: arg.kind_name(),
                context: "as rounding mode",
                node: node.to_string(),
            });
        };
        match self.resolve(member, node)? {
            (_, MemberMapping::RoundingMode(mode)) => Ok(mode),
            _ => Err(GenerationError::UnsupportedNodeKind {
                kind: "Attribute",
                context: "as rounding mode",
                node: node.to_string(),
            }),
        }
    }
}

fn is_rounding_mode(arg: &Expr) -> bool {
    matches!(arg, Expr::Attribute(_, Member::Known(id)) if id.rounding_mode().is_some())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::target::GoAdapter;
    use calcgen_syntax::parser::parse_expr;

    fn lower(source: &str) -> GenerationResult<String> {
        let go = GoAdapter;
        let lowerer = Lowerer::new(&go, ["a", "b", "amount"]);
        lowerer.expr_text(&parse_expr(source).unwrap())
    }

    fn infer(source: &str) -> Result<NumericTy, String> {
        ConstructorPolicy::WholeUnitAmounts.infer(&parse_expr(source).unwrap())
    }

    #[test]
    fn test_policy_classification() {
        assert_eq!(infer("7"), Ok(NumericTy::Int));
        assert_eq!(infer("-7"), Ok(NumericTy::Int));
        assert_eq!(infer("7.5"), Ok(NumericTy::Float));
        assert_eq!(infer("2D"), Ok(NumericTy::Float));
        assert_eq!(infer("amount"), Ok(NumericTy::Int));
        assert_eq!(infer("amount.longValue()"), Ok(NumericTy::Int));
        assert_eq!(infer("0.5 * amount"), Ok(NumericTy::Float));
        assert_eq!(infer("amount - 1"), Ok(NumericTy::Int));
        assert_eq!(infer("\"7\""), Err("a string literal".to_string()));
        assert_eq!(infer("BigDecimal.ZERO"), Err("an attribute".to_string()));
    }

    #[test]
    fn test_value_of_constructors() {
        assert_eq!(lower("BigDecimal.valueOf(7)").unwrap(), "decimal.NewFromInt(7)");
        assert_eq!(lower("BigDecimal.valueOf(7.5)").unwrap(), "decimal.NewFromFloat(7.5)");
        assert_eq!(lower("BigDecimal.valueOf(a.longValue())").unwrap(), "decimal.NewFromInt(t.a.IntPart())");
        assert_eq!(lower("valueOf(2)").unwrap(), "decimal.NewFromInt(2)");
    }

    #[test]
    fn test_value_of_rejects_unclassifiable_arguments() {
        let err = lower("BigDecimal.valueOf(\"7\")").unwrap_err();
        assert_eq!(
            err,
            GenerationError::UnsupportedConstructorInference {
                shape: "a string literal".into(),
                node: "BigDecimal.valueOf(\"7\")".into(),
            }
        );
        let err = lower("BigDecimal.valueOf(1, 2)").unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedConstructorInference { ref shape, .. } if shape == "2 arguments"));
        let err = lower("BigDecimal.valueOf()").unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedConstructorInference { ref shape, .. } if shape == "no argument"));
    }

    #[test]
    fn test_round_rewrite() {
        assert_eq!(lower("a.setScale(2, BigDecimal.ROUND_DOWN)").unwrap(), "t.a.RoundCash(2)");
        assert_eq!(lower("a.setScale(2, BigDecimal.ROUND_UP)").unwrap(), "t.a.Round(2)");
        assert_eq!(lower("a.setScale(2)").unwrap(), "t.a.Round(2)");
    }

    #[test]
    fn test_round_rewrite_non_truncating_modes_use_ordinary_round() {
        for mode in ["ROUND_HALF_UP", "ROUND_HALF_DOWN", "ROUND_HALF_EVEN", "ROUND_CEILING", "ROUND_FLOOR"] {
            let source = format!("a.setScale(2, BigDecimal.{mode})");
            assert_eq!(lower(&source).unwrap(), "t.a.Round(2)", "{mode}");
        }
    }

    #[test]
    fn test_round_and_divide_accept_the_same_modes() {
        assert_eq!(lower("a.setScale(2, BigDecimal.ROUND_HALF_EVEN)").unwrap(), "t.a.Round(2)");
        assert_eq!(lower("a.divide(b, 2, BigDecimal.ROUND_HALF_EVEN)").unwrap(), "t.a.DivRound(t.b, 2)");
    }

    #[test]
    fn test_round_rewrite_rejects_non_mode_arguments() {
        let err = lower("a.setScale(2, b)").unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedNodeKind { kind: "Name", .. }));
        let err = lower("a.setScale(2, BigDecimal.ZERO)").unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedNodeKind { context: "as rounding mode", .. }));
        let err = lower("a.setScale(2, BigDecimal.ROUND_SIDEWAYS)").unwrap_err();
        assert!(matches!(err, GenerationError::UnmappedOperation { target: "go", .. }));
    }

    #[test]
    fn test_divide_rewrite() {
        assert_eq!(lower("a.divide(b)").unwrap(), "t.a.Div(t.b)");
        assert_eq!(lower("a.divide(b, 2, BigDecimal.ROUND_DOWN)").unwrap(), "t.a.DivRound(t.b, 2)");
        assert_eq!(lower("a.divide(b, 2)").unwrap(), "t.a.DivRound(t.b, 2)");
    }

    #[test]
    fn test_divide_rejects_mode_without_scale() {
        let err = lower("a.divide(b, BigDecimal.ROUND_DOWN)").unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedNodeKind { context: "as divide rounding mode without a scale", .. }));
        let err = lower("a.divide(b, 2, 3)").unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedNodeKind { kind: "NumericLiteral", .. }));
    }

    #[test]
    fn test_call_target_shapes() {
        let err = lower("round(a)").unwrap_err();
        assert!(matches!(err, GenerationError::UnmappedOperation { ref member, .. } if member == "round"));
        let err = lower("add(a)").unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedNodeKind { kind: "Name", .. }));
        let err = lower("BigDecimal.ZERO()").unwrap_err();
        assert!(matches!(err, GenerationError::UnsupportedNodeKind { context: "called as a function", .. }));
    }

    #[test]
    fn test_arguments_lowered_left_to_right() {
        assert_eq!(
            lower("a.add(b.multiply(BigDecimal.valueOf(2))).subtract(BigDecimal.ONE)").unwrap(),
            "t.a.Add(t.b.Mul(decimal.NewFromInt(2))).Sub(decimal.NewFromInt(1))"
        );
    }
}
