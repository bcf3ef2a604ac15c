//! Go target (`github.com/shopspring/decimal`)
//!
//! ## Notes
//! - The decimal library encodes rounding in the callee name: `RoundCash` for `ROUND_DOWN` (truncation), `Round`
//!   (half away from zero) for every other mode. The mode argument itself is always dropped.
//! - Known limitation: `DivRound(d, scale)` always rounds half away from zero. A rounding mode passed to `divide` is
//!   dropped with a warning, so `a.divide(b, 2, BigDecimal.ROUND_DOWN)` does not truncate in the generated code.
//! - `valueOf` becomes `NewFromInt` or `NewFromFloat`, chosen per call site.

use calcgen_core::NumericTy;
use calcgen_core::lang::members::{MemberId, RoundingMode};
use calcgen_core::lang::operators::BinaryOperator;
use calcgen_core::lang::types::ValueType;

use super::{MemberMapping, SyntaxTokens, TargetAdapter, TargetKind, capitalize};
use crate::backend::emitter::BlockDelimiters;

const GO_SYNTAX: SyntaxTokens = SyntaxTokens {
    block: BlockDelimiters::BRACES,
    accessor: ".",
    arg_delim: ", ",
    call_parens: ("(", ")"),
    list_parens: ("{", "}"),
    comment_prefix: "//",
    receiver: "t",
    terminator: "",
    bool_literals: ("true", "false"),
};

const DECIMAL_IMPORT: &str = "github.com/shopspring/decimal";

/// Go adapter
#[derive(Debug, Clone, Copy, Default)]
pub struct GoAdapter;

impl TargetAdapter for GoAdapter {
    fn kind(&self) -> TargetKind {
        TargetKind::Go
    }

    fn syntax(&self) -> &SyntaxTokens {
        &GO_SYNTAX
    }

    fn map_type(&self, ty: ValueType) -> &'static str {
        match ty {
            ValueType::Decimal => "decimal.Decimal",
            ValueType::Integer => "int64",
            ValueType::DecimalArray => "[]decimal.Decimal",
        }
    }

    fn map_member(&self, id: MemberId) -> Option<MemberMapping> {
        match id {
            MemberId::Zero => Some(MemberMapping::ClassConstant("NewFromInt(0)")),
            MemberId::One => Some(MemberMapping::ClassConstant("NewFromInt(1)")),
            MemberId::Ten => Some(MemberMapping::ClassConstant("NewFromInt(10)")),
            MemberId::ValueOf => Some(MemberMapping::Constructor),
            MemberId::RoundUp
            | MemberId::RoundDown
            | MemberId::RoundCeiling
            | MemberId::RoundFloor
            | MemberId::RoundHalfUp
            | MemberId::RoundHalfDown
            | MemberId::RoundHalfEven => id.rounding_mode().map(MemberMapping::RoundingMode),
            MemberId::Add => Some(MemberMapping::Instance("Add")),
            MemberId::Subtract => Some(MemberMapping::Instance("Sub")),
            MemberId::Multiply => Some(MemberMapping::Instance("Mul")),
            MemberId::Divide => Some(MemberMapping::Instance("Div")),
            MemberId::CompareTo => Some(MemberMapping::Instance("Cmp")),
            MemberId::SetScale => Some(MemberMapping::Instance("Round")),
            MemberId::LongValue => Some(MemberMapping::Instance("IntPart")),
            MemberId::Remainder
            | MemberId::IntValue
            | MemberId::Negate
            | MemberId::Abs
            | MemberId::Max
            | MemberId::Min
            | MemberId::Signum => None,
        }
    }

    fn class_scope(&self) -> &'static str {
        "decimal"
    }

    fn constructor(&self, ty: NumericTy) -> &'static str {
        match ty {
            NumericTy::Int => "NewFromInt",
            NumericTy::Float => "NewFromFloat",
        }
    }

    fn round_callee(&self, mode: RoundingMode) -> &'static str {
        if mode.truncates_toward_zero() { "RoundCash" } else { "Round" }
    }

    fn scaled_divide_callee(&self) -> Option<&'static str> {
        Some("DivRound")
    }

    // Go has five levels; all comparisons share one.
    fn operator_precedence(&self, op: BinaryOperator) -> u8 {
        match op {
            BinaryOperator::Or => 1,
            BinaryOperator::And => 2,
            BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Lt
            | BinaryOperator::LtEq
            | BinaryOperator::Gt
            | BinaryOperator::GtEq => 3,
            BinaryOperator::Add | BinaryOperator::Sub => 4,
            BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Rem => 5,
        }
    }

    fn list_prefix(&self, element: ValueType) -> String {
        format!("[]{}", self.map_type(element))
    }

    fn preamble(&self, package: &str) -> Vec<String> {
        vec![
            format!("package {}", package),
            String::new(),
            format!("import \"{}\"", DECIMAL_IMPORT),
        ]
    }

    fn struct_header(&self, class: &str) -> String {
        format!("type {} struct", class)
    }

    fn field_decl(&self, name: &str, ty: ValueType) -> String {
        format!("{} {}", name, self.map_type(ty))
    }

    fn initializer_headers(&self, class: &str) -> (String, Option<String>) {
        (format!("func New{}() *{}", class, class), Some(format!("return &{}", class)))
    }

    fn field_init(&self, name: &str, value: &str) -> String {
        format!("{}: {},", name, value)
    }

    fn setter_header(&self, class: &str, name: &str, ty: ValueType) -> String {
        format!(
            "func ({} *{}) Set{}(value {})",
            GO_SYNTAX.receiver,
            class,
            capitalize(name),
            self.map_type(ty)
        )
    }

    fn getter_header(&self, class: &str, name: &str, ty: ValueType) -> String {
        format!(
            "func ({} *{}) Get{}() {}",
            GO_SYNTAX.receiver,
            class,
            capitalize(name),
            self.map_type(ty)
        )
    }

    fn method_header(&self, class: &str, name: &str) -> String {
        format!("func ({} *{}) {}()", GO_SYNTAX.receiver, class, name)
    }

    fn if_header(&self, condition: &str) -> String {
        format!("if {}", condition)
    }

    fn else_header(&self) -> &'static str {
        "else"
    }

    fn return_stmt(&self, value: &str) -> String {
        format!("return {}", value)
    }
}
