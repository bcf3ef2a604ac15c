//! Target adapters
//!
//! A target adapter is the per-language table the lowering engine consults: type mapping, decimal-API member
//! mapping, numeric-constructor spelling, syntax tokens, and declaration headers. The engine holds the adapter as
//! `&dyn TargetAdapter` and never branches on the target itself.
//!
//! ## Notes
//! - Member mapping is an exhaustive `match` over [`MemberId`] in each adapter, so adding a member to the vocabulary
//!   forces every adapter to decide about it.
//! - Adapters are stateless; [`TargetKind::adapter`] hands out `'static` instances.
//!
//! ## Module Structure
//!
//! - `go` - Go with `github.com/shopspring/decimal`

pub mod go;

use calcgen_core::NumericTy;
use calcgen_core::lang::members::{MemberId, RoundingMode};
use calcgen_core::lang::operators::{self, BinaryOperator};
use calcgen_core::lang::types::ValueType;

use super::emitter::BlockDelimiters;
use super::lower::ConstructorPolicy;

pub use go::GoAdapter;

/// Selectable code-generation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum TargetKind {
    /// Go, using github.com/shopspring/decimal
    Go,
}

static GO: GoAdapter = GoAdapter;

impl TargetKind {
    pub const ALL: &'static [TargetKind] = &[TargetKind::Go];

    /// The adapter implementing this target.
    pub fn adapter(self) -> &'static dyn TargetAdapter {
        match self {
            TargetKind::Go => &GO,
        }
    }

    /// Short lowercase name, as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Go => "go",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TargetKind::Go => "Go with github.com/shopspring/decimal",
        }
    }
}

impl std::fmt::Display for TargetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a decimal-API member is written in the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberMapping {
    /// Receiver-less, class-scoped expression (`decimal.NewFromInt(0)` for `ZERO`).
    ClassConstant(&'static str),
    /// The value-of factory; the constructor is chosen per call site by [`ConstructorPolicy`].
    Constructor,
    /// Instance member keeping its receiver (`a.Add(b)` for `add`).
    Instance(&'static str),
    /// Accepted only as the mode argument of a rounding or divide call.
    RoundingMode(RoundingMode),
}

/// Fixed syntax tokens of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxTokens {
    pub block: BlockDelimiters,
    /// Member access (`.`)
    pub accessor: &'static str,
    /// Between call arguments and list elements (`, `)
    pub arg_delim: &'static str,
    pub call_parens: (&'static str, &'static str),
    pub list_parens: (&'static str, &'static str),
    pub comment_prefix: &'static str,
    /// Name of the generated instance inside methods (`t`, `this`, `self`)
    pub receiver: &'static str,
    /// Statement terminator (`;`), empty for targets without one
    pub terminator: &'static str,
    pub bool_literals: (&'static str, &'static str),
}

/// Per-target tables and hooks consumed by the lowering engine and the orchestrator.
pub trait TargetAdapter {
    fn kind(&self) -> TargetKind;

    fn syntax(&self) -> &SyntaxTokens;

    /// Target spelling of a declared type.
    fn map_type(&self, ty: ValueType) -> &'static str;

    /// Target spelling of a decimal-API member; `None` means the target does not support it.
    fn map_member(&self, id: MemberId) -> Option<MemberMapping>;

    /// Qualifier for class-scoped members (`decimal`).
    fn class_scope(&self) -> &'static str;

    /// Constructor callee for one numeric category.
    fn constructor(&self, ty: NumericTy) -> &'static str;

    /// Rule deciding the numeric category of a value-of argument.
    fn constructor_policy(&self) -> ConstructorPolicy {
        ConstructorPolicy::WholeUnitAmounts
    }

    /// Rounding callee for a `setScale(scale, mode)` call once the mode argument is dropped.
    fn round_callee(&self, mode: RoundingMode) -> &'static str;

    /// Callee for division with a result scale (`divide(b, scale[, mode])`), if the target has one.
    fn scaled_divide_callee(&self) -> Option<&'static str>;

    fn binary_operator(&self, op: BinaryOperator) -> &'static str {
        operators::as_str(op)
    }

    /// Binding strength of `op` in the target; higher binds tighter. Defaults to the Java levels the source uses.
    fn operator_precedence(&self, op: BinaryOperator) -> u8 {
        op.precedence()
    }

    /// Type prefix written in front of a list literal.
    fn list_prefix(&self, element: ValueType) -> String;

    // ---- declarations ----

    /// Lines after the disclaimer: package clause, imports.
    fn preamble(&self, package: &str) -> Vec<String>;

    fn struct_header(&self, class: &str) -> String;

    fn field_decl(&self, name: &str, ty: ValueType) -> String;

    /// Header of the initializer block and of the nested block that lists field values, if any.
    fn initializer_headers(&self, class: &str) -> (String, Option<String>);

    fn field_init(&self, name: &str, value: &str) -> String;

    fn setter_header(&self, class: &str, name: &str, ty: ValueType) -> String;

    fn getter_header(&self, class: &str, name: &str, ty: ValueType) -> String;

    fn method_header(&self, class: &str, name: &str) -> String;

    fn if_header(&self, condition: &str) -> String;

    /// Continuation header between the then and else segments.
    fn else_header(&self) -> &'static str;

    fn return_stmt(&self, value: &str) -> String;
}

/// `<receiver><accessor><name>`: a field of the generated instance.
pub fn field_ref(adapter: &dyn TargetAdapter, name: &str) -> String {
    let syntax = adapter.syntax();
    format!("{}{}{}", syntax.receiver, syntax.accessor, name)
}

/// Accessor-name stem of a variable: first letter upper-case, the rest lower-case (`ZVE` -> `Zve`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
