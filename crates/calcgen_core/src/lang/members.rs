//! Define the decimal-API member vocabulary.
//!
//! Every `Attribute` in a calculation expression names a member of the source decimal type (`BigDecimal`). This
//! module is the single source of truth for those members: a stable identifier ([`MemberId`]) plus a const metadata
//! table ([`MEMBERS`]) recording the spelling and the member's scope.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Members are either class-scoped (symbolic constants, factories, rounding modes) or instance-scoped operations.
//!   Adapters decide which of them a target library supports; an unsupported member is a generation error.

/// Stable identifier for every known decimal-API member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberId {
    // Class-scoped symbolic constants
    Zero,
    One,
    Ten,

    // Class-scoped factories
    ValueOf,

    // Rounding-mode constants
    RoundUp,
    RoundDown,
    RoundCeiling,
    RoundFloor,
    RoundHalfUp,
    RoundHalfDown,
    RoundHalfEven,

    // Instance operations
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    CompareTo,
    SetScale,
    LongValue,
    IntValue,
    Negate,
    Abs,
    Max,
    Min,
    Signum,
}

/// Scope of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Receiver-less symbolic constant (`BigDecimal.ZERO`).
    ClassConstant,
    /// Receiver-less factory (`BigDecimal.valueOf(x)`).
    Factory,
    /// Rounding-mode constant, only meaningful as an argument of a rounding call.
    RoundingMode,
    /// Operation invoked on a decimal receiver (`a.add(b)`).
    Instance,
}

/// Rounding mode named by a rounding-mode constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    Up,
    Down,
    Ceiling,
    Floor,
    HalfUp,
    HalfDown,
    HalfEven,
}

impl RoundingMode {
    /// Whether this mode truncates toward zero (statutory cash rounding).
    pub fn truncates_toward_zero(self) -> bool {
        matches!(self, RoundingMode::Down)
    }
}

/// Metadata for a member.
#[derive(Debug, Clone, Copy)]
pub struct MemberInfo {
    pub id: MemberId,
    pub spelling: &'static str,
    pub kind: MemberKind,
    pub description: &'static str,
}

const fn member(id: MemberId, spelling: &'static str, kind: MemberKind, description: &'static str) -> MemberInfo {
    MemberInfo {
        id,
        spelling,
        kind,
        description,
    }
}

/// Registry of all known members.
pub const MEMBERS: &[MemberInfo] = &[
    member(MemberId::Zero, "ZERO", MemberKind::ClassConstant, "The value 0."),
    member(MemberId::One, "ONE", MemberKind::ClassConstant, "The value 1."),
    member(MemberId::Ten, "TEN", MemberKind::ClassConstant, "The value 10."),
    member(MemberId::ValueOf, "valueOf", MemberKind::Factory, "Materialize a decimal from a number."),
    member(MemberId::RoundUp, "ROUND_UP", MemberKind::RoundingMode, "Round away from zero."),
    member(MemberId::RoundDown, "ROUND_DOWN", MemberKind::RoundingMode, "Truncate toward zero."),
    member(MemberId::RoundCeiling, "ROUND_CEILING", MemberKind::RoundingMode, "Round toward positive infinity."),
    member(MemberId::RoundFloor, "ROUND_FLOOR", MemberKind::RoundingMode, "Round toward negative infinity."),
    member(MemberId::RoundHalfUp, "ROUND_HALF_UP", MemberKind::RoundingMode, "Round half away from zero."),
    member(MemberId::RoundHalfDown, "ROUND_HALF_DOWN", MemberKind::RoundingMode, "Round half toward zero."),
    member(MemberId::RoundHalfEven, "ROUND_HALF_EVEN", MemberKind::RoundingMode, "Round half to even."),
    member(MemberId::Add, "add", MemberKind::Instance, "Sum of receiver and argument."),
    member(MemberId::Subtract, "subtract", MemberKind::Instance, "Receiver minus argument."),
    member(MemberId::Multiply, "multiply", MemberKind::Instance, "Product of receiver and argument."),
    member(
        MemberId::Divide,
        "divide",
        MemberKind::Instance,
        "Receiver divided by argument, optionally with scale and rounding mode.",
    ),
    member(MemberId::Remainder, "remainder", MemberKind::Instance, "Remainder of the division."),
    member(MemberId::CompareTo, "compareTo", MemberKind::Instance, "Three-way comparison (-1, 0, 1)."),
    member(MemberId::SetScale, "setScale", MemberKind::Instance, "Round to a number of decimal places."),
    member(MemberId::LongValue, "longValue", MemberKind::Instance, "Integer part as a 64-bit integer."),
    member(MemberId::IntValue, "intValue", MemberKind::Instance, "Integer part as a 32-bit integer."),
    member(MemberId::Negate, "negate", MemberKind::Instance, "Negated receiver."),
    member(MemberId::Abs, "abs", MemberKind::Instance, "Absolute value."),
    member(MemberId::Max, "max", MemberKind::Instance, "Larger of receiver and argument."),
    member(MemberId::Min, "min", MemberKind::Instance, "Smaller of receiver and argument."),
    member(MemberId::Signum, "signum", MemberKind::Instance, "Sign of the receiver."),
];

/// Return the metadata entry for a member id.
pub fn info_for(id: MemberId) -> &'static MemberInfo {
    MEMBERS.iter().find(|m| m.id == id).expect("INVARIANT: every MemberId has a registry entry")
}

/// Resolve a member spelling to its identifier.
///
/// ## Parameters
/// - `spelling`: member name as written after the `.` in a source expression.
///
/// ## Returns
/// - The matching [`MemberId`], or `None` for spellings outside the vocabulary.
pub fn from_str(spelling: &str) -> Option<MemberId> {
    MEMBERS.iter().find(|m| m.spelling == spelling).map(|m| m.id)
}

/// Return the canonical spelling for a member id.
pub fn as_str(id: MemberId) -> &'static str {
    info_for(id).spelling
}

impl MemberId {
    /// Scope of this member.
    pub fn kind(self) -> MemberKind {
        info_for(self).kind
    }

    /// Whether this member is reached without a receiver value.
    pub fn is_class_scoped(self) -> bool {
        !matches!(self.kind(), MemberKind::Instance)
    }

    /// The rounding mode named by this member, if it is a rounding-mode constant.
    pub fn rounding_mode(self) -> Option<RoundingMode> {
        match self {
            MemberId::RoundUp => Some(RoundingMode::Up),
            MemberId::RoundDown => Some(RoundingMode::Down),
            MemberId::RoundCeiling => Some(RoundingMode::Ceiling),
            MemberId::RoundFloor => Some(RoundingMode::Floor),
            MemberId::RoundHalfUp => Some(RoundingMode::HalfUp),
            MemberId::RoundHalfDown => Some(RoundingMode::HalfDown),
            MemberId::RoundHalfEven => Some(RoundingMode::HalfEven),
            _ => None,
        }
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(as_str(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(from_str("add"), Some(MemberId::Add));
        assert_eq!(from_str("Add"), None);
        assert_eq!(from_str("ROUND_DOWN"), Some(MemberId::RoundDown));
        assert_eq!(from_str("round_down"), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(MemberId::Zero.kind(), MemberKind::ClassConstant);
        assert_eq!(MemberId::ValueOf.kind(), MemberKind::Factory);
        assert_eq!(MemberId::RoundHalfUp.kind(), MemberKind::RoundingMode);
        assert_eq!(MemberId::SetScale.kind(), MemberKind::Instance);
        assert!(MemberId::Ten.is_class_scoped());
        assert!(!MemberId::Multiply.is_class_scoped());
    }

    #[test]
    fn test_rounding_modes_match_kind() {
        for info in MEMBERS {
            assert_eq!(
                info.id.rounding_mode().is_some(),
                info.kind == MemberKind::RoundingMode,
                "rounding-mode mismatch for {}",
                info.spelling
            );
        }
    }

    #[test]
    fn test_only_round_down_is_cash_rounding() {
        assert!(RoundingMode::Down.truncates_toward_zero());
        assert!(!RoundingMode::Up.truncates_toward_zero());
        assert!(!RoundingMode::HalfUp.truncates_toward_zero());
        assert!(!RoundingMode::Floor.truncates_toward_zero());
    }

    #[test]
    fn test_display_uses_spelling() {
        assert_eq!(MemberId::CompareTo.to_string(), "compareTo");
    }
}
