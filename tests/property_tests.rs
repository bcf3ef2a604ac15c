//! Property-based tests for calcgen
//!
//! These tests use proptest to verify invariants across many randomly
//! generated method bodies, catching edge cases that hand-written tests might miss.

use calcgen::backend::emitter::{BlockDelimiters, CodeEmitter};
use calcgen::backend::{GeneratorConfig, GoAdapter, Lowerer, TargetKind, generate};
use calcgen_core::lang::types::ValueType;
use calcgen_syntax::parser::{parse_assignment, parse_expr};
use calcgen_syntax::{Method, Model, Statement};
use proptest::prelude::*;

const MAPPED: &[&str] = &[
    "tax = amount.add(tax)",
    "tax = amount.setScale(2, BigDecimal.ROUND_DOWN)",
    "tax = amount.divide(BigDecimal.TEN, 2)",
    "tax = BigDecimal.valueOf(amount.longValue())",
];

const UNMAPPED: &[&str] = &["tax = amount.negate()", "tax = amount.max(tax)"];

const CONDITIONS: &[&str] = &["amount.compareTo(tax) == 1", "tax.compareTo(BigDecimal.ZERO) != 0"];

/// Shape of a generated method body, before parsing.
#[derive(Debug, Clone)]
enum Node {
    Eval(&'static str, bool),
    If(&'static str, Vec<Node>, Option<Vec<Node>>),
}

impl Node {
    fn lowers(&self) -> bool {
        match self {
            Node::Eval(_, ok) => *ok,
            Node::If(_, then_body, else_body) => {
                then_body.iter().all(Node::lowers) && else_body.iter().flatten().all(Node::lowers)
            }
        }
    }

    fn to_statement(&self) -> Statement {
        match self {
            Node::Eval(source, _) => {
                let (target, value) = parse_assignment(source).expect("fixture assignment parses");
                Statement::Eval { target, value }
            }
            Node::If(condition, then_body, else_body) => Statement::If {
                condition: parse_expr(condition).expect("fixture condition parses"),
                then_body: then_body.iter().map(Node::to_statement).collect(),
                else_body: else_body.as_ref().map(|body| body.iter().map(Node::to_statement).collect()),
            },
        }
    }
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        3 => prop::sample::select(MAPPED).prop_map(|s| Node::Eval(s, true)),
        1 => prop::sample::select(UNMAPPED).prop_map(|s| Node::Eval(s, false)),
    ];
    leaf.prop_recursive(4, 24, 3, |inner| {
        (
            prop::sample::select(CONDITIONS),
            prop::collection::vec(inner.clone(), 0..3),
            prop::option::of(prop::collection::vec(inner, 0..3)),
        )
            .prop_map(|(condition, then_body, else_body)| Node::If(condition, then_body, else_body))
    })
}

fn model_for(body: &[Node]) -> Model {
    Model::builder("Prop")
        .input("amount", ValueType::Decimal)
        .output("tax", ValueType::Decimal)
        .method(Method::new("MAIN", body.iter().map(Node::to_statement).collect()))
        .build()
        .expect("generated model is valid")
}

fn braces_balanced(text: &str) -> bool {
    let mut depth: i64 = 0;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

proptest! {
    /// Property: generation succeeds exactly when every leaf maps, and is byte-identical across runs
    #[test]
    fn generation_is_deterministic(body in prop::collection::vec(node_strategy(), 0..4)) {
        let model = model_for(&body);
        let config = GeneratorConfig::default();
        let first = generate(&model, TargetKind::Go, &config);
        let second = generate(&model, TargetKind::Go, &config);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.is_ok(), body.iter().all(Node::lowers));
    }

    /// Property: successful output has balanced braces and whole indentation levels
    #[test]
    fn generated_blocks_are_balanced(body in prop::collection::vec(node_strategy(), 0..4)) {
        prop_assume!(body.iter().all(Node::lowers));
        let source = generate(&model_for(&body), TargetKind::Go, &GeneratorConfig::default()).unwrap();
        prop_assert!(braces_balanced(&source));
        for line in source.lines() {
            let indent = line.len() - line.trim_start().len();
            prop_assert_eq!(indent % 4, 0, "odd indentation in {:?}", line);
        }
    }

    /// Property: the writer stays balanced even when lowering fails mid-block
    #[test]
    fn failed_lowering_leaves_writer_balanced(body in prop::collection::vec(node_strategy(), 0..4)) {
        let go = GoAdapter;
        let lowerer = Lowerer::new(&go, ["amount", "tax"]);
        let mut out = CodeEmitter::new(4, BlockDelimiters::BRACES);
        let statements: Vec<Statement> = body.iter().map(Node::to_statement).collect();
        let result = lowerer.body(&mut out, &statements);
        prop_assert_eq!(result.is_ok(), body.iter().all(Node::lowers));
        prop_assert_eq!(out.depth(), 0);
        prop_assert!(braces_balanced(out.as_str()));
    }

    /// Property: integer literals always pick the integer constructor, verbatim
    #[test]
    fn integer_literals_use_integer_constructor(n in 0u32..1_000_000) {
        let go = GoAdapter;
        let lowerer = Lowerer::new(&go, Vec::<&str>::new());
        let expr = parse_expr(&format!("BigDecimal.valueOf({n})")).unwrap();
        prop_assert_eq!(lowerer.expr_text(&expr).unwrap(), format!("decimal.NewFromInt({n})"));
    }

    /// Property: literals with a fractional part pick the floating-point constructor
    #[test]
    fn fractional_literals_use_float_constructor(whole in 0u32..10_000, frac in 0u32..100) {
        let go = GoAdapter;
        let lowerer = Lowerer::new(&go, Vec::<&str>::new());
        let expr = parse_expr(&format!("BigDecimal.valueOf({whole}.{frac})")).unwrap();
        prop_assert_eq!(lowerer.expr_text(&expr).unwrap(), format!("decimal.NewFromFloat({whole}.{frac})"));
    }
}
