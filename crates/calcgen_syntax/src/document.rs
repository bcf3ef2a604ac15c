//! JSON model documents.
//!
//! A model document is the serialized form of one calculation specification. Every expression inside it is still
//! source text; loading parses each text and then validates the assembled [`Model`] through [`ModelBuilder`].
//!
//! ```json
//! {
//!   "name": "Lst2024",
//!   "constants": [{ "name": "TAB1", "type": "BigDecimal[]", "value": "{BigDecimal.valueOf(0.5)}" }],
//!   "inputs": [{ "name": "amount", "type": "BigDecimal" }],
//!   "outputs": [{ "name": "tax", "type": "BigDecimal", "default": "BigDecimal.ZERO" }],
//!   "main": "MAIN",
//!   "methods": [
//!     { "name": "MAIN", "body": [
//!       { "if": { "condition": "amount.compareTo(BigDecimal.ZERO) == 1",
//!                 "then": [{ "eval": "tax = amount.multiply(BigDecimal.valueOf(2))" }] } }
//!     ] }
//!   ]
//! }
//! ```
//!
//! ## Notes
//! - `main` may be omitted; the first method is then the entry point.
//! - Error locations name the section and entry (`input \`amount\``, `method \`MAIN\``) so a failure can be traced
//!   back to the document without line numbers.

use std::path::Path;

use calcgen_core::lang::types::{self, ValueType};
use serde::Deserialize;

use crate::diagnostics::ModelError;
use crate::model::{Constant, Method, Model, ModelBuilder, Role, Statement, Variable};
use crate::parser;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModel {
    name: String,
    #[serde(default)]
    constants: Vec<RawConstant>,
    #[serde(default)]
    inputs: Vec<RawVariable>,
    #[serde(default)]
    outputs: Vec<RawVariable>,
    #[serde(default)]
    internals: Vec<RawVariable>,
    #[serde(default)]
    main: Option<String>,
    #[serde(default)]
    methods: Vec<RawMethod>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConstant {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    value: String,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVariable {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMethod {
    name: String,
    #[serde(default)]
    comment: Option<String>,
    #[serde(default)]
    body: Vec<RawStatement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawStatement {
    Eval(String),
    If(RawIf),
    Execute(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawIf {
    condition: String,
    #[serde(default)]
    then: Vec<RawStatement>,
    #[serde(default, rename = "else")]
    otherwise: Option<Vec<RawStatement>>,
}

/// Parse and validate a JSON model document.
///
/// ## Errors
/// - [`ModelError::Document`] if the JSON does not match the document shape.
/// - [`ModelError::UnknownType`] for a type spelling outside `BigDecimal`, `int`/`long`, `BigDecimal[]`.
/// - [`ModelError::Expression`] for any expression text that does not parse.
/// - Any validation error from [`ModelBuilder::build`].
#[tracing::instrument(skip_all, fields(document_len = json.len()))]
pub fn load_model(json: &str) -> Result<Model, ModelError> {
    let raw: RawModel = serde_json::from_str(json)?;
    let mut builder = ModelBuilder::new(raw.name);

    for constant in raw.constants {
        let location = format!("constant `{}`", constant.name);
        let ty = resolve_type(&constant.name, &constant.ty)?;
        let value =
            parser::parse_value(&constant.value, ty).map_err(|e| ModelError::expression(&location, &constant.value, e))?;
        let mut built = Constant::new(constant.name, ty, value);
        built.comment = constant.comment;
        builder = builder.constant(built);
    }

    for (role, section, variables) in [
        (Role::Input, "input", raw.inputs),
        (Role::Output, "output", raw.outputs),
        (Role::Internal, "internal", raw.internals),
    ] {
        for variable in variables {
            builder = builder.variable(convert_variable(role, section, variable)?);
        }
    }

    for method in raw.methods {
        let location = format!("method `{}`", method.name);
        let body = convert_body(&location, method.body)?;
        let mut built = Method::new(method.name, body);
        built.comment = method.comment;
        builder = builder.method(built);
    }
    if let Some(main) = raw.main {
        builder = builder.entry(main);
    }

    let model = builder.build()?;
    tracing::debug!(
        model = %model.name,
        constants = model.constants.len(),
        methods = model.methods.len() + 1,
        "loaded model"
    );
    Ok(model)
}

/// Read and load a model document from disk.
pub fn load_model_file(path: &Path) -> Result<Model, ModelError> {
    let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_model(&json)
}

fn resolve_type(name: &str, spelling: &str) -> Result<ValueType, ModelError> {
    types::from_str(spelling).ok_or_else(|| ModelError::UnknownType {
        name: name.to_string(),
        spelling: spelling.to_string(),
    })
}

fn convert_variable(role: Role, section: &str, raw: RawVariable) -> Result<Variable, ModelError> {
    let ty = resolve_type(&raw.name, &raw.ty)?;
    let default = match &raw.default {
        Some(text) => {
            let location = format!("{} `{}`", section, raw.name);
            Some(parser::parse_value(text, ty).map_err(|e| ModelError::expression(&location, text, e))?)
        }
        None => None,
    };
    let mut variable = Variable::new(raw.name, ty, role);
    variable.default = default;
    variable.comment = raw.comment;
    Ok(variable)
}

fn convert_body(location: &str, body: Vec<RawStatement>) -> Result<Vec<Statement>, ModelError> {
    body.into_iter().map(|stmt| convert_statement(location, stmt)).collect()
}

fn convert_statement(location: &str, raw: RawStatement) -> Result<Statement, ModelError> {
    match raw {
        RawStatement::Eval(text) => {
            let (target, value) =
                parser::parse_assignment(&text).map_err(|e| ModelError::expression(location, &text, e))?;
            Ok(Statement::Eval { target, value })
        }
        RawStatement::If(raw_if) => {
            let condition =
                parser::parse_expr(&raw_if.condition).map_err(|e| ModelError::expression(location, &raw_if.condition, e))?;
            let then_body = convert_body(location, raw_if.then)?;
            let else_body = match raw_if.otherwise {
                Some(body) => Some(convert_body(location, body)?),
                None => None,
            };
            Ok(Statement::If {
                condition,
                then_body,
                else_body,
            })
        }
        RawStatement::Execute(name) => Ok(Statement::Execute(name)),
    }
}
