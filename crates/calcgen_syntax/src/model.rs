//! Calculation IR model.
//!
//! A [`Model`] is one parsed calculation specification: constants, input/output/internal variables, and methods
//! made of statements. Models are built once (by [`ModelBuilder`] or [`crate::document`]) and are read-only
//! afterwards; the code generator borrows them.
//!
//! ## Notes
//! - Names are unique within constants+variables (they share the generated aggregate) and within methods.
//! - Exactly one method is the entry point. It is stored apart from the others because it is always emitted first.
//! - `Eval` targets must be variables and `Execute` targets must be methods; both are checked in
//!   [`ModelBuilder::build`].

use std::collections::HashSet;

use calcgen_core::lang::types::ValueType;

use crate::ast::Expr;
use crate::diagnostics::ModelError;

/// Role of a variable in the generated aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Gets a generated setter.
    Input,
    /// Gets a generated getter.
    Output,
    /// Storage only.
    Internal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub name: String,
    pub ty: ValueType,
    pub value: Expr,
    pub comment: Option<String>,
}

impl Constant {
    pub fn new(name: impl Into<String>, ty: ValueType, value: Expr) -> Self {
        Self {
            name: name.into(),
            ty,
            value,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub ty: ValueType,
    pub role: Role,
    pub default: Option<Expr>,
    pub comment: Option<String>,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: ValueType, role: Role) -> Self {
        Self {
            name: name.into(),
            ty,
            role,
            default: None,
            comment: None,
        }
    }

    pub fn with_default(mut self, default: Expr) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Statement of a method body. Execution order is document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `target = value`
    Eval { target: String, value: Expr },
    If {
        condition: Expr,
        then_body: Vec<Statement>,
        else_body: Option<Vec<Statement>>,
    },
    /// Invoke another method on the same instance (no arguments, no return value).
    Execute(String),
}

impl Statement {
    pub fn eval(target: impl Into<String>, value: Expr) -> Self {
        Statement::Eval {
            target: target.into(),
            value,
        }
    }

    pub fn execute(method: impl Into<String>) -> Self {
        Statement::Execute(method.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub comment: Option<String>,
    pub body: Vec<Statement>,
}

impl Method {
    pub fn new(name: impl Into<String>, body: Vec<Statement>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            body,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub name: String,
    pub constants: Vec<Constant>,
    pub inputs: Vec<Variable>,
    pub outputs: Vec<Variable>,
    pub internals: Vec<Variable>,
    /// The designated entry point.
    pub main_method: Method,
    /// Every other method, in declared order.
    pub methods: Vec<Method>,
}

impl Model {
    pub fn builder(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder::new(name)
    }

    /// Inputs, outputs, then internals.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.inputs.iter().chain(&self.outputs).chain(&self.internals)
    }

    /// Names of every field of the generated aggregate (constants first).
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.constants
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.variables().map(|v| v.name.as_str()))
    }

    /// Entry method first, then the rest in declared order.
    pub fn all_methods(&self) -> impl Iterator<Item = &Method> {
        std::iter::once(&self.main_method).chain(&self.methods)
    }
}

/// Incremental, validating constructor for [`Model`].
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    constants: Vec<Constant>,
    variables: Vec<Variable>,
    methods: Vec<Method>,
    entry: Option<String>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constants: Vec::new(),
            variables: Vec::new(),
            methods: Vec::new(),
            entry: None,
        }
    }

    pub fn constant(mut self, constant: Constant) -> Self {
        self.constants.push(constant);
        self
    }

    pub fn variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn input(self, name: impl Into<String>, ty: ValueType) -> Self {
        self.variable(Variable::new(name, ty, Role::Input))
    }

    pub fn output(self, name: impl Into<String>, ty: ValueType) -> Self {
        self.variable(Variable::new(name, ty, Role::Output))
    }

    pub fn internal(self, name: impl Into<String>, ty: ValueType) -> Self {
        self.variable(Variable::new(name, ty, Role::Internal))
    }

    /// Add a method. The first method added is the entry point unless [`Self::entry`] names another.
    pub fn method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Designate the entry method by name.
    pub fn entry(mut self, name: impl Into<String>) -> Self {
        self.entry = Some(name.into());
        self
    }

    /// Validate and assemble the model.
    ///
    /// ## Errors
    /// - [`ModelError::DuplicateName`] for a repeated field or method name.
    /// - [`ModelError::MissingEntry`] if there is no method, or the named entry method does not exist.
    /// - [`ModelError::UnknownTarget`] / [`ModelError::UnknownMethod`] for dangling statement references.
    pub fn build(self) -> Result<Model, ModelError> {
        let mut fields: HashSet<&str> = HashSet::new();
        for constant in &self.constants {
            if !fields.insert(&constant.name) {
                return Err(ModelError::DuplicateName {
                    section: "constant",
                    name: constant.name.clone(),
                });
            }
        }
        let mut variable_names: HashSet<&str> = HashSet::new();
        for variable in &self.variables {
            if !fields.insert(&variable.name) {
                return Err(ModelError::DuplicateName {
                    section: "variable",
                    name: variable.name.clone(),
                });
            }
            variable_names.insert(&variable.name);
        }

        let mut method_names: HashSet<&str> = HashSet::new();
        for method in &self.methods {
            if !method_names.insert(&method.name) {
                return Err(ModelError::DuplicateName {
                    section: "method",
                    name: method.name.clone(),
                });
            }
        }
        for method in &self.methods {
            check_statements(&method.name, &method.body, &variable_names, &method_names)?;
        }

        let entry_name = match &self.entry {
            Some(name) => name.clone(),
            None => match self.methods.first() {
                Some(method) => method.name.clone(),
                None => return Err(ModelError::MissingEntry(String::new())),
            },
        };
        let Some(entry_idx) = self.methods.iter().position(|m| m.name == entry_name) else {
            return Err(ModelError::MissingEntry(entry_name));
        };

        let mut methods = self.methods;
        let main_method = methods.remove(entry_idx);

        let mut inputs = Vec::new();
        let mut outputs = Vec::new();
        let mut internals = Vec::new();
        for variable in self.variables {
            match variable.role {
                Role::Input => inputs.push(variable),
                Role::Output => outputs.push(variable),
                Role::Internal => internals.push(variable),
            }
        }

        Ok(Model {
            name: self.name,
            constants: self.constants,
            inputs,
            outputs,
            internals,
            main_method,
            methods,
        })
    }
}

fn check_statements(
    method: &str,
    body: &[Statement],
    variables: &HashSet<&str>,
    methods: &HashSet<&str>,
) -> Result<(), ModelError> {
    for stmt in body {
        match stmt {
            Statement::Eval { target, .. } => {
                if !variables.contains(target.as_str()) {
                    return Err(ModelError::UnknownTarget {
                        method: method.to_string(),
                        target: target.clone(),
                    });
                }
            }
            Statement::If {
                then_body, else_body, ..
            } => {
                check_statements(method, then_body, variables, methods)?;
                if let Some(else_body) = else_body {
                    check_statements(method, else_body, variables, methods)?;
                }
            }
            Statement::Execute(callee) => {
                if !methods.contains(callee.as_str()) {
                    return Err(ModelError::UnknownMethod {
                        method: method.to_string(),
                        callee: callee.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount_times_two() -> Expr {
        Expr::method_call(Expr::name("amount"), "multiply", vec![Expr::number("2")])
    }

    #[test]
    fn test_build_splits_roles_and_entry() {
        let model = Model::builder("Calc")
            .input("amount", ValueType::Decimal)
            .output("tax", ValueType::Decimal)
            .internal("scratch", ValueType::Integer)
            .method(Method::new("helper", vec![]))
            .method(Method::new("main", vec![Statement::eval("tax", amount_times_two())]))
            .entry("main")
            .build()
            .unwrap();

        assert_eq!(model.main_method.name, "main");
        assert_eq!(model.methods.len(), 1);
        assert_eq!(model.methods[0].name, "helper");
        assert_eq!(model.inputs[0].name, "amount");
        assert_eq!(model.outputs[0].name, "tax");
        assert_eq!(model.internals[0].name, "scratch");
        let names: Vec<_> = model.all_methods().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["main", "helper"]);
    }

    #[test]
    fn test_first_method_is_default_entry() {
        let model = Model::builder("Calc")
            .method(Method::new("first", vec![]))
            .method(Method::new("second", vec![]))
            .build()
            .unwrap();
        assert_eq!(model.main_method.name, "first");
    }

    #[test]
    fn test_field_names_order() {
        let model = Model::builder("Calc")
            .constant(Constant::new("C1", ValueType::Decimal, Expr::number("1")))
            .internal("n1", ValueType::Decimal)
            .input("i1", ValueType::Decimal)
            .output("o1", ValueType::Decimal)
            .method(Method::new("main", vec![]))
            .build()
            .unwrap();
        let names: Vec<_> = model.field_names().collect();
        assert_eq!(names, vec!["C1", "i1", "o1", "n1"]);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Model::builder("Calc")
            .constant(Constant::new("X", ValueType::Decimal, Expr::number("1")))
            .input("X", ValueType::Decimal)
            .method(Method::new("main", vec![]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateName { section: "variable", .. }));
    }

    #[test]
    fn test_duplicate_method_rejected() {
        let err = Model::builder("Calc")
            .method(Method::new("main", vec![]))
            .method(Method::new("main", vec![]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateName { section: "method", .. }));
    }

    #[test]
    fn test_missing_entry_rejected() {
        let err = Model::builder("Calc").build().unwrap_err();
        assert!(matches!(err, ModelError::MissingEntry(_)));

        let err = Model::builder("Calc")
            .method(Method::new("helper", vec![]))
            .entry("main")
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingEntry(name) if name == "main"));
    }

    #[test]
    fn test_unknown_execute_target_rejected() {
        let err = Model::builder("Calc")
            .method(Method::new("main", vec![Statement::execute("missing")]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownMethod { callee, .. } if callee == "missing"));
    }

    #[test]
    fn test_assignment_to_constant_rejected() {
        let err = Model::builder("Calc")
            .constant(Constant::new("C", ValueType::Decimal, Expr::number("1")))
            .method(Method::new(
                "main",
                vec![Statement::If {
                    condition: Expr::name("flag"),
                    then_body: vec![Statement::eval("C", Expr::number("2"))],
                    else_body: None,
                }],
            ))
            .build()
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownTarget { target, .. } if target == "C"));
    }
}
