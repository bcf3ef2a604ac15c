//! Code generation facade
//!
//! [`Codegen`] drives one generation run over a [`Model`]:
//!
//! ```text
//! Model → Lowerer ⇄ TargetAdapter → CodeEmitter → target source
//! ```
//!
//! ## Emission order
//!
//! The order is fixed for every target so files generated for different targets stay structurally comparable:
//!
//! 1. Disclaimer comment and target preamble (package clause, imports)
//! 2. One aggregate declaration: constants, inputs, outputs, internals, each preceded by its comment
//! 3. One initializer filling constants and every variable that declares a default
//! 4. One setter per input, then one getter per output
//! 5. The entry method, then every other method in declared order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use calcgen::backend::{generate, GeneratorConfig, TargetKind};
//!
//! let source = generate(&model, TargetKind::Go, &GeneratorConfig::default())?;
//! ```

use calcgen_core::lang::types::ValueType;
use calcgen_syntax::{Method, Model, Variable};

use super::config::GeneratorConfig;
use super::emitter::CodeEmitter;
use super::errors::GenerationResult;
use super::lower::Lowerer;
use super::target::{TargetAdapter, TargetKind, field_ref};

/// First line of every generated file.
pub const DISCLAIMER: &str = "This file is automatically generated by calcgen, do not edit!";

/// Generate target source for `model`.
///
/// ## Errors
/// The first [`super::GenerationError`] hit while lowering. No partial output is returned.
pub fn generate(model: &Model, target: TargetKind, config: &GeneratorConfig) -> GenerationResult<String> {
    Codegen::new(model, target.adapter(), config).try_generate()
}

/// One generation run.
pub struct Codegen<'a> {
    model: &'a Model,
    adapter: &'a dyn TargetAdapter,
    lowerer: Lowerer<'a>,
    class_name: &'a str,
    package: &'a str,
    out: CodeEmitter,
}

impl<'a> Codegen<'a> {
    pub fn new(model: &'a Model, adapter: &'a dyn TargetAdapter, config: &'a GeneratorConfig) -> Self {
        Self {
            model,
            adapter,
            lowerer: Lowerer::for_model(adapter, model),
            class_name: config.effective_class_name(&model.name),
            package: config.effective_package(),
            out: CodeEmitter::new(config.indent_width, adapter.syntax().block),
        }
    }

    /// Run the generation.
    ///
    /// ## Errors
    /// The first lowering error; the partially emitted text is discarded.
    #[tracing::instrument(skip_all, fields(model = %self.model.name, target_lang = %self.adapter.kind()))]
    pub fn try_generate(mut self) -> GenerationResult<String> {
        self.emit_preamble();
        self.emit_declaration();
        self.emit_initializer()?;
        self.emit_accessors();
        let model = self.model;
        for method in model.all_methods() {
            self.emit_method(method)?;
        }
        Ok(self.out.finish())
    }

    fn comment(&mut self, text: &str) {
        self.out.comment(self.adapter.syntax().comment_prefix, text);
    }

    fn emit_preamble(&mut self) {
        self.comment(DISCLAIMER);
        for line in self.adapter.preamble(self.package) {
            if line.is_empty() {
                self.out.blank_line();
            } else {
                self.out.line(&line);
            }
        }
    }

    fn emit_declaration(&mut self) {
        let model = self.model;
        let adapter = self.adapter;
        let prefix = adapter.syntax().comment_prefix;

        self.out.blank_line();
        self.out.block(&adapter.struct_header(self.class_name), |out| {
            let mut first = true;
            let mut section = |out: &mut CodeEmitter, title: &str, fields: Vec<(&str, ValueType, Option<&str>)>| {
                if fields.is_empty() {
                    return;
                }
                if !first {
                    out.blank_line();
                }
                first = false;
                out.comment(prefix, title);
                for (name, ty, comment) in fields {
                    if let Some(comment) = comment {
                        out.comment(prefix, comment);
                    }
                    out.line(&adapter.field_decl(name, ty));
                }
            };

            let constants = model
                .constants
                .iter()
                .map(|c| (c.name.as_str(), c.ty, c.comment.as_deref()))
                .collect();
            section(out, "Constants", constants);
            section(out, "Input variables", variable_fields(&model.inputs));
            section(out, "Output variables", variable_fields(&model.outputs));
            section(out, "Internal variables", variable_fields(&model.internals));
        });
    }

    fn emit_initializer(&mut self) -> GenerationResult<()> {
        let mut values = Vec::new();
        for constant in &self.model.constants {
            values.push((constant.name.as_str(), self.lowerer.expr_text(&constant.value)?));
        }
        for variable in self.model.variables() {
            if let Some(default) = &variable.default {
                values.push((variable.name.as_str(), self.lowerer.expr_text(default)?));
            }
        }

        let adapter = self.adapter;
        let (header, inner) = adapter.initializer_headers(self.class_name);
        let fill = |out: &mut CodeEmitter| {
            for (name, value) in &values {
                out.line(&adapter.field_init(name, value));
            }
        };

        self.out.blank_line();
        self.out.block(&header, |out| match &inner {
            Some(inner) => out.block(inner, fill),
            None => fill(out),
        });
        Ok(())
    }

    fn emit_accessors(&mut self) {
        let adapter = self.adapter;
        let terminator = adapter.syntax().terminator;
        for input in &self.model.inputs {
            self.out.blank_line();
            let header = adapter.setter_header(self.class_name, &input.name, input.ty);
            self.out.block(&header, |out| {
                out.line(&format!("{} = value{}", field_ref(adapter, &input.name), terminator));
            });
        }
        for output in &self.model.outputs {
            self.out.blank_line();
            let header = adapter.getter_header(self.class_name, &output.name, output.ty);
            self.out.block(&header, |out| {
                let value = field_ref(adapter, &output.name);
                out.line(&format!("{}{}", adapter.return_stmt(&value), terminator));
            });
        }
    }

    fn emit_method(&mut self, method: &Method) -> GenerationResult<()> {
        self.out.blank_line();
        if let Some(comment) = &method.comment {
            self.comment(comment);
        }
        let header = self.adapter.method_header(self.class_name, &method.name);
        let lowerer = &self.lowerer;
        self.out.try_block(&header, |out| lowerer.body(out, &method.body))?;
        tracing::debug!(method = %method.name, statements = method.body.len(), "emitted method");
        Ok(())
    }
}

fn variable_fields(variables: &[Variable]) -> Vec<(&str, ValueType, Option<&str>)> {
    variables
        .iter()
        .map(|v| (v.name.as_str(), v.ty, v.comment.as_deref()))
        .collect()
}
