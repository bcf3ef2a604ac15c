//! Statement lowering.

use calcgen_syntax::Statement;

use super::Lowerer;
use crate::backend::emitter::CodeEmitter;
use crate::backend::errors::GenerationResult;
use crate::backend::target::field_ref;

impl Lowerer<'_> {
    /// Lower a statement sequence in document order.
    pub fn body(&self, out: &mut CodeEmitter, body: &[Statement]) -> GenerationResult<()> {
        for stmt in body {
            self.statement(out, stmt)?;
        }
        Ok(())
    }

    /// Lower one statement into `out`.
    ///
    /// ## Errors
    /// Any expression lowering error. Blocks opened for `If` are closed before the error is returned.
    pub fn statement(&self, out: &mut CodeEmitter, stmt: &Statement) -> GenerationResult<()> {
        let syntax = self.adapter.syntax();
        match stmt {
            Statement::Eval { target, value } => {
                let value = self.expr_text(value)?;
                out.line(&format!("{} = {}{}", self.name(target).concat(), value, syntax.terminator));
                Ok(())
            }
            Statement::If {
                condition,
                then_body,
                else_body,
            } => {
                let header = self.adapter.if_header(&self.expr_text(condition)?);
                match else_body {
                    Some(else_body) => out.try_chained_block(
                        &header,
                        |out| self.body(out, then_body),
                        self.adapter.else_header(),
                        |out| self.body(out, else_body),
                    ),
                    None => out.try_block(&header, |out| self.body(out, then_body)),
                }
            }
            Statement::Execute(method) => {
                let (open, close) = syntax.call_parens;
                out.line(&format!(
                    "{}{}{}{}",
                    field_ref(self.adapter, method),
                    open,
                    close,
                    syntax.terminator
                ));
                Ok(())
            }
        }
    }
}
