// Neander - A tiny-language compiler, assembler and executor for the Neander machine
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Assignment code generation.
//!
//! A literal assignment also records the value in the symbol table, which
//! later lets a multiplication by that variable be unrolled. Any other
//! assignment forgets the recorded value.

use super::constants::is_reserved;
use super::emit::EmitHelpers;
use super::expressions::{literal_byte, ExpressionGenerator};
use super::CodeGenerator;
use crate::ast::{Command, Expr, ExprKind};
use crate::error::{CompileError, ErrorCode, Span};
use crate::isa::Opcode;

/// Extension trait for assignment code generation.
pub trait AssignmentEmitter {
    /// Generate code for one assignment.
    fn generate_assignment(&mut self, command: &Command) -> Result<(), CompileError>;

    /// Reject identifiers that clash with generated names.
    fn check_name(&self, name: &str, span: Span) -> Result<(), CompileError>;

    /// Check every identifier in an expression.
    fn check_names(&self, expr: &Expr) -> Result<(), CompileError>;
}

impl AssignmentEmitter for CodeGenerator {
    fn generate_assignment(&mut self, command: &Command) -> Result<(), CompileError> {
        self.check_name(&command.variable, command.span)?;
        self.check_names(&command.expr)?;

        self.emit_comment(format!("Assignment: {} = {}", command.variable, command.expr));

        match command.expr.as_literal() {
            Some(value) => {
                let value = literal_byte(value);
                self.symbols.set_known_value(&command.variable, Some(value));
                let cell = self.symbols.constant(value);
                self.emit(Opcode::Lda, &cell);
            }
            None => {
                self.generate_expr(&command.expr)?;
                self.symbols.set_known_value(&command.variable, None);
            }
        }

        self.emit(Opcode::Sta, &command.variable);
        Ok(())
    }

    fn check_name(&self, name: &str, span: Span) -> Result<(), CompileError> {
        if is_reserved(name) {
            return Err(CompileError::new(
                ErrorCode::ReservedName,
                format!("'{}' is reserved for generated code", name),
                span,
            )
            .with_hint("Names starting with CONST_, TEMP_, DIV_LOOP_ or DIV_DONE_ and the name RESULT are reserved"));
        }
        Ok(())
    }

    fn check_names(&self, expr: &Expr) -> Result<(), CompileError> {
        match &expr.kind {
            ExprKind::Literal(_) => Ok(()),
            ExprKind::Identifier(name) => self.check_name(name, expr.span),
            ExprKind::Operation { left, right, .. } => {
                self.check_names(left)?;
                self.check_names(right)
            }
        }
    }
}
