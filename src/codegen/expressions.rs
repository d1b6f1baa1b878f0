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

//! Expression code generation.
//!
//! Every expression leaves its value in the accumulator.

use super::binary_ops::BinaryOpGenerator;
use super::emit::EmitHelpers;
use super::CodeGenerator;
use crate::ast::{BinaryOp, Expr, ExprKind};
use crate::error::{CompileError, Span, Warning, WarningCode};
use crate::isa::Opcode;

/// Reduce a literal to the 8-bit value the machine stores.
pub fn literal_byte(value: u32) -> u8 {
    (value % 256) as u8
}

/// Extension trait for expression code generation.
pub trait ExpressionGenerator {
    /// Generate code that loads the value of `expr` into the accumulator.
    fn generate_expr(&mut self, expr: &Expr) -> Result<(), CompileError>;

    /// The data cell holding a leaf's value, declaring it if needed.
    /// Returns `None` for operations.
    fn leaf_cell(&mut self, expr: &Expr) -> Option<String>;

    /// The value of an operand known at compile time: a literal, or a
    /// variable whose last assignment was a literal.
    fn static_value(&self, expr: &Expr) -> Option<u8>;

    /// Report a division by a literal zero and load zero instead.
    fn division_by_zero(&mut self, span: Span);
}

impl ExpressionGenerator for CodeGenerator {
    fn generate_expr(&mut self, expr: &Expr) -> Result<(), CompileError> {
        match &expr.kind {
            ExprKind::Literal(_) | ExprKind::Identifier(_) => {
                if let Some(cell) = self.leaf_cell(expr) {
                    self.emit(Opcode::Lda, &cell);
                }
                Ok(())
            }
            ExprKind::Operation { op, left, right } => {
                if let (Some(a), Some(b)) = (left.as_literal(), right.as_literal()) {
                    match op.fold(a, b) {
                        Some(value) => {
                            let cell = self.symbols.constant(value);
                            self.emit(Opcode::Lda, &cell);
                        }
                        None => self.division_by_zero(expr.span),
                    }
                    return Ok(());
                }

                match op {
                    BinaryOp::Add => self.generate_additive(Opcode::Add, left, right),
                    BinaryOp::Sub => self.generate_additive(Opcode::Sub, left, right),
                    BinaryOp::Mul => self.generate_multiply(left, right, expr.span),
                    BinaryOp::Div => self.generate_divide(left, right, expr.span),
                }
            }
        }
    }

    fn leaf_cell(&mut self, expr: &Expr) -> Option<String> {
        match &expr.kind {
            ExprKind::Literal(value) => Some(self.symbols.constant(literal_byte(*value))),
            ExprKind::Identifier(name) => {
                self.symbols.variable(name);
                Some(name.clone())
            }
            ExprKind::Operation { .. } => None,
        }
    }

    fn static_value(&self, expr: &Expr) -> Option<u8> {
        match &expr.kind {
            ExprKind::Literal(value) => Some(literal_byte(*value)),
            ExprKind::Identifier(name) => self.symbols.known_value(name),
            ExprKind::Operation { .. } => None,
        }
    }

    fn division_by_zero(&mut self, span: Span) {
        self.warnings.push(Warning::new(
            WarningCode::DivisionByZero,
            "Division by zero, the result is replaced by 0",
            span,
        ));
        self.emit_comment("Division by zero");
        self.emit_load_zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_byte() {
        assert_eq!(literal_byte(0), 0);
        assert_eq!(literal_byte(255), 255);
        assert_eq!(literal_byte(256), 0);
        assert_eq!(literal_byte(300), 44);
    }
}
