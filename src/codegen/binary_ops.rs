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

//! Lowering of the four arithmetic operators.
//!
//! The machine only adds and subtracts, so:
//! - `*` is unrolled into repeated additions when one operand is known at
//!   compile time
//! - `/` becomes a repeated-subtraction loop evaluated at run time

use super::emit::EmitHelpers;
use super::expressions::ExpressionGenerator;
use super::labels::LabelManager;
use super::CodeGenerator;
use crate::ast::Expr;
use crate::error::{CompileError, ErrorCode, Span, Warning, WarningCode};
use crate::isa::Opcode;

/// Extension trait for binary operator lowering.
pub trait BinaryOpGenerator {
    /// Generate `left + right` or `left - right`; `op` is `ADD` or `SUB`.
    fn generate_additive(&mut self, op: Opcode, left: &Expr, right: &Expr)
        -> Result<(), CompileError>;

    /// Generate `left * right` by repeated addition.
    fn generate_multiply(&mut self, left: &Expr, right: &Expr, span: Span)
        -> Result<(), CompileError>;

    /// Generate `left / right` as a run-time subtraction loop.
    fn generate_divide(&mut self, left: &Expr, right: &Expr, span: Span)
        -> Result<(), CompileError>;

    /// Evaluate a non-leaf operand into a fresh temporary, or return the
    /// cell of a leaf directly.
    fn operand_cell(&mut self, expr: &Expr) -> Result<String, CompileError>;
}

impl BinaryOpGenerator for CodeGenerator {
    fn generate_additive(
        &mut self,
        op: Opcode,
        left: &Expr,
        right: &Expr,
    ) -> Result<(), CompileError> {
        if right.is_leaf() {
            self.generate_expr(left)?;
            if let Some(right_cell) = self.leaf_cell(right) {
                self.emit(op, &right_cell);
            }
            return Ok(());
        }

        self.generate_expr(left)?;
        let left_temp = self.make_temp();
        self.emit(Opcode::Sta, &left_temp);
        self.generate_expr(right)?;

        if op == Opcode::Add {
            self.emit(Opcode::Add, &left_temp);
        } else {
            let right_temp = self.make_temp();
            self.emit(Opcode::Sta, &right_temp);
            self.emit(Opcode::Lda, &left_temp);
            self.emit(Opcode::Sub, &right_temp);
        }
        Ok(())
    }

    fn generate_multiply(
        &mut self,
        left: &Expr,
        right: &Expr,
        span: Span,
    ) -> Result<(), CompileError> {
        let (multiplicand, times) = match (self.static_value(right), self.static_value(left)) {
            (Some(times), _) => (left, times),
            (None, Some(times)) => (right, times),
            (None, None) => {
                if self.options.strict {
                    return Err(CompileError::new(
                        ErrorCode::UnknownMultiplier,
                        "Neither factor of this multiplication is known at compile time",
                        span,
                    )
                    .with_hint("Assign a literal to one of the factors before multiplying"));
                }
                self.warnings.push(Warning::new(
                    WarningCode::UnknownMultiplier,
                    "Neither factor of this multiplication is known at compile time, the result is replaced by 0",
                    span,
                ));
                self.emit_comment("Multiplication with unknown factors");
                self.emit_load_zero();
                return Ok(());
            }
        };

        if times == 0 {
            self.emit_load_zero();
            return Ok(());
        }

        let cell = self.operand_cell(multiplicand)?;
        self.emit_load_zero();
        for _ in 0..times {
            self.emit(Opcode::Add, &cell);
        }
        Ok(())
    }

    fn generate_divide(
        &mut self,
        left: &Expr,
        right: &Expr,
        span: Span,
    ) -> Result<(), CompileError> {
        if right.as_literal().is_some_and(|value| value % 256 == 0) {
            self.division_by_zero(span);
            return Ok(());
        }

        let quotient = self.make_temp();
        let dividend = self.make_temp();
        let divisor = self.make_temp();
        let (loop_label, done_label) = self.make_division_labels();
        let one = self.symbols.constant(1);

        self.emit_load_zero();
        self.emit(Opcode::Sta, &quotient);
        self.generate_expr(left)?;
        self.emit(Opcode::Sta, &dividend);
        self.generate_expr(right)?;
        self.emit(Opcode::Sta, &divisor);

        self.emit_label(&loop_label);
        self.emit(Opcode::Lda, &dividend);
        self.emit(Opcode::Sub, &divisor);
        self.emit(Opcode::Jmn, &done_label);
        self.emit(Opcode::Sta, &dividend);
        self.emit(Opcode::Lda, &quotient);
        self.emit(Opcode::Add, &one);
        self.emit(Opcode::Sta, &quotient);
        self.emit(Opcode::Jmp, &loop_label);
        self.emit_label(&done_label);
        self.emit(Opcode::Lda, &quotient);
        Ok(())
    }

    fn operand_cell(&mut self, expr: &Expr) -> Result<String, CompileError> {
        if let Some(cell) = self.leaf_cell(expr) {
            return Ok(cell);
        }
        self.generate_expr(expr)?;
        let temp = self.make_temp();
        self.emit(Opcode::Sta, &temp);
        Ok(temp)
    }
}
