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

//! Emit helper methods for code generation.
//!
//! Code is collected as [`AsmLine`]s in a buffer and only rendered to text
//! once the whole program has been generated, so the `.DATA` section can
//! declare every cell the code refers to.

use super::CodeGenerator;
use crate::isa::Opcode;

/// One line of the `.CODE` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmLine {
    /// An instruction with an optional operand name.
    Instruction(Opcode, Option<String>),
    /// A label definition.
    Label(String),
    /// A comment.
    Comment(String),
}

impl std::fmt::Display for AsmLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AsmLine::Instruction(op, Some(operand)) => write!(f, "{} {}", op, operand),
            AsmLine::Instruction(op, None) => write!(f, "{}", op),
            AsmLine::Label(name) => write!(f, "{}:", name),
            AsmLine::Comment(text) => write!(f, "; {}", text),
        }
    }
}

/// Extension trait for code emission.
pub trait EmitHelpers {
    /// Emit an instruction that refers to a cell or label.
    fn emit(&mut self, op: Opcode, operand: &str);

    /// Emit an instruction without operand.
    fn emit_bare(&mut self, op: Opcode);

    /// Emit a label definition.
    fn emit_label(&mut self, name: &str);

    /// Emit a comment line.
    fn emit_comment(&mut self, text: impl Into<String>);

    /// Emit `LDA CONST_0`.
    fn emit_load_zero(&mut self);
}

impl EmitHelpers for CodeGenerator {
    fn emit(&mut self, op: Opcode, operand: &str) {
        self.code
            .push(AsmLine::Instruction(op, Some(operand.to_string())));
    }

    fn emit_bare(&mut self, op: Opcode) {
        self.code.push(AsmLine::Instruction(op, None));
    }

    fn emit_label(&mut self, name: &str) {
        self.code.push(AsmLine::Label(name.to_string()));
    }

    fn emit_comment(&mut self, text: impl Into<String>) {
        self.code.push(AsmLine::Comment(text.into()));
    }

    fn emit_load_zero(&mut self) {
        let zero = self.symbols.constant(0);
        self.emit(Opcode::Lda, &zero);
    }
}
