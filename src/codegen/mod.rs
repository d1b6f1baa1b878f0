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

//! Code generation module.
//!
//! This module turns a parsed program into Neander assembly text.
//! It handles:
//! - Constant folding of literal operations
//! - Lowering of `+` and `-` by operand shape
//! - Multiplication by compile-time unrolling
//! - Division as a run-time subtraction loop
//! - Declaration of every referenced cell in the `.DATA` section
//!
//! # Module Structure
//!
//! - `assignments` - Assignment lowering and name checks (AssignmentEmitter trait)
//! - `binary_ops` - Operator lowering (BinaryOpGenerator trait)
//! - `constants` - Generated cell and label names
//! - `emit` - Code buffer helpers (EmitHelpers trait)
//! - `expressions` - Expression lowering (ExpressionGenerator trait)
//! - `labels` - Fresh temporaries and labels (LabelManager trait)
//! - `symbols` - The insertion-ordered symbol table

pub mod assignments;
pub mod binary_ops;
pub mod constants;
pub mod emit;
pub mod expressions;
pub mod labels;
pub mod symbols;

use assignments::AssignmentEmitter;
use emit::{AsmLine, EmitHelpers};
use expressions::ExpressionGenerator;

pub use symbols::{Symbol, SymbolKind, SymbolTable};

use crate::ast::Program;
use crate::error::{CompileError, Warning};
use crate::isa::Opcode;

/// Options controlling code generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Treat a multiplication with no compile-time factor as an error
    /// instead of a warning.
    pub strict: bool,
}

/// The result of a successful compilation.
#[derive(Debug, Clone)]
pub struct Compiled {
    /// The generated assembly text.
    pub assembly: String,
    /// Every declared cell, in `.DATA` order.
    pub symbols: SymbolTable,
    /// Non-fatal diagnostics.
    pub warnings: Vec<Warning>,
}

/// The code generator state for one compilation.
pub struct CodeGenerator {
    /// The generated `.CODE` lines.
    code: Vec<AsmLine>,
    /// Declared data cells.
    symbols: SymbolTable,
    /// Next temporary number.
    temp_counter: usize,
    /// Next division label number.
    label_counter: usize,
    /// Collected warnings.
    warnings: Vec<Warning>,
    /// Generation options.
    options: CompileOptions,
}

impl CodeGenerator {
    /// Create a new code generator.
    pub fn new(options: CompileOptions) -> Self {
        Self {
            code: Vec::new(),
            symbols: SymbolTable::new(),
            temp_counter: 0,
            label_counter: 0,
            warnings: Vec::new(),
            options,
        }
    }

    /// Generate assembly for a complete program.
    pub fn generate(mut self, program: &Program) -> Result<Compiled, CompileError> {
        for command in &program.commands {
            self.generate_assignment(command)?;
        }

        self.check_names(&program.output)?;
        self.emit_comment(format!("Result: {}", program.output));
        self.generate_expr(&program.output)?;
        self.emit(Opcode::Sta, constants::RESULT_CELL);
        self.emit_bare(Opcode::Hlt);

        let assembly = self.render(&program.title);
        Ok(Compiled {
            assembly,
            symbols: self.symbols,
            warnings: self.warnings,
        })
    }

    /// The generated code lines.
    pub fn code(&self) -> &[AsmLine] {
        &self.code
    }

    /// Render the data and code sections as assembly text.
    fn render(&self, title: &str) -> String {
        let mut output = String::new();
        output.push_str("; Assembly code generated by the Neander compiler\n");
        output.push_str(&format!("; Program: {}\n\n", title));

        output.push_str(".DATA\n");
        for symbol in self.symbols.iter() {
            output.push_str(&symbol.declaration());
            output.push('\n');
        }

        output.push_str("\n.CODE\n.ORG 0\n");
        for line in &self.code {
            output.push_str(&line.to_string());
            output.push('\n');
        }
        output
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

/// Generate assembly for a program.
pub fn generate(program: &Program, options: &CompileOptions) -> Result<Compiled, CompileError> {
    CodeGenerator::new(*options).generate(program)
}
