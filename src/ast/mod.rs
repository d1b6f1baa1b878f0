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

//! Abstract Syntax Tree (AST) definitions.
//!
//! A program is a title, an ordered list of assignments and one final
//! result expression. Every node owns its children.

mod expr;

pub use expr::*;

use crate::error::Span;

/// A complete parsed program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The program name from the header.
    pub title: String,
    /// Assignments in source order.
    pub commands: Vec<Command>,
    /// The expression after `RES =`.
    pub output: Expr,
}

/// An assignment `name = expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    /// The assigned variable.
    pub variable: String,
    /// The assigned value.
    pub expr: Expr,
    /// The source span of the whole assignment.
    pub span: Span,
}

impl Command {
    /// Create a new assignment.
    pub fn new(variable: impl Into<String>, expr: Expr, span: Span) -> Self {
        Self {
            variable: variable.into(),
            expr,
            span,
        }
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PROGRAMA \"{}\":", self.title)?;
        writeln!(f, "INICIO")?;
        for command in &self.commands {
            writeln!(f, "    {} = {}", command.variable, command.expr)?;
        }
        writeln!(f, "    RES = {}", self.output)?;
        write!(f, "FIM")
    }
}
