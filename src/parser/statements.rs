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

//! Program and statement parsing.
//!
//! ```text
//! program    := 'PROGRAMA' name ':' 'INICIO' assignment* 'RES' '=' expr 'FIM'
//! assignment := name '=' expr
//! ```

use super::expressions::ExpressionParser;
use super::helpers::ParserHelpers;
use super::Parser;
use crate::ast::{Command, Program};
use crate::error::{CompileError, ErrorCode};
use crate::lexer::Token;

/// Extension trait for program and statement parsing.
pub trait StatementParser {
    /// Parse a complete program.
    fn parse_program(&mut self) -> Result<Program, CompileError>;

    /// Parse the program name after `PROGRAMA`.
    fn parse_title(&mut self) -> Result<String, CompileError>;

    /// Parse one assignment.
    fn parse_assignment(&mut self) -> Result<Command, CompileError>;
}

impl<'a> StatementParser for Parser<'a> {
    fn parse_program(&mut self) -> Result<Program, CompileError> {
        self.expect(
            &Token::Programa,
            ErrorCode::ExpectedKeyword,
            "Expected 'PROGRAMA' at the start of the program",
        )?;
        let title = self.parse_title()?;
        self.expect(
            &Token::Colon,
            ErrorCode::ExpectedColon,
            "Expected ':' after the program name",
        )?;
        self.expect(
            &Token::Inicio,
            ErrorCode::ExpectedKeyword,
            "Expected 'INICIO' after the program header",
        )?;

        let mut commands = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Res) => break,
                Some(Token::Fim) | None => {
                    return Err(self
                        .error(
                            ErrorCode::ExpectedResult,
                            "Expected 'RES' before the end of the program",
                        )
                        .with_hint("Add a final line like `RES = X` before `FIM`"));
                }
                Some(_) => commands.push(self.parse_assignment()?),
            }
        }

        self.expect(&Token::Res, ErrorCode::ExpectedResult, "Expected 'RES'")?;
        self.expect(
            &Token::Equal,
            ErrorCode::ExpectedAssign,
            "Expected '=' after 'RES'",
        )?;
        let output = self.parse_expression()?;
        self.expect(
            &Token::Fim,
            ErrorCode::ExpectedKeyword,
            "Expected 'FIM' to end the program",
        )?;

        Ok(Program {
            title,
            commands,
            output,
        })
    }

    fn parse_title(&mut self) -> Result<String, CompileError> {
        match self.peek() {
            Some(Token::QuotedName(_)) | Some(Token::Identifier(_)) => match self.advance() {
                Some((Token::QuotedName(name), _)) | Some((Token::Identifier(name), _)) => {
                    Ok(name)
                }
                _ => Err(self.error(ErrorCode::ExpectedProgramName, "Expected program name")),
            },
            _ => Err(self
                .error(
                    ErrorCode::ExpectedProgramName,
                    format!(
                        "Expected program name after 'PROGRAMA', found {}",
                        self.describe_current()
                    ),
                )
                .with_hint("Write the name in quotes, e.g. `PROGRAMA \"Soma\":`")),
        }
    }

    fn parse_assignment(&mut self) -> Result<Command, CompileError> {
        let (token, target_span) = self.expect(
            &Token::Identifier(String::new()),
            ErrorCode::ExpectedIdentifier,
            "Expected a variable name",
        )?;
        let variable = match token {
            Token::Identifier(name) => name,
            _ => return Err(self.error(ErrorCode::ExpectedIdentifier, "Expected a variable name")),
        };

        self.expect(
            &Token::Equal,
            ErrorCode::ExpectedAssign,
            &format!("Expected '=' after '{}'", variable),
        )?;
        let expr = self.parse_expression()?;
        let span = target_span.merge(&expr.span);

        Ok(Command::new(variable, expr, span))
    }
}
