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

//! Expression parsing for the parser.
//!
//! Two precedence levels, both left-associative:
//! - `+` and `-` (additive)
//! - `*` and `/` (multiplicative)
//!
//! Factors are literals, identifiers and parenthesized expressions. There
//! is no unary minus.

use super::helpers::ParserHelpers;
use super::Parser;
use crate::ast::{BinaryOp, Expr};
use crate::error::{CompileError, ErrorCode};
use crate::lexer::Token;

/// Extension trait for expression parsing.
pub trait ExpressionParser {
    /// Parse an expression.
    fn parse_expression(&mut self) -> Result<Expr, CompileError>;

    /// Try to parse an additive operator.
    fn try_parse_additive_op(&mut self) -> Option<BinaryOp>;

    /// Parse a multiplicative expression.
    fn parse_term(&mut self) -> Result<Expr, CompileError>;

    /// Try to parse a multiplicative operator.
    fn try_parse_multiplicative_op(&mut self) -> Option<BinaryOp>;

    /// Parse a factor.
    fn parse_factor(&mut self) -> Result<Expr, CompileError>;
}

impl<'a> ExpressionParser for Parser<'a> {
    fn parse_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_term()?;

        while let Some(op) = self.try_parse_additive_op() {
            let right = self.parse_term()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    fn try_parse_additive_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek()? {
            Token::Plus => BinaryOp::Add,
            Token::Minus => BinaryOp::Sub,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_term(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.parse_factor()?;

        while let Some(op) = self.try_parse_multiplicative_op() {
            let right = self.parse_factor()?;
            left = Expr::binary(left, op, right);
        }

        Ok(left)
    }

    fn try_parse_multiplicative_op(&mut self) -> Option<BinaryOp> {
        let op = match self.peek()? {
            Token::Star => BinaryOp::Mul,
            Token::Slash => BinaryOp::Div,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_factor(&mut self) -> Result<Expr, CompileError> {
        match self.peek() {
            Some(Token::Integer(_)) | Some(Token::Identifier(_)) => match self.advance() {
                Some((Token::Integer(value), span)) => Ok(Expr::literal(value, span)),
                Some((Token::Identifier(name), span)) => Ok(Expr::identifier(name, span)),
                _ => Err(self.error(ErrorCode::ExpectedExpression, "Expected expression")),
            },
            Some(Token::LeftParen) => {
                let (_, open) = self.expect(
                    &Token::LeftParen,
                    ErrorCode::ExpectedExpression,
                    "Expected '('",
                )?;
                let mut inner = self.parse_expression()?;
                let (_, close) = self.expect(
                    &Token::RightParen,
                    ErrorCode::ExpectedCloseParen,
                    "Expected ')' after expression",
                )?;
                inner.span = open.merge(&close);
                Ok(inner)
            }
            Some(_) => Err(self.error(
                ErrorCode::ExpectedExpression,
                format!("Expected expression, found {}", self.describe_current()),
            )),
            None => Err(self
                .error(
                    ErrorCode::UnexpectedEndOfFile,
                    "Unexpected end of file, expected expression",
                )
                .with_hint("Every program ends with `RES = <expression>` and `FIM`")),
        }
    }
}
