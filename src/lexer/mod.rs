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

//! Lexer module for the source language.
//!
//! This module tokenizes source code into a stream of tokens.
//! It handles:
//! - The keywords `PROGRAMA`, `INICIO`, `RES` and `FIM`
//! - Identifiers and quoted program names
//! - Decimal integer literals
//! - Operators and punctuation
//!
//! Whitespace and any character outside the language are skipped.

mod tokens;

pub use tokens::{LexError, Token};

use logos::Logos;

use crate::error::{CompileError, ErrorCode, Span};

/// Tokenize source code into a vector of tokens with spans.
///
/// The only lexical error is an integer literal too large for 32 bits.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, CompileError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(LexError::Unrecognized) => {}
            Err(LexError::IntegerTooLarge) => {
                return Err(CompileError::new(
                    ErrorCode::IntegerTooLarge,
                    format!("Integer literal '{}' is too large", lexer.slice()),
                    span,
                )
                .with_hint("Values are reduced modulo 256, so small literals suffice"));
            }
        }
    }

    Ok(tokens)
}
