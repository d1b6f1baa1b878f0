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

//! Token definitions for the source language.

use logos::{Lexer, Logos};

/// Reasons a single lexeme could not become a token.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexError {
    /// A character outside the language. Skipped by [`super::tokenize`].
    #[default]
    Unrecognized,
    /// A decimal literal that does not fit in 32 bits.
    IntegerTooLarge,
}

fn parse_integer(lex: &mut Lexer<Token>) -> Result<u32, LexError> {
    lex.slice().parse().map_err(|_| LexError::IntegerTooLarge)
}

fn unquote(lex: &mut Lexer<Token>) -> String {
    let slice = lex.slice();
    let inner = &slice[1..];
    inner.strip_suffix('"').unwrap_or(inner).to_string()
}

/// A token of the source language.
///
/// Keywords are case-sensitive and only match as whole words: `RESULT` is an
/// identifier, not `RES` followed by `ULT`.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Keywords
    /// `PROGRAMA` - program header.
    #[token("PROGRAMA")]
    Programa,
    /// `INICIO` - start of the body.
    #[token("INICIO")]
    Inicio,
    /// `RES` - the result expression.
    #[token("RES")]
    Res,
    /// `FIM` - end of the program.
    #[token("FIM")]
    Fim,

    // Literals
    /// Decimal integer literal.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(u32),
    /// Identifier (variable name).
    #[regex(r"[A-Za-z][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Quoted program name, without the quotes. An unterminated quote runs
    /// to the end of the input.
    #[regex(r#""[^"]*"?"#, unquote)]
    QuotedName(String),

    // Operators
    /// `=` - assignment.
    #[token("=")]
    Equal,
    /// `+` - addition.
    #[token("+")]
    Plus,
    /// `-` - subtraction.
    #[token("-")]
    Minus,
    /// `*` - multiplication.
    #[token("*")]
    Star,
    /// `/` - division.
    #[token("/")]
    Slash,

    // Punctuation
    /// `(` - left parenthesis.
    #[token("(")]
    LeftParen,
    /// `)` - right parenthesis.
    #[token(")")]
    RightParen,
    /// `:` - colon after the program name.
    #[token(":")]
    Colon,
}

impl Token {
    /// Check if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(self, Token::Programa | Token::Inicio | Token::Res | Token::Fim)
    }

    /// Check if this token is an additive operator.
    pub fn is_additive(&self) -> bool {
        matches!(self, Token::Plus | Token::Minus)
    }

    /// Check if this token is a multiplicative operator.
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, Token::Star | Token::Slash)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Programa => write!(f, "PROGRAMA"),
            Token::Inicio => write!(f, "INICIO"),
            Token::Res => write!(f, "RES"),
            Token::Fim => write!(f, "FIM"),
            Token::Integer(n) => write!(f, "{}", n),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::QuotedName(name) => write!(f, "\"{}\"", name),
            Token::Equal => write!(f, "="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Colon => write!(f, ":"),
        }
    }
}
