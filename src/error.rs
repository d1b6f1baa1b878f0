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

//! Error types for the Neander toolchain.
//!
//! This module defines the diagnostics shared by the compiler and the
//! assembler: fatal [`CompileError`]s and non-fatal [`Warning`]s, both
//! carrying a [`Span`] into the text they were produced from.

use std::ops::Range;
use thiserror::Error;

use crate::executor::ExecError;

/// A source span representing a range in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Get the length of this span.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

/// Error codes for fatal diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Lexical errors (E0xx)
    IntegerTooLarge,

    // Syntax errors (E1xx)
    UnexpectedEndOfFile,
    ExpectedKeyword,
    ExpectedExpression,
    ExpectedProgramName,
    ExpectedIdentifier,
    ExpectedAssign,
    ExpectedColon,
    ExpectedCloseParen,
    ExpectedResult,

    // Semantic errors (E2xx)
    ReservedName,
    UnknownMultiplier,

    // Assembler errors (E3xx)
    MissingOperand,
    ImageOverflow,
    InvalidDataValue,
    ExpectedDataDirective,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::IntegerTooLarge => "E020",

            ErrorCode::UnexpectedEndOfFile => "E101",
            ErrorCode::ExpectedKeyword => "E102",
            ErrorCode::ExpectedExpression => "E103",
            ErrorCode::ExpectedProgramName => "E104",
            ErrorCode::ExpectedIdentifier => "E105",
            ErrorCode::ExpectedAssign => "E106",
            ErrorCode::ExpectedColon => "E107",
            ErrorCode::ExpectedCloseParen => "E108",
            ErrorCode::ExpectedResult => "E110",

            ErrorCode::ReservedName => "E200",
            ErrorCode::UnknownMultiplier => "E201",

            ErrorCode::MissingOperand => "E300",
            ErrorCode::ImageOverflow => "E301",
            ErrorCode::InvalidDataValue => "E302",
            ErrorCode::ExpectedDataDirective => "E303",
        }
    }
}

/// A fatal diagnostic with source location.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct CompileError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source span where the error occurred.
    pub span: Span,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CompileError {
    /// Create a new compile error.
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
            hint: None,
        }
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for compiler and assembler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Warning codes for non-fatal diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCode {
    // Code generation (W2xx)
    DivisionByZero,
    UnknownMultiplier,

    // Assembler (W3xx)
    UnknownMnemonic,
    ImplicitSymbol,
    DuplicateDefinition,
    OutsideSection,
}

impl WarningCode {
    /// Get the numeric code for this warning.
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::DivisionByZero => "W200",
            WarningCode::UnknownMultiplier => "W201",
            WarningCode::UnknownMnemonic => "W300",
            WarningCode::ImplicitSymbol => "W301",
            WarningCode::DuplicateDefinition => "W302",
            WarningCode::OutsideSection => "W303",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A non-fatal diagnostic. Warnings never stop a stage; the artifact is
/// still produced with the documented fallback behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// The warning code.
    pub code: WarningCode,
    /// The warning message.
    pub message: String,
    /// The source span the warning refers to.
    pub span: Span,
}

impl Warning {
    /// Create a new warning.
    pub fn new(code: WarningCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            code,
            message: message.into(),
            span,
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// Any failure of the full source-to-result pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Source location with line and column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// The content of the line.
    pub line_content: String,
}

impl SourceLocation {
    /// Calculate line and column from a byte offset in source code.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];

        let line = before.chars().filter(|&c| c == '\n').count() + 1;

        let last_newline = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[last_newline..].chars().count() + 1;

        let line_end = source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(source.len());
        let line_content = source[last_newline..line_end].trim_end_matches('\r').to_string();

        Self {
            line,
            column,
            line_content,
        }
    }
}

/// Render the location, excerpt and underline shared by errors and warnings.
fn format_context(
    output: &mut String,
    source: &str,
    span: Span,
    filename: Option<&str>,
) -> usize {
    let loc = SourceLocation::from_offset(source, span.start);
    let filename = filename.unwrap_or("<input>");

    output.push_str(&format!("  --> {}:{}:{}\n", filename, loc.line, loc.column));

    let line_num_width = loc.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        loc.line,
        loc.line_content,
        width = line_num_width
    ));

    let underline_start = loc.column - 1;
    let underline_len = span
        .len()
        .max(1)
        .min(loc.line_content.len().saturating_sub(underline_start).max(1));
    output.push_str(&format!(
        "{:>width$} | {:>start$}{}\n",
        "",
        "",
        "^".repeat(underline_len),
        width = line_num_width,
        start = underline_start
    ));

    line_num_width
}

/// Format an error with source context.
pub fn format_error(error: &CompileError, source: &str, filename: Option<&str>) -> String {
    let mut output = format!("error[{}]: {}\n", error.code_str(), error.message);
    let width = format_context(&mut output, source, error.span, filename);

    if let Some(hint) = &error.hint {
        output.push_str(&format!("{:>width$} = hint: {}\n", "", hint, width = width));
    }

    output
}

/// Format a warning with source context.
pub fn format_warning(warning: &Warning, source: &str, filename: Option<&str>) -> String {
    let mut output = format!("warning[{}]: {}\n", warning.code, warning.message);
    format_context(&mut output, source, warning.span, filename);
    output
}
