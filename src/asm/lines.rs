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

//! Splitting assembly text into statements.
//!
//! The text is line oriented. A `;` starts a comment that runs to the end
//! of the line. How a line is read depends on the section it appears in:
//! inside `.DATA` the first word is a cell name, inside `.CODE` it is a
//! mnemonic or a label.

use crate::error::{CompileError, ErrorCode, Span};

/// The section a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Before any section directive.
    None,
    /// After `.DATA`.
    Data,
    /// After `.CODE`.
    Code,
}

/// The initial value of a data cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataValue {
    /// An explicit value, already reduced modulo 256.
    Byte(u8),
    /// `?`, stored as zero.
    Uninitialized,
}

impl DataValue {
    /// The byte written to memory.
    pub fn byte(&self) -> u8 {
        match self {
            DataValue::Byte(value) => *value,
            DataValue::Uninitialized => 0,
        }
    }
}

/// One meaningful line of assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `NAME DB value` inside `.DATA`.
    Data {
        name: String,
        value: DataValue,
        span: Span,
    },
    /// `NAME:` inside `.CODE`.
    Label { name: String, span: Span },
    /// A mnemonic with its optional operand inside `.CODE`.
    Instruction {
        mnemonic: String,
        mnemonic_span: Span,
        operand: Option<(String, Span)>,
    },
    /// A non-empty line before any section directive.
    Stray { span: Span },
}

/// Split a line into words with their absolute spans.
fn words(line: &str, base: usize) -> Vec<(&str, Span)> {
    let mut result = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                result.push((&line[s..i], Span::new(base + s, base + i)));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        result.push((&line[s..], Span::new(base + s, base + line.len())));
    }
    result
}

/// Parse a data value: `?`, or a decimal integer reduced modulo 256.
pub fn parse_data_value(text: &str) -> Option<DataValue> {
    if text == "?" {
        return Some(DataValue::Uninitialized);
    }
    let value: i64 = text.parse().ok()?;
    Some(DataValue::Byte(value.rem_euclid(256) as u8))
}

/// Parse assembly text into statements, tracking the current section.
///
/// `.ORG` lines and comments produce nothing.
pub fn parse_statements(source: &str) -> Result<Vec<Statement>, CompileError> {
    let mut statements = Vec::new();
    let mut section = Section::None;
    let mut offset = 0;

    for raw in source.split_inclusive('\n') {
        let base = offset;
        offset += raw.len();

        let content = raw.split(';').next().unwrap_or("");
        let words = words(content, base);
        let Some(&(first, first_span)) = words.first() else {
            continue;
        };

        if first.eq_ignore_ascii_case(".DATA") {
            section = Section::Data;
            continue;
        }
        if first.eq_ignore_ascii_case(".CODE") {
            section = Section::Code;
            continue;
        }
        if first.eq_ignore_ascii_case(".ORG") {
            continue;
        }

        let line_span = first_span.merge(&words[words.len() - 1].1);
        match section {
            Section::None => statements.push(Statement::Stray { span: line_span }),
            Section::Data => statements.push(parse_data_line(&words, line_span)?),
            Section::Code => parse_code_line(&words, &mut statements),
        }
    }

    Ok(statements)
}

fn parse_data_line(words: &[(&str, Span)], line_span: Span) -> Result<Statement, CompileError> {
    let (name, _) = words[0];
    match words.get(1) {
        Some((directive, _)) if directive.eq_ignore_ascii_case("DB") => {}
        _ => {
            return Err(CompileError::new(
                ErrorCode::ExpectedDataDirective,
                format!("Expected 'DB' after data cell '{}'", name),
                line_span,
            )
            .with_hint("Data cells look like `NAME DB 5` or `NAME DB ?`"));
        }
    }

    let value = match words.get(2) {
        None => DataValue::Uninitialized,
        Some(&(text, span)) => parse_data_value(text).ok_or_else(|| {
            CompileError::new(
                ErrorCode::InvalidDataValue,
                format!("Invalid value '{}' for data cell '{}'", text, name),
                span,
            )
        })?,
    };

    Ok(Statement::Data {
        name: name.to_string(),
        value,
        span: line_span,
    })
}

fn parse_code_line(words: &[(&str, Span)], statements: &mut Vec<Statement>) {
    let mut rest = words;
    if let Some(&(first, span)) = rest.first() {
        if let Some(name) = first.strip_suffix(':') {
            statements.push(Statement::Label {
                name: name.to_string(),
                span,
            });
            rest = &rest[1..];
        }
    }

    if let Some(&(mnemonic, mnemonic_span)) = rest.first() {
        statements.push(Statement::Instruction {
            mnemonic: mnemonic.to_string(),
            mnemonic_span,
            operand: rest.get(1).map(|&(text, span)| (text.to_string(), span)),
        });
    }
}
