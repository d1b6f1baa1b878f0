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

//! Snapshot tests for the Neander toolchain.
//!
//! These tests use the `insta` crate to capture and verify output
//! from the individual pipeline stages.

use neander::isa::hex_dump;
use neander::{error::format_error, lexer, parser, AssemblerOptions, Span, Token};

// ============================================================================
// Lexer Snapshot Tests
// ============================================================================

/// Format tokens for snapshot comparison.
fn format_tokens(tokens: &[(Token, Span)]) -> String {
    let mut output = String::new();
    for (token, span) in tokens {
        output.push_str(&format!("{:?} @ {}..{}\n", token, span.start, span.end));
    }
    output
}

#[test]
fn test_lexer_snapshot_sum() {
    let source = include_str!("fixtures/valid/sum.lpn");
    let tokens = lexer::tokenize(source).unwrap();
    insta::assert_snapshot!(format_tokens(&tokens), @r#"
Programa @ 0..8
QuotedName("Soma") @ 9..15
Colon @ 15..16
Inicio @ 17..23
Identifier("A") @ 24..25
Equal @ 26..27
Integer(6) @ 28..29
Res @ 30..33
Equal @ 34..35
Identifier("A") @ 36..37
Plus @ 38..39
Integer(3) @ 40..41
Fim @ 42..45
"#);
}

// ============================================================================
// AST Snapshot Tests
// ============================================================================

#[test]
fn test_ast_snapshot_mixed() {
    let source = include_str!("fixtures/valid/mixed.lpn");
    let tokens = lexer::tokenize(source).unwrap();
    let program = parser::parse(&tokens).unwrap();
    insta::assert_snapshot!(program.to_string(), @r#"
PROGRAMA "Produto":
INICIO
    N = 4
    M = ((N * 3) + 2)
    RES = ((M - 2) / N)
FIM
"#);
}

// ============================================================================
// Code Generation Snapshot Tests
// ============================================================================

#[test]
fn test_assembly_snapshot_division() {
    let compiled = neander::compile(include_str!("fixtures/valid/division.lpn")).unwrap();
    insta::assert_snapshot!(compiled.assembly, @r"
; Assembly code generated by the Neander compiler
; Program: Divisao

.DATA
CONST_0 DB 0
CONST_1 DB 1
RESULT DB ?
X DB ?
CONST_9 DB 9
TEMP_0 DB ?
TEMP_1 DB ?
TEMP_2 DB ?
CONST_2 DB 2

.CODE
.ORG 0
; Assignment: X = 9
LDA CONST_9
STA X
; Result: (X / 2)
LDA CONST_0
STA TEMP_0
LDA X
STA TEMP_1
LDA CONST_2
STA TEMP_2
DIV_LOOP_0:
LDA TEMP_1
SUB TEMP_2
JMN DIV_DONE_0
STA TEMP_1
LDA TEMP_0
ADD CONST_1
STA TEMP_0
JMP DIV_LOOP_0
DIV_DONE_0:
LDA TEMP_0
STA RESULT
HLT
");
}

// ============================================================================
// Assembler Snapshot Tests
// ============================================================================

#[test]
fn test_image_snapshot_sum() {
    let compiled = neander::compile(include_str!("fixtures/valid/sum.lpn")).unwrap();
    let assembled = neander::assemble(&compiled.assembly, &AssemblerOptions::default()).unwrap();
    let bytes = assembled.image.as_bytes();
    let dump = format!(
        "{}{}",
        hex_dump(&bytes[..0x20], 0),
        hex_dump(&bytes[0x100..0x110], 0x100)
    );
    insta::assert_snapshot!(dump, @r"
0000: 03 4E 44 52 20 00 82 00 10 00 81 00 20 00 81 00
0010: 30 00 83 00 10 00 80 00 F0 00 00 00 00 00 00 00
0100: 00 00 01 00 00 00 00 00 06 00 03 00 00 00 00 00
");
}

#[test]
fn test_listing_snapshot_division() {
    let compiled = neander::compile(include_str!("fixtures/valid/division.lpn")).unwrap();
    let assembled = neander::assemble(&compiled.assembly, &AssemblerOptions::default()).unwrap();
    insta::assert_snapshot!(assembled.listing(), @r"
ADDR    KIND      NAME
0x0100  data      CONST_0
0x0102  data      CONST_1
0x0104  data      RESULT
0x0106  data      X
0x0108  data      CONST_9
0x010A  data      TEMP_0
0x010C  data      TEMP_1
0x010E  data      TEMP_2
0x0110  data      CONST_2
0x0024  label     DIV_LOOP_0
0x0044  label     DIV_DONE_0
");
}

// ============================================================================
// Diagnostic Snapshot Tests
// ============================================================================

#[test]
fn test_error_snapshot_unclosed_paren() {
    let source = "PROGRAMA \"T\":\nINICIO\nRES = (1 + 2\nFIM\n";
    let tokens = lexer::tokenize(source).unwrap();
    let err = parser::parse(&tokens).unwrap_err();
    insta::assert_snapshot!(format_error(&err, source, Some("prog.lpn")), @r"
error[E108]: Expected ')' after expression, found 'FIM'
  --> prog.lpn:4:1
  |
4 | FIM
  | ^^^
");
}
