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

//! Assembler tests against generated and hand-written assembly.

use neander::asm::{AsmSymbolKind, Assembled};
use neander::executor::{self, RunOptions};
use neander::isa::{effective_address, Opcode, DATA_START};
use neander::{assemble, compile, AssemblerOptions, LabelPolicy, WarningCode};
use pretty_assertions::assert_eq;

fn assemble_default(source: &str) -> Assembled {
    assemble(source, &AssemblerOptions::default()).unwrap()
}

fn compiled_division() -> String {
    compile(include_str!("fixtures/valid/division.lpn"))
        .unwrap()
        .assembly
}

/// Opcode and decoded target of the record at `address`.
fn record(assembled: &Assembled, address: usize) -> (u8, usize) {
    let bytes = assembled.image.as_bytes();
    (bytes[address], effective_address(bytes[address + 2]))
}

// ============================================================================
// Label Regression Tests
// ============================================================================

/// Division loop labels must resolve into the code region, not to data cells.
#[test]
fn test_division_labels_branch_into_code() {
    let assembled = assemble_default(&compiled_division());
    assert!(assembled.warnings.is_empty(), "{:?}", assembled.warnings);

    let loop_label = assembled.symbols.get("DIV_LOOP_0").unwrap();
    let done_label = assembled.symbols.get("DIV_DONE_0").unwrap();
    assert_eq!(loop_label.kind, AsmSymbolKind::Label);
    assert_eq!(loop_label.address, 0x24);
    assert_eq!(done_label.address, 0x44);

    let bytes = assembled.image.as_bytes();
    let branches: Vec<_> = (4..DATA_START)
        .step_by(4)
        .filter(|&address| {
            bytes[address] == u8::from(Opcode::Jmp) || bytes[address] == u8::from(Opcode::Jmn)
        })
        .map(|address| record(&assembled, address).1)
        .collect();
    assert_eq!(branches, vec![0x44, 0x24]);
    assert!(branches.iter().all(|&target| target < DATA_START));
}

#[test]
fn test_forward_and_backward_labels() {
    let source = "\
.DATA
N DB 3
ONE DB 1
.CODE
LOOP: LDA N
JMZ END
SUB ONE
STA N
JMP LOOP
END:
HLT
";
    let assembled = assemble_default(source);
    assert_eq!(record(&assembled, 0x08), (u8::from(Opcode::Jmz), 0x18));
    assert_eq!(record(&assembled, 0x14), (u8::from(Opcode::Jmp), 0x04));

    let execution = executor::execute_image(&assembled.image, &RunOptions::with_limit(1_000)).unwrap();
    assert_eq!(execution.machine.acc(), 0);
    assert_eq!(execution.machine.memory()[0x100], 0);
}

#[test]
fn test_legacy_labels_become_implicit_cells() {
    let options = AssemblerOptions {
        labels: LabelPolicy::Ignore,
    };
    let assembled = assemble(&compiled_division(), &options).unwrap();

    let implicit: Vec<_> = assembled
        .warnings
        .iter()
        .filter(|w| w.code == WarningCode::ImplicitSymbol)
        .collect();
    assert_eq!(implicit.len(), 2);

    let done_label = assembled.symbols.get("DIV_DONE_0").unwrap();
    assert_eq!(done_label.kind, AsmSymbolKind::Implicit);
    assert!(done_label.address as usize >= DATA_START);
}

// ============================================================================
// Data Section Tests
// ============================================================================

#[test]
fn test_data_layout_and_values() {
    let assembled = assemble_default(".DATA\nA DB 5\nB DB ?\nC DB 300\nD DB -1\n.CODE\nHLT\n");
    let bytes = assembled.image.as_bytes();
    assert_eq!(&bytes[0x100..0x108], &[5, 0, 0, 0, 44, 0, 255, 0]);
    let addresses: Vec<_> = assembled.symbols.iter().map(|s| s.address).collect();
    assert_eq!(addresses, vec![0x100, 0x102, 0x104, 0x106]);
}

#[test]
fn test_duplicate_data_keeps_first_binding() {
    let assembled = assemble_default(".DATA\nA DB 1\nA DB 2\n.CODE\nLDA A\nHLT\n");
    assert_eq!(assembled.warnings.len(), 1);
    assert_eq!(assembled.warnings[0].code, WarningCode::DuplicateDefinition);
    assert_eq!(assembled.symbols.get("A").map(|s| s.address), Some(0x100));
    // the second value still occupies the next slot
    assert_eq!(assembled.image.as_bytes()[0x102], 2);
    assert_eq!(record(&assembled, 4).1, 0x100);
}

#[test]
fn test_undeclared_operand_is_implicit_cell() {
    let assembled = assemble_default(".DATA\nA DB 1\n.CODE\nLDA A\nSTA B\n");
    assert_eq!(assembled.warnings.len(), 1);
    assert_eq!(assembled.warnings[0].code, WarningCode::ImplicitSymbol);
    assert_eq!(assembled.symbols.get("B").map(|s| s.address), Some(0x102));
}

// ============================================================================
// Code Section Tests
// ============================================================================

#[test]
fn test_halt_is_appended() {
    let assembled = assemble_default(".CODE\nNOP\n");
    assert_eq!(assembled.instructions, 2);
    assert_eq!(assembled.image.as_bytes()[8], u8::from(Opcode::Hlt));

    let assembled = assemble_default(".CODE\nHLT\n");
    assert_eq!(assembled.instructions, 1);
}

#[test]
fn test_mnemonics_are_case_insensitive() {
    let upper = assemble_default(".DATA\nX DB 1\n.CODE\nLDA X\nNOT\nHLT\n");
    let lower = assemble_default(".data\nX DB 1\n.code\nlda X\nnot\nhlt\n");
    assert_eq!(upper.image, lower.image);
}

#[test]
fn test_unknown_mnemonic_is_skipped() {
    let assembled = assemble_default(".CODE\nHALT\nHLT\n");
    assert_eq!(assembled.warnings.len(), 1);
    assert_eq!(assembled.warnings[0].code, WarningCode::UnknownMnemonic);
    assert_eq!(assembled.instructions, 1);
}

#[test]
fn test_lines_outside_sections_warn() {
    let assembled = assemble_default("LDA X\n.CODE\nHLT\n");
    assert_eq!(assembled.warnings.len(), 1);
    assert_eq!(assembled.warnings[0].code, WarningCode::OutsideSection);
}

#[test]
fn test_listing() {
    let assembled = assemble_default(".DATA\nA DB 1\n.CODE\nSTART: LDA A\nSTA B\nJMP START\n");
    assert_eq!(
        assembled.listing(),
        "\
ADDR    KIND      NAME
0x0100  data      A
0x0004  label     START
0x0102  implicit  B
"
    );
}
