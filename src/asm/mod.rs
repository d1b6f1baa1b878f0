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

//! Assembler module.
//!
//! Translates assembly text into a 512-byte memory image:
//! - `.DATA` cells are laid out in 2-byte slots from `0x100`
//! - `.CODE` instructions become 4-byte records from byte 4
//! - operands are resolved by name; unknown names become implicit data cells
//! - a `HLT` is appended when the code does not end with one
//!
//! # Module Structure
//!
//! - `lines` - Section-aware line parsing
//! - `symbols` - The symbol table and data cursor

pub mod lines;
pub mod symbols;

use indexmap::IndexMap;

use lines::{parse_statements, Statement};
pub use symbols::{AsmSymbol, AsmSymbolKind, AsmSymbolTable};

use crate::error::{CompileError, ErrorCode, Span, Warning, WarningCode};
use crate::isa::{encode_operand, MemoryImage, Opcode, CODE_START, INSTRUCTION_SIZE};

/// What to do with `NAME:` lines in the code section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelPolicy {
    /// Bind each label to the address of the instruction that follows it,
    /// so jumps can target it (forward references included).
    #[default]
    Bind,
    /// Skip label lines. A jump to a label then resolves to an implicit
    /// data cell, like any other unknown name.
    Ignore,
}

/// Options controlling assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// Label handling.
    pub labels: LabelPolicy,
}

/// The result of a successful assembly.
#[derive(Debug, Clone)]
pub struct Assembled {
    /// The finished memory image.
    pub image: MemoryImage,
    /// Every bound name, in binding order.
    pub symbols: AsmSymbolTable,
    /// Number of instruction records written, the appended `HLT` included.
    pub instructions: usize,
    /// Non-fatal diagnostics.
    pub warnings: Vec<Warning>,
}

impl Assembled {
    /// Render the symbol table as a listing.
    pub fn listing(&self) -> String {
        let mut output = String::from("ADDR    KIND      NAME\n");
        for symbol in self.symbols.iter() {
            output.push_str(&format!(
                "0x{:04X}  {:<8}  {}\n",
                symbol.address,
                symbol.kind.to_string(),
                symbol.name
            ));
        }
        output
    }
}

/// The assembler state for one run.
pub struct Assembler {
    options: AssemblerOptions,
    image: MemoryImage,
    symbols: AsmSymbolTable,
    /// Label addresses found by the pre-pass.
    labels: IndexMap<String, u16>,
    /// Address of the next instruction record.
    pc: usize,
    last_opcode: Option<Opcode>,
    instructions: usize,
    warnings: Vec<Warning>,
}

impl Assembler {
    /// Create a new assembler.
    pub fn new(options: AssemblerOptions) -> Self {
        Self {
            options,
            image: MemoryImage::new(),
            symbols: AsmSymbolTable::new(),
            labels: IndexMap::new(),
            pc: CODE_START,
            last_opcode: None,
            instructions: 0,
            warnings: Vec::new(),
        }
    }

    /// Assemble a complete source text.
    pub fn assemble(mut self, source: &str) -> Result<Assembled, CompileError> {
        let statements = parse_statements(source)?;

        if self.options.labels == LabelPolicy::Bind {
            self.collect_labels(&statements);
        }

        for statement in &statements {
            match statement {
                Statement::Stray { span } => self.warn(
                    WarningCode::OutsideSection,
                    "Line outside of .DATA and .CODE is ignored",
                    *span,
                ),
                Statement::Data { name, value, span } => {
                    self.define_data(name, value.byte(), *span)?
                }
                Statement::Label { name, span } => self.define_label(name, *span),
                Statement::Instruction {
                    mnemonic,
                    mnemonic_span,
                    operand,
                } => self.assemble_instruction(mnemonic, *mnemonic_span, operand.as_ref())?,
            }
        }

        if self.last_opcode != Some(Opcode::Hlt) {
            let span = Span::new(source.len(), source.len());
            self.write_instruction(Opcode::Hlt, 0, span)?;
        }

        Ok(Assembled {
            image: self.image,
            symbols: self.symbols,
            instructions: self.instructions,
            warnings: self.warnings,
        })
    }

    /// Compute the address of every label before emitting anything, so
    /// forward jumps resolve.
    fn collect_labels(&mut self, statements: &[Statement]) {
        let mut pc = CODE_START;
        for statement in statements {
            match statement {
                Statement::Label { name, .. } => {
                    self.labels.entry(name.clone()).or_insert(pc as u16);
                }
                Statement::Instruction { mnemonic, .. } if Opcode::parse(mnemonic).is_some() => {
                    pc += INSTRUCTION_SIZE;
                }
                _ => {}
            }
        }
    }

    fn warn(&mut self, code: WarningCode, message: impl Into<String>, span: Span) {
        self.warnings.push(Warning::new(code, message, span));
    }

    fn define_data(&mut self, name: &str, value: u8, span: Span) -> Result<(), CompileError> {
        let address = self.symbols.allocate_slot();
        if !self.symbols.bind(name, address, AsmSymbolKind::Data) {
            self.warn(
                WarningCode::DuplicateDefinition,
                format!("'{}' is already defined, the first definition is kept", name),
                span,
            );
        }
        if !self.image.write_slot(address as usize, value) {
            return Err(CompileError::new(
                ErrorCode::ImageOverflow,
                format!(
                    "Data cell '{}' at 0x{:04X} does not fit in the memory image",
                    name, address
                ),
                span,
            ));
        }
        Ok(())
    }

    fn define_label(&mut self, name: &str, span: Span) {
        if self.options.labels == LabelPolicy::Ignore {
            return;
        }
        let here = self.pc as u16;
        let duplicate = match self.symbols.get(name) {
            Some(existing) => existing.kind != AsmSymbolKind::Label || existing.address != here,
            None => {
                let address = self.labels.get(name).copied().unwrap_or(here);
                !self.symbols.bind(name, address, AsmSymbolKind::Label)
            }
        };
        if duplicate {
            self.warn(
                WarningCode::DuplicateDefinition,
                format!("'{}' is already defined, the first definition is kept", name),
                span,
            );
        }
    }

    /// Resolve an operand name to an address, binding it on first use.
    fn resolve(&mut self, name: &str, span: Span) -> u16 {
        if let Some(symbol) = self.symbols.get(name) {
            return symbol.address;
        }
        if let Some(&address) = self.labels.get(name) {
            self.symbols.bind(name, address, AsmSymbolKind::Label);
            return address;
        }

        let address = self.symbols.allocate_slot();
        self.symbols.bind(name, address, AsmSymbolKind::Implicit);
        self.warn(
            WarningCode::ImplicitSymbol,
            format!(
                "'{}' is not declared, allocated an implicit data cell at 0x{:04X}",
                name, address
            ),
            span,
        );
        address
    }

    fn assemble_instruction(
        &mut self,
        mnemonic: &str,
        span: Span,
        operand: Option<&(String, Span)>,
    ) -> Result<(), CompileError> {
        let Some(opcode) = Opcode::parse(mnemonic) else {
            self.warn(
                WarningCode::UnknownMnemonic,
                format!("Unknown mnemonic '{}' is skipped", mnemonic),
                span,
            );
            return Ok(());
        };

        if !opcode.takes_operand() {
            return self.write_instruction(opcode, 0, span);
        }

        let Some((name, operand_span)) = operand else {
            return Err(CompileError::new(
                ErrorCode::MissingOperand,
                format!("'{}' requires an operand", opcode),
                span,
            )
            .with_hint(format!("Write `{} NAME` with a data cell or label", opcode)));
        };

        let address = self.resolve(name, *operand_span);
        let byte = encode_operand(address).ok_or_else(|| {
            CompileError::new(
                ErrorCode::ImageOverflow,
                format!(
                    "'{}' at 0x{:04X} is outside the addressable memory",
                    name, address
                ),
                *operand_span,
            )
        })?;
        self.write_instruction(opcode, byte, span)
    }

    fn write_instruction(&mut self, opcode: Opcode, operand: u8, span: Span) -> Result<(), CompileError> {
        if !self.image.write_instruction(self.pc, opcode, operand) {
            return Err(CompileError::new(
                ErrorCode::ImageOverflow,
                format!(
                    "Instruction at 0x{:04X} does not fit in the memory image",
                    self.pc
                ),
                span,
            )
            .with_hint("The program is too long; multiplications by large factors unroll into many instructions"));
        }
        self.pc += INSTRUCTION_SIZE;
        self.last_opcode = Some(opcode);
        self.instructions += 1;
        Ok(())
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(AssemblerOptions::default())
    }
}

/// Assemble source text into a memory image.
pub fn assemble(source: &str, options: &AssemblerOptions) -> Result<Assembled, CompileError> {
    Assembler::new(*options).assemble(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::{effective_address, DATA_START};

    fn assemble_default(source: &str) -> Assembled {
        assemble(source, &AssemblerOptions::default()).unwrap()
    }

    #[test]
    fn test_header_and_simple_program() {
        let assembled = assemble_default(".DATA\nA DB 6\nB DB 3\n.CODE\nLDA A\nADD B\nHLT\n");
        let bytes = assembled.image.as_bytes();
        assert_eq!(&bytes[..4], &[0x03, 0x4E, 0x44, 0x52]);
        assert_eq!(&bytes[4..8], &[0x20, 0x00, 126, 0x00]);
        assert_eq!(&bytes[8..12], &[0x30, 0x00, 127, 0x00]);
        assert_eq!(&bytes[12..16], &[0xF0, 0x00, 0x00, 0x00]);
        assert_eq!(&bytes[0x100..0x104], &[6, 0, 3, 0]);
        assert_eq!(assembled.instructions, 3);
        assert!(assembled.warnings.is_empty());
    }

    #[test]
    fn test_halt_appended() {
        let assembled = assemble_default(".CODE\nNOP\n");
        assert_eq!(&assembled.image.as_bytes()[8..12], &[0xF0, 0, 0, 0]);
        assert_eq!(assembled.instructions, 2);

        let empty = assemble_default("");
        assert_eq!(&empty.image.as_bytes()[4..8], &[0xF0, 0, 0, 0]);
    }

    #[test]
    fn test_mnemonics_are_case_insensitive() {
        let assembled = assemble_default(".data\nA DB 1\n.code\nlda A\nNot\nhlt\n");
        assert_eq!(assembled.image.get(4), Some(0x20));
        assert_eq!(assembled.image.get(8), Some(0x60));
    }

    #[test]
    fn test_unknown_mnemonic_skipped() {
        let assembled = assemble_default(".CODE\nHALT\nHLT\n");
        assert_eq!(assembled.instructions, 1);
        assert_eq!(assembled.warnings.len(), 1);
        assert_eq!(assembled.warnings[0].code, WarningCode::UnknownMnemonic);
    }

    #[test]
    fn test_implicit_symbol() {
        let assembled = assemble_default(".DATA\nA DB 1\n.CODE\nLDA X\nHLT\n");
        let x = assembled.symbols.get("X").unwrap();
        assert_eq!(x.address, 0x102);
        assert_eq!(x.kind, AsmSymbolKind::Implicit);
        assert_eq!(assembled.warnings[0].code, WarningCode::ImplicitSymbol);
    }

    #[test]
    fn test_duplicate_data_keeps_first() {
        let assembled = assemble_default(".DATA\nA DB 1\nA DB 2\n.CODE\nLDA A\n");
        assert_eq!(assembled.symbols.get("A").map(|s| s.address), Some(0x100));
        assert_eq!(assembled.image.get(0x102), Some(2));
        assert_eq!(assembled.warnings[0].code, WarningCode::DuplicateDefinition);
    }

    #[test]
    fn test_missing_operand() {
        let err = assemble(".CODE\nLDA\n", &AssemblerOptions::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingOperand);
    }

    #[test]
    fn test_labels_bound_forward_and_backward() {
        let source = ".DATA\nX DB 1\n.CODE\nSTART:\nLDA X\nJMZ END\nJMP START\nEND:\nHLT\n";
        let assembled = assemble_default(source);
        let bytes = assembled.image.as_bytes();
        // JMZ END -> END is the fourth record at 0x10
        assert_eq!(bytes[8], 0xA0);
        assert_eq!(effective_address(bytes[10]), 0x10);
        // JMP START -> 0x04
        assert_eq!(bytes[12], 0x80);
        assert_eq!(effective_address(bytes[14]), 0x04);
        assert!(assembled.warnings.is_empty());
        assert_eq!(
            assembled.symbols.get("END").map(|s| s.kind),
            Some(AsmSymbolKind::Label)
        );
    }

    #[test]
    fn test_legacy_labels_become_data_cells() {
        let options = AssemblerOptions {
            labels: LabelPolicy::Ignore,
        };
        let assembled = assemble(".CODE\nLOOP:\nJMP LOOP\n", &options).unwrap();
        let target = effective_address(assembled.image.as_bytes()[6]);
        assert!(target >= DATA_START);
        assert_eq!(assembled.warnings[0].code, WarningCode::ImplicitSymbol);
    }

    #[test]
    fn test_code_overflow() {
        let mut source = String::from(".CODE\n");
        for _ in 0..128 {
            source.push_str("NOP\n");
        }
        let err = assemble(&source, &AssemblerOptions::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ImageOverflow);
    }

    #[test]
    fn test_stray_line_warns() {
        let assembled = assemble_default("LDA X\n.CODE\nHLT\n");
        assert_eq!(assembled.warnings[0].code, WarningCode::OutsideSection);
    }

    #[test]
    fn test_listing() {
        let assembled = assemble_default(".DATA\nA DB 1\n.CODE\nLOOP: LDA A\nJMP LOOP\n");
        assert_eq!(
            assembled.listing(),
            "ADDR    KIND      NAME\n0x0100  data      A\n0x0004  label     LOOP\n"
        );
    }
}
