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

//! The twelve Neander instructions.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter, EnumString};

/// A machine operation, encoded as the first byte of an instruction record.
///
/// Mnemonics parse case-insensitively (`lda`, `Lda` and `LDA` are the same
/// instruction) and display in upper case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Opcode {
    Nop = 0x00,
    Sta = 0x10,
    Lda = 0x20,
    Add = 0x30,
    Sub = 0x31,
    Or = 0x40,
    And = 0x50,
    Not = 0x60,
    Jmp = 0x80,
    Jmn = 0x90,
    Jmz = 0xA0,
    Hlt = 0xF0,
}

impl Opcode {
    /// Parse a mnemonic.
    pub fn parse(mnemonic: &str) -> Option<Self> {
        mnemonic.parse().ok()
    }

    /// Decode an opcode byte. Unassigned bytes yield `None`.
    pub fn decode(byte: u8) -> Option<Self> {
        Self::try_from(byte).ok()
    }

    /// Whether the instruction consumes an operand (a memory cell or a jump
    /// target).
    pub fn takes_operand(&self) -> bool {
        !matches!(self, Opcode::Nop | Opcode::Not | Opcode::Hlt)
    }

    /// Whether the instruction may replace the program counter.
    pub fn is_branch(&self) -> bool {
        matches!(self, Opcode::Jmp | Opcode::Jmn | Opcode::Jmz)
    }
}
