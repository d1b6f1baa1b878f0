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

//! Definition of the Neander machine shared by the assembler and executor.
//!
//! # Memory layout
//!
//! ```text
//! 0x000..0x004  magic header 03 'N' 'D' 'R'
//! 0x004..       code, 4-byte records (opcode, 0, operand, 0)
//! 0x100..0x200  data, 2-byte slots (value, 0)
//! ```
//!
//! An operand byte is a slot index relative to the end of the header:
//! `address = operand * 2 + 4`. Both code and data addresses use this
//! encoding, so a jump target must be 2-byte aligned as well.

mod image;
mod opcode;

pub use image::{hex_dump, ImageError, MemoryImage};
pub use opcode::Opcode;

/// Size of a binary image in bytes.
pub const IMAGE_SIZE: usize = 512;

/// Size of the magic header.
pub const HEADER_SIZE: usize = 4;

/// The magic header every image starts with.
pub const MAGIC: [u8; HEADER_SIZE] = [0x03, b'N', b'D', b'R'];

/// First byte of the code region.
pub const CODE_START: usize = HEADER_SIZE;

/// First byte of the data region.
pub const DATA_START: usize = 0x100;

/// Size of one instruction record.
pub const INSTRUCTION_SIZE: usize = 4;

/// Size of one data slot.
pub const SLOT_SIZE: usize = 2;

/// Bytes reachable through an 8-bit operand (`255 * 2 + 4` plus its slot).
pub const ADDRESS_SPACE: usize = HEADER_SIZE + 256 * SLOT_SIZE;

/// Encode an absolute address as an operand byte.
///
/// Returns `None` for addresses that cannot be expressed: below the header
/// or beyond the last operand slot.
pub fn encode_operand(address: u16) -> Option<u8> {
    let offset = (address as usize).checked_sub(HEADER_SIZE)?;
    u8::try_from(offset / SLOT_SIZE).ok()
}

/// Decode an operand byte into the absolute address it refers to.
pub fn effective_address(operand: u8) -> usize {
    operand as usize * SLOT_SIZE + HEADER_SIZE
}
