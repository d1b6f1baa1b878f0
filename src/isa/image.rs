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

//! The fixed-size binary memory image.

use thiserror::Error;

use super::{Opcode, CODE_START, DATA_START, HEADER_SIZE, IMAGE_SIZE, INSTRUCTION_SIZE, MAGIC};

/// Errors raised when turning raw bytes into an image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("Image is {0} bytes long, too short for the 4-byte header")]
    Truncated(usize),

    #[error("Invalid header {found:02X?}, expected {:02X?}", MAGIC)]
    InvalidHeader { found: [u8; HEADER_SIZE] },

    #[error("Image is {0} bytes long, at most {} bytes fit in memory", IMAGE_SIZE)]
    TooLarge(usize),
}

/// A 512-byte Neander memory image: header, code records and data slots.
///
/// The image does not record where code ends and data begins. Keeping the
/// two regions apart is left to the program being assembled.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryImage {
    bytes: [u8; IMAGE_SIZE],
}

impl MemoryImage {
    /// Create an empty image holding only the magic header.
    pub fn new() -> Self {
        let mut bytes = [0u8; IMAGE_SIZE];
        bytes[..HEADER_SIZE].copy_from_slice(&MAGIC);
        Self { bytes }
    }

    /// Validate raw bytes and build an image from them.
    ///
    /// The header is checked before anything else. Shorter inputs are
    /// zero-padded to the full image size.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImageError> {
        if data.len() < HEADER_SIZE {
            return Err(ImageError::Truncated(data.len()));
        }
        let mut found = [0u8; HEADER_SIZE];
        found.copy_from_slice(&data[..HEADER_SIZE]);
        if found != MAGIC {
            return Err(ImageError::InvalidHeader { found });
        }
        if data.len() > IMAGE_SIZE {
            return Err(ImageError::TooLarge(data.len()));
        }

        let mut bytes = [0u8; IMAGE_SIZE];
        bytes[..data.len()].copy_from_slice(data);
        Ok(Self { bytes })
    }

    /// The full image, header included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Read one byte.
    pub fn get(&self, address: usize) -> Option<u8> {
        self.bytes.get(address).copied()
    }

    /// Write one byte. Returns `false` if the address lies outside the image.
    pub fn set(&mut self, address: usize, value: u8) -> bool {
        match self.bytes.get_mut(address) {
            Some(byte) => {
                *byte = value;
                true
            }
            None => false,
        }
    }

    /// Write a 4-byte instruction record `(opcode, 0, operand, 0)`.
    pub fn write_instruction(&mut self, address: usize, opcode: Opcode, operand: u8) -> bool {
        if address + INSTRUCTION_SIZE > IMAGE_SIZE {
            return false;
        }
        self.bytes[address..address + INSTRUCTION_SIZE]
            .copy_from_slice(&[opcode.into(), 0, operand, 0]);
        true
    }

    /// Write a 2-byte data slot `(value, 0)`.
    pub fn write_slot(&mut self, address: usize, value: u8) -> bool {
        if address + 1 >= IMAGE_SIZE {
            return false;
        }
        self.bytes[address] = value;
        self.bytes[address + 1] = 0;
        true
    }
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used_code = self.bytes[CODE_START..DATA_START]
            .chunks(INSTRUCTION_SIZE)
            .take_while(|record| record.iter().any(|&b| b != 0))
            .count();
        f.debug_struct("MemoryImage")
            .field("instructions", &used_code)
            .finish_non_exhaustive()
    }
}

/// Render a classic 16-bytes-per-row hex dump of a memory region.
pub fn hex_dump(bytes: &[u8], base: usize) -> String {
    let mut output = String::new();
    for (row, chunk) in bytes.chunks(16).enumerate() {
        output.push_str(&format!("{:04X}:", base + row * 16));
        for byte in chunk {
            output.push_str(&format!(" {:02X}", byte));
        }
        output.push('\n');
    }
    output
}
