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

//! Binary image files.
//!
//! An image file is the raw 512-byte memory image, header included. There
//! is no load address or other framing.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::isa::MemoryImage;

/// Write an image file.
pub fn write_image(image: &MemoryImage, path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(image.as_bytes())?;
    Ok(())
}

/// Read an image file and validate its header.
pub fn read_image(path: &Path) -> io::Result<MemoryImage> {
    let data = std::fs::read(path)?;
    MemoryImage::from_bytes(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
