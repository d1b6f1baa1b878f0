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

//! Output module for the Neander toolchain.
//!
//! This module handles reading and writing the two artifacts on disk:
//! - assembly text (`.asm`)
//! - binary memory images (`.bin`)

mod image;

pub use image::{read_image, write_image};

use std::path::{Path, PathBuf};

/// Determine the artifact kind from a file extension.
pub fn kind_from_extension(path: &Path) -> Option<ArtifactKind> {
    match path.extension()?.to_str()?.to_lowercase().as_str() {
        "asm" => Some(ArtifactKind::Assembly),
        "bin" => Some(ArtifactKind::Image),
        _ => None,
    }
}

/// A file produced by one of the pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Assembly text written by the compiler.
    Assembly,
    /// Memory image written by the assembler.
    Image,
}

impl ArtifactKind {
    /// The conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Assembly => "asm",
            ArtifactKind::Image => "bin",
        }
    }
}

/// The path next to `input` with the extension for `kind`.
///
/// `prog.lpn` becomes `prog.asm` or `prog.bin`.
pub fn sibling_path(input: &Path, kind: ArtifactKind) -> PathBuf {
    input.with_extension(kind.extension())
}

/// Write assembly text.
pub fn write_assembly(assembly: &str, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, assembly)
}
