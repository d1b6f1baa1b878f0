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

//! Fuzz target for the compile and assemble stages.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_compiler

#![no_main]

use libfuzzer_sys::fuzz_target;
use neander::{AssemblerOptions, CompileOptions};

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let Ok(source) = std::str::from_utf8(rest) else {
        return;
    };

    let options = CompileOptions {
        strict: flags & 1 != 0,
    };
    if let Ok(compiled) = neander::compile_with_options(source, &options) {
        // Generated code may still overflow the image, which is an error, not a panic
        let _ = neander::assemble(&compiled.assembly, &AssemblerOptions::default());
    }
});
