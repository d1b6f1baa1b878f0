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

//! Fuzz target for the assembler.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_assembler

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use neander::{AssemblerOptions, LabelPolicy};

#[derive(Debug, Arbitrary)]
struct Input {
    legacy_labels: bool,
    source: String,
}

fuzz_target!(|input: Input| {
    let options = AssemblerOptions {
        labels: if input.legacy_labels {
            LabelPolicy::Ignore
        } else {
            LabelPolicy::Bind
        },
    };
    let _ = neander::assemble(&input.source, &options);
});
