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

//! Fuzz target for the executor.
//!
//! The fuzz input becomes the body of a memory image behind a valid
//! header, so every run reaches the fetch/execute loop.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_executor

#![no_main]

use libfuzzer_sys::fuzz_target;
use neander::executor::{self, RunOptions};
use neander::isa::{IMAGE_SIZE, MAGIC};

fuzz_target!(|data: &[u8]| {
    let mut bytes = MAGIC.to_vec();
    bytes.extend(data.iter().take(IMAGE_SIZE - MAGIC.len()));
    bytes.resize(IMAGE_SIZE, 0);

    let _ = executor::execute(&bytes, &RunOptions::with_limit(10_000));
});
