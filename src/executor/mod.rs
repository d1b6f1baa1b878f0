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

//! Executor for Neander memory images.
//!
//! Loads a 512-byte image, checks its header and runs it until `HLT`.
//! A program has no explicit return value. By convention the result is the
//! first data slot holding the final accumulator.

mod machine;

pub use machine::Machine;

use std::path::Path;

use thiserror::Error;

use crate::isa::{ImageError, MemoryImage, DATA_START, IMAGE_SIZE, SLOT_SIZE};

/// Errors raised while loading or running an image.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error("Step limit of {limit} instructions exceeded (pc = 0x{pc:02X})")]
    StepLimitExceeded { limit: u64, pc: u8 },

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

/// Execution options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Maximum number of instructions before giving up. `None` runs until
    /// `HLT`, which may be never.
    pub max_steps: Option<u64>,
}

impl RunOptions {
    /// Options with a step limit.
    pub fn with_limit(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
        }
    }
}

/// Where the final accumulator was found after halting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A data slot holds the accumulator.
    Found { address: usize, value: u8 },
    /// No data slot holds the accumulator.
    NotFound { accumulator: u8 },
}

impl Outcome {
    /// The result byte, if a slot holds it.
    pub fn value(&self) -> Option<u8> {
        match self {
            Outcome::Found { value, .. } => Some(*value),
            Outcome::NotFound { .. } => None,
        }
    }

    /// The result as a signed 8-bit value.
    pub fn signed(&self) -> Option<i8> {
        self.value().map(|value| value as i8)
    }

    /// Whether a slot holding the result was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found { .. })
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Found { value, .. } => {
                writeln!(f, "Result (hex) = 0x{:02X}", value)?;
                write!(f, "Result (decimal) = {}", *value as i8)
            }
            Outcome::NotFound { .. } => write!(f, "Result (hex) = not found"),
        }
    }
}

/// Everything known after a run.
#[derive(Debug, Clone)]
pub struct Execution {
    /// The result lookup.
    pub outcome: Outcome,
    /// The halted machine.
    pub machine: Machine,
}

/// Run a machine until it halts or the step limit is hit.
pub fn run(machine: &mut Machine, options: &RunOptions) -> Result<(), ExecError> {
    loop {
        if let Some(limit) = options.max_steps {
            if machine.steps() >= limit && !machine.at_halt() {
                return Err(ExecError::StepLimitExceeded {
                    limit,
                    pc: machine.pc(),
                });
            }
        }
        if !machine.step() {
            return Ok(());
        }
    }
}

/// Scan the data region for the first slot holding `accumulator`.
pub fn find_result(memory: &[u8], accumulator: u8) -> Outcome {
    let end = IMAGE_SIZE.min(memory.len());
    (DATA_START..end)
        .step_by(SLOT_SIZE)
        .find(|&address| memory[address] == accumulator)
        .map(|address| Outcome::Found {
            address,
            value: accumulator,
        })
        .unwrap_or(Outcome::NotFound { accumulator })
}

/// Validate and run raw image bytes.
///
/// The header is checked before anything executes.
pub fn execute(bytes: &[u8], options: &RunOptions) -> Result<Execution, ExecError> {
    let image = MemoryImage::from_bytes(bytes)?;
    execute_image(&image, options)
}

/// Run an already validated image.
pub fn execute_image(image: &MemoryImage, options: &RunOptions) -> Result<Execution, ExecError> {
    let mut machine = Machine::new(image);
    run(&mut machine, options)?;
    let outcome = find_result(machine.memory(), machine.acc());
    Ok(Execution { outcome, machine })
}

/// Read an image file and run it.
pub fn execute_file(path: &Path, options: &RunOptions) -> Result<Execution, ExecError> {
    let bytes = std::fs::read(path)?;
    execute(&bytes, options)
}
