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

//! Neander Toolchain Library
//!
//! This library provides a compiler for a tiny arithmetic language, an
//! assembler for Neander assembly and an executor for the resulting
//! 512-byte memory images.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`lexer`] - Tokenization of source code
//! - [`parser`] - Parsing tokens into an AST
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`codegen`] - Neander assembly generation
//! - [`isa`] - Opcodes, memory layout and the image type
//! - [`asm`] - Assembly text to memory image
//! - [`executor`] - Running images on the accumulator machine
//! - [`output`] - Assembly and image file handling
//!
//! # Example
//!
//! ```no_run
//! use neander::{asm, codegen, executor, lexer, parser};
//!
//! fn run(source: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     // Tokenize
//!     let tokens = lexer::tokenize(source)?;
//!
//!     // Parse
//!     let program = parser::parse(&tokens)?;
//!
//!     // Generate assembly
//!     let compiled = codegen::generate(&program, &Default::default())?;
//!
//!     // Assemble
//!     let assembled = asm::assemble(&compiled.assembly, &Default::default())?;
//!
//!     // Execute
//!     let execution = executor::execute_image(&assembled.image, &Default::default())?;
//!     println!("{}", execution.outcome);
//!
//!     Ok(())
//! }
//! ```

pub mod asm;
pub mod ast;
pub mod codegen;
pub mod error;
pub mod executor;
pub mod isa;
pub mod lexer;
pub mod output;
pub mod parser;

// Re-export commonly used types
pub use asm::{Assembled, AssemblerOptions, LabelPolicy};
pub use ast::Program;
pub use codegen::{CompileOptions, Compiled};
pub use error::{
    format_error, format_warning, CompileError, ErrorCode, PipelineError, Result, SourceLocation,
    Span, Warning, WarningCode,
};
pub use executor::{ExecError, Execution, Outcome, RunOptions};
pub use isa::{MemoryImage, Opcode};
pub use lexer::Token;

/// The version of the Neander toolchain.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the toolchain.
pub const NAME: &str = "Neander";

/// Options for every stage of the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    pub compile: CompileOptions,
    pub assemble: AssemblerOptions,
    pub run: RunOptions,
}

/// The artifacts of a full pipeline run.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub compiled: Compiled,
    pub assembled: Assembled,
    pub execution: Execution,
}

impl Evaluation {
    /// Warnings from the compiler followed by those from the assembler.
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.compiled
            .warnings
            .iter()
            .chain(self.assembled.warnings.iter())
    }
}

/// Compile source code to Neander assembly with default options.
///
/// # Example
///
/// ```no_run
/// let source = r#"PROGRAMA "sum": INICIO RES = 6 + 3 FIM"#;
///
/// match neander::compile(source) {
///     Ok(compiled) => print!("{}", compiled.assembly),
///     Err(e) => eprintln!("Compilation error: {}", e),
/// }
/// ```
pub fn compile(source: &str) -> std::result::Result<Compiled, CompileError> {
    compile_with_options(source, &CompileOptions::default())
}

/// Compile source code to Neander assembly.
pub fn compile_with_options(
    source: &str,
    options: &CompileOptions,
) -> std::result::Result<Compiled, CompileError> {
    // Tokenize
    let tokens = lexer::tokenize(source)?;

    // Parse
    let program = parser::parse(&tokens)?;

    // Generate assembly
    codegen::generate(&program, options)
}

/// Assemble Neander assembly into a memory image.
pub fn assemble(
    source: &str,
    options: &AssemblerOptions,
) -> std::result::Result<Assembled, CompileError> {
    asm::assemble(source, options)
}

/// Compile, assemble and execute source code in one go.
pub fn evaluate(
    source: &str,
    options: &PipelineOptions,
) -> std::result::Result<Evaluation, PipelineError> {
    let compiled = compile_with_options(source, &options.compile)?;
    let assembled = assemble(&compiled.assembly, &options.assemble)?;
    let execution = executor::execute_image(&assembled.image, &options.run)?;
    Ok(Evaluation {
        compiled,
        assembled,
        execution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "Neander");
    }

    #[test]
    fn test_evaluate_sum() {
        let source = "PROGRAMA \"sum\": INICIO RES = 6 + 3 FIM";
        let evaluation = evaluate(source, &PipelineOptions::default()).unwrap();
        assert_eq!(evaluation.execution.outcome.value(), Some(9));
        assert_eq!(evaluation.warnings().count(), 0);
    }

    #[test]
    fn test_evaluate_reports_compile_errors() {
        let err = evaluate("PROGRAMA \"x\": INICIO FIM", &PipelineOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Compile(_)));
    }
}
