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

//! Neander Toolchain CLI
//!
//! Compiles, assembles and runs programs for the Neander machine.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use neander::error::{format_error, format_warning, Warning};
use neander::executor::{self, ExecError, Execution, RunOptions};
use neander::isa::{hex_dump, MemoryImage};
use neander::output::{sibling_path, write_assembly, write_image, ArtifactKind};
use neander::{AssemblerOptions, CompileOptions, LabelPolicy};

/// Neander - compiler, assembler and executor for the Neander machine
#[derive(Parser, Debug)]
#[command(name = "neander")]
#[command(author = "Neander Team")]
#[command(version)]
#[command(about = "Compiler, assembler and executor for the Neander machine")]
#[command(long_about = r#"
Neander compiles programs written in a tiny arithmetic language into
assembly for the Neander 8-bit accumulator machine, assembles that text
into a 512-byte memory image and runs the image.

Example usage:
  neander compile sum.lpn
  neander assemble sum.asm sum.bin --listing
  neander run sum.bin
  neander build sum.lpn
"#)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a source file to assembly
    Compile {
        /// Source file (.lpn)
        source: PathBuf,

        /// Output file. Defaults to the source path with an .asm extension.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        compile: CompileArgs,
    },

    /// Assemble an assembly file into a memory image
    Assemble {
        /// Assembly file (.asm)
        input: PathBuf,

        /// Image file to write (.bin)
        output: PathBuf,

        #[command(flatten)]
        assemble: AssembleArgs,
    },

    /// Run a memory image and print its result
    Run {
        /// Image file (.bin)
        image: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Compile, assemble and run a source file, writing both sibling files
    Build {
        /// Source file (.lpn)
        source: PathBuf,

        #[command(flatten)]
        compile: CompileArgs,

        #[command(flatten)]
        assemble: AssembleArgs,

        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Reject multiplications without a compile-time factor
    #[arg(long)]
    strict: bool,
}

impl CompileArgs {
    fn options(&self) -> CompileOptions {
        CompileOptions {
            strict: self.strict,
        }
    }
}

#[derive(Args, Debug)]
struct AssembleArgs {
    /// Skip label lines instead of binding them
    #[arg(long)]
    legacy_labels: bool,

    /// Print the symbol table after assembling
    #[arg(long)]
    listing: bool,
}

impl AssembleArgs {
    fn options(&self) -> AssemblerOptions {
        AssemblerOptions {
            labels: if self.legacy_labels {
                LabelPolicy::Ignore
            } else {
                LabelPolicy::Bind
            },
        }
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Stop after this many instructions
    #[arg(long, value_name = "N")]
    tmax: Option<u64>,

    /// Print a hex dump of memory after halting
    #[arg(long)]
    dump: bool,
}

impl RunArgs {
    fn options(&self) -> RunOptions {
        RunOptions {
            max_steps: self.tmax,
        }
    }
}

/// A failed stage, mapped to an exit code.
enum Failure {
    /// Diagnostics were already printed.
    Rejected,
    /// A file could not be read or written.
    Io,
}

impl From<Failure> for ExitCode {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::Rejected => ExitCode::from(1),
            Failure::Io => ExitCode::from(3),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        println!("{} Toolchain v{}", neander::NAME, neander::VERSION);
    }

    let result = match &cli.command {
        Command::Compile {
            source,
            output,
            compile,
        } => {
            let output = output
                .clone()
                .unwrap_or_else(|| sibling_path(source, ArtifactKind::Assembly));
            compile_file(source, &output, compile, cli.verbose).map(|_| ())
        }
        Command::Assemble {
            input,
            output,
            assemble,
        } => assemble_file(input, output, assemble, cli.verbose).map(|_| ()),
        Command::Run { image, run } => run_file(image, run, cli.verbose),
        Command::Build {
            source,
            compile,
            assemble,
            run,
        } => build(source, compile, assemble, run, cli.verbose),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => failure.into(),
    }
}

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("<input>")
}

fn read_text(path: &Path, verbose: bool) -> Result<String, Failure> {
    if verbose {
        println!("Reading {}...", path.display());
    }
    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: Cannot read {}: {}", path.display(), e);
        Failure::Io
    })
}

fn print_warnings(warnings: &[Warning], text: &str, path: &Path) {
    for warning in warnings {
        eprint!("{}", format_warning(warning, text, Some(display_name(path))));
    }
}

fn compile_file(
    source_path: &Path,
    output_path: &Path,
    args: &CompileArgs,
    verbose: bool,
) -> Result<String, Failure> {
    let source = read_text(source_path, verbose)?;

    if verbose {
        println!("Compiling...");
    }

    let compiled = match neander::compile_with_options(&source, &args.options()) {
        Ok(compiled) => compiled,
        Err(e) => {
            eprint!("{}", format_error(&e, &source, Some(display_name(source_path))));
            return Err(Failure::Rejected);
        }
    };

    // Warnings don't prevent compilation
    print_warnings(&compiled.warnings, &source, source_path);

    if verbose {
        println!("Declared {} cells", compiled.symbols.len());
        println!("Writing {}...", output_path.display());
    }

    if let Err(e) = write_assembly(&compiled.assembly, output_path) {
        eprintln!("Error: Cannot write {}: {}", output_path.display(), e);
        return Err(Failure::Io);
    }

    println!(
        "Compiled {} -> {}",
        display_name(source_path),
        output_path.display()
    );
    Ok(compiled.assembly)
}

fn assemble_text(
    assembly: &str,
    input_path: &Path,
    output_path: &Path,
    args: &AssembleArgs,
    verbose: bool,
) -> Result<MemoryImage, Failure> {
    if verbose {
        println!("Assembling...");
    }

    let assembled = match neander::assemble(assembly, &args.options()) {
        Ok(assembled) => assembled,
        Err(e) => {
            eprint!("{}", format_error(&e, assembly, Some(display_name(input_path))));
            return Err(Failure::Rejected);
        }
    };

    print_warnings(&assembled.warnings, assembly, input_path);

    if args.listing {
        print!("{}", assembled.listing());
    }

    if verbose {
        println!("Wrote {} instructions", assembled.instructions);
        println!("Writing {}...", output_path.display());
    }

    if let Err(e) = write_image(&assembled.image, output_path) {
        eprintln!("Error: Cannot write {}: {}", output_path.display(), e);
        return Err(Failure::Io);
    }

    println!(
        "Assembled {} -> {}",
        display_name(input_path),
        output_path.display()
    );
    Ok(assembled.image)
}

fn assemble_file(
    input_path: &Path,
    output_path: &Path,
    args: &AssembleArgs,
    verbose: bool,
) -> Result<MemoryImage, Failure> {
    let assembly = read_text(input_path, verbose)?;
    assemble_text(&assembly, input_path, output_path, args, verbose)
}

fn report(result: Result<Execution, ExecError>, args: &RunArgs, verbose: bool) -> Result<(), Failure> {
    let execution = match result {
        Ok(execution) => execution,
        Err(ExecError::Io(e)) => {
            eprintln!("Error: {}", e);
            return Err(Failure::Io);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(Failure::Rejected);
        }
    };

    if verbose {
        println!("Executed {} instructions", execution.machine.steps());
    }

    println!("{}", execution.outcome);

    if args.dump {
        print!("{}", hex_dump(execution.machine.memory(), 0));
    }

    Ok(())
}

fn run_file(image_path: &Path, args: &RunArgs, verbose: bool) -> Result<(), Failure> {
    if verbose {
        println!("Running {}...", image_path.display());
    }
    report(executor::execute_file(image_path, &args.options()), args, verbose)
}

fn build(
    source_path: &Path,
    compile: &CompileArgs,
    assemble: &AssembleArgs,
    run: &RunArgs,
    verbose: bool,
) -> Result<(), Failure> {
    let asm_path = sibling_path(source_path, ArtifactKind::Assembly);
    let bin_path = sibling_path(source_path, ArtifactKind::Image);

    let assembly = compile_file(source_path, &asm_path, compile, verbose)?;
    let image = assemble_text(&assembly, &asm_path, &bin_path, assemble, verbose)?;

    if verbose {
        println!("Running...");
    }
    report(executor::execute_image(&image, &run.options()), run, verbose)
}
