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

//! Property-based tests for the Neander toolchain.
//!
//! These tests verify important invariants and properties that should
//! hold for all inputs, using proptest for random input generation.

use neander::executor::{self, ExecError, RunOptions};
use neander::isa::{ImageError, MemoryImage, MAGIC};
use neander::{evaluate, lexer, AssemblerOptions, PipelineOptions};
use proptest::prelude::*;

fn options() -> PipelineOptions {
    PipelineOptions {
        run: RunOptions::with_limit(100_000),
        ..Default::default()
    }
}

fn run_body(body: &str) -> Option<u8> {
    let source = format!("PROGRAMA \"P\":\nINICIO\n{}\nFIM\n", body);
    evaluate(&source, &options())
        .ok()
        .and_then(|evaluation| evaluation.execution.outcome.value())
}

/// The generated division loop, step by step: subtract until the
/// difference has its high bit set.
fn reference_division(dividend: u8, divisor: u8) -> u8 {
    let mut quotient = 0u8;
    let mut remainder = dividend;
    loop {
        let difference = remainder.wrapping_sub(divisor);
        if difference & 0x80 != 0 {
            return quotient;
        }
        remainder = difference;
        quotient = quotient.wrapping_add(1);
    }
}

// ============================================================================
// Lexer Property Tests
// ============================================================================

proptest! {
    /// Property: Token spans are within source bounds and ordered.
    #[test]
    fn prop_lexer_spans_in_bounds(source in "[a-zA-Z0-9_ +\\-*/=:()\"\\n]{0,200}") {
        if let Ok(tokens) = lexer::tokenize(&source) {
            for (token, span) in &tokens {
                prop_assert!(span.start < span.end, "Empty span for {:?}", token);
                prop_assert!(span.end <= source.len());
            }
            for window in tokens.windows(2) {
                prop_assert!(window[0].1.end <= window[1].1.start);
            }
        }
    }
}

// ============================================================================
// Pipeline Property Tests
// ============================================================================

proptest! {
    /// Property: Literal arithmetic evaluates to the result modulo 256.
    #[test]
    fn prop_literal_arithmetic(a in 0u32..1000, b in 0u32..1000, op in 0usize..4) {
        let (symbol, expected) = match op {
            0 => ("+", (a + b) % 256),
            1 => ("-", a.wrapping_sub(b) % 256),
            2 => ("*", (a * b) % 256),
            _ => {
                prop_assume!(b != 0);
                ("/", (a / b) % 256)
            }
        };
        let result = run_body(&format!("RES = {} {} {}", a, symbol, b));
        prop_assert_eq!(result, Some(expected as u8));
    }

    /// Property: The same arithmetic through variables matches as well.
    #[test]
    fn prop_variable_addition_and_subtraction(a in 0u8..=255, b in 0u8..=255) {
        prop_assert_eq!(
            run_body(&format!("A = {}\nB = {}\nRES = A + B", a, b)),
            Some(a.wrapping_add(b))
        );
        prop_assert_eq!(
            run_body(&format!("A = {}\nB = {}\nRES = A - B", a, b)),
            Some(a.wrapping_sub(b))
        );
    }

    /// Property: Multiplication by a known variable unrolls correctly.
    #[test]
    fn prop_known_multiplier(x in 0u8..=255, k in 0u8..=20) {
        prop_assert_eq!(
            run_body(&format!("X = {}\nK = {}\nY = X + 0\nRES = Y * K", x, k)),
            Some(x.wrapping_mul(k))
        );
    }

    /// Property: Run-time division is exact while both operands stay
    /// below the sign boundary.
    #[test]
    fn prop_runtime_division_below_boundary(d in 0u8..128, k in 1u8..128) {
        prop_assert_eq!(
            run_body(&format!("D = {}\nK = {}\nRES = D / K", d, k)),
            Some(d / k)
        );
    }

    /// Property: Run-time division follows the subtraction loop everywhere.
    #[test]
    fn prop_runtime_division_matches_loop(d in 0u8..=255, k in 1u8..=255) {
        prop_assert_eq!(
            run_body(&format!("D = {}\nK = {}\nRES = D / K", d, k)),
            Some(reference_division(d, k))
        );
    }

    /// Property: Compiling and assembling the same input twice gives the
    /// same artifacts.
    #[test]
    fn prop_pipeline_deterministic(a in 0u8..=255, b in 1u8..=255) {
        let source = format!("PROGRAMA \"P\": INICIO A = {} RES = (A + {}) / {} FIM", a, b, b);
        let first = neander::compile(&source).unwrap();
        let second = neander::compile(&source).unwrap();
        prop_assert_eq!(&first.assembly, &second.assembly);

        let first = neander::assemble(&first.assembly, &AssemblerOptions::default()).unwrap();
        let second = neander::assemble(&second.assembly, &AssemblerOptions::default()).unwrap();
        prop_assert_eq!(first.image, second.image);
    }
}

// ============================================================================
// Executor Property Tests
// ============================================================================

proptest! {
    /// Property: Any image with a wrong header is rejected before running.
    #[test]
    fn prop_bad_header_rejected(header in prop::array::uniform4(any::<u8>()), body in prop::collection::vec(any::<u8>(), 0..508)) {
        prop_assume!(header != MAGIC);
        let mut bytes = header.to_vec();
        bytes.extend(body);
        let result = executor::execute(&bytes, &RunOptions::with_limit(10));
        prop_assert!(
            matches!(result, Err(ExecError::Image(ImageError::InvalidHeader { .. }))),
            "expected header rejection"
        );
    }

    /// Property: Arbitrary image bodies never panic the machine.
    #[test]
    fn prop_arbitrary_images_run_safely(body in prop::collection::vec(any::<u8>(), 0..508)) {
        let mut bytes = MemoryImage::new().as_bytes()[..4].to_vec();
        bytes.extend(body);
        match executor::execute(&bytes, &RunOptions::with_limit(2_000)) {
            Ok(_) | Err(ExecError::StepLimitExceeded { .. }) => {}
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}
