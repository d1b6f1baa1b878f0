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

//! Names of the cells and labels the code generator introduces.
//!
//! Source identifiers may not collide with any of these.

/// Prefix of constant cells (`CONST_42`).
pub const CONST_PREFIX: &str = "CONST_";

/// Prefix of temporary cells (`TEMP_0`).
pub const TEMP_PREFIX: &str = "TEMP_";

/// Prefix of division loop labels.
pub const DIV_LOOP_PREFIX: &str = "DIV_LOOP_";

/// Prefix of division exit labels.
pub const DIV_DONE_PREFIX: &str = "DIV_DONE_";

/// The cell holding the program result.
pub const RESULT_CELL: &str = "RESULT";

/// The cell name for a constant value.
pub fn constant_name(value: u8) -> String {
    format!("{}{}", CONST_PREFIX, value)
}

/// Whether a source identifier would clash with a generated name.
pub fn is_reserved(name: &str) -> bool {
    name == RESULT_CELL
        || [CONST_PREFIX, TEMP_PREFIX, DIV_LOOP_PREFIX, DIV_DONE_PREFIX]
            .iter()
            .any(|prefix| name.starts_with(prefix))
}
