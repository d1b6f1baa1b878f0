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

//! Fresh label and temporary name management.
//!
//! Names are unique within one generator run and never reused.

use super::constants::{DIV_DONE_PREFIX, DIV_LOOP_PREFIX, TEMP_PREFIX};
use super::CodeGenerator;

/// Extension trait for fresh names.
pub trait LabelManager {
    /// Allocate and declare a fresh temporary cell.
    fn make_temp(&mut self) -> String;

    /// Allocate the loop and exit labels of one division.
    fn make_division_labels(&mut self) -> (String, String);
}

impl LabelManager for CodeGenerator {
    fn make_temp(&mut self) -> String {
        let name = format!("{}{}", TEMP_PREFIX, self.temp_counter);
        self.temp_counter += 1;
        self.symbols.temporary(&name);
        name
    }

    fn make_division_labels(&mut self) -> (String, String) {
        let n = self.label_counter;
        self.label_counter += 1;
        (
            format!("{}{}", DIV_LOOP_PREFIX, n),
            format!("{}{}", DIV_DONE_PREFIX, n),
        )
    }
}
