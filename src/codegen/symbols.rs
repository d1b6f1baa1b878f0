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

//! The compiler's symbol table.
//!
//! Every cell the generated program touches is declared here, in the order
//! it was first referenced. The order becomes the order of the `.DATA`
//! section and therefore the memory layout.

use indexmap::IndexMap;

use super::constants::{constant_name, RESULT_CELL};

/// What a data cell is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// A cell holding a literal value.
    Constant,
    /// A source variable.
    Variable,
    /// A scratch cell for intermediate results.
    Temporary,
    /// The cell the final result is stored to.
    Result,
}

/// A declared data cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The cell name.
    pub name: String,
    /// What the cell is used for.
    pub kind: SymbolKind,
    /// For constants, the stored value. For variables, the value known at
    /// the current point of generation, if any.
    pub value: Option<u8>,
}

impl Symbol {
    fn new(name: impl Into<String>, kind: SymbolKind, value: Option<u8>) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
        }
    }

    /// The `.DATA` line declaring this cell.
    ///
    /// Variables start out zeroed; their values are established by the
    /// generated stores, not by the data section.
    pub fn declaration(&self) -> String {
        match (self.kind, self.value) {
            (SymbolKind::Constant, Some(value)) => format!("{} DB {}", self.name, value),
            _ => format!("{} DB ?", self.name),
        }
    }
}

/// Insertion-ordered table of data cells.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: IndexMap<String, Symbol>,
}

impl SymbolTable {
    /// Create a table holding the fixed preamble: `CONST_0`, `CONST_1` and
    /// `RESULT`.
    pub fn new() -> Self {
        let mut table = Self {
            entries: IndexMap::new(),
        };
        table.constant(0);
        table.constant(1);
        table.insert(Symbol::new(RESULT_CELL, SymbolKind::Result, None));
        table
    }

    fn insert(&mut self, symbol: Symbol) {
        self.entries.entry(symbol.name.clone()).or_insert(symbol);
    }

    /// Declare (if needed) the constant cell for `value` and return its name.
    pub fn constant(&mut self, value: u8) -> String {
        let name = constant_name(value);
        self.insert(Symbol::new(name.clone(), SymbolKind::Constant, Some(value)));
        name
    }

    /// Declare (if needed) a source variable.
    pub fn variable(&mut self, name: &str) {
        self.insert(Symbol::new(name, SymbolKind::Variable, None));
    }

    /// Declare a temporary cell.
    pub fn temporary(&mut self, name: &str) {
        self.insert(Symbol::new(name, SymbolKind::Temporary, None));
    }

    /// The statically known value of a variable.
    pub fn known_value(&self, name: &str) -> Option<u8> {
        self.entries
            .get(name)
            .filter(|symbol| symbol.kind == SymbolKind::Variable)
            .and_then(|symbol| symbol.value)
    }

    /// Record (or clear) the statically known value of a variable.
    pub fn set_known_value(&mut self, name: &str, value: Option<u8>) {
        self.variable(name);
        if let Some(symbol) = self.entries.get_mut(name) {
            symbol.value = value;
        }
    }

    /// Look up a symbol by name.
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    /// Iterate over all symbols in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.values()
    }

    /// Number of declared cells.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_order() {
        let table = SymbolTable::new();
        let names: Vec<_> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["CONST_0", "CONST_1", "RESULT"]);
    }

    #[test]
    fn test_constants_are_unique() {
        let mut table = SymbolTable::new();
        assert_eq!(table.constant(1), "CONST_1");
        assert_eq!(table.constant(9), "CONST_9");
        assert_eq!(table.constant(9), "CONST_9");
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_known_values() {
        let mut table = SymbolTable::new();
        table.set_known_value("A", Some(3));
        assert_eq!(table.known_value("A"), Some(3));
        table.set_known_value("A", None);
        assert_eq!(table.known_value("A"), None);
        assert_eq!(table.known_value("CONST_1"), None);
        assert_eq!(table.known_value("missing"), None);
    }

    #[test]
    fn test_declarations() {
        let mut table = SymbolTable::new();
        table.constant(44);
        table.set_known_value("X", Some(5));
        table.temporary("TEMP_0");
        let lines: Vec<_> = table.iter().map(Symbol::declaration).collect();
        assert_eq!(
            lines,
            vec![
                "CONST_0 DB 0",
                "CONST_1 DB 1",
                "RESULT DB ?",
                "CONST_44 DB 44",
                "X DB ?",
                "TEMP_0 DB ?"
            ]
        );
    }
}
