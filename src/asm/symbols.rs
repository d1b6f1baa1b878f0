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

//! The assembler's symbol table.
//!
//! Names are bound once; the first binding wins. Data cells are allocated
//! in 2-byte slots growing upward from [`DATA_START`].

use indexmap::IndexMap;

use crate::isa::{DATA_START, SLOT_SIZE};

/// How a symbol got its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsmSymbolKind {
    /// Declared in `.DATA`.
    Data,
    /// Referenced as an operand without being declared.
    Implicit,
    /// A code label.
    Label,
}

impl std::fmt::Display for AsmSymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AsmSymbolKind::Data => write!(f, "data"),
            AsmSymbolKind::Implicit => write!(f, "implicit"),
            AsmSymbolKind::Label => write!(f, "label"),
        }
    }
}

/// A bound name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmSymbol {
    /// The symbol name.
    pub name: String,
    /// The absolute address.
    pub address: u16,
    /// How the address was assigned.
    pub kind: AsmSymbolKind,
}

impl AsmSymbol {
    /// Whether the cell was declared in the data section.
    pub fn is_data_defined(&self) -> bool {
        self.kind == AsmSymbolKind::Data
    }
}

/// Insertion-ordered symbol table with a data allocation cursor.
#[derive(Debug, Clone)]
pub struct AsmSymbolTable {
    entries: IndexMap<String, AsmSymbol>,
    cursor: u16,
}

impl AsmSymbolTable {
    /// Create an empty table with the cursor at the start of the data region.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            cursor: DATA_START as u16,
        }
    }

    /// Take the next free data slot.
    pub fn allocate_slot(&mut self) -> u16 {
        if self.cursor % 2 != 0 {
            self.cursor += 1;
        }
        let address = self.cursor;
        self.cursor = self.cursor.saturating_add(SLOT_SIZE as u16);
        address
    }

    /// Bind `name` unless it is already bound. Returns `false` if an
    /// earlier binding was kept.
    pub fn bind(&mut self, name: &str, address: u16, kind: AsmSymbolKind) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(
            name.to_string(),
            AsmSymbol {
                name: name.to_string(),
                address,
                kind,
            },
        );
        true
    }

    /// Look up a bound name.
    pub fn get(&self, name: &str) -> Option<&AsmSymbol> {
        self.entries.get(name)
    }

    /// Iterate over the symbols in binding order.
    pub fn iter(&self) -> impl Iterator<Item = &AsmSymbol> {
        self.entries.values()
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AsmSymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_grow_from_data_start() {
        let mut table = AsmSymbolTable::new();
        assert_eq!(table.allocate_slot(), 0x100);
        assert_eq!(table.allocate_slot(), 0x102);
        assert_eq!(table.allocate_slot(), 0x104);
    }

    #[test]
    fn test_first_binding_wins() {
        let mut table = AsmSymbolTable::new();
        assert!(table.bind("A", 0x100, AsmSymbolKind::Data));
        assert!(!table.bind("A", 0x102, AsmSymbolKind::Data));
        assert_eq!(table.get("A").map(|s| s.address), Some(0x100));
        assert!(table.get("A").is_some_and(AsmSymbol::is_data_defined));
    }

    #[test]
    fn test_insertion_order() {
        let mut table = AsmSymbolTable::new();
        table.bind("Z", 0x100, AsmSymbolKind::Data);
        table.bind("LOOP", 0x008, AsmSymbolKind::Label);
        table.bind("A", 0x102, AsmSymbolKind::Implicit);
        let names: Vec<_> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "LOOP", "A"]);
    }
}
