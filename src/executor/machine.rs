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

//! The Neander accumulator machine.

use crate::isa::{
    effective_address, MemoryImage, Opcode, ADDRESS_SPACE, CODE_START, IMAGE_SIZE,
    INSTRUCTION_SIZE,
};

/// Machine state: memory, accumulator, program counter and flags.
#[derive(Clone)]
pub struct Machine {
    memory: [u8; ADDRESS_SPACE],
    acc: u8,
    pc: u8,
    zero: bool,
    negative: bool,
    steps: u64,
    halted: bool,
}

impl Machine {
    /// Load an image into a fresh machine. Execution starts at the first
    /// code record.
    pub fn new(image: &MemoryImage) -> Self {
        let mut memory = [0u8; ADDRESS_SPACE];
        memory[..IMAGE_SIZE].copy_from_slice(image.as_bytes());
        Self {
            memory,
            acc: 0,
            pc: CODE_START as u8,
            zero: false,
            negative: false,
            steps: 0,
            halted: false,
        }
    }

    /// The accumulator.
    pub fn acc(&self) -> u8 {
        self.acc
    }

    /// The program counter, a byte offset into memory.
    pub fn pc(&self) -> u8 {
        self.pc
    }

    /// The zero flag as computed at the start of the last cycle.
    pub fn zero(&self) -> bool {
        self.zero
    }

    /// The negative flag as computed at the start of the last cycle.
    pub fn negative(&self) -> bool {
        self.negative
    }

    /// Number of executed instructions, not counting the final `HLT`.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Whether a `HLT` has been fetched.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Whether the next fetch is a `HLT`.
    pub fn at_halt(&self) -> bool {
        self.halted || self.memory[self.pc as usize] == u8::from(Opcode::Hlt)
    }

    /// The whole addressable memory.
    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// Execute one instruction. Returns `false` once the machine has halted.
    pub fn step(&mut self) -> bool {
        if self.halted {
            return false;
        }

        self.zero = self.acc == 0;
        self.negative = self.acc & 0x80 != 0;

        let pc = self.pc as usize;
        let opcode = self.memory[pc];
        let address = effective_address(self.memory[pc + 2]);

        let mut jump = None;
        match Opcode::decode(opcode) {
            Some(Opcode::Hlt) => {
                self.halted = true;
                return false;
            }
            Some(Opcode::Sta) => self.memory[address] = self.acc,
            Some(Opcode::Lda) => self.acc = self.memory[address],
            Some(Opcode::Add) => self.acc = self.acc.wrapping_add(self.memory[address]),
            Some(Opcode::Sub) => self.acc = self.acc.wrapping_sub(self.memory[address]),
            Some(Opcode::Or) => self.acc |= self.memory[address],
            Some(Opcode::And) => self.acc &= self.memory[address],
            Some(Opcode::Not) => self.acc = !self.acc,
            Some(Opcode::Jmp) => jump = Some(address),
            Some(Opcode::Jmn) if self.negative => jump = Some(address),
            Some(Opcode::Jmz) if self.zero => jump = Some(address),
            // NOP, untaken branches and unassigned opcodes
            _ => {}
        }

        self.pc = match jump {
            Some(target) => target as u8,
            None => self.pc.wrapping_add(INSTRUCTION_SIZE as u8),
        };
        self.steps += 1;
        true
    }
}

impl std::fmt::Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("acc", &self.acc)
            .field("pc", &self.pc)
            .field("zero", &self.zero)
            .field("negative", &self.negative)
            .field("steps", &self.steps)
            .field("halted", &self.halted)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::encode_operand;

    fn program(records: &[(Opcode, u16)], data: &[(u16, u8)]) -> MemoryImage {
        let mut image = MemoryImage::new();
        for (i, &(op, address)) in records.iter().enumerate() {
            let operand = encode_operand(address).unwrap();
            image.write_instruction(CODE_START + i * INSTRUCTION_SIZE, op, operand);
        }
        for &(address, value) in data {
            image.write_slot(address as usize, value);
        }
        image
    }

    fn run(machine: &mut Machine) {
        for _ in 0..10_000 {
            if !machine.step() {
                return;
            }
        }
        panic!("machine did not halt");
    }

    #[test]
    fn test_add_and_store() {
        let image = program(
            &[
                (Opcode::Lda, 0x100),
                (Opcode::Add, 0x102),
                (Opcode::Sta, 0x104),
                (Opcode::Hlt, 0x004),
            ],
            &[(0x100, 200), (0x102, 100)],
        );
        let mut machine = Machine::new(&image);
        run(&mut machine);
        assert_eq!(machine.acc(), 44);
        assert_eq!(machine.memory()[0x104], 44);
        assert_eq!(machine.steps(), 3);
        assert!(machine.is_halted());
    }

    #[test]
    fn test_not_advances_one_record() {
        let image = program(
            &[(Opcode::Lda, 0x100), (Opcode::Not, 0x004), (Opcode::Hlt, 0x004)],
            &[(0x100, 0x0F)],
        );
        let mut machine = Machine::new(&image);
        run(&mut machine);
        assert_eq!(machine.acc(), 0xF0);
        assert_eq!(machine.steps(), 2);
    }

    #[test]
    fn test_flags_use_accumulator_before_instruction() {
        let image = program(
            &[
                (Opcode::Lda, 0x100),
                (Opcode::Jmn, 0x014),
                (Opcode::Lda, 0x102),
                (Opcode::Hlt, 0x004),
                (Opcode::Lda, 0x102),
                (Opcode::Jmz, 0x00C),
                (Opcode::Hlt, 0x004),
            ],
            &[(0x100, 0x80), (0x102, 0)],
        );
        let mut machine = Machine::new(&image);
        machine.step();
        assert!(!machine.negative());
        machine.step();
        assert!(machine.negative());
        assert_eq!(machine.pc(), 0x14);
        run(&mut machine);
        // JMZ saw zero from the LDA before it and jumped back to 0x0C
        assert!(machine.zero());
        assert_eq!(machine.pc(), 0x10);
    }

    #[test]
    fn test_unknown_opcode_is_nop() {
        let mut image = program(&[(Opcode::Hlt, 0x004)], &[]);
        image.set(4, 0x77);
        image.write_instruction(8, Opcode::Hlt, 0);
        let mut machine = Machine::new(&image);
        run(&mut machine);
        assert_eq!(machine.steps(), 1);
    }

    #[test]
    fn test_or_and_sub() {
        let image = program(
            &[
                (Opcode::Lda, 0x100),
                (Opcode::Or, 0x102),
                (Opcode::And, 0x104),
                (Opcode::Sub, 0x106),
                (Opcode::Hlt, 0x004),
            ],
            &[(0x100, 0b0101), (0x102, 0b1010), (0x104, 0b0110), (0x106, 9)],
        );
        let mut machine = Machine::new(&image);
        run(&mut machine);
        assert_eq!(machine.acc(), 0b0110u8.wrapping_sub(9));
    }

    #[test]
    fn test_operand_255_reaches_past_image() {
        let image = program(
            &[(Opcode::Lda, 0x100), (Opcode::Sta, 0x202), (Opcode::Hlt, 0x004)],
            &[(0x100, 7)],
        );
        let mut machine = Machine::new(&image);
        run(&mut machine);
        assert_eq!(machine.memory()[0x202], 7);
    }
}
