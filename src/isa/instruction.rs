//! Bit-field view of a fetched instruction word.
//!
//! Field layout (bit 31 is the most significant):
//! - Bits 31-26: opcode
//! - Bits 25-21: rs
//! - Bits 20-16: rt
//! - Bits 15-11: rd
//! - Bits 10-6: shamt
//! - Bits 5-0: funct
//! - Bits 15-0: immediate (I-type)
//! - Bits 25-0: jump target (J-type)

use std::fmt;
use serde::{Serialize, Deserialize};

/// Width of the opcode field.
pub const OPCODE_BITS: u32 = 6;

/// Width of the function-code field.
pub const FUNCT_BITS: u32 = 6;

const OPCODE_SHIFT: u32 = 26;
const FIELD6_MASK: u32 = (1 << 6) - 1;
const REG_MASK: u32 = (1 << 5) - 1;
const IMM_MASK: u32 = (1 << 16) - 1;
const TARGET_MASK: u32 = (1 << 26) - 1;

/// Encoding format, derived from the opcode alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    /// Register-register (opcode 0)
    R,
    /// Immediate
    I,
    /// Jump (opcodes 2 and 3)
    J,
}

/// A parsed instruction as handed over by the fetch stage.
///
/// Only `opcode` and `funct` matter to the control unit. The remaining
/// fields are carried for the datapath and for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub opcode: u8,
    pub rs: u8,
    pub rt: u8,
    pub rd: u8,
    pub shamt: u8,
    pub funct: u8,
    pub imm: u16,
    pub target: u32,
}

impl Instruction {
    /// Build an instruction with only the control-relevant fields set.
    pub fn new(opcode: u8, funct: u8) -> Self {
        Self {
            opcode,
            rs: 0,
            rt: 0,
            rd: 0,
            shamt: 0,
            funct,
            imm: 0,
            target: 0,
        }
    }

    /// Split a raw 32-bit word into its fields.
    pub fn from_word(word: u32) -> Self {
        Self {
            opcode: ((word >> OPCODE_SHIFT) & FIELD6_MASK) as u8,
            rs: ((word >> 21) & REG_MASK) as u8,
            rt: ((word >> 16) & REG_MASK) as u8,
            rd: ((word >> 11) & REG_MASK) as u8,
            shamt: ((word >> 6) & REG_MASK) as u8,
            funct: (word & FIELD6_MASK) as u8,
            imm: (word & IMM_MASK) as u16,
            target: word & TARGET_MASK,
        }
    }

    /// Encoding format implied by the opcode.
    pub fn format(&self) -> Format {
        match self.opcode {
            0 => Format::R,
            2 | 3 => Format::J,
            _ => Format::I,
        }
    }

    /// Immediate sign-extended to 32 bits, as the datapath would see it.
    pub fn imm_sext(&self) -> i32 {
        self.imm as i16 as i32
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Format::R => write!(
                f,
                "op={:#04x} rs={} rt={} rd={} shamt={} funct={:#04x}",
                self.opcode, self.rs, self.rt, self.rd, self.shamt, self.funct
            ),
            Format::I => write!(
                f,
                "op={:#04x} rs={} rt={} imm={}",
                self.opcode, self.rs, self.rt, self.imm_sext()
            ),
            Format::J => write!(f, "op={:#04x} target={:#09x}", self.opcode, self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_word_rtype() {
        // add $t2, $t0, $t1
        let instr = Instruction::from_word(0x0109_5020);
        assert_eq!(instr.opcode, 0);
        assert_eq!(instr.rs, 8);
        assert_eq!(instr.rt, 9);
        assert_eq!(instr.rd, 10);
        assert_eq!(instr.shamt, 0);
        assert_eq!(instr.funct, 0x20);
        assert_eq!(instr.format(), Format::R);
    }

    #[test]
    fn test_from_word_itype() {
        // lw $t0, -4($sp)
        let instr = Instruction::from_word(0x8FA8_FFFC);
        assert_eq!(instr.opcode, 0x23);
        assert_eq!(instr.rs, 29);
        assert_eq!(instr.rt, 8);
        assert_eq!(instr.imm, 0xFFFC);
        assert_eq!(instr.imm_sext(), -4);
        assert_eq!(instr.format(), Format::I);
    }

    #[test]
    fn test_from_word_jtype() {
        let instr = Instruction::from_word(0x0810_0004);
        assert_eq!(instr.opcode, 0x02);
        assert_eq!(instr.target, 0x0010_0004);
        assert_eq!(instr.format(), Format::J);
    }

    #[test]
    fn test_fields_stay_in_width() {
        let instr = Instruction::from_word(u32::MAX);
        assert_eq!(instr.opcode, 0x3F);
        assert_eq!(instr.funct, 0x3F);
        assert_eq!(instr.rd, 0x1F);
    }

    #[test]
    fn test_new_sets_only_control_fields() {
        let instr = Instruction::new(0x23, 0x2A);
        assert_eq!(instr.opcode, 0x23);
        assert_eq!(instr.funct, 0x2A);
        assert_eq!(instr.rs, 0);
        assert_eq!(instr.imm, 0);
    }
}
