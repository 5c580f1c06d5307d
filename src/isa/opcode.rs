//! Recognized opcode classes and R-type function codes.
//!
//! Both sets are closed enums. Anything that does not map to a variant
//! is an unsupported value and is reported by the control unit.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Instruction classes the main decoder recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrClass {
    /// Register-register ALU operation, selected by funct
    RType,
    /// Load word: rt := mem[rs + imm]
    Lw,
    /// Store word: mem[rs + imm] := rt
    Sw,
    /// Branch if equal: if rs == rt then pc := pc + 4 + (imm << 2)
    Beq,
    /// Add immediate: rt := rs + imm
    Addi,
    /// Unconditional jump
    J,
}

impl InstrClass {
    /// Every recognized class, in table order.
    pub const ALL: [InstrClass; 6] = [
        InstrClass::RType,
        InstrClass::Lw,
        InstrClass::Sw,
        InstrClass::Beq,
        InstrClass::Addi,
        InstrClass::J,
    ];

    const RTYPE: u8 = 0x00;
    const J_OP: u8 = 0x02;
    const BEQ: u8 = 0x04;
    const ADDI: u8 = 0x08;
    const LW: u8 = 0x23;
    const SW: u8 = 0x2B;

    /// Look up the class for an opcode value.
    pub fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode {
            Self::RTYPE => Some(InstrClass::RType),
            Self::LW => Some(InstrClass::Lw),
            Self::SW => Some(InstrClass::Sw),
            Self::BEQ => Some(InstrClass::Beq),
            Self::ADDI => Some(InstrClass::Addi),
            Self::J_OP => Some(InstrClass::J),
            _ => None,
        }
    }

    /// Opcode value of this class.
    pub const fn opcode(self) -> u8 {
        match self {
            InstrClass::RType => Self::RTYPE,
            InstrClass::Lw => Self::LW,
            InstrClass::Sw => Self::SW,
            InstrClass::Beq => Self::BEQ,
            InstrClass::Addi => Self::ADDI,
            InstrClass::J => Self::J_OP,
        }
    }

    /// Short assembler-style name.
    pub const fn name(self) -> &'static str {
        match self {
            InstrClass::RType => "R-type",
            InstrClass::Lw => "lw",
            InstrClass::Sw => "sw",
            InstrClass::Beq => "beq",
            InstrClass::Addi => "addi",
            InstrClass::J => "j",
        }
    }
}

impl fmt::Display for InstrClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// R-type function codes the ALU-control decoder recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Funct {
    Add,
    Sub,
    And,
    Or,
    Nor,
    Slt,
}

impl Funct {
    /// Every recognized function code, in table order.
    pub const ALL: [Funct; 6] = [
        Funct::Add,
        Funct::Sub,
        Funct::And,
        Funct::Or,
        Funct::Nor,
        Funct::Slt,
    ];

    /// Look up a function code.
    pub fn from_code(funct: u8) -> Option<Self> {
        match funct {
            0x20 => Some(Funct::Add),
            0x22 => Some(Funct::Sub),
            0x24 => Some(Funct::And),
            0x25 => Some(Funct::Or),
            0x27 => Some(Funct::Nor),
            0x2A => Some(Funct::Slt),
            _ => None,
        }
    }

    /// Raw 6-bit code.
    pub const fn code(self) -> u8 {
        match self {
            Funct::Add => 0x20,
            Funct::Sub => 0x22,
            Funct::And => 0x24,
            Funct::Or => 0x25,
            Funct::Nor => 0x27,
            Funct::Slt => 0x2A,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Funct::Add => "add",
            Funct::Sub => "sub",
            Funct::And => "and",
            Funct::Or => "or",
            Funct::Nor => "nor",
            Funct::Slt => "slt",
        }
    }
}

impl fmt::Display for Funct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
