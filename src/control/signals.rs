//! Control-signal vector driving the single-cycle datapath.
//!
//! Every signal has a defined value for every recognized instruction
//! class. Signals the datapath ignores for a class are pinned to 0, and
//! an ignored ALUOp is pinned to `Add`.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Coarse ALU operation class produced by the main decoder.
///
/// Two bits wide in hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AluOp {
    /// Always add (address computation, addi)
    Add = 0b00,
    /// Always subtract (beq equality test)
    Subtract = 0b01,
    /// Consult the function code
    Funct = 0b10,
}

impl AluOp {
    /// Raw 2-bit encoding.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02b}", self.bits())
    }
}

/// Concrete operation the ALU performs this cycle.
///
/// Discriminants are the classic 4-bit ALU control lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AluControl {
    And = 0b0000,
    Or = 0b0001,
    Add = 0b0010,
    Subtract = 0b0110,
    SetLessThan = 0b0111,
    Nor = 0b1100,
}

impl AluControl {
    /// Raw 4-bit encoding.
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            AluControl::And => "and",
            AluControl::Or => "or",
            AluControl::Add => "add",
            AluControl::Subtract => "sub",
            AluControl::SetLessThan => "slt",
            AluControl::Nor => "nor",
        }
    }
}

impl fmt::Display for AluControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:04b})", self.name(), self.bits())
    }
}

/// Output of the main decoder: everything except the final ALU operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MainControl {
    /// Write-back register is rd (1) or rt (0)
    pub reg_dst: bool,
    /// ALU operand B is the sign-extended immediate (1) or rt (0)
    #[serde(rename = "ALUSrc")]
    pub alu_src: bool,
    /// Write-back data comes from memory (1) or the ALU (0)
    pub mem_to_reg: bool,
    pub reg_write: bool,
    pub mem_read: bool,
    pub mem_write: bool,
    /// Zero flag may redirect the PC
    pub branch: bool,
    /// PC is replaced by the jump target
    pub jump: bool,
    #[serde(rename = "ALUOp")]
    pub alu_op: AluOp,
}

impl MainControl {
    /// Complete the vector with the result of the ALU-control phase.
    pub const fn with_alu_control(self, alu_control: AluControl) -> ControlSignals {
        ControlSignals {
            reg_dst: self.reg_dst,
            alu_src: self.alu_src,
            mem_to_reg: self.mem_to_reg,
            reg_write: self.reg_write,
            mem_read: self.mem_read,
            mem_write: self.mem_write,
            branch: self.branch,
            jump: self.jump,
            alu_op: self.alu_op,
            alu_control,
        }
    }
}

/// Full control-signal vector for one instruction cycle.
///
/// Has no `Default`: every vector comes from a decoded table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ControlSignals {
    pub reg_dst: bool,
    #[serde(rename = "ALUSrc")]
    pub alu_src: bool,
    pub mem_to_reg: bool,
    pub reg_write: bool,
    pub mem_read: bool,
    pub mem_write: bool,
    pub branch: bool,
    pub jump: bool,
    #[serde(rename = "ALUOp")]
    pub alu_op: AluOp,
    #[serde(rename = "ALUControl")]
    pub alu_control: AluControl,
}

impl ControlSignals {
    /// Pack the vector into a single word.
    ///
    /// Bits 0-7 hold RegDst, ALUSrc, MemToReg, RegWrite, MemRead,
    /// MemWrite, Branch, Jump. Bits 8-9 hold ALUOp, bits 10-13 ALUControl.
    pub const fn as_bits(&self) -> u16 {
        (self.reg_dst as u16)
            | (self.alu_src as u16) << 1
            | (self.mem_to_reg as u16) << 2
            | (self.reg_write as u16) << 3
            | (self.mem_read as u16) << 4
            | (self.mem_write as u16) << 5
            | (self.branch as u16) << 6
            | (self.jump as u16) << 7
            | (self.alu_op.bits() as u16) << 8
            | (self.alu_control.bits() as u16) << 10
    }

    /// Named one-bit signals in datapath order.
    pub fn flags(&self) -> [(&'static str, bool); 8] {
        [
            ("RegDst", self.reg_dst),
            ("ALUSrc", self.alu_src),
            ("MemToReg", self.mem_to_reg),
            ("RegWrite", self.reg_write),
            ("MemRead", self.mem_read),
            ("MemWrite", self.mem_write),
            ("Branch", self.branch),
            ("Jump", self.jump),
        ]
    }
}

impl fmt::Display for ControlSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.flags() {
            write!(f, "{}={} ", name, value as u8)?;
        }
        write!(f, "ALUOp={} ALUControl={}", self.alu_op, self.alu_control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rtype_add() -> ControlSignals {
        MainControl {
            reg_dst: true,
            alu_src: false,
            mem_to_reg: false,
            reg_write: true,
            mem_read: false,
            mem_write: false,
            branch: false,
            jump: false,
            alu_op: AluOp::Funct,
        }
        .with_alu_control(AluControl::Add)
    }

    #[test]
    fn test_alu_encodings() {
        assert_eq!(AluOp::Add.bits(), 0b00);
        assert_eq!(AluOp::Subtract.bits(), 0b01);
        assert_eq!(AluOp::Funct.bits(), 0b10);
        assert_eq!(AluControl::Subtract.bits(), 0b0110);
        assert_eq!(AluControl::Nor.bits(), 0b1100);
    }

    #[test]
    fn test_as_bits_layout() {
        let bits = rtype_add().as_bits();
        assert_eq!(bits & 0xFF, 0b0000_1001);
        assert_eq!((bits >> 8) & 0b11, 0b10);
        assert_eq!(bits >> 10, 0b0010);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            rtype_add().to_string(),
            "RegDst=1 ALUSrc=0 MemToReg=0 RegWrite=1 MemRead=0 MemWrite=0 \
             Branch=0 Jump=0 ALUOp=10 ALUControl=add(0010)"
        );
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_string(&rtype_add()).unwrap();
        assert!(json.contains("\"RegDst\":true"));
        assert!(json.contains("\"ALUSrc\":false"));
        assert!(json.contains("\"ALUOp\":\"Funct\""));
        assert!(json.contains("\"ALUControl\":\"Add\""));
        assert!(!json.contains("Alu"));
    }
}
