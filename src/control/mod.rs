//! Control unit of the single-cycle datapath.
//!
//! Decoding happens in two phases:
//! - Main decode: opcode → signal row including a coarse ALUOp
//! - ALU control: (ALUOp, funct) → concrete ALU operation
//!
//! Both phases are pure functions over constant tables. [`decode`]
//! composes them for a whole instruction.

pub mod signals;
pub mod main_decode;
pub mod alu_control;

pub use signals::{AluControl, AluOp, ControlSignals, MainControl};
pub use main_decode::{main_decode, signal_table};
pub use alu_control::alu_control;

use crate::isa::Instruction;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Decode failures. Both are deterministic functions of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
pub enum ControlError {
    #[error("unsupported opcode {0:#04x} (0b{0:06b})")]
    UnsupportedOpcode(u8),

    #[error("unsupported R-type function code {0:#04x} (0b{0:06b})")]
    UnsupportedFunctionCode(u8),
}

/// Produce the full control-signal vector for one instruction.
///
/// Only `opcode` and `funct` are read.
pub fn decode(instr: &Instruction) -> Result<ControlSignals, ControlError> {
    decode_fields(instr.opcode, instr.funct)
}

/// Same as [`decode`], from the two raw fields.
pub fn decode_fields(opcode: u8, funct: u8) -> Result<ControlSignals, ControlError> {
    let main = main_decode(opcode).inspect_err(|e| debug!(%e, "main decode failed"))?;
    let alu = alu_control(main.alu_op, funct)
        .inspect_err(|e| debug!(%e, opcode, "ALU control decode failed"))?;
    Ok(main.with_alu_control(alu))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::InstrClass;

    #[test]
    fn test_rtype_add() {
        let s = decode(&Instruction::new(0x00, 0x20)).unwrap();
        assert!(s.reg_dst);
        assert!(!s.alu_src);
        assert!(s.reg_write);
        assert!(!s.mem_write);
        assert!(!s.branch);
        assert_eq!(s.alu_op, AluOp::Funct);
        assert_eq!(s.alu_control, AluControl::Add);
    }

    #[test]
    fn test_load_word() {
        let s = decode(&Instruction::new(0x23, 0)).unwrap();
        assert!(!s.reg_dst);
        assert!(s.alu_src);
        assert!(s.mem_to_reg);
        assert!(s.reg_write);
        assert!(s.mem_read);
        assert!(!s.mem_write);
        assert!(!s.branch);
        assert_eq!(s.alu_control, AluControl::Add);
    }

    #[test]
    fn test_store_word() {
        let s = decode(&Instruction::new(0x2B, 0)).unwrap();
        assert!(s.alu_src);
        assert!(!s.reg_write);
        assert!(s.mem_write);
        assert!(!s.mem_read);
        assert!(!s.branch);
        assert_eq!(s.alu_control, AluControl::Add);
    }

    #[test]
    fn test_branch_equal() {
        let s = decode(&Instruction::new(0x04, 0)).unwrap();
        assert!(!s.alu_src);
        assert!(!s.reg_write);
        assert!(!s.mem_write);
        assert!(s.branch);
        assert_eq!(s.alu_control, AluControl::Subtract);
    }

    #[test]
    fn test_unsupported_opcode() {
        assert_eq!(
            decode(&Instruction::new(0x3F, 0x20)),
            Err(ControlError::UnsupportedOpcode(0x3F))
        );
    }

    #[test]
    fn test_unsupported_funct() {
        assert_eq!(
            decode(&Instruction::new(0x00, 0x3F)),
            Err(ControlError::UnsupportedFunctionCode(0x3F))
        );
    }

    #[test]
    fn test_non_rtype_ignores_funct() {
        // lw with garbage in the low bits of the immediate
        let a = decode(&Instruction::from_word(0x8C08_003F)).unwrap();
        let b = decode(&Instruction::from_word(0x8C08_0000)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rtype_ignores_register_fields() {
        let plain = decode(&Instruction::new(0x00, 0x2A)).unwrap();
        let full = decode(&Instruction::from_word(0x03FF_F82A)).unwrap();
        assert_eq!(plain, full);
        assert_eq!(full.alu_control, AluControl::SetLessThan);
    }

    #[test]
    fn test_error_messages_name_value() {
        assert_eq!(
            ControlError::UnsupportedOpcode(0x3F).to_string(),
            "unsupported opcode 0x3f (0b111111)"
        );
        assert_eq!(
            ControlError::UnsupportedFunctionCode(0x01).to_string(),
            "unsupported R-type function code 0x01 (0b000001)"
        );
    }

    #[test]
    fn test_every_class_decodes() {
        for class in InstrClass::ALL {
            let funct = if class == InstrClass::RType { 0x20 } else { 0 };
            let s = decode_fields(class.opcode(), funct).unwrap();
            let main = class.main_control();
            assert_eq!(s.alu_op, main.alu_op);
            assert_eq!(s.reg_write, main.reg_write);
        }
    }
}
