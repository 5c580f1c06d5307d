//! Main decoder: opcode to control-signal row.
//!
//! Each row lists RegDst, ALUSrc, MemToReg, RegWrite, MemRead, MemWrite,
//! Branch, Jump, then ALUOp. Pinned don't-care values are written `X`
//! (a 0 bit) and `ALU_X` (`AluOp::Add`).

use crate::isa::InstrClass;
use super::signals::{AluOp, MainControl};
use super::ControlError;

const X: u8 = 0;
const ALU_X: AluOp = AluOp::Add;

const fn row(bits: [u8; 8], alu_op: AluOp) -> MainControl {
    MainControl {
        reg_dst: bits[0] != 0,
        alu_src: bits[1] != 0,
        mem_to_reg: bits[2] != 0,
        reg_write: bits[3] != 0,
        mem_read: bits[4] != 0,
        mem_write: bits[5] != 0,
        branch: bits[6] != 0,
        jump: bits[7] != 0,
        alu_op,
    }
}

const RTYPE: MainControl = row([1, 0, 0, 1, 0, 0, 0, 0], AluOp::Funct);
const LW: MainControl = row([0, 1, 1, 1, 1, 0, 0, 0], AluOp::Add);
const SW: MainControl = row([X, 1, X, 0, 0, 1, 0, 0], AluOp::Add);
const BEQ: MainControl = row([X, 0, X, 0, 0, 0, 1, 0], AluOp::Subtract);
const ADDI: MainControl = row([0, 1, 0, 1, 0, 0, 0, 0], AluOp::Add);
const J: MainControl = row([X, X, X, 0, 0, 0, 0, 1], ALU_X);

impl InstrClass {
    /// The documented signal row for this class.
    pub const fn main_control(self) -> MainControl {
        match self {
            InstrClass::RType => RTYPE,
            InstrClass::Lw => LW,
            InstrClass::Sw => SW,
            InstrClass::Beq => BEQ,
            InstrClass::Addi => ADDI,
            InstrClass::J => J,
        }
    }
}

/// Decode an opcode into its main-control row.
///
/// Any value without a row, including values wider than the opcode
/// field, is `ControlError::UnsupportedOpcode`.
pub fn main_decode(opcode: u8) -> Result<MainControl, ControlError> {
    InstrClass::from_opcode(opcode)
        .map(InstrClass::main_control)
        .ok_or(ControlError::UnsupportedOpcode(opcode))
}

/// Every recognized class with its row, in table order.
pub fn signal_table() -> impl Iterator<Item = (InstrClass, MainControl)> {
    InstrClass::ALL.into_iter().map(|class| (class, class.main_control()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::OPCODE_BITS;

    #[test]
    fn test_rtype_row() {
        let m = main_decode(0x00).unwrap();
        assert!(m.reg_dst);
        assert!(!m.alu_src);
        assert!(!m.mem_to_reg);
        assert!(m.reg_write);
        assert!(!m.mem_read);
        assert!(!m.mem_write);
        assert!(!m.branch);
        assert!(!m.jump);
        assert_eq!(m.alu_op, AluOp::Funct);
    }

    #[test]
    fn test_load_row() {
        let m = main_decode(0x23).unwrap();
        assert_eq!(m, row([0, 1, 1, 1, 1, 0, 0, 0], AluOp::Add));
    }

    #[test]
    fn test_store_row_pins_dont_cares() {
        let m = main_decode(0x2B).unwrap();
        assert!(!m.reg_dst);
        assert!(!m.mem_to_reg);
        assert!(m.alu_src);
        assert!(!m.reg_write);
        assert!(m.mem_write);
        assert!(!m.mem_read);
        assert_eq!(m.alu_op, AluOp::Add);
    }

    #[test]
    fn test_beq_row() {
        let m = main_decode(0x04).unwrap();
        assert!(!m.alu_src);
        assert!(!m.reg_write);
        assert!(!m.mem_write);
        assert!(!m.mem_read);
        assert!(m.branch);
        assert_eq!(m.alu_op, AluOp::Subtract);
    }

    #[test]
    fn test_addi_and_jump_rows() {
        let addi = main_decode(0x08).unwrap();
        assert!(addi.alu_src && addi.reg_write && !addi.reg_dst);

        let j = main_decode(0x02).unwrap();
        assert!(j.jump);
        assert!(!j.reg_write && !j.mem_write && !j.branch);
        assert_eq!(j.alu_op, AluOp::Add);
    }

    fn expected(flags: [bool; 8], alu_op: AluOp) -> MainControl {
        let [reg_dst, alu_src, mem_to_reg, reg_write, mem_read, mem_write, branch, jump] = flags;
        MainControl {
            reg_dst,
            alu_src,
            mem_to_reg,
            reg_write,
            mem_read,
            mem_write,
            branch,
            jump,
            alu_op,
        }
    }

    #[test]
    fn test_every_row_matches_documented_table() {
        let (t, f) = (true, false);
        let table = [
            (0x00, expected([t, f, f, t, f, f, f, f], AluOp::Funct)),
            (0x23, expected([f, t, t, t, t, f, f, f], AluOp::Add)),
            (0x2B, expected([f, t, f, f, f, t, f, f], AluOp::Add)),
            (0x04, expected([f, f, f, f, f, f, t, f], AluOp::Subtract)),
            (0x08, expected([f, t, f, t, f, f, f, f], AluOp::Add)),
            (0x02, expected([f, f, f, f, f, f, f, t], AluOp::Add)),
        ];
        for (opcode, row) in table {
            assert_eq!(main_decode(opcode), Ok(row), "opcode {:#04x}", opcode);
        }
    }

    #[test]
    fn test_unsupported_opcodes() {
        for op in [0x01, 0x03, 0x05, 0x0D, 0x3F] {
            assert_eq!(main_decode(op), Err(ControlError::UnsupportedOpcode(op)));
        }
        // Wider than the field: still an error, never masked
        assert_eq!(main_decode(0x40), Err(ControlError::UnsupportedOpcode(0x40)));
        assert_eq!(main_decode(0xFF), Err(ControlError::UnsupportedOpcode(0xFF)));
    }

    #[test]
    fn test_only_branch_sets_branch() {
        for (class, m) in signal_table() {
            assert_eq!(m.branch, class == InstrClass::Beq);
            assert_eq!(m.jump, class == InstrClass::J);
            assert_eq!(m.mem_read, class == InstrClass::Lw);
            assert_eq!(m.mem_write, class == InstrClass::Sw);
        }
    }

    #[test]
    fn test_no_row_is_all_zero() {
        let zero = row([0; 8], AluOp::Add);
        for (_, m) in signal_table() {
            assert_ne!(m, zero);
        }
    }

    #[test]
    fn test_full_width_partition() {
        let mut ok = 0;
        for op in 0..(1u8 << OPCODE_BITS) {
            match main_decode(op) {
                Ok(m) => {
                    let class = InstrClass::from_opcode(op).unwrap();
                    assert_eq!(m, class.main_control());
                    ok += 1;
                }
                Err(e) => assert_eq!(e, ControlError::UnsupportedOpcode(op)),
            }
        }
        assert_eq!(ok, InstrClass::ALL.len());
    }
}
