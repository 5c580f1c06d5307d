//! ALU-control decoder: (ALUOp, funct) to a concrete ALU operation.

use crate::isa::Funct;
use super::signals::{AluControl, AluOp};
use super::ControlError;

impl Funct {
    /// ALU operation selected by this function code.
    pub const fn alu_control(self) -> AluControl {
        match self {
            Funct::Add => AluControl::Add,
            Funct::Sub => AluControl::Subtract,
            Funct::And => AluControl::And,
            Funct::Or => AluControl::Or,
            Funct::Nor => AluControl::Nor,
            Funct::Slt => AluControl::SetLessThan,
        }
    }
}

/// Select the ALU operation.
///
/// `funct` is only inspected when `op` is [`AluOp::Funct`]. An
/// unrecognized code there is `ControlError::UnsupportedFunctionCode`,
/// never a fallback to add.
pub fn alu_control(op: AluOp, funct: u8) -> Result<AluControl, ControlError> {
    match op {
        AluOp::Add => Ok(AluControl::Add),
        AluOp::Subtract => Ok(AluControl::Subtract),
        AluOp::Funct => Funct::from_code(funct)
            .map(Funct::alu_control)
            .ok_or(ControlError::UnsupportedFunctionCode(funct)),
    }
}
