//! Instruction-set definitions for the reference MIPS subset.
//!
//! This module covers what the control unit consumes:
//! - Field layout of a 32-bit instruction word
//! - The recognized opcode classes and R-type function codes

pub mod instruction;
pub mod opcode;

pub use instruction::{Format, Instruction, FUNCT_BITS, OPCODE_BITS};
pub use opcode::{Funct, InstrClass};
