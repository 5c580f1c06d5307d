//! # MIPS Control
//!
//! Control unit of a single-cycle MIPS-style processor simulator.
//!
//! Given the opcode and function code of a fetched instruction, the
//! control unit produces the signals that steer the register file, ALU,
//! data memory and PC update for that one cycle. Decoding is a pure
//! function: no state, no I/O, safe to call from any thread.

pub mod isa;
pub mod control;
pub mod program;
pub mod config;
pub mod trace;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use isa::{Format, Funct, InstrClass, Instruction};
pub use control::{
    alu_control, decode, decode_fields, main_decode, AluControl, AluOp, ControlError,
    ControlSignals, MainControl,
};
pub use program::{load_program, parse_program, save_program, Program, ProgramError};
pub use config::{ConfigError, FaultPolicy, OutputFormat, SimConfig};
pub use trace::{trace_program, TraceEntry, TraceReport};

#[cfg(feature = "tui")]
pub use tui::run_inspector;
