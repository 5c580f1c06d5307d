//! Decode trace over a whole program.
//!
//! Walks the program in order, runs each word through the control unit
//! and applies the configured fault policy. Nothing is executed: the
//! trace records what the datapath would be told to do.

use crate::config::{FaultPolicy, SimConfig};
use crate::control::{self, ControlError, ControlSignals};
use crate::isa::{Funct, InstrClass, Instruction};
use serde::Serialize;
use tracing::{trace, warn};

/// Decode result for one instruction word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    /// Position in the program.
    pub index: usize,
    /// Byte address, assuming the program starts at 0.
    pub address: u32,
    pub word: u32,
    pub instruction: Instruction,
    pub outcome: Result<ControlSignals, ControlError>,
}

impl TraceEntry {
    /// Decode a single word at a program position.
    pub fn new(index: usize, word: u32) -> Self {
        let instruction = Instruction::from_word(word);
        Self {
            index,
            address: (index as u32).wrapping_mul(4),
            word,
            instruction,
            outcome: control::decode(&instruction),
        }
    }

    pub fn is_fault(&self) -> bool {
        self.outcome.is_err()
    }

    /// Short operation name, or `???` for a fault.
    pub fn mnemonic(&self) -> &'static str {
        if self.is_fault() {
            return "???";
        }
        match InstrClass::from_opcode(self.instruction.opcode) {
            Some(InstrClass::RType) => Funct::from_code(self.instruction.funct)
                .map(Funct::name)
                .unwrap_or("???"),
            Some(class) => class.name(),
            None => "???",
        }
    }
}

/// Result of tracing a program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TraceReport {
    pub entries: Vec<TraceEntry>,
    /// Words that decoded successfully.
    pub decoded: usize,
    /// Words that failed to decode.
    pub faults: usize,
    /// Index of the fault that stopped the trace under `FaultPolicy::Halt`.
    pub halted_at: Option<usize>,
    /// The instruction limit cut the trace short.
    pub truncated: bool,
}

impl TraceReport {
    /// Iterate over faulting entries only.
    pub fn fault_entries(&self) -> impl Iterator<Item = (&TraceEntry, &ControlError)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.outcome.as_ref().err().map(|e| (entry, e)))
    }
}

/// Decode every word of a program under the given configuration.
pub fn trace_program(words: &[u32], config: &SimConfig) -> TraceReport {
    let limit = config.max_instructions.unwrap_or(usize::MAX);
    let mut report = TraceReport::default();

    for (index, &word) in words.iter().enumerate().take(limit) {
        let entry = TraceEntry::new(index, word);

        match &entry.outcome {
            Ok(signals) => {
                trace!(
                    index,
                    word = format_args!("{:#010x}", word),
                    bits = signals.as_bits(),
                    "decoded"
                );
                report.decoded += 1;
            }
            Err(e) => {
                warn!(
                    index,
                    word = format_args!("{:#010x}", word),
                    error = %e,
                    "unsupported instruction"
                );
                report.faults += 1;
            }
        }

        let stop = entry.is_fault() && config.on_unsupported == FaultPolicy::Halt;
        report.entries.push(entry);
        if stop {
            report.halted_at = Some(index);
            break;
        }
    }

    report.truncated = report.halted_at.is_none() && words.len() > limit;
    report
}
