//! Text program format.
//!
//! One 32-bit instruction word per line:
//! - Hex, with or without a `0x` prefix (`012A4020`, `0x012A4020`)
//! - Binary with a `0b` prefix, `_` separators allowed. A `0b` literal
//!   containing anything but 0/1 is read as hex (`0BAD0000`).
//! - `;` or `#` start a comment that runs to end of line
//! - Blank lines are ignored

use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// A loaded program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// Instruction words in program order.
    pub words: Vec<u32>,
    /// Source line number (1-based) of each word.
    pub lines: Vec<usize>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word, recording the line it came from.
    pub fn push(&mut self, word: u32, line: usize) {
        self.words.push(word);
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<Vec<u32>> for Program {
    fn from(words: Vec<u32>) -> Self {
        let lines = (1..=words.len()).collect();
        Self { words, lines }
    }
}

/// Parse a single word literal.
pub fn parse_word(text: &str) -> Result<u32, String> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let binary = cleaned
        .strip_prefix("0b")
        .or_else(|| cleaned.strip_prefix("0B"))
        .filter(|rest| !rest.is_empty() && rest.chars().all(|c| c == '0' || c == '1'));

    let (digits, radix) = if let Some(bin) = binary {
        (bin, 2)
    } else if let Some(hex) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        (hex, 16)
    } else {
        (cleaned.as_str(), 16)
    };

    if digits.is_empty() {
        return Err(format!("empty literal `{}`", text));
    }
    if digits.starts_with(['+', '-']) {
        return Err(format!("signed literal `{}`", text));
    }
    u32::from_str_radix(digits, radix).map_err(|e| format!("bad word `{}`: {}", text, e))
}

/// Parse program text.
pub fn parse_program(source: &str) -> Result<Program, ProgramError> {
    let mut program = Program::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw
            .split([';', '#'])
            .next()
            .unwrap_or("")
            .trim();
        if line.is_empty() {
            continue;
        }

        let word = parse_word(line).map_err(|message| ProgramError::Parse {
            line: idx + 1,
            message,
        })?;
        program.push(word, idx + 1);
    }

    debug!(words = program.len(), "parsed program");
    Ok(program)
}

/// Load a program file from disk.
pub fn load_program<P: AsRef<Path>>(path: P) -> Result<Program, ProgramError> {
    let source = std::fs::read_to_string(path.as_ref())
        .map_err(|e| ProgramError::Io(e.to_string()))?;
    parse_program(&source)
}

/// Save a program to disk, one hex word per line.
pub fn save_program<P: AsRef<Path>>(path: P, program: &Program) -> Result<(), ProgramError> {
    let mut file = std::fs::File::create(path.as_ref())
        .map_err(|e| ProgramError::Io(e.to_string()))?;

    writeln!(file, "; {} instructions", program.len())
        .map_err(|e| ProgramError::Io(e.to_string()))?;
    for (i, word) in program.words.iter().enumerate() {
        writeln!(file, "0x{:08X} ; {:04}", word, i * 4)
            .map_err(|e| ProgramError::Io(e.to_string()))?;
    }

    Ok(())
}

/// Errors that can occur while loading a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgramError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}
