//! WebAssembly bindings for the control unit.
//!
//! Results cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;
use crate::control::{self, signal_table};
use crate::isa::Instruction;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Decode a raw 32-bit word. Returns the control signals as JSON.
#[wasm_bindgen]
pub fn wasm_decode(word: u32) -> Result<String, JsError> {
    let signals = control::decode(&Instruction::from_word(word))?;
    serde_json::to_string(&signals).map_err(|e| JsError::new(&e.to_string()))
}

/// Decode from separate opcode and function-code fields.
#[wasm_bindgen]
pub fn wasm_decode_fields(opcode: u8, funct: u8) -> Result<String, JsError> {
    let signals = control::decode_fields(opcode, funct)?;
    serde_json::to_string(&signals).map_err(|e| JsError::new(&e.to_string()))
}

/// The main-decode table as a JSON array of `{class, opcode, signals}`.
#[wasm_bindgen]
pub fn wasm_signal_table() -> String {
    let rows: Vec<_> = signal_table()
        .map(|(class, main)| {
            serde_json::json!({
                "class": class.name(),
                "opcode": class.opcode(),
                "signals": main,
            })
        })
        .collect();
    serde_json::Value::Array(rows).to_string()
}
