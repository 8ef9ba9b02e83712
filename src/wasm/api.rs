//! WASM API for the 6502 decoder.
//!
//! Provides JavaScript-callable listing of machine code.

use crate::{disassemble, DisassemblyOptions, UndefinedPolicy};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

/// One line of a listing
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Disassemble `bytes` as if loaded at `start_address`.
///
/// Undefined opcodes become placeholder lines. A truncated final instruction
/// is reported as an error.
#[wasm_bindgen]
pub fn disassemble_lines(bytes: &[u8], start_address: u16) -> Result<Vec<JsValue>, JsError> {
    let options = DisassemblyOptions {
        start_address,
        on_undefined: UndefinedPolicy::Placeholder,
        ..Default::default()
    };

    let lines = disassemble(bytes, options).map_err(|e| JsError::new(&e.to_string()))?;

    Ok(lines
        .into_iter()
        .map(|line| {
            JsValue::from(DisassemblyLine {
                address: line.address,
                bytes: line.bytes,
                text: line.text,
            })
        })
        .collect())
}
