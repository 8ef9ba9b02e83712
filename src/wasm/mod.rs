//! WebAssembly bindings for the dis6502 decoder.
//!
//! This module provides JavaScript-callable interfaces to the disassembler,
//! enabling browser-based listing of 6502 machine code.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::{disassemble_lines, DisassemblyLine};
