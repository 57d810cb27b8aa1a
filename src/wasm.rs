//! WASM bindings for the frame solver
//!
//! Lets a browser UI run analyses in-process, typically from a Web Worker.

use wasm_bindgen::prelude::*;

use crate::api;

// Use wee_alloc for smaller WASM binary
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Analyze a structure
///
/// Takes the JSON structure definition and returns the JSON analysis output.
#[wasm_bindgen]
pub fn analyze(structure_json: &str) -> String {
    api::analyze_json(structure_json)
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
