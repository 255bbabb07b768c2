//! WASM bindings for Keyscript Core.
//!
//! Lets a browser page compile scripts without a server round trip.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCompiler } from 'keyscript_core';
//!
//! await init();
//!
//! const compiler = new WasmCompiler('arduino_leonardo');
//! compiler.set_safe_mode(false);
//! const code = compiler.compile('DELAY 500\nSTRING hello\nENTER');
//! console.log(compiler.warnings);
//! ```

use wasm_bindgen::prelude::*;

use crate::device::{DeviceDescriptor, DeviceRegistry};
use crate::encoder::EncoderConfig;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Script compiler bound to one target device.
#[wasm_bindgen]
pub struct WasmCompiler {
    device: DeviceDescriptor,
    config: EncoderConfig,
    warnings: Vec<String>,
}

#[wasm_bindgen]
impl WasmCompiler {
    /// Create a compiler for a built-in device.
    ///
    /// Fails when the device identifier is not known.
    #[wasm_bindgen(constructor)]
    pub fn new(device_id: &str) -> Result<WasmCompiler, JsValue> {
        let device = DeviceRegistry::builtin()
            .resolve(device_id)
            .map_err(|e| JsValue::from_str(&e.to_string()))?
            .clone();

        Ok(WasmCompiler {
            device,
            config: EncoderConfig::new(),
            warnings: Vec::new(),
        })
    }

    /// Choose between annotated (`true`) and minimal (`false`) output.
    #[wasm_bindgen]
    pub fn set_safe_mode(&mut self, safe_mode: bool) {
        self.config = self.config.clone().with_safe_mode(safe_mode);
    }

    /// Compile script text to device source code.
    ///
    /// Warnings from the last successful call are available through
    /// [`WasmCompiler::warnings`].
    #[wasm_bindgen]
    pub fn compile(&mut self, script: &str) -> Result<String, JsValue> {
        let compilation = crate::compile(script, "<browser>", &self.device, self.config.clone())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.warnings = compilation.warnings;
        Ok(compilation.code)
    }

    /// Warnings from the last compile, one per line.
    #[wasm_bindgen(getter)]
    pub fn warnings(&self) -> String {
        self.warnings.join("\n")
    }

    /// File extension for generated programs.
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.device.extension.clone()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Identifiers of the built-in devices, comma separated.
#[wasm_bindgen]
pub fn devices() -> String {
    DeviceRegistry::builtin()
        .list()
        .iter()
        .map(|d| d.id.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
