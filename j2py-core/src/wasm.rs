//! WebAssembly bindings for JavaScript
//!
//! Exposes the converter to a browser page. Enable with the "wasm" feature
//! flag.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::report::Options;

/// Convert a Java snippet to Python
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = javaToPython)]
pub fn java_to_python(source: &str) -> String {
    crate::translate(source)
}

/// Convert, failing with the diagnostics if anything was left verbatim
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = javaToPythonStrict)]
pub fn java_to_python_strict(source: &str) -> Result<String, JsValue> {
    match crate::translate_with(source, &Options::strict()) {
        Ok(conversion) => Ok(conversion.output),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

/// Diagnostics for a snippet, one message per entry
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = diagnostics)]
pub fn diagnostics(source: &str) -> js_sys::Array {
    let conversion = crate::Pipeline::standard().run(source);
    let array = js_sys::Array::new();

    for diag in &conversion.diagnostics {
        array.push(&JsValue::from_str(&diag.to_string()));
    }

    array
}

/// Initialize panic hook for better error messages in WASM
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}
