//! WASM bindings for tablegrid
//!
//! This module exposes table documents to JavaScript. Documents and options
//! are plain JS objects in the JSON document shape; results come back as
//! JS objects mirroring [`TableReport`](crate::features::document::TableReport).

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::core::grid::{DenseGrid, Grid};
#[cfg(feature = "wasm")]
use crate::features::document::{reconcile_document, ReconcileOptions, TableDocument};

/// Dense grid result (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct MaterializeResult {
    pub grid: Grid,
    pub dense: DenseGrid<String>,
    pub diagnostics: Vec<String>,
}

#[cfg(feature = "wasm")]
fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(feature = "wasm")]
fn read_options(options: JsValue) -> Result<ReconcileOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(ReconcileOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(to_js_error)
    }
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Expand a table document into a dense, gap-filled grid
///
/// # Arguments
/// * `doc` - Table document (`{ rows: [{ section, cells: [{ id, rowspan, colspan, new }] }] }`)
/// * `options` - Optional `{ mark_cells_as_new, strict }`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "materializeTable")]
pub fn materialize_table(doc: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let doc: TableDocument = serde_wasm_bindgen::from_value(doc).map_err(to_js_error)?;
    let options = read_options(options)?;
    let report = reconcile_document(&doc, &options).map_err(to_js_error)?;

    let result = MaterializeResult {
        grid: report.grid,
        dense: report.dense,
        diagnostics: report.diagnostics,
    };
    serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
}

/// Reconcile a table document into its full report (grid, dense grid, details)
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "reconcileTable")]
pub fn reconcile_table(doc: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let doc: TableDocument = serde_wasm_bindgen::from_value(doc).map_err(to_js_error)?;
    let options = read_options(options)?;
    let report = reconcile_document(&doc, &options).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&report).map_err(to_js_error)
}

/// Reconcile a table document given as JSON text, returning JSON text
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "reconcileTableJson")]
pub fn reconcile_table_json(input: &str, strict: bool) -> Result<String, JsValue> {
    let doc = TableDocument::from_json(input).map_err(to_js_error)?;
    let options = ReconcileOptions {
        strict,
        ..Default::default()
    };
    let report = reconcile_document(&doc, &options).map_err(to_js_error)?;
    serde_json::to_string(&report).map_err(to_js_error)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
