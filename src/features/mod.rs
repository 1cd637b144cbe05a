//! Feature modules - surfaces around the core engine
//!
//! - Table documents (JSON interchange for the CLI and WASM bindings)
//! - Plain-text layout of grids and details

#[cfg(feature = "serde")]
pub mod document;
pub mod layout;

// Re-export commonly used types
#[cfg(feature = "serde")]
pub use document::{reconcile_document, ReconcileOptions, TableDocument, TableReport};
pub use layout::{format_details, format_grid};
