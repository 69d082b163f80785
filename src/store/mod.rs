//! Collection storage: three independent JSON documents on disk.
//!
//! Layout:
//! - `collection.rs`: the fixed set of collection names and their backing files
//! - `document.rs`: whole-document read / atomic replace

pub mod collection;
pub mod document;

pub use collection::Collection;
pub use document::{DocumentStore, RecordCount};
