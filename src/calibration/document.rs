//! Format-agnostic document access
//!
//! Readers and writers expose named-matrix lookup and storage so the converter
//! never depends on a concrete on-disk format.

mod memory;
mod reader;
pub mod types;
mod writer;

pub use memory::MemoryDocument;
pub use reader::MatrixDocumentReader;
pub use types::{ElementType, Matrix, ShapeError};
pub use writer::MatrixDocumentWriter;
