//! Calibration document conversion module
//!
//! This module converts projector-camera calibration results between structured
//! document formats, with separate modules for document access, YAML reading,
//! JSON writing, and conversion orchestration.

pub mod common;
pub mod conversions;
pub mod document;
pub mod json;
pub mod yaml;

pub use common::{
    ConversionError,
    Result,
};

pub use document::{
    ElementType,
    Matrix,
    MatrixDocumentReader,
    MatrixDocumentWriter,
    MemoryDocument,
};

pub use yaml::OpenCvYamlReader;

pub use json::OpenCvJsonWriter;

pub use conversions::{
    CalibrationConverter,
    ConversionConfig,
    ConversionConfigBuilder,
    convert,
};
