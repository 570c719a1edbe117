//! Conversion orchestration module
//!
//! This module maps the fields of a calibration result onto the layout the renderer reads.

mod config;
mod mapping;
mod yml_to_json;


pub use config::{ConversionConfig, ConversionConfigBuilder, DEFAULT_IMAGE_SHAPE, DEFAULT_TRANSLATION_DIVISOR};
pub use mapping::{FIELD_MAPPINGS, FieldMapping, FieldTransform, IMAGE_SHAPE_KEY, REPROJECTION_ERROR_KEYS};
pub use yml_to_json::{CalibrationConverter, convert};
