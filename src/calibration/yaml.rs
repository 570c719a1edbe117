//! OpenCV YAML reading module
//!
//! This module reads calibration documents written by OpenCV's FileStorage in YAML form.

mod opencv_yaml_reader;

pub use opencv_yaml_reader::OpenCvYamlReader;
