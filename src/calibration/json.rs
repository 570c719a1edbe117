//! OpenCV JSON writing module
//!
//! This module writes calibration documents in OpenCV FileStorage's JSON layout.

mod opencv_json_writer;

pub use opencv_json_writer::OpenCvJsonWriter;
