//! Calibration document reader for OpenCV FileStorage YAML.
//!
//! OpenCV writes YAML with a non-standard `%YAML:1.0` directive and tags matrix
//! nodes with `!!opencv-matrix`. Each matrix node is a mapping of `rows`, `cols`,
//! `dt` (element type code, optionally prefixed by a channel count) and a flat
//! row-major `data` sequence.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::calibration::common::error::{ConversionError, Result};
use crate::calibration::document::{ElementType, Matrix, MatrixDocumentReader};

/// Tag suffix OpenCV attaches to matrix nodes.
const MATRIX_TAG: &str = "opencv-matrix";

/// Reader over a parsed OpenCV FileStorage YAML document.
///
/// The whole file is read and parsed when the reader is opened; lookups after
/// that never touch the filesystem.
#[derive(Debug)]
pub struct OpenCvYamlReader {
    source: Option<PathBuf>,
    root: Mapping,
}

impl OpenCvYamlReader {
    /// Opens and parses the document at `path`.
    ///
    /// # Errors
    ///
    /// * `ConversionError::InputReadError` - the file does not exist or cannot be read
    /// * `ConversionError::ParseError` - the contents are not a YAML mapping
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening calibration document {}", path.display());

        let text = fs::read_to_string(path).map_err(|e| {
            ConversionError::InputReadError(format!("{}: {}", path.display(), e))
        })?;

        let mut reader = Self::parse(&text)?;
        reader.source = Some(path.to_path_buf());
        Ok(reader)
    }

    /// Parses a document held in memory.
    pub fn parse(text: &str) -> Result<Self> {
        let body = strip_directive(text);

        let value: Value = serde_yaml::from_str(body)
            .map_err(|e| ConversionError::ParseError(e.to_string()))?;

        let root = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            Value::Tagged(tagged) => match tagged.value {
                Value::Mapping(mapping) => mapping,
                _ => return Err(ConversionError::ParseError("document root is not a mapping".to_string())),
            },
            _ => return Err(ConversionError::ParseError("document root is not a mapping".to_string())),
        };

        debug!("Parsed calibration document with {} top-level keys", root.len());

        Ok(Self { source: None, root })
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn node(&self, key: &str) -> Result<&Value> {
        self.root
            .get(key)
            .ok_or_else(|| ConversionError::missing_field(key, "key not present"))
    }
}

impl MatrixDocumentReader for OpenCvYamlReader {
    fn get(&self, key: &str) -> Result<Matrix> {
        let matrix = parse_matrix(key, self.node(key)?)?;
        debug!(
            "Read {}: {}x{} ({})",
            key,
            matrix.rows,
            matrix.cols,
            matrix.descriptor()
        );
        Ok(matrix)
    }

    fn get_real(&self, key: &str) -> Result<f64> {
        let node = untag(key, self.node(key)?)?;
        if let Some(value) = number(node) {
            return Ok(value);
        }
        let matrix = parse_matrix(key, node)?;
        match matrix.data.as_slice() {
            [value] => Ok(*value),
            _ => Err(ConversionError::missing_field(key, "value is a matrix, not a scalar")),
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    fn close(self) -> Result<()> {
        if let Some(source) = &self.source {
            debug!("Closed calibration document {}", source.display());
        }
        Ok(())
    }
}

/// Drops a leading `%YAML` directive line, which OpenCV spells `%YAML:1.0`.
fn strip_directive(text: &str) -> &str {
    let text = text.trim_start_matches('\u{feff}');
    match text.split_once('\n') {
        Some((first, rest)) if first.trim_start().starts_with("%YAML") => rest,
        None if text.trim_start().starts_with("%YAML") => "",
        _ => text,
    }
}

fn untag<'a>(key: &str, value: &'a Value) -> Result<&'a Value> {
    match value {
        Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            if tag.ends_with(MATRIX_TAG) {
                Ok(&tagged.value)
            } else {
                Err(ConversionError::missing_field(key, format!("unexpected tag {tag}")))
            }
        }
        other => Ok(other),
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => special_float(s.trim()).or_else(|| s.trim().parse::<f64>().ok()),
        _ => None,
    }
}

/// OpenCV spells non-finite values `.Nan`, `.Inf` and `-.Inf`, which plain YAML
/// leaves as strings.
fn special_float(s: &str) -> Option<f64> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if body.eq_ignore_ascii_case(".nan") {
        Some(f64::NAN)
    } else if body.eq_ignore_ascii_case(".inf") {
        Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY })
    } else {
        None
    }
}

fn dimension(key: &str, node: &Mapping, field: &str) -> Result<usize> {
    node.get(field)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .ok_or_else(|| ConversionError::missing_field(key, format!("matrix node has no valid `{field}`")))
}

fn parse_matrix(key: &str, node: &Value) -> Result<Matrix> {
    let node = untag(key, node)?
        .as_mapping()
        .ok_or_else(|| ConversionError::missing_field(key, "value is not a matrix node"))?;

    let rows = dimension(key, node, "rows")?;
    let cols = dimension(key, node, "cols")?;

    let dt = node
        .get("dt")
        .and_then(Value::as_str)
        .ok_or_else(|| ConversionError::missing_field(key, "matrix node has no valid `dt`"))?;
    let (channels, element_type) = ElementType::parse_descriptor(dt)
        .ok_or_else(|| ConversionError::missing_field(key, format!("unknown element type `{dt}`")))?;

    let data = node
        .get("data")
        .and_then(Value::as_sequence)
        .ok_or_else(|| ConversionError::missing_field(key, "matrix node has no valid `data`"))?
        .iter()
        .map(number)
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| ConversionError::missing_field(key, "matrix data contains a non-numeric value"))?;

    Matrix::with_type(rows, cols, channels, element_type, data)
        .map_err(|e| ConversionError::missing_field(key, e.to_string()))
}
