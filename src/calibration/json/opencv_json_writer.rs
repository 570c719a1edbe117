use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::calibration::common::error::{ConversionError, Result};
use crate::calibration::document::{Matrix, MatrixDocumentWriter};

/// `type_id` OpenCV expects on every matrix node.
const MATRIX_TYPE_ID: &str = "opencv-matrix";

#[derive(Serialize)]
struct MatrixNode<'a> {
    type_id: &'static str,
    rows: usize,
    cols: usize,
    dt: String,
    data: &'a [f64],
}

/// Writes an OpenCV FileStorage JSON document.
///
/// Matrices are buffered and serialized in insertion order on `close`. A writer
/// dropped without being closed writes nothing, so a failed conversion never
/// leaves a complete document behind.
pub struct OpenCvJsonWriter<W: Write> {
    output: Option<W>,
    destination: String,
    entries: Map<String, Value>,
}

impl OpenCvJsonWriter<BufWriter<File>> {
    /// Creates (or truncates) the file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        debug!("Created output document {}", path.display());

        Ok(Self {
            output: Some(BufWriter::new(file)),
            destination: path.display().to_string(),
            entries: Map::new(),
        })
    }
}

impl<W: Write> OpenCvJsonWriter<W> {
    pub fn from_writer(output: W) -> Self {
        Self {
            output: Some(output),
            destination: "<writer>".to_string(),
            entries: Map::new(),
        }
    }

    fn write_document(&mut self) -> Result<()> {
        let Some(mut output) = self.output.take() else {
            return Ok(());
        };
        let document = Value::Object(std::mem::take(&mut self.entries));

        serde_json::to_writer_pretty(&mut output, &document).map_err(|e| {
            if e.is_io() {
                ConversionError::OutputWriteError(format!("{}: {}", self.destination, e))
            } else {
                ConversionError::EncodeError(e.to_string())
            }
        })?;

        let write_err = |e: std::io::Error| {
            ConversionError::OutputWriteError(format!("{}: {}", self.destination, e))
        };
        output.write_all(b"\n").map_err(write_err)?;
        output.flush().map_err(write_err)?;

        Ok(())
    }
}

impl<W: Write> MatrixDocumentWriter for OpenCvJsonWriter<W> {
    /// # Errors
    ///
    /// * `ConversionError::EncodeError` - the matrix holds a NaN or infinity, which
    ///   JSON numbers cannot represent
    fn put(&mut self, key: &str, matrix: &Matrix) -> Result<()> {
        if let Some(index) = matrix.data.iter().position(|v| !v.is_finite()) {
            return Err(ConversionError::EncodeError(format!(
                "{key}: element {index} is {}, which JSON cannot represent",
                matrix.data[index]
            )));
        }

        let node = MatrixNode {
            type_id: MATRIX_TYPE_ID,
            rows: matrix.rows,
            cols: matrix.cols,
            dt: matrix.descriptor(),
            data: &matrix.data,
        };
        let value = serde_json::to_value(&node)
            .map_err(|e| ConversionError::EncodeError(format!("{key}: {e}")))?;

        debug!("Write {}: {}x{} ({})", key, matrix.rows, matrix.cols, node.dt);
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn close(mut self) -> Result<()> {
        self.write_document()?;
        debug!("Closed output document {}", self.destination);
        Ok(())
    }
}

impl<W: Write> Drop for OpenCvJsonWriter<W> {
    fn drop(&mut self) {
        if self.output.is_some() {
            warn!(
                "Output document {} was not closed; {} buffered entries discarded",
                self.destination,
                self.entries.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::document::ElementType;

    fn written(writer_fn: impl FnOnce(&mut OpenCvJsonWriter<&mut Vec<u8>>)) -> Value {
        let mut buffer = Vec::new();
        let mut writer = OpenCvJsonWriter::from_writer(&mut buffer);
        writer_fn(&mut writer);
        writer.close().unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn test_matrix_node_layout() {
        let doc = written(|w| {
            w.put("rotation", &Matrix::identity(3)).unwrap();
        });

        let node = &doc["rotation"];
        assert_eq!(node["type_id"], "opencv-matrix");
        assert_eq!(node["rows"], 3);
        assert_eq!(node["cols"], 3);
        assert_eq!(node["dt"], "d");
        assert_eq!(
            node["data"],
            serde_json::json!([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
        );
    }

    #[test]
    fn test_keys_keep_write_order() {
        let doc = written(|w| {
            w.put("b", &Matrix::column(&[1.0])).unwrap();
            w.put("a", &Matrix::column(&[2.0])).unwrap();
            w.put("c", &Matrix::column(&[3.0])).unwrap();
        });

        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_element_type_is_preserved() {
        let m = Matrix::with_type(1, 2, 1, ElementType::F32, vec![0.5, 1.5]).unwrap();
        let doc = written(|w| w.put("cam_dist", &m).unwrap());
        assert_eq!(doc["cam_dist"]["dt"], "f");
    }

    #[test]
    fn test_non_finite_data_is_rejected() {
        let mut buffer = Vec::new();
        let mut writer = OpenCvJsonWriter::from_writer(&mut buffer);

        let nan = Matrix::new(1, 2, vec![f64::NAN, 1.0]).unwrap();
        match writer.put("cam_dist", &nan) {
            Err(ConversionError::EncodeError(msg)) => {
                assert!(msg.contains("cam_dist") && msg.contains("element 0"), "{msg}")
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let inf = Matrix::column(&[0.0, f64::NEG_INFINITY]);
        assert!(matches!(
            writer.put("translation", &inf),
            Err(ConversionError::EncodeError(_))
        ));

        writer.close().unwrap();
        let doc: Value = serde_json::from_slice(&buffer).unwrap();
        assert!(doc.as_object().unwrap().is_empty());
    }

    #[test]
    fn test_dropped_writer_leaves_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        {
            let mut writer = OpenCvJsonWriter::create(&path).unwrap();
            writer.put("cam_int", &Matrix::identity(3)).unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.is_empty());
    }

    #[test]
    fn test_create_in_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = OpenCvJsonWriter::create(dir.path().join("missing").join("out.json"));
        assert!(matches!(result, Err(ConversionError::OutputWriteError(_))));
    }
}
