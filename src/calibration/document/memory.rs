use crate::calibration::common::error::{ConversionError, Result};
use crate::calibration::document::reader::MatrixDocumentReader;
use crate::calibration::document::types::Matrix;
use crate::calibration::document::writer::MatrixDocumentWriter;

#[derive(Debug, Clone, PartialEq)]
enum Entry {
    Matrix(Matrix),
    Real(f64),
}

/// In-memory document. Keys keep their insertion order and a repeated `put`
/// replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryDocument {
    entries: Vec<(String, Entry)>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matrix(mut self, key: &str, matrix: Matrix) -> Self {
        self.insert(key, Entry::Matrix(matrix));
        self
    }

    pub fn with_real(mut self, key: &str, value: f64) -> Self {
        self.insert(key, Entry::Real(value));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: &str, entry: Entry) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((key.to_string(), entry)),
        }
    }

    fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }
}

impl MatrixDocumentReader for MemoryDocument {
    fn get(&self, key: &str) -> Result<Matrix> {
        match self.entry(key) {
            Some(Entry::Matrix(m)) => Ok(m.clone()),
            Some(Entry::Real(_)) => Err(ConversionError::missing_field(key, "value is a scalar, not a matrix")),
            None => Err(ConversionError::missing_field(key, "key not present")),
        }
    }

    fn get_real(&self, key: &str) -> Result<f64> {
        match self.entry(key) {
            Some(Entry::Real(v)) => Ok(*v),
            Some(Entry::Matrix(m)) if m.len() == 1 => Ok(m.data[0]),
            Some(Entry::Matrix(_)) => Err(ConversionError::missing_field(key, "value is a matrix, not a scalar")),
            None => Err(ConversionError::missing_field(key, "key not present")),
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }
}

impl MatrixDocumentWriter for MemoryDocument {
    fn put(&mut self, key: &str, matrix: &Matrix) -> Result<()> {
        self.insert(key, Entry::Matrix(matrix.clone()));
        Ok(())
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}
