use crate::calibration::common::error::{ConversionError, Result};
use crate::calibration::document::types::Matrix;

/// Read side of a key -> matrix document.
pub trait MatrixDocumentReader {
    /// Returns the matrix stored under `key`, or `ConversionError::MissingField`
    /// if the key is absent or does not hold a matrix.
    fn get(&self, key: &str) -> Result<Matrix>;

    /// Returns a real scalar stored under `key`.
    fn get_real(&self, key: &str) -> Result<f64> {
        Err(ConversionError::missing_field(key, "scalar values are not supported by this reader"))
    }

    fn contains(&self, key: &str) -> bool;

    /// Releases the underlying source.
    fn close(self) -> Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}
