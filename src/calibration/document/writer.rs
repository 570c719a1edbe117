use crate::calibration::common::error::Result;
use crate::calibration::document::types::Matrix;

/// Write side of a key -> matrix document.
///
/// Nothing is guaranteed to reach the destination until `close` returns `Ok`.
pub trait MatrixDocumentWriter {
    fn put(&mut self, key: &str, matrix: &Matrix) -> Result<()>;

    fn close(self) -> Result<()>
    where
        Self: Sized;
}
