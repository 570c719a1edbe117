//! Matrix value types shared by all document formats

use thiserror::Error;

/// Element type of a stored matrix, using OpenCV's single-letter codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// `u`: unsigned 8-bit
    U8,
    /// `c`: signed 8-bit
    I8,
    /// `w`: unsigned 16-bit
    U16,
    /// `s`: signed 16-bit
    I16,
    /// `i`: signed 32-bit
    I32,
    /// `f`: 32-bit float
    F32,
    /// `d`: 64-bit float
    F64,
}

impl ElementType {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'u' => Some(ElementType::U8),
            'c' => Some(ElementType::I8),
            'w' => Some(ElementType::U16),
            's' => Some(ElementType::I16),
            'i' => Some(ElementType::I32),
            'f' => Some(ElementType::F32),
            'd' => Some(ElementType::F64),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            ElementType::U8 => 'u',
            ElementType::I8 => 'c',
            ElementType::U16 => 'w',
            ElementType::I16 => 's',
            ElementType::I32 => 'i',
            ElementType::F32 => 'f',
            ElementType::F64 => 'd',
        }
    }

    /// Parses a `dt` descriptor such as `"d"` or `"3f"` into (channels, element type).
    pub fn parse_descriptor(dt: &str) -> Option<(usize, Self)> {
        let dt = dt.trim();
        let code = dt.chars().last()?;
        let element_type = Self::from_code(code)?;
        let prefix = &dt[..dt.len() - code.len_utf8()];
        let channels = if prefix.is_empty() {
            1
        } else {
            prefix.parse::<usize>().ok().filter(|&c| c > 0)?
        };
        Some((channels, element_type))
    }

    pub fn descriptor(self, channels: usize) -> String {
        if channels == 1 {
            self.code().to_string()
        } else {
            format!("{}{}", channels, self.code())
        }
    }
}

/// A dense row-major matrix as stored in a calibration document.
///
/// Values are held as `f64` regardless of the stored element type, which is
/// kept alongside so that identity copies round-trip their `dt`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub channels: usize,
    pub element_type: ElementType,
    pub data: Vec<f64>,
}

/// Error returned when a declared shape cannot hold the given data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape {rows}x{cols}x{channels} overflows the addressable element count")]
    Overflow {
        rows: usize,
        cols: usize,
        channels: usize,
    },

    #[error("expected {expected} elements, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl Matrix {
    /// Creates a single-channel `f64` matrix.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ShapeError> {
        Self::with_type(rows, cols, 1, ElementType::F64, data)
    }

    pub fn with_type(
        rows: usize,
        cols: usize,
        channels: usize,
        element_type: ElementType,
        data: Vec<f64>,
    ) -> Result<Self, ShapeError> {
        let expected = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(ShapeError::Overflow {
                rows,
                cols,
                channels,
            })?;
        if data.len() != expected {
            return Err(ShapeError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            channels,
            element_type,
            data,
        })
    }

    /// Builds a matrix from nested rows. Ragged input is rejected.
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self, ShapeError> {
        let cols = rows.first().map_or(0, |r| r.len());
        let data: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::new(rows.len(), cols, data)
    }

    /// An `n x 1` column vector, the shape OpenCV gives a 1-D array.
    pub fn column(values: &[f64]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            channels: 1,
            element_type: ElementType::F64,
            data: values.to_vec(),
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Self {
            rows: n,
            cols: n,
            channels: 1,
            element_type: ElementType::F64,
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element at (row, col) of the first channel.
    pub fn at(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get((row * self.cols + col) * self.channels).copied()
    }

    /// Element-wise division. The result is always `f64`.
    pub fn divided_by(&self, divisor: f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            channels: self.channels,
            element_type: ElementType::F64,
            data: self.data.iter().map(|v| v / divisor).collect(),
        }
    }

    pub fn descriptor(&self) -> String {
        self.element_type.descriptor(self.channels)
    }
}
