//! Converter configuration types

/// Image resolution (height, width) written to `img_shape`.
pub const DEFAULT_IMAGE_SHAPE: [f64; 2] = [1080.0, 1920.0];

/// Source translation is in millimeters; the output is in meters.
pub const DEFAULT_TRANSLATION_DIVISOR: f64 = 1000.0;

/// Configuration for calibration document conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Value written under `img_shape`, as (height, width)
    pub image_shape: [f64; 2],
    /// Element-wise divisor applied to `T` before it is written as `translation`
    pub translation_divisor: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            image_shape: DEFAULT_IMAGE_SHAPE,
            translation_divisor: DEFAULT_TRANSLATION_DIVISOR,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    image_shape: Option<[f64; 2]>,
    translation_divisor: Option<f64>,
}

impl ConversionConfigBuilder {
    pub fn image_shape(mut self, height: f64, width: f64) -> Self {
        self.image_shape = Some([height, width]);
        self
    }

    pub fn translation_divisor(mut self, divisor: f64) -> Self {
        self.translation_divisor = Some(divisor);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            image_shape: self.image_shape.unwrap_or(default.image_shape),
            translation_divisor: self.translation_divisor.unwrap_or(default.translation_divisor),
        }
    }
}
