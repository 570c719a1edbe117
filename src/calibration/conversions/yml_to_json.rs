use std::path::Path;

use tracing::{debug, info, instrument};

use crate::calibration::{
    common::error::Result,
    conversions::config::ConversionConfig,
    conversions::mapping::{FIELD_MAPPINGS, FieldTransform, IMAGE_SHAPE_KEY, REPROJECTION_ERROR_KEYS},
    document::{Matrix, MatrixDocumentReader, MatrixDocumentWriter},
    json::OpenCvJsonWriter,
    yaml::OpenCvYamlReader,
};

/// Converts a projector-camera calibration result into the renderer's layout.
#[derive(Debug, Clone, Default)]
pub struct CalibrationConverter {
    config: ConversionConfig,
}

impl CalibrationConverter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Reads the six source matrices from `reader` and writes the seven
    /// destination matrices to `writer`. Stops at the first failure.
    ///
    /// The writer is not closed here; the caller owns its lifetime.
    #[instrument(skip(self, reader, writer))]
    pub fn convert_documents<R, W>(&self, reader: &R, writer: &mut W) -> Result<()>
    where
        R: MatrixDocumentReader,
        W: MatrixDocumentWriter,
    {
        info!("Starting calibration conversion");

        for mapping in FIELD_MAPPINGS.iter() {
            let _span = tracing::info_span!(
                "convert_field",
                source = mapping.source,
                destination = mapping.destination
            )
            .entered();

            let matrix = reader.get(mapping.source)?;
            let matrix = match mapping.transform {
                FieldTransform::Identity => matrix,
                FieldTransform::ScaleTranslation => {
                    matrix.divided_by(self.config.translation_divisor)
                }
            };
            writer.put(mapping.destination, &matrix)?;
        }

        writer.put(IMAGE_SHAPE_KEY, &Matrix::column(&self.config.image_shape))?;

        for (key, value) in reprojection_errors(reader) {
            info!(key, value, "Reprojection error");
        }

        info!(fields = FIELD_MAPPINGS.len() + 1, "Conversion complete");
        Ok(())
    }

    /// Converts the OpenCV YAML document at `source_path` into an OpenCV JSON
    /// document at `destination_path`, creating or overwriting it.
    ///
    /// The destination is created before any field is read. On failure it is
    /// left empty rather than holding a partial document.
    #[instrument(skip(self, source_path, destination_path))]
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        source_path: P,
        destination_path: Q,
    ) -> Result<()> {
        let source_path = source_path.as_ref();
        let destination_path = destination_path.as_ref();

        info!(
            input = %source_path.display(),
            output = %destination_path.display(),
            "Converting file"
        );

        let reader = {
            let _span = tracing::info_span!("open_input_file").entered();
            OpenCvYamlReader::open(source_path)?
        };

        let mut writer = {
            let _span = tracing::info_span!("create_output_file").entered();
            OpenCvJsonWriter::create(destination_path)?
        };

        self.convert_documents(&reader, &mut writer)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            writer.close()?;
        }
        reader.close()?;

        Ok(())
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) {
        self.config = config;
    }
}

/// Scalar reprojection errors present in the source document, in report order.
pub(crate) fn reprojection_errors<R: MatrixDocumentReader>(reader: &R) -> Vec<(&'static str, f64)> {
    REPROJECTION_ERROR_KEYS
        .iter()
        .filter(|key| reader.contains(key))
        .filter_map(|&key| match reader.get_real(key) {
            Ok(value) => Some((key, value)),
            Err(e) => {
                debug!("Skipping {}: {}", key, e);
                None
            }
        })
        .collect()
}

/// Converts `source_path` to `destination_path` with the default configuration.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(source_path: P, destination_path: Q) -> Result<()> {
    CalibrationConverter::default().convert_file(source_path, destination_path)
}
