//! Source -> destination field table

/// How a source matrix is turned into its destination value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTransform {
    Identity,
    /// Divide element-wise by the configured translation divisor.
    ScaleTranslation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub source: &'static str,
    pub destination: &'static str,
    pub transform: FieldTransform,
}

const fn identity(source: &'static str, destination: &'static str) -> FieldMapping {
    FieldMapping {
        source,
        destination,
        transform: FieldTransform::Identity,
    }
}

pub const FIELD_MAPPINGS: [FieldMapping; 6] = [
    identity("cam_K", "cam_int"),
    identity("cam_kc", "cam_dist"),
    identity("proj_K", "proj_int"),
    identity("proj_kc", "proj_dist"),
    identity("R", "rotation"),
    FieldMapping {
        source: "T",
        destination: "translation",
        transform: FieldTransform::ScaleTranslation,
    },
];

/// Destination key of the constant image shape. It has no source field.
pub const IMAGE_SHAPE_KEY: &str = "img_shape";

/// Optional scalar quality figures reported after a conversion, never written.
pub const REPROJECTION_ERROR_KEYS: [&str; 3] = ["cam_error", "proj_error", "stereo_error"];
