use thiserror::Error;

/// Top-level error type for the Brickwork engine.
#[derive(Debug, Error)]
pub enum BrickworkError {
    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors raised while turning shape records into rasterizable shapes.
///
/// Geometry that falls outside the bounding box is not an error; it simply
/// produces no voxels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("unsupported shape kind: {0:?}")]
    UnsupportedShapeKind(String),

    #[error("{kind} shape is missing field `{field}`")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
}

/// Errors attached to a single rejected placement candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("invalid footprint {width}x{depth}: sides must be positive and stay on the grid")]
    InvalidFootprint { width: i32, depth: i32 },

    #[error("requested layer {0} is below ground")]
    InvalidLayer(i32),

    #[error("field `{field}` is not a finite integer")]
    NonIntegral { field: &'static str },
}

/// Errors related to build parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid parameter {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error("symmetry axis `auto` must be resolved by the caller")]
    UnresolvedAutoSymmetry,

    #[error("unknown symmetry selector: {0:?}")]
    UnknownSymmetry(String),
}

/// Convenience type alias for results using [`BrickworkError`].
pub type Result<T> = std::result::Result<T, BrickworkError>;
