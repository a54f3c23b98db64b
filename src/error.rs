use std::path::PathBuf;

use thiserror::Error;

/// Misconfigured world-file parameters. Raised once when a `GeoTransform` is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("degenerate {axis} scale {value}: world-file pixel size must be finite and non-zero")]
    DegenerateScale { axis: &'static str, value: f64 },

    #[error("non-finite {axis} origin {value}")]
    NonFiniteOrigin { axis: &'static str, value: f64 },
}

/// Failures while loading the atlas manifest and snapshot feed.
#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest {}: {message}", path.display())]
    Manifest { path: PathBuf, message: String },

    #[error("invalid GeoJSON in {}: {source}", path.display())]
    GeoJson {
        path: PathBuf,
        #[source]
        source: Box<geojson::Error>,
    },

    #[error("invalid transform: {0}")]
    Transform(#[from] TransformError),

    #[error("unknown place kind {kind:?} for {name}")]
    UnknownKind { name: String, kind: String },

    #[error("river width {0} outside 1..=10")]
    RiverWidth(i64),

    #[error("river width {0} is not a whole number")]
    NonIntegerWidth(String),

    #[error("duplicate place {name} in snapshot {date}")]
    DuplicatePlace { name: String, date: String },

    #[error("invalid snapshot date {0:?}")]
    Date(String),

    #[error("timeline has no snapshots")]
    EmptyTimeline,
}

pub type Result<T> = std::result::Result<T, AtlasError>;
