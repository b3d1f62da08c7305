use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeomError {
    #[error("invalid WKB: {0}")]
    InvalidWkb(&'static str),

    #[error("unknown WKB type ({0})")]
    UnknownWkbType(u32),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("geozero error: {0}")]
    Geozero(#[from] geozero::error::GeozeroError),

    #[error("geometry is not a {0}")]
    WrongType(&'static str),

    #[error("invalid subtype {child} for {parent}")]
    InvalidSubtype {
        parent: &'static str,
        child: &'static str,
    },

    #[error("operation on mixed SRID geometries ({left} != {right})")]
    MixedSrid { left: i32, right: i32 },

    #[error("tolerance cannot be less than zero")]
    NegativeTolerance,

    #[error("{0} does not support max distance")]
    MaxDistanceUnsupported(&'static str),

    #[error("{0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(&'static str),
}

pub type Result<T> = std::result::Result<T, GeomError>;
