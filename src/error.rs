//! Error types reported to the adapter layer.

use thiserror::Error;

/// Errors raised by the color model. None of them leave partial state behind:
/// when an operation fails the previous color stays authoritative.
#[derive(Error, Debug)]
pub enum ColorError {
    /// A color string that could not be read in the requested space, for
    /// example `#abcd` as hex or `rgb(300, 0, 0)` as RGB.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// A field name that is not part of any known color space.
    #[error("unsupported color space for field: {0:?}")]
    UnknownColorSpace(String),

    /// An options document that could not be deserialized.
    #[error("invalid picker options: {0}")]
    Options(#[from] toml::de::Error),
}

/// Result type alias using [`ColorError`].
pub type Result<T> = std::result::Result<T, ColorError>;
