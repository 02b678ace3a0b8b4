use thiserror::Error;

/// Errors originating from the core pipeline.
///
/// Every variant is local to the requested operation: nothing in the palette
/// or in the brightness cache is left half-updated when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Matching or running attempted with zero characters in the palette.
    #[error("Palette vide : aucun caractère disponible")]
    EmptyPalette,

    /// Source image has a zero width or height.
    #[error("Image dégénérée : {width}×{height}")]
    DegenerateImage {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Resolution is zero or larger than the padded image.
    #[error("Résolution {resolution} invalide pour une image {width}×{height}")]
    InvalidResolution {
        /// Requested tiles per side.
        resolution: u32,
        /// Padded width in pixels.
        width: u32,
        /// Padded height in pixels.
        height: u32,
    },

    /// Pixel buffer does not match the declared width/height.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}
