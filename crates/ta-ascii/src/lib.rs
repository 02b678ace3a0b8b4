//! Moteur de conversion image → grille de caractères pour tonascii.
//!
//! Pipeline : [`geometry::pad`] → [`geometry::tile`] → luminance par tuile →
//! [`matcher::closest`] dans la [`palette::CharacterPalette`].
pub mod algorithm;
pub mod cache;
pub mod geometry;
pub mod glyph;
pub mod luminance;
pub mod matcher;
pub mod palette;

pub use algorithm::AsciiArtAlgorithm;
pub use cache::BrightnessCache;
pub use palette::CharacterPalette;
