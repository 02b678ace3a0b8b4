/// Configuration, types, and shared structures for tonascii.
///
/// This crate contains all shared types, traits, and configuration logic
/// used across the tonascii workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::CharSelection;
pub use config::{OutputMode, ShellConfig};
pub use error::CoreError;
pub use frame::{CharGrid, RasterImage};
pub use traits::{GLYPH_RESOLUTION, GlyphRasterizer, OccupancyGrid};
