use crate::geometry::Tile;

/// Coefficients BT.709 (R, G, B).
pub const BT709: (f64, f64, f64) = (0.2126, 0.7152, 0.0722);

const MAX_CHANNEL: f64 = 255.0;

/// Calcule la luminosité d'une tuile dans [0, 1].
///
/// Seam used by the orchestrator so that tests can observe or replace the
/// per-tile computation.
pub trait TileLuminance {
    /// Brightness of `tile`, in [0, 1].
    fn brightness(&self, tile: &Tile<'_>) -> f64;
}

/// Luminance perceptuelle BT.709 moyennée sur la tuile.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bt709;

impl TileLuminance for Bt709 {
    #[inline]
    fn brightness(&self, tile: &Tile<'_>) -> f64 {
        tile_brightness(tile)
    }
}

/// Mean BT.709 luma of a tile, divided by 255.
///
/// Uniform white gives 1.0, uniform black 0.0.
///
/// # Example
/// ```
/// use ta_core::frame::RasterImage;
/// use ta_ascii::geometry::{pad, tile};
/// use ta_ascii::luminance::tile_brightness;
///
/// let padded = pad(&RasterImage::filled(4, 4, (255, 255, 255))).unwrap();
/// let tiles = tile(&padded, 2).unwrap();
/// assert!((tile_brightness(&tiles[0]) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn tile_brightness(tile: &Tile<'_>) -> f64 {
    let (kr, kg, kb) = BT709;
    let sum: f64 = tile
        .pixels()
        .map(|(r, g, b)| kr * f64::from(r) + kg * f64::from(g) + kb * f64::from(b))
        .sum();
    sum / (tile.pixel_count() as f64 * MAX_CHANNEL)
}
