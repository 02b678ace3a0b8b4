use ta_core::error::CoreError;
use ta_core::frame::{CharGrid, RasterImage};

use crate::cache::BrightnessCache;
use crate::geometry::{pad, tile};
use crate::luminance::{Bt709, TileLuminance};
use crate::matcher::closest;
use crate::palette::CharacterPalette;

/// Enchaîne padding → tuiles → luminosité → matching pour une image.
///
/// # Example
/// ```
/// use ta_core::frame::RasterImage;
/// use ta_ascii::algorithm::AsciiArtAlgorithm;
/// use ta_ascii::cache::BrightnessCache;
/// use ta_ascii::palette::CharacterPalette;
///
/// let mut palette = CharacterPalette::new();
/// palette.insert_raw(' ', 1.0);
/// palette.insert_raw('0', 0.0);
/// let mut cache = BrightnessCache::new();
///
/// let image = RasterImage::filled(4, 4, (255, 255, 255));
/// let grid = AsciiArtAlgorithm::new().run(&image, 2, &palette, &mut cache).unwrap();
/// assert!(grid.cells().iter().all(|&c| c == ' '));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AsciiArtAlgorithm<L = Bt709> {
    luminance: L,
}

impl AsciiArtAlgorithm<Bt709> {
    /// Algorithme avec la luminance BT.709.
    #[must_use]
    pub fn new() -> Self {
        Self { luminance: Bt709 }
    }
}

impl<L: TileLuminance> AsciiArtAlgorithm<L> {
    /// Use a custom per-tile brightness function.
    #[must_use]
    pub fn with_luminance(luminance: L) -> Self {
        Self { luminance }
    }

    /// The per-tile brightness function in use.
    #[must_use]
    pub fn luminance(&self) -> &L {
        &self.luminance
    }

    /// Convert `image` into a `resolution × resolution` character grid.
    ///
    /// Tile brightnesses come from `cache` when this image (compared by
    /// content) was already converted at this resolution; otherwise every
    /// tile is computed and the whole vector is stored afterwards.
    ///
    /// # Errors
    /// - [`CoreError::EmptyPalette`] if `palette` is empty (checked first).
    /// - [`CoreError::DegenerateImage`] if the image has a zero side.
    /// - [`CoreError::InvalidResolution`] if `resolution` is 0 or larger
    ///   than a padded side.
    pub fn run(
        &self,
        image: &RasterImage,
        resolution: u32,
        palette: &CharacterPalette,
        cache: &mut BrightnessCache,
    ) -> Result<CharGrid, CoreError> {
        if palette.is_empty() {
            return Err(CoreError::EmptyPalette);
        }

        match cache.image_brightnesses(image, resolution) {
            Some(cached) => {
                log::debug!(
                    "Cache hit : image {}×{} à la résolution {resolution}",
                    image.width(),
                    image.height()
                );
                fill_grid(cached, resolution, palette)
            }
            None => {
                let computed = self.tile_brightnesses(image, resolution)?;
                let grid = fill_grid(&computed, resolution, palette)?;
                cache.set_image_brightnesses(image, resolution, computed);
                Ok(grid)
            }
        }
    }

    fn tile_brightnesses(&self, image: &RasterImage, resolution: u32) -> Result<Vec<f64>, CoreError> {
        let padded = pad(image)?;
        let tiles = tile(&padded, resolution)?;
        log::debug!(
            "Calcul de {} tuiles ({}×{} px paddés)",
            tiles.len(),
            padded.image().width(),
            padded.image().height()
        );
        Ok(tiles.iter().map(|t| self.luminance.brightness(t)).collect())
    }
}

/// Place le caractère de chaque tuile, dans l'ordre de parcours row-major.
fn fill_grid(
    brightnesses: &[f64],
    resolution: u32,
    palette: &CharacterPalette,
) -> Result<CharGrid, CoreError> {
    let cells = brightnesses
        .iter()
        .map(|&b| closest(b, palette))
        .collect::<Result<Vec<_>, _>>()?;
    CharGrid::from_cells(resolution, resolution, cells)
}

/// Convenience wrapper around [`AsciiArtAlgorithm::run`] with BT.709 luminance.
///
/// # Errors
/// See [`AsciiArtAlgorithm::run`].
pub fn run(
    image: &RasterImage,
    resolution: u32,
    palette: &CharacterPalette,
    cache: &mut BrightnessCache,
) -> Result<CharGrid, CoreError> {
    AsciiArtAlgorithm::new().run(image, resolution, palette, cache)
}
