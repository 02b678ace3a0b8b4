//! Mémoïsation des luminosités, durée de vie = processus.

use std::collections::HashMap;

use ta_core::frame::RasterImage;

/// Cache des luminosités de tuiles (par image) et de glyphes (par caractère).
///
/// Passé explicitement aux appelants. Les entrées ne sont jamais évincées :
/// la cardinalité est bornée par les images et caractères réellement utilisés.
///
/// Image keys are structural: a distinct buffer with the same dimensions and
/// pixels hits the same entry. Each image holds one brightness vector per
/// resolution, in tile traversal order.
///
/// # Example
/// ```
/// use ta_core::frame::RasterImage;
/// use ta_ascii::cache::BrightnessCache;
///
/// let mut cache = BrightnessCache::new();
/// cache.set_image_brightnesses(&RasterImage::filled(2, 2, (0, 0, 0)), 1, vec![0.0]);
/// let copy = RasterImage::filled(2, 2, (0, 0, 0));
/// assert_eq!(cache.image_brightnesses(&copy, 1), Some(&[0.0][..]));
/// ```
#[derive(Debug, Default)]
pub struct BrightnessCache {
    images: HashMap<RasterImage, HashMap<u32, Vec<f64>>>,
    glyphs: HashMap<char, f64>,
}

impl BrightnessCache {
    /// Cache vide.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tile brightnesses previously stored for `image` at `resolution`.
    #[must_use]
    pub fn image_brightnesses(&self, image: &RasterImage, resolution: u32) -> Option<&[f64]> {
        self.images
            .get(image)
            .and_then(|by_res| by_res.get(&resolution))
            .map(Vec::as_slice)
    }

    /// Store the complete brightness vector for `image` at `resolution`.
    ///
    /// The vector is committed in one piece; a partial vector is never visible.
    pub fn set_image_brightnesses(
        &mut self,
        image: &RasterImage,
        resolution: u32,
        brightnesses: Vec<f64>,
    ) {
        if let Some(by_res) = self.images.get_mut(image) {
            by_res.insert(resolution, brightnesses);
        } else {
            self.images
                .insert(image.clone(), HashMap::from([(resolution, brightnesses)]));
        }
    }

    /// Raw (non-normalized) brightness of `ch`, if known.
    #[must_use]
    pub fn glyph_brightness(&self, ch: char) -> Option<f64> {
        self.glyphs.get(&ch).copied()
    }

    /// Store the raw brightness of `ch`.
    pub fn set_glyph_brightness(&mut self, ch: char, brightness: f64) {
        self.glyphs.insert(ch, brightness);
    }

    /// Nombre d'images distinctes en cache.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Nombre de caractères en cache.
    #[must_use]
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_copies_share_an_entry() {
        let mut cache = BrightnessCache::new();
        let a = RasterImage::from_fn(3, 3, |x, y| (x as u8, y as u8, 0));
        let b = RasterImage::new(3, 3, a.data().to_vec()).unwrap();
        cache.set_image_brightnesses(&a, 1, vec![0.25]);
        assert_eq!(cache.image_brightnesses(&b, 1), Some(&[0.25][..]));
        assert_eq!(cache.image_count(), 1);
    }

    #[test]
    fn different_pixels_miss() {
        let mut cache = BrightnessCache::new();
        cache.set_image_brightnesses(&RasterImage::filled(2, 2, (0, 0, 0)), 1, vec![0.0]);
        assert!(cache.image_brightnesses(&RasterImage::filled(2, 2, (0, 0, 1)), 1).is_none());
    }

    #[test]
    fn resolutions_are_kept_apart() {
        let mut cache = BrightnessCache::new();
        let img = RasterImage::filled(4, 4, (9, 9, 9));
        cache.set_image_brightnesses(&img, 1, vec![0.5]);
        cache.set_image_brightnesses(&img, 2, vec![0.5; 4]);
        assert_eq!(cache.image_brightnesses(&img, 1).map(<[f64]>::len), Some(1));
        assert_eq!(cache.image_brightnesses(&img, 2).map(<[f64]>::len), Some(4));
        assert!(cache.image_brightnesses(&img, 4).is_none());
        assert_eq!(cache.image_count(), 1);
    }

    #[test]
    fn glyph_round_trip() {
        let mut cache = BrightnessCache::new();
        assert_eq!(cache.glyph_brightness('x'), None);
        cache.set_glyph_brightness('x', 0.75);
        assert_eq!(cache.glyph_brightness('x'), Some(0.75));
        assert_eq!(cache.glyph_count(), 1);
    }
}
