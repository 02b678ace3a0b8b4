//! Palette de caractères et luminosités normalisées.

use std::collections::BTreeMap;

use ta_core::traits::GlyphRasterizer;

use crate::cache::BrightnessCache;
use crate::glyph::glyph_brightness;

/// Entrée de palette : luminosité brute et normalisée.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteEntry {
    /// Luminosité du glyphe, indépendante de la palette.
    pub raw: f64,
    /// `raw` remis à l'échelle sur [min, max] de la palette courante.
    pub normalized: f64,
}

/// Working character set, ordered by code point.
///
/// Normalized brightnesses are recomputed for the whole palette after every
/// mutation: with two or more distinct raw values the minimum maps to 0.0 and
/// the maximum to 1.0. With fewer than two entries, or when every raw value is
/// equal, the raw values are used as-is.
///
/// An empty palette is a valid state; it only fails when used for matching.
///
/// # Example
/// ```
/// use ta_ascii::palette::CharacterPalette;
///
/// let mut palette = CharacterPalette::new();
/// palette.insert_raw('#', 0.2);
/// palette.insert_raw('.', 0.8);
/// palette.insert_raw(' ', 1.0);
/// assert_eq!(palette.characters(), vec![' ', '#', '.']);
/// assert_eq!(palette.brightness_of('#'), Some(0.0));
/// assert_eq!(palette.brightness_of(' '), Some(1.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CharacterPalette {
    entries: BTreeMap<char, PaletteEntry>,
}

impl CharacterPalette {
    /// Palette vide.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a palette from `chars`, rendering glyphs not yet in `cache`.
    #[must_use]
    pub fn from_chars<R: GlyphRasterizer + ?Sized>(
        chars: impl IntoIterator<Item = char>,
        cache: &mut BrightnessCache,
        rasterizer: &R,
    ) -> Self {
        let mut palette = Self::new();
        palette.add_all(chars, cache, rasterizer);
        palette
    }

    /// Add `ch` (or overwrite it) and renormalize.
    ///
    /// The raw brightness comes from `cache` when present; otherwise the glyph
    /// is rendered with `rasterizer` and the result stored in `cache`.
    pub fn add<R: GlyphRasterizer + ?Sized>(
        &mut self,
        ch: char,
        cache: &mut BrightnessCache,
        rasterizer: &R,
    ) {
        let raw = Self::lookup_raw(ch, cache, rasterizer);
        self.put(ch, raw);
        self.renormalize();
    }

    /// Add every character of `chars`, renormalizing once at the end.
    pub fn add_all<R: GlyphRasterizer + ?Sized>(
        &mut self,
        chars: impl IntoIterator<Item = char>,
        cache: &mut BrightnessCache,
        rasterizer: &R,
    ) {
        for ch in chars {
            let raw = Self::lookup_raw(ch, cache, rasterizer);
            self.put(ch, raw);
        }
        self.renormalize();
    }

    /// Insert `ch` with a known raw brightness and renormalize.
    pub fn insert_raw(&mut self, ch: char, raw: f64) {
        self.put(ch, raw);
        self.renormalize();
    }

    /// Remove `ch` if present and renormalize. Returns whether it was a member.
    pub fn remove(&mut self, ch: char) -> bool {
        let removed = self.entries.remove(&ch).is_some();
        self.renormalize();
        removed
    }

    /// Remove every character of `chars`, renormalizing once at the end.
    pub fn remove_all(&mut self, chars: impl IntoIterator<Item = char>) {
        for ch in chars {
            self.entries.remove(&ch);
        }
        self.renormalize();
    }

    /// Number of characters.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no character is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `ch` is in the palette.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    /// Characters in ascending code-point order.
    #[must_use]
    pub fn characters(&self) -> Vec<char> {
        self.entries.keys().copied().collect()
    }

    /// Normalized brightness of `ch`.
    #[must_use]
    pub fn brightness_of(&self, ch: char) -> Option<f64> {
        self.entries.get(&ch).map(|e| e.normalized)
    }

    /// Raw brightness of `ch`.
    #[must_use]
    pub fn raw_brightness_of(&self, ch: char) -> Option<f64> {
        self.entries.get(&ch).map(|e| e.raw)
    }

    /// `(character, normalized brightness)` in ascending code-point order.
    pub fn entries(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.entries.iter().map(|(&ch, e)| (ch, e.normalized))
    }

    fn lookup_raw<R: GlyphRasterizer + ?Sized>(
        ch: char,
        cache: &mut BrightnessCache,
        rasterizer: &R,
    ) -> f64 {
        if let Some(raw) = cache.glyph_brightness(ch) {
            return raw;
        }
        let raw = glyph_brightness(ch, rasterizer);
        log::debug!("Glyphe {ch:?} rasterisé : luminosité brute {raw:.4}");
        cache.set_glyph_brightness(ch, raw);
        raw
    }

    fn put(&mut self, ch: char, raw: f64) {
        self.entries.insert(ch, PaletteEntry {
            raw,
            normalized: raw,
        });
    }

    fn renormalize(&mut self) {
        let (min, max) = self
            .entries
            .values()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), e| {
                (lo.min(e.raw), hi.max(e.raw))
            });
        let span = max - min;

        if self.entries.len() < 2 || span <= 0.0 {
            for e in self.entries.values_mut() {
                e.normalized = e.raw;
            }
            return;
        }

        for e in self.entries.values_mut() {
            e.normalized = (e.raw - min) / span;
        }
        log::debug!(
            "Palette renormalisée : {} caractères, brut [{min:.4}, {max:.4}]",
            self.entries.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use ta_core::traits::{GLYPH_RESOLUTION, OccupancyGrid};

    /// Rasteriseur de test : `n` cellules allumées pour le code point `n`.
    struct CodePointRasterizer {
        calls: Cell<usize>,
    }

    impl CodePointRasterizer {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }
    }

    impl GlyphRasterizer for CodePointRasterizer {
        fn render_glyph(&self, ch: char) -> OccupancyGrid {
            self.calls.set(self.calls.get() + 1);
            let mut grid = [[false; GLYPH_RESOLUTION]; GLYPH_RESOLUTION];
            let on = (ch as usize).min(GLYPH_RESOLUTION * GLYPH_RESOLUTION);
            for i in 0..on {
                grid[i / GLYPH_RESOLUTION][i % GLYPH_RESOLUTION] = true;
            }
            grid
        }
    }

    fn assert_normalized_span(palette: &CharacterPalette) {
        let values: Vec<f64> = palette.entries().map(|(_, b)| b).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(min.abs() < 1e-12, "min = {min}");
        assert!((max - 1.0).abs() < 1e-12, "max = {max}");
    }

    #[test]
    fn span_is_zero_to_one_after_mutations() {
        let mut cache = BrightnessCache::new();
        let raster = CodePointRasterizer::new();
        let mut palette = CharacterPalette::from_chars("0123456789".chars(), &mut cache, &raster);
        assert_normalized_span(&palette);

        palette.add('A', &mut cache, &raster);
        assert_normalized_span(&palette);
        palette.remove('0');
        assert_normalized_span(&palette);
        palette.remove('A');
        assert_normalized_span(&palette);
        palette.remove_all('1'..='7');
        assert_eq!(palette.characters(), vec!['8', '9']);
        assert_normalized_span(&palette);
    }

    #[test]
    fn span_holds_for_generated_sequences() {
        let mut cache = BrightnessCache::new();
        let raster = CodePointRasterizer::new();
        let pool: Vec<char> = ('!'..='~').collect();

        for seed in 0u32..32 {
            let mut palette = CharacterPalette::new();
            // LCG déterministe : suite d'ajouts/retraits différente par graine.
            let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
            for _ in 0..64 {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let ch = pool[(state >> 8) as usize % pool.len()];
                if (state >> 28) % 3 == 0 {
                    palette.remove(ch);
                } else {
                    palette.add(ch, &mut cache, &raster);
                }

                let distinct_raw = {
                    let mut raws: Vec<u64> = palette
                        .characters()
                        .iter()
                        .filter_map(|&c| palette.raw_brightness_of(c))
                        .map(f64::to_bits)
                        .collect();
                    raws.sort_unstable();
                    raws.dedup();
                    raws.len()
                };
                if distinct_raw >= 2 {
                    assert_normalized_span(&palette);
                }
                for (c, b) in palette.entries() {
                    assert!((0.0..=1.0).contains(&b), "seed {seed}: {c:?} -> {b}");
                }
            }
        }
    }

    #[test]
    fn single_entry_keeps_raw_value() {
        let mut cache = BrightnessCache::new();
        let raster = CodePointRasterizer::new();
        let mut palette = CharacterPalette::new();
        palette.add('@', &mut cache, &raster);
        assert_eq!(palette.brightness_of('@'), Some(64.0 / 256.0));

        palette.insert_raw('x', 0.9);
        palette.remove('@');
        assert_eq!(palette.brightness_of('x'), Some(0.9));
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.unwrap();
        assert!((actual - expected).abs() < 1e-12, "{actual} != {expected}");
    }

    #[test]
    fn renormalizes_from_raw_values() {
        let mut palette = CharacterPalette::new();
        palette.insert_raw('a', 0.2);
        palette.insert_raw('b', 0.4);
        palette.insert_raw('c', 0.6);
        assert_close(palette.brightness_of('b'), 0.5);

        // Retirer le minimum doit recalculer depuis les valeurs brutes.
        palette.remove('a');
        assert_close(palette.brightness_of('b'), 0.0);
        palette.insert_raw('a', 0.2);
        assert_close(palette.brightness_of('b'), 0.5);
        assert_eq!(palette.raw_brightness_of('b'), Some(0.4));
    }

    #[test]
    fn equal_raw_values_skip_normalization() {
        let mut palette = CharacterPalette::new();
        palette.insert_raw('a', 0.3);
        palette.insert_raw('b', 0.3);
        assert_eq!(palette.brightness_of('a'), Some(0.3));
        assert_eq!(palette.brightness_of('b'), Some(0.3));
    }

    #[test]
    fn adding_existing_char_keeps_size() {
        let mut cache = BrightnessCache::new();
        let raster = CodePointRasterizer::new();
        let mut palette = CharacterPalette::from_chars(['a', 'b'], &mut cache, &raster);
        let before: Vec<_> = palette.entries().collect();
        palette.add('a', &mut cache, &raster);
        assert_eq!(palette.size(), 2);
        assert_eq!(palette.entries().collect::<Vec<_>>(), before);
    }

    #[test]
    fn glyphs_are_rendered_once() {
        let mut cache = BrightnessCache::new();
        let raster = CodePointRasterizer::new();
        let mut palette = CharacterPalette::from_chars(['x', 'y'], &mut cache, &raster);
        assert_eq!(raster.calls.get(), 2);

        palette.remove('x');
        palette.add('x', &mut cache, &raster);
        let other = CharacterPalette::from_chars(['x', 'y'], &mut cache, &raster);
        assert_eq!(raster.calls.get(), 2);
        assert_eq!(other.characters(), palette.characters());
        assert_eq!(cache.glyph_count(), 2);
    }

    #[test]
    fn cache_stores_raw_not_normalized() {
        let mut cache = BrightnessCache::new();
        let raster = CodePointRasterizer::new();
        let _palette = CharacterPalette::from_chars(['0', '9'], &mut cache, &raster);
        assert_eq!(cache.glyph_brightness('0'), Some(48.0 / 256.0));
        assert_eq!(cache.glyph_brightness('9'), Some(57.0 / 256.0));
    }

    #[test]
    fn removing_non_member_is_silent() {
        let mut palette = CharacterPalette::new();
        assert!(!palette.remove('z'));
        assert!(palette.is_empty());
        palette.insert_raw('z', 0.1);
        assert!(palette.remove('z'));
        assert!(!palette.contains('z'));
    }
}
