use ta_core::traits::{GLYPH_RESOLUTION, GlyphRasterizer, OccupancyGrid};

/// Côté des motifs intégrés.
const PATTERN_SIDE: usize = 5;

/// 5×5 pattern from five rows; bit 4 of each row is the leftmost column.
const fn bitmap(rows: [u8; 5]) -> u32 {
    let mut mask = 0u32;
    let mut row = 0;
    while row < PATTERN_SIDE {
        let mut col = 0;
        while col < PATTERN_SIDE {
            if rows[row] & (1 << (PATTERN_SIDE - 1 - col)) != 0 {
                mask |= 1 << (row * PATTERN_SIDE + col);
            }
            col += 1;
        }
        row += 1;
    }
    mask
}

/// Motifs 5×5 intégrés (bit `row * 5 + col` = encre).
const PATTERNS: &[(char, u32)] = &[
    (' ', bitmap([0b00000, 0b00000, 0b00000, 0b00000, 0b00000])),
    ('.', bitmap([0b00000, 0b00000, 0b00000, 0b00000, 0b00100])),
    (',', bitmap([0b00000, 0b00000, 0b00000, 0b00100, 0b01000])),
    (':', bitmap([0b00000, 0b00100, 0b00000, 0b00100, 0b00000])),
    ('-', bitmap([0b00000, 0b00000, 0b11111, 0b00000, 0b00000])),
    ('=', bitmap([0b00000, 0b11111, 0b00000, 0b11111, 0b00000])),
    ('|', bitmap([0b00100, 0b00100, 0b00100, 0b00100, 0b00100])),
    ('+', bitmap([0b00100, 0b00100, 0b11111, 0b00100, 0b00100])),
    ('*', bitmap([0b10101, 0b01110, 0b11111, 0b01110, 0b10101])),
    ('/', bitmap([0b00001, 0b00010, 0b00100, 0b01000, 0b10000])),
    ('\\', bitmap([0b10000, 0b01000, 0b00100, 0b00010, 0b00001])),
    ('%', bitmap([0b11001, 0b11010, 0b00100, 0b01011, 0b10011])),
    ('#', bitmap([0b01010, 0b11111, 0b01010, 0b11111, 0b01010])),
    ('@', bitmap([0b01110, 0b10001, 0b10111, 0b10000, 0b01110])),
    ('0', bitmap([0b01110, 0b10011, 0b10101, 0b11001, 0b01110])),
    ('1', bitmap([0b00100, 0b01100, 0b00100, 0b00100, 0b01110])),
    ('2', bitmap([0b11110, 0b00001, 0b01110, 0b10000, 0b11111])),
    ('3', bitmap([0b11110, 0b00001, 0b00110, 0b00001, 0b11110])),
    ('4', bitmap([0b10010, 0b10010, 0b11111, 0b00010, 0b00010])),
    ('5', bitmap([0b11111, 0b10000, 0b11110, 0b00001, 0b11110])),
    ('6', bitmap([0b01110, 0b10000, 0b11110, 0b10001, 0b01110])),
    ('7', bitmap([0b11111, 0b00010, 0b00100, 0b01000, 0b01000])),
    ('8', bitmap([0b01110, 0b10001, 0b01110, 0b10001, 0b01110])),
    ('9', bitmap([0b01110, 0b10001, 0b01111, 0b00001, 0b01110])),
    ('O', bitmap([0b01110, 0b10001, 0b10001, 0b10001, 0b01110])),
    ('A', bitmap([0b01110, 0b10001, 0b11111, 0b10001, 0b10001])),
    ('M', bitmap([0b10001, 0b11011, 0b10101, 0b10001, 0b10001])),
    ('W', bitmap([0b10001, 0b10001, 0b10101, 0b11011, 0b10001])),
    ('█', bitmap([0b11111, 0b11111, 0b11111, 0b11111, 0b11111])),
    ('░', bitmap([0b10100, 0b01010, 0b10100, 0b01010, 0b10100])),
    ('▒', bitmap([0b10101, 0b01010, 0b10101, 0b01010, 0b10101])),
    ('▓', bitmap([0b01011, 0b10101, 0b01011, 0b10101, 0b01011])),
];

/// Remplissage du centre vers les bords, pour les caractères sans motif.
const FILL_ORDER: [u32; 25] = [
    12, 7, 17, 11, 13, 6, 8, 16, 18, 2, 22, 10, 14, 1, 3, 21, 23, 5, 9, 15, 19, 0, 4, 20, 24,
];

/// Rasteriseur sans police : motifs 5×5 intégrés, agrandis en 16×16.
///
/// Characters without a built-in pattern get a centre-out fill whose density
/// depends on the character class, so lowercase, uppercase, digits and
/// punctuation still spread over distinct brightness levels.
///
/// # Example
/// ```
/// use ta_core::traits::GlyphRasterizer;
/// use ta_export::pattern::PatternRasterizer;
///
/// let raster = PatternRasterizer::new();
/// assert!(raster.render_glyph(' ').iter().flatten().all(|&background| background));
/// assert!(raster.render_glyph('#').iter().flatten().any(|&background| !background));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PatternRasterizer;

impl PatternRasterizer {
    /// Create a pattern rasterizer with the built-in table.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// 25-bit ink mask used for `ch`.
    #[must_use]
    pub fn pattern(ch: char) -> u32 {
        PATTERNS
            .iter()
            .find(|&&(c, _)| c == ch)
            .map_or_else(|| estimate_density(ch), |&(_, mask)| mask)
    }
}

fn estimate_density(ch: char) -> u32 {
    let base: usize = match ch {
        c if c.is_whitespace() || c.is_control() => 0,
        'a'..='z' => 10,
        'A'..='Z' => 13,
        _ if ch.is_ascii_punctuation() => 5,
        _ => 8,
    };
    let density = if base == 0 {
        0
    } else {
        // Décalage par code point : deux lettres voisines ne tombent pas au même niveau.
        (base + (u32::from(ch) % 4) as usize).min(FILL_ORDER.len())
    };
    FILL_ORDER
        .iter()
        .take(density)
        .fold(0, |mask, &bit| mask | (1 << bit))
}

impl GlyphRasterizer for PatternRasterizer {
    fn render_glyph(&self, ch: char) -> OccupancyGrid {
        let mask = Self::pattern(ch);
        let mut grid = [[true; GLYPH_RESOLUTION]; GLYPH_RESOLUTION];
        for (y, row) in grid.iter_mut().enumerate() {
            let py = y * PATTERN_SIDE / GLYPH_RESOLUTION;
            for (x, cell) in row.iter_mut().enumerate() {
                let px = x * PATTERN_SIDE / GLYPH_RESOLUTION;
                if mask & (1 << (py * PATTERN_SIDE + px)) != 0 {
                    *cell = false;
                }
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink(ch: char) -> usize {
        PatternRasterizer::new()
            .render_glyph(ch)
            .iter()
            .flatten()
            .filter(|&&background| !background)
            .count()
    }

    #[test]
    fn bitmap_layout_is_row_major() {
        assert_eq!(bitmap([0b10000, 0, 0, 0, 0]), 1);
        assert_eq!(bitmap([0, 0, 0, 0, 0b00001]), 1 << 24);
    }

    #[test]
    fn full_block_covers_everything() {
        assert_eq!(ink('█'), GLYPH_RESOLUTION * GLYPH_RESOLUTION);
        assert_eq!(ink(' '), 0);
    }

    #[test]
    fn scaling_preserves_position() {
        // '.' : encre uniquement dans la dernière ligne, colonne centrale.
        let grid = PatternRasterizer::new().render_glyph('.');
        assert!(grid[0].iter().all(|&background| background));
        assert!(!grid[GLYPH_RESOLUTION - 1][GLYPH_RESOLUTION / 2]);
        assert!(grid[GLYPH_RESOLUTION - 1][0]);
    }

    #[test]
    fn digits_are_not_all_alike() {
        let mut levels: Vec<usize> = ('0'..='9').map(ink).collect();
        levels.sort_unstable();
        levels.dedup();
        assert!(levels.len() > 4, "{levels:?}");
    }

    #[test]
    fn unknown_characters_get_some_ink() {
        assert!(ink('q') > 0);
        assert!(ink('Q') > ink('.'));
        assert_eq!(ink('\t'), 0);
    }
}
