use ta_core::traits::{GLYPH_RESOLUTION, GlyphRasterizer, OccupancyGrid};

/// Raw glyph brightness: fraction of `true` (ink-free) cells.
///
/// # Example
/// ```
/// use ta_core::traits::GLYPH_RESOLUTION;
/// use ta_ascii::glyph::raw_brightness;
///
/// let mut grid = [[true; GLYPH_RESOLUTION]; GLYPH_RESOLUTION];
/// assert_eq!(raw_brightness(&grid), 1.0);
/// grid[0] = [false; GLYPH_RESOLUTION];
/// assert_eq!(raw_brightness(&grid), 15.0 / 16.0);
/// ```
#[must_use]
pub fn raw_brightness(grid: &OccupancyGrid) -> f64 {
    let on = grid.iter().flatten().filter(|&&cell| cell).count();
    on as f64 / (GLYPH_RESOLUTION * GLYPH_RESOLUTION) as f64
}

/// Rasterise `ch` puis calcule sa luminosité brute.
#[must_use]
pub fn glyph_brightness<R: GlyphRasterizer + ?Sized>(ch: char, rasterizer: &R) -> f64 {
    raw_brightness(&rasterizer.render_glyph(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_is_dark() {
        let grid = [[false; GLYPH_RESOLUTION]; GLYPH_RESOLUTION];
        assert_eq!(raw_brightness(&grid), 0.0);
    }

    #[test]
    fn counts_every_true_cell() {
        let mut grid = [[false; GLYPH_RESOLUTION]; GLYPH_RESOLUTION];
        grid[3][7] = true;
        grid[15][0] = true;
        assert_eq!(raw_brightness(&grid), 2.0 / 256.0);
    }
}
