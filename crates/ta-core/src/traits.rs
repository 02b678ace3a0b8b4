/// Côté de la grille d'occupation d'un glyphe, partagé avec les rasteriseurs.
pub const GLYPH_RESOLUTION: usize = 16;

/// Bitmap carré d'un glyphe rendu : `true` = cellule sans encre (fond).
pub type OccupancyGrid = [[bool; GLYPH_RESOLUTION]; GLYPH_RESOLUTION];

/// Rend un caractère en grille d'occupation booléenne.
///
/// Implémenté par : `FontRasterizer` (police TrueType), `PatternRasterizer`
/// (motifs intégrés).
///
/// # Example
/// ```
/// use ta_core::traits::{GlyphRasterizer, OccupancyGrid, GLYPH_RESOLUTION};
///
/// struct Blank;
/// impl GlyphRasterizer for Blank {
///     fn render_glyph(&self, _ch: char) -> OccupancyGrid {
///         [[true; GLYPH_RESOLUTION]; GLYPH_RESOLUTION]
///     }
/// }
/// assert!(Blank.render_glyph('x')[0][0]);
/// ```
pub trait GlyphRasterizer {
    /// Rasterise `ch`. Un caractère inconnu du rasteriseur rend une grille vide
    /// (toutes les cellules à `true`).
    fn render_glyph(&self, ch: char) -> OccupancyGrid;
}

impl<T: GlyphRasterizer + ?Sized> GlyphRasterizer for Box<T> {
    fn render_glyph(&self, ch: char) -> OccupancyGrid {
        (**self).render_glyph(ch)
    }
}
