use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, point};
use anyhow::{Context, Result};
use ta_core::traits::{GLYPH_RESOLUTION, GlyphRasterizer, OccupancyGrid};

/// Pen position as a fraction of the cell side.
const PEN_X_FACTOR: f32 = 0.2;
/// Baseline position as a fraction of the cell side.
const BASELINE_FACTOR: f32 = 0.75;
/// Couverture minimale pour qu'un pixel compte comme encré.
const INK_THRESHOLD: f32 = 0.5;

/// Rasterise des caractères avec une police TrueType/OpenType.
///
/// Le glyphe est dessiné à 16 px par em, plume en `x = 3`, ligne de base en
/// `y = 12`, sans anti-aliasing : une couverture `>= 0.5` est de l'encre.
/// Les caractères absents de la police sont rendus vides.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use ta_core::traits::GlyphRasterizer;
/// use ta_export::rasterizer::FontRasterizer;
///
/// let raster = FontRasterizer::from_file(Path::new("fonts/cour.ttf")).unwrap();
/// let grid = raster.render_glyph('#');
/// assert!(grid.iter().flatten().any(|&background| !background));
/// ```
pub struct FontRasterizer {
    font: FontVec,
    scale: PxScale,
}

impl FontRasterizer {
    /// Load a font file from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid font.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Impossible de lire la police {}", path.display()))?;
        let raster = Self::from_bytes(data)
            .with_context(|| format!("Police invalide : {}", path.display()))?;
        log::info!("Police chargée : {}", path.display());
        Ok(raster)
    }

    /// Parse font data held in memory.
    ///
    /// # Errors
    /// Retourne une erreur si les données ne forment pas une police valide.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(data)?;
        let scale = em_scale(&font, GLYPH_RESOLUTION as f32);
        Ok(Self { font, scale })
    }
}

/// `PxScale` tel qu'un em mesure `px_per_em` pixels.
fn em_scale(font: &FontVec, px_per_em: f32) -> PxScale {
    match font.units_per_em() {
        Some(units) if units > 0.0 => PxScale::from(px_per_em * font.height_unscaled() / units),
        _ => PxScale::from(px_per_em),
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn render_glyph(&self, ch: char) -> OccupancyGrid {
        let mut grid = [[true; GLYPH_RESOLUTION]; GLYPH_RESOLUTION];

        let gid = self.font.glyph_id(ch);
        // glyph_id 0 = .notdef
        if gid.0 == 0 {
            log::debug!("Glyphe {ch:?} absent de la police, rendu vide");
            return grid;
        }

        let side = GLYPH_RESOLUTION as f32;
        let pen = point((side * PEN_X_FACTOR).round(), (side * BASELINE_FACTOR).round());
        let glyph = gid.with_scale_and_position(self.scale, pen);

        if let Some(outline) = self.font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            outline.draw(|x, y, coverage| {
                if coverage < INK_THRESHOLD {
                    return;
                }
                let px = cell_index(x as i32 + bounds.min.x as i32);
                let py = cell_index(y as i32 + bounds.min.y as i32);
                if let (Some(px), Some(py)) = (px, py) {
                    grid[py][px] = false;
                }
            });
        }
        grid
    }
}

/// Index dans la grille, ou `None` hors cellule.
fn cell_index(p: i32) -> Option<usize> {
    usize::try_from(p).ok().filter(|&p| p < GLYPH_RESOLUTION)
}
