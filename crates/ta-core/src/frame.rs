use std::fmt;

use crate::error::CoreError;

/// Image raster immuable, RGB 8 bits, row-major, 3 bytes par pixel.
///
/// L'égalité et le hash sont structurels (dimensions + contenu complet) :
/// deux buffers distincts avec les mêmes pixels sont la même clé de cache.
///
/// # Example
/// ```
/// use ta_core::frame::RasterImage;
/// let a = RasterImage::filled(4, 2, (255, 255, 255));
/// let b = RasterImage::new(4, 2, vec![255; 4 * 2 * 3]).unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RasterImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

/// Pixel blanc utilisé pour le remplissage des bordures.
pub const WHITE: (u8, u8, u8) = (255, 255, 255);

impl RasterImage {
    /// Wrap a raw RGB buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 3`.
    ///
    /// # Example
    /// ```
    /// use ta_core::frame::RasterImage;
    /// assert!(RasterImage::new(2, 2, vec![0; 12]).is_ok());
    /// assert!(RasterImage::new(2, 2, vec![0; 11]).is_err());
    /// ```
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3));
        if expected != Some(data.len()) {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Crée une image uniforme.
    ///
    /// # Example
    /// ```
    /// use ta_core::frame::RasterImage;
    /// let img = RasterImage::filled(3, 1, (10, 20, 30));
    /// assert_eq!(img.pixel(2, 0), (10, 20, 30));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgb: (u8, u8, u8)) -> Self {
        Self::from_fn(width, height, |_, _| rgb)
    }

    /// Build an image by evaluating `f(x, y)` for every pixel, row by row.
    ///
    /// # Example
    /// ```
    /// use ta_core::frame::RasterImage;
    /// let img = RasterImage::from_fn(2, 2, |x, y| ((x * 100) as u8, (y * 100) as u8, 0));
    /// assert_eq!(img.pixel(1, 0), (100, 0, 0));
    /// assert_eq!(img.pixel(0, 1), (0, 100, 0));
    /// ```
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> (u8, u8, u8)) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                let (r, g, b) = f(x, y);
                data.extend_from_slice(&[r, g, b]);
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Zéro pixel sur au moins un axe.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGB bytes, row-major.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Accès au pixel (x = colonne, y = ligne) → (r, g, b).
    ///
    /// # Panics
    /// Panics if `(x, y)` is outside the image.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Grille de sortie : un caractère par tuile, row-major.
///
/// # Example
/// ```
/// use ta_core::frame::CharGrid;
/// let mut grid = CharGrid::new(3, 2);
/// grid.set(2, 1, '@');
/// assert_eq!(grid.get(2, 1), '@');
/// assert_eq!(grid.rows().count(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    cells: Vec<char>,
    width: u32,
    height: u32,
}

impl CharGrid {
    /// Crée une grille remplie d'espaces.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![' '; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Build a grid from cells already in row-major order.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if the cell count does not
    /// match `width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<char>) -> Result<Self, CoreError> {
        if cells.len() != width as usize * height as usize {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Width in characters.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in characters.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set the cell at column `x`, row `y`.
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, ch: char) {
        self.cells[y as usize * self.width as usize + x as usize] = ch;
    }

    /// Get the cell at column `x`, row `y`.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> char {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// All cells, row-major.
    #[must_use]
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }
}
