//! Padding aux puissances de deux et découpage en tuiles.

use ta_core::error::CoreError;
use ta_core::frame::{RasterImage, WHITE};

/// Image dont chaque dimension est une puissance de deux, contenu source
/// centré sur fond blanc.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaddedImage {
    image: RasterImage,
    offset_x: u32,
    offset_y: u32,
}

impl PaddedImage {
    /// The padded raster.
    #[must_use]
    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    /// Column where the source content starts.
    #[must_use]
    pub fn offset_x(&self) -> u32 {
        self.offset_x
    }

    /// Row where the source content starts.
    #[must_use]
    pub fn offset_y(&self) -> u32 {
        self.offset_y
    }

    /// Unwrap into the padded raster.
    #[must_use]
    pub fn into_image(self) -> RasterImage {
        self.image
    }
}

/// Pad `image` to the next power of two on each axis.
///
/// The source is centred with offset `(new - old) / 2`; an odd remainder
/// leaves the extra white column/row on the right/bottom. Images that are
/// already power-of-two sized come back unchanged.
///
/// # Errors
/// [`CoreError::DegenerateImage`] if width or height is 0,
/// [`CoreError::InvalidDimensions`] if a side has no representable power of two.
///
/// # Example
/// ```
/// use ta_core::frame::RasterImage;
/// use ta_ascii::geometry::pad;
///
/// let padded = pad(&RasterImage::filled(5, 3, (0, 0, 0))).unwrap();
/// assert_eq!((padded.image().width(), padded.image().height()), (8, 4));
/// assert_eq!((padded.offset_x(), padded.offset_y()), (1, 0));
/// ```
pub fn pad(image: &RasterImage) -> Result<PaddedImage, CoreError> {
    let (width, height) = (image.width(), image.height());
    if image.is_degenerate() {
        return Err(CoreError::DegenerateImage { width, height });
    }

    let invalid = CoreError::InvalidDimensions { width, height };
    let new_width = width.checked_next_power_of_two().ok_or(invalid.clone())?;
    let new_height = height.checked_next_power_of_two().ok_or(invalid)?;

    if new_width == width && new_height == height {
        return Ok(PaddedImage {
            image: image.clone(),
            offset_x: 0,
            offset_y: 0,
        });
    }

    let offset_x = (new_width - width) / 2;
    let offset_y = (new_height - height) / 2;

    let padded = RasterImage::from_fn(new_width, new_height, |x, y| {
        let inside = (offset_x..offset_x + width).contains(&x)
            && (offset_y..offset_y + height).contains(&y);
        if inside {
            image.pixel(x - offset_x, y - offset_y)
        } else {
            WHITE
        }
    });

    log::debug!("Padding {width}×{height} → {new_width}×{new_height}");
    Ok(PaddedImage {
        image: padded,
        offset_x,
        offset_y,
    })
}

/// Vue rectangulaire sur une image paddée. Une tuile = une cellule de sortie.
#[derive(Clone, Copy, Debug)]
pub struct Tile<'a> {
    image: &'a RasterImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl<'a> Tile<'a> {
    /// Top-left corner in the padded image, `(x, y)`.
    #[must_use]
    pub fn origin(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels covered.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Pixel relative to the tile origin.
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, dx: u32, dy: u32) -> (u8, u8, u8) {
        debug_assert!(dx < self.width && dy < self.height, "tile pixel out of bounds");
        self.image.pixel(self.x + dx, self.y + dy)
    }

    /// Every pixel of the tile, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u8, u8, u8)> + use<'a> {
        let Tile {
            image,
            x,
            y,
            width,
            height,
        } = *self;
        (y..y + height).flat_map(move |py| (x..x + width).map(move |px| image.pixel(px, py)))
    }
}

/// Split a padded image into `resolution × resolution` tiles, row-major.
///
/// Tile size uses truncating division: when `resolution` does not divide a
/// padded side, the trailing pixels of that side belong to no tile.
///
/// # Errors
/// [`CoreError::InvalidResolution`] if `resolution` is 0 or exceeds a padded
/// side (which would give empty tiles).
///
/// # Example
/// ```
/// use ta_core::frame::RasterImage;
/// use ta_ascii::geometry::{pad, tile};
///
/// let padded = pad(&RasterImage::filled(8, 8, (0, 0, 0))).unwrap();
/// let tiles = tile(&padded, 4).unwrap();
/// assert_eq!(tiles.len(), 16);
/// assert_eq!(tiles[5].origin(), (2, 2));
/// ```
pub fn tile(padded: &PaddedImage, resolution: u32) -> Result<Vec<Tile<'_>>, CoreError> {
    let image = padded.image();
    let (width, height) = (image.width(), image.height());
    let invalid = CoreError::InvalidResolution {
        resolution,
        width,
        height,
    };
    if resolution == 0 {
        return Err(invalid);
    }

    let tile_width = width / resolution;
    let tile_height = height / resolution;
    if tile_width == 0 || tile_height == 0 {
        return Err(invalid);
    }

    let mut tiles = Vec::with_capacity(resolution as usize * resolution as usize);
    for row in 0..resolution {
        for col in 0..resolution {
            tiles.push(Tile {
                image,
                x: col * tile_width,
                y: row * tile_height,
                width: tile_width,
                height: tile_height,
            });
        }
    }
    Ok(tiles)
}
