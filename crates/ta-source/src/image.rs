use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use ta_core::frame::RasterImage;

/// Decode an image file into an RGB raster.
///
/// The format is guessed from the file content and extension. Alpha is
/// dropped; grayscale and palette images are expanded to RGB.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use ta_source::image::load_image;
/// let image = load_image(Path::new("images/cat.jpeg")).unwrap();
/// println!("{}×{}", image.width(), image.height());
/// ```
pub fn load_image(path: &Path) -> Result<RasterImage> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let raster = from_dynamic(img)?;
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        raster.width(),
        raster.height()
    );
    Ok(raster)
}

/// Convertit une image décodée en [`RasterImage`] RGB.
///
/// # Errors
/// Returns an error if the decoded buffer does not match its dimensions.
pub fn from_dynamic(img: DynamicImage) -> Result<RasterImage> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    RasterImage::new(width, height, rgb.into_raw())
        .with_context(|| format!("Buffer RGB incohérent ({width}×{height})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn loads_png_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        let mut img = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        img.put_pixel(2, 1, Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let raster = load_image(&path).unwrap();
        assert_eq!((raster.width(), raster.height()), (3, 2));
        assert_eq!(raster.pixel(0, 0), (255, 255, 255));
        assert_eq!(raster.pixel(2, 1), (10, 20, 30));
    }

    #[test]
    fn alpha_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(2, 2, Rgba([40, 50, 60, 0])).save(&path).unwrap();

        let raster = load_image(&path).unwrap();
        assert_eq!(raster.data().len(), 2 * 2 * 3);
        assert_eq!(raster.pixel(1, 1), (40, 50, 60));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("absent.png")).unwrap_err();
        assert!(err.to_string().contains("Impossible de charger"));
    }

    #[test]
    fn garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        assert!(load_image(&path).is_err());
    }

    #[test]
    fn grayscale_expands_to_rgb() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(1, 1, image::Luma([77])));
        let raster = from_dynamic(gray).unwrap();
        assert_eq!(raster.pixel(0, 0), (77, 77, 77));
    }
}
