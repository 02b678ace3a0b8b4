/// Chargement des images sources de tonascii.

pub mod image;

pub use image::load_image;
