//! Rendu des glyphes (police ou motifs intégrés) et sortie des grilles ASCII.

pub mod output;
pub mod pattern;
pub mod rasterizer;

pub use output::{ConsoleOutput, GridOutput, HtmlOutput};
pub use pattern::PatternRasterizer;
pub use rasterizer::FontRasterizer;
