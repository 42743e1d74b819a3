//! Raster surfaces
//!
//! Colors, rectangles and the pixel grid that rooms are grown on.

mod color;
mod rect;
mod surface;

pub use color::{Color, ColorKey};
pub use rect::Rect;
pub use surface::{PixelBuffer, Surface};
