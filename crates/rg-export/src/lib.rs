//! rg-export: Loading and saving dungeon surfaces
//!
//! PNG masks in, PNG and JSON out, plus a plain text view for terminals.

mod ascii;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use rg_core::{BuildOptions, PixelBuffer, RoomInfo, Surface};

pub use ascii::{classify, render_ascii, Glyph};

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel data does not match a {width}x{height} image")]
    DimensionMismatch { width: u32, height: u32 },

    #[error("Scale factor must be at least 1")]
    ZeroScale,

    #[error("A {width}x{height} surface scaled by {scale} is too large")]
    ScaleOverflow { width: u32, height: u32, scale: u32 },
}

/// Decode a PNG into a surface
///
/// Transparent pixels become clear cells; every other pixel keeps its
/// color, so opaque black marks blocked space.
pub fn load_mask(path: impl AsRef<Path>) -> Result<PixelBuffer, ExportError> {
    let path = path.as_ref();
    let img = image::open(path)?.to_rgba8();
    let (width, height) = img.dimensions();
    debug!("Loaded {width}x{height} mask from {}", path.display());

    let mut raw = img.into_raw();
    // Any fully transparent pixel is clear whatever its color channels say
    for px in raw.chunks_exact_mut(4) {
        if px[3] == 0 {
            px.copy_from_slice(&[0, 0, 0, 0]);
        }
    }
    PixelBuffer::from_rgba(width, height, &raw)
        .ok_or(ExportError::DimensionMismatch { width, height })
}

/// Convert a surface to an image, each cell becoming a `scale`×`scale` block
pub fn to_image<S: Surface + ?Sized>(surface: &S, scale: u32) -> Result<RgbaImage, ExportError> {
    if scale == 0 {
        return Err(ExportError::ZeroScale);
    }
    let (width, height) = (surface.width().max(0) as u32, surface.height().max(0) as u32);
    let (Some(scaled_w), Some(scaled_h)) = (width.checked_mul(scale), height.checked_mul(scale))
    else {
        return Err(ExportError::ScaleOverflow {
            width,
            height,
            scale,
        });
    };

    let mut raw = Vec::with_capacity(width as usize * height as usize * 4);
    for (x, y) in surface.bounds().points() {
        let color = surface.get_pixel(x, y).unwrap_or_default();
        raw.extend_from_slice(&color.to_array());
    }
    let img = RgbaImage::from_raw(width, height, raw)
        .ok_or(ExportError::DimensionMismatch { width, height })?;

    if scale == 1 {
        return Ok(img);
    }
    Ok(imageops::resize(&img, scaled_w, scaled_h, FilterType::Nearest))
}

/// Write a surface as PNG
pub fn save_png<S: Surface + ?Sized>(
    surface: &S,
    path: impl AsRef<Path>,
    scale: u32,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let img = to_image(surface, scale)?;
    img.save_with_format(path, ImageFormat::Png)?;
    debug!(
        "Wrote {}x{} PNG to {}",
        img.width(),
        img.height(),
        path.display()
    );
    Ok(())
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ExportError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Write the room description as pretty JSON
pub fn write_room_info(info: &RoomInfo, path: impl AsRef<Path>) -> Result<(), ExportError> {
    write_json(info, path.as_ref())
}

/// Read a room description written by [`write_room_info`]
pub fn load_room_info(path: impl AsRef<Path>) -> Result<RoomInfo, ExportError> {
    read_json(path.as_ref())
}

/// Read build options; missing fields take their defaults
pub fn load_options(path: impl AsRef<Path>) -> Result<BuildOptions, ExportError> {
    let options: BuildOptions = read_json(path.as_ref())?;
    debug!("Loaded options from {}: {options:?}", path.as_ref().display());
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_core::{build_with_rng, Color, MapSpec, Rect};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rg-export-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_mask_round_trip_keeps_void_and_clear() {
        let path = temp_path("mask.png");
        let mut surface = PixelBuffer::new(6, 4);
        surface.fill_rect(Rect::new(0, 0, 2, 4), Color::VOID);
        save_png(&surface, &path, 1).unwrap();

        let loaded = load_mask(&path).unwrap();
        assert_eq!(loaded, surface);
        assert_eq!(loaded.count(Color::VOID), 8);
        assert_eq!(loaded.count(Color::CLEAR), 16);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_transparent_pixels_are_clear() {
        let path = temp_path("tinted.png");
        let mut img = RgbaImage::new(3, 1);
        img.put_pixel(0, 0, image::Rgba([200, 10, 10, 0]));
        img.put_pixel(1, 0, image::Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 0, image::Rgba([200, 10, 10, 255]));
        img.save_with_format(&path, ImageFormat::Png).unwrap();

        let loaded = load_mask(&path).unwrap();
        assert!(loaded.is_clear(0, 0));
        assert!(loaded.check_color(1, 0, Color::VOID));
        assert!(loaded.check_color(2, 0, Color::rgb(200, 10, 10)));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_scaled_image() {
        let mut surface = PixelBuffer::new(2, 2);
        surface.set_pixel(1, 0, Color::FLOOR);
        let img = to_image(&surface, 3).unwrap();
        assert_eq!(img.dimensions(), (6, 6));
        assert_eq!(img.get_pixel(4, 1).0, Color::FLOOR.to_array());
        assert_eq!(img.get_pixel(1, 1).0, Color::CLEAR.to_array());
        assert!(matches!(to_image(&surface, 0), Err(ExportError::ZeroScale)));
    }

    #[test]
    fn test_oversized_scale_is_rejected() {
        let surface = PixelBuffer::new(3, 2);
        let err = to_image(&surface, u32::MAX / 2).unwrap_err();
        assert!(matches!(
            err,
            ExportError::ScaleOverflow {
                width: 3,
                height: 2,
                ..
            }
        ));
        let path = std::env::temp_dir().join("rg-export-never-written.png");
        assert!(save_png(&surface, &path, u32::MAX).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_room_info_json() {
        let path = temp_path("rooms.json");
        let out = build_with_rng(
            MapSpec::Size {
                width: 40,
                height: 40,
            },
            &BuildOptions {
                room_grid_size: 2,
                ..Default::default()
            },
            &mut || 0.5,
        )
        .unwrap();
        write_room_info(&out.info, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"floor_color\""));
        assert!(text.contains("\"doors\""));
        assert_eq!(load_room_info(&path).unwrap(), out.info);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_partial_options() {
        let path = temp_path("options.json");
        std::fs::write(&path, r#"{ "room_grid_size": 6, "wiggle": 2.5 }"#).unwrap();
        let options = load_options(&path).unwrap();
        assert_eq!(options.room_grid_size, 6);
        assert_eq!(options.wiggle, 2.5);
        assert_eq!(options.frequency, 1.0);
        assert_eq!(options.seed, None);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_options(temp_path("does-not-exist.json")).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
