//! PNG output for finished canvases.
//!
//! Converts canvases to PNG files with optional integer scaling.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{Result, SpriteError};
use crate::types::{Canvas, Colour};

/// Write a canvas to a PNG file.
///
/// # Arguments
///
/// * `canvas` - The canvas to write
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling, 0 is treated as 1)
pub fn write_png(canvas: &Canvas, path: &Path, scale: u32) -> Result<()> {
    let scaled = scale_canvas(canvas, scale)?;

    let img: RgbaImage =
        ImageBuffer::from_raw(scaled.width(), scaled.height(), scaled.to_rgba_buffer())
            .ok_or_else(|| SpriteError::Io {
                path: path.to_path_buf(),
                message: "Pixel buffer does not match canvas size".to_string(),
            })?;

    img.save(path).map_err(|e| SpriteError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

/// Read a PNG back into a canvas.
pub fn read_png(path: &Path) -> Result<Canvas> {
    let img = image::open(path)
        .map_err(|e| SpriteError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read PNG: {}", e),
        })?
        .to_rgba8();

    let mut canvas = Canvas::new(img.width(), img.height())?;
    for (x, y, Rgba(rgba)) in img.enumerate_pixels() {
        canvas.set(x as i32, y as i32, Colour::from_rgba(*rgba));
    }
    Ok(canvas)
}

/// Scale a canvas by an integer factor.
///
/// Uses nearest-neighbour scaling for crisp pixel art.
pub fn scale_canvas(canvas: &Canvas, scale: u32) -> Result<Canvas> {
    let scale = scale.max(1);
    if scale == 1 {
        return Ok(canvas.clone());
    }

    let (width, height) = scaled_size(canvas.size(), scale)?;
    let mut scaled = Canvas::new(width, height)?;
    let s = scale as i32;

    for y in 0..canvas.height() as i32 {
        for x in 0..canvas.width() as i32 {
            scaled.fill_rect(x * s, y * s, s, s, canvas.get(x, y));
        }
    }

    Ok(scaled)
}

/// Dimensions of a `size` canvas after scaling by `scale`.
///
/// Fails if either side no longer fits a signed pixel coordinate.
pub fn scaled_size((width, height): (u32, u32), scale: u32) -> Result<(u32, u32)> {
    let scale = scale.max(1);
    let side = |n: u32| {
        n.checked_mul(scale)
            .filter(|&scaled| i32::try_from(scaled).is_ok())
    };

    match (side(width), side(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(SpriteError::Build {
            message: format!("scale {} is too large for a {}x{} canvas", scale, width, height),
            help: Some("Use a smaller --scale".to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn checker() -> Canvas {
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.set_row(0, 0, &[Colour::BLACK, Colour::WHITE]);
        canvas.set_row(1, 0, &[Colour::WHITE, Colour::BLACK]);
        canvas
    }

    #[test]
    fn test_write_png_simple() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        write_png(&checker(), &path, 1).unwrap();

        assert!(path.exists());

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_write_png_scaled() {
        let mut canvas = Canvas::new(2, 1).unwrap();
        canvas.set_row(0, 0, &[Colour::rgb(255, 0, 0), Colour::rgb(0, 255, 0)]);

        let dir = tempdir().unwrap();
        let path = dir.path().join("scaled.png");

        write_png(&canvas, &path, 2).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);

        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(2, 0).0, [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(3, 1).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_png_round_trip_keeps_alpha() {
        let mut canvas = Canvas::new(2, 1).unwrap();
        canvas.set(1, 0, Colour::new(255, 0, 0, 128));

        let dir = tempdir().unwrap();
        let path = dir.path().join("alpha.png");

        write_png(&canvas, &path, 1).unwrap();

        assert_eq!(read_png(&path).unwrap(), canvas);
    }

    #[test]
    fn test_scale_overflow_is_an_error() {
        let canvas = Canvas::new(16, 24).unwrap();

        let err = scale_canvas(&canvas, u32::MAX / 8).unwrap_err();
        assert!(matches!(err, SpriteError::Build { .. }));
        assert!(err.to_string().contains(&(u32::MAX / 8).to_string()));
    }

    #[test]
    fn test_scaled_size() {
        assert_eq!(scaled_size((16, 24), 4).unwrap(), (64, 96));
        assert_eq!(scaled_size((16, 24), 0).unwrap(), (16, 24));
        assert!(scaled_size((16, 24), u32::MAX / 8).is_err());
        assert!(scaled_size((1, 1), i32::MAX as u32 + 1).is_err());
    }

    #[test]
    fn test_scale_canvas() {
        let scaled = scale_canvas(&checker(), 3).unwrap();

        assert_eq!(scaled.size(), (6, 6));
        assert_eq!(scaled.get(2, 2), Colour::BLACK);
        assert_eq!(scaled.get(3, 0), Colour::WHITE);
        assert_eq!(scaled.get(5, 5), Colour::BLACK);
    }

    #[test]
    fn test_write_png_scale_zero_treated_as_one() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("zero.png");

        write_png(&checker(), &path, 0).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 2);
        assert_eq!(img.height(), 2);
    }

    #[test]
    fn test_write_png_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");

        let err = write_png(&checker(), &path, 1).unwrap_err();

        assert!(err.to_string().contains("out.png"));
    }
}
