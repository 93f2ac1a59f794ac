//! Image output: 8-bit quantization, plain PPM, and PNG via `image`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Color, ImageBuffer};
use prism_math::Interval;
use thiserror::Error;

/// File name used when the caller does not pick one.
pub const DEFAULT_OUTPUT_FILE: &str = "rt_one_week_res.ppm";

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Channel range kept below 1.0 so 255.999 scaling never rounds to 256.
const INTENSITY: Interval = Interval {
    min: 0.0,
    max: 0.999,
};

/// Quantize one linear channel to 8 bits.
#[inline]
fn to_byte(channel: f32) -> u8 {
    (255.999 * INTENSITY.clamp(channel)) as u8
}

/// Convert a linear color to 8-bit RGB (no gamma).
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Write the image as plain-text PPM (`P3`).
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: W) -> OutputResult<()> {
    let mut writer = BufWriter::new(writer);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save the image, choosing the encoder from the file extension.
///
/// `.ppm` writes plain-text PPM; `.png` goes through the `image` crate.
pub fn save_image(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => write_ppm(image, File::create(path)?),
        "png" => {
            image::save_buffer(
                path,
                &image.to_rgb(),
                image.width,
                image.height,
                image::ColorType::Rgb8,
            )?;
            Ok(())
        }
        _ => Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }?;

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_rgb_quantization() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(0.5, 0.7, 1.0)), [127, 179, 255]);
        // Out of range values are clamped, not wrapped
        assert_eq!(color_to_rgb(Color::new(-1.0, 2.0, 0.999)), [0, 255, 255]);
    }

    #[test]
    fn test_write_ppm_format() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Color::new(1.0, 0.0, 0.0));
        image.set(1, 0, Color::new(0.5, 0.7, 1.0));

        let mut bytes = Vec::new();
        write_ppm(&image, &mut bytes).unwrap();

        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 0 0\n127 179 255\n");
    }

    #[test]
    fn test_save_image_rejects_unknown_extension() {
        let image = ImageBuffer::new(1, 1);
        let path = std::env::temp_dir().join("prism_output_test.bmpx");

        let err = save_image(&image, &path).unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_save_image_ppm_roundtrip_to_disk() {
        let mut image = ImageBuffer::new(1, 2);
        image.set(0, 1, Color::ONE);
        let path = std::env::temp_dir().join("prism_output_test.ppm");

        save_image(&image, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(text, "P3\n1 2\n255\n0 0 0\n255 255 255\n");
    }

    #[test]
    fn test_save_image_png_decodes_to_same_size() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::new(0.5, 0.7, 1.0));
        let path = std::env::temp_dir().join("prism_output_test.png");

        save_image(&image, &path).unwrap();
        let decoded = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(decoded.get_pixel(2, 1).0, [127, 179, 255]);
    }
}
