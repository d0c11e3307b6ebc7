use crate::constants::{ART_COLUMNS, ART_FILL_CHAR, CHAR_ASPECT_RATIO};
use image::imageops::FilterType;
use image::DynamicImage;

const ANSI_RESET: &str = "\x1b[0m";

/// How a decoded photo is turned into text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtOptions {
    /// Width of the rendering in characters
    pub columns: u32,
    /// The only glyph used for drawing
    pub fill_char: char,
    /// Paint each cell with its 24-bit colour instead of thresholding to a silhouette
    pub color: bool,
}

impl Default for ArtOptions {
    fn default() -> Self {
        Self {
            columns: ART_COLUMNS,
            fill_char: ART_FILL_CHAR,
            color: true,
        }
    }
}

impl ArtOptions {
    pub fn monochrome() -> Self {
        Self {
            color: false,
            ..Default::default()
        }
    }

    /// Number of text rows for an image of the given pixel size
    pub fn rows_for(&self, width: u32, height: u32) -> u32 {
        if width == 0 || height == 0 {
            return 1;
        }
        let rows = (self.columns as f64 * height as f64 / width as f64 / CHAR_ASPECT_RATIO).round();
        (rows as u32).max(1)
    }
}

/// Renders `image` as `options.columns` wide text art, one line per row.
pub fn render_ascii_art(image: &DynamicImage, options: &ArtOptions) -> String {
    let columns = options.columns.max(1);
    let rows = options.rows_for(image.width(), image.height());
    let cells = image.resize_exact(columns, rows, FilterType::Triangle).to_rgba8();

    let mut lines = Vec::with_capacity(rows as usize);
    for y in 0..rows {
        let mut line = String::with_capacity(columns as usize);
        for x in 0..columns {
            let [r, g, b, a] = cells.get_pixel(x, y).0;
            if options.color {
                line.push_str(&format!("\x1b[38;2;{r};{g};{b}m{}", options.fill_char));
            } else if luminance(r, g, b) >= 0.5 && a >= 128 {
                line.push(options.fill_char);
            } else {
                line.push(' ');
            }
        }
        if options.color {
            line.push_str(ANSI_RESET);
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Relative luminance in 0..=1 (Rec. 709 weights)
fn luminance(r: u8, g: u8, b: u8) -> f64 {
    (0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64) / 255.0
}
