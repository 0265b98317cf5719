use std::collections::HashMap;

use crate::geometry::{BoundingBox, Dimensions};

/// How an image scales into its laid-out box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFit {
    /// Stretch to fill the box exactly (may distort).
    Fill,
    /// Scale to fit within the box, preserving aspect ratio. (Default)
    #[default]
    Contain,
    /// Scale to cover the box, clipping overflow.
    Cover,
}

/// Intrinsic-size port. The engine calls `describe` only when both axes
/// of an image element are Fit; it never reads pixel data.
pub trait ImageMetrics {
    fn describe(&self, source: &str) -> Result<Dimensions, String>;
}

/// A fixed source -> dimensions map, for tests and for hosts that know
/// their asset inventory up front.
#[derive(Debug, Default)]
pub struct StaticImageMetrics {
    sizes: HashMap<String, Dimensions>,
}

impl StaticImageMetrics {
    pub fn new() -> Self {
        StaticImageMetrics::default()
    }

    pub fn insert(&mut self, source: impl Into<String>, width: f64, height: f64) -> &mut Self {
        self.sizes
            .insert(source.into(), Dimensions::new(width, height));
        self
    }
}

impl ImageMetrics for StaticImageMetrics {
    fn describe(&self, source: &str) -> Result<Dimensions, String> {
        self.sizes
            .get(source)
            .copied()
            .ok_or_else(|| format!("unknown image source: {:?}", source))
    }
}

/// Supported formats for header probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// Detect image format from magic bytes.
pub fn detect_format(data: &[u8]) -> Result<ImageFormat, String> {
    if data.len() < 4 {
        return Err("image data too short to detect format".to_string());
    }
    if data[0] == 0xFF && data[1] == 0xD8 {
        Ok(ImageFormat::Jpeg)
    } else if data[0] == 0x89 && data[1] == 0x50 && data[2] == 0x4E && data[3] == 0x47 {
        Ok(ImageFormat::Png)
    } else {
        Err("unsupported image format (expected JPEG or PNG)".to_string())
    }
}

/// Probe pixel dimensions from raw image bytes without decoding pixels.
/// Useful for implementing `ImageMetrics` over in-memory assets.
pub fn probe_dimensions(data: &[u8]) -> Result<Dimensions, String> {
    let (w, h) = match detect_format(data)? {
        ImageFormat::Jpeg => jpeg_dimensions(data)?,
        ImageFormat::Png => png_dimensions(data)?,
    };
    Ok(Dimensions::new(w as f64, h as f64))
}

/// Scan JPEG data for SOF0-SOF3 markers and extract width/height.
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32), String> {
    let len = data.len();
    let mut i = 0;
    while i + 1 < len {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        // SOF0 (0xC0) through SOF3 (0xC3): baseline, extended, progressive, lossless
        if (0xC0..=0xC3).contains(&marker) {
            if i + 9 >= len {
                return Err("JPEG SOF marker truncated".to_string());
            }
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            return Ok((width, height));
        }
        // Skip fill bytes and stuffing
        if marker == 0xFF || marker == 0x00 {
            i += 1;
            continue;
        }
        // Standalone markers (no length)
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }
        // Markers with length
        if i + 3 >= len {
            break;
        }
        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + seg_len;
    }
    Err("no SOF marker found in JPEG data".to_string())
}

/// Read PNG dimensions via the `png` crate header parse; pixel data is
/// never decoded.
fn png_dimensions(data: &[u8]) -> Result<(u32, u32), String> {
    let decoder = png::Decoder::new(data);
    let reader = decoder
        .read_info()
        .map_err(|e| format!("PNG decode error: {}", e))?;
    let info = reader.info();
    Ok((info.width, info.height))
}

/// Where an image lands inside its box for a given fit mode: a display
/// rectangle plus an optional clip (Cover overflows and must be
/// clipped). Intended for render-command consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    pub display: BoundingBox,
    pub clip: Option<BoundingBox>,
}

/// Compute the display rectangle for an intrinsic size inside `bounds`.
pub fn fit_placement(intrinsic: Dimensions, bounds: BoundingBox, fit: ImageFit) -> ImagePlacement {
    let iw = intrinsic.width.max(1.0);
    let ih = intrinsic.height.max(1.0);
    match fit {
        ImageFit::Fill => ImagePlacement {
            display: bounds,
            clip: None,
        },
        ImageFit::Contain => {
            let scale = (bounds.width / iw).min(bounds.height / ih);
            let w = iw * scale;
            let h = ih * scale;
            ImagePlacement {
                display: BoundingBox::new(
                    bounds.x + (bounds.width - w) / 2.0,
                    bounds.y + (bounds.height - h) / 2.0,
                    w,
                    h,
                ),
                clip: None,
            }
        }
        ImageFit::Cover => {
            let scale = (bounds.width / iw).max(bounds.height / ih);
            let w = iw * scale;
            let h = ih * scale;
            ImagePlacement {
                display: BoundingBox::new(
                    bounds.x + (bounds.width - w) / 2.0,
                    bounds.y + (bounds.height - h) / 2.0,
                    w,
                    h,
                ),
                clip: Some(bounds),
            }
        }
    }
}
