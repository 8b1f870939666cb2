//! QR rasterization
//!
//! Maps a payload string plus style options to an RGBA image. The `qrcode`
//! crate builds the symbol; this module scales the module matrix to the
//! requested pixel size, applies the foreground/background colors, and
//! optionally embeds a centered logo (excavating the modules underneath so
//! the symbol stays scannable at the chosen error correction level).

use crate::error::{QrStudioError, Result};
use image::imageops::FilterType;
use image::{Rgba, RgbaImage, imageops};
use qrcode::{Color, EcLevel, QrCode};

/// Pixel size of the live preview image
pub const PREVIEW_SIZE: u32 = 256;

/// Pixel size of history thumbnails
pub const THUMBNAIL_SIZE: u32 = 48;

/// Edge length of the embedded logo at preview size
pub const LOGO_SIZE: u32 = 50;

/// Error correction level for the live preview and exports.
/// High correction leaves headroom for the embedded logo.
pub const LIVE_EC_LEVEL: EcLevel = EcLevel::H;

/// Error correction level for history thumbnails (no logo, smaller symbol)
pub const THUMBNAIL_EC_LEVEL: EcLevel = EcLevel::Q;

/// A logo to embed in the center of the rendered symbol
#[derive(Debug, Clone)]
pub struct LogoSpec {
    /// Decoded logo pixels
    pub image: RgbaImage,
    /// Target width in output pixels
    pub width: u32,
    /// Target height in output pixels
    pub height: u32,
    /// Clear the modules underneath the logo to the background color
    pub excavate: bool,
}

/// Options controlling one render call
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Target edge length in pixels; the output snaps down to a whole
    /// number of pixels per module
    pub size: u32,
    /// Module color
    pub foreground: Rgba<u8>,
    /// Canvas color
    pub background: Rgba<u8>,
    /// Error correction level handed to the symbol encoder
    pub ec_level: EcLevel,
    /// Optional centered logo
    pub logo: Option<LogoSpec>,
}

impl RenderOptions {
    /// Options for the live preview
    pub fn preview(foreground: Rgba<u8>, background: Rgba<u8>) -> Self {
        Self {
            size: PREVIEW_SIZE,
            foreground,
            background,
            ec_level: LIVE_EC_LEVEL,
            logo: None,
        }
    }

    /// Options for a history thumbnail
    pub fn thumbnail(foreground: Rgba<u8>, background: Rgba<u8>) -> Self {
        Self {
            size: THUMBNAIL_SIZE,
            foreground,
            background,
            ec_level: THUMBNAIL_EC_LEVEL,
            logo: None,
        }
    }
}

/// Parse a `#rrggbb` or `#rrggbbaa` hex color string
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>> {
    let invalid = || QrStudioError::InvalidColor(value.to_string());

    let hex = value.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 && hex.len() != 8 {
        return Err(invalid());
    }

    let byte_at = |index: usize| -> Result<u8> {
        let pair = hex.get(index..index + 2).ok_or_else(invalid)?;
        u8::from_str_radix(pair, 16).map_err(|_| invalid())
    };

    let r = byte_at(0)?;
    let g = byte_at(2)?;
    let b = byte_at(4)?;
    let a = if hex.len() == 8 { byte_at(6)? } else { 255 };
    Ok(Rgba([r, g, b, a]))
}

/// Decode a logo data URI into a [`LogoSpec`] with the given edge length.
///
/// Fails for URIs whose payload the `image` crate cannot decode (e.g. SVG
/// logos); callers log and render without the logo in that case.
pub fn logo_from_data_uri(uri: &str, edge: u32) -> Result<LogoSpec> {
    let (_, bytes) = crate::utils::data_uri::decode(uri)?;
    let decoded = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    Ok(LogoSpec {
        image: decoded.to_rgba8(),
        width: edge,
        height: edge,
        excavate: true,
    })
}

/// Render a payload string to an RGBA image.
///
/// The output edge length is `modules * scale` where `scale` is the largest
/// whole number of pixels per module that fits `opts.size` (minimum 1), so
/// the result can be slightly smaller than requested but modules stay crisp.
pub fn render(value: &str, opts: &RenderOptions) -> Result<RgbaImage> {
    let code = QrCode::with_error_correction_level(value.as_bytes(), opts.ec_level)?;

    let modules = u32::try_from(code.width()).unwrap_or(u32::MAX);
    let scale = (opts.size / modules).max(1);
    let dim = modules * scale;

    let mut img = RgbaImage::from_pixel(dim, dim, opts.background);
    for my in 0..modules {
        for mx in 0..modules {
            if code[(mx as usize, my as usize)] == Color::Dark {
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(mx * scale + dx, my * scale + dy, opts.foreground);
                    }
                }
            }
        }
    }

    if let Some(logo) = &opts.logo {
        embed_logo(&mut img, logo, scale, opts.background);
    }

    Ok(img)
}

/// Draw the logo centered over the symbol, optionally clearing the covered
/// modules (plus one module of clearance, snapped to the module grid) first.
fn embed_logo(img: &mut RgbaImage, logo: &LogoSpec, scale: u32, background: Rgba<u8>) {
    let dim = img.width();
    let width = logo.width.min(dim);
    let height = logo.height.min(dim);
    let x0 = (dim - width) / 2;
    let y0 = (dim - height) / 2;

    if logo.excavate {
        let left = x0.saturating_sub(scale) / scale * scale;
        let top = y0.saturating_sub(scale) / scale * scale;
        let right = (x0 + width + scale).div_ceil(scale) * scale;
        let bottom = (y0 + height + scale).div_ceil(scale) * scale;
        for y in top..bottom.min(dim) {
            for x in left..right.min(dim) {
                img.put_pixel(x, y, background);
            }
        }
    }

    let resized = imageops::resize(&logo.image, width, height, FilterType::Lanczos3);
    imageops::overlay(img, &resized, i64::from(x0), i64::from(y0));
}
