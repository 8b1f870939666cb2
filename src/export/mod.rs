//! Export conversion
//!
//! Turns the currently rendered QR configuration into PNG or SVG bytes and
//! writes them to a user-chosen file. Conversion happens fully in memory, so
//! a failure never leaves a partial file behind. The in-flight guard that
//! disables the export controls lives in the GUI layer; both the success and
//! the failure path re-enable them.

use crate::error::{QrStudioError, Result};
use crate::history::StyleOptions;
use crate::qr::render::{self, LIVE_EC_LEVEL, LOGO_SIZE, PREVIEW_SIZE, RenderOptions};
use image::ImageFormat;
use qrcode::QrCode;
use qrcode::render::svg;
use std::io::Cursor;
use std::path::Path;
use tracing::warn;

/// Default pixel-density multiplier for raster exports
pub const DEFAULT_PIXEL_RATIO: u32 = 3;

/// Supported export encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Raster PNG at a pixel-density multiple of the preview size
    Png,
    /// Scalable SVG markup
    Svg,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// Parse a format name as used by the UI ("png" / "svg")
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }
}

/// Suggested filename for a save dialog
pub fn default_filename(format: ExportFormat) -> String {
    format!("qrcode.{}", format.extension())
}

/// One export request: the rendered value plus its styling
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// The payload to encode
    pub value: String,
    /// Colors and optional logo
    pub style: StyleOptions,
    /// Pixel-density multiplier for raster output
    pub pixel_ratio: u32,
}

impl ExportJob {
    /// Build a job with the default pixel ratio
    pub fn new(value: impl Into<String>, style: StyleOptions) -> Self {
        Self {
            value: value.into(),
            style,
            pixel_ratio: DEFAULT_PIXEL_RATIO,
        }
    }
}

/// Convert a job to encoded bytes in the requested format
pub fn export_bytes(job: &ExportJob, format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Png => png_bytes(job),
        ExportFormat::Svg => svg_markup(job).map(String::into_bytes),
    }
}

/// Write previously converted bytes to the target path
pub fn write_export(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes)?;
    Ok(())
}

fn png_bytes(job: &ExportJob) -> Result<Vec<u8>> {
    let foreground = render::parse_hex_color(&job.style.fg_color)?;
    let background = render::parse_hex_color(&job.style.bg_color)?;
    let ratio = job.pixel_ratio.max(1);

    let mut opts = RenderOptions::preview(foreground, background);
    opts.size = PREVIEW_SIZE * ratio;
    opts.logo = job.style.logo.as_deref().and_then(|uri| {
        match render::logo_from_data_uri(uri, LOGO_SIZE * ratio) {
            Ok(spec) => Some(spec),
            Err(e) => {
                warn!("Skipping logo for PNG export: {}", e);
                None
            }
        }
    });

    let img = render::render(&job.value, &opts)?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| QrStudioError::Export(Box::new(e)))?;
    Ok(buf)
}

fn svg_markup(job: &ExportJob) -> Result<String> {
    // Validate up front so bad colors surface as errors instead of broken markup
    render::parse_hex_color(&job.style.fg_color)?;
    render::parse_hex_color(&job.style.bg_color)?;

    let code = QrCode::with_error_correction_level(job.value.as_bytes(), LIVE_EC_LEVEL)?;
    let markup = code
        .render::<svg::Color<'_>>()
        .min_dimensions(PREVIEW_SIZE, PREVIEW_SIZE)
        .dark_color(svg::Color(&job.style.fg_color))
        .light_color(svg::Color(&job.style.bg_color))
        .quiet_zone(false)
        .build();

    match &job.style.logo {
        Some(uri) => Ok(splice_logo(&markup, uri, &job.style.bg_color)),
        None => Ok(markup),
    }
}

/// Insert the logo (and a background rect standing in for excavation) into
/// the generated markup, just before the closing tag. If the canvas size
/// cannot be recovered from the markup the logo is skipped.
fn splice_logo(markup: &str, logo_uri: &str, bg_color: &str) -> String {
    let Some(canvas) = svg_canvas_size(markup) else {
        warn!("Could not determine SVG canvas size, exporting without logo");
        return markup.to_string();
    };

    let logo_edge = canvas * LOGO_SIZE / PREVIEW_SIZE;
    let pos = (canvas - logo_edge) / 2;
    let pad = logo_edge / 10;
    let overlay = format!(
        "<rect x=\"{rx}\" y=\"{rx}\" width=\"{rw}\" height=\"{rw}\" fill=\"{bg_color}\"/>\
         <image x=\"{pos}\" y=\"{pos}\" width=\"{logo_edge}\" height=\"{logo_edge}\" \
         preserveAspectRatio=\"xMidYMid meet\" href=\"{logo_uri}\"/>",
        rx = pos.saturating_sub(pad),
        rw = logo_edge + 2 * pad,
    );

    match markup.rfind("</svg>") {
        Some(index) => {
            let mut out = String::with_capacity(markup.len() + overlay.len());
            out.push_str(&markup[..index]);
            out.push_str(&overlay);
            out.push_str(&markup[index..]);
            out
        }
        None => markup.to_string(),
    }
}

/// Recover the canvas edge length from the renderer's `width="N"` attribute
fn svg_canvas_size(markup: &str) -> Option<u32> {
    let rest = markup.split_once("width=\"")?.1;
    let number = rest.split_once('"')?.0;
    number.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn job(value: &str) -> ExportJob {
        ExportJob::new(value, StyleOptions::default())
    }

    #[test]
    fn test_default_filenames() {
        assert_eq!(default_filename(ExportFormat::Png), "qrcode.png");
        assert_eq!(default_filename(ExportFormat::Svg), "qrcode.svg");
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(ExportFormat::from_name("png"), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::from_name("svg"), Some(ExportFormat::Svg));
        assert_eq!(ExportFormat::from_name("gif"), None);
    }

    #[test]
    fn test_png_export_produces_png_bytes() {
        let bytes = export_bytes(&job("https://a.com"), ExportFormat::Png).unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_svg_export_carries_colors() {
        let mut j = job("https://a.com");
        j.style.fg_color = "#123456".to_string();
        j.style.bg_color = "#fedcba".to_string();

        let markup = String::from_utf8(export_bytes(&j, ExportFormat::Svg).unwrap()).unwrap();
        assert!(markup.contains("#123456"));
        assert!(markup.contains("#fedcba"));
        assert!(markup.contains("</svg>"));
    }

    #[test]
    fn test_svg_export_embeds_logo_data_uri() {
        let uri = "data:image/png;base64,iVBORw0KGgo=";
        let mut j = job("https://a.com");
        j.style.logo = Some(uri.to_string());

        let markup = String::from_utf8(export_bytes(&j, ExportFormat::Svg).unwrap()).unwrap();
        assert!(markup.contains("<image"));
        assert!(markup.contains(uri));
        // The overlay must sit inside the document
        assert!(markup.ends_with("</svg>"));
    }

    #[test]
    fn test_invalid_color_surfaces_as_error() {
        let mut j = job("https://a.com");
        j.style.fg_color = "not-a-color".to_string();
        assert!(export_bytes(&j, ExportFormat::Png).is_err());
        assert!(export_bytes(&j, ExportFormat::Svg).is_err());
    }

    #[test]
    fn test_undecodable_logo_is_skipped_for_png() {
        let mut j = job("https://a.com");
        j.style.logo = Some("data:image/png;base64,AAAA".to_string());
        // The logo bytes are garbage; export still succeeds without it
        let bytes = export_bytes(&j, ExportFormat::Png).unwrap();
        assert_eq!(&bytes[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_write_export_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let path = dir.path().join(default_filename(ExportFormat::Png));
        let bytes = export_bytes(&job("https://a.com"), ExportFormat::Png).unwrap();

        write_export(&path, &bytes).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_svg_canvas_size_parses_renderer_output() {
        let markup = r#"<svg xmlns="x" width="350" height="350" viewBox="0 0 350 350">"#;
        assert_eq!(svg_canvas_size(markup), Some(350));
        assert_eq!(svg_canvas_size("<svg>"), None);
    }
}
