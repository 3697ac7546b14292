//! QR code rendering.
//!
//! The SVG is rendered once at creation time and stored with the record,
//! so listing QR codes never re-encodes anything.

use qrcode::QrCode;
use qrcode::render::svg;
use thiserror::Error;

/// Longest payload accepted for encoding.
const MAX_DATA_LENGTH: usize = 2048;

/// Errors from QR rendering.
#[derive(Debug, Error)]
pub enum QrError {
    /// Payload is empty.
    #[error("data is required")]
    EmptyData,

    /// Payload exceeds the supported length.
    #[error("data must be at most {MAX_DATA_LENGTH} characters")]
    DataTooLong,

    /// The encoder rejected the payload.
    #[error("failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),
}

/// Render a payload as an SVG QR code.
///
/// # Errors
///
/// Returns `QrError` if the payload is empty, too long, or unencodable.
pub fn render_svg(data: &str) -> Result<String, QrError> {
    if data.is_empty() {
        return Err(QrError::EmptyData);
    }
    if data.len() > MAX_DATA_LENGTH {
        return Err(QrError::DataTooLong);
    }

    let code = QrCode::new(data.as_bytes())?;
    let image = code
        .render::<svg::Color<'_>>()
        .min_dimensions(256, 256)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    Ok(image)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn renders_svg_markup() {
        let image = render_svg("https://example.com/menu").unwrap();
        assert!(image.contains("<svg"));
    }

    #[test]
    fn empty_data_is_rejected() {
        assert!(matches!(render_svg(""), Err(QrError::EmptyData)));
    }

    #[test]
    fn oversized_data_is_rejected() {
        let huge = "x".repeat(MAX_DATA_LENGTH + 1);
        assert!(matches!(render_svg(&huge), Err(QrError::DataTooLong)));
    }
}
