//! QR code rendering.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use qrcode::QrCode;

/// Side length of one QR module, in pixels.
pub const MODULE_PIXELS: u32 = 5;

/// Errors that can occur while rendering a QR code.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    /// The payload does not fit in a QR code.
    #[error("qr encoding failed: {0}")]
    Encode(String),

    /// PNG encoding failed.
    #[error("png encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Render `data` as a black-on-white PNG with the standard quiet zone.
///
/// # Errors
///
/// Returns an error if the data is too long for a QR code or the image
/// cannot be encoded.
pub fn render_png(data: &str) -> Result<Vec<u8>, QrError> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| QrError::Encode(e.to_string()))?;
    let image = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .build();

    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
