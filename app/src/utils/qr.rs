use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, Luma};
use qrcode::QrCode;

use models::schemas::attendance::QrPayload;

/// Renders the gate payload as a PNG QR code. The encoded text is the
/// payload's JSON, which the attendance endpoint accepts verbatim.
pub fn render_payload_png(payload: &QrPayload) -> Result<Vec<u8>, anyhow::Error> {
    let text = serde_json::to_string(payload)?;
    let code = QrCode::new(text.as_bytes())?;
    let image = code.render::<Luma<u8>>().min_dimensions(320, 320).build();

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}
