//! QR code record domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use cedar_market_core::QrCodeId;

/// A generated QR code. The SVG is rendered once at creation time and
/// stored alongside the encoded payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub id: QrCodeId,
    /// Human-readable label for the admin list.
    pub label: String,
    /// The encoded payload (usually a URL).
    pub data: String,
    /// Rendered SVG markup.
    pub svg: String,
    pub created_at: DateTime<Utc>,
}
