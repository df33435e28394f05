// Version information for the QR Code API

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-qr-records-2026-10-18";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

/// Build date
pub const BUILD_DATE: &str = "2026-10-18";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "png-qr-records",
    "url-normalization",
    "retention-sweep",
    "html-viewer",
    "http-publisher",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("QR Code API {} ({})", VERSION_NUMBER, BUILD_DATE)
}
