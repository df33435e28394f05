// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML page showing a QR code and the link it encodes

use base64::{engine::general_purpose::STANDARD, Engine as _};

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; text-align: center; padding: 20px; background-color: #f5f5f5; }
        .container { max-width: 600px; margin: 0 auto; background-color: white; padding: 30px; border-radius: 10px; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1); }
        h1 { color: #333; font-size: 24px; }
        .qr-container { margin: 30px 0; }
        .qr-image { max-width: 300px; height: auto; }
        .url { word-break: break-all; margin: 20px 0; padding: 10px; background-color: #f0f0f0; border-radius: 5px; }
        .button { display: inline-block; padding: 10px 20px; background-color: #4CAF50; color: white; text-decoration: none; border-radius: 5px; font-weight: bold; margin-top: 20px; }
"#;

/// `data:` URI embedding a PNG directly in the page
pub fn data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

pub fn render_viewer_html(url: &str, image_src: &str) -> String {
    // Escaped for both text and attribute positions
    let url = ammonia::clean_text(url);
    let image_src = ammonia::clean_text(image_src);
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>QR Code for {url}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>QR Code Generated</h1>
        <div class="qr-container">
            <img src="{image_src}" alt="QR Code" class="qr-image">
        </div>
        <p>This QR code links to:</p>
        <div class="url">{url}</div>
        <p>You can scan this QR code with any QR code scanner app on your mobile device.</p>
        <a href="{url}" class="button" target="_blank">Open URL</a>
    </div>
</body>
</html>
"#
    )
}
