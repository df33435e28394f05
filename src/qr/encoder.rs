// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PNG rendering of QR symbols
//!
//! The symbol itself comes from the `qrcode` crate (error correction level H,
//! smallest version that fits). This module only rasterizes it: every module
//! becomes a `box_size` x `box_size` square, surrounded by a white border of
//! `border` modules.

use image::{imageops, DynamicImage, ImageBuffer, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

use super::errors::{QrError, QrResult};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

#[derive(Debug, Clone, Copy)]
pub struct QrEncoder {
    pub box_size: u32,
    pub border: u32,
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self {
            box_size: 10,
            border: 4,
        }
    }
}

impl QrEncoder {
    pub fn new(box_size: u32, border: u32) -> Self {
        Self { box_size, border }
    }

    /// Render `data` as a black-on-white PNG
    pub fn encode_png(&self, data: &str) -> QrResult<Vec<u8>> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H)
            .map_err(|e| QrError::Encoding(format!("cannot build QR symbol: {}", e)))?;

        let symbol = code
            .render::<Luma<u8>>()
            .quiet_zone(false)
            .dark_color(DARK)
            .light_color(LIGHT)
            .module_dimensions(self.box_size, self.box_size)
            .build();

        let pad = self.border * self.box_size;
        let mut canvas = ImageBuffer::from_pixel(
            symbol.width() + 2 * pad,
            symbol.height() + 2 * pad,
            LIGHT,
        );
        imageops::overlay(&mut canvas, &symbol, pad as i64, pad as i64);

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(canvas)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| QrError::Encoding(format!("cannot write PNG: {}", e)))?;
        Ok(png)
    }
}
