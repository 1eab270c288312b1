// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module reads a user-selected image, decodes it into RGBA pixels for
//! display in egui, and keeps the original bytes as a data URL so the
//! backend receives exactly the file the user picked.

use crate::models::session::SourceImage;
use anyhow::{Context, Result};
use base64::Engine;
use std::path::Path;

/// A decoded image ready for texture upload.
pub struct LoadedImage {
    pub source: SourceImage,
    /// RGBA8, row-major
    pub pixels: Vec<u8>,
}

/// Load and decode an image file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    decode_image(name, &bytes)
}

/// Decode in-memory image bytes.
pub fn decode_image(name: String, bytes: &[u8]) -> Result<LoadedImage> {
    let format = image::guess_format(bytes).context("Unrecognised image format")?;
    let decoded = image::load_from_memory_with_format(bytes, format)
        .with_context(|| format!("Failed to decode {}", name))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(LoadedImage {
        source: SourceImage {
            name,
            data_url: to_data_url(format.to_mime_type(), bytes),
            width,
            height,
        },
        pixels: rgba.into_raw(),
    })
}

/// Encode bytes as a base64 data URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, encoded)
}
