//! # Cover Image Loading
//!
//! The cover config carries its background image as a string: a data URI
//! straight from a file picker, bare base64, or a path on disk. This module
//! turns that payload into bytes, and those bytes into something a PDF image
//! XObject can hold. JPEGs are kept as-is for DCTDecode, tagged with their
//! color model; PNGs are decoded to RGB with a separate alpha plane for the
//! soft mask.

use std::io::Cursor;

use base64::Engine;

use crate::error::FolioError;

/// An image ready for embedding.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: Pixels,
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Clone)]
pub enum Pixels {
    /// Original JPEG stream.
    Jpeg { data: Vec<u8>, color: JpegColor },
    /// 8-bit RGB, row-major, plus alpha when any pixel isn't opaque.
    Rgb { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

/// Color model of a JPEG, from its frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JpegColor {
    Gray,
    Rgb,
    /// `inverted` is set for Adobe-written files, which store CMYK inverted.
    Cmyk { inverted: bool },
}

impl JpegColor {
    pub fn pdf_color_space(&self) -> &'static str {
        match self {
            JpegColor::Gray => "/DeviceGray",
            JpegColor::Rgb => "/DeviceRGB",
            JpegColor::Cmyk { .. } => "/DeviceCMYK",
        }
    }

    /// A `/Decode` array, when samples need remapping.
    pub fn decode_array(&self) -> Option<&'static str> {
        match self {
            JpegColor::Cmyk { inverted: true } => Some("[1 0 1 0 1 0 1 0]"),
            _ => None,
        }
    }
}

/// Resolve a cover image payload to raw bytes.
pub fn read_payload(payload: &str) -> Result<Vec<u8>, FolioError> {
    let payload = payload.trim();

    if let Some(rest) = payload.strip_prefix("data:") {
        let (_, data) = rest
            .split_once(',')
            .ok_or_else(|| FolioError::ImageError("data URI has no `,` before its payload".into()))?;
        return decode_base64(data);
    }

    // Base64 text contains '/', so only explicit path prefixes count as paths.
    if payload.starts_with('/') || payload.starts_with("./") || payload.starts_with("../") {
        return std::fs::read(payload)
            .map_err(|e| FolioError::ImageError(format!("cannot read '{}': {}", payload, e)));
    }

    decode_base64(payload)
}

fn decode_base64(data: &str) -> Result<Vec<u8>, FolioError> {
    base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| FolioError::ImageError(format!("invalid base64 image data: {}", e)))
}

/// Sniff the format and decode.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, FolioError> {
    if is_jpeg(bytes) {
        decode_jpeg(bytes)
    } else if is_png(bytes) {
        decode_png(bytes)
    } else if bytes.len() < 4 {
        Err(FolioError::ImageError("image data too short".into()))
    } else {
        Err(FolioError::ImageError("unsupported image format, expected JPEG or PNG".into()))
    }
}

fn is_jpeg(data: &[u8]) -> bool {
    data.starts_with(&[0xFF, 0xD8])
}

fn is_png(data: &[u8]) -> bool {
    data.starts_with(&[0x89, b'P', b'N', b'G'])
}

fn decode_jpeg(data: &[u8]) -> Result<DecodedImage, FolioError> {
    let (width_px, height_px) = image::io::Reader::with_format(Cursor::new(data), image::ImageFormat::Jpeg)
        .into_dimensions()
        .map_err(|e| FolioError::ImageError(format!("unreadable JPEG: {}", e)))?;

    let color = match jpeg_color(data)? {
        Some(color) => color,
        None => return Err(FolioError::ImageError("JPEG has no frame header".into())),
    };

    Ok(DecodedImage {
        pixels: Pixels::Jpeg {
            data: data.to_vec(),
            color,
        },
        width_px,
        height_px,
    })
}

/// Color model from the first start-of-frame segment. An Adobe APP14
/// segment before it marks CMYK data as inverted.
fn jpeg_color(data: &[u8]) -> Result<Option<JpegColor>, FolioError> {
    let mut adobe = false;
    let mut i = 2;
    while i + 3 < data.len() && data[i] == 0xFF {
        let marker = data[i + 1];
        let len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        if marker == 0xEE && data.get(i + 4..i + 9) == Some(&b"Adobe"[..]) {
            adobe = true;
        }
        if matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF) {
            return match data.get(i + 9).copied() {
                Some(1) => Ok(Some(JpegColor::Gray)),
                Some(3) => Ok(Some(JpegColor::Rgb)),
                Some(4) => Ok(Some(JpegColor::Cmyk { inverted: adobe })),
                Some(n) => Err(FolioError::ImageError(format!(
                    "JPEG with {} color components is not supported",
                    n
                ))),
                None => Ok(None),
            };
        }
        i += 2 + len;
    }
    Ok(None)
}

fn decode_png(data: &[u8]) -> Result<DecodedImage, FolioError> {
    let rgba = image::load_from_memory_with_format(data, image::ImageFormat::Png)
        .map_err(|e| FolioError::ImageError(format!("unreadable PNG: {}", e)))?
        .to_rgba8();

    let (width_px, height_px) = rgba.dimensions();
    let count = (width_px as usize) * (height_px as usize);
    let mut rgb = Vec::with_capacity(count * 3);
    let mut alpha = Vec::with_capacity(count);

    for px in rgba.pixels() {
        rgb.extend_from_slice(&px.0[..3]);
        alpha.push(px.0[3]);
    }
    let opaque = alpha.iter().all(|&a| a == 255);

    Ok(DecodedImage {
        pixels: Pixels::Rgb {
            rgb,
            alpha: if opaque { None } else { Some(alpha) },
        },
        width_px,
        height_px,
    })
}
