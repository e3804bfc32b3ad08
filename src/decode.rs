//! Image decoding.
//!
//! The decoder works over an in-memory byte slice; the `open_*` helpers read
//! a file and decode it in one step. Each `decode_*` entry point accepts the
//! two magic variants of its own kind (ASCII and binary) and rejects every
//! other magic as a format error.

use std::fs;
use std::path::Path;

use imgref::ImgVec;

use crate::error::PnmError;
use crate::format::PnmFormat;
use crate::header::{HeaderReader, ImageInfo};
use crate::limits::Limits;
use crate::pixel::{BilevelImage, GrayImage, RgbImage, RgbPixel};

/// Image decode request builder.
///
/// # Example
///
/// ```
/// use pnmsobel::DecodeRequest;
///
/// let data = b"P2\n2 2\n255\n0 64\n128 255\n";
/// let image = DecodeRequest::new(data).decode_grayscale()?;
/// assert_eq!((image.width(), image.height()), (2, 2));
/// # Ok::<(), pnmsobel::PnmError>(())
/// ```
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    /// Create a new decode request over raw file bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Set resource limits checked after the header is parsed, before the
    /// pixel buffer is allocated.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Parse the header and hand back the payload slice.
    fn read_header(&self) -> Result<(ImageInfo, &'a [u8]), PnmError> {
        let mut reader = HeaderReader::new(self.data);
        let info = reader.read_header()?;
        if let Some(limits) = self.limits {
            limits
                .check_dimensions(info.width as u64, info.height as u64)
                .map_err(PnmError::Limit)?;
        }
        Ok((info, reader.rest()))
    }

    /// Decode a pixmap (`P3` or `P6`).
    pub fn decode_rgb(self) -> Result<RgbImage, PnmError> {
        let (info, body) = self.read_header()?;
        let pixels = match info.format {
            PnmFormat::RgbAscii => parse_rgb_ascii(body, &info)?,
            PnmFormat::RgbBinary => parse_rgb_binary(body, &info)?,
            other => return Err(PnmError::wrong_kind(other, "pixmap (RGB)")),
        };
        Ok(RgbImage {
            pixels: ImgVec::new(pixels, info.width, info.height),
            scale: info.scale,
        })
    }

    /// Decode a graymap (`P2` or `P5`).
    pub fn decode_grayscale(self) -> Result<GrayImage, PnmError> {
        let (info, body) = self.read_header()?;
        let pixels = match info.format {
            PnmFormat::GrayAscii => parse_gray_ascii(body, &info)?,
            PnmFormat::GrayBinary => parse_gray_binary(body, &info)?,
            other => return Err(PnmError::wrong_kind(other, "graymap")),
        };
        Ok(GrayImage {
            pixels: ImgVec::new(pixels, info.width, info.height),
            scale: info.scale,
        })
    }

    /// Decode a bitmap (`P1` or `P4`).
    pub fn decode_bilevel(self) -> Result<BilevelImage, PnmError> {
        let (info, body) = self.read_header()?;
        let pixels = match info.format {
            PnmFormat::BilevelAscii => parse_bilevel_ascii(body, &info)?,
            PnmFormat::BilevelBinary => parse_bilevel_binary(body, &info)?,
            other => return Err(PnmError::wrong_kind(other, "bitmap")),
        };
        Ok(BilevelImage {
            pixels: ImgVec::new(pixels, info.width, info.height),
        })
    }
}

/// Open and decode a pixmap (`P3`/`P6`) file.
pub fn open_rgb(path: impl AsRef<Path>) -> Result<RgbImage, PnmError> {
    let data = fs::read(path)?;
    DecodeRequest::new(&data).decode_rgb()
}

/// Open and decode a graymap (`P2`/`P5`) file.
pub fn open_grayscale(path: impl AsRef<Path>) -> Result<GrayImage, PnmError> {
    let data = fs::read(path)?;
    DecodeRequest::new(&data).decode_grayscale()
}

/// Open and decode a bitmap (`P1`/`P4`) file.
pub fn open_bilevel(path: impl AsRef<Path>) -> Result<BilevelImage, PnmError> {
    let data = fs::read(path)?;
    DecodeRequest::new(&data).decode_bilevel()
}

#[inline]
fn clamp_sample(value: u32, scale: u16) -> u16 {
    value.min(scale as u32) as u16
}

/// Whitespace-delimited decimal token reader for ASCII payloads.
///
/// Unlike the header scanner, this has no comment support: a `#` in the
/// payload is a parse error, matching the original decoder's behavior.
struct AsciiTokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> AsciiTokens<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Read one unsigned decimal token, skipping leading whitespace.
    /// `at` names the sample for the error message.
    fn next_uint(&mut self, at: impl Fn() -> String) -> Result<u32, PnmError> {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(b) = self.peek() {
            if !b.is_ascii_digit() {
                break;
            }
            value = value.saturating_mul(10).saturating_add((b - b'0') as u32);
            self.pos += 1;
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(b) => PnmError::Parse(format!(
                    "{}: expected a decimal sample, found {:?}",
                    at(),
                    b as char
                )),
                None => PnmError::Parse(format!("{}: no tokens left", at())),
            });
        }
        Ok(value)
    }
}

fn parse_rgb_ascii(body: &[u8], info: &ImageInfo) -> Result<Vec<RgbPixel>, PnmError> {
    let count = info.width * info.height;
    let mut tokens = AsciiTokens::new(body);
    let mut pixels = Vec::with_capacity(count);
    for i in 0..count {
        let at = || format!("pixel {i} of {count}");
        let r = tokens.next_uint(at)?;
        let g = tokens.next_uint(at)?;
        let b = tokens.next_uint(at)?;
        pixels.push(RgbPixel {
            r: clamp_sample(r, info.scale),
            g: clamp_sample(g, info.scale),
            b: clamp_sample(b, info.scale),
        });
    }
    Ok(pixels)
}

fn parse_gray_ascii(body: &[u8], info: &ImageInfo) -> Result<Vec<u16>, PnmError> {
    let count = info.width * info.height;
    let mut tokens = AsciiTokens::new(body);
    let mut pixels = Vec::with_capacity(count);
    for i in 0..count {
        let v = tokens.next_uint(|| format!("pixel {i} of {count}"))?;
        pixels.push(clamp_sample(v, info.scale));
    }
    Ok(pixels)
}

/// Bitmap ASCII cells are single `'0'`/`'1'` characters. The parser skips
/// whitespace one byte at a time and retries, so cells may be packed
/// (`0110`) or spread across lines; any other byte is a parse error.
fn parse_bilevel_ascii(body: &[u8], info: &ImageInfo) -> Result<Vec<u8>, PnmError> {
    let count = info.width * info.height;
    let mut pixels = Vec::with_capacity(count);
    let mut pos = 0usize;
    while pixels.len() < count {
        let Some(&b) = body.get(pos) else {
            return Err(PnmError::Parse(format!(
                "cell {} of {count}: no tokens left",
                pixels.len()
            )));
        };
        pos += 1;
        match b {
            b'0' => pixels.push(0),
            b'1' => pixels.push(1),
            _ if b.is_ascii_whitespace() => {}
            _ => {
                return Err(PnmError::Parse(format!(
                    "cell {} of {count}: expected '0' or '1', found {:?}",
                    pixels.len(),
                    b as char
                )));
            }
        }
    }
    Ok(pixels)
}

fn parse_rgb_binary(body: &[u8], info: &ImageInfo) -> Result<Vec<RgbPixel>, PnmError> {
    let count = info.width * info.height;
    let need = count * 3;
    if body.len() < need {
        return Err(PnmError::Parse(format!(
            "pixmap payload truncated: need {need} bytes for {count} pixels, have {}",
            body.len()
        )));
    }
    let raw: &[rgb::RGB<u8>] = bytemuck::cast_slice(&body[..need]);
    Ok(raw
        .iter()
        .map(|p| RgbPixel {
            r: clamp_sample(p.r as u32, info.scale),
            g: clamp_sample(p.g as u32, info.scale),
            b: clamp_sample(p.b as u32, info.scale),
        })
        .collect())
}

fn parse_gray_binary(body: &[u8], info: &ImageInfo) -> Result<Vec<u16>, PnmError> {
    let count = info.width * info.height;
    if body.len() < count {
        return Err(PnmError::Parse(format!(
            "graymap payload truncated: need {count} bytes, have {}",
            body.len()
        )));
    }
    Ok(body[..count]
        .iter()
        .map(|&b| clamp_sample(b as u32, info.scale))
        .collect())
}

/// One raw byte per cell, like the graymap payload. Real `P4` files pack
/// eight cells per byte; this codec reads the unpacked form its own encoder
/// writes.
fn parse_bilevel_binary(body: &[u8], info: &ImageInfo) -> Result<Vec<u8>, PnmError> {
    let count = info.width * info.height;
    if body.len() < count {
        return Err(PnmError::Parse(format!(
            "bitmap payload truncated: need {count} bytes, have {}",
            body.len()
        )));
    }
    Ok(body[..count].iter().map(|&b| b.min(1)).collect())
}
