//! Image encoding.
//!
//! Encoding to memory cannot fail; the `write_*` helpers encode and write
//! the result to a file in one step. The header is always three lines (two
//! for bitmaps): magic, `width height`, and scale where the variant carries
//! one. ASCII payloads emit one output line per image row with samples
//! separated by single spaces; binary payloads are raw bytes with no
//! separators.

use std::fs;
use std::path::Path;

use crate::error::PnmError;
use crate::format::{PnmFormat, Representation};
use crate::pixel::{BilevelImage, GrayImage, RgbImage};

/// Encode a pixmap as `P3` (ascii) or `P6` (binary).
pub fn encode_rgb(image: &RgbImage, representation: Representation) -> Vec<u8> {
    let format = match representation {
        Representation::Ascii => PnmFormat::RgbAscii,
        Representation::Binary => PnmFormat::RgbBinary,
    };
    let mut out = header(format, image.width(), image.height(), image.scale);
    match representation {
        Representation::Ascii => {
            for row in image.pixels.as_ref().rows() {
                let mut line = String::new();
                for (i, px) in row.iter().enumerate() {
                    if i > 0 {
                        line.push(' ');
                    }
                    line.push_str(&format!("{} {} {}", px.r, px.g, px.b));
                }
                line.push('\n');
                out.extend_from_slice(line.as_bytes());
            }
        }
        Representation::Binary => {
            for px in image.pixels.buf() {
                out.push(byte_sample(px.r));
                out.push(byte_sample(px.g));
                out.push(byte_sample(px.b));
            }
        }
    }
    out
}

/// Encode a graymap as `P2` (ascii) or `P5` (binary).
pub fn encode_grayscale(image: &GrayImage, representation: Representation) -> Vec<u8> {
    let format = match representation {
        Representation::Ascii => PnmFormat::GrayAscii,
        Representation::Binary => PnmFormat::GrayBinary,
    };
    let mut out = header(format, image.width(), image.height(), image.scale);
    match representation {
        Representation::Ascii => {
            for row in image.pixels.as_ref().rows() {
                push_ascii_row(&mut out, row.iter().copied());
            }
        }
        Representation::Binary => {
            out.extend(image.pixels.buf().iter().map(|&v| byte_sample(v)));
        }
    }
    out
}

/// Encode a bitmap as `P1` (ascii) or `P4` (binary, one byte per cell).
pub fn encode_bilevel(image: &BilevelImage, representation: Representation) -> Vec<u8> {
    let format = match representation {
        Representation::Ascii => PnmFormat::BilevelAscii,
        Representation::Binary => PnmFormat::BilevelBinary,
    };
    let mut out = header(format, image.width(), image.height(), 1);
    match representation {
        Representation::Ascii => {
            for row in image.pixels.as_ref().rows() {
                push_ascii_row(&mut out, row.iter().map(|&v| v.min(1) as u16));
            }
        }
        Representation::Binary => {
            out.extend(image.pixels.buf().iter().map(|&v| v.min(1)));
        }
    }
    out
}

/// Encode and write a pixmap file.
pub fn write_rgb(
    path: impl AsRef<Path>,
    image: &RgbImage,
    representation: Representation,
) -> Result<(), PnmError> {
    fs::write(path, encode_rgb(image, representation))?;
    Ok(())
}

/// Encode and write a graymap file.
pub fn write_grayscale(
    path: impl AsRef<Path>,
    image: &GrayImage,
    representation: Representation,
) -> Result<(), PnmError> {
    fs::write(path, encode_grayscale(image, representation))?;
    Ok(())
}

/// Encode and write a bitmap file.
pub fn write_bilevel(
    path: impl AsRef<Path>,
    image: &BilevelImage,
    representation: Representation,
) -> Result<(), PnmError> {
    fs::write(path, encode_bilevel(image, representation))?;
    Ok(())
}

fn header(format: PnmFormat, width: usize, height: usize, scale: u16) -> Vec<u8> {
    let mut s = format!("{}\n{width} {height}\n", format.magic_str());
    if format.has_scale() {
        s.push_str(&format!("{scale}\n"));
    }
    s.into_bytes()
}

fn push_ascii_row(out: &mut Vec<u8>, samples: impl Iterator<Item = u16>) {
    let mut line = String::new();
    for (i, v) in samples.enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(&format!("{v}"));
    }
    line.push('\n');
    out.extend_from_slice(line.as_bytes());
}

/// Binary payloads carry one byte per sample; values above 255 clamp.
#[inline]
fn byte_sample(value: u16) -> u8 {
    value.min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::DecodeRequest;
    use crate::pixel::RgbPixel;
    use imgref::ImgVec;

    fn sample_rgb() -> RgbImage {
        let buf = (0..6u16)
            .map(|i| RgbPixel {
                r: i * 10,
                g: i * 10 + 1,
                b: i * 10 + 2,
            })
            .collect();
        RgbImage {
            pixels: ImgVec::new(buf, 3, 2),
            scale: 255,
        }
    }

    #[test]
    fn ascii_rgb_layout_is_exact() {
        let img = RgbImage {
            pixels: ImgVec::new(
                vec![
                    RgbPixel { r: 1, g: 2, b: 3 },
                    RgbPixel { r: 4, g: 5, b: 6 },
                    RgbPixel { r: 7, g: 8, b: 9 },
                    RgbPixel { r: 10, g: 11, b: 12 },
                ],
                2,
                2,
            ),
            scale: 255,
        };
        let bytes = encode_rgb(&img, Representation::Ascii);
        assert_eq!(
            bytes,
            b"P3\n2 2\n255\n1 2 3 4 5 6\n7 8 9 10 11 12\n"
        );
    }

    #[test]
    fn bitmap_header_has_no_scale_line() {
        let img = BilevelImage {
            pixels: ImgVec::new(vec![0, 1, 1, 0], 2, 2),
        };
        let bytes = encode_bilevel(&img, Representation::Ascii);
        assert_eq!(bytes, b"P1\n2 2\n0 1\n1 0\n");
    }

    #[test]
    fn rgb_round_trip_both_representations() {
        let img = sample_rgb();
        for repr in [Representation::Ascii, Representation::Binary] {
            let bytes = encode_rgb(&img, repr);
            let back = DecodeRequest::new(&bytes).decode_rgb().unwrap();
            assert_eq!(back, img, "round trip failed for {repr:?}");
        }
    }

    #[test]
    fn gray_round_trip_both_representations() {
        let img = GrayImage {
            pixels: ImgVec::new(vec![0, 17, 99, 255, 128, 1], 2, 3),
            scale: 255,
        };
        for repr in [Representation::Ascii, Representation::Binary] {
            let bytes = encode_grayscale(&img, repr);
            let back = DecodeRequest::new(&bytes).decode_grayscale().unwrap();
            assert_eq!(back, img, "round trip failed for {repr:?}");
        }
    }

    #[test]
    fn bilevel_round_trip_both_representations() {
        let img = BilevelImage {
            pixels: ImgVec::new(vec![0, 1, 1, 0, 1, 0], 3, 2),
        };
        for repr in [Representation::Ascii, Representation::Binary] {
            let bytes = encode_bilevel(&img, repr);
            let back = DecodeRequest::new(&bytes).decode_bilevel().unwrap();
            assert_eq!(back, img, "round trip failed for {repr:?}");
        }
    }

    #[test]
    fn wide_scale_round_trips_in_ascii() {
        let img = GrayImage {
            pixels: ImgVec::new(vec![0, 300, 1020, 65535], 2, 2),
            scale: 65535,
        };
        let bytes = encode_grayscale(&img, Representation::Ascii);
        let back = DecodeRequest::new(&bytes).decode_grayscale().unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn binary_samples_above_byte_range_clamp() {
        let img = GrayImage {
            pixels: ImgVec::new(vec![300], 1, 1),
            scale: 1000,
        };
        let bytes = encode_grayscale(&img, Representation::Binary);
        assert_eq!(bytes[bytes.len() - 1], 255);
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join(format!("pnmsobel-rt-{}.ppm", std::process::id()));
        let img = sample_rgb();
        write_rgb(&path, &img, Representation::Binary).unwrap();
        let back = crate::decode::open_rgb(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(back.unwrap(), img);
    }

    #[test]
    fn write_to_unwritable_path_is_io_error() {
        let img = sample_rgb();
        let result = write_rgb("/nonexistent/dir/out.ppm", &img, Representation::Binary);
        assert!(matches!(result, Err(PnmError::Io(_))));
    }
}
