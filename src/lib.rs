//! # pnmsobel
//!
//! NetPBM (PBM/PGM/PPM) codec and multithreaded Sobel edge filter.
//!
//! The codec reads and writes all six NetPBM variants (`P1`–`P6`, ASCII and
//! binary); the filter computes the Sobel gradient magnitude, statically
//! partitioned across a caller-chosen number of worker threads.
//!
//! ## Usage
//!
//! ```no_run
//! use pnmsobel::{Representation, open_rgb, sobel, write_grayscale};
//!
//! let image = open_rgb("photo.ppm")?;
//! let edges = sobel(&image, 4)?;
//! write_grayscale("edges.pgm", &edges, Representation::Binary)?;
//! # Ok::<(), pnmsobel::PnmError>(())
//! ```

#![forbid(unsafe_code)]

mod convert;
mod decode;
mod encode;
mod error;
mod format;
mod header;
mod limits;
mod pixel;
mod sobel;

pub use convert::rgb_to_grayscale;
pub use decode::{DecodeRequest, open_bilevel, open_grayscale, open_rgb};
pub use encode::{
    encode_bilevel, encode_grayscale, encode_rgb, write_bilevel, write_grayscale, write_rgb,
};
pub use error::PnmError;
pub use format::{PnmFormat, Representation};
pub use header::{ImageInfo, probe};
pub use limits::Limits;
pub use pixel::{BilevelImage, GrayImage, RgbImage, RgbPixel};
pub use sobel::{sobel, sobel_grayscale};
