//! Owned image buffers.
//!
//! All three image kinds store a single contiguous row-major buffer via
//! `imgref::ImgVec`, with typed pixels from the `rgb` crate for color data.
//! `width * height == buffer length` is structural: `ImgVec` carries the
//! dimensions and the codec never constructs a buffer of any other size.
//!
//! Samples are `u16`: the NetPBM maxval may be up to 65535, and 8-bit
//! payloads widen losslessly.

use imgref::ImgVec;
use rgb::RGB;

/// One RGB pixel, each channel in `[0, scale]`.
pub type RgbPixel = RGB<u16>;

/// An owned RGB image.
#[derive(Clone, Debug)]
pub struct RgbImage {
    /// Row-major pixel buffer.
    pub pixels: ImgVec<RgbPixel>,
    /// Maximum channel intensity declared for this image (>= 1).
    pub scale: u16,
}

/// An owned single-channel grayscale image, intensities in `[0, scale]`.
#[derive(Clone, Debug)]
pub struct GrayImage {
    /// Row-major intensity buffer.
    pub pixels: ImgVec<u16>,
    /// Maximum intensity declared for this image (>= 1).
    pub scale: u16,
}

/// An owned bilevel (black/white) image. Cells are 0 or 1; the scale is
/// implicitly 1 and not stored.
#[derive(Clone, Debug)]
pub struct BilevelImage {
    /// Row-major cell buffer, each cell 0 or 1.
    pub pixels: ImgVec<u8>,
}

// `imgref::Img` does not implement `PartialEq`; compare dimensions and
// buffers directly. Equality is pixel-for-pixel, scale included.
impl PartialEq for RgbImage {
    fn eq(&self, other: &Self) -> bool {
        self.scale == other.scale
            && self.pixels.width() == other.pixels.width()
            && self.pixels.height() == other.pixels.height()
            && self.pixels.buf() == other.pixels.buf()
    }
}

impl PartialEq for GrayImage {
    fn eq(&self, other: &Self) -> bool {
        self.scale == other.scale
            && self.pixels.width() == other.pixels.width()
            && self.pixels.height() == other.pixels.height()
            && self.pixels.buf() == other.pixels.buf()
    }
}

impl PartialEq for BilevelImage {
    fn eq(&self, other: &Self) -> bool {
        self.pixels.width() == other.pixels.width()
            && self.pixels.height() == other.pixels.height()
            && self.pixels.buf() == other.pixels.buf()
    }
}

impl RgbImage {
    /// Allocate a zero-filled image.
    pub fn new(width: usize, height: usize, scale: u16) -> Self {
        Self {
            pixels: ImgVec::new(vec![RgbPixel::default(); width * height], width, height),
            scale,
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }
}

impl GrayImage {
    /// Allocate a zero-filled image.
    pub fn new(width: usize, height: usize, scale: u16) -> Self {
        Self {
            pixels: ImgVec::new(vec![0u16; width * height], width, height),
            scale,
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    /// Intensity at `(x, y)`. Row-major: `buf[y * width + x]`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.pixels.buf()[y * self.width() + x]
    }
}

impl BilevelImage {
    /// Allocate a zero-filled (all white, by PBM convention) image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: ImgVec::new(vec![0u8; width * height], width, height),
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }
}
