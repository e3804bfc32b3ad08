//! NetPBM format variants and detection.

/// The six NetPBM variants, keyed by the `P1`–`P6` magic.
///
/// A closed enum (not `#[non_exhaustive]`): the NetPBM family is fixed, and
/// exhaustive matches over it are how the codec dispatches body parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmFormat {
    /// `P1` — portable bitmap, ASCII `0`/`1` cells.
    BilevelAscii,
    /// `P2` — portable graymap, ASCII decimal samples.
    GrayAscii,
    /// `P3` — portable pixmap, ASCII decimal RGB triples.
    RgbAscii,
    /// `P4` — portable bitmap, one raw byte per cell.
    BilevelBinary,
    /// `P5` — portable graymap, one raw byte per sample.
    GrayBinary,
    /// `P6` — portable pixmap, three raw bytes per pixel.
    RgbBinary,
}

/// Pixel payload representation selected when encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Representation {
    /// Whitespace-delimited decimal text.
    Ascii,
    /// Raw bytes, no separators.
    #[default]
    Binary,
}

impl PnmFormat {
    /// Detect the variant from the two-byte magic. Returns None for a
    /// non-`P` first byte or a digit outside `1`–`6`.
    pub fn from_magic(magic: [u8; 2]) -> Option<Self> {
        if magic[0] != b'P' {
            return None;
        }
        match magic[1] {
            b'1' => Some(PnmFormat::BilevelAscii),
            b'2' => Some(PnmFormat::GrayAscii),
            b'3' => Some(PnmFormat::RgbAscii),
            b'4' => Some(PnmFormat::BilevelBinary),
            b'5' => Some(PnmFormat::GrayBinary),
            b'6' => Some(PnmFormat::RgbBinary),
            _ => None,
        }
    }

    /// The magic token as written in a file header.
    pub fn magic_str(self) -> &'static str {
        match self {
            PnmFormat::BilevelAscii => "P1",
            PnmFormat::GrayAscii => "P2",
            PnmFormat::RgbAscii => "P3",
            PnmFormat::BilevelBinary => "P4",
            PnmFormat::GrayBinary => "P5",
            PnmFormat::RgbBinary => "P6",
        }
    }

    /// Whether the pixel payload is raw bytes (`P4`–`P6`).
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            PnmFormat::BilevelBinary | PnmFormat::GrayBinary | PnmFormat::RgbBinary
        )
    }

    /// Whether the header carries a scale (maxval) token. Bitmap variants
    /// fix the scale to 1 and omit it.
    pub fn has_scale(self) -> bool {
        !matches!(self, PnmFormat::BilevelAscii | PnmFormat::BilevelBinary)
    }

    /// The representation this variant's payload uses.
    pub fn representation(self) -> Representation {
        if self.is_binary() {
            Representation::Binary
        } else {
            Representation::Ascii
        }
    }

    /// Common file extension for the variant's image kind.
    pub fn extension(self) -> &'static str {
        match self {
            PnmFormat::BilevelAscii | PnmFormat::BilevelBinary => "pbm",
            PnmFormat::GrayAscii | PnmFormat::GrayBinary => "pgm",
            PnmFormat::RgbAscii | PnmFormat::RgbBinary => "ppm",
        }
    }
}
