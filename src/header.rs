//! Header parsing: magic token, dimensions, scale, comment skipping.
//!
//! The header grammar is the magic (`P` + digit `1`–`6`) followed by two or
//! three whitespace-delimited unsigned decimal tokens: width, height, and —
//! for every variant except the bitmaps — scale. Before each numeric token
//! the scanner consumes bytes until it sees a decimal digit; a `#` starts a
//! comment that runs to the next newline. Comments are legal only between
//! header tokens, never inside the pixel payload.

use crate::error::PnmError;
use crate::format::PnmFormat;

/// Header metadata, available without decoding the pixel payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: PnmFormat,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Maximum sample value. Implicitly 1 for bitmap variants.
    pub scale: u16,
}

impl ImageInfo {
    /// Parse only the header of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PnmError> {
        let mut reader = HeaderReader::new(data);
        reader.read_header()
    }
}

/// Probe header metadata without decoding pixels.
pub fn probe(data: &[u8]) -> Result<ImageInfo, PnmError> {
    ImageInfo::from_bytes(data)
}

/// Comment scanner state while looking for the next numeric token.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    Inside,
}

/// Cursor over the input bytes. Lives only for the duration of one decode;
/// after the header is read, `rest()` hands the payload to the body parser.
pub(crate) struct HeaderReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The unconsumed tail of the input (the pixel payload once the header
    /// has been read).
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.data.get(self.pos).copied();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    /// Read the full header: magic, width, height, and scale where the
    /// variant carries one. Exactly one whitespace byte after the last
    /// header token is consumed, per the NetPBM convention, so that binary
    /// payloads start at the right offset.
    pub(crate) fn read_header(&mut self) -> Result<ImageInfo, PnmError> {
        let magic = self.read_magic()?;
        let format = PnmFormat::from_magic(magic).ok_or_else(|| {
            PnmError::Format(format!(
                "bad magic token {:?}: expected P1-P6",
                String::from_utf8_lossy(&magic)
            ))
        })?;

        let width = self.read_uint("width")?;
        let height = self.read_uint("height")?;
        if width == 0 || height == 0 {
            return Err(PnmError::Parse(format!(
                "image dimensions must be positive, got {width}x{height}"
            )));
        }

        let scale = if format.has_scale() {
            let scale = self.read_uint("scale")?;
            if scale == 0 {
                return Err(PnmError::Parse("scale must be at least 1".into()));
            }
            u16::try_from(scale)
                .map_err(|_| PnmError::Parse(format!("scale {scale} exceeds 65535")))?
        } else {
            // Bitmap variants fix the scale to 1 and carry no token.
            1
        };

        Ok(ImageInfo {
            format,
            width,
            height,
            scale,
        })
    }

    fn read_magic(&mut self) -> Result<[u8; 2], PnmError> {
        let a = self.next_byte().ok_or_else(|| PnmError::eof("reading magic token"))?;
        let b = self.next_byte().ok_or_else(|| PnmError::eof("reading magic token"))?;
        Ok([a, b])
    }

    /// Two-state scanner: consume bytes until a decimal digit, treating
    /// `#`-to-newline runs as comments. EOF here is an IO error (the header
    /// is structurally incomplete, not merely malformed).
    fn skip_to_digit(&mut self, what: &str) -> Result<u8, PnmError> {
        let mut state = ScanState::Outside;
        loop {
            let b = self
                .next_byte()
                .ok_or_else(|| PnmError::eof(&format!("scanning for {what} in header")))?;
            match state {
                ScanState::Outside if b.is_ascii_digit() => return Ok(b),
                ScanState::Outside if b == b'#' => state = ScanState::Inside,
                ScanState::Outside => {}
                ScanState::Inside if b == b'\n' => state = ScanState::Outside,
                ScanState::Inside => {}
            }
        }
    }

    /// Read one unsigned decimal token. The byte that terminates the digit
    /// run is consumed, which doubles as the single-whitespace separator
    /// before a binary payload.
    fn read_uint(&mut self, what: &str) -> Result<usize, PnmError> {
        let first = self.skip_to_digit(what)?;
        let mut value = (first - b'0') as usize;
        while let Some(b) = self.next_byte() {
            if !b.is_ascii_digit() {
                break;
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as usize))
                .ok_or_else(|| PnmError::Parse(format!("{what} overflows")))?;
        }
        Ok(value)
    }
}
