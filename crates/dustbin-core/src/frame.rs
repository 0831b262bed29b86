/// JPEG start of image marker, followed by the first segment marker byte.
const SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];
/// JPEG end of image marker.
const EOI: [u8; 2] = [0xFF, 0xD9];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// The capture produced no bytes at all
    Empty,
    /// No JPEG start marker in the capture
    MissingStart,
    /// Start marker found but the image never ends
    Truncated,
}

/// A single captured JPEG image.
///
/// Borrows the capture buffer of the frame source, so it lives at most for
/// one sorting cycle.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    bytes: &'a [u8],
}

impl<'a> Frame<'a> {
    /// Wrap bytes that are already a complete JPEG image.
    pub fn new(bytes: &'a [u8]) -> Result<Self, FrameError> {
        if bytes.is_empty() {
            return Err(FrameError::Empty);
        }
        if !bytes.starts_with(&SOI) {
            return Err(FrameError::MissingStart);
        }
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Extract the first complete JPEG image from a raw capture buffer.
///
/// Camera DMA buffers usually carry padding before the start marker and
/// garbage after the end marker, so both are trimmed.
pub fn extract_jpeg(raw: &[u8]) -> Result<Frame<'_>, FrameError> {
    if raw.is_empty() {
        return Err(FrameError::Empty);
    }
    let start = raw
        .windows(SOI.len())
        .position(|w| w == SOI)
        .ok_or(FrameError::MissingStart)?;
    let body = &raw[start + SOI.len()..];
    let end = body
        .windows(EOI.len())
        .position(|w| w == EOI)
        .ok_or(FrameError::Truncated)?;

    Frame::new(&raw[start..start + SOI.len() + end + EOI.len()])
}
