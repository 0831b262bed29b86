//! HTTP/1.1 framing for the frame upload.
//!
//! Only what one `POST` with `Connection: close` needs: writing the request
//! head, framing the body, parsing the response head and reading the reply.

use core::fmt::Write;
use core::ops::Range;

use embedded_io_async::Read;
use log::{debug, warn};

use crate::endpoint::Endpoint;

macro_rules! boundary {
    () => {
        "dustbin-frame-7d1c3a"
    };
}

const MULTIPART_PREFIX: &str = concat!(
    "--",
    boundary!(),
    "\r\nContent-Disposition: form-data; name=\"file\"; filename=\"frame.jpg\"\r\n",
    "Content-Type: image/jpeg\r\n\r\n"
);
const MULTIPART_SUFFIX: &str = concat!("\r\n--", boundary!(), "--\r\n");
const MULTIPART_CONTENT_TYPE: &str = concat!("multipart/form-data; boundary=", boundary!());

const HEADER_END: &[u8] = b"\r\n\r\n";

pub type StatusCode = u16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpParseError {
    /// Response head is not valid UTF-8
    Encoding,
    /// Status line is not `HTTP/1.x <code> ...`
    StatusLine,
}

/// How the frame is put into the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadEncoding {
    /// Body is the bare JPEG, `Content-Type: image/jpeg`
    #[default]
    RawJpeg,
    /// Body is a `multipart/form-data` form with one `file` field
    Multipart,
}

impl UploadEncoding {
    pub const fn content_type(self) -> &'static str {
        match self {
            UploadEncoding::RawJpeg => "image/jpeg",
            UploadEncoding::Multipart => MULTIPART_CONTENT_TYPE,
        }
    }

    /// Bytes sent before the frame.
    pub const fn prefix(self) -> &'static [u8] {
        match self {
            UploadEncoding::RawJpeg => b"",
            UploadEncoding::Multipart => MULTIPART_PREFIX.as_bytes(),
        }
    }

    /// Bytes sent after the frame.
    pub const fn suffix(self) -> &'static [u8] {
        match self {
            UploadEncoding::RawJpeg => b"",
            UploadEncoding::Multipart => MULTIPART_SUFFIX.as_bytes(),
        }
    }

    /// Total body length for a frame of `frame_len` bytes.
    pub const fn body_len(self, frame_len: usize) -> usize {
        self.prefix().len() + frame_len + self.suffix().len()
    }
}

/// Connection policy of the request.
#[derive(Debug, Clone, Copy)]
enum ConnectionPolicy {
    Close,
}

impl ConnectionPolicy {
    fn as_str(self) -> &'static str {
        match self {
            ConnectionPolicy::Close => "close",
        }
    }
}

/// Request line and headers of the upload.
pub struct RequestHead<'a> {
    endpoint: &'a Endpoint<'a>,
    user_agent: &'a str,
    content_type: &'a str,
    content_length: usize,
    connection: ConnectionPolicy,
}

impl<'a> RequestHead<'a> {
    /// Create a `POST` head for the endpoint.
    pub const fn post(endpoint: &'a Endpoint<'a>, user_agent: &'a str) -> Self {
        Self {
            endpoint,
            user_agent,
            content_type: UploadEncoding::RawJpeg.content_type(),
            content_length: 0,
            connection: ConnectionPolicy::Close,
        }
    }

    /// Set content type and length for a frame of `frame_len` bytes.
    #[must_use]
    pub const fn with_upload(mut self, encoding: UploadEncoding, frame_len: usize) -> Self {
        self.content_type = encoding.content_type();
        self.content_length = encoding.body_len(frame_len);
        self
    }

    /// Write the head, including the blank line ending it.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error> {
        write!(writer, "POST {} HTTP/1.1\r\n", self.endpoint.path)?;
        if self.endpoint.port == 80 {
            write!(writer, "Host: {}\r\n", self.endpoint.host)?;
        } else {
            write!(writer, "Host: {}:{}\r\n", self.endpoint.host, self.endpoint.port)?;
        }
        write!(writer, "User-Agent: {}\r\n", self.user_agent)?;
        write!(writer, "Accept: */*\r\n")?;
        write!(writer, "Content-Type: {}\r\n", self.content_type)?;
        write!(writer, "Content-Length: {}\r\n", self.content_length)?;
        write!(writer, "Connection: {}\r\n", self.connection.as_str())?;
        write!(writer, "\r\n")?;
        Ok(())
    }
}

/// Parsed status line and the headers the client cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: StatusCode,
    /// Length of the head including the terminating blank line
    pub header_len: usize,
    pub content_length: Option<usize>,
}

impl ResponseHead {
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }
}

/// `2xx` status.
pub const fn is_success(status: StatusCode) -> bool {
    status >= 200 && status < 300
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError<E> {
    Io(E),
    /// Peer closed before the head was complete
    Closed,
    /// Head does not fit the buffer
    TooLarge,
    Parse(HttpParseError),
}

/// Reply read into a caller buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub head: ResponseHead,
    /// Body location inside the buffer
    pub body: Range<usize>,
}

/// Read one reply of a `Connection: close` exchange into `buf`.
///
/// The body ends at `Content-Length`, at end of stream, or where `buf` is
/// full, whichever comes first. A body cut by the buffer is logged.
pub async fn read_response<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
) -> Result<Response, ReadError<R::Error>> {
    let mut received = 0;
    let head = loop {
        if received == buf.len() {
            return Err(ReadError::TooLarge);
        }
        let n = reader.read(&mut buf[received..]).await.map_err(ReadError::Io)?;
        if n == 0 {
            return Err(ReadError::Closed);
        }
        received += n;
        if let Some(head) = parse_response_head(&buf[..received]).map_err(ReadError::Parse)? {
            break head;
        }
    };

    let expected = head.content_length.map(|len| head.header_len + len);
    loop {
        if expected.is_some_and(|expected| received >= expected) {
            break;
        }
        if received == buf.len() {
            warn!("http: reply body truncated to {} bytes", received - head.header_len);
            break;
        }
        let n = reader.read(&mut buf[received..]).await.map_err(ReadError::Io)?;
        if n == 0 {
            break;
        }
        received += n;
    }

    let end = expected.map_or(received, |expected| expected.min(received));
    if head.is_success() {
        debug!("http: status {} with {} body bytes", head.status, end - head.header_len);
    } else {
        warn!("http: status {} with {} body bytes", head.status, end - head.header_len);
    }

    Ok(Response {
        head,
        body: head.header_len..end,
    })
}

/// Parse the response head from the start of `buf`.
///
/// Returns `Ok(None)` while the blank line ending the head has not been
/// received yet.
pub fn parse_response_head(buf: &[u8]) -> Result<Option<ResponseHead>, HttpParseError> {
    let Some(pos) = buf.windows(HEADER_END.len()).position(|w| w == HEADER_END) else {
        return Ok(None);
    };
    let header_len = pos + HEADER_END.len();
    let head = core::str::from_utf8(&buf[..pos]).map_err(|_| HttpParseError::Encoding)?;

    let (status_line, headers) = head.split_once("\r\n").unwrap_or((head, ""));
    let status = parse_status_line(status_line).ok_or(HttpParseError::StatusLine)?;

    Ok(Some(ResponseHead {
        status,
        header_len,
        content_length: find_content_length(headers),
    }))
}

fn parse_status_line(line: &str) -> Option<StatusCode> {
    let mut parts = line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/1.") {
        return None;
    }
    let code = parts.next()?;
    if code.len() != 3 {
        return None;
    }
    code.parse().ok()
}

/// Find the content length in the header lines.
fn find_content_length(headers: &str) -> Option<usize> {
    const TARGET: &str = "content-length:";
    headers.split("\r\n").find_map(|line| {
        let name = line.get(..TARGET.len())?;
        if !name.eq_ignore_ascii_case(TARGET) {
            return None;
        }
        line[TARGET.len()..].trim().parse().ok()
    })
}
