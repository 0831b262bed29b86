use std::io::Read;
use std::time::Duration;

use anyhow::{Context, Result};
use dustbin_core::UploadEncoding;

/// Largest reply body read back from the endpoint.
const MAX_REPLY_BYTES: u64 = 64 * 1024;

/// Status and body of an endpoint reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends one image to the classifier.
pub trait Uploader {
    fn upload(&self, jpeg: &[u8]) -> Result<Reply>;
}

/// Uploads over HTTP(S) with the same body framing as the firmware.
pub struct HttpUploader {
    agent: ureq::Agent,
    url: String,
    encoding: UploadEncoding,
}

impl HttpUploader {
    pub fn new(url: impl Into<String>, encoding: UploadEncoding, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("dustbin-sim/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            url: url.into(),
            encoding,
        }
    }
}

/// Request body for the image in the given encoding.
pub fn encode_body(encoding: UploadEncoding, jpeg: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(encoding.body_len(jpeg.len()));
    body.extend_from_slice(encoding.prefix());
    body.extend_from_slice(jpeg);
    body.extend_from_slice(encoding.suffix());
    body
}

impl Uploader for HttpUploader {
    fn upload(&self, jpeg: &[u8]) -> Result<Reply> {
        let body = encode_body(self.encoding, jpeg);
        let result = self
            .agent
            .post(&self.url)
            .set("Content-Type", self.encoding.content_type())
            .send_bytes(&body);

        // Error statuses still carry a body worth showing
        let response = match result {
            Ok(response) | Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(e).context("upload image"),
        };

        let status = response.status();
        let mut body = Vec::new();
        response
            .into_reader()
            .take(MAX_REPLY_BYTES)
            .read_to_end(&mut body)
            .context("read reply body")?;

        Ok(Reply { status, body })
    }
}
