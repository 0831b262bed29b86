use dustbin_core::{Classifier, ClassifierReply, Endpoint, EndpointError, Frame, UploadEncoding};
use embassy_net::Stack;
use embassy_time::Duration;
use log::info;

use crate::core::net::http::{Error as HttpError, HttpClient};
use crate::infrastructure::config::{self, ClassifierConfig};
use crate::mk_static;

const SOCKET_RX_SIZE: usize = 2048;
const SOCKET_TX_SIZE: usize = 4096;
const RESPONSE_BUFFER_SIZE: usize = 2048;

/// Classification endpoint reached with a plain HTTP POST.
pub struct HttpClassifier {
    stack: Stack<'static>,
    endpoint: Endpoint<'static>,
    encoding: UploadEncoding,
    user_agent: &'static str,
    timeout: Duration,
    rx_buffer: &'static mut [u8],
    tx_buffer: &'static mut [u8],
    response: &'static mut [u8],
}

impl HttpClassifier {
    /// Create the classifier from the compile-time configuration.
    ///
    /// Must be called once, the socket buffers are static.
    pub fn from_config(stack: Stack<'static>) -> Result<Self, EndpointError> {
        Self::new(stack, &config::CLASSIFIER)
    }

    fn new(stack: Stack<'static>, config: &ClassifierConfig) -> Result<Self, EndpointError> {
        let endpoint = Endpoint::parse(config.url)?;
        info!("classifier: posting {:?} frames to {}", config.encoding, endpoint);

        Ok(Self {
            stack,
            endpoint,
            encoding: config.encoding,
            user_agent: config.user_agent,
            timeout: Duration::from_secs(config.timeout_secs),
            rx_buffer: mk_static!([u8; SOCKET_RX_SIZE], [0; SOCKET_RX_SIZE]),
            tx_buffer: mk_static!([u8; SOCKET_TX_SIZE], [0; SOCKET_TX_SIZE]),
            response: mk_static!([u8; RESPONSE_BUFFER_SIZE], [0; RESPONSE_BUFFER_SIZE]),
        })
    }
}

impl Classifier for HttpClassifier {
    type Error = HttpError;

    async fn classify(&mut self, frame: Frame<'_>) -> Result<ClassifierReply<'_>, Self::Error> {
        let mut client = HttpClient::new(
            self.stack,
            &mut *self.rx_buffer,
            &mut *self.tx_buffer,
            self.timeout,
        );
        let reply = client
            .post_frame(
                &self.endpoint,
                self.user_agent,
                self.encoding,
                frame.as_bytes(),
                &mut *self.response,
            )
            .await?;

        Ok(ClassifierReply {
            status: reply.head.status,
            body: &self.response[reply.body],
        })
    }
}
