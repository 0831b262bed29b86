use dustbin_core::{Endpoint, RequestHead, Response, UploadEncoding, read_response};
use embassy_net::Stack;
use embassy_net::tcp::TcpSocket;
use embassy_time::Duration;
use embedded_io_async::Write as _;
use heapless::String;
use log::debug;

use super::Error;
use crate::infrastructure::drivers::resolve_host;

const HEADER_BUFFER_SIZE: usize = 512;
const STREAM_CHUNK_SIZE: usize = 1024;

/// Minimal HTTP/1.1 client for one request per connection.
pub(crate) struct HttpClient<'a> {
    stack: Stack<'static>,
    rx_buffer: &'a mut [u8],
    tx_buffer: &'a mut [u8],
    timeout: Duration,
}

impl<'a> HttpClient<'a> {
    pub(crate) fn new(
        stack: Stack<'static>,
        rx_buffer: &'a mut [u8],
        tx_buffer: &'a mut [u8],
        timeout: Duration,
    ) -> Self {
        Self {
            stack,
            rx_buffer,
            tx_buffer,
            timeout,
        }
    }

    /// POST the frame and read the reply into `response`.
    ///
    /// Bodies longer than the buffer are cut to what fits.
    pub(crate) async fn post_frame(
        &mut self,
        endpoint: &Endpoint<'_>,
        user_agent: &str,
        encoding: UploadEncoding,
        frame: &[u8],
        response: &mut [u8],
    ) -> Result<Response, Error> {
        let address = resolve_host(self.stack, endpoint.host).await?;

        let mut socket = TcpSocket::new(self.stack, &mut *self.rx_buffer, &mut *self.tx_buffer);
        socket.set_timeout(Some(self.timeout));
        socket
            .connect((address, endpoint.port))
            .await
            .map_err(|e| {
                debug!("http: connect to {} failed: {:?}", endpoint, e);
                Error::Connect
            })?;

        let mut head = String::<HEADER_BUFFER_SIZE>::new();
        RequestHead::post(endpoint, user_agent)
            .with_upload(encoding, frame.len())
            .write_to(&mut head)?;

        socket.write_all(head.as_bytes()).await?;
        socket.write_all(encoding.prefix()).await?;
        for chunk in frame.chunks(STREAM_CHUNK_SIZE) {
            socket.write_all(chunk).await?;
        }
        socket.write_all(encoding.suffix()).await?;
        socket.flush().await?;

        let reply = read_response(&mut socket, response).await;
        socket.close();
        Ok(reply?)
    }
}
