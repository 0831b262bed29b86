pub(crate) mod client;

pub(crate) use client::HttpClient;

use dustbin_core::ReadError;

use crate::infrastructure::drivers::NetworkError;

#[derive(Debug)]
pub enum Error {
    /// Endpoint host could not be resolved
    Dns,
    Connect,
    Closed,
    /// Response head is malformed
    Parse,
    /// Response head does not fit the response buffer
    TooLarge,
    FormatHeaders,
}

impl From<core::fmt::Error> for Error {
    fn from(_error: core::fmt::Error) -> Self {
        Error::FormatHeaders
    }
}

impl From<embassy_net::tcp::Error> for Error {
    fn from(err: embassy_net::tcp::Error) -> Self {
        match err {
            embassy_net::tcp::Error::ConnectionReset => Error::Closed,
        }
    }
}

impl From<NetworkError> for Error {
    fn from(_err: NetworkError) -> Self {
        Error::Dns
    }
}

impl From<ReadError<embassy_net::tcp::Error>> for Error {
    fn from(err: ReadError<embassy_net::tcp::Error>) -> Self {
        match err {
            ReadError::Io(err) => err.into(),
            ReadError::Closed => Error::Closed,
            ReadError::TooLarge => Error::TooLarge,
            ReadError::Parse(_) => Error::Parse,
        }
    }
}
