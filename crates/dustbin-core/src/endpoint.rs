use core::fmt;

const HTTP_SCHEME: &str = "http://";
const DEFAULT_PORT: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointError {
    /// Only plain `http://` URLs can be reached from the device
    UnsupportedScheme,
    MissingHost,
    /// Host part carries user info, a query or a fragment
    InvalidHost,
    InvalidPort,
}

impl fmt::Display for EndpointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointError::UnsupportedScheme => f.write_str("only http:// urls are supported"),
            EndpointError::MissingHost => f.write_str("url has no host"),
            EndpointError::InvalidHost => f.write_str("url host is not a plain host name"),
            EndpointError::InvalidPort => f.write_str("url port is not a number"),
        }
    }
}

/// Classification endpoint split into the parts the HTTP client needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub host: &'a str,
    pub port: u16,
    pub path: &'a str,
}

impl<'a> Endpoint<'a> {
    /// Parse `http://host[:port][/path]`.
    ///
    /// A query stays part of the path, a fragment is dropped. User info and
    /// a query or fragment directly after the host are rejected.
    pub fn parse(url: &'a str) -> Result<Self, EndpointError> {
        let rest = url
            .get(..HTTP_SCHEME.len())
            .filter(|scheme| scheme.eq_ignore_ascii_case(HTTP_SCHEME))
            .map(|_| &url[HTTP_SCHEME.len()..])
            .ok_or(EndpointError::UnsupportedScheme)?;

        let (authority, path) = match rest.find(['/', '?', '#']) {
            Some(pos) if rest.as_bytes()[pos] == b'/' => (&rest[..pos], &rest[pos..]),
            Some(_) => return Err(EndpointError::InvalidHost),
            None => (rest, "/"),
        };
        let path = path.split_once('#').map_or(path, |(path, _)| path);

        if authority.contains(|c: char| c == '@' || c.is_whitespace()) {
            return Err(EndpointError::InvalidHost);
        }

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| EndpointError::InvalidPort)?;
                (host, port)
            }
            None => (authority, DEFAULT_PORT),
        };

        if host.is_empty() {
            return Err(EndpointError::MissingHost);
        }

        Ok(Self { host, port, path })
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}:{}{}", HTTP_SCHEME, self.host, self.port, self.path)
    }
}
