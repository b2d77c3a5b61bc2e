use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Protocol versions the server can name. Only `Http1_1` is ever accepted
/// on an incoming request line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HttpVersion {
    Http1_0,
    Http1_1,
}

impl HttpVersion {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            HttpVersion::Http1_0 => b"HTTP/1.0",
            HttpVersion::Http1_1 => b"HTTP/1.1",
        }
    }
}

impl FromStr for HttpVersion {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, ()> {
        match value {
            "HTTP/1.0" => Ok(HttpVersion::Http1_0),
            "HTTP/1.1" => Ok(HttpVersion::Http1_1),
            _ => Err(()),
        }
    }
}

impl Display for HttpVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let string_value = match self {
            HttpVersion::Http1_0 => "HTTP/1.0",
            HttpVersion::Http1_1 => "HTTP/1.1",
        };

        write!(f, "{}", string_value)
    }
}
