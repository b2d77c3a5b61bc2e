use std::fmt::{Display, Formatter};

/// The statuses this server can put on a status line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResponseStatusCode {
    Ok = 200,

    MovedPermanently = 301,

    BadRequest = 400,
    NotFound = 404,
    MethodNotAllowed = 405,
    PayloadTooLarge = 413,

    HttpVersionNotSupported = 505,
}

impl ResponseStatusCode {
    pub fn code(&self) -> u16 {
        *self as u16
    }

    pub fn is_error(&self) -> bool {
        self.code() >= 400
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        format!("{} {}", self.code(), self).into_bytes()
    }
}

impl Display for ResponseStatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let string_value = match self {
            ResponseStatusCode::Ok => "OK",
            ResponseStatusCode::MovedPermanently => "Moved Permanently",
            ResponseStatusCode::BadRequest => "Bad Request",
            ResponseStatusCode::NotFound => "Not Found",
            ResponseStatusCode::MethodNotAllowed => "Method Not Allowed",
            ResponseStatusCode::PayloadTooLarge => "Payload Too Large",
            ResponseStatusCode::HttpVersionNotSupported => "HTTP Version Not Supported",
        };

        write!(f, "{}", string_value)
    }
}
