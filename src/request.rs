use crate::header::{parse_content_length, split_header_line, CONTENT_LENGTH, COOKIE};
use crate::http_version::HttpVersion;
use crate::request_method::RequestMethod;
use crate::response_status_code::ResponseStatusCode;
use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Read};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("failed to read a valid HTTP request line")]
    MalformedRequestLine,
    #[error("method \"{0}\" is not allowed")]
    MethodNotAllowed(String),
    #[error("path \"{0}\" does not start with '/'")]
    NotFound(String),
    #[error("HTTP version \"{0}\" is not supported")]
    VersionNotSupported(String),
    #[error("failed to read header lines")]
    MalformedHeaders,
    #[error("invalid Content-Length value \"{0}\"")]
    InvalidContentLength(String),
    #[error("body of {length} bytes exceeds the limit of {limit} bytes")]
    BodyTooLarge { length: usize, limit: usize },
    #[error("failed to read {0} body bytes")]
    BodyReadFailure(usize),
}

impl ParseError {
    /// Status a client would receive for this error when it is answered.
    pub fn status_code(&self) -> ResponseStatusCode {
        match self {
            ParseError::MethodNotAllowed(_) => ResponseStatusCode::MethodNotAllowed,
            ParseError::NotFound(_) => ResponseStatusCode::NotFound,
            ParseError::VersionNotSupported(_) => ResponseStatusCode::HttpVersionNotSupported,
            ParseError::BodyTooLarge { .. } => ResponseStatusCode::PayloadTooLarge,
            ParseError::MalformedRequestLine
            | ParseError::MalformedHeaders
            | ParseError::InvalidContentLength(_)
            | ParseError::BodyReadFailure(_) => ResponseStatusCode::BadRequest,
        }
    }
}

type Result<T> = std::result::Result<T, ParseError>;

pub struct Request {
    pub method: RequestMethod,
    pub path: String,
    pub version: HttpVersion,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub content_length: Option<usize>,
}

impl Request {
    /// Reads exactly one request from `reader`: the request line, the header
    /// block and, when `Content-Length` is present, that many body bytes.
    /// Nothing past the declared body is consumed.
    pub fn parse(reader: &mut impl BufRead, body_limit: Option<usize>) -> Result<Request> {
        let (method, path, version) = parse_request_line(reader)?;
        let headers = parse_headers(reader)?;

        let content_length = match headers.get(CONTENT_LENGTH) {
            Some(value) => Some(
                parse_content_length(value)
                    .ok_or_else(|| ParseError::InvalidContentLength(value.clone()))?,
            ),
            None => None,
        };

        let body = match content_length {
            Some(length) => read_body(reader, length, body_limit)?,
            None => vec![],
        };

        Ok(Request {
            method,
            path,
            version,
            headers,
            body,
            content_length,
        })
    }

    pub fn header(&self, header_name: &str) -> Option<&str> {
        self.headers.get(header_name).map(String::as_str)
    }

    pub fn cookies(&self) -> Option<HashMap<String, String>> {
        let cookie_header = self.header(COOKIE)?;

        Some(
            cookie_header
                .split(';')
                .filter_map(|cookie| cookie.split_once('='))
                .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
                .collect(),
        )
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .field("body", &format!("{} bytes", self.body.len()))
            .finish()
    }
}

/// Reads one `\n` terminated line and trims surrounding whitespace. `None`
/// covers read errors, EOF before the terminator and invalid UTF-8.
fn read_trimmed_line(reader: &mut impl BufRead) -> Option<String> {
    let mut line: Vec<u8> = vec![];

    match reader.read_until(b'\n', &mut line) {
        Ok(_) if line.last() == Some(&b'\n') => {}
        _ => return None,
    }

    String::from_utf8(line)
        .ok()
        .map(|line| line.trim().to_string())
}

fn parse_request_line(reader: &mut impl BufRead) -> Result<(RequestMethod, String, HttpVersion)> {
    let line = read_trimmed_line(reader).ok_or(ParseError::MalformedRequestLine)?;

    let parts = line.split(' ').collect::<Vec<&str>>();
    let [method, path, version] = parts[..] else {
        return Err(ParseError::MalformedRequestLine);
    };

    let method = RequestMethod::from_str(method)
        .map_err(|_| ParseError::MethodNotAllowed(method.to_string()))?;

    if !path.starts_with('/') {
        return Err(ParseError::NotFound(path.to_string()));
    }

    match HttpVersion::from_str(version) {
        Ok(HttpVersion::Http1_1) => Ok((method, path.to_string(), HttpVersion::Http1_1)),
        _ => Err(ParseError::VersionNotSupported(version.to_string())),
    }
}

fn parse_headers(reader: &mut impl BufRead) -> Result<HashMap<String, String>> {
    let mut headers: HashMap<String, String> = HashMap::new();

    loop {
        let line = read_trimmed_line(reader).ok_or(ParseError::MalformedHeaders)?;

        if line.is_empty() {
            return Ok(headers);
        }

        if let Some((name, value)) = split_header_line(&line) {
            headers.insert(name.to_string(), value.to_string());
        }
    }
}

fn read_body(reader: &mut impl BufRead, length: usize, limit: Option<usize>) -> Result<Vec<u8>> {
    if let Some(limit) = limit {
        if length > limit {
            return Err(ParseError::BodyTooLarge { length, limit });
        }
    }

    // take() keeps a bogus huge length from turning into a huge allocation
    let mut body: Vec<u8> = vec![];
    reader
        .take(length as u64)
        .read_to_end(&mut body)
        .map_err(|_| ParseError::BodyReadFailure(length))?;

    if body.len() != length {
        return Err(ParseError::BodyReadFailure(length));
    }

    Ok(body)
}

pub fn parse_request(bytes: &[u8]) -> Result<Request> {
    let mut reader = bytes;

    Request::parse(&mut reader, None)
}
