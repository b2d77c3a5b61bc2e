use crate::header::{CONTENT_LENGTH, LOCATION};
use crate::http_version::HttpVersion;
use crate::response_status_code::ResponseStatusCode;

const SPACE: u8 = b' ';
static CRLF: [u8; 2] = [b'\r', b'\n'];

/// A response as it goes on the wire. Headers keep insertion order and
/// `Content-Length` is always emitted last, computed from the body.
#[derive(Debug)]
pub struct Response {
    version: HttpVersion,
    status_code: ResponseStatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    pub fn version(&self) -> &HttpVersion {
        &self.version
    }

    pub fn status_code(&self) -> &ResponseStatusCode {
        &self.status_code
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, header_name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name == header_name)
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = vec![];

        bytes.extend_from_slice(self.version.as_bytes());
        bytes.push(SPACE);
        bytes.append(&mut self.status_code.as_bytes());
        bytes.extend_from_slice(&CRLF);

        for (header_name, header_value) in self.headers.iter() {
            bytes.extend_from_slice(header_name.as_bytes());
            bytes.push(b':');
            bytes.push(SPACE);
            bytes.extend_from_slice(header_value.as_bytes());
            bytes.extend_from_slice(&CRLF);
        }

        bytes.extend_from_slice(&CRLF);
        bytes.extend_from_slice(&self.body);

        bytes
    }

    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::new()
    }
}

#[derive(Debug)]
pub struct ResponseBuilder {
    response: Response,
}

#[allow(clippy::new_without_default)]
impl ResponseBuilder {
    pub fn new() -> Self {
        ResponseBuilder {
            response: Response {
                version: HttpVersion::Http1_1,
                status_code: ResponseStatusCode::Ok,
                headers: vec![],
                body: vec![],
            },
        }
    }

    pub fn status_code(mut self, status_code: ResponseStatusCode) -> Self {
        self.response.status_code = status_code;

        self
    }

    pub fn header(mut self, header_name: &str, header_value: &str) -> Self {
        self.response
            .headers
            .retain(|(name, _)| name != header_name);
        self.response
            .headers
            .push((String::from(header_name), String::from(header_value)));

        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.response.body = body;

        self
    }

    pub fn get(self) -> Response {
        let len = self.response.body.len();

        self.header(CONTENT_LENGTH, &len.to_string()).response
    }

    pub fn redirect(location: &str) -> Response {
        ResponseBuilder::new()
            .status_code(ResponseStatusCode::MovedPermanently)
            .header(LOCATION, location)
            .get()
    }
}
