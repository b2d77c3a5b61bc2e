use crate::content::{render, resolve_status, serve_content};
use crate::request::{ParseError, Request};
use crate::server_config::Config;
use log::{debug, warn};
use std::io::{BufReader, Read, Write};
use std::net::TcpStream;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandleError {
    #[error("failed to parse request: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to read {}: {source}", path.display())]
    RouteFileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write response: {0}")]
    Write(std::io::Error),
}

/// Byte stream a connection is served over.
pub trait ReadWrite {
    fn as_read_mut(&mut self) -> &mut dyn Read;
    fn as_write_mut(&mut self) -> &mut dyn Write;
}

impl ReadWrite for TcpStream {
    fn as_read_mut(&mut self) -> &mut dyn Read {
        self
    }

    fn as_write_mut(&mut self) -> &mut dyn Write {
        self
    }
}

pub struct Connection<'a> {
    stream: &'a mut dyn ReadWrite,
    config: &'a Config,
}

impl<'a> Connection<'a> {
    pub fn new(stream: &'a mut dyn ReadWrite, config: &'a Config) -> Self {
        Connection { stream, config }
    }

    /// Serves one request. A parse error is returned unanswered under the
    /// fail-fast policy and answered with its status code otherwise.
    pub fn handle(&mut self) -> Result<(), HandleError> {
        let response = match self.read_request() {
            Ok(request) => {
                debug!("{request:?}");
                serve_content(self.config, &request)?
            }
            Err(err) if self.config.server.fail_fast => return Err(err.into()),
            Err(err) => {
                warn!("Rejecting request: {err}");
                render(resolve_status(self.config, err.status_code()))?
            }
        };

        let writer = self.stream.as_write_mut();
        writer
            .write_all(&response.as_bytes())
            .map_err(HandleError::Write)?;
        writer.flush().map_err(HandleError::Write)
    }

    fn read_request(&mut self) -> Result<Request, ParseError> {
        let body_limit = self.config.default_server.body_limit();
        let mut reader = BufReader::new(self.stream.as_read_mut());

        Request::parse(&mut reader, body_limit)
    }
}

#[cfg(test)]
mod test {
    use crate::connection::{Connection, HandleError};
    use crate::request::ParseError;
    use crate::server_config::{Config, ConfigBuilder, RouteConfig};
    use crate::test::asset_dir;
    use crate::test::mocks::MockReadWrite;

    fn site_config(fail_fast: bool) -> Config {
        let dir = asset_dir(&[
            ("index.html", "<h1>home</h1>"),
            ("404.html", "missing"),
            ("405.html", "nope"),
        ]);

        ConfigBuilder::new()
            .static_root(dir)
            .fail_fast(fail_fast)
            .error_page(405, "405.html")
            .client_body_limit(8)
            .route(
                "/",
                RouteConfig {
                    default_file: Some("index.html".into()),
                    ..Default::default()
                },
            )
            .get()
    }

    fn handle(config: &Config, raw: &[u8]) -> (Result<(), HandleError>, MockReadWrite) {
        let mut stream = MockReadWrite::new(raw);
        let result = Connection::new(&mut stream, config).handle();

        (result, stream)
    }

    #[test]
    fn serves_route_file() {
        let (result, stream) = handle(&site_config(true), b"GET / HTTP/1.1\r\n\r\n");

        assert!(result.is_ok());
        assert_eq!(
            stream.written(),
            "HTTP/1.1 200 OK\r\nContent-Length: 13\r\n\r\n<h1>home</h1>"
        );
    }

    #[test]
    fn unknown_path_serves_404_page() {
        let (result, stream) = handle(&site_config(true), b"GET /nope HTTP/1.1\r\n\r\n");

        assert!(result.is_ok());
        assert_eq!(
            stream.written(),
            "HTTP/1.1 404 Not Found\r\nContent-Length: 7\r\n\r\nmissing"
        );
    }

    #[test]
    fn missing_404_page_is_an_error() {
        let config = ConfigBuilder::new().static_root(asset_dir(&[])).get();

        let (result, stream) = handle(&config, b"GET /nope HTTP/1.1\r\n\r\n");

        assert!(matches!(result, Err(HandleError::RouteFileRead { .. })));
        assert!(stream.write_buf.is_empty());
    }

    #[test]
    fn fail_fast_leaves_bad_request_unanswered() {
        let (result, stream) = handle(&site_config(true), b"PUT / HTTP/1.1\r\n\r\n");

        assert!(matches!(
            result,
            Err(HandleError::Parse(ParseError::MethodNotAllowed(_)))
        ));
        assert!(stream.write_buf.is_empty());
    }

    #[test]
    fn isolated_bad_request_is_answered() {
        let config = site_config(false);

        let (result, stream) = handle(&config, b"PUT / HTTP/1.1\r\n\r\n");
        assert!(result.is_ok());
        assert_eq!(
            stream.written(),
            "HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 4\r\n\r\nnope"
        );

        let (result, stream) = handle(&config, b"GET / HTTP/1.0\r\n\r\n");
        assert!(result.is_ok());
        assert_eq!(
            stream.written(),
            "HTTP/1.1 505 HTTP Version Not Supported\r\nContent-Length: 0\r\n\r\n"
        );

        let (result, stream) = handle(&config, b"GET / HTTP/1.1\r\nHost: x");
        assert!(result.is_ok());
        assert!(stream.written().starts_with("HTTP/1.1 400 Bad Request\r\n"));
    }

    #[test]
    fn default_body_limit_applies_while_parsing() {
        let (result, _) = handle(
            &site_config(true),
            b"POST / HTTP/1.1\r\nContent-Length: 9\r\n\r\n123456789",
        );

        assert!(matches!(
            result,
            Err(HandleError::Parse(ParseError::BodyTooLarge { .. }))
        ));

        let (result, stream) = handle(
            &site_config(false),
            b"POST / HTTP/1.1\r\nContent-Length: 9\r\n\r\n123456789",
        );

        assert!(result.is_ok());
        assert!(stream.written().starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
    }
}
