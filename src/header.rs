pub const CONTENT_LENGTH: &str = "Content-Length";
pub const COOKIE: &str = "Cookie";
pub const LOCATION: &str = "Location";

static HEADER_SEPARATOR: &str = ": ";

/// Splits a trimmed header line on the first `": "`. Lines without the
/// separator yield `None` and are dropped by the parser.
pub fn split_header_line(line: &str) -> Option<(&str, &str)> {
    line.split_once(HEADER_SEPARATOR)
}

pub fn parse_content_length(value: &str) -> Option<usize> {
    value.parse::<usize>().ok()
}
