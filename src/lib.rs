mod header;

pub mod connection;
pub mod content;
pub mod http_version;
pub mod port;
pub mod request;
pub mod request_method;
pub mod response;
pub mod response_status_code;
pub mod server;
pub mod server_config;

#[cfg(test)]
mod test;
