use rand::distributions::Alphanumeric;
use rand::Rng;
use static_http::server::{Server, ServerError};
use static_http::server_config::Config;
use std::fs;
use std::io::{Read, Result, Write};
use std::net::TcpStream;
use std::path::PathBuf;
use std::thread::JoinHandle;
use std::time::Duration;

pub fn asset_dir(files: &[(&str, &str)]) -> PathBuf {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect();
    let dir = std::env::temp_dir().join(format!("static_http_it_{suffix}"));
    fs::create_dir_all(&dir).unwrap();

    for (name, contents) in files {
        fs::write(dir.join(name), contents).unwrap();
    }

    dir
}

/// Binds `config` and runs its accept loop on a separate thread.
pub fn spawn_server(config: Config) -> (u16, JoinHandle<std::result::Result<(), ServerError>>) {
    let server = Server::new(config);
    let bound = server.bind().expect("Server binds");
    let port = bound.port;

    let handle = std::thread::spawn(move || server.serve(bound));

    (port, handle)
}

/// Writes `request` and reads until the server closes the connection.
pub fn issue_request(port: u16, request: &[u8]) -> Result<Vec<u8>> {
    let mut tcp = TcpStream::connect(("127.0.0.1", port))?;
    tcp.set_read_timeout(Some(Duration::from_secs(5)))?;

    tcp.write_all(request)?;

    let mut response_bytes: Vec<u8> = vec![];
    tcp.read_to_end(&mut response_bytes)?;

    Ok(response_bytes)
}

pub fn issue_str_request(port: u16, request: &str) -> Result<String> {
    let bytes = issue_request(port, request.as_bytes())?;

    Ok(String::from_utf8(bytes).unwrap())
}
