use clap::Parser;
use log::{error, LevelFilter};
use static_http::server::Server;
use static_http::server_config::Config;
use std::path::PathBuf;
use std::process::ExitCode;

/// Serves static files over HTTP/1.1, one connection at a time.
#[derive(Debug, Parser)]
#[command(name = "static_http", version)]
struct Args {
    /// JSON configuration file
    #[arg(short, long, default_value = "config.json", env = "STATIC_HTTP_CONFIG")]
    config: PathBuf,
}

fn main() -> ExitCode {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match Server::new(config).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
