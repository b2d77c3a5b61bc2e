use crate::connection::{Connection, HandleError};
use crate::port::{acquire_tcp, AcquireError, BoundListener};
use crate::server_config::Config;
use log::{debug, error, info, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),
    #[error("error accepting connection: {0}")]
    Accept(std::io::Error),
    #[error("error handling connection: {0}")]
    Connection(HandleError),
}

pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Server { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bind(&self) -> Result<BoundListener, ServerError> {
        let server = &self.config.server;

        Ok(acquire_tcp(server.bind_host(), &server.ports)?)
    }

    pub fn run(&self) -> Result<(), ServerError> {
        let bound = self.bind()?;

        info!(
            "Server \"{}\" bound to {}:{}",
            self.config.default_server.server_name, bound.host, bound.port
        );
        println!("You can access the server at http://{}:{}/", bound.host, bound.port);

        self.serve(bound)
    }

    /// Accepts and fully handles one connection at a time. Returns only when
    /// the loop is ended by an error.
    pub fn serve(&self, bound: BoundListener) -> Result<(), ServerError> {
        for stream in bound.listener.incoming() {
            let mut stream = match stream {
                Ok(stream) => stream,
                Err(err) => {
                    error!("error accepting connection: {err}");
                    return Err(ServerError::Accept(err));
                }
            };

            if let Ok(peer) = stream.peer_addr() {
                debug!("Accepted connection from {peer}");
            }

            if let Err(err) = Connection::new(&mut stream, &self.config).handle() {
                if self.config.server.fail_fast {
                    error!("error handling connection: {err}");
                    return Err(ServerError::Connection(err));
                }

                warn!("error handling connection: {err}");
            }
        }

        Ok(())
    }
}
