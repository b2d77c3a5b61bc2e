use log::{info, warn};
use std::io;
use std::net::TcpListener;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
/// Highest port the fallback scan will try.
pub const PORT_CEILING: u16 = 9999;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AcquireError {
    #[error("no available ports to bind to on {host} (scanned {start}..={ceiling})")]
    NoAvailablePorts {
        host: String,
        start: u32,
        ceiling: u16,
    },
}

/// Binds a listener for `host:port`. Implemented over `TcpListener` for the
/// server and over an in-memory port table in tests.
pub trait PortBinder {
    type Listener;

    fn bind(&mut self, host: &str, port: u16) -> io::Result<Self::Listener>;

    /// Port the listener actually holds. Differs from the requested port
    /// only when port 0 asked the system to choose.
    fn local_port(&self, _listener: &Self::Listener, requested: u16) -> u16 {
        requested
    }
}

pub struct TcpBinder;

impl PortBinder for TcpBinder {
    type Listener = TcpListener;

    fn bind(&mut self, host: &str, port: u16) -> io::Result<TcpListener> {
        TcpListener::bind((host, port))
    }

    fn local_port(&self, listener: &TcpListener, requested: u16) -> u16 {
        listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or(requested)
    }
}

#[derive(Debug)]
pub struct Bound<L> {
    pub listener: L,
    pub host: String,
    pub port: u16,
}

pub type BoundListener = Bound<TcpListener>;

/// Tries every preferred port in order, then scans upward from the smallest
/// preferred port + 1 until a bind succeeds or the scan passes
/// [`PORT_CEILING`]. An empty preference list means [`DEFAULT_PORT`].
pub fn acquire<B: PortBinder>(
    binder: &mut B,
    host: &str,
    preferred: &[u16],
) -> Result<Bound<B::Listener>, AcquireError> {
    let default_ports = [DEFAULT_PORT];
    let preferred = if preferred.is_empty() {
        &default_ports[..]
    } else {
        preferred
    };

    for &port in preferred {
        if let Some(bound) = try_bind(binder, host, port) {
            return Ok(bound);
        }
    }

    // u32 so that a minimum of 65535 does not overflow
    let start = preferred.iter().min().map_or(DEFAULT_PORT, |port| *port) as u32 + 1;
    info!("All preferred ports are taken, scanning from {start} to {PORT_CEILING}");

    for port in start..=PORT_CEILING as u32 {
        if let Some(bound) = try_bind(binder, host, port as u16) {
            return Ok(bound);
        }
    }

    Err(AcquireError::NoAvailablePorts {
        host: host.to_string(),
        start,
        ceiling: PORT_CEILING,
    })
}

pub fn acquire_tcp(host: &str, preferred: &[u16]) -> Result<BoundListener, AcquireError> {
    acquire(&mut TcpBinder, host, preferred)
}

fn try_bind<B: PortBinder>(binder: &mut B, host: &str, port: u16) -> Option<Bound<B::Listener>> {
    match binder.bind(host, port) {
        Ok(listener) => {
            let port = binder.local_port(&listener, port);

            Some(Bound {
                listener,
                host: host.to_string(),
                port,
            })
        }
        Err(err) => {
            warn!("Could not bind {host}:{port}: {err}");
            None
        }
    }
}
