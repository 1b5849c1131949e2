//! Error types for sshcheck.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for sshcheck operations.
///
/// Only these ever stop a run. Transport errors are classified into a
/// [`ProbeResult`](crate::probe::ProbeResult) by the prober and never reach
/// the batch controller.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the input file or writing the output file failed
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Transport layer errors (TCP connection, SSH handshake, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to open the TCP connection (refused, unreachable, DNS)
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// The port token is not a valid TCP port
    #[error("Invalid port '{port}'")]
    InvalidPort { port: String },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// Host is not present in known_hosts (strict mode)
    #[error("Host key for {host}:{port} is not in known_hosts")]
    HostKeyUnknown { host: String, port: u16 },

    /// Host key differs from the one recorded in known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type alias using sshcheck's Error.
pub type Result<T> = std::result::Result<T, Error>;
