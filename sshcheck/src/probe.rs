//! Connectivity probing.
//!
//! A probe is one connect + authenticate attempt against a record. The
//! outcome is always a [`ProbeResult`]; probing never returns an error and
//! never retries.

use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::debug;

use crate::error::TransportError;
use crate::record::HostRecord;
use crate::transport::{HostKeyVerification, SshConfig, SshTransport};

/// Default bound on a single probe.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Outcome of probing one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    /// Transport and authentication succeeded.
    Success {
        /// Time from the start of the batch run to successful authentication.
        elapsed: Duration,
    },

    /// The transport came up but the credentials were rejected.
    AuthFailure,

    /// The transport could not be established.
    ConnectionFailure,

    /// Connect + authenticate did not finish within the timeout.
    Timeout,
}

impl ProbeResult {
    /// Check if the probe succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Map a transport error onto its probe outcome.
    pub fn from_error(error: &TransportError) -> Self {
        match error {
            TransportError::AuthenticationFailed { .. } => Self::AuthFailure,
            TransportError::Timeout(_) => Self::Timeout,
            TransportError::ConnectionFailed { .. }
            | TransportError::InvalidPort { .. }
            | TransportError::Ssh(_)
            | TransportError::HostKeyUnknown { .. }
            | TransportError::HostKeyChanged { .. }
            | TransportError::KnownHosts(_) => Self::ConnectionFailure,
        }
    }
}

/// Something that can check a record's credentials.
pub trait Prober {
    /// Attempt to authenticate against `record` within `timeout`.
    fn probe(
        &self,
        record: &HostRecord,
        timeout: Duration,
    ) -> impl Future<Output = ProbeResult> + Send;
}

/// Host key settings shared by every probe of a run.
#[derive(Debug, Clone, Default)]
pub struct ProbeSettings {
    /// Host key verification mode.
    pub host_key_verification: HostKeyVerification,

    /// known_hosts file for the non-disabled modes.
    pub known_hosts_path: Option<PathBuf>,
}

/// Prober that opens a real SSH session with password authentication.
#[derive(Debug, Clone)]
pub struct SshProber {
    settings: ProbeSettings,
    run_start: Instant,
}

impl SshProber {
    /// Create a prober whose elapsed times are measured from `run_start`.
    pub fn new(settings: ProbeSettings, run_start: Instant) -> Self {
        Self {
            settings,
            run_start,
        }
    }

    async fn attempt(
        &self,
        record: &HostRecord,
        timeout: Duration,
    ) -> Result<Duration, TransportError> {
        let config = SshConfig::from_record(
            record,
            timeout,
            self.settings.host_key_verification,
            self.settings.known_hosts_path.clone(),
        )?;

        let transport = SshTransport::connect(&config).await?;
        let elapsed = self.run_start.elapsed();

        match tokio::time::timeout(timeout, transport.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!("Disconnect from {} failed: {}", config.socket_addr(), e),
            Err(_) => debug!("Disconnect from {} timed out", config.socket_addr()),
        }

        Ok(elapsed)
    }
}

impl Prober for SshProber {
    async fn probe(&self, record: &HostRecord, timeout: Duration) -> ProbeResult {
        match self.attempt(record, timeout).await {
            Ok(elapsed) => ProbeResult::Success { elapsed },
            Err(e) => {
                debug!("Probe of {} failed: {}", record, e);
                ProbeResult::from_error(&e)
            }
        }
    }
}
