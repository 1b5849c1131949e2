//! Run configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::probe::{DEFAULT_TIMEOUT, ProbeSettings};
use crate::transport::HostKeyVerification;

/// Default candidate list.
pub const DEFAULT_INPUT_FILE: &str = "ssh_nocheck.txt";

/// Default known-good list.
pub const DEFAULT_OUTPUT_FILE: &str = "goods.txt";

/// Default MaxMind country database.
pub const DEFAULT_GEOIP_DB: &str = "GeoLite2-Country.mmdb";

/// Everything a batch run needs.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Candidate list to read.
    pub input_file: PathBuf,

    /// Known-good list to append to.
    pub output_file: PathBuf,

    /// Bound on each probe.
    pub timeout: Duration,

    /// MaxMind database used for enrichment.
    pub geoip_db: PathBuf,

    /// Host key verification mode.
    pub host_key_verification: HostKeyVerification,

    /// known_hosts file for the non-disabled modes.
    pub known_hosts_path: Option<PathBuf>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            timeout: DEFAULT_TIMEOUT,
            geoip_db: PathBuf::from(DEFAULT_GEOIP_DB),
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }
}

impl CheckerConfig {
    /// Check values that the type system does not.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::Config {
                message: "timeout must be greater than zero".to_string(),
            });
        }
        if self.input_file == self.output_file {
            return Err(Error::Config {
                message: format!(
                    "input and output are the same file '{}'",
                    self.input_file.display()
                ),
            });
        }
        Ok(())
    }

    /// Host key settings for the prober.
    pub fn probe_settings(&self) -> ProbeSettings {
        ProbeSettings {
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckerConfig::default();
        assert_eq!(config.input_file, PathBuf::from("ssh_nocheck.txt"));
        assert_eq!(config.output_file, PathBuf::from("goods.txt"));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.host_key_verification, HostKeyVerification::Disabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = CheckerConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_same_input_and_output_rejected() {
        let config = CheckerConfig {
            output_file: PathBuf::from(DEFAULT_INPUT_FILE),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config { .. })));
    }
}
