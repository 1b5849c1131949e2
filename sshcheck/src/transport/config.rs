//! SSH connection configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::TransportError;
use crate::record::HostRecord;

/// Host key verification mode, analogous to OpenSSH's `StrictHostKeyChecking`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostKeyVerification {
    /// Reject unknown and changed keys. Connection fails if the host
    /// is not already in known_hosts.
    Strict,

    /// Accept and auto-learn unknown keys, but reject changed keys.
    AcceptNew,

    /// Accept all keys without checking or recording them.
    ///
    /// This is the default so that checking a list does not depend on
    /// local known_hosts state. It is insecure.
    #[default]
    Disabled,
}

impl FromStr for HostKeyVerification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "accept-new" => Ok(Self::AcceptNew),
            "disabled" => Ok(Self::Disabled),
            other => Err(format!(
                "unknown host key policy '{other}' (expected strict, accept-new or disabled)"
            )),
        }
    }
}

impl fmt::Display for HostKeyVerification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Strict => "strict",
            Self::AcceptNew => "accept-new",
            Self::Disabled => "disabled",
        })
    }
}

/// SSH connection configuration for a single probe.
#[derive(Debug)]
pub struct SshConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    /// SSH port.
    pub port: u16,

    /// Username for authentication.
    pub username: String,

    /// Authentication method.
    pub auth: AuthMethod,

    /// Bound on connect, handshake and authentication together.
    pub timeout: Duration,

    /// Host key verification mode.
    pub host_key_verification: HostKeyVerification,

    /// Path to known_hosts file. `None` uses `~/.ssh/known_hosts`.
    pub known_hosts_path: Option<PathBuf>,
}

impl SshConfig {
    /// Build a password-auth config from a parsed record.
    ///
    /// Fails with [`TransportError::InvalidPort`] if the port token is not a
    /// number in `0..=65535`.
    pub fn from_record(
        record: &HostRecord,
        timeout: Duration,
        host_key_verification: HostKeyVerification,
        known_hosts_path: Option<PathBuf>,
    ) -> Result<Self, TransportError> {
        let port = record
            .port
            .parse::<u16>()
            .map_err(|_| TransportError::InvalidPort {
                port: record.port.clone(),
            })?;

        Ok(Self {
            host: record.ip.clone(),
            port,
            username: record.user.clone(),
            auth: AuthMethod::Password(SecretString::from(record.password.clone())),
            timeout,
            host_key_verification,
            known_hosts_path,
        })
    }

    /// Get the socket address for connection.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Authentication method for SSH connections.
#[derive(Debug)]
pub enum AuthMethod {
    /// Password authentication.
    Password(SecretString),
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn record(port: &str) -> HostRecord {
        HostRecord {
            user: "alice".into(),
            password: "secret".into(),
            ip: "10.0.0.1".into(),
            port: port.into(),
        }
    }

    #[test]
    fn test_from_record() {
        let config = SshConfig::from_record(
            &record("2222"),
            Duration::from_secs(3),
            HostKeyVerification::Disabled,
            None,
        )
        .unwrap();

        assert_eq!(config.socket_addr(), "10.0.0.1:2222");
        assert_eq!(config.username, "alice");
        match config.auth {
            AuthMethod::Password(ref password) => assert_eq!(password.expose_secret(), "secret"),
        }
    }

    #[test]
    fn test_from_record_rejects_bad_port() {
        for port in ["ssh", "65536", "-1", ""] {
            let err = SshConfig::from_record(
                &record(port),
                Duration::from_secs(3),
                HostKeyVerification::Disabled,
                None,
            )
            .unwrap_err();
            assert!(matches!(err, TransportError::InvalidPort { .. }));
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = SshConfig::from_record(
            &record("22"),
            Duration::from_secs(3),
            HostKeyVerification::Disabled,
            None,
        )
        .unwrap();
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn test_host_key_policy_parse() {
        assert_eq!("strict".parse(), Ok(HostKeyVerification::Strict));
        assert_eq!("accept-new".parse(), Ok(HostKeyVerification::AcceptNew));
        assert_eq!("disabled".parse(), Ok(HostKeyVerification::Disabled));
        assert!("yes".parse::<HostKeyVerification>().is_err());
        assert_eq!(HostKeyVerification::default(), HostKeyVerification::Disabled);
    }
}
