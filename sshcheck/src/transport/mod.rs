//! SSH transport layer wrapping russh.
//!
//! This module provides the low-level SSH connection management:
//! TCP dial, handshake with a configurable host key policy, and
//! password authentication.

pub mod config;
mod ssh;

pub use config::{AuthMethod, HostKeyVerification, SshConfig};
pub use ssh::SshTransport;
