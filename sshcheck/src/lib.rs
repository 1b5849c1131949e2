//! # sshcheck
//!
//! Batch SSH credential checker for auditing hosts you are authorized to
//! test.
//!
//! sshcheck reads `<user> <password> <ip> <port>` candidates from a text file,
//! tries to open an authenticated SSH session with each one, and appends the
//! ones that succeed to an output file together with their country and the
//! time at which they authenticated.
//!
//! ## Features
//!
//! - Async SSH connections via russh, with a bounded connect + auth timeout
//! - Explicit probe outcomes: success, auth failure, connection failure, timeout
//! - Country enrichment from a local MaxMind database, degrading to `Unknown`
//! - Configurable host key policy (disabled by default)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sshcheck::CheckerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sshcheck::Error> {
//!     let config = CheckerConfig {
//!         input_file: "hosts.txt".into(),
//!         ..Default::default()
//!     };
//!
//!     let summary = sshcheck::run(&config).await?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod files;
pub mod format;
pub mod geo;
pub mod probe;
pub mod record;
pub mod transport;

use std::time::Instant;

use log::info;

// Re-export main types for convenience
pub use batch::{BatchController, BatchCounters, Summary};
pub use config::CheckerConfig;
pub use error::{Error, Result};
pub use files::{InputFile, OutputFile, RecordSink};
pub use format::OutputRecord;
pub use geo::{GeoIpLocator, Location, Locator};
pub use probe::{ProbeResult, ProbeSettings, Prober, SshProber};
pub use record::{HostRecord, ParsedLine};
pub use transport::{HostKeyVerification, SshConfig};

/// Check every candidate in `config.input_file` and append the good ones to
/// `config.output_file`.
///
/// The input is read twice: once to count lines for progress, then again to
/// process them.
pub async fn run(config: &CheckerConfig) -> Result<Summary> {
    config.validate()?;

    let run_start = Instant::now();
    let prober = SshProber::new(config.probe_settings(), run_start);
    let locator = GeoIpLocator::open(&config.geoip_db);

    let input = InputFile::new(&config.input_file);
    info!("Counting hosts in file: {}", input.path().display());
    let expected = input.count_lines()?;
    info!(
        "Found {} hosts in list of file {}",
        expected,
        input.path().display()
    );

    if config.host_key_verification == HostKeyVerification::Disabled {
        info!("Host key verification is disabled, any host key will be accepted");
    }

    let mut output = OutputFile::open(&config.output_file)?;
    let mut controller = BatchController::new(prober, locator, config.timeout);
    controller.run(input.lines()?, expected, &mut output).await
}
