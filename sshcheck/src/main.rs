//! Command-line entry point.
//!
//! ```bash
//! sshcheck --input-file ssh_nocheck.txt --output-file goods.txt
//! RUST_LOG=debug sshcheck -i hosts.txt -t 5 --host-key-policy accept-new
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use sshcheck::config::{DEFAULT_GEOIP_DB, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
use sshcheck::{CheckerConfig, HostKeyVerification};

/// Check SSH credentials from a list and keep the ones that log in.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Candidate list, one `<user> <password> <ip> <port>` per line
    #[arg(short, long, default_value = DEFAULT_INPUT_FILE)]
    input_file: PathBuf,

    /// Known-good list to append to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output_file: PathBuf,

    /// Connect + authenticate timeout per host, in seconds
    #[arg(short, long, default_value_t = 3)]
    timeout: u64,

    /// MaxMind country or city database
    #[arg(short, long, default_value = DEFAULT_GEOIP_DB)]
    geoip_db: PathBuf,

    /// Host key policy: disabled, accept-new or strict
    #[arg(long, default_value_t = HostKeyVerification::Disabled)]
    host_key_policy: HostKeyVerification,

    /// known_hosts file for accept-new and strict [default: ~/.ssh/known_hosts]
    #[arg(long)]
    known_hosts: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> CheckerConfig {
        CheckerConfig {
            input_file: self.input_file,
            output_file: self.output_file,
            timeout: Duration::from_secs(self.timeout),
            geoip_db: self.geoip_db,
            host_key_verification: self.host_key_policy,
            known_hosts_path: self.known_hosts,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config();

    match sshcheck::run(&config).await {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
