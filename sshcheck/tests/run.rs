//! End-to-end runs against local files and closed ports.

use std::fs;
use std::time::Duration;

use sshcheck::{CheckerConfig, Error};
use tokio::net::TcpListener;

async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn config_in(dir: &tempfile::TempDir) -> CheckerConfig {
    CheckerConfig {
        input_file: dir.path().join("ssh_nocheck.txt"),
        output_file: dir.path().join("goods.txt"),
        geoip_db: dir.path().join("missing.mmdb"),
        timeout: Duration::from_secs(1),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_unreachable_and_malformed_are_all_bad() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let port = closed_port().await;

    fs::write(
        &config.input_file,
        format!(
            "alice secret 127.0.0.1 {port}\n\
             onlythreefields here badly\n\
             bob pass 127.0.0.1 not-a-port\n\
             \n"
        ),
    )
    .unwrap();

    let summary = sshcheck::run(&config).await.unwrap();

    assert_eq!(summary.total_hosts, 4);
    assert_eq!(summary.bad_host_count, 4);
    assert_eq!(summary.good_host_count, 0);
    assert_eq!(fs::read_to_string(&config.output_file).unwrap(), "");
}

#[tokio::test]
async fn test_existing_output_is_not_truncated() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    fs::write(&config.input_file, "broken\n").unwrap();
    fs::write(&config.output_file, "root toor 10.0.0.9 22 Spain 0.42\n").unwrap();

    let summary = sshcheck::run(&config).await.unwrap();

    assert_eq!(summary.bad_host_count, 1);
    assert_eq!(
        fs::read_to_string(&config.output_file).unwrap(),
        "root toor 10.0.0.9 22 Spain 0.42\n"
    );
}

#[tokio::test]
async fn test_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    let err = sshcheck::run(&config).await.unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(!config.output_file.exists());
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = CheckerConfig {
        timeout: Duration::ZERO,
        ..config_in(&dir)
    };

    let err = sshcheck::run(&config).await.unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}
