//! Batch controller.
//!
//! Drives the per-record pipeline strictly sequentially:
//!
//! 1. Decode and parse the line; an undecodable or invalid line is bad.
//! 2. Probe the record; anything but success is bad.
//! 3. Locate, format and append the record; it is good.
//!
//! Record-level failures never stop the batch. Only I/O errors on the input
//! or output propagate.

use std::fmt;
use std::time::Duration;

use log::{debug, info};

use crate::error::Result;
use crate::files::RecordSink;
use crate::format::format;
use crate::geo::Locator;
use crate::probe::{ProbeResult, Prober};
use crate::record::{self, ParsedLine};

/// Running totals for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounters {
    /// Lines seen.
    pub total_hosts: usize,

    /// Malformed lines and failed probes.
    pub bad_host_count: usize,

    /// Records probed successfully and written.
    pub good_host_count: usize,
}

impl BatchCounters {
    fn record_bad(&mut self) {
        self.bad_host_count += 1;
    }

    fn record_good(&mut self) {
        self.good_host_count += 1;
    }

    /// Check that every line seen has been classified exactly once.
    pub fn is_consistent(&self) -> bool {
        self.total_hosts == self.bad_host_count + self.good_host_count
    }
}

/// Final counts of a finished run.
pub type Summary = BatchCounters;

impl fmt::Display for BatchCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Filtered: {} bad hosts.", self.bad_host_count)?;
        write!(f, "Passed the test: {} hosts", self.good_host_count)
    }
}

/// Runs the validation pipeline over a list of candidate lines.
pub struct BatchController<P, L> {
    prober: P,
    locator: L,
    timeout: Duration,
    counters: BatchCounters,
}

impl<P: Prober, L: Locator> BatchController<P, L> {
    /// Create a controller that probes with `prober` and enriches with
    /// `locator`, bounding each probe by `timeout`.
    pub fn new(prober: P, locator: L, timeout: Duration) -> Self {
        Self {
            prober,
            locator,
            timeout,
            counters: BatchCounters::default(),
        }
    }

    /// Get the counters so far.
    pub fn counters(&self) -> BatchCounters {
        self.counters
    }

    /// Process every raw line of `lines` in order, appending good hosts to
    /// `sink`.
    ///
    /// `expected` is the line count from a prior pass, used for progress
    /// reporting only. The first I/O error from `lines` or `sink` is returned
    /// immediately.
    pub async fn run<I, S>(&mut self, lines: I, expected: usize, sink: &mut S) -> Result<Summary>
    where
        I: IntoIterator<Item = Result<Vec<u8>>>,
        S: RecordSink,
    {
        for line in lines {
            let line = line?;
            self.counters.total_hosts += 1;
            let line_no = self.counters.total_hosts;
            info!("handling line# {}", line_no);

            let Ok(line) = std::str::from_utf8(&line) else {
                info!("line# {}: not valid UTF-8", line_no);
                self.counters.record_bad();
                continue;
            };

            let record = match record::parse(line) {
                ParsedLine::Record(record) => record,
                ParsedLine::Invalid { tokens } => {
                    info!(
                        "line# {}: no valid data ({} fields, expected {})",
                        line_no,
                        tokens,
                        record::FIELD_COUNT
                    );
                    self.counters.record_bad();
                    continue;
                }
            };

            info!("Trying to connect to {}", record.ip);
            let elapsed = match self.prober.probe(&record, self.timeout).await {
                ProbeResult::Success { elapsed } => elapsed,
                ProbeResult::AuthFailure => {
                    info!("Authentication failed when connecting to {}", record.ip);
                    self.counters.record_bad();
                    continue;
                }
                ProbeResult::ConnectionFailure => {
                    info!("Could not connect to {}", record.ip);
                    self.counters.record_bad();
                    continue;
                }
                ProbeResult::Timeout => {
                    info!("Timed out connecting to {}", record.ip);
                    self.counters.record_bad();
                    continue;
                }
            };

            info!(
                "Connected to host {}, access time {:.2} seconds",
                record.ip,
                elapsed.as_secs_f64()
            );

            let location = self.locator.locate(&record.ip);
            debug!("{} located in {}", record.ip, location);

            sink.append(&format(&record, &location, elapsed))?;
            self.counters.record_good();
            info!(
                "recorded line# {} of {}",
                self.counters.good_host_count, expected
            );
        }

        Ok(self.counters)
    }
}
