//! Output line formatting for good hosts.

use std::fmt;
use std::time::Duration;

use crate::geo::Location;
use crate::record::HostRecord;

/// One line of the output file.
///
/// Layout: `<user> <password> <ip> <port> <location> <elapsed>\n`, with the
/// four record tokens copied verbatim and elapsed seconds to two decimals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    line: String,
}

impl OutputRecord {
    /// Get the full line, including the trailing newline.
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// Get the line as bytes for writing.
    pub fn as_bytes(&self) -> &[u8] {
        self.line.as_bytes()
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Build the output line for a successfully probed record.
pub fn format(record: &HostRecord, location: &Location, elapsed: Duration) -> OutputRecord {
    OutputRecord {
        line: format!(
            "{} {} {} {} {} {:.2}\n",
            record.user,
            record.password,
            record.ip,
            record.port,
            location,
            elapsed.as_secs_f64()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> HostRecord {
        HostRecord {
            user: "alice".into(),
            password: "secret".into(),
            ip: "10.0.0.1".into(),
            port: "22".into(),
        }
    }

    #[test]
    fn test_format_line() {
        let out = format(
            &record(),
            &Location::Country("Netherlands".into()),
            Duration::from_millis(1234),
        );
        assert_eq!(out.as_str(), "alice secret 10.0.0.1 22 Netherlands 1.23\n");
    }

    #[test]
    fn test_format_unknown_location() {
        let out = format(&record(), &Location::Unknown, Duration::from_secs(7));
        assert_eq!(out.as_str(), "alice secret 10.0.0.1 22 Unknown 7.00\n");
    }

    #[test]
    fn test_format_rounds_to_two_decimals() {
        let out = format(&record(), &Location::Unknown, Duration::from_micros(2_999_999));
        assert!(out.as_str().ends_with(" 3.00\n"));

        let out = format(&record(), &Location::Unknown, Duration::from_millis(61_876));
        assert!(out.as_str().ends_with(" 61.88\n"));
    }

    #[test]
    fn test_format_preserves_tokens() {
        let record = HostRecord {
            user: "ROOT".into(),
            password: "Pa$$:w0rd".into(),
            ip: "2001:DB8::1".into(),
            port: "0022".into(),
        };
        let out = format(&record, &Location::Unknown, Duration::ZERO);
        assert_eq!(out.to_string(), "ROOT Pa$$:w0rd 2001:DB8::1 0022 Unknown 0.00\n");
    }
}
