//! Host record parsing.
//!
//! Each input line carries one candidate as four tokens separated by single
//! spaces: `<user> <password> <ip> <port>`. Anything else is rejected as a
//! whole.

use std::fmt;

/// Number of tokens in a well-formed input line.
pub const FIELD_COUNT: usize = 4;

/// One candidate host with its credentials.
///
/// Every field keeps the exact token text from the input line so the output
/// can reproduce it verbatim. The password is held in plain memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    /// Login name.
    pub user: String,

    /// Plaintext password.
    pub password: String,

    /// IP literal or hostname.
    pub ip: String,

    /// Port token as written in the input.
    pub port: String,
}

/// Outcome of parsing a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// The line has exactly four tokens.
    Record(HostRecord),

    /// The line has the wrong shape.
    Invalid {
        /// How many tokens the line actually had.
        tokens: usize,
    },
}

impl ParsedLine {
    /// Returns the record if the line was valid.
    pub fn into_record(self) -> Option<HostRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Invalid { .. } => None,
        }
    }

    /// Check if the line was rejected.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }
}

/// Parse one raw input line.
///
/// Surrounding whitespace and line terminators are ignored. Inside the line
/// fields are split on single spaces, so doubled spaces or tabs break the
/// shape. No partial record is ever produced.
pub fn parse(line: &str) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Invalid { tokens: 0 };
    }

    let tokens: Vec<&str> = line.split(' ').collect();

    match tokens.as_slice() {
        [user, password, ip, port] if tokens.iter().all(|t| !t.is_empty()) => {
            ParsedLine::Record(HostRecord {
                user: (*user).to_string(),
                password: (*password).to_string(),
                ip: (*ip).to_string(),
                port: (*port).to_string(),
            })
        }
        other => ParsedLine::Invalid {
            tokens: other.len(),
        },
    }
}

impl fmt::Display for HostRecord {
    /// Writes the record without its password.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.user, self.ip, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let parsed = parse("alice secret 10.0.0.1 22");
        assert_eq!(
            parsed,
            ParsedLine::Record(HostRecord {
                user: "alice".into(),
                password: "secret".into(),
                ip: "10.0.0.1".into(),
                port: "22".into(),
            })
        );
    }

    #[test]
    fn test_parse_strips_line_terminators() {
        let record = parse("root toor example.org 2222\r\n").into_record().unwrap();
        assert_eq!(record.ip, "example.org");
        assert_eq!(record.port, "2222");
    }

    #[test]
    fn test_parse_keeps_tokens_verbatim() {
        let record = parse("Admin P@ss:W0rd! FE80::1 0022").into_record().unwrap();
        assert_eq!(record.user, "Admin");
        assert_eq!(record.password, "P@ss:W0rd!");
        assert_eq!(record.ip, "FE80::1");
        assert_eq!(record.port, "0022");
    }

    #[test]
    fn test_parse_too_few_tokens() {
        assert_eq!(
            parse("onlythreefields here badly"),
            ParsedLine::Invalid { tokens: 3 }
        );
    }

    #[test]
    fn test_parse_too_many_tokens() {
        assert_eq!(
            parse("alice secret 10.0.0.1 22 extra"),
            ParsedLine::Invalid { tokens: 5 }
        );
    }

    #[test]
    fn test_parse_rejects_double_space() {
        assert_eq!(
            parse("alice  secret 10.0.0.1 22"),
            ParsedLine::Invalid { tokens: 5 }
        );
    }

    #[test]
    fn test_parse_rejects_tab_separator() {
        assert_eq!(
            parse("alice\tsecret 10.0.0.1 22"),
            ParsedLine::Invalid { tokens: 3 }
        );
        assert!(parse("alice secret\t10.0.0.1 22").is_invalid());
    }

    #[test]
    fn test_parse_ignores_surrounding_whitespace() {
        let record = parse("  alice secret 10.0.0.1 22 \n").into_record().unwrap();
        assert_eq!(record.user, "alice");
        assert_eq!(record.port, "22");
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(parse("").is_invalid());
        assert!(parse("   \n").is_invalid());
    }

    #[test]
    fn test_parse_is_idempotent() {
        for line in ["bob wrongpass 10.0.0.1 22", "a b c", "", "w x y z q"] {
            assert_eq!(parse(line), parse(line));
        }
    }

    #[test]
    fn test_display_hides_password() {
        let record = parse("alice secret 10.0.0.1 22").into_record().unwrap();
        assert_eq!(record.to_string(), "alice@10.0.0.1:22");
    }
}
