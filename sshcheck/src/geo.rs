//! IP geolocation against a local MaxMind database.
//!
//! Enrichment is best effort: every failure degrades to
//! [`Location::Unknown`] and never affects whether a host counts as good.

use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;
use std::path::Path;

use log::{debug, warn};
use maxminddb::{Reader, geoip2};

/// Placeholder written when no country could be determined.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Where a host is, as far as the database knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Country name (or ISO code when the database has no English name).
    Country(String),

    /// Lookup failed or the database is unavailable.
    Unknown,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Country(name) => f.write_str(name),
            Self::Unknown => f.write_str(UNKNOWN_LOCATION),
        }
    }
}

/// Something that maps an address to a location.
pub trait Locator {
    /// Look up `ip`. Never fails; unknown addresses give [`Location::Unknown`].
    fn locate(&self, ip: &str) -> Location;
}

/// Locator backed by a GeoLite2/GeoIP2 Country or City database.
pub struct GeoIpLocator {
    reader: Option<Reader<Vec<u8>>>,
}

impl GeoIpLocator {
    /// Open the database at `path`.
    ///
    /// A missing or unreadable database is logged once and every later
    /// lookup returns [`Location::Unknown`].
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Reader::open_readfile(path) {
            Ok(reader) => Self {
                reader: Some(reader),
            },
            Err(e) => {
                warn!(
                    "GeoIP database '{}' unavailable, locations will be '{}': {}",
                    path.display(),
                    UNKNOWN_LOCATION,
                    e
                );
                Self::unavailable()
            }
        }
    }

    /// A locator with no database; every lookup is unknown.
    pub fn unavailable() -> Self {
        Self { reader: None }
    }

    /// Check if a database was loaded.
    pub fn is_available(&self) -> bool {
        self.reader.is_some()
    }
}

impl Locator for GeoIpLocator {
    fn locate(&self, ip: &str) -> Location {
        let Some(reader) = &self.reader else {
            return Location::Unknown;
        };

        let Ok(addr) = ip.parse::<IpAddr>() else {
            debug!("'{}' is not an IP literal, skipping geolocation", ip);
            return Location::Unknown;
        };

        match reader.lookup::<geoip2::Country>(addr) {
            Ok(record) => country_name(&record).map_or(Location::Unknown, Location::Country),
            Err(e) => {
                debug!("GeoIP lookup for {} failed: {}", addr, e);
                Location::Unknown
            }
        }
    }
}

fn country_name(record: &geoip2::Country<'_>) -> Option<String> {
    let country = record.country.as_ref()?;
    pick_name(country.names.as_ref(), country.iso_code)
}

/// English name if present, ISO code otherwise.
fn pick_name(names: Option<&BTreeMap<&str, &str>>, iso_code: Option<&str>) -> Option<String> {
    names
        .and_then(|names| names.get("en").copied())
        .or(iso_code)
        .map(str::to_string)
}
