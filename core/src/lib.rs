//! Core types shared by the insights store, tool layer and CLI.

mod outcome;

pub use outcome::Outcome;

use serde::{Deserialize, Serialize};
use std::fmt;

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// ISO 3166-1 alpha-2 country code as supplied by the caller.
///
/// Not normalized: `"nl"` and `"NL"` are different keys to the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(pub String);

impl CountryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CountryCode {
    fn from(s: &str) -> Self {
        CountryCode(s.to_string())
    }
}

impl From<String> for CountryCode {
    fn from(s: String) -> Self {
        CountryCode(s)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!version().is_empty());
    }

    #[test]
    fn country_code_is_not_normalized() {
        assert_ne!(CountryCode::from("nl"), CountryCode::from("NL"));
        assert_eq!(CountryCode::from("NL").to_string(), "NL");
    }

    #[test]
    fn country_code_serializes_as_plain_string() {
        let v = serde_json::to_value(CountryCode::from("DE")).unwrap();
        assert_eq!(v, serde_json::json!("DE"));
    }
}
