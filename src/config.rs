use crate::errors::ConfigError;
use crate::source::{DocumentSource, DEFAULT_SOURCE};
use chrono::{FixedOffset, Offset, Utc};
use std::env;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub source: DocumentSource,
    /// `None` shows times in the server's local offset.
    pub display_offset: Option<FixedOffset>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let raw_source = lookup("DOWNLOAD_DATA_SOURCE").unwrap_or_else(|| DEFAULT_SOURCE.to_string());
        let source = DocumentSource::parse(&raw_source).map_err(|err| ConfigError {
            key: "DOWNLOAD_DATA_SOURCE",
            message: err.to_string(),
        })?;

        let display_offset = lookup("DASHBOARD_UTC_OFFSET")
            .filter(|value| !value.trim().is_empty())
            .map(|value| parse_offset(&value))
            .transpose()?;

        Ok(Self {
            port,
            source,
            display_offset,
        })
    }
}

/// Parses `+HH:MM`, `-HH:MM`, `+HHMM`, `Z` or `UTC`.
pub fn parse_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }
    trimmed.parse::<FixedOffset>().map_err(|err| ConfigError {
        key: "DASHBOARD_UTC_OFFSET",
        message: format!("expected +HH:MM, got '{raw}': {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.source.describe(), DEFAULT_SOURCE);
        assert!(config.display_offset.is_none());
    }

    #[test]
    fn unparseable_port_falls_back_to_default() {
        let config = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn explicit_values_are_used() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9090"),
            ("DOWNLOAD_DATA_SOURCE", "https://example.github.io/download-data.json"),
            ("DASHBOARD_UTC_OFFSET", "-05:30"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert!(matches!(config.source, DocumentSource::Http { .. }));
        assert_eq!(config.display_offset.unwrap().local_minus_utc(), -(5 * 3600 + 30 * 60));
    }

    #[test]
    fn invalid_offset_is_rejected() {
        let err = Config::from_lookup(lookup(&[("DASHBOARD_UTC_OFFSET", "soon")])).unwrap_err();
        assert_eq!(err.key, "DASHBOARD_UTC_OFFSET");
        assert!(parse_offset("+25:00").is_err());
        assert_eq!(parse_offset("+0200").unwrap().local_minus_utc(), 7200);
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset(" utc ").unwrap().local_minus_utc(), 0);
    }
}
