use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use parlor_api::i18n::Locale;

/// Ten years.
pub const MAX_SESSION_TTL_HOURS: i64 = 87_600;

#[derive(Debug, Error)]
#[error("invalid value for {name}='{value}': {reason}")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

/// Process configuration, read from `PARLOR_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// `None` means a fresh random secret per process.
    pub session_secret: Option<String>,
    pub session_ttl_hours: i64,
    pub secure_cookie: bool,
    pub debug: bool,
    pub locale: Locale,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host: var("PARLOR_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse(&var, "PARLOR_PORT", 5000)?,
            data_dir: var("PARLOR_DATA_DIR").map_or_else(|| PathBuf::from("data"), PathBuf::from),
            session_secret: var("PARLOR_SESSION_SECRET"),
            session_ttl_hours: parse_ttl(&var)?,
            secure_cookie: parse_flag(&var, "PARLOR_SECURE_COOKIE")?,
            debug: parse_flag(&var, "PARLOR_DEBUG")?,
            locale: parse(&var, "PARLOR_LOCALE", Locale::En)?,
        })
    }

    /// `RUST_LOG`-style filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "parlor=debug,parlor_api=debug,parlor_db=debug,tower_http=debug"
        } else {
            "parlor=info,parlor_api=info,parlor_db=info,tower_http=info"
        }
    }
}

fn parse<T>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
            name,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_ttl(var: &impl Fn(&str) -> Option<String>) -> Result<i64, ConfigError> {
    const NAME: &str = "PARLOR_SESSION_TTL_HOURS";

    let hours = parse(var, NAME, 24 * 30)?;
    if !(1..=MAX_SESSION_TTL_HOURS).contains(&hours) {
        return Err(ConfigError {
            name: NAME,
            value: hours.to_string(),
            reason: format!("expected 1..={MAX_SESSION_TTL_HOURS} hours"),
        });
    }
    Ok(hours)
}

fn parse_flag(var: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<bool, ConfigError> {
    let Some(value) = var(name) else {
        return Ok(false);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            name,
            value,
            reason: "expected a boolean (1/0, true/false, yes/no, on/off)".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_match_the_legacy_deployment() {
        let config = config(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.session_secret.is_none());
        assert_eq!(config.session_ttl_hours, 720);
        assert!(!config.debug);
        assert!(!config.secure_cookie);
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("PARLOR_HOST", "127.0.0.1"),
            ("PARLOR_PORT", "8080"),
            ("PARLOR_DATA_DIR", "/var/lib/parlor"),
            ("PARLOR_SESSION_SECRET", "s3cret"),
            ("PARLOR_DEBUG", "yes"),
            ("PARLOR_LOCALE", "ar"),
        ])
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/parlor"));
        assert_eq!(config.session_secret.as_deref(), Some("s3cret"));
        assert!(config.debug);
        assert_eq!(config.locale, Locale::Ar);
        assert!(config.default_log_filter().contains("debug"));
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = config(&[("PARLOR_PORT", ""), ("PARLOR_SESSION_SECRET", "  ")]).unwrap();
        assert_eq!(config.port, 5000);
        assert!(config.session_secret.is_none());
    }

    #[test]
    fn session_ttl_must_be_in_range() {
        for value in ["0", "-1", "87601", "9223372036854775"] {
            let err = config(&[("PARLOR_SESSION_TTL_HOURS", value)]).unwrap_err();
            assert_eq!(err.name, "PARLOR_SESSION_TTL_HOURS", "value {value}");
        }

        let err = config(&[("PARLOR_SESSION_TTL_HOURS", "99999999999999999999")]).unwrap_err();
        assert_eq!(err.name, "PARLOR_SESSION_TTL_HOURS");

        let config = config(&[("PARLOR_SESSION_TTL_HOURS", "87600")]).unwrap();
        assert_eq!(config.session_ttl_hours, MAX_SESSION_TTL_HOURS);
        assert!(chrono::Duration::try_hours(config.session_ttl_hours).is_some());
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config(&[("PARLOR_PORT", "eighty")]).unwrap_err();
        assert_eq!(err.name, "PARLOR_PORT");

        let err = config(&[("PARLOR_DEBUG", "maybe")]).unwrap_err();
        assert_eq!(err.name, "PARLOR_DEBUG");

        let err = config(&[("PARLOR_LOCALE", "fr")]).unwrap_err();
        assert!(err.to_string().contains("PARLOR_LOCALE"));
    }
}
