use std::env;
use std::fmt;
use std::str::FromStr;

#[derive(Clone)]
pub struct Config {
    // Database
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Rate limiting
    pub enable_rate_limiting: bool,
    pub rate_limit_replenish_seconds: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if a required variable is unset and
    /// `ConfigError::Invalid` if a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            // Database
            db_host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            db_port: parse_or(&lookup, "DB_PORT", 3306)?,
            db_user: lookup("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
            db_password: lookup("DB_PASSWORD").unwrap_or_default(),
            db_name: lookup("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", false)?,

            // API settings
            api_host: lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_port: parse_or(&lookup, "PORT", 3000)?,

            // Rate limiting
            enable_rate_limiting: parse_or(&lookup, "ENABLE_RATE_LIMITING", false)?,
            rate_limit_replenish_seconds: parse_or(&lookup, "RATE_LIMIT_REPLENISH_SECONDS", 1)?,
            rate_limit_burst: parse_or(&lookup, "RATE_LIMIT_BURST", 60)?,
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        _ => Ok(default),
    }
}

// Hand-written so the password never reaches the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("db_max_connections", &self.db_max_connections)
            .field("run_migrations", &self.run_migrations)
            .field("api_host", &self.api_host)
            .field("api_port", &self.api_port)
            .field("enable_rate_limiting", &self.enable_rate_limiting)
            .field("rate_limit_replenish_seconds", &self.rate_limit_replenish_seconds)
            .field("rate_limit_burst", &self.rate_limit_burst)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() {
        let config =
            Config::from_lookup(lookup_from(&[("DB_USER", "admin"), ("DB_NAME", "iot")])).unwrap();

        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_port, 3306);
        assert_eq!(config.db_password, "");
        assert_eq!(config.api_port, 3000);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert!(!config.enable_rate_limiting);
        assert!(!config.run_migrations);
    }

    #[test]
    fn rate_limiting_is_opt_in() {
        let config = Config::from_lookup(lookup_from(&[
            ("DB_USER", "admin"),
            ("DB_NAME", "iot"),
            ("ENABLE_RATE_LIMITING", "true"),
        ]))
        .unwrap();
        assert!(config.enable_rate_limiting);
    }

    #[test]
    fn missing_required_var_is_reported() {
        let err = Config::from_lookup(lookup_from(&[("DB_USER", "admin")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DB_NAME")));
    }

    #[test]
    fn unparseable_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DB_USER", "admin"),
            ("DB_NAME", "iot"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = Config::from_lookup(lookup_from(&[
            ("DB_USER", "admin"),
            ("DB_NAME", "iot"),
            ("DB_PASSWORD", "hunter2"),
        ]))
        .unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
