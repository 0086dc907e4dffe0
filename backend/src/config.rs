use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JSON_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got `{value}`")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// | Env Var              | Default       |
/// |----------------------|---------------|
/// | `DECREE_HOST`        | `127.0.0.1`   |
/// | `DECREE_PORT`        | `8080`        |
/// | `DECREE_TEMPLATE_DIR`| embedded      |
/// | `DECREE_JSON_LIMIT`  | `1048576`     |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding template packages. `None` serves the templates
    /// compiled into the binary.
    pub template_dir: Option<PathBuf>,
    /// Maximum JSON body size in bytes.
    pub json_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            template_dir: None,
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }
}

impl AppConfig {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = AppConfig::default();

        let host = var("DECREE_HOST").unwrap_or(defaults.host);
        let port = match var("DECREE_PORT") {
            Some(value) => parse_positive("DECREE_PORT", &value)?,
            None => defaults.port,
        };
        let json_limit = match var("DECREE_JSON_LIMIT") {
            Some(value) => parse_positive("DECREE_JSON_LIMIT", &value)?,
            None => defaults.json_limit,
        };
        let template_dir = var("DECREE_TEMPLATE_DIR").map(PathBuf::from);

        Ok(AppConfig {
            host,
            port,
            template_dir,
            json_limit,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_positive<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialEq + Default,
{
    match value.parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => Err(ConfigError::Invalid {
            name,
            expected: "a positive integer",
            value: value.to_string(),
        }),
    }
}
