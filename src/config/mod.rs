//! Configuration resolution.
//!
//! Every environment lookup the tool performs happens here. Sources are merged
//! in precedence order (flag > environment > config file > default) into one
//! immutable [`Config`] that the rest of the crate receives explicitly.

pub mod file;

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub use file::{ConfigFile, parse_assignment};

/// Environment variables holding the API key, in lookup order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["OPENAI_KEY", "OPENAI_API_KEY"];

/// Environment variables holding a proxy URL, HTTPS preferred over HTTP.
pub const PROXY_ENV_VARS: [&str; 4] = ["HTTPS_PROXY", "https_proxy", "HTTP_PROXY", "http_proxy"];

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_GENERATE: u8 = 1;
pub const MAX_GENERATE: u8 = 5;
pub const DEFAULT_MAX_LENGTH: u16 = 50;
pub const MIN_MAX_LENGTH: u16 = 20;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const MIN_TIMEOUT_MS: u64 = 500;
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Style hint passed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitType {
    #[default]
    Plain,
    Conventional,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Plain => "plain",
            CommitType::Conventional => "conventional",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "plain" => Ok(CommitType::Plain),
            "conventional" => Ok(CommitType::Conventional),
            other => Err(invalid(
                ConfigKey::Type,
                format!("Unsupported type '{other}'. Expected 'plain' or 'conventional'"),
            )),
        }
    }
}

/// Keys accepted by the config file and `config get/set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiKey,
    Model,
    Locale,
    Generate,
    MaxLength,
    Timeout,
    Type,
    Proxy,
    ApiBase,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 9] = [
        ConfigKey::ApiKey,
        ConfigKey::Model,
        ConfigKey::Locale,
        ConfigKey::Generate,
        ConfigKey::MaxLength,
        ConfigKey::Timeout,
        ConfigKey::Type,
        ConfigKey::Proxy,
        ConfigKey::ApiBase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::ApiKey => "api_key",
            ConfigKey::Model => "model",
            ConfigKey::Locale => "locale",
            ConfigKey::Generate => "generate",
            ConfigKey::MaxLength => "max_length",
            ConfigKey::Timeout => "timeout",
            ConfigKey::Type => "type",
            ConfigKey::Proxy => "proxy",
            ConfigKey::ApiBase => "api_base",
        }
    }

    /// Whether the value is stored as a TOML integer.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ConfigKey::Generate | ConfigKey::MaxLength | ConfigKey::Timeout
        )
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub proxy: Option<String>,
    pub model: Option<String>,
    pub locale: Option<String>,
    pub generate: Option<String>,
    pub commit_type: Option<String>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub proxy: Option<String>,
    pub model: String,
    pub locale: String,
    pub generate: u8,
    pub max_length: u16,
    pub timeout: Duration,
    pub commit_type: CommitType,
    pub api_base: String,
}

impl Config {
    /// The API key, required once generation is about to start.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            proxy: None,
            model: DEFAULT_MODEL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            generate: DEFAULT_GENERATE,
            max_length: DEFAULT_MAX_LENGTH,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            commit_type: CommitType::Plain,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Merge flags, environment, config file and defaults into a [`Config`].
///
/// Every supplied value is validated, whatever its source. A missing API key
/// is not an error here; see [`Config::require_api_key`].
pub fn resolve_config(
    overrides: &ConfigOverrides,
    file: &ConfigFile,
) -> Result<Config, ConfigError> {
    let defaults = Config::default();

    let layered = |key: ConfigKey, flag: &Option<String>, env_value: Option<String>| {
        flag.clone()
            .filter(|v| !v.trim().is_empty())
            .or(env_value)
            .or_else(|| file.get(key))
            .map(|v| v.trim().to_string())
    };

    let api_key = layered(ConfigKey::ApiKey, &overrides.api_key, first_env(&API_KEY_ENV_VARS));
    let proxy = layered(ConfigKey::Proxy, &overrides.proxy, first_env(&PROXY_ENV_VARS));
    let model = layered(ConfigKey::Model, &overrides.model, None);
    let locale = layered(ConfigKey::Locale, &overrides.locale, None);
    let generate = layered(ConfigKey::Generate, &overrides.generate, None);
    let commit_type = layered(ConfigKey::Type, &overrides.commit_type, None);
    let max_length = layered(ConfigKey::MaxLength, &None, None);
    let timeout = layered(ConfigKey::Timeout, &None, None);
    let api_base = layered(ConfigKey::ApiBase, &None, None);

    for (key, value) in [
        (ConfigKey::ApiKey, &api_key),
        (ConfigKey::Proxy, &proxy),
        (ConfigKey::Model, &model),
        (ConfigKey::Locale, &locale),
        (ConfigKey::ApiBase, &api_base),
    ] {
        if let Some(value) = value {
            validate_value(key, value)?;
        }
    }

    Ok(Config {
        api_key,
        proxy,
        model: model.unwrap_or(defaults.model),
        locale: locale.unwrap_or(defaults.locale),
        generate: generate
            .map(|v| parse_generate(&v))
            .transpose()?
            .unwrap_or(defaults.generate),
        max_length: max_length
            .map(|v| parse_max_length(&v))
            .transpose()?
            .unwrap_or(defaults.max_length),
        timeout: timeout
            .map(|v| parse_timeout(&v))
            .transpose()?
            .unwrap_or(defaults.timeout),
        commit_type: commit_type
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(defaults.commit_type),
        api_base: api_base.unwrap_or(defaults.api_base),
    })
}

/// First non-empty value among the named environment variables.
fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| env::var(name).ok().filter(|v| !v.trim().is_empty()))
}

/// Check a raw value against the rules for `key`.
pub fn validate_value(key: ConfigKey, value: &str) -> Result<(), ConfigError> {
    match key {
        ConfigKey::Generate => parse_generate(value).map(|_| ()),
        ConfigKey::MaxLength => parse_max_length(value).map(|_| ()),
        ConfigKey::Timeout => parse_timeout(value).map(|_| ()),
        ConfigKey::Type => value.parse::<CommitType>().map(|_| ()),
        ConfigKey::Locale => {
            if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
                Ok(())
            } else {
                Err(invalid(key, "Must be a valid locale (letters and dashes only)"))
            }
        }
        ConfigKey::ApiBase => {
            if value.starts_with("http://") || value.starts_with("https://") {
                Ok(())
            } else {
                Err(invalid(key, "Must be an http:// or https:// URL"))
            }
        }
        // Scheme-less proxies like `host:3128` are valid; reqwest parses them.
        ConfigKey::ApiKey | ConfigKey::Model | ConfigKey::Proxy => {
            if value.trim().is_empty() {
                Err(invalid(key, "Cannot be empty"))
            } else {
                Ok(())
            }
        }
    }
}

fn parse_generate(value: &str) -> Result<u8, ConfigError> {
    let n: u8 = value
        .parse()
        .map_err(|_| invalid(ConfigKey::Generate, "Must be an integer"))?;
    if n == 0 {
        return Err(invalid(ConfigKey::Generate, "Must be greater than 0"));
    }
    if n > MAX_GENERATE {
        return Err(invalid(
            ConfigKey::Generate,
            format!("Must be less or equal to {MAX_GENERATE}"),
        ));
    }
    Ok(n)
}

fn parse_max_length(value: &str) -> Result<u16, ConfigError> {
    let n: u16 = value
        .parse()
        .map_err(|_| invalid(ConfigKey::MaxLength, "Must be an integer"))?;
    if n < MIN_MAX_LENGTH {
        return Err(invalid(
            ConfigKey::MaxLength,
            format!("Must be greater than {MIN_MAX_LENGTH} characters"),
        ));
    }
    Ok(n)
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    let ms: u64 = value
        .parse()
        .map_err(|_| invalid(ConfigKey::Timeout, "Must be an integer (milliseconds)"))?;
    if ms < MIN_TIMEOUT_MS {
        return Err(invalid(
            ConfigKey::Timeout,
            format!("Must be greater than {MIN_TIMEOUT_MS}ms"),
        ));
    }
    Ok(Duration::from_millis(ms))
}

fn invalid(key: ConfigKey, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.as_str().to_string(),
        reason: reason.into(),
    }
}
