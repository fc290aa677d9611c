//! The TOML config file (`~/.commitmoji.toml`).
//!
//! Edits go through `toml_edit` so comments and key order survive a
//! `config set`.

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};

use toml_edit::DocumentMut;
use tracing::debug;

use crate::error::ConfigError;

use super::{ConfigKey, validate_value};

/// Environment variable that points at an alternative config file.
pub const CONFIG_PATH_ENV_VAR: &str = "COMMITMOJI_CONFIG";

const CONFIG_FILE_NAME: &str = ".commitmoji.toml";

/// A loaded config file. A missing file behaves like an empty one.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
    doc: DocumentMut,
}

impl ConfigFile {
    /// Resolve the config file location: `COMMITMOJI_CONFIG` if set, otherwise
    /// `~/.commitmoji.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR)
            && !path.trim().is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Load the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let doc = match std::fs::read_to_string(path) {
            Ok(content) => content
                .parse::<DocumentMut>()
                .map_err(|e| ConfigError::ParseFailed(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}", path.display());
                DocumentMut::new()
            }
            Err(e) => return Err(ConfigError::ReadFailed(e)),
        };

        Ok(Self {
            path: path.to_path_buf(),
            doc,
        })
    }

    /// An empty config that is never written anywhere.
    pub fn empty() -> Self {
        Self {
            path: PathBuf::new(),
            doc: DocumentMut::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Value stored for `key`, rendered as a string.
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        let item = self.doc.get(key.as_str())?;
        if let Some(s) = item.as_str() {
            return Some(s.to_string());
        }
        if let Some(n) = item.as_integer() {
            return Some(n.to_string());
        }
        item.as_value().map(|v| v.to_string().trim().to_string())
    }

    /// All keys present in the file, in `ConfigKey::ALL` order.
    pub fn entries(&self) -> Vec<(ConfigKey, String)> {
        ConfigKey::ALL
            .iter()
            .filter_map(|key| self.get(*key).map(|value| (*key, value)))
            .collect()
    }

    /// Validate and store a value. Numeric keys are stored as TOML integers.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        validate_value(key, value)?;

        if key.is_integer() {
            let number: i64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.as_str().to_string(),
                reason: "Must be an integer".to_string(),
            })?;
            self.doc[key.as_str()] = toml_edit::value(number);
        } else {
            self.doc[key.as_str()] = toml_edit::value(value);
        }

        Ok(())
    }

    /// Write the document back atomically (temp file + rename).
    pub fn save(&self) -> Result<(), ConfigError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        std::fs::create_dir_all(parent).map_err(ConfigError::WriteFailed)?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(ConfigError::WriteFailed)?;
        tmp.write_all(self.doc.to_string().as_bytes())
            .map_err(ConfigError::WriteFailed)?;
        tmp.persist(&self.path)
            .map_err(|e| ConfigError::WriteFailed(e.error))?;

        debug!("Wrote config file {}", self.path.display());
        Ok(())
    }
}

/// Parse a `KEY=VALUE` argument of `config set`.
pub fn parse_assignment(arg: &str) -> Result<(ConfigKey, String), ConfigError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidAssignment(arg.to_string()))?;
    let key: ConfigKey = key.trim().parse()?;
    Ok((key, value.trim().to_string()))
}
