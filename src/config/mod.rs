//! Configuration management.
//!
//! Settings are layered, later layers winning:
//! - built-in defaults
//! - TOML config file (`--config <path>`, else `<config dir>/tc/config.toml`
//!   when it exists)
//! - `TC_*` environment variables
//! - command-line flags (applied by the binary)
//!
//! ```toml
//! encoding = "cl100k_base"
//! invalid_utf8 = "abort"
//! references = false
//! universal_newlines = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TcError};
use crate::input::{CollectOptions, InvalidUtf8Policy};
use crate::tokenizer::DEFAULT_ENCODING;

/// Main configuration struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Encoding name used when `-e` is not given
    pub encoding: String,

    /// Handling of files that are not valid UTF-8
    pub invalid_utf8: InvalidUtf8Policy,

    /// Show the reference-work comparison in human mode
    pub references: bool,

    /// Translate `\r\n` and lone `\r` to `\n` before counting
    pub universal_newlines: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            invalid_utf8: InvalidUtf8Policy::Skip,
            references: true,
            universal_newlines: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TcError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        toml::from_str(&content)
            .map_err(|e| TcError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Default config file location (`<config dir>/tc/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tc").join("config.toml"))
    }

    /// Apply `TC_*` environment variable overrides
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(encoding) = var("TC_ENCODING") {
            self.encoding = encoding;
        }
        if let Some(policy) = var("TC_INVALID_UTF8") {
            self.invalid_utf8 = policy.parse().map_err(TcError::Config)?;
        }
        if let Some(val) = var("TC_REFERENCES") {
            self.references = parse_bool("TC_REFERENCES", &val)?;
        }
        if let Some(val) = var("TC_UNIVERSAL_NEWLINES") {
            self.universal_newlines = parse_bool("TC_UNIVERSAL_NEWLINES", &val)?;
        }
        Ok(self)
    }

    /// Load file and environment layers.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    debug!(path = %path.display(), "using config file");
                    Self::from_file(path)?
                },
                None => Self::default(),
            },
        };

        config.with_env()
    }

    /// Input collection options implied by this config
    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            invalid_utf8: self.invalid_utf8,
            universal_newlines: self.universal_newlines,
        }
    }
}

fn parse_bool(key: &str, val: &str) -> Result<bool> {
    match val.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(TcError::Config(format!("{key}: expected a boolean, got {val:?}"))),
    }
}
