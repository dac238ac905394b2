//! Configuration management for Herald.
//!
//! Parses `herald.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `resolution.null_text`
//! - `resolution.unknown_text`
//! - `resolution.default_locale`
//!
//! ## Example
//!
//! ```
//! use herald_config::{Config, DelimiterStyle};
//!
//! let config = Config::from_toml_str(r#"
//! [placeholders]
//! style = "braces"
//!
//! [locales.de]
//! second = "Sekunde"
//! seconds = "Sekunden"
//! less_than_second = "weniger als eine Sekunde"
//! "#).unwrap();
//!
//! assert_eq!(config.placeholders.style, DelimiterStyle::Braces);
//! assert_eq!(config.duration_units(Some("de_DE")).seconds, "Sekunden");
//! assert_eq!(config.duration_units(Some("ja")).seconds, "seconds");
//! ```

mod expand;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "herald.toml";

/// Locale used when nothing else is configured.
const FALLBACK_LOCALE: &str = "en";

static ENGLISH: LazyLock<DurationUnits> = LazyLock::new(DurationUnits::default);

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Placeholder syntax.
    pub placeholders: PlaceholderConfig,
    /// Sentinels and locale fallback used during resolution.
    pub resolution: ResolutionConfig,
    /// Duration vocabularies keyed by lowercase language tag.
    locales: HashMap<String, DurationUnits>,
    /// World display settings.
    pub worlds: WorldsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let mut config = Self {
            placeholders: PlaceholderConfig::default(),
            resolution: ResolutionConfig::default(),
            locales: HashMap::new(),
            worlds: WorldsConfig::default(),
            config_path: None,
        };
        config.normalize_locales();
        config
    }
}

/// Placeholder delimiter style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterStyle {
    /// `%KEY%`
    #[default]
    Percent,
    /// `{KEY}`
    Braces,
}

impl DelimiterStyle {
    /// Opening and closing delimiter characters.
    #[must_use]
    pub fn chars(self) -> (char, char) {
        match self {
            Self::Percent => ('%', '%'),
            Self::Braces => ('{', '}'),
        }
    }
}

/// Placeholder configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Delimiter style used by templates.
    pub style: DelimiterStyle,
}

/// Resolution configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Text shown for explicit null bindings.
    pub null_text: String,
    /// Text shown when a world or name cannot be determined.
    pub unknown_text: String,
    /// Locale used when the recipient's locale has no vocabulary.
    pub default_locale: String,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            null_text: "NULL".to_owned(),
            unknown_text: "???".to_owned(),
            default_locale: FALLBACK_LOCALE.to_owned(),
        }
    }
}

/// Unit names for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DurationUnits {
    pub second: String,
    pub seconds: String,
    pub minute: String,
    pub minutes: String,
    pub hour: String,
    pub hours: String,
    pub day: String,
    pub days: String,
    /// Phrase for durations shorter than one second.
    pub less_than_second: String,
}

impl Default for DurationUnits {
    fn default() -> Self {
        Self {
            second: "second".to_owned(),
            seconds: "seconds".to_owned(),
            minute: "minute".to_owned(),
            minutes: "minutes".to_owned(),
            hour: "hour".to_owned(),
            hours: "hours".to_owned(),
            day: "day".to_owned(),
            days: "days".to_owned(),
            less_than_second: "less than one second".to_owned(),
        }
    }
}

/// World display configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WorldsConfig {
    /// Raw world name → display alias.
    pub aliases: HashMap<String, String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`resolution.default_locale`").
        field: String,
        /// Error message (e.g., "${`HERALD_LOCALE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Lowercase language part of a locale tag: `en_US` → `en`, `pt-BR` → `pt`.
fn language(tag: &str) -> String {
    tag.split(['_', '-'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `herald.toml` in current directory and parents,
    /// and falls back to defaults when none is found.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => {
                tracing::debug!(file = CONFIG_FILENAME, "No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse, expand and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, env-var expansion or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.normalize_locales();
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.resolution.null_text, "resolution.null_text")?;
        require_non_empty(&self.resolution.unknown_text, "resolution.unknown_text")?;
        require_non_empty(&self.resolution.default_locale, "resolution.default_locale")?;

        for (tag, units) in &self.locales {
            require_non_empty(
                &units.less_than_second,
                &format!("locales.{tag}.less_than_second"),
            )?;
        }

        for (world, alias) in &self.worlds.aliases {
            if alias.trim().is_empty() {
                tracing::warn!(world = %world, "Empty world alias configured, raw name will be used");
            }
        }

        Ok(())
    }

    /// Duration vocabulary for a locale tag.
    ///
    /// Matches the full tag first, then its language part, then the default
    /// locale, and finally the built-in English vocabulary.
    #[must_use]
    pub fn duration_units(&self, locale: Option<&str>) -> &DurationUnits {
        if let Some(tag) = locale {
            if let Some(units) = self.lookup_locale(tag) {
                return units;
            }
            tracing::warn!(
                locale = tag,
                default_locale = %self.resolution.default_locale,
                "No duration vocabulary for locale, using default locale"
            );
        }
        if let Some(units) = self.lookup_locale(&self.resolution.default_locale) {
            return units;
        }
        tracing::warn!(
            default_locale = %self.resolution.default_locale,
            "No duration vocabulary for default locale, using English"
        );
        &ENGLISH
    }

    /// Locale tags with a configured vocabulary.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    fn lookup_locale(&self, tag: &str) -> Option<&DurationUnits> {
        self.locales
            .get(&tag.trim().to_ascii_lowercase())
            .or_else(|| self.locales.get(&language(tag)))
    }

    /// Lowercase locale keys and make sure English is always present.
    fn normalize_locales(&mut self) {
        let locales = std::mem::take(&mut self.locales);
        self.locales = locales
            .into_iter()
            .map(|(tag, units)| (tag.to_ascii_lowercase(), units))
            .collect();
        self.locales
            .entry(FALLBACK_LOCALE.to_owned())
            .or_insert_with(DurationUnits::default);
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading configuration");
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let resolution = &mut self.resolution;
        resolution.null_text = expand::expand_env(&resolution.null_text, "resolution.null_text")?;
        resolution.unknown_text =
            expand::expand_env(&resolution.unknown_text, "resolution.unknown_text")?;
        resolution.default_locale =
            expand::expand_env(&resolution.default_locale, "resolution.default_locale")?;
        Ok(())
    }
}
