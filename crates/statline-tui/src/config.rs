// Configuration loading and parsing (config/statline.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use statline_core::stats::{DataFormat, DEFAULT_TOP_SEASONS};
use thiserror::Error;

/// Config file name, looked up under `config/` (and seeded from `defaults/`).
pub const CONFIG_FILE: &str = "statline.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to seed config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub view: ViewConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// File path or http(s) URL of the score file.
    pub source: String,
    /// Explicit format; inferred from `source` when absent.
    pub format: Option<DataFormat>,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            source: "data/scores.json".to_string(),
            format: None,
        }
    }
}

impl DataConfig {
    /// The configured format, or the one implied by the source's extension.
    pub fn resolved_format(&self) -> DataFormat {
        self.format.unwrap_or_else(|| DataFormat::infer(&self.source))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Rows shown in the individual-season ranking.
    pub top_seasons_limit: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            top_seasons_limit: DEFAULT_TOP_SEASONS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Log directory. When absent, the platform data directory is used,
    /// falling back to `./logs`.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "statline=info,warn".to_string(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    /// Directory the log file goes into.
    pub fn resolved_dir(&self, base_dir: &Path) -> PathBuf {
        if let Some(dir) = &self.dir {
            return base_dir.join(dir);
        }
        directories::ProjectDirs::from("", "", "statline")
            .map(|dirs| dirs.data_local_dir().join("logs"))
            .unwrap_or_else(|| base_dir.join("logs"))
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/statline.toml` relative to `base_dir`.
///
/// A missing file is not an error: the built-in defaults apply.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let config = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            source: e,
        })?;
        parse_config(&text).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?
    } else {
        Config::default()
    };

    validate(&config)?;
    Ok(config)
}

/// Parse config text without touching the filesystem.
pub fn parse_config(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}

/// Copy `defaults/statline.toml` to `config/statline.toml` if the latter does
/// not exist yet. Returns the path written, if any.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let default_path = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() || !default_path.is_file() {
        return Ok(None);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;
    std::fs::copy(&default_path, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!(
            "failed to copy {} to {}: {e}",
            default_path.display(),
            target.display()
        ),
    })?;

    Ok(Some(target))
}

/// Convenience wrapper: seeds and loads config relative to the current
/// working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Read {
        path: PathBuf::from("."),
        source: e,
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.data.source.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.source".into(),
            message: "must not be empty".into(),
        });
    }

    if config.view.top_seasons_limit == 0 {
        return Err(ConfigError::ValidationError {
            field: "view.top_seasons_limit".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Fresh scratch directory under the system temp dir.
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("statline_config_{name}"));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.data.source, "data/scores.json");
        assert_eq!(config.data.resolved_format(), DataFormat::Json);
        assert_eq!(config.view.top_seasons_limit, 10);
        assert_eq!(config.logging.filter, "statline=info,warn");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config(
            r#"
            [data]
            source = "https://example.org/scores.csv"
            format = "csv"

            [view]
            top_seasons_limit = 25

            [logging]
            filter = "statline=debug"
            dir = "var/log"
            "#,
        )
        .unwrap();
        assert_eq!(config.data.source, "https://example.org/scores.csv");
        assert_eq!(config.data.format, Some(DataFormat::Csv));
        assert_eq!(config.view.top_seasons_limit, 25);
        assert_eq!(config.logging.filter, "statline=debug");
        assert_eq!(
            config.logging.resolved_dir(Path::new("/srv")),
            PathBuf::from("/srv/var/log")
        );
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config = parse_config("[data]\nsource = \"season.csv\"\n").unwrap();
        assert_eq!(config.data.resolved_format(), DataFormat::Csv);
        assert_eq!(config.view.top_seasons_limit, 10);
    }

    #[test]
    fn explicit_format_overrides_extension() {
        let config = parse_config("[data]\nsource = \"scores.txt\"\nformat = \"csv\"\n").unwrap();
        assert_eq!(config.data.resolved_format(), DataFormat::Csv);
    }

    #[test]
    fn unknown_format_is_a_parse_error() {
        assert!(parse_config("[data]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn zero_limit_fails_validation() {
        let mut config = Config::default();
        config.view.top_seasons_limit = 0;
        let err = validate(&config).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { ref field, .. } if field == "view.top_seasons_limit")
        );
    }

    #[test]
    fn empty_source_fails_validation() {
        let mut config = Config::default();
        config.data.source = "  ".into();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = scratch_dir("missing");
        let config = load_config_from(&dir).unwrap();
        assert_eq!(config.data.source, "data/scores.json");
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = scratch_dir("invalid");
        fs::create_dir_all(dir.join("config")).unwrap();
        fs::write(dir.join("config").join(CONFIG_FILE), "[data\nsource=").unwrap();
        let err = load_config_from(&dir).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn defaults_file_is_seeded_once() {
        let dir = scratch_dir("seed");
        fs::create_dir_all(dir.join("defaults")).unwrap();
        fs::write(
            dir.join("defaults").join(CONFIG_FILE),
            "[view]\ntop_seasons_limit = 5\n",
        )
        .unwrap();

        let copied = ensure_config_file(&dir).unwrap();
        assert_eq!(copied, Some(dir.join("config").join(CONFIG_FILE)));
        assert_eq!(load_config_from(&dir).unwrap().view.top_seasons_limit, 5);

        // Second call leaves the existing file alone.
        assert_eq!(ensure_config_file(&dir).unwrap(), None);
    }

    #[test]
    fn no_defaults_is_fine() {
        let dir = scratch_dir("no_defaults");
        assert_eq!(ensure_config_file(&dir).unwrap(), None);
    }
}
