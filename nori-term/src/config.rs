//! Configuration.
//!
//! Precedence, highest to lowest: CLI flags, environment variables
//! (`NORI_SHELL`, `NORI_DIMENSIONS`), the config file
//! (`$XDG_CONFIG_HOME/nori/config.toml` or `~/.config/nori/config.toml`),
//! built-in defaults.

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}

/// Command-line overrides.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub shell: Option<String>,
    pub dimensions: Option<(u16, u16)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Screen size as (columns, rows).
    pub dimensions: (u16, u16),
    /// Shell command; `None` means `$SHELL`.
    pub shell: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dimensions: (80, 25),
            shell: None,
        }
    }
}

impl Config {
    /// Resolve the effective configuration for the given CLI overrides.
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let path = args.config_path.clone().or_else(Self::default_config_path);
        if let Some(path) = path {
            if path.exists() {
                config = Self::load_from_path(&path)?;
            } else if args.config_path.is_some() {
                // An explicitly requested file must exist.
                return Err(ConfigError::NotFound(path));
            }
        }

        config.apply_env_overrides();
        config.apply_cli_overrides(args);
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn default_config_path() -> Option<PathBuf> {
        if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg);
            if path.is_absolute() {
                return Some(path.join("nori").join("config.toml"));
            }
        }
        dirs::config_dir().map(|p| p.join("nori").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(shell) = env::var("NORI_SHELL") {
            if !shell.is_empty() {
                self.shell = Some(shell);
            }
        }
        if let Ok(dims) = env::var("NORI_DIMENSIONS") {
            if let Some(parsed) = parse_dimensions(&dims) {
                self.dimensions = parsed;
            }
        }
    }

    fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref shell) = args.shell {
            self.shell = Some(shell.clone());
        }
        if let Some(dims) = args.dimensions {
            self.dimensions = dims;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (cols, rows) = self.dimensions;
        if cols == 0 || rows == 0 {
            return Err(ConfigError::Validation(format!(
                "dimensions must be at least 1x1, got {cols}x{rows}"
            )));
        }
        Ok(())
    }
}

/// Parse a `COLSxROWS` size string such as `80x25`.
pub fn parse_dimensions(s: &str) -> Option<(u16, u16)> {
    let (cols, rows) = s.split_once(['x', 'X'])?;
    Some((cols.trim().parse().ok()?, rows.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.dimensions, (80, 25));
        assert!(config.shell.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_dimension_strings() {
        assert_eq!(parse_dimensions("80x25"), Some((80, 25)));
        assert_eq!(parse_dimensions("132X43"), Some((132, 43)));
        assert_eq!(parse_dimensions(" 10 x 5 "), Some((10, 5)));
        assert_eq!(parse_dimensions("80"), None);
        assert_eq!(parse_dimensions("80xmany"), None);
    }

    #[test]
    fn zero_dimensions_fail_validation() {
        let mut config = Config::default();
        config.dimensions = (0, 25);
        assert!(config.validate().is_err());
        config.dimensions = (80, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn cli_overrides_win() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs {
            config_path: None,
            shell: Some("/bin/zsh".to_string()),
            dimensions: Some((132, 43)),
        });
        assert_eq!(config.shell.as_deref(), Some("/bin/zsh"));
        assert_eq!(config.dimensions, (132, 43));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join("nori_test_config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"dimensions = [120, 40]\nshell = \"/bin/bash\"\n")
            .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.dimensions, (120, 40));
        assert_eq!(config.shell.as_deref(), Some("/bin/bash"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let path = std::env::temp_dir().join("nori_test_invalid.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"dimensions = not toml {{{").unwrap();

        assert!(matches!(
            Config::load_from_path(&path),
            Err(ConfigError::Parse(_))
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let args = CliArgs {
            config_path: Some(PathBuf::from("/nonexistent/nori.toml")),
            shell: None,
            dimensions: None,
        };
        assert!(matches!(
            Config::load_with_args(&args),
            Err(ConfigError::NotFound(_))
        ));
    }
}
