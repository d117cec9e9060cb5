//! Configuration system

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// Text formats a configuration can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Pick the format from a file name's extension
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match Path::new(name).extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(name.to_string())),
        }
    }
}

/// Configuration trait
///
/// Everything goes through [`from_str_with_format`](Self::from_str_with_format)
/// and [`to_string_with_format`](Self::to_string_with_format); the file
/// methods only add IO and validation.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Check values that deserialize fine but make no sense
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Parse configuration text, picking the format from `name`'s extension
    fn from_str_with_format(contents: &str, name: &str) -> Result<Self, ConfigError> {
        match ConfigFormat::from_name(name)? {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Render configuration text in the format implied by `name`
    fn to_string_with_format(&self, name: &str) -> Result<String, ConfigError> {
        let rendered = match ConfigFormat::from_name(name)? {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
            ConfigFormat::Ron => {
                ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()).map_err(|e| e.to_string())
            }
        };
        rendered.map_err(ConfigError::Serialize)
    }

    /// Load and validate a configuration file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Self::from_str_with_format(&std::fs::read_to_string(path)?, path)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Write a configuration file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_string_with_format(path)?)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Loaded values failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_follows_extension() {
        assert_eq!(ConfigFormat::from_name("game.toml").unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_name("dir.toml/game.ron").unwrap(), ConfigFormat::Ron);
        assert!(matches!(
            ConfigFormat::from_name("game.toml.bak"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(ConfigFormat::from_name("toml").is_err());
    }
}
