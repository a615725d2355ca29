//! Configuration management for carmate
//!
//! One global config for the whole shell – theme and language are set once
//! and apply everywhere.
//!
//! Config file location: ~/.config/carmate/config.toml
//! The Gemini API key can live in the file or in the GEMINI_API_KEY
//! environment variable; the environment wins and is read once at startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const CREDENTIAL_ENV: &str = "GEMINI_API_KEY";

/// Main configuration structure (global for all views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeName,
    pub language: Language,

    // AI co-pilot settings
    #[serde(default)]
    pub ai_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeName::Midnight,
            language: Language::Chinese,
            ai_api_key: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("carmate");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default if not exists
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        // Restrict config file permissions (may contain the API key)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Resolve the AI credential: environment first, stored key second.
    /// Read once at startup; a blank value counts as absent.
    pub fn resolve_credential(&self) -> Option<String> {
        if let Ok(key) = std::env::var(CREDENTIAL_ENV) {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }
        self.ai_api_key
            .as_ref()
            .filter(|k| !k.trim().is_empty())
            .cloned()
    }
}

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Midnight,
    Gruvbox,
    Nord,
    Transparent,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Midnight => "Midnight",
            ThemeName::Gruvbox => "Gruvbox",
            ThemeName::Nord => "Nord",
            ThemeName::Transparent => "Transparent",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeName::Midnight => ThemeName::Gruvbox,
            ThemeName::Gruvbox => ThemeName::Nord,
            ThemeName::Nord => ThemeName::Transparent,
            ThemeName::Transparent => ThemeName::Midnight,
        }
    }
}

/// Available languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    /// Traditional Chinese
    #[default]
    Chinese,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "繁體中文",
        }
    }

    /// Short tag shown on the sidebar language toggle
    pub fn tag(&self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::Chinese => "中文",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Language::English => Language::Chinese,
            Language::Chinese => Language::English,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeName::Midnight);
        assert_eq!(config.language, Language::Chinese);
        assert!(config.ai_api_key.is_none());
    }

    #[test]
    fn test_theme_cycle() {
        let mut t = ThemeName::Midnight;
        for _ in 0..4 {
            t = t.next();
        }
        assert_eq!(t, ThemeName::Midnight);
    }

    #[test]
    fn test_language_cycle() {
        let lang = Language::Chinese;
        assert_eq!(lang.next(), Language::English);
        assert_eq!(lang.next().next(), Language::Chinese);
    }

    #[test]
    fn test_blank_stored_key_counts_as_absent() {
        let config = Config {
            ai_api_key: Some("   ".to_string()),
            ..Config::default()
        };
        // Skip when the host environment carries a real key
        if std::env::var(CREDENTIAL_ENV).is_err() {
            assert!(config.resolve_credential().is_none());
        }
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            theme: ThemeName::Nord,
            language: Language::English,
            ai_api_key: Some("k".to_string()),
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.theme, ThemeName::Nord);
        assert_eq!(parsed.language, Language::English);
        assert_eq!(parsed.ai_api_key.as_deref(), Some("k"));
    }
}
