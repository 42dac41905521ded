//! Configuration management for EchoClaw
//!
//! This module provides configuration loading, saving, and global state management.
//! Configuration is loaded from `~/.echoclaw/config.json` with environment variable overrides.

mod types;

pub use types::*;

use crate::error::{EchoError, Result};
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::RwLock;

/// Global configuration instance
static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

impl Config {
    /// Returns the EchoClaw configuration directory path (~/.echoclaw)
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".echoclaw")
    }

    /// Returns the path to the config file (~/.echoclaw/config.json)
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load configuration from the default path with environment overrides.
    ///
    /// If the config file doesn't exist, returns default configuration.
    /// Environment variables can override config values using the pattern:
    /// `ECHOCLAW_SECTION_KEY`
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::path())
    }

    /// Load configuration from a specific path with environment overrides.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Config::default()
        };

        // Apply environment variable overrides
        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Environment variables follow the pattern: ECHOCLAW_SECTION_KEY
    fn apply_env_overrides(&mut self) {
        // Agent settings
        if let Ok(val) = std::env::var("ECHOCLAW_AGENT_MODEL") {
            self.agent.model = val;
        }
        if let Ok(val) = std::env::var("ECHOCLAW_AGENT_SUMMARY_MODEL") {
            self.agent.summary_model = val;
        }
        if let Ok(val) = std::env::var("ECHOCLAW_AGENT_CONTEXT_THRESHOLD") {
            if let Ok(v) = val.parse() {
                self.agent.context_threshold = v;
            }
        }
        if let Ok(val) = std::env::var("ECHOCLAW_AGENT_MAX_ATTEMPTS") {
            if let Ok(v) = val.parse() {
                self.agent.max_attempts = v;
            }
        }

        // Provider credentials
        if let Ok(val) = std::env::var("ECHOCLAW_PROVIDERS_GROQ_API_KEY") {
            let provider = self
                .providers
                .groq
                .get_or_insert_with(ProviderConfig::default);
            provider.api_key = Some(val);
        }
        if let Ok(val) = std::env::var("ECHOCLAW_PROVIDERS_GROQ_API_BASE") {
            let provider = self
                .providers
                .groq
                .get_or_insert_with(ProviderConfig::default);
            provider.api_base = Some(val);
        }

        // Audio
        if let Ok(val) = std::env::var("ECHOCLAW_AUDIO_SPEECH_ENABLED") {
            if let Ok(enabled) = val.parse() {
                self.audio.speech.enabled = enabled;
            }
        }
        if let Ok(val) = std::env::var("ECHOCLAW_AUDIO_CAPTURE_COMMAND") {
            self.audio.capture.command = val;
        }

        // Logging
        if let Ok(val) = std::env::var("ECHOCLAW_LOGGING_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::path())
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &PathBuf) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Initialize the global configuration.
    ///
    /// This should be called once at startup. Subsequent calls will return
    /// an error if the config is already initialized.
    pub fn init() -> Result<()> {
        let config = Self::load()?;
        CONFIG
            .set(RwLock::new(config))
            .map_err(|_| EchoError::Config("Configuration already initialized".to_string()))
    }

    /// Initialize the global configuration with a specific config.
    ///
    /// Useful for testing or custom initialization.
    pub fn init_with(config: Config) -> Result<()> {
        CONFIG
            .set(RwLock::new(config))
            .map_err(|_| EchoError::Config("Configuration already initialized".to_string()))
    }

    /// Get a clone of the current global configuration.
    ///
    /// Returns default configuration if not yet initialized.
    pub fn get() -> Config {
        CONFIG
            .get()
            .and_then(|lock| lock.read().ok())
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Update the global configuration.
    ///
    /// Returns an error if the config hasn't been initialized yet.
    pub fn update<F>(f: F) -> Result<()>
    where
        F: FnOnce(&mut Config),
    {
        let lock = CONFIG
            .get()
            .ok_or_else(|| EchoError::Config("Configuration not initialized".to_string()))?;
        let mut guard = lock
            .write()
            .map_err(|_| EchoError::Config("Failed to acquire config write lock".to_string()))?;
        f(&mut guard);
        Ok(())
    }

    /// Get the Groq API key from config, falling back to the `GROQ_API_KEY`
    /// environment variable.
    pub fn groq_api_key(&self) -> Option<String> {
        if let Some(ref provider) = self.providers.groq {
            if let Some(ref key) = provider.api_key {
                if !key.is_empty() {
                    return Some(key.clone());
                }
            }
        }
        std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty())
    }

    /// Get the configured Groq API base URL, if any.
    pub fn groq_api_base(&self) -> Option<String> {
        self.providers
            .groq
            .as_ref()
            .and_then(|p| p.api_base.clone())
    }
}
