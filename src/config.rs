use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::faq::{KnowledgeBase, KnowledgeBaseError};

pub const REPLY_DELAY_ENV: &str = "SALESFORECAST_REPLY_DELAY_MS";
pub const KNOWLEDGE_BASE_ENV: &str = "SALESFORECAST_KNOWLEDGE_BASE";

/// Simulated thinking time before the assistant answers.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{} must be a whole number of milliseconds, got {:?}", REPLY_DELAY_ENV, .0)]
    InvalidDelay(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub reply_delay: Duration,
    /// Explicit knowledge base file. Falls back to the per-user file, then the
    /// built-in FAQ.
    pub knowledge_base_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            knowledge_base_path: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(raw) = lookup(REPLY_DELAY_ENV) {
            let millis: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidDelay(raw.clone()))?;
            settings.reply_delay = Duration::from_millis(millis);
        }

        settings.knowledge_base_path = lookup(KNOWLEDGE_BASE_ENV)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(settings)
    }

    /// Apply command-line overrides on top of the environment.
    pub fn with_overrides(mut self, delay_ms: Option<u64>, knowledge_base: Option<PathBuf>) -> Self {
        if let Some(millis) = delay_ms {
            self.reply_delay = Duration::from_millis(millis);
        }
        if knowledge_base.is_some() {
            self.knowledge_base_path = knowledge_base;
        }
        self
    }

    pub fn load_knowledge_base(&self) -> Result<KnowledgeBase, KnowledgeBaseError> {
        if let Some(path) = &self.knowledge_base_path {
            return KnowledgeBase::from_json_file(path);
        }

        if let Some(path) = user_knowledge_base_path().filter(|p| p.is_file()) {
            return KnowledgeBase::from_json_file(&path);
        }

        debug!("Using built-in knowledge base");
        Ok(KnowledgeBase::builtin())
    }
}

/// `<config dir>/salesforecast/knowledge_base.json`, when a config dir exists.
pub fn user_knowledge_base_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("salesforecast").join("knowledge_base.json"))
}

pub fn describe_source(settings: &Settings) -> String {
    let path: Option<PathBuf> = settings
        .knowledge_base_path
        .clone()
        .or_else(|| user_knowledge_base_path().filter(|p| p.is_file()));
    match path {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    }
}

pub fn log_settings(settings: &Settings) {
    info!(
        "Reply delay {}ms, knowledge base: {}",
        settings.reply_delay.as_millis(),
        describe_source(settings)
    );
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.reply_delay, Duration::from_millis(1000));
    }

    #[test]
    fn reads_delay_and_path() {
        let settings = Settings::from_lookup(lookup(&[
            (REPLY_DELAY_ENV, " 250 "),
            (KNOWLEDGE_BASE_ENV, "/tmp/kb.json"),
        ]))
        .unwrap();
        assert_eq!(settings.reply_delay, Duration::from_millis(250));
        assert_eq!(settings.knowledge_base_path, Some(PathBuf::from("/tmp/kb.json")));
    }

    #[test]
    fn rejects_bad_delay() {
        let err = Settings::from_lookup(lookup(&[(REPLY_DELAY_ENV, "soon")])).unwrap_err();
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn cli_overrides_win() {
        let settings = Settings::default()
            .with_overrides(Some(0), Some(PathBuf::from("faq.json")));
        assert_eq!(settings.reply_delay, Duration::ZERO);
        assert_eq!(settings.knowledge_base_path, Some(PathBuf::from("faq.json")));

        let untouched = settings.clone().with_overrides(None, None);
        assert_eq!(untouched, settings);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let settings = Settings {
            knowledge_base_path: Some(PathBuf::from("/nonexistent/faq.json")),
            ..Settings::default()
        };
        assert!(settings.load_knowledge_base().is_err());
    }
}
