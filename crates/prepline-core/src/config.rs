use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog::default_patterns;
use crate::error::{PrepError, Result};
use crate::types::EventPattern;

/// Top-level configuration for prepline.
///
/// Loaded from `~/.prepline/config.toml` by default. The family profile and
/// the pattern catalog are read once at process start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub family: FamilyConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Event patterns in evaluation order. Replaces the built-in catalog when set.
    #[serde(default = "default_patterns")]
    pub patterns: Vec<EventPattern>,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            family: FamilyConfig::default(),
            classifier: ClassifierConfig::default(),
            patterns: default_patterns(),
        }
    }
}

impl PrepConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PrepConfig = toml::from_str(&content)?;
        config.validate()?;
        info!(
            patterns = config.patterns.len(),
            "Configuration loaded from {}",
            path.display()
        );
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or is invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Check the pattern catalog.
    ///
    /// Every pattern needs a name and at least one non-empty keyword, since
    /// confidence is computed as a fraction of the keyword count.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.patterns {
            if pattern.name.trim().is_empty() {
                return Err(PrepError::InvalidPattern {
                    name: pattern.name.clone(),
                    reason: "name is empty".into(),
                });
            }
            if pattern.keywords.is_empty() || pattern.keywords.iter().any(|k| k.trim().is_empty())
            {
                return Err(PrepError::InvalidPattern {
                    name: pattern.name.clone(),
                    reason: "keywords must be non-empty".into(),
                });
            }
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Household profile used when laying out a timeline. All durations are minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyConfig {
    /// Slack between leaving the house and the event start.
    pub commute_buffer_minutes: u32,
    /// Whether a pet needs care before leaving.
    pub has_pet: bool,
    pub pet_care_minutes: u32,
    pub meal_prep_minutes: u32,
    /// Getting-ready time for events that match no pattern.
    pub general_prep_minutes: u32,
    /// Time zone used to decide whether an event falls at dinner time.
    pub timezone: Tz,
}

impl Default for FamilyConfig {
    fn default() -> Self {
        Self {
            commute_buffer_minutes: 15,
            has_pet: false,
            pet_care_minutes: 15,
            meal_prep_minutes: 30,
            general_prep_minutes: 20,
            timezone: Tz::UTC,
        }
    }
}

/// How the classifier chooses among matching patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// First pattern in declaration order with any keyword hit.
    #[default]
    FirstMatch,
    /// Pattern with the best confidence; earlier patterns win ties.
    HighestConfidence,
}

/// Classifier configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub selection: SelectionStrategy,
}
