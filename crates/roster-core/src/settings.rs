//! Import settings loaded from TOML.
//!
//! ```toml
//! [validation]
//! genders = ["Male", "Female"]
//! phone_pattern = '^\+?[0-9]{10,12}$'
//! classes = ["P1", "P2", "S1"]
//!
//! [commit]
//! batch_size = 50
//! ```
//!
//! Every key is optional; missing keys fall back to the built-in defaults.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use roster_map::SchemaRegistry;
use roster_model::FieldKey;
use roster_validate::{
    ClassRegistry, DEFAULT_GENDERS, DEFAULT_PHONE_PATTERN, PhonePattern, ValidationRules,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commit::{CommitOptions, DEFAULT_BATCH_SIZE};
use crate::error::SettingsError;
use crate::wizard::ImportWizard;

/// Environment variable pointing at a settings file.
pub const CONFIG_ENV_VAR: &str = "DRAIS_IMPORT_CONFIG";

/// Class codes used when none are configured.
pub const DEFAULT_CLASSES: [&str; 13] = [
    "P1", "P2", "P3", "P4", "P5", "P6", "P7", "S1", "S2", "S3", "S4", "S5", "S6",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportSettings {
    pub validation: ValidationSettings,
    pub commit: CommitSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationSettings {
    pub genders: Vec<String>,
    pub phone_pattern: String,
    pub classes: Vec<String>,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            genders: DEFAULT_GENDERS.iter().map(|g| (*g).to_string()).collect(),
            phone_pattern: DEFAULT_PHONE_PATTERN.to_string(),
            classes: DEFAULT_CLASSES.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommitSettings {
    pub batch_size: usize,
}

impl Default for CommitSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ImportSettings {
    /// Parse settings text; `origin` is only used in error messages.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, SettingsError> {
        toml::from_str(text).map_err(|source| SettingsError::Toml {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a settings file.
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Replace the configured class codes.
    #[must_use]
    pub fn with_classes(mut self, classes: Vec<String>) -> Self {
        self.validation.classes = classes;
        self
    }

    pub fn class_registry(&self) -> ClassRegistry {
        self.validation.classes.iter().collect()
    }

    /// Compile the validation rules.
    ///
    /// # Errors
    ///
    /// Fails if the phone pattern is not a valid regex or no gender is allowed.
    pub fn validation_rules(&self) -> Result<ValidationRules, SettingsError> {
        let phone = PhonePattern::new(&self.validation.phone_pattern)?;
        if self.validation.genders.iter().all(|g| g.trim().is_empty()) {
            return Err(SettingsError::Invalid {
                message: "validation.genders must list at least one value".to_string(),
            });
        }
        Ok(ValidationRules::new(self.class_registry())
            .with_choices(FieldKey::Gender, &self.validation.genders)
            .with_phone_pattern(phone))
    }

    /// # Errors
    ///
    /// Fails if `batch_size` is zero.
    pub fn commit_options(&self) -> Result<CommitOptions, SettingsError> {
        if self.commit.batch_size == 0 {
            return Err(SettingsError::Invalid {
                message: "commit.batch_size must be at least 1".to_string(),
            });
        }
        Ok(CommitOptions::default().with_batch_size(self.commit.batch_size))
    }

    /// A wizard over the student-roster registry with these settings.
    pub fn wizard(&self) -> Result<ImportWizard, SettingsError> {
        let wizard = ImportWizard::new(SchemaRegistry::student_roster(), self.validation_rules()?)
            .with_options(self.commit_options()?);
        debug!(
            classes = self.validation.classes.len(),
            batch_size = self.commit.batch_size,
            "wizard configured"
        );
        Ok(wizard)
    }
}

/// Pick the settings file: the explicit path, else a non-empty `env_value`.
pub fn resolve_settings_path(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}

/// Load settings from `explicit`, then [`CONFIG_ENV_VAR`], then defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<ImportSettings, SettingsError> {
    match resolve_settings_path(explicit, std::env::var_os(CONFIG_ENV_VAR)) {
        Some(path) => {
            let settings = ImportSettings::from_path(&path)?;
            info!(path = %path.display(), "settings loaded");
            Ok(settings)
        }
        None => {
            debug!("using default settings");
            Ok(ImportSettings::default())
        }
    }
}
