//! Builder configuration and persisted defaults.
//!
//! [`BuilderConfiguration`] is the immutable input of the build-script
//! factory: the target Gradle version and the dialect to render.
//!
//! [`ScriptgenConfig`] stores user defaults in `~/.scriptgen/config.json`.
//! Command-line values take precedence over stored ones.
//!
//! # Example
//!
//! ```no_run
//! use scriptgen_core::config::ScriptgenConfig;
//!
//! // Load (returns defaults if file doesn't exist)
//! let config = ScriptgenConfig::load();
//! let builder_config = config.resolve(None, None);
//! println!("{} for Gradle {}", builder_config.dialect(), builder_config.gradle_version());
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::render::Dialect;
use crate::version::GradleVersion;

const CONFIG_FILENAME: &str = "config.json";

/// Returns the scriptgen data directory (`~/.scriptgen`), creating it if needed.
pub fn scriptgen_dir() -> PathBuf {
    let dir = dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".scriptgen");
    std::fs::create_dir_all(&dir).ok();
    dir
}

/// Target of one generation request. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuilderConfiguration {
    dialect: Dialect,
    gradle_version: GradleVersion,
}

impl BuilderConfiguration {
    pub fn new(dialect: Dialect, gradle_version: GradleVersion) -> Self {
        Self { dialect, gradle_version }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn gradle_version(&self) -> &GradleVersion {
        &self.gradle_version
    }
}

/// Persistent scriptgen defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScriptgenConfig {
    /// Dialect used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,

    /// Gradle version targeted when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradle_version: Option<GradleVersion>,
}

impl ScriptgenConfig {
    /// Load config from `~/.scriptgen/config.json`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(&scriptgen_dir().join(CONFIG_FILENAME))
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save config to `~/.scriptgen/config.json`.
    pub fn save(&self) -> std::io::Result<()> {
        self.save_to(&scriptgen_dir().join(CONFIG_FILENAME))
    }

    pub fn save_to(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }

    /// Combine explicit values with stored defaults.
    pub fn resolve(
        &self,
        dialect: Option<Dialect>,
        gradle_version: Option<GradleVersion>,
    ) -> BuilderConfiguration {
        BuilderConfiguration::new(
            dialect.or(self.dialect).unwrap_or_default(),
            gradle_version
                .or_else(|| self.gradle_version.clone())
                .unwrap_or_default(),
        )
    }
}
