//! Board configuration.
//!
//! Settings come from an optional TOML file and are then overridden by
//! environment variables. Every key is optional; absent keys keep the
//! built-in defaults, including the household template catalogs.
//!
//! ```toml
//! creation_policy = "deferred-assignment"
//!
//! [storage]
//! backend = "remote"
//! database_url = "https://example-default-rtdb.firebaseio.com"
//!
//! [[daily_templates]]
//! title = "Fazer almoço"
//! fixed_assignee = "Euclides"
//! ```

use crate::board::{
    adapters::remote::RemoteStoreConfig,
    domain::{
        DailyTaskTemplate, ParseTaskCreationPolicyError, TaskCreationPolicy,
        default_daily_templates, default_quick_activities,
    },
};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Selects the JSON file backend at the given path.
pub const ENV_DATA_FILE: &str = "CHOREBOARD_DATA_FILE";
/// Selects the remote backend at the given database URL.
pub const ENV_REMOTE_URL: &str = "CHOREBOARD_REMOTE_URL";
/// Overrides the remote document path.
pub const ENV_REMOTE_PATH: &str = "CHOREBOARD_REMOTE_PATH";
/// Sets the remote auth token.
pub const ENV_REMOTE_TOKEN: &str = "CHOREBOARD_REMOTE_TOKEN";
/// Overrides the task creation policy.
pub const ENV_CREATION_POLICY: &str = "CHOREBOARD_CREATION_POLICY";

/// File used by the local backend when none is configured.
pub const DEFAULT_DATA_FILE: &str = "tarefas-app-state.json";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`BoardConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override holds an unusable value.
    #[error("invalid value for {key}: {reason}")]
    InvalidOverride {
        /// Environment variable name.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Where the board snapshot is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// JSON file on the local filesystem.
    File {
        /// Document path.
        path: String,
    },
    /// Realtime remote document.
    Remote {
        /// Database base URL.
        database_url: String,
        /// Document path under the database.
        #[serde(default = "default_document_path")]
        document_path: String,
        /// Optional auth token.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        auth_token: Option<String>,
    },
}

fn default_document_path() -> String {
    RemoteStoreConfig::DEFAULT_DOCUMENT_PATH.to_owned()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::File {
            path: DEFAULT_DATA_FILE.to_owned(),
        }
    }
}

impl StorageConfig {
    /// Returns the remote store settings when the remote backend is chosen.
    #[must_use]
    pub fn remote_store_config(&self) -> Option<RemoteStoreConfig> {
        match self {
            Self::File { .. } => None,
            Self::Remote {
                database_url,
                document_path,
                auth_token,
            } => {
                let config =
                    RemoteStoreConfig::new(database_url).with_document_path(document_path);
                Some(match auth_token {
                    Some(token) => config.with_auth_token(token),
                    None => config,
                })
            }
        }
    }
}

/// Complete board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Persistence backend.
    pub storage: StorageConfig,
    /// Required-field rule for new tasks.
    pub creation_policy: TaskCreationPolicy,
    /// Catalog used by daily generation.
    pub daily_templates: Vec<DailyTaskTemplate>,
    /// Catalog offered for quick task creation.
    pub quick_activities: Vec<String>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            creation_policy: TaskCreationPolicy::default(),
            daily_templates: default_daily_templates(),
            quick_activities: default_quick_activities(),
        }
    }
}

impl BoardConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed input.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Reads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is malformed.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let read_error = |source: io::Error| ConfigError::Read {
            path: path.to_string(),
            source,
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| read_error(io::Error::other("config path must name a file")))?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let raw = dir.read_to_string(file_name).map_err(read_error)?;
        Self::from_toml_str(&raw)
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] for unusable values.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through `lookup`.
    ///
    /// The remote URL wins over the data file when both are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] for unusable values.
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = read(ENV_DATA_FILE) {
            self.storage = StorageConfig::File { path };
        }
        if let Some(database_url) = read(ENV_REMOTE_URL) {
            self.storage = StorageConfig::Remote {
                database_url,
                document_path: read(ENV_REMOTE_PATH).unwrap_or_else(default_document_path),
                auth_token: read(ENV_REMOTE_TOKEN),
            };
        }
        if let Some(policy) = read(ENV_CREATION_POLICY) {
            self.creation_policy = policy.parse().map_err(
                |err: ParseTaskCreationPolicyError| ConfigError::InvalidOverride {
                    key: ENV_CREATION_POLICY,
                    reason: err.to_string(),
                },
            )?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[rstest]
    fn empty_toml_keeps_defaults() {
        let config = BoardConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.daily_templates.len(), 14);
        assert_eq!(config.quick_activities.len(), 23);
    }

    #[rstest]
    fn toml_selects_remote_backend_with_default_document() {
        let config = BoardConfig::from_toml_str(
            r#"
            creation_policy = "assignee-required"

            [storage]
            backend = "remote"
            database_url = "https://casa.example.com"
            "#,
        )
        .expect("remote config parses");

        assert_eq!(config.creation_policy, TaskCreationPolicy::AssigneeRequired);
        let remote = config
            .storage
            .remote_store_config()
            .expect("remote backend selected");
        assert_eq!(
            remote.document_url(),
            "https://casa.example.com/tarefas-app.json"
        );
    }

    #[rstest]
    fn toml_replaces_template_catalog() {
        let config = BoardConfig::from_toml_str(
            r#"
            [[daily_templates]]
            title = "Regar plantas"

            [[daily_templates]]
            title = "Passear com o cachorro"
            fixed_assignee = "ana"
            "#,
        )
        .expect("template config parses");

        assert_eq!(config.daily_templates.len(), 2);
        assert_eq!(
            config
                .daily_templates
                .get(1)
                .and_then(DailyTaskTemplate::fixed_assignee),
            Some("ana")
        );
    }

    #[rstest]
    fn remote_override_wins_over_data_file() {
        let env = HashMap::from([
            (ENV_DATA_FILE, "/tmp/board.json"),
            (ENV_REMOTE_URL, "https://casa.example.com/"),
            (ENV_REMOTE_TOKEN, "secret"),
            (ENV_CREATION_POLICY, "deferred"),
        ]);
        let config = BoardConfig::default()
            .with_overrides_from(|key| env.get(key).map(|value| (*value).to_owned()))
            .expect("overrides apply");

        assert_eq!(
            config.storage,
            StorageConfig::Remote {
                database_url: "https://casa.example.com/".to_owned(),
                document_path: "tarefas-app".to_owned(),
                auth_token: Some("secret".to_owned()),
            }
        );
    }

    #[rstest]
    fn invalid_policy_override_is_rejected() {
        let result = BoardConfig::default().with_overrides_from(|key| {
            (key == ENV_CREATION_POLICY).then(|| "sometimes".to_owned())
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride {
                key: ENV_CREATION_POLICY,
                ..
            })
        ));
    }
}
