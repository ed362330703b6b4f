//! Layered configuration loading.
//!
//! A directory is scanned for YAML files: `name.yaml` is a base file,
//! `name.<env>.yaml` is an override for environment `<env>`. Base files
//! load first, then the overrides matching the current environment; keys
//! merge recursively with override precedence. Files for other known
//! environments are skipped silently, unknown suffixes are logged at debug.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::Value;
use tracing::debug;

use crate::environment::{Environment, ENVIRONMENT_VAR};
use crate::error::{ConfigError, ConfigResult};

/// Configuration loader tied to an environment-selection variable.
pub struct ConfigLoader {
    env_var: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

enum FileKind {
    Base,
    Env(Environment),
    UnknownSuffix(String),
    NotConfig,
}

impl ConfigLoader {
    /// Loader reading the environment from `KEEL_ENVIRONMENT`.
    pub fn new() -> Self {
        Self {
            env_var: ENVIRONMENT_VAR.to_string(),
        }
    }

    /// Loader reading the environment from a custom variable.
    pub fn with_env_var(var: impl Into<String>) -> Self {
        Self { env_var: var.into() }
    }

    /// The environment currently selected.
    pub fn environment(&self) -> Environment {
        Environment::from_env_var(&self.env_var)
    }

    /// The files that would be loaded from `dir`, in load order
    /// (base files first, then matching environment overrides, each group
    /// sorted by name for determinism).
    pub fn layered_files(&self, dir: impl AsRef<Path>) -> ConfigResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let target = self.environment();

        let mut names: Vec<PathBuf> = Vec::new();
        if dir.exists() {
            for entry in fs::read_dir(dir)? {
                names.push(entry?.path());
            }
        }
        names.sort();

        let mut base_files = Vec::new();
        let mut env_files = Vec::new();
        for path in names {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            match classify(file_name) {
                FileKind::Base => base_files.push(path),
                FileKind::Env(env) if env == target => env_files.push(path),
                FileKind::Env(_) => {}
                FileKind::UnknownSuffix(suffix) => {
                    debug!(file = %path.display(), suffix, "ignored config file with unknown environment suffix");
                }
                FileKind::NotConfig => {}
            }
        }

        base_files.extend(env_files);
        Ok(base_files)
    }

    /// Load and merge the layered configuration from `dir` into `T`.
    pub fn load<T: DeserializeOwned>(&self, dir: impl AsRef<Path>) -> ConfigResult<T> {
        let dir = dir.as_ref();
        let files = self.layered_files(dir)?;
        if files.is_empty() {
            return Err(ConfigError::NoFiles {
                dir: dir.display().to_string(),
            });
        }

        let mut merged = Value::Null;
        for path in &files {
            let content = fs::read_to_string(path)?;
            let value: Value = serde_yaml::from_str(&content)?;
            merged = merge(merged, value);
        }

        Ok(serde_yaml::from_value(merged)?)
    }

    /// Load a single configuration file into `T`.
    pub fn from_file<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> ConfigResult<T> {
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

/// Recursive merge with override precedence: mappings merge key by key,
/// everything else (scalars, sequences) is replaced by the override.
fn merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.remove(&key) {
                    Some(existing) => merge(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Mapping(base)
        }
        (_, overlay) => overlay,
    }
}

fn classify(file_name: &str) -> FileKind {
    let Some(stem) = file_name
        .strip_suffix(".yaml")
        .or_else(|| file_name.strip_suffix(".yml"))
    else {
        return FileKind::NotConfig;
    };

    match stem.rsplit_once('.') {
        None => FileKind::Base,
        Some((_, suffix)) => match suffix.parse::<Environment>() {
            Ok(env) => FileKind::Env(env),
            Err(()) => FileKind::UnknownSuffix(suffix.to_string()),
        },
    }
}
