use crate::error::{Result, TodozError};
use crate::model::FilterType;
use crate::store::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for todoz, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodozConfig {
    /// Backend key the todo list is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Filter selected when no UI state has been saved yet
    #[serde(default)]
    pub default_filter: FilterType,

    /// Where `export` writes backups when no directory is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for TodozConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            default_filter: FilterType::default(),
            export_dir: None,
        }
    }
}

impl TodozConfig {
    pub const KEYS: [&'static str; 3] = ["storage_key", "default_filter", "export_dir"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TodozError::Io)?;
        let config: TodozConfig =
            serde_json::from_str(&content).map_err(TodozError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TodozError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TodozError::Serialization)?;
        fs::write(config_path, content).map_err(TodozError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage_key" => Some(self.storage_key.clone()),
            "default_filter" => Some(self.default_filter.to_string()),
            "export_dir" => Some(
                self.export_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    /// Set `key` from its string form. An empty `export_dir` unsets it.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "storage_key" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("storage_key cannot be empty".to_string());
                }
                self.storage_key = value.to_string();
            }
            "default_filter" => self.default_filter = value.parse()?,
            "export_dir" => {
                self.export_dir = match value.trim() {
                    "" => None,
                    dir => Some(PathBuf::from(dir)),
                }
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .map(|key| (*key, self.get(key).unwrap_or_default()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TodozConfig::default();
        assert_eq!(config.storage_key, "todos");
        assert_eq!(config.default_filter, FilterType::Today);
        assert_eq!(config.export_dir, None);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = TodozConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, TodozConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TodozConfig::default();
        config.set("default_filter", "backlog").unwrap();
        config.set("export_dir", "/tmp/backups").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = TodozConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_filter, FilterType::Backlog);
        assert_eq!(loaded.export_dir, Some(PathBuf::from("/tmp/backups")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"default_filter":"done"}"#).unwrap();

        let loaded = TodozConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.default_filter, FilterType::Done);
        assert_eq!(loaded.storage_key, "todos");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = TodozConfig::default();
        assert!(config.set("default_filter", "someday").is_err());
        assert!(config.set("storage_key", "  ").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, TodozConfig::default());
    }

    #[test]
    fn test_empty_export_dir_unsets() {
        let mut config = TodozConfig::default();
        config.set("export_dir", "out").unwrap();
        config.set("export_dir", "").unwrap();
        assert_eq!(config.export_dir, None);
        assert_eq!(config.get("export_dir").as_deref(), Some(""));
    }

    #[test]
    fn test_list_all_covers_every_key() {
        let keys: Vec<&str> = TodozConfig::default()
            .list_all()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, TodozConfig::KEYS.to_vec());
    }
}
