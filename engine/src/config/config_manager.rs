use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates and caches a config value behind a content provider.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Mutex::new(None),
            config_content_provider,
            config_serializer,
        }
    }

    fn cache(&self) -> MutexGuard<'_, Option<TConfig>> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached config, loading it on first use. A missing file
    /// yields the default config without caching it.
    pub fn get_config(&self) -> Result<TConfig, String> {
        let mut current = self.cache();

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        *self.cache() = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct TestConfig {
        size: u32,
    }

    impl Validate for TestConfig {
        fn validate(&self) -> Result<(), String> {
            if self.size > 10 {
                return Err("size must not exceed 10".to_string());
            }
            Ok(())
        }
    }

    struct MemoryContentProvider {
        content: RefCell<Option<String>>,
        reads: RefCell<usize>,
    }

    impl ConfigContentProvider for MemoryContentProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            *self.reads.borrow_mut() += 1;
            Ok(self.content.borrow().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.borrow_mut() = Some(content.to_string());
            Ok(())
        }
    }

    fn manager_with(content: Option<&str>) -> ConfigManager<MemoryContentProvider, TestConfig> {
        let provider = MemoryContentProvider {
            content: RefCell::new(content.map(str::to_string)),
            reads: RefCell::new(0),
        };
        ConfigManager::new(provider, YamlConfigSerializer::new())
    }

    #[test]
    fn test_missing_content_returns_default() {
        let manager = manager_with(None);
        assert_eq!(manager.get_config(), Ok(TestConfig::default()));
    }

    #[test]
    fn test_loaded_config_is_cached() {
        let manager = manager_with(Some("size: 3\n"));
        assert_eq!(manager.get_config(), Ok(TestConfig { size: 3 }));
        assert_eq!(manager.get_config(), Ok(TestConfig { size: 3 }));
        assert_eq!(*manager.config_content_provider.reads.borrow(), 1);
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        let manager = manager_with(Some("size: 11\n"));
        let result = manager.get_config();
        assert!(result.unwrap_err().starts_with("Config validation error"));
    }

    #[test]
    fn test_malformed_content_is_rejected() {
        let manager = manager_with(Some("size: [oops"));
        let result = manager.get_config();
        assert!(result.unwrap_err().starts_with("Failed to deserialize config"));
    }

    #[test]
    fn test_set_config_persists_and_caches() {
        let manager = manager_with(None);
        assert!(manager.set_config(&TestConfig { size: 7 }).is_ok());
        assert_eq!(manager.get_config(), Ok(TestConfig { size: 7 }));
        assert_eq!(*manager.config_content_provider.reads.borrow(), 0);

        let stored = manager.config_content_provider.content.borrow().clone().unwrap();
        assert!(stored.contains("size: 7"));
    }

    #[test]
    fn test_set_invalid_config_is_rejected() {
        let manager = manager_with(None);
        assert!(manager.set_config(&TestConfig { size: 99 }).is_err());
        assert!(manager.config_content_provider.content.borrow().is_none());
    }
}
