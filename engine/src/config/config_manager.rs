use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};
use crate::ConfigError;

/// Loads, validates and caches one config document.
///
/// Missing content is not an error: [`ConfigManager::get_config`] falls back to
/// `TConfig::default()` without caching it, so a file created later is picked up.
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
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.to_string()),
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
            config_serializer,
            config_content_provider,
            config: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        let mut current = self.config.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&content)?;
        config.validate()?;

        *current = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), ConfigError> {
        config.validate()?;

        let serialized = self.config_serializer.serialize(config)?;
        self.config_content_provider.set_config_content(&serialized)?;

        let mut current = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        *current = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistrySettings;

    #[derive(Default)]
    struct MemoryContentProvider {
        content: Mutex<Option<String>>,
    }

    impl MemoryContentProvider {
        fn with(content: &str) -> Self {
            Self {
                content: Mutex::new(Some(content.to_string())),
            }
        }
    }

    impl ConfigContentProvider for MemoryContentProvider {
        fn get_config_content(&self) -> Result<Option<String>, ConfigError> {
            Ok(self.content.lock().unwrap().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), ConfigError> {
            *self.content.lock().unwrap() = Some(content.to_string());
            Ok(())
        }
    }

    fn manager(
        provider: MemoryContentProvider,
    ) -> ConfigManager<MemoryContentProvider, RegistrySettings> {
        ConfigManager::new(provider, YamlConfigSerializer::new())
    }

    #[test]
    fn missing_content_yields_defaults() {
        let manager = manager(MemoryContentProvider::default());
        assert_eq!(manager.get_config().unwrap(), RegistrySettings::default());
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let manager = manager(MemoryContentProvider::with("capacity: 10\n"));
        let settings = manager.get_config().unwrap();
        assert_eq!(settings.capacity, 10);
        assert_eq!(settings.eviction_batch, RegistrySettings::default().eviction_batch);
        assert_eq!(settings.rng_seed, None);
    }

    #[test]
    fn invalid_document_is_rejected() {
        let manager = manager(MemoryContentProvider::with("capacity: 10\neviction_batch: 11\n"));
        assert!(matches!(manager.get_config(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let manager = manager(MemoryContentProvider::with("capacity: [oops\n"));
        assert!(matches!(manager.get_config(), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn set_config_persists_and_caches() {
        let manager = manager(MemoryContentProvider::default());
        let settings = RegistrySettings {
            capacity: 4,
            eviction_batch: 2,
            rng_seed: Some(9),
        };
        manager.set_config(&settings).unwrap();

        let stored = manager.config_content_provider.get_config_content().unwrap().unwrap();
        assert!(stored.contains("capacity: 4"));
        assert_eq!(manager.get_config().unwrap(), settings);
    }

    #[test]
    fn set_config_refuses_invalid_settings() {
        let manager = manager(MemoryContentProvider::default());
        let settings = RegistrySettings {
            capacity: 0,
            eviction_batch: 0,
            rng_seed: None,
        };
        assert!(manager.set_config(&settings).is_err());
        assert!(manager.config_content_provider.get_config_content().unwrap().is_none());
    }
}
