use std::io::ErrorKind;

use crate::ConfigError;

pub trait ConfigContentProvider {
    /// `Ok(None)` when there is nothing stored yet.
    fn get_config_content(&self) -> Result<Option<String>, ConfigError>;
    fn set_config_content(&self, content: &str) -> Result<(), ConfigError>;
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl FileContentConfigProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, ConfigError> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read {
                path: self.file_path.clone(),
                source,
            }),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), ConfigError> {
        std::fs::write(&self.file_path, content).map_err(|source| ConfigError::Write {
            path: self.file_path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("xenotic-{}-{}.yaml", name, std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn missing_file_has_no_content() {
        let provider = FileContentConfigProvider::new(temp_path("missing"));
        assert!(provider.get_config_content().unwrap().is_none());
    }

    #[test]
    fn written_content_reads_back() {
        let path = temp_path("roundtrip");
        let provider = FileContentConfigProvider::new(path.clone());
        provider.set_config_content("capacity: 7\n").unwrap();
        assert_eq!(
            provider.get_config_content().unwrap().as_deref(),
            Some("capacity: 7\n")
        );
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn unwritable_path_reports_the_path() {
        let path = std::env::temp_dir()
            .join("xenotic-no-such-dir")
            .join("config.yaml")
            .to_string_lossy()
            .into_owned();
        let provider = FileContentConfigProvider::new(path.clone());
        match provider.set_config_content("x: 1") {
            Err(ConfigError::Write { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
