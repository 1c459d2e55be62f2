use crate::config::DatasetConfig;
use crate::domain::ports::DatasetProvider;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TomlFileProvider {
    path: PathBuf,
    display: String,
}

impl TomlFileProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let display = path.display().to_string();
        Self { path, display }
    }
}

impl DatasetProvider for TomlFileProvider {
    fn source_name(&self) -> &str {
        &self.display
    }

    fn load(&self) -> Result<DatasetConfig> {
        tracing::debug!("Reading dataset file: {}", self.display);
        DatasetConfig::from_file(&self.path)
    }
}
