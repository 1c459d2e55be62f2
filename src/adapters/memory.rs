use crate::config::DatasetConfig;
use crate::domain::ports::DatasetProvider;
use crate::utils::error::Result;

/// 已經組好的資料集，方便替換成真實資料或測試資料
#[derive(Debug, Clone)]
pub struct InMemoryProvider {
    config: DatasetConfig,
}

impl InMemoryProvider {
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }
}

impl DatasetProvider for InMemoryProvider {
    fn source_name(&self) -> &str {
        &self.config.dataset.name
    }

    fn load(&self) -> Result<DatasetConfig> {
        Ok(self.config.clone())
    }
}
