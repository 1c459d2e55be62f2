use crate::config::DatasetConfig;
use crate::domain::ports::DatasetProvider;
use crate::utils::error::Result;

const DEMO_DATASET: &str = include_str!("../../data/whanau_demo.toml");

/// 編譯進程式的 Whānau A / Whānau B 示範資料
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedDemoProvider;

impl EmbeddedDemoProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn raw_toml(&self) -> &'static str {
        DEMO_DATASET
    }
}

impl DatasetProvider for EmbeddedDemoProvider {
    fn source_name(&self) -> &str {
        "embedded demo dataset"
    }

    fn load(&self) -> Result<DatasetConfig> {
        DatasetConfig::from_toml_str(DEMO_DATASET)
    }
}
