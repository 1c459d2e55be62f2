use crate::config::DatasetConfig;
use crate::utils::error::Result;

/// 資料來源：示範資料、檔案或外部系統都透過這個介面提供 cohort
pub trait DatasetProvider: Send + Sync {
    fn source_name(&self) -> &str;
    fn load(&self) -> Result<DatasetConfig>;
}
