pub mod dataset_config;

pub use dataset_config::{
    DashboardConfig, DatasetConfig, DatasetInfo, LoggingConfig, ValidationConfig,
    ValidationPolicy,
};
