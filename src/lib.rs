pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{EmbeddedDemoProvider, InMemoryProvider, TomlFileProvider};
pub use app::session::{DashboardSession, SelectionEvent};
pub use config::{DatasetConfig, ValidationPolicy};
pub use crate::core::{
    engine::{DashboardView, InsightEngine},
    sroi::{derive_benefits, BenefitSummary},
    validator::{validate_cohort, Violation},
};
pub use domain::model::{Cohort, Quote, SelectionState, Stage, Theme, ThemeFilter};
pub use domain::ports::DatasetProvider;
pub use utils::error::{InsightError, Result};
