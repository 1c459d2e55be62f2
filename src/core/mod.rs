pub mod engine;
pub mod quotes;
pub mod series;
pub mod sroi;
pub mod store;
pub mod validator;

pub use crate::domain::model::{Cohort, Quote, SelectionState, Stage, Theme, ThemeFilter};
pub use crate::domain::ports::DatasetProvider;
pub use crate::utils::error::Result;
