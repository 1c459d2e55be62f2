use crate::adapters::EmbeddedDemoProvider;
use crate::config::DashboardConfig;
use crate::core::quotes::{filter_quotes, quote_count_label};
use crate::core::series::{
    project_outcome_series, project_theme_series, OutcomeSeriesPoint, ThemeSeriesPoint,
};
use crate::core::sroi::{derive_benefits, BenefitSummary};
use crate::core::store::CohortStore;
use crate::domain::model::{Cohort, Quote, SelectionState, Stage, ThemeFilter};
use crate::domain::ports::DatasetProvider;
use crate::utils::error::{InsightError, Result};
use crate::utils::format::{format_nzd, format_point_change, format_sroi_ratio};
use crate::utils::validation::Validate;
use serde::Serialize;

/// 摘要卡片上顯示的文字
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLabels {
    pub attendance_change: String,
    pub employment_change: String,
    pub housing_change: String,
    pub benefits: String,
    pub cost: String,
    pub sroi: String,
}

impl SummaryLabels {
    pub fn from_summary(summary: &BenefitSummary) -> Self {
        Self {
            attendance_change: format_point_change(summary.delta_attendance),
            // 就業率以百分點顯示
            employment_change: format_point_change(summary.delta_employment * 100.0),
            housing_change: format_point_change(summary.delta_housing),
            benefits: format_nzd(summary.benefits),
            cost: format_nzd(summary.cost_nzd),
            sroi: format_sroi_ratio(summary.sroi),
        }
    }
}

/// 目前選取狀態下，呈現層需要的所有資料
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub cohort_id: &'a str,
    pub cohort_name: &'a str,
    pub selection: SelectionState,
    pub theme_series: Vec<ThemeSeriesPoint>,
    pub outcome_series: Vec<OutcomeSeriesPoint>,
    pub benefits: BenefitSummary,
    pub labels: SummaryLabels,
    pub quotes: Vec<&'a Quote>,
    pub quote_count: String,
}

pub struct InsightEngine {
    store: CohortStore,
    defaults: DashboardConfig,
}

impl InsightEngine {
    pub fn new(store: CohortStore, defaults: DashboardConfig) -> Self {
        Self { store, defaults }
    }

    pub fn from_provider<P: DatasetProvider + ?Sized>(provider: &P) -> Result<Self> {
        tracing::info!("📁 Loading dataset from: {}", provider.source_name());

        let config = provider.load()?;
        config.validate()?;
        let policy = config.validation_policy()?;
        let defaults = config.dashboard();
        let dataset_name = config.dataset.name.clone();

        let store = CohortStore::from_records(config.cohorts, policy)?;
        tracing::info!(
            "✅ Dataset '{}' loaded with {} cohort(s)",
            dataset_name,
            store.len()
        );

        Ok(Self::new(store, defaults))
    }

    /// 內建的 Whānau A / B 示範資料
    pub fn demo() -> Result<Self> {
        Self::from_provider(&EmbeddedDemoProvider::new())
    }

    pub fn store(&self) -> &CohortStore {
        &self.store
    }

    pub fn cohort(&self, id: &str) -> Result<&Cohort> {
        self.store
            .get(id)
            .ok_or_else(|| InsightError::UnknownCohortError { id: id.to_string() })
    }

    /// 初始選取狀態：依 [dashboard] 預設值，找不到時用第一個 cohort、Start、All
    pub fn initial_selection(&self) -> SelectionState {
        let cohort_id = self
            .defaults
            .default_cohort
            .as_deref()
            .filter(|id| self.store.get(id).is_some())
            .or_else(|| self.store.cohorts().first().map(|c| c.id()))
            .unwrap_or_default();
        let stage = self
            .defaults
            .default_stage
            .as_deref()
            .and_then(|s| s.parse::<Stage>().ok())
            .unwrap_or(Stage::Start);
        let theme_filter = self
            .defaults
            .default_theme
            .as_deref()
            .and_then(|t| t.parse::<ThemeFilter>().ok())
            .unwrap_or_default();

        SelectionState::new(cohort_id, stage, theme_filter)
    }

    pub fn view(&self, selection: &SelectionState) -> Result<DashboardView<'_>> {
        let cohort = self.cohort(selection.cohort_id())?;
        let benefits = derive_benefits(cohort);
        let quotes = filter_quotes(cohort.quotes(), selection.stage(), selection.theme_filter());

        Ok(DashboardView {
            cohort_id: cohort.id(),
            cohort_name: cohort.name(),
            selection: selection.clone(),
            theme_series: project_theme_series(cohort.time_series()),
            outcome_series: project_outcome_series(cohort.time_series()),
            labels: SummaryLabels::from_summary(&benefits),
            benefits,
            quote_count: quote_count_label(quotes.len()),
            quotes,
        })
    }
}
