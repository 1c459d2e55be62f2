use crate::config::ValidationPolicy;
use crate::domain::model::Cohort;
use crate::domain::record::CohortRecord;
use crate::utils::error::{InsightError, Result};

/// 唯讀的 cohort 集合，載入後不再變動
#[derive(Debug, Clone)]
pub struct CohortStore {
    cohorts: Vec<Cohort>,
}

impl CohortStore {
    pub fn from_records(records: Vec<CohortRecord>, policy: ValidationPolicy) -> Result<Self> {
        let total = records.len();
        let mut cohorts = Vec::with_capacity(total);

        for record in records {
            match Cohort::try_from(record) {
                Ok(cohort) => cohorts.push(cohort),
                Err(InsightError::ValidationError { cohort, violations })
                    if policy == ValidationPolicy::SkipInvalid =>
                {
                    for violation in &violations {
                        tracing::warn!("⚠️ Cohort '{}': {}", cohort, violation);
                    }
                    tracing::warn!(
                        "Skipping cohort '{}' ({} violation(s))",
                        cohort,
                        violations.len()
                    );
                }
                Err(e) => return Err(e),
            }
        }

        if cohorts.is_empty() {
            return Err(InsightError::EmptyDatasetError);
        }

        tracing::debug!("Accepted {} of {} cohort(s)", cohorts.len(), total);
        Ok(Self { cohorts })
    }

    pub fn get(&self, id: &str) -> Option<&Cohort> {
        self.cohorts.iter().find(|cohort| cohort.id() == id)
    }

    pub fn cohorts(&self) -> &[Cohort] {
        &self.cohorts
    }

    /// 下拉選單用：(id, 顯示名稱)
    pub fn options(&self) -> Vec<(&str, &str)> {
        self.cohorts.iter().map(|c| (c.id(), c.name())).collect()
    }

    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }
}
