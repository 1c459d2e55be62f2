use crate::domain::model::{Stage, ThemeFilter};
use crate::domain::record::CohortRecord;
use crate::utils::error::{InsightError, Result};
use crate::utils::logger::init_logger;
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_unique, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub dataset: DatasetInfo,
    pub dashboard: Option<DashboardConfig>,
    pub validation: Option<ValidationConfig>,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub cohorts: Vec<CohortRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub default_cohort: Option<String>,
    pub default_stage: Option<String>,
    pub default_theme: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub policy: Option<String>, // "strict" or "skip_invalid"
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>, // "compact" or "json"
}

/// 遇到不合格 cohort 時的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// 任何違規都讓整份資料載入失敗
    #[default]
    Strict,
    /// 記錄警告並略過該 cohort
    SkipInvalid,
}

impl ValidationPolicy {
    pub const LABELS: [&'static str; 2] = ["strict", "skip_invalid"];

    pub fn from_label(label: &str) -> Result<Self> {
        match label {
            "strict" => Ok(ValidationPolicy::Strict),
            "skip_invalid" => Ok(ValidationPolicy::SkipInvalid),
            other => Err(InsightError::InvalidConfigValueError {
                field: "validation.policy".to_string(),
                value: other.to_string(),
                reason: format!("Valid policies: {}", Self::LABELS.join(", ")),
            }),
        }
    }
}

pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];

impl DatasetConfig {
    /// 從 TOML 檔案載入資料集
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(InsightError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析資料集
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| InsightError::ConfigParseError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COHORT_A_COST})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| InsightError::ConfigParseError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證資料集層級的設定（個別 cohort 的內容由 validator 負責）
    pub fn validate_config(&self) -> Result<()> {
        if self.cohorts.is_empty() {
            return Err(InsightError::EmptyDatasetError);
        }

        for cohort in &self.cohorts {
            validate_non_empty_string("cohorts.id", &cohort.id)?;
            validate_non_empty_string("cohorts.name", &cohort.name)?;
        }
        validate_unique("cohorts.id", self.cohorts.iter().map(|c| c.id.as_str()))?;

        if let Some(policy) = self.validation.as_ref().and_then(|v| v.policy.as_deref()) {
            validate_one_of("validation.policy", policy, &ValidationPolicy::LABELS)?;
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            validate_one_of("logging.format", format, &LOG_FORMATS)?;
        }

        if let Some(dashboard) = &self.dashboard {
            if let Some(cohort) = &dashboard.default_cohort {
                let known: Vec<&str> = self.cohorts.iter().map(|c| c.id.as_str()).collect();
                validate_one_of("dashboard.default_cohort", cohort, &known)?;
            }
            if let Some(stage) = &dashboard.default_stage {
                stage.parse::<Stage>().map_err(|e| invalid("dashboard.default_stage", stage, e))?;
            }
            if let Some(theme) = &dashboard.default_theme {
                theme
                    .parse::<ThemeFilter>()
                    .map_err(|e| invalid("dashboard.default_theme", theme, e))?;
            }
        }

        Ok(())
    }

    pub fn validation_policy(&self) -> Result<ValidationPolicy> {
        match self.validation.as_ref().and_then(|v| v.policy.as_deref()) {
            Some(label) => ValidationPolicy::from_label(label),
            None => Ok(ValidationPolicy::default()),
        }
    }

    pub fn dashboard(&self) -> DashboardConfig {
        self.dashboard.clone().unwrap_or_default()
    }

    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }

    /// 用 [logging] 區段初始化 tracing；已初始化過時回傳 false
    pub fn init_logging(&self) -> bool {
        init_logger(&self.logging())
    }
}

fn invalid(field: &str, value: &str, reason: impl std::fmt::Display) -> InsightError {
    InsightError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl Validate for DatasetConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
