use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Proxy 鍵名（資料檔中的欄位名稱）
pub const PROXY_SCHOOL_ATTENDANCE: &str = "school_attendance_perc_point";
pub const PROXY_EMPLOYMENT_RATE: &str = "employment_rate_point";
pub const PROXY_HOUSING_STABILITY: &str = "housing_stability_point";

pub const REQUIRED_PROXIES: [&str; 3] = [
    PROXY_SCHOOL_ATTENDANCE,
    PROXY_EMPLOYMENT_RATE,
    PROXY_HOUSING_STABILITY,
];

/// 資料檔裡的一個 cohort，欄位保持原始型別，交給 validator 檢查
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortRecord {
    pub id: String,
    pub name: String,
    pub cost_nzd: f64,
    pub time_series: Vec<StagePointRecord>,
    pub proxies: BTreeMap<String, ProxyRecord>,
    #[serde(default)]
    pub quotes: BTreeMap<String, Vec<QuoteRecord>>,
}

/// Proxy 原始值；非數字也要能讀進來，由 validator 回報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProxyRecord {
    Number(f64),
    Other(toml::Value),
}

impl ProxyRecord {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ProxyRecord::Number(value) => Some(*value),
            ProxyRecord::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagePointRecord {
    pub stage: String,
    pub te_haerenga: f64,
    pub whakawhanaungatanga: f64,
    pub tikanga: f64,
    pub tino_rangatiratanga: f64,
    pub sentiment: f64,
    pub school_attendance: f64,
    pub employment: f64,
    pub housing_stability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: String,
    pub theme: String,
    pub sentiment: f64,
    pub text: String,
}
