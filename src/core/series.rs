use crate::domain::model::{Stage, StagePoint, Theme};
use serde::Serialize;

/// 主題圖表的一列：四個主題指數（長條）與情緒（折線）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThemeSeriesPoint {
    pub stage: Stage,
    #[serde(rename = "Te Haerenga (Needs/Journey)")]
    pub te_haerenga: f64,
    #[serde(rename = "Whakawhānaungatanga (Relationships)")]
    pub whakawhanaungatanga: f64,
    #[serde(rename = "Tikanga (Service Quality Lens)")]
    pub tikanga: f64,
    #[serde(rename = "Tino Rangatiratanga (Empowerment)")]
    pub tino_rangatiratanga: f64,
    #[serde(rename = "Sentiment (−1 to +1)")]
    pub sentiment: f64,
}

/// 成果圖表的一列，刻意不含任何主題欄位
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeSeriesPoint {
    pub stage: Stage,
    #[serde(rename = "School attendance (%)")]
    pub school_attendance: f64,
    #[serde(rename = "Employment rate (%)")]
    pub employment_rate: f64,
    #[serde(rename = "Housing stability")]
    pub housing_stability: f64,
}

pub fn project_theme_series(series: &[StagePoint]) -> Vec<ThemeSeriesPoint> {
    series
        .iter()
        .map(|point| ThemeSeriesPoint {
            stage: point.stage(),
            te_haerenga: point.theme_index(Theme::TeHaerenga).value(),
            whakawhanaungatanga: point
                .theme_index(Theme::Whakawhanaungatanga)
                .value(),
            tikanga: point.theme_index(Theme::Tikanga).value(),
            tino_rangatiratanga: point.empowerment().value(),
            sentiment: point.sentiment().value(),
        })
        .collect()
}

/// 就業率從比例換成百分比
pub fn project_outcome_series(series: &[StagePoint]) -> Vec<OutcomeSeriesPoint> {
    series
        .iter()
        .map(|point| OutcomeSeriesPoint {
            stage: point.stage(),
            school_attendance: point.school_attendance(),
            employment_rate: point.employment() * 100.0,
            housing_stability: point.housing_stability(),
        })
        .collect()
}
