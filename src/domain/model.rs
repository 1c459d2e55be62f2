use crate::core::validator::{validate_cohort, Violation};
use crate::domain::record::{
    CohortRecord, ProxyRecord, QuoteRecord, StagePointRecord, PROXY_EMPLOYMENT_RATE,
    PROXY_HOUSING_STABILITY, PROXY_SCHOOL_ATTENDANCE,
};
use crate::utils::error::{InsightError, Result};
use crate::utils::validation::in_range;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} label '{label}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
}

/// 四個固定主題
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "Te Haerenga")]
    TeHaerenga,
    #[serde(rename = "Whakawhānaungatanga")]
    Whakawhanaungatanga,
    #[serde(rename = "Tikanga")]
    Tikanga,
    #[serde(rename = "Tino Rangatiratanga")]
    TinoRangatiratanga,
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::TeHaerenga,
        Theme::Whakawhanaungatanga,
        Theme::Tikanga,
        Theme::TinoRangatiratanga,
    ];

    /// Tino Rangatiratanga 是 empowerment 主題
    pub const EMPOWERMENT: Theme = Theme::TinoRangatiratanga;

    pub fn label(self) -> &'static str {
        match self {
            Theme::TeHaerenga => "Te Haerenga",
            Theme::Whakawhanaungatanga => "Whakawhānaungatanga",
            Theme::Tikanga => "Tikanga",
            Theme::TinoRangatiratanga => "Tino Rangatiratanga",
        }
    }

    /// 圖表圖例使用的名稱
    pub fn display_name(self) -> &'static str {
        match self {
            Theme::TeHaerenga => "Te Haerenga (Needs/Journey)",
            Theme::Whakawhanaungatanga => "Whakawhānaungatanga (Relationships)",
            Theme::Tikanga => "Tikanga (Service Quality Lens)",
            Theme::TinoRangatiratanga => "Tino Rangatiratanga (Empowerment)",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// 完全比對，不做大小寫或空白處理
impl FromStr for Theme {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.label() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "theme",
                label: s.to_string(),
            })
    }
}

/// 時間點：入案、期中、結案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    Start,
    Mid,
    End,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Start, Stage::Mid, Stage::End];

    pub fn label(self) -> &'static str {
        match self {
            Stage::Start => "Start",
            Stage::Mid => "Mid",
            Stage::End => "End",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.label() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "stage",
                label: s.to_string(),
            })
    }
}

/// 引言面板的主題篩選，`All` 代表不篩選
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeFilter {
    #[default]
    All,
    Only(Theme),
}

impl ThemeFilter {
    pub const ALL_LABEL: &'static str = "All";

    pub fn label(self) -> &'static str {
        match self {
            ThemeFilter::All => Self::ALL_LABEL,
            ThemeFilter::Only(theme) => theme.label(),
        }
    }

    pub fn matches(self, theme: Theme) -> bool {
        match self {
            ThemeFilter::All => true,
            ThemeFilter::Only(wanted) => wanted == theme,
        }
    }

    /// 下拉選單的選項順序
    pub fn options() -> Vec<ThemeFilter> {
        std::iter::once(ThemeFilter::All)
            .chain(Theme::ALL.into_iter().map(ThemeFilter::Only))
            .collect()
    }
}

impl fmt::Display for ThemeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThemeFilter {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == Self::ALL_LABEL {
            return Ok(ThemeFilter::All);
        }
        s.parse::<Theme>()
            .map(ThemeFilter::Only)
            .map_err(|_| ParseLabelError {
                kind: "theme filter",
                label: s.to_string(),
            })
    }
}

impl From<Theme> for ThemeFilter {
    fn from(theme: Theme) -> Self {
        ThemeFilter::Only(theme)
    }
}

impl Serialize for ThemeFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// 0–100 的主題指數
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ThemeIndex(f64);

impl ThemeIndex {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub fn new(value: f64) -> Option<Self> {
        in_range(value, Self::MIN, Self::MAX).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// -1..+1 的情緒分數
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Sentiment(f64);

impl Sentiment {
    pub const MIN: f64 = -1.0;
    pub const MAX: f64 = 1.0;

    pub fn new(value: f64) -> Option<Self> {
        in_range(value, Self::MIN, Self::MAX).then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StagePoint {
    stage: Stage,
    te_haerenga: ThemeIndex,
    whakawhanaungatanga: ThemeIndex,
    tikanga: ThemeIndex,
    tino_rangatiratanga: ThemeIndex,
    sentiment: Sentiment,
    school_attendance: f64,
    employment: f64,
    housing_stability: f64,
}

impl StagePoint {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn theme_index(&self, theme: Theme) -> ThemeIndex {
        match theme {
            Theme::TeHaerenga => self.te_haerenga,
            Theme::Whakawhanaungatanga => self.whakawhanaungatanga,
            Theme::Tikanga => self.tikanga,
            Theme::TinoRangatiratanga => self.tino_rangatiratanga,
        }
    }

    pub fn empowerment(&self) -> ThemeIndex {
        self.tino_rangatiratanga
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    /// 出席率（百分比）
    pub fn school_attendance(&self) -> f64 {
        self.school_attendance
    }

    /// 就業率（0–1 的比例）
    pub fn employment(&self) -> f64 {
        self.employment
    }

    pub fn housing_stability(&self) -> f64 {
        self.housing_stability
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    id: String,
    theme: Theme,
    sentiment: Sentiment,
    text: String,
}

impl Quote {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// 每單位成果變化的貨幣價值
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProxyValues {
    school_attendance_perc_point: f64,
    employment_rate_point: f64,
    housing_stability_point: f64,
}

impl ProxyValues {
    pub fn school_attendance_perc_point(&self) -> f64 {
        self.school_attendance_perc_point
    }

    /// 以 0.10 就業率為一單位
    pub fn employment_rate_point(&self) -> f64 {
        self.employment_rate_point
    }

    pub fn housing_stability_point(&self) -> f64 {
        self.housing_stability_point
    }
}

/// 通過驗證的 cohort，載入後不再變動
#[derive(Debug, Clone, PartialEq)]
pub struct Cohort {
    id: String,
    name: String,
    cost_nzd: f64,
    time_series: Vec<StagePoint>,
    proxies: ProxyValues,
    quotes: BTreeMap<Stage, Vec<Quote>>,
}

impl Cohort {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost_nzd(&self) -> f64 {
        self.cost_nzd
    }

    pub fn time_series(&self) -> &[StagePoint] {
        &self.time_series
    }

    /// 第一個時間點（Start）
    pub fn baseline(&self) -> &StagePoint {
        &self.time_series[0]
    }

    /// 最後一個時間點（End）
    pub fn endpoint(&self) -> &StagePoint {
        &self.time_series[self.time_series.len() - 1]
    }

    pub fn proxies(&self) -> &ProxyValues {
        &self.proxies
    }

    pub fn quotes(&self) -> &BTreeMap<Stage, Vec<Quote>> {
        &self.quotes
    }
}

impl TryFrom<CohortRecord> for Cohort {
    type Error = InsightError;

    fn try_from(record: CohortRecord) -> Result<Self> {
        let violations = validate_cohort(&record);
        if !violations.is_empty() {
            return Err(InsightError::ValidationError {
                cohort: record.id,
                violations,
            });
        }

        let reject = |violation: Violation| InsightError::ValidationError {
            cohort: record.id.clone(),
            violations: vec![violation],
        };

        let time_series = record
            .time_series
            .iter()
            .enumerate()
            .map(|(index, point)| build_stage_point(index, point))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(reject)?;

        let proxy = |key: &str| {
            record
                .proxies
                .get(key)
                .and_then(ProxyRecord::as_number)
                .ok_or_else(|| Violation::MissingProxy {
                    key: key.to_string(),
                })
        };
        let proxies = ProxyValues {
            school_attendance_perc_point: proxy(PROXY_SCHOOL_ATTENDANCE).map_err(reject)?,
            employment_rate_point: proxy(PROXY_EMPLOYMENT_RATE).map_err(reject)?,
            housing_stability_point: proxy(PROXY_HOUSING_STABILITY).map_err(reject)?,
        };

        let mut quotes = BTreeMap::new();
        for (label, list) in &record.quotes {
            let stage = label.parse::<Stage>().map_err(|_| {
                reject(Violation::UnknownQuoteStage {
                    label: label.clone(),
                })
            })?;
            let built = list
                .iter()
                .map(build_quote)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(reject)?;
            quotes.insert(stage, built);
        }

        Ok(Cohort {
            id: record.id,
            name: record.name,
            cost_nzd: record.cost_nzd,
            time_series,
            proxies,
            quotes,
        })
    }
}

fn build_stage_point(
    index: usize,
    point: &StagePointRecord,
) -> std::result::Result<StagePoint, Violation> {
    let stage = point
        .stage
        .parse::<Stage>()
        .map_err(|_| Violation::UnknownStage {
            index,
            label: point.stage.clone(),
        })?;
    let theme_index = |theme: Theme, value: f64| {
        ThemeIndex::new(value).ok_or_else(|| Violation::ThemeIndexOutOfRange {
            stage: point.stage.clone(),
            theme: theme.label().to_string(),
            value,
        })
    };

    Ok(StagePoint {
        stage,
        te_haerenga: theme_index(Theme::TeHaerenga, point.te_haerenga)?,
        whakawhanaungatanga: theme_index(Theme::Whakawhanaungatanga, point.whakawhanaungatanga)?,
        tikanga: theme_index(Theme::Tikanga, point.tikanga)?,
        tino_rangatiratanga: theme_index(Theme::TinoRangatiratanga, point.tino_rangatiratanga)?,
        sentiment: Sentiment::new(point.sentiment).ok_or_else(|| {
            Violation::SentimentOutOfRange {
                stage: point.stage.clone(),
                value: point.sentiment,
            }
        })?,
        school_attendance: point.school_attendance,
        employment: point.employment,
        housing_stability: point.housing_stability,
    })
}

fn build_quote(quote: &QuoteRecord) -> std::result::Result<Quote, Violation> {
    Ok(Quote {
        id: quote.id.clone(),
        theme: quote
            .theme
            .parse::<Theme>()
            .map_err(|_| Violation::UnknownQuoteTheme {
                quote_id: quote.id.clone(),
                theme: quote.theme.clone(),
            })?,
        sentiment: Sentiment::new(quote.sentiment).ok_or_else(|| {
            Violation::QuoteSentimentOutOfRange {
                quote_id: quote.id.clone(),
                value: quote.sentiment,
            }
        })?,
        text: quote.text.clone(),
    })
}

/// 目前的選取狀態：cohort、時間點、主題篩選
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    cohort_id: String,
    stage: Stage,
    theme_filter: ThemeFilter,
}

impl SelectionState {
    pub fn new(cohort_id: impl Into<String>, stage: Stage, theme_filter: ThemeFilter) -> Self {
        Self {
            cohort_id: cohort_id.into(),
            stage,
            theme_filter,
        }
    }

    pub fn cohort_id(&self) -> &str {
        &self.cohort_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn theme_filter(&self) -> ThemeFilter {
        self.theme_filter
    }

    pub fn set_cohort(&mut self, cohort_id: impl Into<String>) {
        self.cohort_id = cohort_id.into();
    }

    pub fn set_theme_filter(&mut self, theme_filter: ThemeFilter) {
        self.theme_filter = theme_filter;
    }

    /// 點擊長條圖：時間點與主題一起更新
    pub fn select_bar(&mut self, stage: Stage, theme: Theme) {
        self.stage = stage;
        self.theme_filter = ThemeFilter::Only(theme);
    }
}
