use crate::domain::model::{Quote, Stage, ThemeFilter};
use serde::Serialize;
use std::collections::BTreeMap;

/// 情緒徽章的門檻
pub const TONE_THRESHOLD: f64 = 0.25;

/// 依時間點與主題挑出要顯示的引言，保留原始順序
///
/// 該時間點沒有引言時回傳空集合，這不是錯誤。
pub fn filter_quotes<'a>(
    quotes: &'a BTreeMap<Stage, Vec<Quote>>,
    stage: Stage,
    filter: ThemeFilter,
) -> Vec<&'a Quote> {
    quotes
        .get(&stage)
        .map(|list| {
            list.iter()
                .filter(|quote| filter.matches(quote.theme()))
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteTone {
    Positive,
    Neutral,
    Negative,
}

impl QuoteTone {
    pub fn of(quote: &Quote) -> Self {
        Self::from_sentiment(quote.sentiment().value())
    }

    pub fn from_sentiment(sentiment: f64) -> Self {
        if sentiment > TONE_THRESHOLD {
            QuoteTone::Positive
        } else if sentiment < -TONE_THRESHOLD {
            QuoteTone::Negative
        } else {
            QuoteTone::Neutral
        }
    }
}

pub fn quote_count_label(count: usize) -> String {
    if count == 1 {
        "1 quote".to_string()
    } else {
        format!("{} quotes", count)
    }
}
