//! Cohort record checks.
//!
//! Every rule is evaluated independently so a single pass reports all of a
//! record's problems at once. A record with no violations can be turned into a
//! [`Cohort`](crate::domain::model::Cohort).

use crate::domain::model::{Sentiment, Stage, Theme, ThemeIndex};
use crate::domain::record::{CohortRecord, ProxyRecord, StagePointRecord, REQUIRED_PROXIES};
use crate::utils::validation::in_range;
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;

pub const MIN_STAGES: usize = 3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("time series has {found} stage(s); at least 3 are required")]
    TooFewStages { found: usize },

    #[error("first stage must be 'Start', found '{found}'")]
    FirstStageNotStart { found: String },

    #[error("last stage must be 'End', found '{found}'")]
    LastStageNotEnd { found: String },

    #[error("unknown stage label '{label}' at position {index}")]
    UnknownStage { index: usize, label: String },

    #[error("stage '{label}' at position {index} is out of chronological order")]
    StageOutOfOrder { index: usize, label: String },

    #[error("stage '{label}' appears {count} times; it must appear exactly once")]
    RepeatedBoundaryStage { label: String, count: usize },

    #[error("{theme} index {value} at stage '{stage}' is outside [0, 100]")]
    ThemeIndexOutOfRange {
        stage: String,
        theme: String,
        value: f64,
    },

    #[error("sentiment {value} at stage '{stage}' is outside [-1, 1]")]
    SentimentOutOfRange { stage: String, value: f64 },

    #[error("{field} {value} at stage '{stage}' is outside {range}")]
    OutcomeOutOfRange {
        stage: String,
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("empowerment index decreased from {from} at '{from_stage}' to {to} at '{to_stage}'")]
    EmpowermentDecreased {
        from_stage: String,
        to_stage: String,
        from: f64,
        to: f64,
    },

    #[error("proxy '{key}' is missing")]
    MissingProxy { key: String },

    #[error("proxy '{key}' must be a number, found a {found}")]
    NonNumericProxy { key: String, found: String },

    #[error("proxy '{key}' must be a finite number, found {value}")]
    NonFiniteProxy { key: String, value: f64 },

    #[error("proxy '{key}' must be greater than zero, found {value}")]
    NonPositiveProxy { key: String, value: f64 },

    #[error("programme cost must be a positive finite amount, found {value}")]
    InvalidCost { value: f64 },

    #[error("quote '{quote_id}' has unknown theme '{theme}'")]
    UnknownQuoteTheme { quote_id: String, theme: String },

    #[error("quote '{quote_id}' sentiment {value} is outside [-1, 1]")]
    QuoteSentimentOutOfRange { quote_id: String, value: f64 },

    #[error("quote id '{quote_id}' is used more than once")]
    DuplicateQuoteId { quote_id: String },

    #[error("quotes are keyed by unknown stage '{label}'")]
    UnknownQuoteStage { label: String },

    #[error("stage '{stage}' has no quotes")]
    EmptyQuoteStage { stage: String },

    #[error("stage '{stage}' has no Tino Rangatiratanga quote")]
    MissingEmpowermentQuote { stage: String },
}

/// 檢查一個 cohort，回傳所有違規（空 = 有效）
pub fn validate_cohort(record: &CohortRecord) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_cost(record.cost_nzd, &mut violations);
    check_stage_sequence(&record.time_series, &mut violations);
    for point in &record.time_series {
        check_stage_point(point, &mut violations);
    }
    check_empowerment_trend(&record.time_series, &mut violations);
    check_proxies(record, &mut violations);
    check_quotes(record, &mut violations);

    violations
}

fn check_cost(cost: f64, violations: &mut Vec<Violation>) {
    if !(cost.is_finite() && cost > 0.0) {
        violations.push(Violation::InvalidCost { value: cost });
    }
}

fn check_stage_sequence(series: &[StagePointRecord], violations: &mut Vec<Violation>) {
    if series.len() < MIN_STAGES {
        violations.push(Violation::TooFewStages {
            found: series.len(),
        });
    }

    if let Some(first) = series.first() {
        if first.stage != Stage::Start.label() {
            violations.push(Violation::FirstStageNotStart {
                found: first.stage.clone(),
            });
        }
    }
    if let Some(last) = series.last() {
        if last.stage != Stage::End.label() {
            violations.push(Violation::LastStageNotEnd {
                found: last.stage.clone(),
            });
        }
    }

    let mut previous: Option<Stage> = None;
    let mut counts: HashMap<Stage, usize> = HashMap::new();
    for (index, point) in series.iter().enumerate() {
        let Ok(stage) = point.stage.parse::<Stage>() else {
            violations.push(Violation::UnknownStage {
                index,
                label: point.stage.clone(),
            });
            continue;
        };
        if previous.is_some_and(|prev| stage < prev) {
            violations.push(Violation::StageOutOfOrder {
                index,
                label: point.stage.clone(),
            });
        }
        previous = Some(stage);
        *counts.entry(stage).or_default() += 1;
    }

    for boundary in [Stage::Start, Stage::End] {
        let count = counts.get(&boundary).copied().unwrap_or(0);
        if count > 1 {
            violations.push(Violation::RepeatedBoundaryStage {
                label: boundary.label().to_string(),
                count,
            });
        }
    }
}

fn check_stage_point(point: &StagePointRecord, violations: &mut Vec<Violation>) {
    let indices = [
        (Theme::TeHaerenga, point.te_haerenga),
        (Theme::Whakawhanaungatanga, point.whakawhanaungatanga),
        (Theme::Tikanga, point.tikanga),
        (Theme::TinoRangatiratanga, point.tino_rangatiratanga),
    ];
    for (theme, value) in indices {
        if ThemeIndex::new(value).is_none() {
            violations.push(Violation::ThemeIndexOutOfRange {
                stage: point.stage.clone(),
                theme: theme.label().to_string(),
                value,
            });
        }
    }

    if Sentiment::new(point.sentiment).is_none() {
        violations.push(Violation::SentimentOutOfRange {
            stage: point.stage.clone(),
            value: point.sentiment,
        });
    }

    if !in_range(point.school_attendance, 0.0, 100.0) {
        violations.push(Violation::OutcomeOutOfRange {
            stage: point.stage.clone(),
            field: "school attendance",
            value: point.school_attendance,
            range: "[0, 100]",
        });
    }
    if !in_range(point.employment, 0.0, 1.0) {
        violations.push(Violation::OutcomeOutOfRange {
            stage: point.stage.clone(),
            field: "employment rate",
            value: point.employment,
            range: "[0, 1]",
        });
    }
    if !point.housing_stability.is_finite() {
        violations.push(Violation::OutcomeOutOfRange {
            stage: point.stage.clone(),
            field: "housing stability",
            value: point.housing_stability,
            range: "the finite numbers",
        });
    }
}

fn check_empowerment_trend(series: &[StagePointRecord], violations: &mut Vec<Violation>) {
    for pair in series.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);
        if after.tino_rangatiratanga < before.tino_rangatiratanga {
            violations.push(Violation::EmpowermentDecreased {
                from_stage: before.stage.clone(),
                to_stage: after.stage.clone(),
                from: before.tino_rangatiratanga,
                to: after.tino_rangatiratanga,
            });
        }
    }
}

fn check_proxies(record: &CohortRecord, violations: &mut Vec<Violation>) {
    for key in REQUIRED_PROXIES {
        match record.proxies.get(key) {
            None => violations.push(Violation::MissingProxy {
                key: key.to_string(),
            }),
            Some(ProxyRecord::Other(value)) => violations.push(Violation::NonNumericProxy {
                key: key.to_string(),
                found: value.type_str().to_string(),
            }),
            Some(ProxyRecord::Number(value)) if !value.is_finite() => {
                violations.push(Violation::NonFiniteProxy {
                    key: key.to_string(),
                    value: *value,
                })
            }
            // 每單位改善的貨幣價值，必須為正
            Some(ProxyRecord::Number(value)) if *value <= 0.0 => {
                violations.push(Violation::NonPositiveProxy {
                    key: key.to_string(),
                    value: *value,
                })
            }
            Some(ProxyRecord::Number(_)) => {}
        }
    }
}

fn check_quotes(record: &CohortRecord, violations: &mut Vec<Violation>) {
    let mut seen_ids = HashSet::new();

    // 時間序列裡的每個時間點都要有引言
    let stages: BTreeSet<Stage> = record
        .time_series
        .iter()
        .filter_map(|point| point.stage.parse::<Stage>().ok())
        .collect();
    for stage in stages {
        if !record.quotes.contains_key(stage.label()) {
            violations.push(Violation::EmptyQuoteStage {
                stage: stage.label().to_string(),
            });
        }
    }

    for (label, quotes) in &record.quotes {
        if label.parse::<Stage>().is_err() {
            violations.push(Violation::UnknownQuoteStage {
                label: label.clone(),
            });
        }

        if quotes.is_empty() {
            violations.push(Violation::EmptyQuoteStage {
                stage: label.clone(),
            });
        } else if !quotes
            .iter()
            .any(|quote| quote.theme == Theme::EMPOWERMENT.label())
        {
            violations.push(Violation::MissingEmpowermentQuote {
                stage: label.clone(),
            });
        }

        for quote in quotes {
            if quote.theme.parse::<Theme>().is_err() {
                violations.push(Violation::UnknownQuoteTheme {
                    quote_id: quote.id.clone(),
                    theme: quote.theme.clone(),
                });
            }
            if Sentiment::new(quote.sentiment).is_none() {
                violations.push(Violation::QuoteSentimentOutOfRange {
                    quote_id: quote.id.clone(),
                    value: quote.sentiment,
                });
            }
            if !seen_ids.insert(quote.id.as_str()) {
                violations.push(Violation::DuplicateQuoteId {
                    quote_id: quote.id.clone(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::QuoteRecord;
    use std::collections::BTreeMap;

    fn point(stage: &str, tino: f64) -> StagePointRecord {
        StagePointRecord {
            stage: stage.to_string(),
            te_haerenga: 50.0,
            whakawhanaungatanga: 50.0,
            tikanga: 50.0,
            tino_rangatiratanga: tino,
            sentiment: 0.0,
            school_attendance: 70.0,
            employment: 0.4,
            housing_stability: 50.0,
        }
    }

    fn quote(id: &str, theme: &str) -> QuoteRecord {
        QuoteRecord {
            id: id.to_string(),
            theme: theme.to_string(),
            sentiment: 0.1,
            text: "kōrero".to_string(),
        }
    }

    fn valid_record() -> CohortRecord {
        let mut proxies = BTreeMap::new();
        for key in REQUIRED_PROXIES {
            proxies.insert(key.to_string(), ProxyRecord::Number(100.0));
        }
        let mut quotes = BTreeMap::new();
        quotes.insert(
            "Start".to_string(),
            vec![quote("S-1", "Tikanga"), quote("S-2", "Tino Rangatiratanga")],
        );
        quotes.insert("Mid".to_string(), vec![quote("M-1", "Tino Rangatiratanga")]);
        quotes.insert("End".to_string(), vec![quote("E-1", "Tino Rangatiratanga")]);
        CohortRecord {
            id: "whanauT".to_string(),
            name: "Whānau T".to_string(),
            cost_nzd: 1000.0,
            time_series: vec![point("Start", 30.0), point("Mid", 40.0), point("End", 40.0)],
            proxies,
            quotes,
        }
    }

    #[test]
    fn test_valid_record_has_no_violations() {
        assert!(validate_cohort(&valid_record()).is_empty());
    }

    #[test]
    fn test_short_series_with_wrong_boundaries() {
        let mut record = valid_record();
        record.time_series = vec![point("Mid", 30.0), point("Mid", 40.0)];

        let violations = validate_cohort(&record);
        assert!(violations.contains(&Violation::TooFewStages { found: 2 }));
        assert!(violations.contains(&Violation::FirstStageNotStart {
            found: "Mid".to_string()
        }));
        assert!(violations.contains(&Violation::LastStageNotEnd {
            found: "Mid".to_string()
        }));
    }

    #[test]
    fn test_stage_order_and_unknown_labels() {
        let mut record = valid_record();
        record.time_series = vec![
            point("Start", 30.0),
            point("End", 30.0),
            point("Mid", 30.0),
            point("Later", 30.0),
            point("End", 30.0),
        ];

        let violations = validate_cohort(&record);
        assert!(violations.contains(&Violation::StageOutOfOrder {
            index: 2,
            label: "Mid".to_string()
        }));
        assert!(violations.contains(&Violation::UnknownStage {
            index: 3,
            label: "Later".to_string()
        }));
        assert!(violations.contains(&Violation::RepeatedBoundaryStage {
            label: "End".to_string(),
            count: 2
        }));
    }

    #[test]
    fn test_empowerment_must_not_decrease() {
        let mut record = valid_record();
        record.time_series[2].tino_rangatiratanga = 35.0;

        let violations = validate_cohort(&record);
        assert_eq!(
            violations,
            vec![Violation::EmpowermentDecreased {
                from_stage: "Mid".to_string(),
                to_stage: "End".to_string(),
                from: 40.0,
                to: 35.0,
            }]
        );
    }

    #[test]
    fn test_reports_every_range_problem_at_once() {
        let mut record = valid_record();
        record.cost_nzd = 0.0;
        record.time_series[0].tikanga = 120.0;
        record.time_series[1].sentiment = -1.5;
        record.time_series[1].employment = 35.0;
        record.proxies.remove("housing_stability_point");
        record
            .proxies
            .insert("employment_rate_point".to_string(), ProxyRecord::Number(f64::NAN));

        let violations = validate_cohort(&record);
        assert_eq!(violations.len(), 6);
        assert!(violations.contains(&Violation::InvalidCost { value: 0.0 }));
        assert!(violations.contains(&Violation::MissingProxy {
            key: "housing_stability_point".to_string()
        }));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::NonFiniteProxy { key, .. } if key == "employment_rate_point")));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::ThemeIndexOutOfRange { theme, .. } if theme == "Tikanga")));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::SentimentOutOfRange { stage, .. } if stage == "Mid")));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::OutcomeOutOfRange { field, .. } if *field == "employment rate")));
    }

    #[test]
    fn test_quote_rules() {
        let mut record = valid_record();
        record.quotes.insert("Mid".to_string(), vec![]);
        record.quotes.insert(
            "End".to_string(),
            vec![quote("S-1", "Manaakitanga"), quote("E-2", "tikanga")],
        );
        record
            .quotes
            .insert("Follow-up".to_string(), vec![quote("F-1", "Tino Rangatiratanga")]);

        let violations = validate_cohort(&record);
        assert!(violations.contains(&Violation::EmptyQuoteStage {
            stage: "Mid".to_string()
        }));
        assert!(violations.contains(&Violation::MissingEmpowermentQuote {
            stage: "End".to_string()
        }));
        assert!(violations.contains(&Violation::UnknownQuoteTheme {
            quote_id: "S-1".to_string(),
            theme: "Manaakitanga".to_string()
        }));
        assert!(violations.contains(&Violation::UnknownQuoteTheme {
            quote_id: "E-2".to_string(),
            theme: "tikanga".to_string()
        }));
        assert!(violations.contains(&Violation::DuplicateQuoteId {
            quote_id: "S-1".to_string()
        }));
        assert!(violations.contains(&Violation::UnknownQuoteStage {
            label: "Follow-up".to_string()
        }));
        // 空的 Mid 只報一次，不重複報缺少 empowerment 引言
        assert!(!violations.contains(&Violation::MissingEmpowermentQuote {
            stage: "Mid".to_string()
        }));
    }

    #[test]
    fn test_every_stage_needs_quotes() {
        let mut record = valid_record();
        record.quotes.remove("Mid");
        record.quotes.remove("End");

        assert_eq!(
            validate_cohort(&record),
            vec![
                Violation::EmptyQuoteStage {
                    stage: "Mid".to_string()
                },
                Violation::EmptyQuoteStage {
                    stage: "End".to_string()
                },
            ]
        );

        record.quotes.clear();
        let violations = validate_cohort(&record);
        assert_eq!(violations.len(), 3);
        for stage in Stage::ALL {
            assert!(violations.contains(&Violation::EmptyQuoteStage {
                stage: stage.label().to_string()
            }));
        }
    }

    #[test]
    fn test_repeated_mid_needs_quotes_only_once() {
        let mut record = valid_record();
        record.time_series.insert(2, point("Mid", 40.0));
        assert!(validate_cohort(&record).is_empty());

        record.quotes.remove("Mid");
        assert_eq!(
            validate_cohort(&record),
            vec![Violation::EmptyQuoteStage {
                stage: "Mid".to_string()
            }]
        );
    }

    #[test]
    fn test_proxies_must_be_positive_numbers() {
        let mut record = valid_record();
        record
            .proxies
            .insert("school_attendance_perc_point".to_string(), ProxyRecord::Number(0.0));
        record
            .proxies
            .insert("employment_rate_point".to_string(), ProxyRecord::Number(-1.0));
        record.proxies.insert(
            "housing_stability_point".to_string(),
            ProxyRecord::Other(toml::Value::String("180".to_string())),
        );

        assert_eq!(
            validate_cohort(&record),
            vec![
                Violation::NonPositiveProxy {
                    key: "school_attendance_perc_point".to_string(),
                    value: 0.0,
                },
                Violation::NonPositiveProxy {
                    key: "employment_rate_point".to_string(),
                    value: -1.0,
                },
                Violation::NonNumericProxy {
                    key: "housing_stability_point".to_string(),
                    found: "string".to_string(),
                },
            ]
        );
    }
}
