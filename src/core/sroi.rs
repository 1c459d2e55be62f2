use crate::domain::model::Cohort;
use serde::Serialize;

/// 就業 proxy 的報價單位：每 0.10 的就業率變化
pub const EMPLOYMENT_PROXY_UNIT: f64 = 0.10;

/// 各成果換算成金額後的分項
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenefitBreakdown {
    pub attendance: f64,
    pub employment: f64,
    pub housing: f64,
}

impl BenefitBreakdown {
    pub fn total(&self) -> f64 {
        self.attendance + self.employment + self.housing
    }
}

/// Start → End 的成果變化、貨幣化效益與 SROI
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenefitSummary {
    pub delta_attendance: f64,
    pub delta_employment: f64,
    pub delta_housing: f64,
    pub breakdown: BenefitBreakdown,
    pub benefits: f64,
    pub cost_nzd: f64,
    pub sroi: f64,
}

/// 以時間序列的第一筆與最後一筆計算（不是依標籤查找）
pub fn derive_benefits(cohort: &Cohort) -> BenefitSummary {
    let start = cohort.baseline();
    let end = cohort.endpoint();
    let proxies = cohort.proxies();

    let delta_attendance = end.school_attendance() - start.school_attendance();
    let delta_employment = end.employment() - start.employment();
    let delta_housing = end.housing_stability() - start.housing_stability();

    let breakdown = BenefitBreakdown {
        attendance: delta_attendance * proxies.school_attendance_perc_point(),
        employment: (delta_employment / EMPLOYMENT_PROXY_UNIT) * proxies.employment_rate_point(),
        housing: delta_housing * proxies.housing_stability_point(),
    };
    let benefits = breakdown.total();
    // cost 已由 validator 保證 > 0
    let sroi = benefits / cohort.cost_nzd();

    tracing::debug!(
        "Derived SROI for {}: benefits={:.2}, cost={:.2}, sroi={:.4}",
        cohort.id(),
        benefits,
        cohort.cost_nzd(),
        sroi
    );

    BenefitSummary {
        delta_attendance,
        delta_employment,
        delta_housing,
        breakdown,
        benefits,
        cost_nzd: cohort.cost_nzd(),
        sroi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{CohortRecord, ProxyRecord, QuoteRecord, StagePointRecord};
    use std::collections::BTreeMap;

    fn point(stage: &str, attendance: f64, employment: f64, housing: f64) -> StagePointRecord {
        StagePointRecord {
            stage: stage.to_string(),
            te_haerenga: 50.0,
            whakawhanaungatanga: 50.0,
            tikanga: 50.0,
            tino_rangatiratanga: 50.0,
            sentiment: 0.0,
            school_attendance: attendance,
            employment,
            housing_stability: housing,
        }
    }

    fn cohort(series: Vec<StagePointRecord>, cost: f64) -> Cohort {
        cohort_with_proxies(series, cost, [350.0, 12000.0, 180.0])
    }

    fn cohort_with_proxies(
        series: Vec<StagePointRecord>,
        cost: f64,
        [attendance, employment, housing]: [f64; 3],
    ) -> Cohort {
        let proxies = BTreeMap::from([
            (
                "school_attendance_perc_point".to_string(),
                ProxyRecord::Number(attendance),
            ),
            (
                "employment_rate_point".to_string(),
                ProxyRecord::Number(employment),
            ),
            (
                "housing_stability_point".to_string(),
                ProxyRecord::Number(housing),
            ),
        ]);
        let quotes = ["Start", "Mid", "End"]
            .into_iter()
            .map(|stage| {
                (
                    stage.to_string(),
                    vec![QuoteRecord {
                        id: format!("T-{}-1", stage),
                        theme: "Tino Rangatiratanga".to_string(),
                        sentiment: 0.0,
                        text: "kia kaha".to_string(),
                    }],
                )
            })
            .collect();
        Cohort::try_from(CohortRecord {
            id: "whanauT".to_string(),
            name: "Whānau T".to_string(),
            cost_nzd: cost,
            time_series: series,
            proxies,
            quotes,
        })
        .expect("test cohort should be valid")
    }

    #[test]
    fn test_employment_is_priced_per_tenth_of_rate() {
        let c = cohort(
            vec![
                point("Start", 50.0, 0.20, 10.0),
                point("Mid", 50.0, 0.25, 10.0),
                point("End", 50.0, 0.30, 10.0),
            ],
            1000.0,
        );
        let summary = derive_benefits(&c);

        assert!((summary.delta_employment - 0.10).abs() < 1e-12);
        assert!((summary.breakdown.employment - 12000.0).abs() < 1e-6);
        assert_eq!(summary.breakdown.attendance, 0.0);
        assert_eq!(summary.breakdown.housing, 0.0);
    }

    #[test]
    fn test_uses_first_and_last_points_not_mid() {
        let c = cohort(
            vec![
                point("Start", 60.0, 0.30, 40.0),
                point("Mid", 99.0, 0.90, 99.0),
                point("End", 62.0, 0.30, 41.0),
            ],
            500.0,
        );
        let summary = derive_benefits(&c);

        assert_eq!(summary.delta_attendance, 2.0);
        assert_eq!(summary.delta_housing, 1.0);
        assert!((summary.benefits - (2.0 * 350.0 + 180.0)).abs() < 1e-9);
    }

    #[test]
    fn test_negative_deltas_reduce_benefits_without_clamping() {
        let c = cohort(
            vec![
                point("Start", 80.0, 0.50, 60.0),
                point("Mid", 75.0, 0.45, 55.0),
                point("End", 70.0, 0.50, 50.0),
            ],
            2000.0,
        );
        let summary = derive_benefits(&c);

        assert_eq!(summary.delta_attendance, -10.0);
        assert_eq!(summary.delta_housing, -10.0);
        assert!((summary.benefits - (-3500.0 - 1800.0)).abs() < 1e-9);
        assert!(summary.sroi < 0.0);
        assert!((summary.sroi - summary.benefits / 2000.0).abs() < 1e-12);
    }

    /// 三項成果都沒有退步且至少一項進步時，效益一定為正
    #[test]
    fn test_non_negative_deltas_always_give_positive_benefits() {
        let proxy_sets = [[350.0, 12000.0, 180.0], [0.5, 1.0, 0.01], [1.0e6, 3.0, 42.0]];
        let deltas = [
            (1.0, 0.0, 0.0),
            (0.0, 0.01, 0.0),
            (0.0, 0.0, 0.5),
            (16.0, 0.18, 23.0),
            (0.0, 0.0, 0.0),
        ];

        for proxies in proxy_sets {
            for (attendance, employment, housing) in deltas {
                let c = cohort_with_proxies(
                    vec![
                        point("Start", 50.0, 0.30, 20.0),
                        point("Mid", 10.0, 0.10, 5.0),
                        point("End", 50.0 + attendance, 0.30 + employment, 20.0 + housing),
                    ],
                    1000.0,
                    proxies,
                );
                let summary = derive_benefits(&c);

                if attendance > 0.0 || employment > 0.0 || housing > 0.0 {
                    assert!(
                        summary.benefits > 0.0,
                        "proxies {:?} deltas {:?} gave {}",
                        proxies,
                        (attendance, employment, housing),
                        summary.benefits
                    );
                    assert!(summary.sroi > 0.0);
                } else {
                    assert_eq!(summary.benefits, 0.0);
                }
            }
        }
    }
}
