//! 변동성 순위.
//!
//! 일간 수익률의 표본 표준편차로 종목을 정렬합니다. 정의된 일간 수익률이
//! 2개 미만인 종목은 순위에서 제외됩니다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats::{desc_then_ticker, sample_std_dev};
use stockdash_core::{DashResult, PriceDataset, PriceRecord};

/// 변동성 순위 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityEntry {
    /// 종목 티커
    pub ticker: String,
    /// 일간 수익률 표본 표준편차
    pub stdev: f64,
    /// 사용된 관측치 수
    pub observations: usize,
}

/// 변동성 상위 `k`개 종목 (내림차순, 동률은 티커 오름차순).
pub fn rank_volatility(dataset: &PriceDataset, k: usize) -> DashResult<Vec<VolatilityEntry>> {
    dataset.ensure_not_empty()?;

    let mut entries: Vec<VolatilityEntry> = dataset
        .iter()
        .filter_map(|(ticker, records)| {
            let returns = defined_returns(records);
            match sample_std_dev(&returns) {
                Some(stdev) => Some(VolatilityEntry {
                    ticker: ticker.to_string(),
                    stdev,
                    observations: returns.len(),
                }),
                None => {
                    debug!(ticker, observations = returns.len(), "Excluded from volatility ranking");
                    None
                }
            }
        })
        .collect();

    entries.sort_by(|a, b| desc_then_ticker((a.stdev, a.ticker.as_str()), (b.stdev, b.ticker.as_str())));
    entries.truncate(k);
    Ok(entries)
}

/// 정의된 일간 수익률만 추출합니다.
pub fn defined_returns(records: &[PriceRecord]) -> Vec<f64> {
    records.iter().filter_map(|r| r.daily_return).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn dataset(series: Vec<(&str, Vec<Option<f64>>)>) -> PriceDataset {
        let records = series.into_iter().flat_map(|(ticker, returns)| {
            returns.into_iter().enumerate().map(move |(i, r)| {
                PriceRecord::new(
                    ticker,
                    NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap(),
                    dec!(10),
                    r,
                    "S",
                    dec!(0),
                )
            })
        });
        PriceDataset::from_records(records).unwrap()
    }

    #[test]
    fn test_ranking_order_and_truncation() {
        let ds = dataset(vec![
            ("CALM", vec![None, Some(0.001), Some(-0.001), Some(0.0)]),
            ("WILD", vec![None, Some(0.1), Some(-0.1), Some(0.05)]),
            ("MID", vec![None, Some(0.02), Some(-0.02), Some(0.01)]),
        ]);

        let ranked = rank_volatility(&ds, 2).unwrap();
        let tickers: Vec<&str> = ranked.iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["WILD", "MID"]);
        assert!(ranked[0].stdev > ranked[1].stdev);
        assert_eq!(ranked[0].observations, 3);
    }

    #[test]
    fn test_insufficient_observations_excluded() {
        let ds = dataset(vec![
            ("ONE", vec![None, Some(0.5)]),
            ("NONE", vec![None]),
            ("TWO", vec![None, Some(0.01), Some(0.02)]),
        ]);

        let ranked = rank_volatility(&ds, 10).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].ticker, "TWO");
    }

    #[test]
    fn test_ties_broken_by_ticker() {
        let ds = dataset(vec![
            ("ZED", vec![Some(0.1), Some(-0.1)]),
            ("ALPHA", vec![Some(0.1), Some(-0.1)]),
        ]);
        let ranked = rank_volatility(&ds, 10).unwrap();
        assert_eq!(ranked[0].ticker, "ALPHA");
        assert_eq!(ranked[1].ticker, "ZED");
    }
}
