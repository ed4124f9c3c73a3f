//! 누적 수익률.
//!
//! 종목별 일간 수익률의 누적합입니다. 일간 수익률이 정의되지 않은 날짜는
//! 누적값도 정의되지 않으며, 누적합은 그 다음 정의된 값부터 이어집니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use stockdash_core::{DashResult, PriceDataset, PriceRecord};

/// 누적 수익률 포인트.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// 거래일
    pub date: NaiveDate,
    /// 누적 수익률 (정의되지 않으면 None)
    pub value: Option<f64>,
}

/// 종목 → 날짜순 누적 수익률.
pub type CumulativeReturns = BTreeMap<String, Vec<CumulativePoint>>;

/// 모든 종목의 누적 수익률을 계산합니다.
///
/// 레코드가 하나뿐인 종목은 길이 1의 정의되지 않은 시계열이 됩니다.
pub fn compute_cumulative_returns(dataset: &PriceDataset) -> DashResult<CumulativeReturns> {
    dataset.ensure_not_empty()?;

    Ok(dataset
        .iter()
        .map(|(ticker, records)| (ticker.to_string(), cumulative_series(records)))
        .collect())
}

/// 단일 종목의 누적 수익률 시계열.
pub fn cumulative_series(records: &[PriceRecord]) -> Vec<CumulativePoint> {
    let mut running = 0.0;
    records
        .iter()
        .map(|r| CumulativePoint {
            date: r.date,
            value: r.daily_return.map(|ret| {
                running += ret;
                running
            }),
        })
        .collect()
}

/// 시계열의 최대 누적 수익률. 정의된 값이 없으면 None.
pub fn max_cumulative(series: &[CumulativePoint]) -> Option<f64> {
    series
        .iter()
        .filter_map(|p| p.value)
        .max_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockdash_core::DashError;

    fn record(day: u32, ret: Option<f64>) -> PriceRecord {
        PriceRecord::new(
            "X",
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            dec!(100),
            ret,
            "IT",
            dec!(0),
        )
    }

    #[test]
    fn test_example_series() {
        // 종가 [100, 110, 99] → 일간 수익률 [None, 0.10, -0.10]
        let records = vec![record(1, None), record(2, Some(0.10)), record(3, Some(-0.10))];
        let values: Vec<Option<f64>> = cumulative_series(&records).iter().map(|p| p.value).collect();
        assert_eq!(values, vec![None, Some(0.10), Some(0.0)]);
    }

    #[test]
    fn test_single_record() {
        let series = cumulative_series(&[record(1, None)]);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value, None);
    }

    #[test]
    fn test_gap_resumes_running_sum() {
        let records = vec![
            record(1, Some(0.01)),
            record(2, None),
            record(3, Some(0.02)),
        ];
        let values: Vec<Option<f64>> = cumulative_series(&records).iter().map(|p| p.value).collect();
        assert_eq!(values, vec![Some(0.01), None, Some(0.01 + 0.02)]);
    }

    #[test]
    fn test_max_cumulative() {
        let records = vec![record(1, None), record(2, Some(0.3)), record(3, Some(-0.1))];
        assert_eq!(max_cumulative(&cumulative_series(&records)), Some(0.3));
        assert_eq!(max_cumulative(&cumulative_series(&[record(1, None)])), None);
    }

    #[test]
    fn test_empty_dataset() {
        let err = compute_cumulative_returns(&PriceDataset::default()).unwrap_err();
        assert!(matches!(err, DashError::DataUnavailable(_)));
    }
}
