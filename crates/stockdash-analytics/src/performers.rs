//! 누적 수익률 상위 종목.

use serde::{Deserialize, Serialize};

use crate::cumulative::{max_cumulative, CumulativeReturns};
use crate::stats::desc_then_ticker;
use stockdash_core::{DashError, DashResult};

/// 상위 종목 항목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformerEntry {
    /// 종목 티커
    pub ticker: String,
    /// 기간 중 최대 누적 수익률
    pub max_cumulative_return: f64,
}

/// 최대 누적 수익률 기준 상위 `k`개 종목의 티커.
///
/// 누적 수익률이 전혀 정의되지 않은 종목은 순위에 포함되지 않습니다.
pub fn top_performers(cumulative: &CumulativeReturns, k: usize) -> DashResult<Vec<String>> {
    Ok(rank_performers(cumulative, k)?
        .into_iter()
        .map(|e| e.ticker)
        .collect())
}

/// 상위 `k`개 종목과 최대 누적 수익률 (내림차순, 동률은 티커 오름차순).
pub fn rank_performers(cumulative: &CumulativeReturns, k: usize) -> DashResult<Vec<PerformerEntry>> {
    if cumulative.is_empty() {
        return Err(DashError::empty_dataset());
    }

    let mut entries: Vec<PerformerEntry> = cumulative
        .iter()
        .filter_map(|(ticker, series)| {
            max_cumulative(series).map(|max| PerformerEntry {
                ticker: ticker.clone(),
                max_cumulative_return: max,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        desc_then_ticker(
            (a.max_cumulative_return, a.ticker.as_str()),
            (b.max_cumulative_return, b.ticker.as_str()),
        )
    });
    entries.truncate(k);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cumulative::CumulativePoint;
    use chrono::NaiveDate;

    fn series(values: &[Option<f64>]) -> Vec<CumulativePoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| CumulativePoint {
                date: NaiveDate::from_ymd_opt(2024, 2, 1 + i as u32).unwrap(),
                value: *v,
            })
            .collect()
    }

    fn sample() -> CumulativeReturns {
        let mut map = CumulativeReturns::new();
        map.insert("A".to_string(), series(&[None, Some(0.1), Some(0.05)]));
        map.insert("B".to_string(), series(&[None, Some(0.3), Some(-0.2)]));
        map.insert("C".to_string(), series(&[None, Some(0.1)]));
        map.insert("D".to_string(), series(&[None]));
        map
    }

    #[test]
    fn test_top_performers_order() {
        let top = top_performers(&sample(), 5).unwrap();
        // D는 정의된 값이 없어 제외, A와 C는 동률이므로 티커순
        assert_eq!(top, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_truncation() {
        let top = rank_performers(&sample(), 1).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].ticker, "B");
        assert!((top[0].max_cumulative_return - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            top_performers(&CumulativeReturns::new(), 5),
            Err(DashError::DataUnavailable(_))
        ));
    }
}
