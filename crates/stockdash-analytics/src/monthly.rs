//! 월별 상승/하락 종목.
//!
//! (종목, 월) 단위로 일간 수익률을 합산한 뒤, 월마다 독립적으로
//! 합계 상위 N개(상승)와 하위 N개(하락)를 고릅니다.
//!
//! 동률은 티커 오름차순으로 정렬합니다. 하락 종목은 상승 순서의 하위 N개이므로
//! 한 달의 종목 수가 2N 이상이면 두 목록은 겹치지 않습니다.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats::{asc_then_ticker, desc_then_ticker};
use stockdash_core::{DashResult, PriceDataset, YearMonth};

/// 월별 기본 선택 개수.
pub const DEFAULT_MONTHLY_TOP_N: usize = 5;

/// (종목, 월) 수익률 합계.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    /// 종목 티커
    pub ticker: String,
    /// 연-월
    pub month: YearMonth,
    /// 해당 월 일간 수익률 합계
    pub total_return: f64,
}

/// 한 달의 상승/하락 상위 종목.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyMovers {
    /// 연-월
    pub month: YearMonth,
    /// 합계 내림차순 상위
    pub gainers: Vec<MonthlyReturn>,
    /// 합계 오름차순 상위
    pub losers: Vec<MonthlyReturn>,
}

/// (종목, 월)별 일간 수익률 합계 테이블.
///
/// 정의되지 않은 일간 수익률은 건너뛰며, 정의된 값이 없는 그룹의 합은 0입니다.
/// 결과는 티커, 월 순으로 정렬됩니다.
pub fn monthly_returns(dataset: &PriceDataset) -> DashResult<Vec<MonthlyReturn>> {
    dataset.ensure_not_empty()?;

    let mut out = Vec::new();
    for (ticker, records) in dataset.iter() {
        let mut sums: BTreeMap<YearMonth, f64> = BTreeMap::new();
        for r in records {
            *sums.entry(r.month()).or_insert(0.0) += r.daily_return.unwrap_or(0.0);
        }
        out.extend(sums.into_iter().map(|(month, total_return)| MonthlyReturn {
            ticker: ticker.to_string(),
            month,
            total_return,
        }));
    }
    Ok(out)
}

/// 월별 상승/하락 상위 5개 종목.
pub fn monthly_gainers_losers(dataset: &PriceDataset) -> DashResult<Vec<MonthlyMovers>> {
    monthly_gainers_losers_n(dataset, DEFAULT_MONTHLY_TOP_N)
}

/// 월별 상승/하락 상위 `n`개 종목. 월 오름차순으로 반환합니다.
pub fn monthly_gainers_losers_n(dataset: &PriceDataset, n: usize) -> DashResult<Vec<MonthlyMovers>> {
    let table = monthly_returns(dataset)?;

    let mut by_month: BTreeMap<YearMonth, Vec<MonthlyReturn>> = BTreeMap::new();
    for row in table {
        by_month.entry(row.month).or_default().push(row);
    }

    Ok(by_month
        .into_iter()
        .map(|(month, mut rows)| {
            rows.sort_by(|a, b| {
                desc_then_ticker(
                    (a.total_return, a.ticker.as_str()),
                    (b.total_return, b.ticker.as_str()),
                )
            });

            // 하락 종목은 같은 순서의 하위 n개: 종목 수가 2n 이상이면 상승 종목과 겹치지 않음
            let mut losers = rows[rows.len().saturating_sub(n)..].to_vec();
            losers.sort_by(|a, b| {
                asc_then_ticker(
                    (a.total_return, a.ticker.as_str()),
                    (b.total_return, b.ticker.as_str()),
                )
            });

            let mut gainers = rows;
            gainers.truncate(n);

            MonthlyMovers {
                month,
                gainers,
                losers,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use stockdash_core::PriceRecord;

    fn rec(ticker: &str, month: u32, day: u32, ret: Option<f64>) -> PriceRecord {
        PriceRecord::new(
            ticker,
            NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            dec!(100),
            ret,
            "S",
            dec!(0),
        )
    }

    #[test]
    fn test_monthly_sums() {
        let ds = PriceDataset::from_records(vec![
            rec("A", 1, 30, None),
            rec("A", 1, 31, Some(0.02)),
            rec("A", 2, 1, Some(0.01)),
            rec("A", 2, 2, Some(0.03)),
            rec("B", 2, 1, None),
        ])
        .unwrap();

        let table = monthly_returns(&ds).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].month.to_string(), "2024-01");
        assert!((table[0].total_return - 0.02).abs() < 1e-12);
        assert!((table[1].total_return - 0.04).abs() < 1e-12);
        // 정의된 값이 없는 그룹은 0
        assert_eq!(table[2].ticker, "B");
        assert_eq!(table[2].total_return, 0.0);
    }

    #[test]
    fn test_gainers_losers_per_month() {
        let mut records = Vec::new();
        for (i, ticker) in ["A", "B", "C", "D"].iter().enumerate() {
            records.push(rec(ticker, 3, 1, Some(i as f64 * 0.01)));
            records.push(rec(ticker, 4, 1, Some(-(i as f64) * 0.01)));
        }
        let ds = PriceDataset::from_records(records).unwrap();

        let movers = monthly_gainers_losers_n(&ds, 2).unwrap();
        assert_eq!(movers.len(), 2);

        let march = &movers[0];
        assert_eq!(march.month.to_string(), "2024-03");
        let gainers: Vec<&str> = march.gainers.iter().map(|r| r.ticker.as_str()).collect();
        let losers: Vec<&str> = march.losers.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(gainers, vec!["D", "C"]);
        assert_eq!(losers, vec!["A", "B"]);

        let april = &movers[1];
        let gainers: Vec<&str> = april.gainers.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(gainers, vec!["A", "B"]);
    }

    #[test]
    fn test_ties_use_ticker_order() {
        let ds = PriceDataset::from_records(vec![
            rec("ZZ", 5, 2, Some(0.01)),
            rec("AA", 5, 2, Some(0.01)),
            rec("MM", 5, 2, Some(0.01)),
        ])
        .unwrap();

        let movers = monthly_gainers_losers_n(&ds, 2).unwrap();
        let gainers: Vec<&str> = movers[0].gainers.iter().map(|r| r.ticker.as_str()).collect();
        let losers: Vec<&str> = movers[0].losers.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(gainers, vec!["AA", "MM"]);
        assert_eq!(losers, vec!["MM", "ZZ"]);
    }
}
