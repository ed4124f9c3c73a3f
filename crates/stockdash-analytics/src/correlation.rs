//! 종가 상관행렬.
//!
//! 종목 쌍마다 두 종목 모두 거래된 날짜만 골라 종가의 Pearson 상관계수를 계산합니다.
//!
//! # 정의되지 않는 셀
//!
//! - 공통 날짜가 2개 미만인 쌍 (공통 날짜 0개 포함)
//! - 공통 구간에서 어느 한쪽 종가가 일정한 쌍
//!
//! 이런 셀은 0이 아니라 `None`입니다. 대각선은 1.0이며, 관측치가 2개 미만이거나
//! 종가가 일정한 종목은 대각선도 `None`입니다.
//!
//! # 예시
//!
//! ```rust,ignore
//! use stockdash_analytics::correlation::correlation_matrix;
//!
//! let matrix = correlation_matrix(&dataset)?;
//! if let Some(corr) = matrix.get("SBIN", "ICICIBANK") {
//!     println!("상관계수: {:.4}", corr);
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats::pearson;
use stockdash_core::{DashResult, PriceDataset};

/// 상관행렬 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// 종목 목록 (행/열 순서, 티커 오름차순)
    pub tickers: Vec<String>,
    /// 상관계수 행렬 (N×N, -1.0 ~ 1.0, 정의되지 않으면 None)
    pub matrix: Vec<Vec<Option<f64>>>,
    /// 쌍별 공통 거래일 수 (N×N)
    pub shared_dates: Vec<Vec<usize>>,
}

impl CorrelationMatrix {
    /// 종목의 행/열 인덱스.
    pub fn index_of(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// 두 종목의 상관계수.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        *self.matrix.get(i)?.get(j)?
    }

    /// 두 종목의 공통 거래일 수.
    pub fn overlap(&self, a: &str, b: &str) -> Option<usize> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        self.shared_dates.get(i)?.get(j).copied()
    }

    /// 종목 수.
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    /// 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

/// 상관행렬 계산.
pub fn correlation_matrix(dataset: &PriceDataset) -> DashResult<CorrelationMatrix> {
    dataset.ensure_not_empty()?;

    // 종목별 날짜 → 종가
    let closes: Vec<(String, BTreeMap<NaiveDate, f64>)> = dataset
        .iter()
        .map(|(ticker, records)| {
            let by_date = records
                .iter()
                .filter_map(|r| r.close_f64().map(|c| (r.date, c)))
                .collect();
            (ticker.to_string(), by_date)
        })
        .collect();

    let n = closes.len();
    let mut matrix = vec![vec![None; n]; n];
    let mut shared_dates = vec![vec![0usize; n]; n];

    for i in 0..n {
        let (_, series_i) = &closes[i];
        shared_dates[i][i] = series_i.len();
        let values: Vec<f64> = series_i.values().copied().collect();
        // 자기 자신과의 상관계수는 정의되는 경우 정확히 1.0
        matrix[i][i] = pearson(&values, &values).map(|_| 1.0);

        // 상삼각만 계산하고 대칭으로 채움
        for j in (i + 1)..n {
            let (x, y) = aligned_closes(series_i, &closes[j].1);
            let corr = pearson(&x, &y);
            matrix[i][j] = corr;
            matrix[j][i] = corr;
            shared_dates[i][j] = x.len();
            shared_dates[j][i] = x.len();
        }
    }

    tracing::debug!(tickers = n, "Computed correlation matrix");

    Ok(CorrelationMatrix {
        tickers: closes.into_iter().map(|(t, _)| t).collect(),
        matrix,
        shared_dates,
    })
}

/// 두 종목의 공통 날짜 종가를 날짜순으로 정렬해 반환합니다.
fn aligned_closes(a: &BTreeMap<NaiveDate, f64>, b: &BTreeMap<NaiveDate, f64>) -> (Vec<f64>, Vec<f64>) {
    a.iter()
        .filter_map(|(date, xa)| b.get(date).map(|xb| (*xa, *xb)))
        .unzip()
}
