//! 종목/기간 필터.
//!
//! 표시 계층이 소유하는 선택 상태입니다. 파이프라인 실행 전에 데이터셋에 적용됩니다.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;

use stockdash_core::{DashError, DashResult, PriceDataset};

/// 데이터셋 필터.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetFilter {
    /// 포함할 종목 (비어 있으면 전체)
    pub tickers: BTreeSet<String>,
    /// 시작일 (포함)
    pub from: Option<NaiveDate>,
    /// 종료일 (포함)
    pub to: Option<NaiveDate>,
}

impl DatasetFilter {
    /// 전체 데이터를 통과시키는 필터.
    pub fn new() -> Self {
        Self::default()
    }

    /// 종목 목록을 설정합니다. 대문자로 정규화됩니다.
    pub fn with_tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tickers = tickers
            .into_iter()
            .map(|t| t.as_ref().trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    /// 기간을 설정합니다.
    pub fn with_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// 아무 조건도 없는지 확인합니다.
    pub fn is_unrestricted(&self) -> bool {
        self.tickers.is_empty() && self.from.is_none() && self.to.is_none()
    }

    /// 필터를 데이터셋에 적용합니다.
    ///
    /// 시작일이 종료일보다 늦으면 `InvalidInput`, 결과가 비면 `DataUnavailable`.
    pub fn apply(&self, dataset: &PriceDataset) -> DashResult<PriceDataset> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(DashError::InvalidInput(format!(
                    "start date {} is after end date {}",
                    from, to
                )));
            }
        }

        if self.is_unrestricted() {
            return Ok(dataset.clone());
        }

        let filtered = dataset.filtered(|r| {
            (self.tickers.is_empty() || self.tickers.contains(&r.ticker.to_uppercase()))
                && self.from.map_or(true, |from| r.date >= from)
                && self.to.map_or(true, |to| r.date <= to)
        });

        debug!(
            before = dataset.len(),
            after = filtered.len(),
            "Applied dataset filter"
        );

        if filtered.is_empty() {
            return Err(DashError::DataUnavailable(
                "No stock data available. Try different selections.".to_string(),
            ));
        }
        Ok(filtered)
    }
}
