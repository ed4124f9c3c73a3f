//! 종목별 가격 데이터셋.
//!
//! 로드 후에는 변경되지 않는 읽기 전용 구조입니다. 모든 파생 뷰는
//! 같은 데이터셋에서 독립적으로 계산됩니다.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use std::collections::{BTreeMap, BTreeSet};

use super::price::PriceRecord;
use crate::error::{DashError, DashResult};

/// 종목 → 날짜순 레코드 매핑.
///
/// 종목은 티커 오름차순으로 순회됩니다. 종목 내에서 날짜는 유일합니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceDataset {
    series: BTreeMap<String, Vec<PriceRecord>>,
}

impl PriceDataset {
    /// 레코드 목록에서 데이터셋을 생성합니다.
    ///
    /// 종목별로 날짜순 정렬하며, 같은 (종목, 날짜)가 두 번 나오거나
    /// 종가가 0 이하이면 `SchemaMismatch`를 반환합니다.
    pub fn from_records(records: impl IntoIterator<Item = PriceRecord>) -> DashResult<Self> {
        let mut series: BTreeMap<String, Vec<PriceRecord>> = BTreeMap::new();
        for record in records {
            if record.close <= rust_decimal::Decimal::ZERO {
                return Err(DashError::SchemaMismatch(format!(
                    "non-positive close {} for {} on {}",
                    record.close, record.ticker, record.date
                )));
            }
            series.entry(record.ticker.clone()).or_default().push(record);
        }

        for (ticker, records) in series.iter_mut() {
            records.sort_by_key(|r| r.date);
            if let Some(dup) = records.windows(2).find(|w| w[0].date == w[1].date) {
                return Err(DashError::SchemaMismatch(format!(
                    "duplicate record for {} on {}",
                    ticker, dup[0].date
                )));
            }
        }

        Ok(Self { series })
    }

    /// 종목 수.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// 데이터가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// 전체 레코드 수.
    pub fn record_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    /// 비어 있으면 `DataUnavailable`을 반환합니다.
    pub fn ensure_not_empty(&self) -> DashResult<()> {
        if self.is_empty() {
            Err(DashError::empty_dataset())
        } else {
            Ok(())
        }
    }

    /// 티커 목록 (오름차순).
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// 특정 종목의 레코드 (날짜순).
    pub fn series(&self, ticker: &str) -> Option<&[PriceRecord]> {
        self.series.get(ticker).map(Vec::as_slice)
    }

    /// (티커, 레코드) 순회.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PriceRecord])> {
        self.series
            .iter()
            .map(|(ticker, records)| (ticker.as_str(), records.as_slice()))
    }

    /// 전체 레코드 순회 (티커 오름차순, 종목 내 날짜순).
    pub fn records(&self) -> impl Iterator<Item = &PriceRecord> {
        self.series.values().flatten()
    }

    /// 데이터셋에 포함된 날짜 범위 (첫 날짜, 마지막 날짜).
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.series.values().filter_map(|r| r.first()).map(|r| r.date).min()?;
        let last = self.series.values().filter_map(|r| r.last()).map(|r| r.date).max()?;
        Some((first, last))
    }

    /// 섹터 목록 (중복 제거, 오름차순).
    pub fn sectors(&self) -> BTreeSet<&str> {
        self.records().map(|r| r.sector.as_str()).collect()
    }

    /// 조건을 만족하는 레코드만 남긴 새 데이터셋을 반환합니다.
    ///
    /// 레코드가 모두 제거된 종목은 데이터셋에서 빠집니다.
    pub fn filtered<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&PriceRecord) -> bool,
    {
        let series = self
            .series
            .iter()
            .filter_map(|(ticker, records)| {
                let kept: Vec<PriceRecord> =
                    records.iter().filter(|r| predicate(r)).cloned().collect();
                (!kept.is_empty()).then(|| (ticker.clone(), kept))
            })
            .collect();
        Self { series }
    }

    /// 종가로부터 일간 수익률을 재계산한 새 데이터셋을 반환합니다.
    ///
    /// `daily_return[t] = (close[t] - close[t-1]) / close[t-1]`, 종목의 첫 날짜는 None.
    pub fn with_recomputed_daily_returns(&self) -> Self {
        let series = self
            .series
            .iter()
            .map(|(ticker, records)| {
                let mut out = records.clone();
                for (i, record) in out.iter_mut().enumerate() {
                    record.daily_return = i.checked_sub(1).and_then(|prev| {
                        let prev = records[prev].close;
                        record
                            .close
                            .checked_sub(prev)?
                            .checked_div(prev)?
                            .to_f64()
                    });
                }
                (ticker.clone(), out)
            })
            .collect();
        Self { series }
    }
}
