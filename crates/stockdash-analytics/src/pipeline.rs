//! 대시보드 파이프라인.
//!
//! 한 번 로드한 데이터셋에서 모든 파생 뷰를 독립적으로 계산해
//! [`DashboardReport`]로 묶습니다. 표시 계층의 상태에는 의존하지 않습니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::info;

use crate::correlation::{correlation_matrix, CorrelationMatrix};
use crate::cumulative::{compute_cumulative_returns, CumulativeReturns};
use crate::monthly::{monthly_gainers_losers_n, MonthlyMovers};
use crate::performers::{rank_performers, PerformerEntry};
use crate::sector::{sector_average_return, SectorAverage};
use crate::volatility::{rank_volatility, VolatilityEntry};
use stockdash_core::{view_span, DashResult, PipelineConfig, PriceDataset};

/// 데이터셋 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// 종목 수
    pub tickers: usize,
    /// 레코드 수
    pub records: usize,
    /// 섹터 수
    pub sectors: usize,
    /// 첫 거래일
    pub first_date: Option<NaiveDate>,
    /// 마지막 거래일
    pub last_date: Option<NaiveDate>,
}

impl DatasetSummary {
    fn of(dataset: &PriceDataset) -> Self {
        let range = dataset.date_range();
        Self {
            tickers: dataset.len(),
            records: dataset.record_count(),
            sectors: dataset.sectors().len(),
            first_date: range.map(|(first, _)| first),
            last_date: range.map(|(_, last)| last),
        }
    }
}

/// 상위 종목 뷰: 순위와 해당 종목의 누적 수익률 시계열.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformersView {
    /// 최대 누적 수익률 순위
    pub ranking: Vec<PerformerEntry>,
    /// 순위에 든 종목의 누적 수익률
    pub series: CumulativeReturns,
}

/// 모든 파생 뷰를 담은 보고서.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// 데이터셋 요약
    pub summary: DatasetSummary,
    /// 변동성 상위 종목
    pub volatility: Vec<VolatilityEntry>,
    /// 누적 수익률 상위 종목
    pub performers: PerformersView,
    /// 종가 상관행렬
    pub correlation: CorrelationMatrix,
    /// 월별 상승/하락 종목
    pub monthly: Vec<MonthlyMovers>,
    /// 섹터별 평균 연간 수익률
    pub sectors: Vec<SectorAverage>,
}

/// 설정값을 적용해 각 뷰를 계산하는 파이프라인.
#[derive(Debug, Clone, Default)]
pub struct DashboardPipeline {
    config: PipelineConfig,
}

impl DashboardPipeline {
    /// 설정을 검증하고 파이프라인을 생성합니다.
    pub fn new(config: PipelineConfig) -> DashResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 파이프라인 설정.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 설정에 따라 일간 수익률을 재계산한 데이터셋을 반환합니다.
    ///
    /// 재계산은 종목별 직전 행을 기준으로 하므로 날짜 필터를 적용하기 전의
    /// 데이터셋을 넘겨야 합니다.
    pub fn prepare<'a>(&self, dataset: &'a PriceDataset) -> DashResult<Cow<'a, PriceDataset>> {
        dataset.ensure_not_empty()?;
        if self.config.recompute_daily_returns {
            Ok(Cow::Owned(dataset.with_recomputed_daily_returns()))
        } else {
            Ok(Cow::Borrowed(dataset))
        }
    }

    /// 변동성 상위 종목.
    pub fn volatility(&self, dataset: &PriceDataset) -> DashResult<Vec<VolatilityEntry>> {
        let _span = view_span!("volatility", dataset.len()).entered();
        rank_volatility(dataset, self.config.volatility_top_k)
    }

    /// 누적 수익률 상위 종목과 그 시계열.
    pub fn performers(&self, dataset: &PriceDataset) -> DashResult<PerformersView> {
        let _span = view_span!("performers", dataset.len()).entered();
        let mut cumulative = compute_cumulative_returns(dataset)?;
        let ranking = rank_performers(&cumulative, self.config.top_performers_k)?;
        cumulative.retain(|ticker, _| ranking.iter().any(|e| &e.ticker == ticker));
        Ok(PerformersView {
            ranking,
            series: cumulative,
        })
    }

    /// 종가 상관행렬.
    pub fn correlation(&self, dataset: &PriceDataset) -> DashResult<CorrelationMatrix> {
        let _span = view_span!("correlation", dataset.len()).entered();
        correlation_matrix(dataset)
    }

    /// 월별 상승/하락 종목.
    pub fn monthly(&self, dataset: &PriceDataset) -> DashResult<Vec<MonthlyMovers>> {
        let _span = view_span!("monthly", dataset.len()).entered();
        monthly_gainers_losers_n(dataset, self.config.monthly_top_n)
    }

    /// 섹터별 평균.
    pub fn sectors(&self, dataset: &PriceDataset) -> DashResult<Vec<SectorAverage>> {
        let _span = view_span!("sectors").entered();
        sector_average_return(dataset)
    }

    /// 데이터셋을 준비한 뒤 모든 뷰를 계산합니다. 빈 데이터셋이면 `DataUnavailable`.
    pub fn run(&self, dataset: &PriceDataset) -> DashResult<DashboardReport> {
        let prepared = self.prepare(dataset)?;
        self.report(&prepared)
    }

    /// [`prepare`](Self::prepare)를 거친 데이터셋으로 모든 뷰를 계산합니다.
    pub fn report(&self, dataset: &PriceDataset) -> DashResult<DashboardReport> {
        let report = DashboardReport {
            summary: DatasetSummary::of(dataset),
            volatility: self.volatility(dataset)?,
            performers: self.performers(dataset)?,
            correlation: self.correlation(dataset)?,
            monthly: self.monthly(dataset)?,
            sectors: self.sectors(dataset)?,
        };

        info!(
            tickers = report.summary.tickers,
            records = report.summary.records,
            months = report.monthly.len(),
            "Dashboard report computed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockdash_core::{DashError, PriceRecord};

    fn sample() -> PriceDataset {
        let closes = [
            ("X", "IT", dec!(0.12), [dec!(100), dec!(110), dec!(99)]),
            ("Y", "IT", dec!(0.08), [dec!(50), dec!(52), dec!(51)]),
        ];
        let records = closes.iter().flat_map(|(ticker, sector, yearly, prices)| {
            prices.iter().enumerate().map(move |(i, close)| {
                PriceRecord::new(
                    *ticker,
                    NaiveDate::from_ymd_opt(2024, 1, 1 + i as u32).unwrap(),
                    *close,
                    None,
                    *sector,
                    *yearly,
                )
            })
        });
        PriceDataset::from_records(records).unwrap()
    }

    #[test]
    fn test_run_with_recomputed_returns() {
        let pipeline = DashboardPipeline::new(PipelineConfig {
            recompute_daily_returns: true,
            ..Default::default()
        })
        .unwrap();

        let report = pipeline.run(&sample()).unwrap();
        assert_eq!(report.summary.tickers, 2);
        assert_eq!(report.summary.records, 6);
        assert_eq!(report.volatility.len(), 2);
        assert_eq!(report.volatility[0].ticker, "X");

        let x = &report.performers.series["X"];
        let values: Vec<Option<f64>> = x.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![None, Some(0.1), Some(0.0)]);

        assert_eq!(report.sectors.len(), 1);
        assert_eq!(report.sectors[0].average_yearly_return, dec!(0.10));
        assert_eq!(report.monthly.len(), 1);
    }

    #[test]
    fn test_performers_series_limited_to_ranking() {
        let pipeline = DashboardPipeline::new(PipelineConfig {
            top_performers_k: 1,
            recompute_daily_returns: true,
            ..Default::default()
        })
        .unwrap();

        let sample = sample();
        let ds = pipeline.prepare(&sample).unwrap();
        let view = pipeline.performers(&ds).unwrap();
        assert_eq!(view.ranking.len(), 1);
        assert_eq!(view.series.len(), 1);
        assert!(view.series.contains_key(&view.ranking[0].ticker));
    }

    #[test]
    fn test_empty_dataset_halts() {
        let pipeline = DashboardPipeline::default();
        let err = pipeline.run(&PriceDataset::default()).unwrap_err();
        assert!(matches!(err, DashError::DataUnavailable(_)));
    }

    #[test]
    fn test_invalid_config() {
        let err = DashboardPipeline::new(PipelineConfig {
            volatility_top_k: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, DashError::Config(_)));
    }
}
