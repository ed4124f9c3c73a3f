//! 데이터셋 로드 및 선택 필터 적용.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::{debug, warn};

use stockdash_core::PriceDataset;
use stockdash_data::{is_known_ticker, load_price_csv, parse_date, DatasetFilter};

/// 데이터 로드 설정.
#[derive(Debug, Clone, Default)]
pub struct LoadConfig {
    /// 가격 CSV 경로
    pub data: PathBuf,
    /// 선택 종목 (비어 있으면 전체)
    pub tickers: Vec<String>,
    /// 시작일 (YYYY-MM-DD)
    pub from: Option<String>,
    /// 종료일 (YYYY-MM-DD)
    pub to: Option<String>,
    /// 종가로부터 일간 수익률 재계산 (필터 적용 전)
    pub recompute: bool,
}

impl LoadConfig {
    /// 선택 상태를 필터로 변환합니다.
    pub fn filter(&self) -> Result<DatasetFilter> {
        let from = self.from.as_deref().map(parse_date_arg).transpose()?;
        let to = self.to.as_deref().map(parse_date_arg).transpose()?;
        Ok(DatasetFilter::new()
            .with_tickers(&self.tickers)
            .with_range(from, to))
    }
}

/// 날짜 인자 파싱.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate> {
    parse_date(s).ok_or_else(|| anyhow::anyhow!("Invalid date: {}. Use YYYY-MM-DD", s))
}

/// CSV를 로드하고 선택 필터를 적용합니다.
///
/// 재계산은 전체 데이터에서 먼저 수행하므로 시작일 직전 행이 있으면
/// 첫 거래일의 수익률도 정의됩니다.
pub fn load_dataset(config: &LoadConfig) -> Result<PriceDataset> {
    let filter = config.filter()?;
    for ticker in &filter.tickers {
        if !is_known_ticker(ticker) {
            warn!(ticker = %ticker, "Ticker is not part of the NIFTY50 universe");
        }
    }

    let dataset = load_price_csv(&config.data)
        .with_context(|| format!("Failed to load {}", config.data.display()))?;
    let dataset = if config.recompute {
        dataset.with_recomputed_daily_returns()
    } else {
        dataset
    };
    let filtered = filter.apply(&dataset)?;

    debug!(
        tickers = filtered.len(),
        rows = filtered.record_count(),
        "Selection applied"
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_args() {
        let config = LoadConfig {
            tickers: vec!["sbin".to_string(), " itc ".to_string()],
            from: Some("2024-01-01".to_string()),
            to: Some("2024-06-30".to_string()),
            ..Default::default()
        };
        let filter = config.filter().unwrap();
        assert!(filter.tickers.contains("SBIN"));
        assert!(filter.tickers.contains("ITC"));
        assert_eq!(filter.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filter.to, NaiveDate::from_ymd_opt(2024, 6, 30));
    }

    #[test]
    fn test_invalid_date_arg() {
        let config = LoadConfig {
            from: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(config.filter().is_err());
    }
}
