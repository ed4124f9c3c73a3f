//! 종목 목록 조회.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use super::output::{render_rows, OutputFormat};
use stockdash_core::PriceDataset;
use stockdash_data::{DEFAULT_SELECTION, NIFTY50_TICKERS};

/// 데이터셋의 종목 정보.
#[derive(Debug, Clone, Serialize)]
pub struct TickerInfo {
    pub ticker: String,
    pub sector: String,
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_date: Option<NaiveDate>,
}

/// 선택 가능한 종목.
#[derive(Debug, Clone, Serialize)]
pub struct UniverseEntry {
    pub ticker: &'static str,
    pub default_selected: bool,
}

/// 데이터셋에 있는 종목 요약.
pub fn dataset_tickers(dataset: &PriceDataset) -> Vec<TickerInfo> {
    dataset
        .iter()
        .map(|(ticker, records)| TickerInfo {
            ticker: ticker.to_string(),
            sector: records
                .first()
                .map(|r| r.sector.clone())
                .unwrap_or_default(),
            rows: records.len(),
            first_date: records.first().map(|r| r.date),
            last_date: records.last().map(|r| r.date),
        })
        .collect()
}

/// 기본 종목 유니버스 (기본 선택 표시 포함).
pub fn universe() -> Vec<UniverseEntry> {
    NIFTY50_TICKERS
        .iter()
        .map(|&ticker| UniverseEntry {
            ticker,
            default_selected: DEFAULT_SELECTION.contains(&ticker),
        })
        .collect()
}

/// 데이터셋 종목 목록 렌더링.
pub fn render_dataset_tickers(infos: &[TickerInfo], format: OutputFormat) -> Result<String> {
    let rows: Vec<Vec<String>> = infos
        .iter()
        .map(|info| {
            vec![
                info.ticker.clone(),
                info.sector.clone(),
                info.rows.to_string(),
                date_or_dash(info.first_date),
                date_or_dash(info.last_date),
            ]
        })
        .collect();
    render_rows(
        format,
        &["TICKER", "SECTOR", "ROWS", "FIRST", "LAST"],
        &rows,
        infos,
    )
}

/// 유니버스 렌더링.
pub fn render_universe(entries: &[UniverseEntry], format: OutputFormat) -> Result<String> {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.ticker.to_string(),
                if e.default_selected { "✓" } else { "" }.to_string(),
            ]
        })
        .collect();
    render_rows(format, &["TICKER", "DEFAULT"], &rows, entries)
}

fn date_or_dash(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}
