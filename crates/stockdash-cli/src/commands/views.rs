//! 파생 뷰 렌더링.
//!
//! 각 뷰를 표/CSV 행으로 변환합니다. JSON은 뷰 구조체를 그대로 직렬화합니다.

use anyhow::Result;

use super::output::{fmt_optional, fmt_ratio, render_rows, OutputFormat};
use stockdash_analytics::{
    CorrelationMatrix, MonthlyMovers, PerformersView, SectorAverage, VolatilityEntry,
};

/// 변동성 순위.
pub fn render_volatility(entries: &[VolatilityEntry], format: OutputFormat) -> Result<String> {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            vec![
                (i + 1).to_string(),
                e.ticker.clone(),
                fmt_ratio(e.stdev),
                e.observations.to_string(),
            ]
        })
        .collect();
    render_rows(
        format,
        &["RANK", "TICKER", "STDEV", "OBSERVATIONS"],
        &rows,
        entries,
    )
}

/// 상위 종목. `series`가 참이면 누적 수익률 시계열을 행으로 출력합니다.
pub fn render_performers(
    view: &PerformersView,
    series: bool,
    format: OutputFormat,
) -> Result<String> {
    if !series {
        let rows: Vec<Vec<String>> = view
            .ranking
            .iter()
            .enumerate()
            .map(|(i, e)| {
                vec![
                    (i + 1).to_string(),
                    e.ticker.clone(),
                    fmt_ratio(e.max_cumulative_return),
                ]
            })
            .collect();
        return render_rows(
            format,
            &["RANK", "TICKER", "MAX_CUMULATIVE_RETURN"],
            &rows,
            view,
        );
    }

    // 순위 순서대로 시계열을 나열
    let rows: Vec<Vec<String>> = view
        .ranking
        .iter()
        .filter_map(|e| view.series.get(&e.ticker).map(|points| (&e.ticker, points)))
        .flat_map(|(ticker, points)| {
            points.iter().map(move |p| {
                vec![
                    ticker.clone(),
                    p.date.to_string(),
                    fmt_optional(p.value),
                ]
            })
        })
        .collect();
    render_rows(
        format,
        &["TICKER", "DATE", "CUMULATIVE_RETURN"],
        &rows,
        view,
    )
}

/// 상관행렬. 정의되지 않은 셀은 `-` (JSON은 null).
pub fn render_correlation(matrix: &CorrelationMatrix, format: OutputFormat) -> Result<String> {
    let mut headers: Vec<&str> = vec!["TICKER"];
    headers.extend(matrix.tickers.iter().map(String::as_str));

    let rows: Vec<Vec<String>> = matrix
        .tickers
        .iter()
        .zip(&matrix.matrix)
        .map(|(ticker, cells)| {
            std::iter::once(ticker.clone())
                .chain(cells.iter().map(|c| fmt_optional(*c)))
                .collect()
        })
        .collect();
    render_rows(format, &headers, &rows, matrix)
}

/// 월별 상승/하락 종목.
pub fn render_monthly(movers: &[MonthlyMovers], format: OutputFormat) -> Result<String> {
    let mut rows = Vec::new();
    for month in movers {
        for (side, list) in [("gainer", &month.gainers), ("loser", &month.losers)] {
            for (i, r) in list.iter().enumerate() {
                rows.push(vec![
                    month.month.to_string(),
                    side.to_string(),
                    (i + 1).to_string(),
                    r.ticker.clone(),
                    fmt_ratio(r.total_return),
                ]);
            }
        }
    }
    render_rows(
        format,
        &["MONTH", "SIDE", "RANK", "TICKER", "TOTAL_RETURN"],
        &rows,
        movers,
    )
}

/// 섹터별 평균 연간 수익률.
pub fn render_sectors(sectors: &[SectorAverage], format: OutputFormat) -> Result<String> {
    let rows: Vec<Vec<String>> = sectors
        .iter()
        .map(|s| {
            vec![
                s.sector.clone(),
                s.ticker_count.to_string(),
                s.average_yearly_return.round_dp(4).to_string(),
            ]
        })
        .collect();
    render_rows(
        format,
        &["SECTOR", "TICKERS", "AVG_YEARLY_RETURN"],
        &rows,
        sectors,
    )
}
