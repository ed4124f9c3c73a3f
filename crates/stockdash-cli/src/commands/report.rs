//! 전체 대시보드 보고서 렌더링.

use anyhow::Result;

use super::output::{format_json, OutputFormat};
use super::views::{
    render_correlation, render_monthly, render_performers, render_sectors, render_volatility,
};
use stockdash_analytics::{DashboardReport, DatasetSummary};

/// 보고서 렌더링.
///
/// 표와 CSV는 뷰별 섹션을 차례로 출력하고, JSON은 보고서 전체를 하나의 문서로 출력합니다.
pub fn render_report(report: &DashboardReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return format_json(report);
    }

    let sections = [
        ("volatility", render_volatility(&report.volatility, format)?),
        ("performers", render_performers(&report.performers, false, format)?),
        ("correlation", render_correlation(&report.correlation, format)?),
        ("monthly", render_monthly(&report.monthly, format)?),
        ("sectors", render_sectors(&report.sectors, format)?),
    ];

    let mut output = String::new();
    if format == OutputFormat::Table {
        output.push_str(&summary_line(&report.summary));
        output.push('\n');
    }

    for (name, body) in sections {
        output.push('\n');
        match format {
            OutputFormat::Csv => output.push_str(&format!("# {}\n", name)),
            _ => output.push_str(&format!("== {} ==\n", name)),
        }
        output.push_str(&body);
    }

    Ok(output)
}

/// 데이터셋 요약 한 줄.
pub fn summary_line(summary: &DatasetSummary) -> String {
    let range = match (summary.first_date, summary.last_date) {
        (Some(first), Some(last)) => format!("{} ~ {}", first, last),
        _ => "-".to_string(),
    };
    format!(
        "Dataset: {} tickers, {} rows, {} sectors, {}",
        summary.tickers, summary.records, summary.sectors, range
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_summary_line() {
        let summary = DatasetSummary {
            tickers: 2,
            records: 6,
            sectors: 1,
            first_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            last_date: NaiveDate::from_ymd_opt(2024, 1, 3),
        };
        assert_eq!(
            summary_line(&summary),
            "Dataset: 2 tickers, 6 rows, 1 sectors, 2024-01-01 ~ 2024-01-03"
        );
    }
}
