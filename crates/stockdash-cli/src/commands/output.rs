//! 출력 형식 및 렌더링 공통 기능.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!(
                "Invalid format: {}. Use: table, csv, json",
                s
            )),
        }
    }
}

/// 렌더링 결과를 파일 또는 stdout에 출력합니다.
pub fn write_output(content: &str, output_path: Option<&Path>) -> Result<()> {
    if let Some(path) = output_path {
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .context("Failed to write to file")?;
        info!("Output written to: {}", path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// 테이블 형식 출력. 열 너비는 가장 긴 값에 맞춥니다.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();

    // 헤더
    push_row(&mut output, headers.iter().copied(), &widths);
    let total = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
    output.push_str(&"-".repeat(total));
    output.push('\n');

    // 데이터
    for row in rows {
        push_row(&mut output, row.iter().map(String::as_str), &widths);
    }

    output
}

fn push_row<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    output.push_str(line.join(" ").trim_end());
    output.push('\n');
}

/// CSV 형식 출력.
pub fn format_csv(headers: &[&str], rows: &[Vec<String>]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers)
        .context("Failed to write CSV header")?;
    for row in rows {
        writer.write_record(row).context("Failed to write CSV row")?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// JSON 형식 출력.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize to JSON")
}

/// 행 단위 데이터를 표 또는 CSV로 렌더링합니다. JSON은 `value`를 직렬화합니다.
pub fn render_rows<T: Serialize + ?Sized>(
    format: OutputFormat,
    headers: &[&str],
    rows: &[Vec<String>],
    value: &T,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format_table(headers, rows)),
        OutputFormat::Csv => format_csv(headers, rows),
        OutputFormat::Json => format_json(value),
    }
}

/// 비율 값 (소수점 4자리).
pub fn fmt_ratio(value: f64) -> String {
    format!("{:.4}", value)
}

/// 정의되지 않을 수 있는 비율 값. 정의되지 않으면 `-`.
pub fn fmt_optional(value: Option<f64>) -> String {
    value.map(fmt_ratio).unwrap_or_else(|| "-".to_string())
}
