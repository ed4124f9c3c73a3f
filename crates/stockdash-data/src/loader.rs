//! 가격 CSV 로더.
//!
//! 필수 컬럼: `stock_date`, `Ticker`, `close`, `daily_return`, `sector`, `yearly_return`.
//! 그 외 컬럼은 무시합니다. `daily_return`이 비어 있거나 NaN이면 정의되지 않은 값으로 읽습니다.

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use stockdash_core::{DashError, DashResult, PriceDataset, PriceRecord};

/// 필수 컬럼 목록.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "stock_date",
    "Ticker",
    "close",
    "daily_return",
    "sector",
    "yearly_return",
];

/// 지원하는 날짜 형식.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// 헤더에서 찾은 필수 컬럼 위치.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    ticker: usize,
    close: usize,
    daily_return: usize,
    sector: usize,
    yearly_return: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> DashResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DashError::SchemaMismatch(format!("missing column: {}", name)))
        };

        let [date, ticker, close, daily_return, sector, yearly_return] =
            REQUIRED_COLUMNS.map(find);
        Ok(Self {
            date: date?,
            ticker: ticker?,
            close: close?,
            daily_return: daily_return?,
            sector: sector?,
            yearly_return: yearly_return?,
        })
    }
}

/// 파일 경로에서 가격 데이터를 로드합니다.
///
/// 파일이 없거나 데이터 행이 없으면 `DataUnavailable`을 반환합니다.
pub fn load_price_csv<P: AsRef<Path>>(path: P) -> DashResult<PriceDataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DashError::DataUnavailable(format!(
            "price file not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| DashError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let dataset = read_price_csv(file)?;

    info!(
        path = %path.display(),
        tickers = dataset.len(),
        rows = dataset.record_count(),
        "Loaded price data"
    );
    Ok(dataset)
}

/// 임의의 reader에서 가격 데이터를 읽습니다.
pub fn read_price_csv<R: Read>(reader: R) -> DashResult<PriceDataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(DashError::DataUnavailable("price file is empty".to_string()));
    }
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row = row.map_err(csv_error)?;
        // 헤더가 1행이므로 데이터 행 번호는 2부터
        records.push(parse_row(&row, &columns, idx + 2)?);
    }

    if records.is_empty() {
        return Err(DashError::DataUnavailable(
            "price file contains no data rows".to_string(),
        ));
    }

    debug!(rows = records.len(), "Parsed price rows");
    PriceDataset::from_records(records)
}

fn parse_row(row: &StringRecord, columns: &ColumnIndex, line: usize) -> DashResult<PriceRecord> {
    let field = |idx: usize, name: &str| {
        row.get(idx).ok_or_else(|| {
            DashError::SchemaMismatch(format!("row {}: missing value for {}", line, name))
        })
    };

    let ticker = field(columns.ticker, "Ticker")?;
    if ticker.is_empty() {
        return Err(DashError::SchemaMismatch(format!("row {}: empty Ticker", line)));
    }

    let raw_date = field(columns.date, "stock_date")?;
    let date = parse_date(raw_date).ok_or_else(|| {
        DashError::SchemaMismatch(format!("row {}: invalid stock_date '{}'", line, raw_date))
    })?;

    let close = parse_decimal(field(columns.close, "close")?)
        .ok_or_else(|| invalid_value(line, "close", row.get(columns.close)))?;

    let raw_return = field(columns.daily_return, "daily_return")?;
    let daily_return = parse_optional_f64(raw_return)
        .ok_or_else(|| invalid_value(line, "daily_return", Some(raw_return)))?;

    let yearly_return = parse_decimal(field(columns.yearly_return, "yearly_return")?)
        .ok_or_else(|| invalid_value(line, "yearly_return", row.get(columns.yearly_return)))?;

    let sector = field(columns.sector, "sector")?;

    Ok(PriceRecord::new(
        ticker,
        date,
        close,
        daily_return,
        sector,
        yearly_return,
    ))
}

/// 날짜 문자열을 파싱합니다. 시간 정보가 있으면 날짜 부분만 사용합니다.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// 비어 있거나 NaN이면 `Some(None)`, 파싱 실패 시 `None`.
fn parse_optional_f64(s: &str) -> Option<Option<f64>> {
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Some(None);
    }
    let value: f64 = s.parse().ok()?;
    Some(value.is_finite().then_some(value))
}

fn invalid_value(line: usize, column: &str, raw: Option<&str>) -> DashError {
    DashError::SchemaMismatch(format!(
        "row {}: invalid {} '{}'",
        line,
        column,
        raw.unwrap_or_default()
    ))
}

fn csv_error(err: csv::Error) -> DashError {
    match err.kind() {
        csv::ErrorKind::Io(_) => DashError::Io(err.to_string()),
        _ => DashError::SchemaMismatch(err.to_string()),
    }
}
