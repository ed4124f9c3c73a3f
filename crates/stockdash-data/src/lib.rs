//! 가격 데이터 로드 및 필터링.
//!
//! 이 crate는 다음을 제공합니다:
//! - 가격 CSV 로더 (컬럼 이름 기반)
//! - 종목/기간 필터
//! - 기본 종목 유니버스

pub mod filter;
pub mod loader;
pub mod universe;

pub use filter::DatasetFilter;
pub use loader::{load_price_csv, parse_date, read_price_csv, REQUIRED_COLUMNS};
pub use universe::{is_known_ticker, DEFAULT_SELECTION, NIFTY50_TICKERS};
