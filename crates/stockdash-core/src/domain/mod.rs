//! 대시보드 도메인 모델.

pub mod dataset;
pub mod month;
pub mod price;

pub use dataset::PriceDataset;
pub use month::YearMonth;
pub use price::PriceRecord;
