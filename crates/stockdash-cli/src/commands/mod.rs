//! CLI 명령어 구현 모듈.

pub mod dataset;
pub mod output;
pub mod report;
pub mod tickers;
pub mod views;
