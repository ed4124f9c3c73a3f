//! 일별 가격 레코드.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::month::YearMonth;

/// (종목, 날짜) 단위의 가격 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// 종목 티커
    pub ticker: String,
    /// 거래일
    pub date: NaiveDate,
    /// 종가 (양수)
    pub close: Decimal,
    /// 전일 대비 수익률 (첫 거래일은 None)
    pub daily_return: Option<f64>,
    /// 섹터명
    pub sector: String,
    /// 종목별 연간 수익률 (사전 계산값)
    pub yearly_return: Decimal,
}

impl PriceRecord {
    /// 새 레코드를 생성합니다.
    pub fn new(
        ticker: impl Into<String>,
        date: NaiveDate,
        close: Decimal,
        daily_return: Option<f64>,
        sector: impl Into<String>,
        yearly_return: Decimal,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            close,
            daily_return,
            sector: sector.into(),
            yearly_return,
        }
    }

    /// 레코드가 속한 달.
    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.date)
    }

    /// 종가를 f64로 변환합니다.
    pub fn close_f64(&self) -> Option<f64> {
        self.close.to_f64()
    }
}
