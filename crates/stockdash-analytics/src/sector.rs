//! 섹터별 평균 연간 수익률.
//!
//! 섹터에 속한 종목들의 `yearly_return` 산술 평균입니다. 종목마다 하나의 값
//! (해당 종목 레코드의 평균)을 사용하므로 거래일 수가 많은 종목이 더 큰 가중치를
//! 갖지 않습니다. 종목의 섹터는 첫 레코드의 섹터를 따릅니다.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use stockdash_core::{DashResult, PriceDataset, PriceRecord};

/// 섹터 평균 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAverage {
    /// 섹터명
    pub sector: String,
    /// 섹터 내 종목 수
    pub ticker_count: usize,
    /// 평균 연간 수익률
    pub average_yearly_return: Decimal,
}

/// 섹터별 평균 연간 수익률 (평균 오름차순, 동률은 섹터명 오름차순).
pub fn sector_average_return(dataset: &PriceDataset) -> DashResult<Vec<SectorAverage>> {
    dataset.ensure_not_empty()?;

    let mut by_sector: BTreeMap<&str, Vec<Decimal>> = BTreeMap::new();
    for (_, records) in dataset.iter() {
        if let Some((sector, value)) = ticker_yearly_return(records) {
            by_sector.entry(sector).or_default().push(value);
        }
    }

    let mut results: Vec<SectorAverage> = by_sector
        .into_iter()
        .map(|(sector, values)| SectorAverage {
            sector: sector.to_string(),
            ticker_count: values.len(),
            average_yearly_return: values.iter().sum::<Decimal>() / Decimal::from(values.len()),
        })
        .collect();

    // BTreeMap 순서(섹터명)를 유지하는 안정 정렬
    results.sort_by(|a, b| a.average_yearly_return.cmp(&b.average_yearly_return));
    Ok(results)
}

/// 종목의 (섹터, 연간 수익률). 레코드가 없으면 None.
fn ticker_yearly_return(records: &[PriceRecord]) -> Option<(&str, Decimal)> {
    let first = records.first()?;
    let total: Decimal = records.iter().map(|r| r.yearly_return).sum();
    Some((
        first.sector.as_str(),
        total / Decimal::from(records.len()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn rec(ticker: &str, day: u32, sector: &str, yearly: Decimal) -> PriceRecord {
        PriceRecord::new(
            ticker,
            NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            dec!(100),
            None,
            sector,
            yearly,
        )
    }

    #[test]
    fn test_it_sector_average() {
        let ds = PriceDataset::from_records(vec![
            rec("TCS", 1, "IT", dec!(0.12)),
            rec("TCS", 2, "IT", dec!(0.12)),
            rec("TCS", 3, "IT", dec!(0.12)),
            rec("INFY", 1, "IT", dec!(0.08)),
        ])
        .unwrap();

        let result = sector_average_return(&ds).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sector, "IT");
        assert_eq!(result[0].ticker_count, 2);
        assert_eq!(result[0].average_yearly_return, dec!(0.10));
    }

    #[test]
    fn test_sorted_ascending() {
        let ds = PriceDataset::from_records(vec![
            rec("SBIN", 1, "Banking", dec!(0.30)),
            rec("ITC", 1, "FMCG", dec!(-0.05)),
            rec("NTPC", 1, "Power", dec!(0.10)),
            rec("ONGC", 1, "Energy", dec!(0.10)),
        ])
        .unwrap();

        let sectors: Vec<String> = sector_average_return(&ds)
            .unwrap()
            .into_iter()
            .map(|s| s.sector)
            .collect();
        assert_eq!(sectors, vec!["FMCG", "Energy", "Power", "Banking"]);
    }

    #[test]
    fn test_empty_dataset() {
        assert!(sector_average_return(&PriceDataset::default()).is_err());
    }
}
