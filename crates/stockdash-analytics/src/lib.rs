//! 수익률 및 순위 파이프라인.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 종목별 누적 수익률
//! - 변동성 순위
//! - 누적 수익률 상위 종목
//! - 월별 상승/하락 종목
//! - 종가 상관행렬
//! - 섹터별 평균 연간 수익률
//!
//! 모든 연산은 입력 데이터셋을 변경하지 않는 순수 함수이며,
//! 데이터셋이 비어 있으면 `DataUnavailable`을 반환합니다.
//! 순위 동률은 티커 오름차순으로 정렬합니다.

pub mod correlation;
pub mod cumulative;
pub mod monthly;
pub mod performers;
pub mod pipeline;
pub mod sector;
pub mod stats;
pub mod volatility;

pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use cumulative::{compute_cumulative_returns, CumulativePoint, CumulativeReturns};
pub use monthly::{
    monthly_gainers_losers, monthly_gainers_losers_n, monthly_returns, MonthlyMovers,
    MonthlyReturn,
};
pub use performers::{rank_performers, top_performers, PerformerEntry};
pub use pipeline::{DashboardPipeline, DashboardReport, DatasetSummary, PerformersView};
pub use sector::{sector_average_return, SectorAverage};
pub use stats::sample_std_dev_checked;
pub use volatility::{rank_volatility, VolatilityEntry};
