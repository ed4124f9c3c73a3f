//! 대시보드 파이프라인의 에러 타입.
//!
//! 데이터 로드부터 파생 지표 계산까지 공통으로 사용하는 에러 분류를 정의합니다.
//! 데이터 소스가 실행 중 변하지 않으므로 어떤 에러도 재시도 대상이 아닙니다.

use thiserror::Error;

/// 대시보드 에러.
#[derive(Debug, Error)]
pub enum DashError {
    /// 데이터 없음 (빈 소스, 존재하지 않는 파일, 필터 결과 없음)
    #[error("데이터 없음: {0}")]
    DataUnavailable(String),

    /// 스키마 불일치 (필수 컬럼 누락, 타입 오류, 중복 키)
    #[error("스키마 불일치: {0}")]
    SchemaMismatch(String),

    /// 관측치 부족
    #[error("관측치 부족: {ticker} ({observations}개, 최소 {required}개 필요)")]
    InsufficientObservations {
        ticker: String,
        observations: usize,
        required: usize,
    },

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),
}

/// 대시보드 작업을 위한 Result 타입.
pub type DashResult<T> = Result<T, DashError>;

impl DashError {
    /// 후속 처리를 중단해야 하는 에러인지 확인합니다.
    ///
    /// 데이터가 없거나 스키마가 맞지 않으면 어떤 차트도 의미가 없습니다.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DashError::DataUnavailable(_) | DashError::SchemaMismatch(_)
        )
    }

    /// 빈 데이터셋에 대한 표준 에러를 생성합니다.
    pub fn empty_dataset() -> Self {
        DashError::DataUnavailable("No stock data available".to_string())
    }
}

impl From<std::io::Error> for DashError {
    fn from(err: std::io::Error) -> Self {
        DashError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for DashError {
    fn from(err: config::ConfigError) -> Self {
        DashError::Config(err.to_string())
    }
}
