//! 설정 관리.
//!
//! 기본값 → TOML 파일 → 환경 변수(`STOCKDASH__SECTION__KEY`) 순서로 덮어씁니다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DashError, DashResult};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "STOCKDASH";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 데이터 소스 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 파이프라인 설정
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// 가격 CSV 파일 경로
    pub csv_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/StockData_Updated.csv"),
        }
    }
}

/// 파이프라인 설정.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// 변동성 순위 상위 N개
    #[serde(default = "default_volatility_top_k")]
    pub volatility_top_k: usize,
    /// 누적 수익률 상위 종목 수
    #[serde(default = "default_top_performers_k")]
    pub top_performers_k: usize,
    /// 월별 상승/하락 상위 종목 수
    #[serde(default = "default_monthly_top_n")]
    pub monthly_top_n: usize,
    /// CSV의 daily_return 대신 종가로부터 재계산할지 여부
    #[serde(default)]
    pub recompute_daily_returns: bool,
}

fn default_volatility_top_k() -> usize {
    10
}
fn default_top_performers_k() -> usize {
    5
}
fn default_monthly_top_n() -> usize {
    5
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            volatility_top_k: default_volatility_top_k(),
            top_performers_k: default_top_performers_k(),
            monthly_top_n: default_monthly_top_n(),
            recompute_daily_returns: false,
        }
    }
}

impl PipelineConfig {
    /// 순위 개수가 모두 1 이상인지 검증합니다.
    pub fn validate(&self) -> DashResult<()> {
        for (name, value) in [
            ("volatility_top_k", self.volatility_top_k),
            ("top_performers_k", self.top_performers_k),
            ("monthly_top_n", self.monthly_top_n),
        ] {
            if value == 0 {
                return Err(DashError::Config(format!(
                    "pipeline.{} must be at least 1",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> DashResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = AppConfig::default();
        let builder = config::Config::builder()
            .set_default(
                "data.csv_path",
                defaults.data.csv_path.to_string_lossy().to_string(),
            )?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.pipeline.validate()?;

        tracing::debug!(path = %path.as_ref().display(), "Configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_pipeline_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.volatility_top_k, 10);
        assert_eq!(cfg.top_performers_k, 5);
        assert_eq!(cfg.monthly_top_n, 5);
        assert!(!cfg.recompute_daily_returns);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_pipeline_validate_zero() {
        let cfg = PipelineConfig {
            monthly_top_n: 0,
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, DashError::Config(ref m) if m.contains("monthly_top_n")));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[data]
csv_path = "fixtures/prices.csv"

[pipeline]
volatility_top_k = 3
recompute_daily_returns = true

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.data.csv_path, PathBuf::from("fixtures/prices.csv"));
        assert_eq!(cfg.pipeline.volatility_top_k, 3);
        assert_eq!(cfg.pipeline.top_performers_k, 5);
        assert!(cfg.pipeline.recompute_daily_returns);
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, "json");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let cfg = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(cfg.pipeline, PipelineConfig::default());
        assert_eq!(cfg.logging.format, "compact");
    }

    #[test]
    fn test_load_rejects_zero_k() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[pipeline]\ntop_performers_k = 0").unwrap();

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, DashError::Config(_)));
    }
}
