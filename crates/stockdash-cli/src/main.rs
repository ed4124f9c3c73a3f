//! 주식 대시보드 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 전체 보고서 (표 형식)
//! stockdash report -d data/StockData_Updated.csv
//!
//! # 기본 선택 종목의 2024년 상반기 변동성 순위
//! stockdash volatility -s SBIN -s BAJFINANCE -f 2024-01-01 -t 2024-06-30
//!
//! # 상위 종목 누적 수익률 시계열을 CSV로 저장
//! stockdash performers --series --format csv -o performers.csv
//!
//! # 선택 가능한 종목 목록
//! stockdash tickers --universe
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use stockdash_analytics::DashboardPipeline;
use stockdash_cli::commands::dataset::{load_dataset, LoadConfig};
use stockdash_cli::commands::output::{write_output, OutputFormat};
use stockdash_cli::commands::report::render_report;
use stockdash_cli::commands::tickers::{
    dataset_tickers, render_dataset_tickers, render_universe, universe,
};
use stockdash_cli::commands::views::{
    render_correlation, render_monthly, render_performers, render_sectors, render_volatility,
};
use stockdash_core::{init_logging, AppConfig, LogConfig, DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(name = "stockdash")]
#[command(about = "Stock dashboard CLI - 종목별 수익률 및 순위 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 가격 CSV 경로 (기본: 설정의 data.csv_path)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// 선택 종목 (반복 가능, 지정하지 않으면 전체)
    #[arg(short = 's', long = "ticker", global = true)]
    tickers: Vec<String>,

    /// 시작 날짜 (YYYY-MM-DD)
    #[arg(short = 'f', long, global = true)]
    from: Option<String>,

    /// 종료 날짜 (YYYY-MM-DD)
    #[arg(short, long, global = true)]
    to: Option<String>,

    /// 출력 형식 (table, csv, json)
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// 출력 파일 경로 (지정하지 않으면 stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// CSV의 daily_return 대신 종가로부터 일간 수익률 재계산
    #[arg(long, global = true)]
    recompute: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 전체 대시보드 보고서
    Report,

    /// 일간 수익률 표준편차 기준 변동성 순위
    Volatility {
        /// 상위 종목 수 (기본: 설정값)
        #[arg(long)]
        top: Option<usize>,
    },

    /// 최대 누적 수익률 기준 상위 종목
    Performers {
        /// 상위 종목 수 (기본: 설정값)
        #[arg(long)]
        top: Option<usize>,

        /// 순위 대신 누적 수익률 시계열 출력
        #[arg(long)]
        series: bool,
    },

    /// 종가 상관행렬
    Correlation,

    /// 월별 상승/하락 종목
    Monthly {
        /// 월별 선택 종목 수 (기본: 설정값)
        #[arg(long)]
        top: Option<usize>,
    },

    /// 섹터별 평균 연간 수익률
    Sectors,

    /// 종목 목록
    Tickers {
        /// 데이터셋 대신 기본 종목 유니버스 출력
        #[arg(long)]
        universe: bool,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Report => "report",
            Commands::Volatility { .. } => "volatility",
            Commands::Performers { .. } => "performers",
            Commands::Correlation => "correlation",
            Commands::Monthly { .. } => "monthly",
            Commands::Sectors => "sectors",
            Commands::Tickers { .. } => "tickers",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load configuration: {}", cli.config.display()))?;

    // 트레이싱 초기화
    init_logging(LogConfig::from(&app_config.logging))
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let command = cli.command.name();
    match run(cli, app_config) {
        Ok(()) => {
            info!(command, "Command completed");
            Ok(())
        }
        Err(e) => {
            error!(command, "Command failed: {:#}", e);
            Err(e)
        }
    }
}

fn run(cli: Cli, app_config: AppConfig) -> anyhow::Result<()> {
    let format = OutputFormat::parse(&cli.format)?;
    let output = cli.output.as_deref();

    // 유니버스 목록은 데이터 파일이 필요 없음
    if let Commands::Tickers { universe: true } = cli.command {
        let content = render_universe(&universe(), format)?;
        return write_output(&content, output);
    }

    let load = LoadConfig {
        data: cli
            .data
            .clone()
            .unwrap_or_else(|| app_config.data.csv_path.clone()),
        tickers: cli.tickers.clone(),
        from: cli.from.clone(),
        to: cli.to.clone(),
        recompute: cli.recompute || app_config.pipeline.recompute_daily_returns,
    };
    let dataset = load_dataset(&load)?;

    // 재계산은 로드 단계에서 필터 전에 끝남
    let mut pipeline_config = app_config.pipeline.clone();
    pipeline_config.recompute_daily_returns = false;
    match cli.command {
        Commands::Volatility { top: Some(k) } => pipeline_config.volatility_top_k = k,
        Commands::Performers { top: Some(k), .. } => pipeline_config.top_performers_k = k,
        Commands::Monthly { top: Some(n) } => pipeline_config.monthly_top_n = n,
        _ => {}
    }
    let pipeline = DashboardPipeline::new(pipeline_config)?;

    let prepared = pipeline.prepare(&dataset)?;

    let content = match cli.command {
        Commands::Report => render_report(&pipeline.report(&prepared)?, format)?,
        Commands::Volatility { .. } => render_volatility(&pipeline.volatility(&prepared)?, format)?,
        Commands::Performers { series, .. } => {
            render_performers(&pipeline.performers(&prepared)?, series, format)?
        }
        Commands::Correlation => render_correlation(&pipeline.correlation(&prepared)?, format)?,
        Commands::Monthly { .. } => render_monthly(&pipeline.monthly(&prepared)?, format)?,
        Commands::Sectors => render_sectors(&pipeline.sectors(&prepared)?, format)?,
        Commands::Tickers { .. } => render_dataset_tickers(&dataset_tickers(&prepared), format)?,
    };

    write_output(&content, output)
}
