//! 기초 통계 함수.

use std::cmp::Ordering;

use stockdash_core::{DashError, DashResult};

/// 산술 평균. 빈 입력은 None.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 표본 표준편차 (분모 n - 1). 관측치가 2개 미만이면 None.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// 단일 종목의 표본 표준편차. 관측치 부족 시 `InsufficientObservations`.
pub fn sample_std_dev_checked(ticker: &str, values: &[f64]) -> DashResult<f64> {
    sample_std_dev(values).ok_or_else(|| DashError::InsufficientObservations {
        ticker: ticker.to_string(),
        observations: values.len(),
        required: 2,
    })
}

/// Pearson 상관계수.
///
/// 길이가 다르거나 2개 미만이거나 한쪽의 분산이 0이면 None.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// 값 내림차순, 동률이면 티커 오름차순.
pub(crate) fn desc_then_ticker(a: (f64, &str), b: (f64, &str)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1))
}

/// 값 오름차순, 동률이면 티커 오름차순.
pub(crate) fn asc_then_ticker(a: (f64, &str), b: (f64, &str)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1))
}
