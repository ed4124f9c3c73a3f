//! 주식 대시보드 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 가격 데이터 로드 및 종목/기간 선택
//! - 파생 뷰 렌더링 (표, CSV, JSON)
//! - 종목 목록 조회

pub mod commands;
