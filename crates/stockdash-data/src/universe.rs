//! 기본 종목 유니버스 (NIFTY 50 구성 종목).

/// 선택 가능한 종목 목록.
pub const NIFTY50_TICKERS: [&str; 50] = [
    "SBIN", "BAJFINANCE", "TITAN", "ITC", "TCS", "LT", "TATACONSUM", "RELIANCE", "HCLTECH",
    "JSWSTEEL", "ULTRACEMCO", "POWERGRID", "INFY", "TRENT", "BHARTIARTL", "TATAMOTORS", "WIPRO",
    "TECHM", "NTPC", "HINDUNILVR", "APOLLOHOSP", "M&M", "GRASIM", "ICICIBANK", "ADANIENT",
    "ADANIPORTS", "BEL", "BAJAJFINSV", "EICHERMOT", "COALINDIA", "MARUTI", "INDUSINDBK",
    "ASIANPAINT", "TATASTEEL", "HDFCLIFE", "DRREDDY", "SUNPHARMA", "KOTAKBANK", "SHRIRAMFIN",
    "NESTLEIND", "ONGC", "CIPLA", "BPCL", "BRITANNIA", "SBILIFE", "HINDALCO", "HEROMOTOCO",
    "AXISBANK", "HDFCBANK", "BAJAJ-AUTO",
];

/// 기본 선택 종목.
pub const DEFAULT_SELECTION: [&str; 2] = ["SBIN", "BAJFINANCE"];

/// 유니버스에 포함된 티커인지 확인합니다 (대소문자 무시).
pub fn is_known_ticker(ticker: &str) -> bool {
    NIFTY50_TICKERS
        .iter()
        .any(|t| t.eq_ignore_ascii_case(ticker.trim()))
}
