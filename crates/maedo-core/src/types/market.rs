//! 마켓 유형 정의.
//!
//! 거래 수수료율이 결정되는 마켓 구분을 정의합니다.
//! KRW 마켓과 코인 마켓(BTC/USDT)은 수수료율이 다릅니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 매매가 체결되는 마켓 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    /// 원화 마켓
    Krw,
    /// 비트코인 마켓
    Btc,
    /// 테더 마켓
    Usdt,
}

impl Market {
    /// 전체 마켓 목록.
    pub const ALL: [Market; 3] = [Market::Krw, Market::Btc, Market::Usdt];

    /// 마켓의 표준 문자열 표현을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Krw => "krw",
            Market::Btc => "btc",
            Market::Usdt => "usdt",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Market {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "krw" => Ok(Market::Krw),
            "btc" => Ok(Market::Btc),
            "usdt" => Ok(Market::Usdt),
            _ => Err(format!("Unknown market: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_from_str() {
        assert_eq!("krw".parse::<Market>().unwrap(), Market::Krw);
        assert_eq!("BTC".parse::<Market>().unwrap(), Market::Btc);
        assert_eq!("Usdt".parse::<Market>().unwrap(), Market::Usdt);
        assert!("eth".parse::<Market>().is_err());
    }

    #[test]
    fn test_market_display() {
        assert_eq!(Market::Krw.to_string(), "krw");
        assert_eq!(Market::Usdt.to_string(), "usdt");
    }

    #[test]
    fn test_market_serde() {
        let json = serde_json::to_string(&Market::Btc).unwrap();
        assert_eq!(json, "\"btc\"");
        let market: Market = serde_json::from_str("\"krw\"").unwrap();
        assert_eq!(market, Market::Krw);
    }
}
