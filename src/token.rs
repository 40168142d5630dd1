// structures related to the token list endpoint.
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenListResponse {
    pub success: bool,
    pub data: Option<TokenListData>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenListData {
    pub items: Vec<TokenRecord>,
    pub total: Option<u64>,
}

// One tradable asset as the provider describes it. Everything except the
// address is optional, thin tokens come back with fields missing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct TokenRecord {
    pub address: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub decimals: Option<u8>,
    pub price: Option<f64>,
    pub mc: Option<f64>,
    pub v24hUSD: Option<f64>,
    pub v24hChangePercent: Option<f64>,
    pub liquidity: Option<f64>,
}

impl TokenRecord {
    // Symbol for display purposes only.
    pub fn display_symbol(&self) -> &str {
        match &self.symbol {
            Some(s) => s,
            None => "Unknown",
        }
    }

    #[allow(dead_code)]
    pub fn price_or_zero(&self) -> f64 {
        match self.price {
            Some(p) => p,
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_record() {
        let j = r#"{
            "address": "So11111111111111111111111111111111111111112",
            "symbol": "SOL",
            "name": "Wrapped SOL",
            "decimals": 9,
            "price": 151.2,
            "mc": 71000000000.0,
            "v24hUSD": 1500000000.0,
            "v24hChangePercent": 3.4,
            "liquidity": 250000000.0
        }"#;

        let t: TokenRecord = serde_json::from_str(j).unwrap();
        assert_eq!(t.symbol.as_deref(), Some("SOL"));
        assert_eq!(t.decimals, Some(9));
        assert_eq!(t.display_symbol(), "SOL");
        assert!((t.price_or_zero() - 151.2).abs() < 1e-9);
    }

    #[test]
    fn parse_thin_record() {
        // Tokens without metadata only carry an address.
        let j = r#"{"address": "abcdef"}"#;
        let t: TokenRecord = serde_json::from_str(j).unwrap();
        assert_eq!(t.display_symbol(), "Unknown");
        assert_eq!(t.price, None);
        assert_eq!(t.price_or_zero(), 0.0);
    }

    #[test]
    fn parse_list_envelope() {
        let j = r#"{
            "success": true,
            "data": {
                "items": [
                    {"address": "a", "symbol": "AAA", "price": 1.5},
                    {"address": "b", "symbol": "BBB", "price": 0.25}
                ],
                "total": 2
            }
        }"#;

        let tl: TokenListResponse = serde_json::from_str(j).unwrap();
        assert_eq!(tl.success, true);
        let data = tl.data.unwrap();
        assert_eq!(data.items.len(), 2);
        assert_eq!(data.total, Some(2));
        assert_eq!(data.items[1].display_symbol(), "BBB");
    }

    #[test]
    fn parse_failure_envelope() {
        // Error responses come back without a data section.
        let j = r#"{"success": false}"#;
        let tl: TokenListResponse = serde_json::from_str(j).unwrap();
        assert_eq!(tl.success, false);
        assert!(tl.data.is_none());
    }
}
