use crate::config::ProviderConfig;
use crate::history::{HistoryResponse, Interval, PricePoint};
use crate::provider::{FetchError, MarketData};
use crate::token::{TokenListResponse, TokenRecord};
use crate::utils;

use log::{error, info};
use std::collections::HashMap;

#[derive(Debug)]
pub struct Birdeye {
    pub config: Box<ProviderConfig>,
}

// Map a non success status to the matching fetch error.
fn status_error(code: u16) -> FetchError {
    if code == 429 {
        error!("rate limit exceeded, wait before trying again");
        FetchError::RateLimited
    } else if code == 400 {
        error!("bad request, check the query parameters");
        FetchError::BadRequest
    } else {
        error!("request failed: HTTP {}", code);
        FetchError::Http(code)
    }
}

impl MarketData for Birdeye {
    fn new(config: Box<ProviderConfig>) -> Self {
        Birdeye { config: config }
    }

    fn get_config(&self) -> &Box<ProviderConfig> {
        &self.config
    }

    fn get_token_list(
        &self,
        sort_by: &str,
        sort_type: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TokenRecord>, FetchError> {
        info!("start get_token_list");
        let config = self.get_config();
        let list_ep = match config.endpoints_map.get(&String::from("TOKENLIST")) {
            Some(ep) => ep,
            None => {
                panic!(
                    "no TOKENLIST endpoint configured for provider {:?}",
                    config.name
                );
            }
        };

        let limit_str = limit.to_string();
        let offset_str = offset.to_string();
        let mut params: HashMap<&str, &str> = HashMap::with_capacity(4);
        params.insert("sort_by", sort_by);
        params.insert("sort_type", sort_type);
        params.insert("limit", &limit_str);
        params.insert("offset", &offset_str);

        let list_uri = format!("{}{}", config.uri, list_ep);
        let client = reqwest::blocking::Client::new();
        match client
            .get(&list_uri)
            .header("X-API-KEY", &config.apikey)
            .header("x-chain", &config.chain)
            .header("accept", "application/json")
            .query(&params)
            .send()
        {
            Ok(s) => {
                if s.status().is_success() {
                    match s.json::<TokenListResponse>() {
                        Ok(tl) => {
                            if !tl.success {
                                error!("provider reported token list request as failed");
                                return Err(FetchError::ApiFailure);
                            }

                            let items = match tl.data {
                                Some(d) => d.items,
                                None => Vec::new(),
                            };

                            info!("end get_token_list, {} tokens", items.len());
                            Ok(items)
                        }

                        Err(e) => {
                            error!("failed to deserialize token list: {:?}", e);
                            Err(FetchError::Malformed)
                        }
                    }
                } else {
                    Err(status_error(s.status().as_u16()))
                }
            }

            Err(e) => {
                error!("failed to get token list: {:?}", e);
                Err(FetchError::Network)
            }
        }
    }

    fn get_price_history(
        &self,
        address: &str,
        address_type: &str,
        interval: Interval,
        days_back: u64,
    ) -> Result<Vec<PricePoint>, FetchError> {
        info!("start get_price_history");

        if address.is_empty() {
            error!("no token address supplied");
            return Err(FetchError::BadRequest);
        }

        let config = self.get_config();
        let history_ep = match config.endpoints_map.get(&String::from("HISTORY")) {
            Some(ep) => ep,
            None => {
                panic!(
                    "no HISTORY endpoint configured for provider {:?}",
                    config.name
                );
            }
        };

        let time_to = utils::unix_now();
        let time_from = time_to - (days_back * 24 * 60 * 60);

        info!(
            "fetching {} data for {}, time range: {} to {}",
            interval.as_query(),
            address,
            utils::format_ts(time_from),
            utils::format_ts(time_to),
        );
        info!(
            "expected data points: {}",
            days_back * interval.points_per_day()
        );

        let from_str = time_from.to_string();
        let to_str = time_to.to_string();
        let mut params: HashMap<&str, &str> = HashMap::with_capacity(5);
        params.insert("address", address);
        params.insert("address_type", address_type);
        params.insert("type", interval.as_query());
        params.insert("time_from", &from_str);
        params.insert("time_to", &to_str);

        let history_uri = format!("{}{}", config.uri, history_ep);
        let client = reqwest::blocking::Client::new();
        match client
            .get(&history_uri)
            .header("X-API-KEY", &config.apikey)
            .header("x-chain", &config.chain)
            .header("accept", "application/json")
            .query(&params)
            .send()
        {
            Ok(s) => {
                if s.status().is_success() {
                    match s.json::<HistoryResponse>() {
                        Ok(h) => {
                            if !h.success {
                                error!("provider reported history request as failed");
                                return Err(FetchError::ApiFailure);
                            }

                            let items = match h.data {
                                Some(d) => d.items,
                                None => Vec::new(),
                            };

                            info!("end get_price_history, {} points", items.len());
                            Ok(items)
                        }

                        Err(e) => {
                            error!("failed to deserialize price history: {:?}", e);
                            Err(FetchError::Malformed)
                        }
                    }
                } else {
                    Err(status_error(s.status().as_u16()))
                }
            }

            Err(e) => {
                error!("failed to get price history for {:?}: {:?}", address, e);
                Err(FetchError::Network)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn test_config(uri: String) -> Box<ProviderConfig> {
        let mut endpoints_map: HashMap<String, String> = HashMap::new();
        endpoints_map.insert("TOKENLIST".to_string(), "/defi/tokenlist".to_string());
        endpoints_map.insert("HISTORY".to_string(), "/defi/history_price".to_string());

        Box::new(ProviderConfig {
            name: "birdeye".to_string(),
            uri: uri,
            apikey: "test-key-1234567890".to_string(),
            chain: "solana".to_string(),
            endpoints_map: endpoints_map,
        })
    }

    #[test]
    fn token_list_ok() {
        let mut server = mockito::Server::new();
        let body = r#"{
            "success": true,
            "data": {
                "items": [
                    {"address": "So11111111111111111111111111111111111111112",
                     "symbol": "SOL", "name": "Wrapped SOL", "decimals": 9,
                     "price": 151.2, "v24hChangePercent": 3.4}
                ],
                "total": 1
            }
        }"#;

        let _m = server
            .mock("GET", "/defi/tokenlist")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();

        let bex: Birdeye = MarketData::new(test_config(server.url()));
        let tokens = bex.get_token_list("price", "desc", 1, 0).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].display_symbol(), "SOL");
    }

    #[test]
    fn token_list_sends_auth_and_query() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/defi/tokenlist")
            .match_header("X-API-KEY", "test-key-1234567890")
            .match_header("x-chain", "solana")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("sort_by".into(), "v24hChangePercent".into()),
                Matcher::UrlEncoded("sort_type".into(), "desc".into()),
                Matcher::UrlEncoded("limit".into(), "100".into()),
                Matcher::UrlEncoded("offset".into(), "25".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true, "data": {"items": []}}"#)
            .create();

        let bex: Birdeye = MarketData::new(test_config(server.url()));
        let tokens = bex
            .get_token_list("v24hChangePercent", "desc", 100, 25)
            .unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn token_list_rate_limited() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/defi/tokenlist")
            .match_query(Matcher::Any)
            .with_status(429)
            .create();

        let bex: Birdeye = MarketData::new(test_config(server.url()));
        let r = bex.get_token_list("price", "desc", 1, 0);
        assert_eq!(r, Err(FetchError::RateLimited));
    }

    #[test]
    fn token_list_malformed_body() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/defi/tokenlist")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json at all")
            .create();

        let bex: Birdeye = MarketData::new(test_config(server.url()));
        let r = bex.get_token_list("price", "desc", 1, 0);
        assert_eq!(r, Err(FetchError::Malformed));
    }

    #[test]
    fn token_list_api_failure() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/defi/tokenlist")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"success": false}"#)
            .create();

        let bex: Birdeye = MarketData::new(test_config(server.url()));
        let r = bex.get_token_list("price", "desc", 1, 0);
        assert_eq!(r, Err(FetchError::ApiFailure));
    }

    #[test]
    fn history_ok() {
        let mut server = mockito::Server::new();
        let body = r#"{
            "success": true,
            "data": {
                "items": [
                    {"unixTime": 1700000000, "value": 1.0},
                    {"unixTime": 1700000300, "value": 1.1}
                ]
            }
        }"#;

        let _m = server
            .mock("GET", "/defi/history_price")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "address".into(),
                    "So11111111111111111111111111111111111111112".into(),
                ),
                Matcher::UrlEncoded("address_type".into(), "token".into()),
                Matcher::UrlEncoded("type".into(), "5m".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();

        let bex: Birdeye = MarketData::new(test_config(server.url()));
        let points = bex
            .get_price_history(
                "So11111111111111111111111111111111111111112",
                "token",
                Interval::FiveMinutes,
                1,
            )
            .unwrap();
        assert_eq!(points.len(), 2);
        assert!((points[1].value - 1.1).abs() < 1e-9);
    }

    #[test]
    fn history_empty_data() {
        // A success envelope without a data section is an empty series,
        // not an error.
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/defi/history_price")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"success": true}"#)
            .create();

        let bex: Birdeye = MarketData::new(test_config(server.url()));
        let points = bex
            .get_price_history("someaddress", "token", Interval::Hour, 1)
            .unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn history_empty_address() {
        // Rejected before any request goes out, no server needed.
        let bex: Birdeye = MarketData::new(test_config("http://127.0.0.1:1".to_string()));
        let r = bex.get_price_history("", "token", Interval::Hour, 1);
        assert_eq!(r, Err(FetchError::BadRequest));
    }

    #[test]
    fn validate_key_good() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/defi/tokenlist")
            .match_header("X-API-KEY", "test-key-1234567890")
            .with_status(200)
            .with_body(r#"{"success": true, "data": {"items": []}}"#)
            .create();

        let bex: Birdeye = MarketData::new(test_config(server.url()));
        assert_eq!(bex.validate_key(), true);
    }

    #[test]
    fn validate_key_rejected() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/defi/tokenlist")
            .with_status(401)
            .create();

        let bex: Birdeye = MarketData::new(test_config(server.url()));
        assert_eq!(bex.validate_key(), false);
    }

    #[test]
    fn validate_key_unreachable() {
        // Nothing listens on the url once the server is dropped.
        let url = {
            let server = mockito::Server::new();
            server.url()
        };

        let bex: Birdeye = MarketData::new(test_config(url));
        assert_eq!(bex.validate_key(), false);
    }
}
