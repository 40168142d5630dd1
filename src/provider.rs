use crate::config::ProviderConfig;
use crate::history::{Interval, PricePoint};
use crate::token::TokenRecord;
use log::{error, info};

// Why a request produced no data. There is no retry or recovery, a
// failed call fails that probe.
#[derive(Debug, PartialEq)]
pub enum FetchError {
    // HTTP 429.
    RateLimited,
    // HTTP 400.
    BadRequest,
    // Any other non success status.
    Http(u16),
    // Transport level failure, details are logged.
    Network,
    // Body did not deserialize into the expected shape.
    Malformed,
    // Body parsed but the provider flagged the request as failed.
    ApiFailure,
}

pub trait MarketData {
    fn new(config: Box<ProviderConfig>) -> Self
    where
        Self: Sized;

    fn get_config(&self) -> &Box<ProviderConfig>;

    fn get_token_list(
        &self,
        sort_by: &str,
        sort_type: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<TokenRecord>, FetchError>;

    fn get_price_history(
        &self,
        address: &str,
        address_type: &str,
        interval: Interval,
        days_back: u64,
    ) -> Result<Vec<PricePoint>, FetchError>;

    // One authenticated request against the token list endpoint, the
    // key is good iff the provider answers with a success status.
    fn validate_key(&self) -> bool {
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

        let list_uri = format!("{}{}", config.uri, list_ep);
        let client = reqwest::blocking::Client::new();
        match client
            .get(&list_uri)
            .header("X-API-KEY", &config.apikey)
            .header("x-chain", &config.chain)
            .header("accept", "application/json")
            .send()
        {
            Ok(s) => {
                if s.status().is_success() {
                    info!("key check against {:?} passed", config.name);
                    true
                } else {
                    error!(
                        "key check against {:?} failed: HTTP {}",
                        config.name,
                        s.status().as_u16()
                    );
                    false
                }
            }

            Err(e) => {
                error!("key check against {:?} failed: {:?}", config.name, e);
                false
            }
        }
    }
}
