mod birdeye;
mod config;
mod history;
mod probe;
mod provider;
mod stats;
mod token;
mod utils;

use birdeye::Birdeye;
use config::Config;
use flexi_logger::{detailed_format, Age, Cleanup, Criterion, Duplicate, Logger, Naming};
use log::{error, info};
use provider::MarketData;
use std::{thread, time::Duration};

fn run_probes(cfg: &Config, md: &dyn provider::MarketData) {
    let q = &cfg.query;

    if cfg.probes.contains(probe::ProbeTypes::TokenList) {
        match md.get_token_list(&q.sort_by, &q.sort_type, q.limit, q.offset) {
            Ok(tokens) => {
                info!("fetched {} tokens", tokens.len());
                for t in &tokens {
                    info!("- {}: ${:.2}", t.display_symbol(), t.price_or_zero());
                }
            }

            Err(e) => {
                error!("token list probe failed: {:?}", e);
            }
        }

        // Standard keys are throttled hard, keep requests apart.
        thread::sleep(Duration::from_secs(cfg.pacing_secs));
    }

    if cfg.probes.contains(probe::ProbeTypes::History) {
        match md.get_price_history(&q.address, &q.address_type, q.interval, q.days_back) {
            Ok(points) => match stats::PriceStats::compute(&points) {
                Some(ps) => {
                    stats::log_report(&q.token_name, &ps);
                }

                None => {
                    info!("no price points returned for {}", q.address);
                }
            },

            Err(e) => {
                error!("history probe failed: {:?}", e);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Logger::with_str("info")
        .log_to_file()
        .directory("logs")
        .format(detailed_format)
        .duplicate_to_stdout(Duplicate::Info)
        .create_symlink("current.log")
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(7),
        )
        .start()?;

    info!("starting up...");

    let config_file = "conf/bw.ini".to_string();
    let config = config::new(&config_file);
    info!("loaded configuration from {:?}.", config_file);

    let provider_config = config.provider.clone();
    let bex: Birdeye = MarketData::new(Box::new(provider_config));

    info!("using API key: {}", utils::mask_key(&bex.config.apikey));

    let valid = bex.validate_key();

    info!("provider {:?} key check: {:?} ", bex.config.name, valid);

    if valid == true {
        run_probes(&config, &bex);
    }

    Ok(())
}
