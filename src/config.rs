use crate::history::Interval;
use crate::probe;
use ini::Ini;
use log::{debug, log_enabled, Level::Debug};
use std::collections::HashMap;
use std::env;

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub name: String,
    pub uri: String,
    pub apikey: String,
    // Value for the x-chain header, the provider serves several chains.
    pub chain: String,
    pub endpoints_map: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct QueryConfig {
    // Token list parameters, passed through to the provider unchanged.
    pub sort_by: String,
    pub sort_type: String,
    pub limit: u32,
    pub offset: u32,

    // History parameters.
    pub token_name: String,
    pub address: String,
    pub address_type: String,
    pub interval: Interval,
    pub days_back: u64,
}

#[derive(Debug)]
pub struct Config {
    pub provider: ProviderConfig,
    pub query: QueryConfig,
    pub probes: probe::ProbeTypes,
    // Seconds to sleep between consecutive requests.
    pub pacing_secs: u64,
}

pub fn new(cfg_file_path: &String) -> Config {
    let inifile = match Ini::load_from_file(cfg_file_path) {
        Ok(ini) => ini,

        Err(e) => {
            panic!("failed to load config file {:?}: {:?}", cfg_file_path, e);
        }
    };

    if log_enabled!(Debug) {
        debug!("configuration file: ");
        for (section, prop) in inifile.iter() {
            debug!("[{:?}]", section);
            for (k, v) in prop.iter() {
                debug!("{:?}={:?}", k, v);
            }
        }
    }

    let manager_section = match inifile.section(Some("Manager")) {
        Some(s) => s,
        None => panic!("required section \"Manager\" not found!"),
    };

    let provider_section = match inifile.section(Some("Provider")) {
        Some(s) => s,
        None => panic!("required section \"Provider\" not found!"),
    };

    let probes_section = match inifile.section(Some("Probes")) {
        Some(s) => s,
        None => panic!("required section \"Probes\" not found!"),
    };

    let query_section = match inifile.section(Some("Query")) {
        Some(s) => s,
        None => panic!("required section \"Query\" not found!"),
    };

    let provider_name = match provider_section.get("Name") {
        Some(pn) => pn,
        None => panic!("section \"Provider\" missing required \"Name\" entry"),
    };

    let uri = match provider_section.get("URI") {
        Some(u) => u,
        None => panic!("section \"Provider\" missing required \"URI\" entry"),
    };

    // The environment wins over the file so the checked in configuration
    // can carry a placeholder key.
    let apikey = match env::var("BIRDEYE_API_KEY") {
        Ok(k) => k,
        Err(_) => match provider_section.get("APIKey") {
            Some(ak) => ak.to_string(),
            None => panic!(
                "no API key: set BIRDEYE_API_KEY or the \"APIKey\" entry in section \"Provider\""
            ),
        },
    };

    if apikey.is_empty() {
        panic!("API key is empty");
    }

    let chain = match provider_section.get("Chain") {
        Some(c) => c,
        None => panic!("section \"Provider\" missing required \"Chain\" entry"),
    };

    // Read each endpoint entry and add to the hashmap of rest endpoints.
    let eps = match provider_section.get("Endpoints") {
        Some(eps) => eps,
        None => panic!("section \"Provider\" missing required \"Endpoints\" entry"),
    };

    // This entry looks like EP0=ep1,EP1=ep1, EP0 is the description of the
    // end point and ep0 is the actual rest end point to add to the api uri.
    let mut endpoints_map: HashMap<String, String> = HashMap::new();
    let endpoints = eps.split(",");
    for ep in endpoints {
        let kv = ep.split("=");
        let kvvec: Vec<&str> = kv.collect();
        endpoints_map.insert(kvvec[0].to_string(), kvvec[1].to_string());
    }

    // Parse [Manager] section, these are global options.
    //
    // RequestPacing keeps consecutive requests apart so standard keys
    // stay under the provider rate limit.
    let pacing_secs = match manager_section.get("RequestPacing") {
        Some(v) => match v.parse::<u64>() {
            Ok(p) => p,
            Err(e) => panic!("bad \"RequestPacing\" entry {:?}: {:?}", v, e),
        },

        None => 1,
    };

    // Parse [Probes] section, a comma separated list of enabled probes.
    let enabled_probes = match probes_section.get("Enabled") {
        Some(ep) => ep,
        None => panic!("section \"Probes\" missing required \"Enabled\" entry"),
    };

    let probe_bitmask = probe::from_str_cs(enabled_probes);

    // Parse [Query] section.
    let sort_by = match query_section.get("SortBy") {
        Some(s) => s,
        None => panic!("section \"Query\" missing required \"SortBy\" entry"),
    };

    let sort_type = match query_section.get("SortType") {
        Some(s) => s,
        None => panic!("section \"Query\" missing required \"SortType\" entry"),
    };

    let limit = match query_section.get("Limit") {
        Some(v) => match v.parse::<u32>() {
            Ok(l) => l,
            Err(e) => panic!("bad \"Limit\" entry {:?}: {:?}", v, e),
        },

        None => panic!("section \"Query\" missing required \"Limit\" entry"),
    };

    let offset = match query_section.get("Offset") {
        Some(v) => match v.parse::<u32>() {
            Ok(o) => o,
            Err(e) => panic!("bad \"Offset\" entry {:?}: {:?}", v, e),
        },

        None => 0,
    };

    let token_name = match query_section.get("Name") {
        Some(n) => n,
        None => panic!("section \"Query\" missing required \"Name\" entry"),
    };

    let address = match query_section.get("Address") {
        Some(a) => a,
        None => panic!("section \"Query\" missing required \"Address\" entry"),
    };

    let address_type = match query_section.get("AddressType") {
        Some(at) => at,
        None => "token",
    };

    let interval = match query_section.get("Interval") {
        Some(i) => Interval::from_str(i),
        None => panic!("section \"Query\" missing required \"Interval\" entry"),
    };

    let days_back = match query_section.get("DaysBack") {
        Some(v) => match v.parse::<u64>() {
            Ok(d) => d,
            Err(e) => panic!("bad \"DaysBack\" entry {:?}: {:?}", v, e),
        },

        None => panic!("section \"Query\" missing required \"DaysBack\" entry"),
    };

    Config {
        provider: ProviderConfig {
            name: provider_name.to_string(),
            uri: uri.to_string(),
            apikey: apikey,
            chain: chain.to_string(),
            endpoints_map: endpoints_map,
        },

        query: QueryConfig {
            sort_by: sort_by.to_string(),
            sort_type: sort_type.to_string(),
            limit: limit,
            offset: offset,
            token_name: token_name.to_string(),
            address: address.to_string(),
            address_type: address_type.to_string(),
            interval: interval,
            days_back: days_back,
        },

        probes: probe_bitmask,
        pacing_secs: pacing_secs,
    }
}
