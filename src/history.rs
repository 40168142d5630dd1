// structures related to the historical price endpoint.
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct HistoryResponse {
    pub success: bool,
    pub data: Option<HistoryData>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HistoryData {
    pub items: Vec<PricePoint>,
}

// A single (timestamp, price) observation within a series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct PricePoint {
    pub unixTime: u64,
    pub value: f64,
}

// Candle width the provider aggregates price observations into.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Interval {
    FiveMinutes,
    Hour,
    Day,
}

impl Interval {
    // Wire form of the interval, this goes into the "type" query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            Interval::FiveMinutes => "5m",
            Interval::Hour => "1h",
            Interval::Day => "1d",
        }
    }

    // How many observations a full day at this interval yields.
    pub fn points_per_day(&self) -> u64 {
        match self {
            Interval::FiveMinutes => 288,
            Interval::Hour => 24,
            Interval::Day => 1,
        }
    }

    pub fn from_str(s: &str) -> Interval {
        if s.eq_ignore_ascii_case("5m") {
            Interval::FiveMinutes
        } else if s.eq_ignore_ascii_case("1h") {
            Interval::Hour
        } else if s.eq_ignore_ascii_case("1d") {
            Interval::Day
        } else {
            panic!("unsupported interval: {:?}", s);
        }
    }
}
