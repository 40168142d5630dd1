use crate::history::PricePoint;
use crate::utils;

use log::info;

// Direction of the move between the first and last observation.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Trend {
    StronglyBullish,
    SlightlyBullish,
    SlightlyBearish,
    StronglyBearish,
}

// How wide the high/low range is relative to the average price.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum VolatilityBand {
    Low,
    Moderate,
    High,
}

#[derive(Debug)]
pub struct PriceStats {
    pub first: f64,
    pub last: f64,
    pub low: f64,
    pub high: f64,
    pub mean: f64,

    // Absolute move from first to last observation.
    pub change: f64,
    // Move as a percentage of the first price, None when the series
    // starts at zero.
    pub percent_change: Option<f64>,
    // High/low range as a percentage of the mean, None when the mean
    // is zero.
    pub volatility: Option<f64>,

    pub num_points: usize,
    pub first_time: u64,
    pub last_time: u64,
}

impl PriceStats {
    // Single pass over the series, None when there is nothing to compute.
    pub fn compute(points: &[PricePoint]) -> Option<PriceStats> {
        if points.is_empty() {
            return None;
        }

        let first = points[0].value;
        let last = points[points.len() - 1].value;

        let mut low = points[0].value;
        let mut high = points[0].value;
        let mut acc = 0.0;

        for p in points.iter() {
            if p.value < low {
                low = p.value;
            }

            if p.value > high {
                high = p.value;
            }

            acc += p.value;
        }

        let mean = acc / points.len() as f64;
        let change = last - first;

        let percent_change = if first != 0.0 {
            Some((change / first) * 100.0)
        } else {
            None
        };

        let volatility = if mean != 0.0 {
            Some(((high - low) / mean) * 100.0)
        } else {
            None
        };

        Some(PriceStats {
            first: first,
            last: last,
            low: low,
            high: high,
            mean: mean,
            change: change,
            percent_change: percent_change,
            volatility: volatility,
            num_points: points.len(),
            first_time: points[0].unixTime,
            last_time: points[points.len() - 1].unixTime,
        })
    }

    pub fn trend(&self) -> Option<Trend> {
        match self.percent_change {
            Some(pc) => {
                if pc > 5.0 {
                    Some(Trend::StronglyBullish)
                } else if pc > 0.0 {
                    Some(Trend::SlightlyBullish)
                } else if pc > -5.0 {
                    Some(Trend::SlightlyBearish)
                } else {
                    Some(Trend::StronglyBearish)
                }
            }

            None => None,
        }
    }

    pub fn volatility_band(&self) -> Option<VolatilityBand> {
        match self.volatility {
            Some(v) => {
                if v > 10.0 {
                    Some(VolatilityBand::High)
                } else if v > 5.0 {
                    Some(VolatilityBand::Moderate)
                } else {
                    Some(VolatilityBand::Low)
                }
            }

            None => None,
        }
    }
}

// Price analysis summary for one fetched series.
pub fn log_report(label: &str, ps: &PriceStats) {
    info!(
        "[REPORT] {}: {} points, {} to {}",
        label,
        ps.num_points,
        utils::format_ts(ps.first_time),
        utils::format_ts(ps.last_time),
    );

    info!(
        "[REPORT] {}: first: ${:.2}, last: ${:.2}, high: ${:.2}, low: ${:.2}, mean: ${:.2}",
        label, ps.first, ps.last, ps.high, ps.low, ps.mean,
    );

    match ps.percent_change {
        Some(pc) => {
            info!(
                "[REPORT] {}: change: ${:.2} ({:+.2}%), trend: {:?}",
                label,
                ps.change,
                pc,
                ps.trend().unwrap(),
            );
        }

        None => {
            info!(
                "[REPORT] {}: change: ${:.2} (percent change undefined, series starts at zero)",
                label, ps.change,
            );
        }
    }

    match ps.volatility {
        Some(v) => {
            info!(
                "[REPORT] {}: volatility: {:.1}% ({:?})",
                label,
                v,
                ps.volatility_band().unwrap(),
            );
        }

        None => {
            info!("[REPORT] {}: volatility undefined", label);
        }
    }
}
