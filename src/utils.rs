use std::time::{SystemTime, UNIX_EPOCH};

// Current time as whole seconds since the epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}

// Render a unix timestamp the way the reports display time ranges.
pub fn format_ts(ts: u64) -> String {
    match chrono::DateTime::from_timestamp(ts as i64, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ts.to_string(),
    }
}

// Keys are secrets, only the first and last few characters are ever
// shown in logs.
pub fn mask_key(key: &str) -> String {
    if key.len() < 12 {
        return String::from("*****");
    }

    format!("{}...{}", &key[..5], &key[key.len() - 5..])
}
