pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Round to one decimal place, the precision every mood average is shown at
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// m:ss clock face for a number of seconds
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
