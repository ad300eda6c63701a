use unwind::mood::MoodEntry;

/// Lowest y bound of the mood chart; intensities run 1 to 5
pub const MAX_INTENSITY: f64 = 5.0;

/// One point per entry: (position in the log, intensity)
pub fn mood_coords(entries: &[MoodEntry]) -> Vec<(f64, f64)> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| ((i + 1) as f64, e.intensity as f64))
        .collect()
}

/// Compute X (entry number) and Y (intensity) bounds for the history chart
pub fn compute_chart_params(coords: &[(f64, f64)]) -> (f64, f64) {
    let highest = coords
        .iter()
        .map(|&(_, y)| y)
        .fold(MAX_INTENSITY, f64::max);

    let mut span = coords.last().map(|p| p.0).unwrap_or(1.0);
    if span < 2.0 {
        span = 2.0;
    }

    (span, highest.round())
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.1}")
    }
}
