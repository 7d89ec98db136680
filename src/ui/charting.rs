/// Width of each bar so `count` bars with `gap` spacing fit in `available` columns
pub fn compute_bar_width(available: u16, count: usize, gap: u16) -> u16 {
    if count == 0 {
        return 0;
    }
    let count = count as u16;
    let gaps = gap.saturating_mul(count.saturating_sub(1));
    (available.saturating_sub(gaps) / count).clamp(1, 9)
}

/// Upper bound for the recent-results chart, never below 100ms
pub fn compute_chart_max(recent: &[u32]) -> u64 {
    let highest = recent.iter().copied().max().unwrap_or(0);
    u64::from(highest).max(100)
}

/// Millisecond value or the placeholder dash
pub fn format_ms(value: Option<u32>) -> String {
    match value {
        Some(ms) => format!("{ms} ms"),
        None => "—".to_string(),
    }
}

pub fn format_spread(value: Option<f64>) -> String {
    match value {
        Some(sd) => format!("±{sd:.1} ms"),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_bar_width() {
        assert_eq!(compute_bar_width(40, 0, 1), 0);
        assert_eq!(compute_bar_width(40, 5, 1), 7);
        assert_eq!(compute_bar_width(200, 2, 1), 9);
        assert_eq!(compute_bar_width(3, 5, 1), 1);
    }

    #[test]
    fn test_compute_chart_max() {
        assert_eq!(compute_chart_max(&[]), 100);
        assert_eq!(compute_chart_max(&[40, 80]), 100);
        assert_eq!(compute_chart_max(&[240, 310, 199]), 310);
    }

    #[test]
    fn test_format_ms() {
        assert_eq!(format_ms(Some(245)), "245 ms");
        assert_eq!(format_ms(None), "—");
        assert_eq!(format_spread(Some(12.34)), "±12.3 ms");
        assert_eq!(format_spread(None), "—");
    }
}
