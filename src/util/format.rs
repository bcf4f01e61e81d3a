use std::time::Duration;

/// `1260 -> "1.3K"`, values below a thousand are printed as is.
pub fn format_views(views: u64) -> String {
    if views >= 1000 {
        format!("{:.1}K", views as f64 / 1000.0)
    } else {
        views.to_string()
    }
}

/// `m:ss`, with unknown durations shown as `0:00`.
pub fn format_time(duration: Option<Duration>) -> String {
    let total = duration.map(|d| d.as_secs()).unwrap_or_default();
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_are_abbreviated_from_a_thousand() {
        assert_eq!(format_views(999), "999");
        assert_eq!(format_views(1234), "1.2K");
        assert_eq!(format_views(1260), "1.3K");
        assert_eq!(format_views(12_000), "12.0K");
    }

    #[test]
    fn time_pads_seconds() {
        assert_eq!(format_time(None), "0:00");
        assert_eq!(format_time(Some(Duration::from_secs(65))), "1:05");
        assert_eq!(format_time(Some(Duration::from_millis(600_999))), "10:00");
    }
}
