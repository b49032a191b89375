//! Wall-clock helpers. All desk timestamps are local naive times.

use chrono::{Duration, Local, NaiveDateTime};

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// "12s", "3m 05s", "1h 02m".
pub fn format_elapsed(d: Duration) -> String {
    let secs = d.num_seconds().max(0);
    match secs {
        0..=59 => format!("{}s", secs),
        60..=3599 => format!("{}m {:02}s", secs / 60, secs % 60),
        _ => format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_formats() {
        assert_eq!(format_elapsed(Duration::seconds(12)), "12s");
        assert_eq!(format_elapsed(Duration::seconds(185)), "3m 05s");
        assert_eq!(format_elapsed(Duration::seconds(3720)), "1h 02m");
        assert_eq!(format_elapsed(Duration::seconds(-4)), "0s");
    }
}
