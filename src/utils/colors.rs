//! ANSI colour helpers for guest tables and counters.

use crate::models::category::{PaymentStatus, SyncState};
use ansi_term::Colour;

pub fn color_for_status(status: PaymentStatus) -> Colour {
    match status {
        PaymentStatus::Paying => Colour::Green,
        PaymentStatus::Exempt => Colour::Cyan,
        PaymentStatus::Courtesy => Colour::Purple,
    }
}

pub fn color_for_sync(state: SyncState) -> Colour {
    match state {
        SyncState::Local => Colour::Fixed(244),
        SyncState::Pending => Colour::Yellow,
        SyncState::Synced => Colour::Green,
        SyncState::Failed => Colour::Red,
    }
}

/// Text progress bar, e.g. `[######----]`. `ratio` is clamped to 0..=1.
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Green below 80%, yellow up to the limit, red once reached.
pub fn color_for_capacity(ratio: f64, reached: bool) -> Colour {
    if reached {
        Colour::Red
    } else if ratio >= 0.8 {
        Colour::Yellow
    } else {
        Colour::Green
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_clamped() {
        assert_eq!(progress_bar(0.5, 10), "[#####-----]");
        assert_eq!(progress_bar(1.7, 4), "[####]");
        assert_eq!(progress_bar(-1.0, 4), "[----]");
    }
}
