use crate::core::report::Summary;

const SHARE_BASE: &str = "https://api.whatsapp.com/send?text=";

/// Plain-text summary sent to the organiser.
pub fn share_message(event: &str, summary: &Summary, capacity: u32) -> String {
    format!(
        "Summary {}: {} paying. Total: {}/{}.",
        event, summary.paying, summary.total, capacity
    )
}

/// Pre-filled message link carrying `share_message`.
pub fn share_link(event: &str, summary: &Summary, capacity: u32) -> String {
    format!(
        "{}{}",
        SHARE_BASE,
        urlencoding::encode(&share_message(event, summary, capacity))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_is_url_encoded() {
        let s = Summary {
            total: 3,
            paying: 1,
            exempt: 1,
            courtesy: 1,
        };
        assert_eq!(
            share_message("Test Party", &s, 10),
            "Summary Test Party: 1 paying. Total: 3/10."
        );
        assert_eq!(
            share_link("Test Party", &s, 10),
            "https://api.whatsapp.com/send?text=Summary%20Test%20Party%3A%201%20paying.%20Total%3A%203%2F10."
        );
    }
}
