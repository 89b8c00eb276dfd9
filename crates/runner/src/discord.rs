//! Discord webhook notification

use common::{Error, Result};
use serde_json::json;
use tracing::debug;

/// Discord rejects message content over 2000 characters
const MAX_MESSAGE_LEN: usize = 2000;

/// Clamp a message to Discord's content limit, marking the cut with an
/// ellipsis.
pub fn truncate_message(message: &str) -> String {
    if message.chars().count() > MAX_MESSAGE_LEN {
        let kept: String = message.chars().take(MAX_MESSAGE_LEN - 3).collect();
        format!("{}...", kept)
    } else {
        message.to_string()
    }
}

/// Post one message to the webhook. Delivery errors are surfaced to the
/// caller and not retried.
pub async fn send_discord_message(
    client: &reqwest::Client,
    webhook_url: &str,
    message: &str,
) -> Result<()> {
    debug!("Posting {} chars to Discord", message.chars().count());

    let resp = client
        .post(webhook_url)
        .json(&json!({ "content": message }))
        .send()
        .await
        .map_err(|e| Error::Notify(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(Error::Notify(format!(
            "webhook returned {}",
            resp.status()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_unchanged() {
        assert_eq!(truncate_message("**finance/summary**: {}"),
            "**finance/summary**: {}");
    }

    #[test]
    fn test_message_at_limit_unchanged() {
        let message = "x".repeat(2000);
        assert_eq!(truncate_message(&message), message);
    }

    #[test]
    fn test_long_message_truncated_to_1997_plus_ellipsis() {
        let message = "x".repeat(2500);
        let truncated = truncate_message(&message);
        assert_eq!(truncated.chars().count(), 2000);
        assert!(truncated.ends_with("..."));
        assert_eq!(&truncated[..1997], &message[..1997]);
    }

    #[test]
    fn test_truncation_respects_multibyte_content() {
        let message = "é".repeat(2500);
        let truncated = truncate_message(&message);
        assert_eq!(truncated.chars().count(), 2000);
        assert!(truncated.ends_with("..."));
    }
}
