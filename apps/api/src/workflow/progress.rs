use std::time::Duration;

/// How long each progress message stays on screen.
pub const STATUS_ROTATION_INTERVAL: Duration = Duration::from_millis(2500);

pub const STATUS_MESSAGES: &[&str] = &[
    "Reading your material...",
    "Identifying the key concepts...",
    "Writing clear explanations...",
    "Spotting common mistakes...",
    "Drafting practice questions...",
    "Putting your study pack together...",
];

/// The message to show `elapsed` into a submission. Cycles through
/// `STATUS_MESSAGES`; purely cosmetic.
pub fn status_message(elapsed: Duration) -> &'static str {
    let step = elapsed.as_millis() / STATUS_ROTATION_INTERVAL.as_millis();
    STATUS_MESSAGES[(step % STATUS_MESSAGES.len() as u128) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_message_until_first_interval() {
        assert_eq!(status_message(Duration::ZERO), STATUS_MESSAGES[0]);
        assert_eq!(status_message(Duration::from_millis(2499)), STATUS_MESSAGES[0]);
        assert_eq!(status_message(Duration::from_millis(2500)), STATUS_MESSAGES[1]);
    }

    #[test]
    fn test_messages_wrap_around() {
        let full_cycle = STATUS_ROTATION_INTERVAL * STATUS_MESSAGES.len() as u32;
        assert_eq!(status_message(full_cycle), STATUS_MESSAGES[0]);
        assert_eq!(
            status_message(full_cycle + Duration::from_millis(5000)),
            STATUS_MESSAGES[2]
        );
    }
}
