//! Commit-message opt-out of automation.

use tracing::debug;
use tripwire_core::HookEventType;

/// Events whose runs can be skipped from the commit message.
const SKIPPABLE_EVENTS: [HookEventType; 3] = [
    HookEventType::Push,
    HookEventType::PullRequest,
    HookEventType::PullRequestSync,
];

/// Decides whether an event should be ignored because its commit message
/// carries a skip marker such as `[skip ci]`.
#[derive(Debug, Clone, Default)]
pub struct SkipFilter {
    markers: Vec<String>,
}

impl SkipFilter {
    #[must_use]
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }

    /// Returns true if the event is skippable and the message contains a marker.
    #[must_use]
    pub fn should_skip(&self, event: HookEventType, commit_message: &str) -> bool {
        if !SKIPPABLE_EVENTS.contains(&event) {
            return false;
        }
        match self.markers.iter().find(|m| commit_message.contains(m.as_str())) {
            Some(marker) => {
                debug!(%event, %marker, "skipping workflows because of commit message marker");
                true
            }
            None => false,
        }
    }
}
