//! Play-head tracker - reads the live playback position for marking

use std::sync::Arc;

use crate::domain::model::TimeSpec;
use crate::ports::PlaybackPort;
use crate::session::MediaSession;

/// Read-only view of the shared playback element's position.
///
/// Positions are floored to whole seconds for marking; the engine runs on
/// second-granularity arguments anyway.
pub struct PlayheadTracker {
    playback: Arc<dyn PlaybackPort>,
}

impl PlayheadTracker {
    pub fn new(playback: Arc<dyn PlaybackPort>) -> Self {
        Self { playback }
    }

    /// Current position floored to whole seconds; `None` without a
    /// playable asset
    pub async fn marked_position(&self, session: &MediaSession) -> Option<TimeSpec> {
        if !session.is_playable() {
            return None;
        }
        Some(self.playback.current_position().await.floored())
    }
}
