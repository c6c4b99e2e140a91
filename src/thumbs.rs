//! Thumbnail sampler - sequential preview frames across the asset

use std::sync::Arc;

use tracing::debug;

use crate::domain::model::{Thumbnail, ThumbnailSet, TimeSpec};
use crate::error::{StitchError, StitchResult};
use crate::ports::PlaybackPort;

/// Offset back from the asset end for the guaranteed tail sample
const TAIL_OFFSET_SECONDS: f64 = 0.1;

/// Samples frames across the asset duration on the shared playback
/// element.
///
/// Seeks are strictly sequential: each one is awaited before the next is
/// issued, and only one sampling pass may be active at a time. The set is
/// replaced wholesale per pass; a failed pass leaves the previous set
/// untouched.
pub struct ThumbnailSampler {
    playback: Arc<dyn PlaybackPort>,
    set: ThumbnailSet,
    sampling: bool,
}

impl ThumbnailSampler {
    pub fn new(playback: Arc<dyn PlaybackPort>) -> Self {
        Self {
            playback,
            set: ThumbnailSet::default(),
            sampling: false,
        }
    }

    /// Run one sampling pass over `duration`, producing about
    /// `target_count` frames plus the tail sample near the asset end.
    pub async fn sample(
        &mut self,
        duration: TimeSpec,
        target_count: u32,
        width: u32,
        height: u32,
    ) -> StitchResult<&ThumbnailSet> {
        if self.sampling {
            return Err(StitchError::SamplerBusy);
        }
        self.sampling = true;
        let result = self.run_pass(duration, target_count, width, height).await;
        self.sampling = false;

        match result {
            Ok(frames) => {
                debug!(count = frames.len(), "thumbnail pass complete");
                self.set = ThumbnailSet::from_frames(frames);
                Ok(&self.set)
            }
            Err(e) => Err(e),
        }
    }

    async fn run_pass(
        &self,
        duration: TimeSpec,
        target_count: u32,
        width: u32,
        height: u32,
    ) -> StitchResult<Vec<Thumbnail>> {
        let interval = ((duration.seconds / f64::from(target_count.max(1))).floor()).max(1.0);
        let mut frames = Vec::new();

        let mut offset = 0.0;
        while offset < duration.seconds {
            frames.push(self.capture_at(offset, width, height).await?);
            offset += interval;
        }

        // Tail sample so the very end of the asset always has a frame
        let tail = (duration.seconds - TAIL_OFFSET_SECONDS).max(0.0);
        frames.push(self.capture_at(tail, width, height).await?);

        Ok(frames)
    }

    async fn capture_at(&self, offset: f64, width: u32, height: u32) -> StitchResult<Thumbnail> {
        let at = TimeSpec::from_seconds(offset);
        self.playback.seek_to(at).await?;
        let data = self.playback.capture_frame(width, height).await?;
        Ok(Thumbnail {
            offset: at,
            width,
            height,
            data,
        })
    }

    pub fn thumbnails(&self) -> &ThumbnailSet {
        &self.set
    }

    /// Discard the set; a new asset load replaces it in full
    pub fn clear(&mut self) {
        self.set = ThumbnailSet::default();
    }
}
