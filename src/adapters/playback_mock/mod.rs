// Recording mock for the playback port
//
// Duration and position are scripted; seeks are journaled and checked for
// overlap so tests can prove sampling stays strictly sequential.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::model::{MediaAsset, TimeSpec};
use crate::error::{StitchError, StitchResult};
use crate::ports::PlaybackPort;

#[derive(Default)]
pub struct MockPlaybackAdapter {
    media_duration: Mutex<Option<f64>>,
    attached: Mutex<Option<String>>,
    position: Mutex<f64>,
    seeks: Mutex<Vec<f64>>,
    seek_in_progress: AtomicBool,
    overlap_detected: AtomicBool,
    fail_capture: AtomicBool,
}

impl MockPlaybackAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration the next attached asset will report; `None` models an
    /// asset whose metadata cannot be derived
    pub fn set_media_duration(&self, seconds: Option<f64>) {
        *self.media_duration.lock().unwrap() = seconds;
    }

    /// Move the play-head directly, as user scrubbing would
    pub fn set_position(&self, seconds: f64) {
        *self.position.lock().unwrap() = seconds;
    }

    pub fn fail_capture(&self) {
        self.fail_capture.store(true, Ordering::SeqCst);
    }

    /// Every seek target issued, in order
    pub fn seeks(&self) -> Vec<f64> {
        self.seeks.lock().unwrap().clone()
    }

    /// True if two seeks were ever in flight at once
    pub fn seek_overlap_detected(&self) -> bool {
        self.overlap_detected.load(Ordering::SeqCst)
    }

    pub fn attached_name(&self) -> Option<String> {
        self.attached.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaybackPort for MockPlaybackAdapter {
    async fn attach(&self, asset: &MediaAsset) -> StitchResult<()> {
        *self.attached.lock().unwrap() = Some(asset.name.clone());
        *self.position.lock().unwrap() = 0.0;
        Ok(())
    }

    async fn duration(&self) -> StitchResult<Option<TimeSpec>> {
        if self.attached.lock().unwrap().is_none() {
            return Ok(None);
        }
        let duration = *self.media_duration.lock().unwrap();
        Ok(duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .map(TimeSpec::from_seconds))
    }

    async fn current_position(&self) -> TimeSpec {
        TimeSpec::from_seconds(*self.position.lock().unwrap())
    }

    async fn seek_to(&self, position: TimeSpec) -> StitchResult<()> {
        if self.seek_in_progress.swap(true, Ordering::SeqCst) {
            self.overlap_detected.store(true, Ordering::SeqCst);
        }
        // Suspension point: a well-behaved caller awaits completion before
        // issuing the next seek
        tokio::task::yield_now().await;
        *self.position.lock().unwrap() = position.seconds;
        self.seeks.lock().unwrap().push(position.seconds);
        self.seek_in_progress.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn capture_frame(&self, width: u32, height: u32) -> StitchResult<Vec<u8>> {
        if self.fail_capture.load(Ordering::SeqCst) {
            return Err(StitchError::Playback {
                message: "injected capture failure".to_string(),
            });
        }
        let position = *self.position.lock().unwrap();
        Ok(format!("frame@{position}:{width}x{height}").into_bytes())
    }
}
