// Editor session - orchestrates the clip workflow over injected ports

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::domain::model::{Clip, ClipList, MediaAsset, PendingRange, ThumbnailSet, TimeSpec};
use crate::error::{StitchError, StitchResult};
use crate::pipeline::{OutputArtifact, PipelineState, TranscodePipeline};
use crate::playhead::PlayheadTracker;
use crate::ports::{ObjectUrlPort, PlaybackPort, TranscodeEnginePort};
use crate::session::MediaSession;
use crate::shortcuts::{EditorAction, ShortcutController};
use crate::thumbs::ThumbnailSampler;

/// One editing session: the loaded asset, its clip list and pending range,
/// the thumbnail strip, and the pipeline that produces the deliverable.
///
/// Every clip operation is gated on the session being playable; an asset
/// whose duration cannot be derived disables the whole workflow until a
/// new one loads.
pub struct EditorSession {
    session: MediaSession,
    clips: ClipList,
    pending: PendingRange,
    playhead: PlayheadTracker,
    sampler: ThumbnailSampler,
    pipeline: Arc<TranscodePipeline>,
    shortcuts: ShortcutController,
    thumb_count: u32,
    thumb_width: u32,
    thumb_height: u32,
    status: Option<String>,
}

impl EditorSession {
    pub fn new(
        engine: Arc<dyn TranscodeEnginePort>,
        playback: Arc<dyn PlaybackPort>,
        urls: Arc<dyn ObjectUrlPort>,
        config: &AppConfig,
    ) -> Self {
        let pipeline = Arc::new(TranscodePipeline::new(engine, Arc::clone(&urls)));
        let mut shortcuts = ShortcutController::new();
        shortcuts.bind();
        Self {
            session: MediaSession::new(urls, Arc::clone(&playback)),
            clips: ClipList::new(),
            pending: PendingRange::default(),
            playhead: PlayheadTracker::new(Arc::clone(&playback)),
            sampler: ThumbnailSampler::new(playback),
            pipeline,
            shortcuts,
            thumb_count: config.thumbnail_count,
            thumb_width: config.thumbnail_width,
            thumb_height: config.thumbnail_height,
            status: None,
        }
    }

    /// Ready the transcoding engine; must complete before any cut
    pub async fn initialize(&self) -> StitchResult<()> {
        self.pipeline.initialize().await
    }

    /// Load a new asset. The clip list, thumbnail set, and pending range
    /// reset regardless of whether the load succeeds.
    pub async fn load(&mut self, asset: MediaAsset) -> StitchResult<TimeSpec> {
        self.clips.clear();
        self.sampler.clear();
        self.pending.reset();
        self.status = None;

        match self.session.load(asset).await {
            Ok(duration) => Ok(duration),
            Err(e) => {
                self.status = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Run a thumbnail pass over the loaded asset
    pub async fn refresh_thumbnails(&mut self) -> StitchResult<usize> {
        if !self.session.is_playable() {
            return Err(StitchError::SessionUnplayable);
        }
        let duration = self
            .session
            .duration()
            .ok_or(StitchError::SessionUnplayable)?;
        let set = self
            .sampler
            .sample(duration, self.thumb_count, self.thumb_width, self.thumb_height)
            .await?;
        Ok(set.len())
    }

    /// Mark the pending range's start at the current play-head position
    pub async fn mark_start(&mut self) -> Option<TimeSpec> {
        let position = self.playhead.marked_position(&self.session).await?;
        self.pending.set_start(position);
        debug!(at = position.seconds, "marked start");
        Some(position)
    }

    /// Mark the pending range's end at the current play-head position.
    ///
    /// With auto-add on and a pending start below the new end, the range
    /// is committed immediately.
    pub async fn mark_end(&mut self) -> Option<TimeSpec> {
        let position = self.playhead.marked_position(&self.session).await?;
        self.pending.set_end(position);
        debug!(at = position.seconds, "marked end");

        if self.shortcuts.auto_add() {
            if let Some(start) = self.pending.start {
                if start.seconds < position.seconds {
                    let _ = self.commit_pending();
                }
            }
        }
        Some(position)
    }

    /// Commit the pending range through the clip store
    pub fn commit_pending(&mut self) -> StitchResult<usize> {
        if !self.session.is_playable() {
            return Err(StitchError::SessionUnplayable);
        }
        let duration = self
            .session
            .duration()
            .ok_or(StitchError::SessionUnplayable)?;

        match self.clips.add(&self.pending, duration) {
            Ok(index) => {
                self.status = None;
                let clip = self.clips.get(index).copied();
                if let Some(clip) = clip {
                    info!(index = index + 1, clip = %clip, "clip added");
                }
                Ok(index)
            }
            Err(e) => {
                self.status = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Stage an explicit range and commit it in one step
    pub fn add_range(&mut self, start: TimeSpec, end: TimeSpec) -> StitchResult<usize> {
        self.pending.set_start(start);
        self.pending.set_end(end);
        self.commit_pending()
    }

    /// Remove the clip at `index`
    pub fn remove_clip(&mut self, index: usize) -> StitchResult<Clip> {
        if !self.session.is_playable() {
            return Err(StitchError::SessionUnplayable);
        }
        match self.clips.remove(index) {
            Ok(clip) => {
                self.status = None;
                Ok(clip)
            }
            Err(e) => {
                self.status = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Cut the current clip list into a single output artifact
    pub async fn cut(&mut self) -> StitchResult<OutputArtifact> {
        if !self.session.is_playable() {
            return Err(StitchError::SessionUnplayable);
        }
        let snapshot = self.clips.snapshot();
        let pipeline = Arc::clone(&self.pipeline);
        let result = {
            let asset = self
                .session
                .asset()
                .ok_or(StitchError::SessionUnplayable)?;
            pipeline.cut(&snapshot, asset).await
        };

        match result {
            Ok(artifact) => {
                self.status = None;
                Ok(artifact)
            }
            Err(e) => {
                self.status = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Route one key event through the shortcut controller.
    ///
    /// Add-clip is ignored while a job is in flight; marking stays
    /// available because the job works from its own snapshot.
    pub async fn handle_key(&mut self, key: char) {
        let Some(action) = self.shortcuts.resolve(key) else {
            return;
        };
        match action {
            EditorAction::MarkStart => {
                self.mark_start().await;
            }
            EditorAction::MarkEnd => {
                self.mark_end().await;
            }
            EditorAction::AddClip => {
                if self.pipeline.state().is_in_flight() {
                    debug!("add-clip ignored while a job is in flight");
                    return;
                }
                let _ = self.commit_pending();
            }
        }
    }

    /// End the session: unbind shortcuts and release held resources
    pub async fn teardown(&mut self) {
        self.shortcuts.unbind();
        self.pipeline.release_output().await;
        self.session.close().await;
    }

    pub fn clips(&self) -> &ClipList {
        &self.clips
    }

    pub fn pending(&self) -> &PendingRange {
        &self.pending
    }

    pub fn thumbnails(&self) -> &ThumbnailSet {
        self.sampler.thumbnails()
    }

    pub fn session(&self) -> &MediaSession {
        &self.session
    }

    pub fn pipeline_state(&self) -> PipelineState {
        self.pipeline.state()
    }

    pub fn output(&self) -> Option<OutputArtifact> {
        self.pipeline.output()
    }

    /// Last user-visible validation or processing message
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_auto_add(&mut self, enabled: bool) {
        self.shortcuts.set_auto_add(enabled);
    }

    pub fn shortcuts_bound(&self) -> bool {
        self.shortcuts.is_bound()
    }
}
