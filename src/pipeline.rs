//! Transcode pipeline - drives the engine through an extract-then-concat job

use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::domain::model::{Clip, ClipSnapshot, MediaAsset};
use crate::domain::rules::ClipOrderAudit;
use crate::error::{StitchError, StitchResult};
use crate::ports::{ObjectUrl, ObjectUrlPort, TranscodeEnginePort};

/// Fixed engine-resident artifact names. Names are job-scoped and reused
/// across jobs; every pass carries a forced-overwrite token so leftovers
/// from a failed job can never survive into a retry.
pub const INPUT_NAME: &str = "input.mp4";
pub const MANIFEST_NAME: &str = "concat.txt";
pub const OUTPUT_NAME: &str = "output.mp4";

pub fn part_name(index: usize) -> String {
    format!("part{index}.mp4")
}

/// Pipeline lifecycle.
///
/// `Succeeded` and `Failed` are idle states: a new job may start from
/// either, and the previous outcome stays observable until it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Uninitialized,
    Initializing,
    Ready,
    Extracting { index: usize, total: usize },
    Concatenating,
    Succeeded,
    Failed,
}

impl PipelineState {
    /// True when a job holds the processing lock
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Extracting { .. } | Self::Concatenating)
    }

    fn is_idle(&self) -> bool {
        matches!(self, Self::Ready | Self::Succeeded | Self::Failed)
    }
}

/// The held output resource produced by a successful job
#[derive(Debug, Clone)]
pub struct OutputArtifact {
    pub url: ObjectUrl,
    pub byte_len: usize,
    /// Deliverable name surfaced for download
    pub file_name: String,
    pub content_type: String,
}

/// Orchestrates the transcoding engine through stream-copy extraction and
/// concatenation of a clip-list snapshot.
///
/// The engine has one virtual filesystem and one execution context, so at
/// most one job runs at a time; a second `cut` while one is in flight is
/// rejected, never queued.
pub struct TranscodePipeline {
    engine: Arc<dyn TranscodeEnginePort>,
    urls: Arc<dyn ObjectUrlPort>,
    state: Mutex<PipelineState>,
    output: Mutex<Option<OutputArtifact>>,
}

impl TranscodePipeline {
    pub fn new(engine: Arc<dyn TranscodeEnginePort>, urls: Arc<dyn ObjectUrlPort>) -> Self {
        Self {
            engine,
            urls,
            state: Mutex::new(PipelineState::Uninitialized),
            output: Mutex::new(None),
        }
    }

    /// Acquire and ready the engine; once per process. Further calls after
    /// a successful initialization are no-ops.
    pub async fn initialize(&self) -> StitchResult<()> {
        {
            let mut state = self.state.lock().unwrap();
            match *state {
                PipelineState::Uninitialized => *state = PipelineState::Initializing,
                PipelineState::Initializing => return Err(StitchError::EngineNotReady),
                _ => return Ok(()),
            }
        }

        match self.engine.initialize().await {
            Ok(()) => {
                info!("transcoding engine initialized");
                self.set_state(PipelineState::Ready);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "engine initialization failed");
                self.set_state(PipelineState::Uninitialized);
                Err(StitchError::EngineNotReady)
            }
        }
    }

    /// Run one cut job over a snapshot of the clip list.
    ///
    /// Rejected before any engine call when the snapshot is empty, the
    /// engine is not ready, or a job is already in flight. On any engine
    /// failure the job aborts, the lock is released, and the caller sees a
    /// generic `ProcessingFailed`; the snapshot's sources are untouched so
    /// the user may edit clips and retry.
    pub async fn cut(
        &self,
        clips: &ClipSnapshot,
        asset: &MediaAsset,
    ) -> StitchResult<OutputArtifact> {
        if clips.is_empty() {
            return Err(StitchError::EmptyClipList);
        }

        {
            let mut state = self.state.lock().unwrap();
            if state.is_in_flight() {
                return Err(StitchError::AlreadyProcessing);
            }
            if !state.is_idle() {
                return Err(StitchError::EngineNotReady);
            }
            *state = PipelineState::Extracting {
                index: 0,
                total: clips.len(),
            };
        }

        let audit = ClipOrderAudit::audit(clips);
        if !audit.is_clean() {
            warn!(
                out_of_order = ?audit.out_of_order,
                overlapping = ?audit.overlapping,
                "clips are processed in list order; output will follow the list, not the timeline"
            );
        }

        match self.run_job(clips, asset).await {
            Ok(artifact) => {
                self.set_state(PipelineState::Succeeded);
                let previous = self.output.lock().unwrap().replace(artifact.clone());
                if let Some(previous) = previous {
                    self.urls.revoke_url(&previous.url).await;
                }
                info!(
                    clips = clips.len(),
                    bytes = artifact.byte_len,
                    url = artifact.url.as_str(),
                    "cut complete"
                );
                Ok(artifact)
            }
            Err(e) => {
                warn!(error = %e, "cut job failed; engine diagnostic withheld from caller");
                self.set_state(PipelineState::Failed);
                Err(StitchError::ProcessingFailed)
            }
        }
    }

    async fn run_job(
        &self,
        clips: &ClipSnapshot,
        asset: &MediaAsset,
    ) -> StitchResult<OutputArtifact> {
        self.engine.write_file(INPUT_NAME, &asset.bytes).await?;

        for (index, clip) in clips.iter().enumerate() {
            self.set_state(PipelineState::Extracting {
                index,
                total: clips.len(),
            });
            let args = extraction_args(clip, index);
            debug!(index, clip = %clip, "extracting");
            self.engine.exec(&args).await?;
        }

        self.set_state(PipelineState::Concatenating);
        let manifest = manifest_body(clips.len());
        self.engine
            .write_file(MANIFEST_NAME, manifest.as_bytes())
            .await?;
        self.engine.exec(&concat_args()).await?;

        let bytes = self.engine.read_file(OUTPUT_NAME).await?;
        let url = self.urls.create_url(&bytes, "video/mp4").await;
        Ok(OutputArtifact {
            url,
            byte_len: bytes.len(),
            file_name: OUTPUT_NAME.to_string(),
            content_type: "video/mp4".to_string(),
        })
    }

    pub fn state(&self) -> PipelineState {
        self.state.lock().unwrap().clone()
    }

    /// Output resource from the most recent successful job, if still held
    pub fn output(&self) -> Option<OutputArtifact> {
        self.output.lock().unwrap().clone()
    }

    /// Release the held output resource, revoking its URL
    pub async fn release_output(&self) {
        let held = self.output.lock().unwrap().take();
        if let Some(artifact) = held {
            self.urls.revoke_url(&artifact.url).await;
        }
    }

    fn set_state(&self, next: PipelineState) {
        *self.state.lock().unwrap() = next;
    }
}

/// Tokens for one stream-copy extraction: seek to the clip range on the
/// fixed input, copy codecs, write `part{i}`
fn extraction_args(clip: &Clip, index: usize) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        INPUT_NAME.to_string(),
        "-ss".to_string(),
        clip.start.to_token(),
        "-to".to_string(),
        clip.end.to_token(),
        "-c".to_string(),
        "copy".to_string(),
        part_name(index),
    ]
}

/// Tokens for the concat-demuxer stream-copy pass over the manifest
fn concat_args() -> Vec<String> {
    vec![
        "-y".to_string(),
        "-f".to_string(),
        "concat".to_string(),
        "-safe".to_string(),
        "0".to_string(),
        "-i".to_string(),
        MANIFEST_NAME.to_string(),
        "-c".to_string(),
        "copy".to_string(),
        OUTPUT_NAME.to_string(),
    ]
}

/// Manifest lines in extraction order
fn manifest_body(count: usize) -> String {
    (0..count)
        .map(|i| format!("file '{}'", part_name(i)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TimeSpec;

    fn clip(start: f64, end: f64) -> Clip {
        Clip::new(TimeSpec::from_seconds(start), TimeSpec::from_seconds(end)).unwrap()
    }

    #[test]
    fn extraction_args_match_engine_contract() {
        let args = extraction_args(&clip(2.0, 5.0), 0);
        assert_eq!(
            args,
            ["-y", "-i", "input.mp4", "-ss", "2", "-to", "5", "-c", "copy", "part0.mp4"]
        );
    }

    #[test]
    fn extraction_args_keep_fractional_seconds() {
        let args = extraction_args(&clip(1.5, 3.25), 2);
        assert_eq!(args[4], "1.5");
        assert_eq!(args[6], "3.25");
        assert_eq!(args[9], "part2.mp4");
    }

    #[test]
    fn manifest_lists_parts_in_order() {
        assert_eq!(
            manifest_body(3),
            "file 'part0.mp4'\nfile 'part1.mp4'\nfile 'part2.mp4'"
        );
    }

    #[test]
    fn concat_args_use_the_manifest() {
        let args = concat_args();
        assert_eq!(
            args,
            ["-y", "-f", "concat", "-safe", "0", "-i", "concat.txt", "-c", "copy", "output.mp4"]
        );
    }
}
