// Headless playback adapter - ffprobe metadata plus ffmpeg frame capture
//
// Stands in for a media element: the attached asset is materialized to a
// scratch file, the play-head is a stored position, and frame capture is a
// single-frame ffmpeg extraction at that position.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::model::{MediaAsset, TimeSpec};
use crate::error::{StitchError, StitchResult};
use crate::ports::PlaybackPort;

struct PlaybackState {
    media_path: Option<PathBuf>,
    position: f64,
}

/// Playback element backed by the system `ffprobe`/`ffmpeg` binaries
pub struct FfmpegPlaybackAdapter {
    engine_binary: String,
    probe_binary: String,
    scratch: TempDir,
    state: Mutex<PlaybackState>,
}

impl FfmpegPlaybackAdapter {
    pub fn new(engine_binary: impl Into<String>, probe_binary: impl Into<String>) -> StitchResult<Self> {
        let scratch = TempDir::new().map_err(|e| StitchError::Playback {
            message: format!("cannot create scratch dir: {e}"),
        })?;
        Ok(Self {
            engine_binary: engine_binary.into(),
            probe_binary: probe_binary.into(),
            scratch,
            state: Mutex::new(PlaybackState {
                media_path: None,
                position: 0.0,
            }),
        })
    }

    fn playback_err(message: impl Into<String>) -> StitchError {
        StitchError::Playback {
            message: message.into(),
        }
    }
}

#[async_trait]
impl PlaybackPort for FfmpegPlaybackAdapter {
    async fn attach(&self, asset: &MediaAsset) -> StitchResult<()> {
        let path = self.scratch.path().join("attached.media");
        tokio::fs::write(&path, &asset.bytes)
            .await
            .map_err(|e| Self::playback_err(format!("cannot materialize asset: {e}")))?;

        let mut state = self.state.lock().await;
        state.media_path = Some(path);
        state.position = 0.0;
        debug!(name = %asset.name, len = asset.bytes.len(), "asset attached");
        Ok(())
    }

    async fn duration(&self) -> StitchResult<Option<TimeSpec>> {
        let path = {
            let state = self.state.lock().await;
            match &state.media_path {
                Some(path) => path.clone(),
                None => return Ok(None),
            }
        };

        let output = Command::new(&self.probe_binary)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(&path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Self::playback_err(format!("cannot run {}: {e}", self.probe_binary)))?;

        if !output.status.success() {
            return Ok(None);
        }

        let text = String::from_utf8_lossy(&output.stdout);
        match text.trim().parse::<f64>() {
            Ok(seconds) if seconds.is_finite() && seconds > 0.0 => {
                Ok(Some(TimeSpec::from_seconds(seconds)))
            }
            _ => Ok(None),
        }
    }

    async fn current_position(&self) -> TimeSpec {
        let state = self.state.lock().await;
        TimeSpec::from_seconds(state.position)
    }

    async fn seek_to(&self, position: TimeSpec) -> StitchResult<()> {
        let mut state = self.state.lock().await;
        if state.media_path.is_none() {
            return Err(Self::playback_err("no asset attached".to_string()));
        }
        state.position = position.seconds.max(0.0);
        Ok(())
    }

    async fn capture_frame(&self, width: u32, height: u32) -> StitchResult<Vec<u8>> {
        let (path, position) = {
            let state = self.state.lock().await;
            match &state.media_path {
                Some(path) => (path.clone(), state.position),
                None => return Err(Self::playback_err("no asset attached".to_string())),
            }
        };

        let frame_path = self.scratch.path().join("frame.jpg");
        let seek = position.to_string();
        let raster = format!("{width}x{height}");
        let status = Command::new(&self.engine_binary)
            .args(["-y", "-ss", seek.as_str(), "-i"])
            .arg(&path)
            .args(["-frames:v", "1", "-s", raster.as_str(), "-f", "image2"])
            .arg(&frame_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| Self::playback_err(format!("cannot run {}: {e}", self.engine_binary)))?;

        if !status.success() {
            return Err(Self::playback_err(format!(
                "frame capture at {position}s exited with {status}"
            )));
        }

        tokio::fs::read(&frame_path)
            .await
            .map_err(|e| Self::playback_err(format!("cannot read captured frame: {e}")))
    }
}
