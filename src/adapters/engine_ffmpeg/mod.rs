// FFmpeg engine adapter - drives the ffmpeg binary over a private workdir
//
// The engine's virtual filesystem is realized as a temporary directory;
// artifact names are flat entries inside it and every pass runs with the
// workdir as its current directory.

use std::process::Stdio;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{StitchError, StitchResult};
use crate::ports::TranscodeEnginePort;

/// Transcoding engine backed by the system `ffmpeg` binary
pub struct FfmpegEngineAdapter {
    binary: String,
    workdir: OnceCell<TempDir>,
}

impl FfmpegEngineAdapter {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            workdir: OnceCell::new(),
        }
    }

    fn engine_err(message: impl Into<String>) -> StitchError {
        StitchError::Engine {
            message: message.into(),
        }
    }

    /// Artifact names are flat; anything path-like is rejected
    fn checked_name(name: &str) -> StitchResult<&str> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Self::engine_err(format!("invalid artifact name '{name}'")));
        }
        Ok(name)
    }

    fn resident(&self) -> StitchResult<&TempDir> {
        self.workdir.get().ok_or(StitchError::EngineNotReady)
    }
}

#[async_trait]
impl TranscodeEnginePort for FfmpegEngineAdapter {
    async fn initialize(&self) -> StitchResult<()> {
        self.workdir
            .get_or_try_init(|| async {
                let status = Command::new(&self.binary)
                    .arg("-version")
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .await
                    .map_err(|e| Self::engine_err(format!("cannot run {}: {e}", self.binary)))?;
                if !status.success() {
                    return Err(Self::engine_err(format!(
                        "{} -version exited with {status}",
                        self.binary
                    )));
                }

                let workdir = TempDir::new()
                    .map_err(|e| Self::engine_err(format!("cannot create workdir: {e}")))?;
                debug!(workdir = %workdir.path().display(), "transcoding engine ready");
                Ok(workdir)
            })
            .await
            .map(|_| ())
    }

    async fn write_file(&self, name: &str, bytes: &[u8]) -> StitchResult<()> {
        let dir = self.resident()?;
        let path = dir.path().join(Self::checked_name(name)?);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| Self::engine_err(format!("cannot write {name}: {e}")))?;
        debug!(name, len = bytes.len(), "wrote engine artifact");
        Ok(())
    }

    async fn exec(&self, args: &[String]) -> StitchResult<()> {
        let dir = self.resident()?;
        debug!(args = ?args, "engine exec");
        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(dir.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Self::engine_err(format!("cannot run {}: {e}", self.binary)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail: String = stderr
                .lines()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect::<Vec<_>>()
                .join(" | ");
            return Err(Self::engine_err(format!(
                "pass exited with {}: {tail}",
                output.status
            )));
        }
        Ok(())
    }

    async fn read_file(&self, name: &str) -> StitchResult<Vec<u8>> {
        let dir = self.resident()?;
        let path = dir.path().join(Self::checked_name(name)?);
        tokio::fs::read(&path)
            .await
            .map_err(|e| Self::engine_err(format!("cannot read {name}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_like_artifact_names() {
        assert!(FfmpegEngineAdapter::checked_name("input.mp4").is_ok());
        assert!(FfmpegEngineAdapter::checked_name("../escape").is_err());
        assert!(FfmpegEngineAdapter::checked_name("a/b").is_err());
        assert!(FfmpegEngineAdapter::checked_name("").is_err());
    }

    #[tokio::test]
    async fn operations_before_initialize_report_not_ready() {
        let engine = FfmpegEngineAdapter::new("ffmpeg");
        let err = engine.write_file("input.mp4", b"x").await.unwrap_err();
        assert!(matches!(err, StitchError::EngineNotReady));
    }
}
