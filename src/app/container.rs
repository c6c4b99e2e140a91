// Container - constructs the process-wide collaborator set once

use std::sync::Arc;

use crate::adapters::{FfmpegEngineAdapter, FfmpegPlaybackAdapter, MemoryUrlRegistry};
use crate::app::editor::EditorSession;
use crate::config::AppConfig;
use crate::error::StitchResult;
use crate::ports::{ObjectUrlPort, PlaybackPort, TranscodeEnginePort};

/// Holds the singleton adapters and hands out editor sessions wired to
/// them. The engine instance is created once here and injected; nothing
/// reaches it ambiently.
pub struct AppContainer {
    engine: Arc<FfmpegEngineAdapter>,
    playback: Arc<FfmpegPlaybackAdapter>,
    urls: Arc<MemoryUrlRegistry>,
}

impl AppContainer {
    pub fn new(config: &AppConfig) -> StitchResult<Self> {
        Ok(Self {
            engine: Arc::new(FfmpegEngineAdapter::new(&config.engine_binary)),
            playback: Arc::new(FfmpegPlaybackAdapter::new(
                &config.engine_binary,
                &config.probe_binary,
            )?),
            urls: Arc::new(MemoryUrlRegistry::new()),
        })
    }

    pub fn editor(&self, config: &AppConfig) -> EditorSession {
        EditorSession::new(
            Arc::clone(&self.engine) as Arc<dyn TranscodeEnginePort>,
            Arc::clone(&self.playback) as Arc<dyn PlaybackPort>,
            Arc::clone(&self.urls) as Arc<dyn ObjectUrlPort>,
            config,
        )
    }

    /// The URL registry, for resolving held output resources to bytes
    pub fn urls(&self) -> Arc<MemoryUrlRegistry> {
        Arc::clone(&self.urls)
    }
}
