// Adapters - external collaborator implementations

pub mod engine_ffmpeg;
pub mod engine_mock;
pub mod playback_ffmpeg;
pub mod playback_mock;
pub mod url_memory;

// Re-export adapters
pub use engine_ffmpeg::FfmpegEngineAdapter;
pub use engine_mock::{EngineCall, MockEngineAdapter};
pub use playback_ffmpeg::FfmpegPlaybackAdapter;
pub use playback_mock::MockPlaybackAdapter;
pub use url_memory::MemoryUrlRegistry;
