// Ports - capability contracts consumed from external collaborators

use async_trait::async_trait;

use crate::domain::model::{MediaAsset, TimeSpec};
use crate::error::StitchResult;

/// Handle to a released, revocable byte resource exposed as a URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl {
    url: String,
}

impl ObjectUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

/// Capability contract for the transcoding engine collaborator.
///
/// The engine exposes one shared virtual filesystem and one execution
/// context; callers must never issue two operations concurrently. `exec`
/// treats its arguments as opaque command tokens whose semantics belong to
/// the collaborator.
#[async_trait]
pub trait TranscodeEnginePort: Send + Sync {
    /// Acquire and ready the engine; idempotent once per process
    async fn initialize(&self) -> StitchResult<()>;

    /// Write bytes into the engine's filesystem under a flat name
    async fn write_file(&self, name: &str, bytes: &[u8]) -> StitchResult<()>;

    /// Run one engine pass described by opaque command tokens
    async fn exec(&self, args: &[String]) -> StitchResult<()>;

    /// Read an engine-resident artifact's bytes out
    async fn read_file(&self, name: &str) -> StitchResult<Vec<u8>>;
}

/// Capability contract for the playback element collaborator.
///
/// One playback element is shared by the play-head tracker and the
/// thumbnail sampler; concurrent seeks are undefined behavior in the
/// collaborator and must never be issued.
#[async_trait]
pub trait PlaybackPort: Send + Sync {
    /// Hand the element a new asset to play; resolves when metadata is ready
    async fn attach(&self, asset: &MediaAsset) -> StitchResult<()>;

    /// Derived duration of the attached asset; `None` when unknown,
    /// non-finite, or nothing is attached
    async fn duration(&self) -> StitchResult<Option<TimeSpec>>;

    /// Current play-head position; zero when nothing is attached
    async fn current_position(&self) -> TimeSpec;

    /// Move the play-head; resolves when the seek has completed
    async fn seek_to(&self, position: TimeSpec) -> StitchResult<()>;

    /// Capture the frame at the play-head into a fixed-size raster
    async fn capture_frame(&self, width: u32, height: u32) -> StitchResult<Vec<u8>>;
}

/// Capability contract for object-URL allocation and release.
///
/// Every created URL is owned by exactly one holder and must be revoked
/// when superseded so repeated loads and cuts cannot grow without bound.
#[async_trait]
pub trait ObjectUrlPort: Send + Sync {
    /// Expose bytes as a new playable/downloadable URL
    async fn create_url(&self, bytes: &[u8], content_type: &str) -> ObjectUrl;

    /// Release a URL; resolving it afterwards yields nothing
    async fn revoke_url(&self, url: &ObjectUrl);

    /// Read back the bytes behind a live URL
    async fn resolve(&self, url: &ObjectUrl) -> Option<Vec<u8>>;
}
