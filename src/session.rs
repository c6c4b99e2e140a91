//! Media session - owns the loaded asset and its derived metadata

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::model::{MediaAsset, TimeSpec};
use crate::error::{StitchError, StitchResult};
use crate::ports::{ObjectUrl, ObjectUrlPort, PlaybackPort};

/// Owner of the current asset, its derived duration, and the playable
/// preview URL.
///
/// A session whose duration cannot be derived is unplayable: the whole
/// clip workflow stays disabled until a new asset loads successfully.
pub struct MediaSession {
    urls: Arc<dyn ObjectUrlPort>,
    playback: Arc<dyn PlaybackPort>,
    asset: Option<MediaAsset>,
    duration: Option<TimeSpec>,
    preview_url: Option<ObjectUrl>,
    playable: bool,
}

impl MediaSession {
    pub fn new(urls: Arc<dyn ObjectUrlPort>, playback: Arc<dyn PlaybackPort>) -> Self {
        Self {
            urls,
            playback,
            asset: None,
            duration: None,
            preview_url: None,
            playable: false,
        }
    }

    /// Load a new asset, superseding whatever was loaded before.
    ///
    /// The previous preview URL is revoked before the new one is
    /// allocated. Fails with `UnreadableAsset` when no finite, non-zero
    /// duration can be derived; the session is then unplayable.
    pub async fn load(&mut self, asset: MediaAsset) -> StitchResult<TimeSpec> {
        if let Some(old) = self.preview_url.take() {
            self.urls.revoke_url(&old).await;
        }
        self.duration = None;
        self.playable = false;

        let preview = self.urls.create_url(&asset.bytes, "video/mp4").await;
        self.preview_url = Some(preview);

        let attach_result = self.playback.attach(&asset).await;
        self.asset = Some(asset);
        if let Err(e) = attach_result {
            warn!(error = %e, "playback element rejected the asset");
            return Err(StitchError::UnreadableAsset);
        }

        let duration = match self.playback.duration().await {
            Ok(duration) => duration,
            Err(e) => {
                warn!(error = %e, "duration probe failed");
                return Err(StitchError::UnreadableAsset);
            }
        };

        match duration {
            Some(duration) => {
                info!(
                    name = %self.asset.as_ref().map(|a| a.name.as_str()).unwrap_or(""),
                    duration = duration.seconds,
                    "asset loaded"
                );
                self.duration = Some(duration);
                self.playable = true;
                Ok(duration)
            }
            None => Err(StitchError::UnreadableAsset),
        }
    }

    /// Derived duration, known once the playback collaborator has reported
    /// metadata for a playable asset
    pub fn duration(&self) -> Option<TimeSpec> {
        self.duration
    }

    pub fn is_playable(&self) -> bool {
        self.playable
    }

    pub fn asset(&self) -> Option<&MediaAsset> {
        self.asset.as_ref()
    }

    /// Playable preview URL for the loaded asset
    pub fn preview_url(&self) -> Option<&ObjectUrl> {
        self.preview_url.as_ref()
    }

    /// End the session, releasing the preview URL
    pub async fn close(&mut self) {
        if let Some(url) = self.preview_url.take() {
            self.urls.revoke_url(&url).await;
        }
        self.asset = None;
        self.duration = None;
        self.playable = false;
    }
}
