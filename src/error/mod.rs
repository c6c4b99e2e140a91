//! Error handling module for clipstitch

use thiserror::Error;

/// Main error type for clipstitch operations
#[derive(Error, Debug)]
pub enum StitchError {
    /// The loaded asset's duration could not be derived
    #[error("could not derive a duration for the loaded asset")]
    UnreadableAsset,

    /// Clip operations attempted on a session without a playable asset
    #[error("no playable asset loaded; load a new file first")]
    SessionUnplayable,

    /// Clip range validation failure
    #[error("invalid clip range: {reason}")]
    InvalidRange { reason: String },

    /// Clip index does not exist in the list
    #[error("no clip at index {index} (list holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Cut requested with no clips marked
    #[error("clip list is empty; mark at least one range before cutting")]
    EmptyClipList,

    /// Cut requested before the transcoding engine finished initializing
    #[error("transcoding engine is not ready")]
    EngineNotReady,

    /// Cut requested while another job holds the processing lock
    #[error("a cut job is already in flight")]
    AlreadyProcessing,

    /// A job failed inside the engine; details stay in the log
    #[error("processing failed; edit the clip list and retry")]
    ProcessingFailed,

    /// A thumbnail sampling pass is already running on the playback element
    #[error("a thumbnail pass is already in progress")]
    SamplerBusy,

    /// Failure reported by the transcoding engine collaborator
    #[error("engine operation failed: {message}")]
    Engine { message: String },

    /// Failure reported by the playback collaborator
    #[error("playback operation failed: {message}")]
    Playback { message: String },

    /// Configuration file error
    #[error("configuration error: {message}")]
    Config { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for clipstitch operations
pub type StitchResult<T> = std::result::Result<T, StitchError>;
