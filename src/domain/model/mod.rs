// Domain models - core types for the clip workflow

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StitchError, StitchResult};

/// Time measured from the asset origin in fractional seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Floor to whole seconds, the granularity used for marking
    pub fn floored(&self) -> Self {
        Self {
            seconds: self.seconds.floor(),
        }
    }

    /// Parse a time string: seconds (e.g. 123.45), MM:SS(.ms), or HH:MM:SS(.ms)
    pub fn parse(time_str: &str) -> StitchResult<Self> {
        let trimmed = time_str.trim();

        if let Ok(seconds) = trimmed.parse::<f64>() {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(StitchError::InvalidRange {
                    reason: format!("time cannot be negative or non-finite: {trimmed}"),
                });
            }
            return Ok(Self::from_seconds(seconds));
        }

        let bad = |what: &str| StitchError::InvalidRange {
            reason: format!("invalid {what} in time '{trimmed}'"),
        };

        let parts: Vec<&str> = trimmed.split(':').collect();
        match parts.as_slice() {
            [minutes, seconds] => {
                let minutes = minutes.parse::<u32>().map_err(|_| bad("minutes"))?;
                let seconds = seconds.parse::<f64>().map_err(|_| bad("seconds"))?;
                if !(0.0..60.0).contains(&seconds) {
                    return Err(bad("seconds"));
                }
                Ok(Self::from_seconds(f64::from(minutes) * 60.0 + seconds))
            }
            [hours, minutes, seconds] => {
                let hours = hours.parse::<u32>().map_err(|_| bad("hours"))?;
                let minutes = minutes.parse::<u32>().map_err(|_| bad("minutes"))?;
                let seconds = seconds.parse::<f64>().map_err(|_| bad("seconds"))?;
                if minutes >= 60 {
                    return Err(bad("minutes"));
                }
                if !(0.0..60.0).contains(&seconds) {
                    return Err(bad("seconds"));
                }
                Ok(Self::from_seconds(
                    f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds,
                ))
            }
            _ => Err(StitchError::InvalidRange {
                reason: format!(
                    "invalid time format '{trimmed}'; expected seconds, MM:SS or HH:MM:SS"
                ),
            }),
        }
    }

    /// Render as an engine command token ("2" for 2.0, "2.5" for 2.5)
    pub fn to_token(&self) -> String {
        format!("{}", self.seconds)
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::utils::time::format_position(self.seconds))
    }
}

/// One marked range on the loaded asset, immutable once stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub start: TimeSpec,
    pub end: TimeSpec,
}

impl Clip {
    /// Create a clip, validating `0 <= start < end` and finiteness
    pub fn new(start: TimeSpec, end: TimeSpec) -> StitchResult<Self> {
        if !start.seconds.is_finite() || !end.seconds.is_finite() {
            return Err(StitchError::InvalidRange {
                reason: "start and end must be finite".to_string(),
            });
        }
        if start.seconds < 0.0 {
            return Err(StitchError::InvalidRange {
                reason: "start cannot be negative".to_string(),
            });
        }
        if start.seconds >= end.seconds {
            return Err(StitchError::InvalidRange {
                reason: format!(
                    "start ({}) must be less than end ({})",
                    start.to_token(),
                    end.to_token()
                ),
            });
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> TimeSpec {
        TimeSpec::from_seconds(self.end.seconds - self.start.seconds)
    }

    /// True when `other` shares any part of this clip's range
    pub fn overlaps(&self, other: &Clip) -> bool {
        self.start.seconds < other.end.seconds && other.start.seconds < self.end.seconds
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}

/// Staging area edited by the user before a range is committed as a Clip
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingRange {
    pub start: Option<TimeSpec>,
    pub end: Option<TimeSpec>,
}

impl PendingRange {
    pub fn set_start(&mut self, at: TimeSpec) {
        self.start = Some(at);
    }

    pub fn set_end(&mut self, at: TimeSpec) {
        self.end = Some(at);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Ordered, mutable list of committed clips; the clip store
///
/// Insertion order is preserved and is the order the pipeline processes
/// clips in. Duplicates, overlaps, and out-of-chronological-order entries
/// are permitted.
#[derive(Debug, Default)]
pub struct ClipList {
    clips: Vec<Clip>,
}

impl ClipList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a pending range; returns the new clip's index.
    ///
    /// On failure the list is left unchanged.
    pub fn add(&mut self, pending: &PendingRange, duration: TimeSpec) -> StitchResult<usize> {
        let clip = crate::domain::rules::RangeRules::validate(pending, duration)?;
        self.clips.push(clip);
        Ok(self.clips.len() - 1)
    }

    /// Remove exactly the clip at `index`, preserving the order of the rest
    pub fn remove(&mut self, index: usize) -> StitchResult<Clip> {
        if index >= self.clips.len() {
            return Err(StitchError::IndexOutOfRange {
                index,
                len: self.clips.len(),
            });
        }
        Ok(self.clips.remove(index))
    }

    pub fn clear(&mut self) {
        self.clips.clear();
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clip> {
        self.clips.iter()
    }

    /// Immutable ordered copy for consumption by the pipeline
    pub fn snapshot(&self) -> ClipSnapshot {
        ClipSnapshot {
            clips: self.clips.clone(),
        }
    }
}

/// Frozen copy of the clip list taken when a cut is triggered
#[derive(Debug, Clone, Default)]
pub struct ClipSnapshot {
    clips: Vec<Clip>,
}

impl ClipSnapshot {
    pub fn from_clips(clips: Vec<Clip>) -> Self {
        Self { clips }
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clip> {
        self.clips.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Clip> {
        self.clips.get(index)
    }
}

/// Raw media asset delivered by the file-selection collaborator
#[derive(Debug, Clone)]
pub struct MediaAsset {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl MediaAsset {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// One sampled preview frame
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub offset: TimeSpec,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Ordered preview frames for the current asset, replaced wholesale per load
#[derive(Debug, Default)]
pub struct ThumbnailSet {
    frames: Vec<Thumbnail>,
}

impl ThumbnailSet {
    pub fn from_frames(frames: Vec<Thumbnail>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[Thumbnail] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests;
