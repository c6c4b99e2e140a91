// Domain rules - clip validation and snapshot auditing

use crate::domain::model::{Clip, ClipSnapshot, PendingRange, TimeSpec};
use crate::error::{StitchError, StitchResult};

/// Validation rules for committing a pending range as a clip
pub struct RangeRules;

impl RangeRules {
    /// Validate a pending range against the asset duration.
    ///
    /// Both ends must be set, finite, `start < end`, and within
    /// `[0, duration]`.
    pub fn validate(pending: &PendingRange, duration: TimeSpec) -> StitchResult<Clip> {
        let (start, end) = match (pending.start, pending.end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(StitchError::InvalidRange {
                    reason: "start and end must both be set".to_string(),
                })
            }
        };

        let clip = Clip::new(start, end)?;

        if clip.end.seconds > duration.seconds {
            return Err(StitchError::InvalidRange {
                reason: format!(
                    "end ({}) exceeds asset duration ({})",
                    clip.end.to_token(),
                    duration.to_token()
                ),
            });
        }

        Ok(clip)
    }
}

/// Report on a snapshot's temporal shape.
///
/// The pipeline processes clips in list order and never rejects or merges
/// overlapping or out-of-order ranges; this audit only names them so the
/// cut can log what the output order will be.
#[derive(Debug, Clone, Default)]
pub struct ClipOrderAudit {
    /// Indices of clips that start before the previous clip does
    pub out_of_order: Vec<usize>,
    /// Indices of clips that overlap the previous clip
    pub overlapping: Vec<usize>,
}

impl ClipOrderAudit {
    pub fn audit(snapshot: &ClipSnapshot) -> Self {
        let mut report = Self::default();
        let mut previous: Option<&Clip> = None;
        for (index, clip) in snapshot.iter().enumerate() {
            if let Some(prev) = previous {
                if clip.start.seconds < prev.start.seconds {
                    report.out_of_order.push(index);
                }
                if clip.overlaps(prev) {
                    report.overlapping.push(index);
                }
            }
            previous = Some(clip);
        }
        report
    }

    pub fn is_clean(&self) -> bool {
        self.out_of_order.is_empty() && self.overlapping.is_empty()
    }
}
