//! Partitioning a stage list into fused runs and eager steps.

use std::ops::Range;

use super::PipeOptions;
use crate::stage::Stage;

/// One unit of work in an evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Apply the stage at this index to the whole current value.
    Eager(usize),
    /// Run the stages in this range as one fused pass.
    Fused(Range<usize>),
}

impl Segment {
    /// The stage indices this segment covers.
    pub fn stages(&self) -> Range<usize> {
        match self {
            Self::Eager(index) => *index..*index + 1,
            Self::Fused(range) => range.clone(),
        }
    }

    /// Returns `true` for [`Segment::Fused`].
    pub const fn is_fused(&self) -> bool {
        matches!(self, Self::Fused(_))
    }
}

/// Groups stages left to right.
///
/// Maximal runs of consecutive lazy-capable stages become
/// [`Segment::Fused`]; a single stage closes the run it ends, so it is
/// always the last stage of its run. Plain stages become
/// [`Segment::Eager`]. With fusion disabled every stage is eager.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::catalog::{first, map, reverse, take};
/// use lambars_fusion::pipe::{PipeOptions, Segment, plan};
/// use lambars_fusion::value::Value;
///
/// let stages = [
///     map(|value: Value| value),
///     take(3),
///     reverse(),
///     map(|value: Value| value),
///     first(),
///     map(|value: Value| value),
/// ];
/// assert_eq!(
///     plan(&stages, PipeOptions::default()),
///     vec![
///         Segment::Fused(0..2),
///         Segment::Eager(2),
///         Segment::Fused(3..5),
///         Segment::Fused(5..6),
///     ]
/// );
/// ```
pub fn plan<V>(stages: &[Stage<V>], options: PipeOptions) -> Vec<Segment> {
    if !options.fuses() {
        return (0..stages.len()).map(Segment::Eager).collect();
    }

    let mut segments = Vec::new();
    let mut index = 0;
    while index < stages.len() {
        if !stages[index].is_lazy() {
            segments.push(Segment::Eager(index));
            index += 1;
            continue;
        }

        let start = index;
        while index < stages.len() && stages[index].is_lazy() {
            index += 1;
            if stages[index - 1].is_single() {
                break;
            }
        }
        segments.push(Segment::Fused(start..index));
    }
    segments
}
