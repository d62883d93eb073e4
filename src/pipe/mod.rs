//! The pipe driver.
//!
//! [`evaluate`] threads an initial value through an ordered list of
//! [`Stage`]s, left to right. Consecutive lazy-capable stages are grouped
//! into fused runs (see [`plan`]) that make a single pass over the current
//! container; plain stages are applied directly to the whole value.
//!
//! Every evaluation builds its evaluators and accumulators from scratch, so
//! a [`Pipeline`] can be evaluated any number of times.
//!
//! # Examples
//!
//! ```rust
//! use lambars_fusion::catalog::{filter, map, take};
//! use lambars_fusion::pipe::evaluate;
//! use lambars_fusion::value::Value;
//!
//! let result = evaluate(
//!     Value::from(vec![1, 2, 3, 4, 5, 6]),
//!     &[
//!         filter(|value: &Value| value.as_int().is_some_and(|number| number % 2 == 0)),
//!         map(|value: Value| Value::Int(value.as_int().unwrap_or(0) * 100)),
//!         take(2),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(result, Value::from(vec![200, 400]));
//! ```
//!
//! # Laws
//!
//! - **Identity**: `evaluate(x, &[]) == x`
//! - **Fusion transparency**: for stages that never signal `done`, fused
//!   evaluation equals evaluation with [`Fusion::Disabled`].

mod options;
mod pipe_macro;
mod plan;

pub use options::{Fusion, PipeOptions};
pub use plan::{Segment, plan};

use std::fmt;
use std::ops::Range;

use tracing::{debug, trace};

use crate::error::PipeError;
use crate::fusion::FusedRun;
use crate::lazy::LazyDescriptor;
use crate::stage::Stage;
use crate::value::{Sequence, Value};

/// Evaluates `stages` over `initial` with default options.
///
/// An empty stage list returns `initial` unchanged.
///
/// # Errors
///
/// - [`PipeError::Stage`] with the first error a stage raises.
/// - [`PipeError::NotSequence`] if a fused run receives a non-sequence.
pub fn evaluate<V>(initial: V, stages: &[Stage<V>]) -> Result<V, PipeError>
where
    V: Sequence + Clone + 'static,
{
    evaluate_with(initial, stages, PipeOptions::default())
}

/// Evaluates `stages` over `initial` with explicit options.
///
/// # Errors
///
/// See [`evaluate`].
pub fn evaluate_with<V>(
    initial: V,
    stages: &[Stage<V>],
    options: PipeOptions,
) -> Result<V, PipeError>
where
    V: Sequence + Clone + 'static,
{
    let segments = plan(stages, options);
    debug!(
        stages = stages.len(),
        segments = segments.len(),
        fused = segments.iter().filter(|segment| segment.is_fused()).count(),
        "evaluating pipeline"
    );
    run_segments(initial, stages, &segments)
}

fn run_segments<V>(initial: V, stages: &[Stage<V>], segments: &[Segment]) -> Result<V, PipeError>
where
    V: Sequence + Clone + 'static,
{
    segments
        .iter()
        .try_fold(initial, |value, segment| run_segment(value, stages, segment))
}

fn run_segment<V>(value: V, stages: &[Stage<V>], segment: &Segment) -> Result<V, PipeError>
where
    V: Sequence + Clone + 'static,
{
    match segment {
        Segment::Eager(index) => {
            trace!(stage = index, "applying eager stage");
            stages[*index].apply(value).inspect_err(|error| {
                debug!(stage = index, %error, "eager stage failed");
            })
        }
        Segment::Fused(range) => {
            let elements = value.into_elements().map_err(|value| {
                debug!(
                    start = range.start,
                    end = range.end,
                    found = value.kind(),
                    "fused run input is not a sequence"
                );
                PipeError::NotSequence { found: value.kind() }
            })?;
            run_fused(stages, range.clone(), elements)
        }
    }
}

fn run_fused<V, I>(stages: &[Stage<V>], range: Range<usize>, input: I) -> Result<V, PipeError>
where
    V: Sequence + Clone + 'static,
    I: IntoIterator<Item = V>,
{
    let descriptors: Vec<&LazyDescriptor<V>> = stages[range.clone()]
        .iter()
        .filter_map(Stage::lazy_descriptor)
        .collect();
    let mut run = FusedRun::new(&descriptors);

    let mut consumed = 0_usize;
    let mut short_circuited = false;
    for item in input {
        consumed += 1;
        let flow = run.push(item).inspect_err(|error| {
            debug!(start = range.start, end = range.end, consumed, %error, "fused run failed");
        })?;
        if flow.is_stop() {
            short_circuited = true;
            break;
        }
    }

    trace!(
        start = range.start,
        end = range.end,
        consumed,
        produced = run.accumulated().len(),
        short_circuited,
        "fused run finished"
    );
    Ok(run.finish())
}

/// An ordered, reusable list of stages.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::catalog::{flat_map, take};
/// use lambars_fusion::pipe::Pipeline;
/// use lambars_fusion::value::Value;
///
/// let pipeline = Pipeline::new()
///     .then(flat_map(|value: Value| vec![value.clone(), value]))
///     .then(take(3));
///
/// assert_eq!(
///     pipeline.evaluate(Value::from(vec![1, 2, 3])).unwrap(),
///     Value::from(vec![1, 1, 2])
/// );
///
/// // unbounded input: the run stops pulling once `take` is satisfied
/// assert_eq!(
///     pipeline.evaluate_iter((1..).map(Value::Int)).unwrap(),
///     Value::from(vec![1, 1, 2])
/// );
/// ```
pub struct Pipeline<V = Value> {
    stages: Vec<Stage<V>>,
    options: PipeOptions,
}

impl<V> Pipeline<V>
where
    V: Sequence + Clone + 'static,
{
    /// Creates an empty pipeline, the identity on any value.
    pub const fn new() -> Self {
        Self {
            stages: Vec::new(),
            options: PipeOptions {
                fusion: Fusion::Enabled,
            },
        }
    }

    /// Appends a stage.
    #[must_use]
    pub fn then(mut self, stage: Stage<V>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Replaces the evaluation options.
    #[must_use]
    pub fn with_options(mut self, options: PipeOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the evaluation options.
    pub const fn options(&self) -> PipeOptions {
        self.options
    }

    /// Returns the stages in order.
    pub fn stages(&self) -> &[Stage<V>] {
        &self.stages
    }

    /// Returns the number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The segments an evaluation of this pipeline would run.
    pub fn plan(&self) -> Vec<Segment> {
        plan(&self.stages, self.options)
    }

    /// Evaluates the pipeline over `initial`.
    ///
    /// # Errors
    ///
    /// See [`evaluate`].
    pub fn evaluate(&self, initial: V) -> Result<V, PipeError> {
        evaluate_with(initial, &self.stages, self.options)
    }

    /// Evaluates the pipeline over the elements of an iterator.
    ///
    /// When the first segment is a fused run, elements are pulled from the
    /// iterator one at a time and pulling stops as soon as the run
    /// short-circuits, so `input` may be unbounded. Otherwise the iterator
    /// is collected into a container first.
    ///
    /// # Errors
    ///
    /// See [`evaluate`].
    pub fn evaluate_iter<I>(&self, input: I) -> Result<V, PipeError>
    where
        I: IntoIterator<Item = V>,
    {
        let segments = self.plan();
        debug!(
            stages = self.stages.len(),
            segments = segments.len(),
            streaming = segments.first().is_some_and(Segment::is_fused),
            "evaluating pipeline over iterator"
        );
        match segments.split_first() {
            Some((Segment::Fused(range), rest)) => {
                let value = run_fused(&self.stages, range.clone(), input)?;
                run_segments(value, &self.stages, rest)
            }
            _ => run_segments(
                V::from_elements(input.into_iter().collect()),
                &self.stages,
                &segments,
            ),
        }
    }
}

impl<V> Default for Pipeline<V>
where
    V: Sequence + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for Pipeline<V> {
    fn clone(&self) -> Self {
        Self {
            stages: self.stages.clone(),
            options: self.options,
        }
    }
}

impl<V> fmt::Debug for Pipeline<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Pipeline")
            .field("stages", &self.stages)
            .field("options", &self.options)
            .finish()
    }
}

impl<V> FromIterator<Stage<V>> for Pipeline<V>
where
    V: Sequence + Clone + 'static,
{
    fn from_iter<I: IntoIterator<Item = Stage<V>>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
            options: PipeOptions::default(),
        }
    }
}

impl<V> Extend<Stage<V>> for Pipeline<V> {
    fn extend<I: IntoIterator<Item = Stage<V>>>(&mut self, iter: I) {
        self.stages.extend(iter);
    }
}
