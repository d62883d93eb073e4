//! Single-pass execution of a run of lazy stages.
//!
//! A [`FusedRun`] owns one freshly instantiated evaluator per stage and the
//! accumulator the run's survivors are collected into. Elements are pushed
//! one at a time; each is driven through every evaluator before the next
//! element is consumed, so no intermediate container is ever built between
//! the stages of a run.
//!
//! # Expansion
//!
//! An evaluator answering [`Emit::Many`] replaces the element with several
//! values. They continue through the remaining evaluators depth-first and in
//! emission order. Pending work lives on an explicit stack of
//! `(item, position)` entries rather than on the call stack, so deeply
//! expanding chains cannot overflow it.
//!
//! # Short-circuit
//!
//! A `done` signal stops upstream consumption once the element that raised
//! it has finished propagating, including every value it expanded into.
//! Sibling expansions still pending at that point are discarded.
//!
//! # Examples
//!
//! ```rust
//! use lambars_fusion::catalog::{map, take};
//! use lambars_fusion::fusion::{Flow, FusedRun};
//! use lambars_fusion::value::Value;
//!
//! let scale = map(|value: Value| Value::Int(value.as_int().unwrap_or(0) * 10));
//! let bound = take(2);
//! let descriptors = [scale.lazy_descriptor().unwrap(), bound.lazy_descriptor().unwrap()];
//!
//! let mut run = FusedRun::new(&descriptors);
//! assert_eq!(run.push(Value::from(1)).unwrap(), Flow::Continue);
//! assert_eq!(run.push(Value::from(2)).unwrap(), Flow::Stop);
//! assert_eq!(run.finish(), Value::from(vec![10, 20]));
//! ```

use smallvec::SmallVec;

use crate::error::PipeError;
use crate::lazy::{ActiveEvaluator, Emit, LazyDescriptor};
use crate::value::Sequence;

/// Whether a fused run may consume another upstream element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep consuming.
    Continue,
    /// Stop consuming; the run is complete.
    Stop,
}

impl Flow {
    /// Returns `true` for [`Flow::Stop`].
    pub const fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// A pending element and the position of the next evaluator it must visit.
struct Work<V> {
    item: V,
    position: usize,
}

/// The state of one fused run: its evaluators and its accumulator.
///
/// Created at the start of a run and consumed by [`finish`](Self::finish);
/// none of its state outlives the run.
pub struct FusedRun<V> {
    evaluators: Vec<ActiveEvaluator<V>>,
    accumulator: Vec<V>,
    pending: SmallVec<[Work<V>; 4]>,
    stopped: bool,
}

impl<V: Sequence + Clone + 'static> FusedRun<V> {
    /// Instantiates one fresh evaluator per descriptor, in order.
    pub fn new(descriptors: &[&LazyDescriptor<V>]) -> Self {
        Self {
            evaluators: descriptors
                .iter()
                .map(|descriptor| descriptor.instantiate())
                .collect(),
            accumulator: Vec::new(),
            pending: SmallVec::new(),
            stopped: false,
        }
    }

    /// Drives one upstream element through the whole run.
    ///
    /// Returns [`Flow::Stop`] once an evaluator has signalled `done` and the
    /// element has finished propagating. Pushing after a stop is a no-op
    /// that reports [`Flow::Stop`] again.
    ///
    /// # Errors
    ///
    /// Returns [`PipeError::Stage`] with the first error an evaluator raises.
    /// The run should be abandoned afterwards.
    pub fn push(&mut self, item: V) -> Result<Flow, PipeError> {
        if self.stopped {
            return Ok(Flow::Stop);
        }

        self.pending.push(Work { item, position: 0 });
        // stack depth at which a recorded `done` takes effect; the deepest
        // signal is reached first and ends the run
        let mut halt_at: Option<usize> = None;

        while let Some(Work { mut item, mut position }) = self.pending.pop() {
            let base = self.pending.len();

            loop {
                let Some(evaluator) = self.evaluators.get_mut(position) else {
                    self.accumulator.push(item);
                    break;
                };

                let result = evaluator.feed(item).map_err(PipeError::Stage)?;
                if result.done {
                    halt_at = Some(halt_at.map_or(base, |depth| depth.max(base)));
                }

                match result.emit {
                    Emit::Skip => break,
                    Emit::Next(next) => {
                        item = next;
                        position += 1;
                    }
                    Emit::Many(values) => {
                        let next_position = position + 1;
                        self.pending.extend(values.into_iter().rev().map(|value| Work {
                            item: value,
                            position: next_position,
                        }));
                        break;
                    }
                }
            }

            if halt_at.is_some_and(|depth| self.pending.len() <= depth) {
                self.pending.clear();
                self.stopped = true;
                return Ok(Flow::Stop);
            }
        }

        Ok(Flow::Continue)
    }

    /// Materializes the run's output.
    ///
    /// If the last evaluator is single, the output is the first accumulated
    /// value, or [`Sequence::empty`] when nothing survived. Otherwise it is
    /// the whole accumulator, in order.
    pub fn finish(self) -> V {
        let single = self.evaluators.last().is_some_and(ActiveEvaluator::is_single);
        if single {
            self.accumulator.into_iter().next().unwrap_or_else(V::empty)
        } else {
            V::from_elements(self.accumulator)
        }
    }
}

impl<V> FusedRun<V> {
    /// Survivors accumulated so far.
    pub fn accumulated(&self) -> &[V] {
        &self.accumulator
    }

    /// Whether a `done` signal has already ended the run.
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Number of evaluators in the run.
    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    /// Returns `true` if the run has no evaluators.
    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }
}

static_assertions::assert_not_impl_any!(FusedRun<crate::value::Value>: Send, Sync);
