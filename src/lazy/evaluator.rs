//! Lazy evaluators and their per-run state.

use std::fmt;

use super::LazyResult;
use crate::error::BoxError;

/// A stateful, per-run consumer of elements.
///
/// `index` is the number of elements this evaluator has received earlier in
/// the current run. `seen` holds the elements received so far in the run,
/// the current one included; it is only populated for indexed descriptors
/// and is empty otherwise.
///
/// Any `FnMut(V, usize, &[V]) -> Result<LazyResult<V>, BoxError>` is an
/// evaluator.
///
/// # Errors
///
/// Errors returned by [`next`](Self::next) abort the whole evaluation and
/// reach the caller as [`PipeError::Stage`](crate::PipeError::Stage).
pub trait LazyEvaluator<V> {
    /// Evaluates one element.
    ///
    /// # Errors
    ///
    /// Whatever the stage logic fails with.
    fn next(&mut self, item: V, index: usize, seen: &[V]) -> Result<LazyResult<V>, BoxError>;
}

impl<V, F> LazyEvaluator<V> for F
where
    F: FnMut(V, usize, &[V]) -> Result<LazyResult<V>, BoxError>,
{
    #[inline]
    fn next(&mut self, item: V, index: usize, seen: &[V]) -> Result<LazyResult<V>, BoxError> {
        self(item, index, seen)
    }
}

/// An evaluator instantiated for one fused run.
///
/// Owns the running index and, when indexed, the list of elements received
/// so far. It is created by [`LazyDescriptor::instantiate`] and dropped with
/// the run that created it; it is never reused.
///
/// [`LazyDescriptor::instantiate`]: super::LazyDescriptor::instantiate
pub struct ActiveEvaluator<V> {
    evaluator: Box<dyn LazyEvaluator<V>>,
    indexed: bool,
    single: bool,
    index: usize,
    seen: Vec<V>,
}

impl<V: Clone> ActiveEvaluator<V> {
    pub(crate) fn new(evaluator: Box<dyn LazyEvaluator<V>>, indexed: bool, single: bool) -> Self {
        Self {
            evaluator,
            indexed,
            single,
            index: 0,
            seen: Vec::new(),
        }
    }

    /// Feeds one element, advancing the running index.
    ///
    /// # Errors
    ///
    /// Propagates the evaluator's own error.
    pub fn feed(&mut self, item: V) -> Result<LazyResult<V>, BoxError> {
        if self.indexed {
            self.seen.push(item.clone());
        }
        let result = self.evaluator.next(item, self.index, &self.seen);
        self.index += 1;
        result
    }
}

impl<V> ActiveEvaluator<V> {
    /// Number of elements fed so far.
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Elements received so far; empty unless indexed.
    pub fn seen(&self) -> &[V] {
        &self.seen
    }

    /// Whether `seen` is populated.
    pub const fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Whether the run this evaluator ends collapses to a scalar.
    pub const fn is_single(&self) -> bool {
        self.single
    }
}

impl<V> fmt::Debug for ActiveEvaluator<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ActiveEvaluator")
            .field("indexed", &self.indexed)
            .field("single", &self.single)
            .field("index", &self.index)
            .field("seen", &self.seen.len())
            .finish_non_exhaustive()
    }
}
