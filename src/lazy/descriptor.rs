//! Static lazy-capability metadata attached to a stage.

use std::fmt;
use std::rc::Rc;

use super::{ActiveEvaluator, LazyEvaluator};

type Factory<V> = Rc<dyn Fn() -> Box<dyn LazyEvaluator<V>>>;

/// Describes how a stage evaluates lazily.
///
/// The factory closes over the stage's arguments and builds a fresh
/// evaluator on every call. Two flags refine how the engine drives it:
///
/// - `indexed`: the evaluator receives the elements it has been fed so far
///   in the run (see [`LazyEvaluator`]).
/// - `single`: the fused run this stage ends collapses to its first survivor
///   (or to the empty sentinel). A single stage always closes its run.
///
/// Descriptors are immutable and cheap to clone.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::BoxError;
/// use lambars_fusion::lazy::{LazyDescriptor, LazyResult};
///
/// let first = LazyDescriptor::new(|| {
///     |item: i32, _index: usize, _seen: &[i32]| -> Result<LazyResult<i32>, BoxError> {
///         Ok(LazyResult::next(item).done())
///     }
/// })
/// .single();
///
/// assert!(first.is_single());
/// assert!(!first.is_indexed());
/// ```
pub struct LazyDescriptor<V> {
    factory: Factory<V>,
    indexed: bool,
    single: bool,
}

impl<V: Clone + 'static> LazyDescriptor<V> {
    /// Creates a descriptor from an evaluator factory.
    pub fn new<F, E>(factory: F) -> Self
    where
        F: Fn() -> E + 'static,
        E: LazyEvaluator<V> + 'static,
    {
        Self {
            factory: Rc::new(move || Box::new(factory()) as Box<dyn LazyEvaluator<V>>),
            indexed: false,
            single: false,
        }
    }

    /// Marks the evaluator as wanting the elements it has received so far.
    #[must_use]
    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }

    /// Marks the stage as collapsing its run to a scalar.
    #[must_use]
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    /// Builds a fresh evaluator for a new fused run.
    pub fn instantiate(&self) -> ActiveEvaluator<V> {
        ActiveEvaluator::new((self.factory)(), self.indexed, self.single)
    }
}

impl<V> LazyDescriptor<V> {
    /// Returns `true` if evaluators receive their history.
    pub const fn is_indexed(&self) -> bool {
        self.indexed
    }

    /// Returns `true` if the stage collapses its run to a scalar.
    pub const fn is_single(&self) -> bool {
        self.single
    }
}

impl<V> Clone for LazyDescriptor<V> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
            indexed: self.indexed,
            single: self.single,
        }
    }
}

impl<V> fmt::Debug for LazyDescriptor<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LazyDescriptor")
            .field("indexed", &self.indexed)
            .field("single", &self.single)
            .finish_non_exhaustive()
    }
}
