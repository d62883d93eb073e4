//! The per-element outcome of a lazy evaluator.

/// What an evaluator emits for one element.
///
/// `Next` and `Many` are the two shapes of "has next": a single replacement
/// or an ordered expansion. `Skip` drops the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emit<V> {
    /// The element is dropped.
    Skip,
    /// The element is replaced by a single value.
    Next(V),
    /// The element is replaced by an ordered sequence of values, each of
    /// which continues through the remaining evaluators.
    Many(Vec<V>),
}

/// The outcome of feeding one element into one evaluator.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::lazy::{Emit, LazyResult};
///
/// let kept = LazyResult::next(10);
/// assert!(kept.has_next());
/// assert!(!kept.is_done());
///
/// let last = LazyResult::next(10).done();
/// assert!(last.is_done());
///
/// let expanded = LazyResult::many(vec![1, 1]);
/// assert!(expanded.has_many());
/// assert_eq!(expanded.emit, Emit::Many(vec![1, 1]));
///
/// let stopped: LazyResult<i32> = LazyResult::stop();
/// assert!(!stopped.has_next());
/// assert!(stopped.is_done());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct LazyResult<V> {
    /// What replaces the element downstream.
    pub emit: Emit<V>,
    /// No further upstream elements are consumed once this element has
    /// finished propagating.
    pub done: bool,
}

impl<V> LazyResult<V> {
    /// Replaces the element with `value`.
    #[inline]
    pub const fn next(value: V) -> Self {
        Self {
            emit: Emit::Next(value),
            done: false,
        }
    }

    /// Drops the element.
    #[inline]
    pub const fn skip() -> Self {
        Self {
            emit: Emit::Skip,
            done: false,
        }
    }

    /// Expands the element into `values`, in order.
    #[inline]
    pub const fn many(values: Vec<V>) -> Self {
        Self {
            emit: Emit::Many(values),
            done: false,
        }
    }

    /// Drops the element and ends the run.
    #[inline]
    pub const fn stop() -> Self {
        Self {
            emit: Emit::Skip,
            done: true,
        }
    }

    /// Marks this result as the last upstream element the run consumes.
    #[inline]
    pub const fn done(mut self) -> Self {
        self.done = true;
        self
    }

    /// The `hasNext` flag: the element (or its expansion) survives.
    #[inline]
    pub const fn has_next(&self) -> bool {
        !matches!(self.emit, Emit::Skip)
    }

    /// The `hasMany` flag: the element expands into several values.
    #[inline]
    pub const fn has_many(&self) -> bool {
        matches!(self.emit, Emit::Many(_))
    }

    /// The `done` flag.
    #[inline]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Maps the emitted value(s), keeping the flags.
    pub fn map<W, F>(self, mut function: F) -> LazyResult<W>
    where
        F: FnMut(V) -> W,
    {
        let emit = match self.emit {
            Emit::Skip => Emit::Skip,
            Emit::Next(value) => Emit::Next(function(value)),
            Emit::Many(values) => Emit::Many(values.into_iter().map(function).collect()),
        };
        LazyResult {
            emit,
            done: self.done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_skip_has_no_next() {
        let result: LazyResult<i32> = LazyResult::skip();
        assert!(!result.has_next());
        assert!(!result.has_many());
        assert!(!result.is_done());
    }

    #[rstest]
    fn test_done_keeps_emit() {
        let result = LazyResult::next(3).done();
        assert_eq!(result.emit, Emit::Next(3));
        assert!(result.is_done());
    }

    #[rstest]
    fn test_empty_many_still_has_next() {
        let result: LazyResult<i32> = LazyResult::many(Vec::new());
        assert!(result.has_next());
        assert!(result.has_many());
    }

    #[rstest]
    fn test_map_over_many() {
        let result = LazyResult::many(vec![1, 2]).done().map(|value| value * 10);
        assert_eq!(result.emit, Emit::Many(vec![10, 20]));
        assert!(result.done);
    }

    #[rstest]
    fn test_map_over_skip() {
        let result = LazyResult::<i32>::stop().map(|value| value.to_string());
        assert_eq!(result.emit, Emit::Skip);
        assert!(result.done);
    }
}
