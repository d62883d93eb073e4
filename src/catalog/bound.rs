//! Stages that bound how much of the input survives.
//!
//! [`take`] and [`take_while`] signal `done`, so inside a fused run they stop
//! upstream consumption as soon as their bound is reached.

use std::rc::Rc;

use super::elements;
use crate::error::BoxError;
use crate::lazy::{LazyDescriptor, LazyEvaluator, LazyResult};
use crate::stage::Stage;
use crate::value::Sequence;

/// Keeps the first `count` elements.
///
/// # Examples
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use lambars_fusion::catalog::{map, take};
/// use lambars_fusion::pipe;
/// use lambars_fusion::value::Value;
///
/// let calls = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&calls);
/// let result = pipe!(
///     Value::from(vec![1, 2, 3]),
///     map(move |value: Value| {
///         counter.set(counter.get() + 1);
///         Value::Int(value.as_int().unwrap_or(0) * 10)
///     }),
///     take(2),
/// );
///
/// assert_eq!(result.unwrap(), Value::from(vec![10, 20]));
/// assert_eq!(calls.get(), 2);
/// ```
pub fn take<V>(count: usize) -> Stage<V>
where
    V: Sequence + Clone + 'static,
{
    Stage::lazy(
        move |value: V| {
            Ok(V::from_elements(
                elements(value)?.into_iter().take(count).collect(),
            ))
        },
        LazyDescriptor::new(move || Take { remaining: count }),
    )
}

struct Take {
    remaining: usize,
}

impl<V> LazyEvaluator<V> for Take {
    fn next(&mut self, item: V, _index: usize, _seen: &[V]) -> Result<LazyResult<V>, BoxError> {
        if self.remaining == 0 {
            return Ok(LazyResult::stop());
        }
        self.remaining -= 1;
        let result = LazyResult::next(item);
        Ok(if self.remaining == 0 { result.done() } else { result })
    }
}

/// Keeps elements while `predicate` holds; the first failing element and
/// everything after it are dropped.
pub fn take_while<V, P>(predicate: P) -> Stage<V>
where
    V: Sequence + Clone + 'static,
    P: Fn(&V) -> bool + 'static,
{
    let predicate = Rc::new(predicate);
    let eager = Rc::clone(&predicate);
    Stage::lazy(
        move |value: V| {
            Ok(V::from_elements(
                elements(value)?
                    .into_iter()
                    .take_while(|item| eager(item))
                    .collect(),
            ))
        },
        LazyDescriptor::new(move || {
            let predicate = Rc::clone(&predicate);
            move |item: V, _index: usize, _seen: &[V]| -> Result<LazyResult<V>, BoxError> {
                Ok(if predicate(&item) {
                    LazyResult::next(item)
                } else {
                    LazyResult::stop()
                })
            }
        }),
    )
}

/// Drops the first `count` elements.
pub fn skip<V>(count: usize) -> Stage<V>
where
    V: Sequence + Clone + 'static,
{
    Stage::lazy(
        move |value: V| {
            Ok(V::from_elements(
                elements(value)?.into_iter().skip(count).collect(),
            ))
        },
        LazyDescriptor::new(move || Skip { remaining: count }),
    )
}

struct Skip {
    remaining: usize,
}

impl<V> LazyEvaluator<V> for Skip {
    fn next(&mut self, item: V, _index: usize, _seen: &[V]) -> Result<LazyResult<V>, BoxError> {
        if self.remaining > 0 {
            self.remaining -= 1;
            return Ok(LazyResult::skip());
        }
        Ok(LazyResult::next(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::Emit;
    use crate::value::Value;
    use rstest::rstest;

    #[rstest]
    #[case(0, vec![])]
    #[case(2, vec![1, 2])]
    #[case(5, vec![1, 2, 3])]
    fn test_take_eager(#[case] count: usize, #[case] expected: Vec<i64>) {
        assert_eq!(
            take(count).apply(Value::from(vec![1, 2, 3])).unwrap(),
            Value::from(expected)
        );
    }

    #[rstest]
    fn test_take_signals_done_with_last_item() {
        let mut evaluator = Take { remaining: 2 };
        let first = LazyEvaluator::<i32>::next(&mut evaluator, 1, 0, &[]).unwrap();
        let second = LazyEvaluator::<i32>::next(&mut evaluator, 2, 1, &[]).unwrap();
        assert!(!first.done);
        assert_eq!(second.emit, Emit::Next(2));
        assert!(second.done);
    }

    #[rstest]
    fn test_take_zero_stops_immediately() {
        let mut evaluator = Take { remaining: 0 };
        let result = LazyEvaluator::<i32>::next(&mut evaluator, 1, 0, &[]).unwrap();
        assert!(!result.has_next());
        assert!(result.done);
    }

    #[rstest]
    fn test_take_while_eager() {
        let stage = take_while(|value: &Value| value.as_int().is_some_and(|number| number < 3));
        assert_eq!(
            stage.apply(Value::from(vec![1, 2, 3, 1])).unwrap(),
            Value::from(vec![1, 2])
        );
    }

    #[rstest]
    #[case(0, vec![1, 2, 3])]
    #[case(2, vec![3])]
    #[case(9, vec![])]
    fn test_skip_eager(#[case] count: usize, #[case] expected: Vec<i64>) {
        assert_eq!(
            skip(count).apply(Value::from(vec![1, 2, 3])).unwrap(),
            Value::from(expected)
        );
    }

    #[rstest]
    fn test_skip_never_signals_done() {
        let mut evaluator = Skip { remaining: 1 };
        let first = LazyEvaluator::<i32>::next(&mut evaluator, 1, 0, &[]).unwrap();
        let second = LazyEvaluator::<i32>::next(&mut evaluator, 2, 1, &[]).unwrap();
        assert_eq!(first, LazyResult::skip());
        assert_eq!(second, LazyResult::next(2));
    }
}
