//! Stages that keep or drop elements.

use std::rc::Rc;

use super::elements;
use crate::error::BoxError;
use crate::lazy::{LazyDescriptor, LazyEvaluator, LazyResult};
use crate::stage::Stage;
use crate::value::Sequence;

/// Keeps the elements satisfying `predicate`.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::catalog::filter;
/// use lambars_fusion::value::Value;
///
/// let odd = filter(|value: &Value| value.as_int().is_some_and(|number| number % 2 == 1));
/// assert_eq!(
///     odd.apply(Value::from(vec![1, 2, 3, 4, 5])).unwrap(),
///     Value::from(vec![1, 3, 5])
/// );
/// ```
pub fn filter<V, P>(predicate: P) -> Stage<V>
where
    V: Sequence + Clone + 'static,
    P: Fn(&V) -> bool + 'static,
{
    let predicate = Rc::new(predicate);
    let eager = Rc::clone(&predicate);
    Stage::lazy(
        move |value: V| {
            Ok(V::from_elements(
                elements(value)?.into_iter().filter(|item| eager(item)).collect(),
            ))
        },
        LazyDescriptor::new(move || {
            let predicate = Rc::clone(&predicate);
            move |item: V, _index: usize, _seen: &[V]| -> Result<LazyResult<V>, BoxError> {
                Ok(if predicate(&item) {
                    LazyResult::next(item)
                } else {
                    LazyResult::skip()
                })
            }
        }),
    )
}

/// Keeps the elements satisfying `predicate(element, index, seen)`.
///
/// `index` and `seen` count the elements this stage receives, as in
/// [`map_indexed`](super::map_indexed).
pub fn filter_indexed<V, P>(predicate: P) -> Stage<V>
where
    V: Sequence + Clone + 'static,
    P: Fn(&V, usize, &[V]) -> bool + 'static,
{
    let predicate = Rc::new(predicate);
    let eager = Rc::clone(&predicate);
    Stage::lazy(
        move |value: V| {
            let items = elements(value)?;
            let kept = items
                .iter()
                .enumerate()
                .filter(|&(index, item)| eager(item, index, &items[..=index]))
                .map(|(_, item)| item.clone())
                .collect();
            Ok(V::from_elements(kept))
        },
        LazyDescriptor::new(move || {
            let predicate = Rc::clone(&predicate);
            move |item: V, index: usize, seen: &[V]| -> Result<LazyResult<V>, BoxError> {
                Ok(if predicate(&item, index, seen) {
                    LazyResult::next(item)
                } else {
                    LazyResult::skip()
                })
            }
        })
        .indexed(),
    )
}

/// Drops elements equal to one already kept.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::catalog::uniq;
/// use lambars_fusion::value::Value;
///
/// assert_eq!(
///     uniq().apply(Value::from(vec![1, 2, 1, 3, 2])).unwrap(),
///     Value::from(vec![1, 2, 3])
/// );
/// ```
pub fn uniq<V>() -> Stage<V>
where
    V: Sequence + Clone + PartialEq + 'static,
{
    Stage::lazy(
        |value: V| {
            let mut kept: Vec<V> = Vec::new();
            for item in elements(value)? {
                if !kept.contains(&item) {
                    kept.push(item);
                }
            }
            Ok(V::from_elements(kept))
        },
        LazyDescriptor::new(Uniq::new),
    )
}

struct Uniq<V> {
    kept: Vec<V>,
}

impl<V> Uniq<V> {
    const fn new() -> Self {
        Self { kept: Vec::new() }
    }
}

impl<V: Clone + PartialEq> LazyEvaluator<V> for Uniq<V> {
    fn next(&mut self, item: V, _index: usize, _seen: &[V]) -> Result<LazyResult<V>, BoxError> {
        if self.kept.contains(&item) {
            return Ok(LazyResult::skip());
        }
        self.kept.push(item.clone());
        Ok(LazyResult::next(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use rstest::rstest;

    fn is_odd(value: &Value) -> bool {
        value.as_int().is_some_and(|number| number % 2 == 1)
    }

    #[rstest]
    #[case(vec![1, 2, 3, 4, 5], vec![1, 3, 5])]
    #[case(vec![2, 4], vec![])]
    #[case(vec![], vec![])]
    fn test_filter_eager(#[case] input: Vec<i64>, #[case] expected: Vec<i64>) {
        assert_eq!(
            filter(is_odd).apply(Value::from(input)).unwrap(),
            Value::from(expected)
        );
    }

    #[rstest]
    fn test_filter_indexed_keeps_even_positions() {
        let stage = filter_indexed(|_value: &Value, index: usize, _seen: &[Value]| index % 2 == 0);
        assert_eq!(
            stage.apply(Value::from(vec![10, 11, 12, 13])).unwrap(),
            Value::from(vec![10, 12])
        );
    }

    #[rstest]
    fn test_filter_indexed_sees_prefix() {
        // keep an element only if it is larger than everything before it
        let stage = filter_indexed(|value: &Value, _index: usize, seen: &[Value]| {
            seen[..seen.len() - 1]
                .iter()
                .all(|earlier| earlier.as_int() < value.as_int())
        });
        assert_eq!(
            stage.apply(Value::from(vec![3, 1, 4, 1, 5])).unwrap(),
            Value::from(vec![3, 4, 5])
        );
    }

    #[rstest]
    fn test_uniq_lazy_state_is_per_instance() {
        let stage = uniq::<Value>();
        let descriptor = stage.lazy_descriptor().unwrap();

        let mut first = descriptor.instantiate();
        assert!(first.feed(Value::from(1)).unwrap().has_next());
        assert!(!first.feed(Value::from(1)).unwrap().has_next());

        let mut second = descriptor.instantiate();
        assert!(second.feed(Value::from(1)).unwrap().has_next());
    }
}
