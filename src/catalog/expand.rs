//! One-to-many stages.

use std::rc::Rc;

use super::elements;
use crate::error::BoxError;
use crate::lazy::{LazyDescriptor, LazyResult};
use crate::stage::Stage;
use crate::value::Sequence;

/// Replaces every element with the elements `function` returns for it.
///
/// Inside a fused run the returned values continue through the remaining
/// stages one at a time, so a downstream [`take`](super::take) stops the
/// expansion as soon as it is satisfied.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::catalog::{flat_map, take};
/// use lambars_fusion::pipe;
/// use lambars_fusion::value::Value;
///
/// let result = pipe!(
///     Value::from(vec![1, 2, 3]),
///     flat_map(|value: Value| vec![value.clone(), value]),
///     take(3),
/// );
/// assert_eq!(result.unwrap(), Value::from(vec![1, 1, 2]));
/// ```
pub fn flat_map<V, F>(function: F) -> Stage<V>
where
    V: Sequence + Clone + 'static,
    F: Fn(V) -> Vec<V> + 'static,
{
    let function = Rc::new(function);
    let eager = Rc::clone(&function);
    Stage::lazy(
        move |value: V| {
            Ok(V::from_elements(
                elements(value)?.into_iter().flat_map(|item| eager(item)).collect(),
            ))
        },
        LazyDescriptor::new(move || {
            let function = Rc::clone(&function);
            move |item: V, _index: usize, _seen: &[V]| -> Result<LazyResult<V>, BoxError> {
                Ok(LazyResult::many(function(item)))
            }
        }),
    )
}

/// Flattens one level: sequence elements are replaced by their elements,
/// other elements pass through.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::catalog::flatten;
/// use lambars_fusion::value::Value;
///
/// let nested = Value::list([Value::from(1), Value::from(vec![2, 3]), Value::from(vec![vec![4]])]);
/// assert_eq!(
///     flatten().apply(nested).unwrap(),
///     Value::list([Value::from(1), Value::from(2), Value::from(3), Value::from(vec![4])])
/// );
/// ```
pub fn flatten<V>() -> Stage<V>
where
    V: Sequence + Clone + 'static,
{
    Stage::lazy(
        |value: V| {
            let mut flattened = Vec::new();
            for item in elements(value)? {
                match item.into_elements() {
                    Ok(inner) => flattened.extend(inner),
                    Err(scalar) => flattened.push(scalar),
                }
            }
            Ok(V::from_elements(flattened))
        },
        LazyDescriptor::new(|| {
            |item: V, _index: usize, _seen: &[V]| -> Result<LazyResult<V>, BoxError> {
                Ok(match item.into_elements() {
                    Ok(inner) => LazyResult::many(inner),
                    Err(scalar) => LazyResult::next(scalar),
                })
            }
        }),
    )
}
