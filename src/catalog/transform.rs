//! One-to-one stages.

use std::rc::Rc;

use super::elements;
use crate::error::{BoxError, PipeError};
use crate::lazy::{LazyDescriptor, LazyResult};
use crate::stage::Stage;
use crate::value::Sequence;

/// Replaces every element with `function(element)`.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::catalog::map;
/// use lambars_fusion::value::Value;
///
/// let stage = map(|value: Value| Value::Int(value.as_int().unwrap_or(0) + 1));
/// assert_eq!(stage.apply(Value::from(vec![1, 2])).unwrap(), Value::from(vec![2, 3]));
/// ```
pub fn map<V, F>(function: F) -> Stage<V>
where
    V: Sequence + Clone + 'static,
    F: Fn(V) -> V + 'static,
{
    let function = Rc::new(function);
    let eager = Rc::clone(&function);
    Stage::lazy(
        move |value: V| {
            Ok(V::from_elements(
                elements(value)?.into_iter().map(|item| eager(item)).collect(),
            ))
        },
        LazyDescriptor::new(move || {
            let function = Rc::clone(&function);
            move |item: V, _index: usize, _seen: &[V]| -> Result<LazyResult<V>, BoxError> {
                Ok(LazyResult::next(function(item)))
            }
        }),
    )
}

/// Like [`map`], with a fallible function.
///
/// The first error aborts the evaluation and reaches the caller unchanged
/// inside [`PipeError::Stage`].
pub fn try_map<V, F, E>(function: F) -> Stage<V>
where
    V: Sequence + Clone + 'static,
    F: Fn(V) -> Result<V, E> + 'static,
    E: Into<BoxError>,
{
    let function = Rc::new(function);
    let eager = Rc::clone(&function);
    Stage::lazy(
        move |value: V| {
            let mapped = elements(value)?
                .into_iter()
                .map(|item| eager(item).map_err(PipeError::stage))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(V::from_elements(mapped))
        },
        LazyDescriptor::new(move || {
            let function = Rc::clone(&function);
            move |item: V, _index: usize, _seen: &[V]| -> Result<LazyResult<V>, BoxError> {
                function(item).map(LazyResult::next).map_err(Into::into)
            }
        }),
    )
}

/// Replaces every element with `function(element, index, seen)`.
///
/// `index` is the element's position among the elements this stage
/// receives and `seen` holds those elements up to and including the current
/// one. Inside a fused run both count only what reached the stage, not the
/// original input.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::catalog::map_indexed;
/// use lambars_fusion::value::Value;
///
/// let stage = map_indexed(|_value: Value, index: usize, _seen: &[Value]| {
///     Value::from(index as u32)
/// });
/// assert_eq!(stage.apply(Value::from(vec![0, 0, 0])).unwrap(), Value::from(vec![0, 1, 2]));
/// ```
pub fn map_indexed<V, F>(function: F) -> Stage<V>
where
    V: Sequence + Clone + 'static,
    F: Fn(V, usize, &[V]) -> V + 'static,
{
    let function = Rc::new(function);
    let eager = Rc::clone(&function);
    Stage::lazy(
        move |value: V| {
            let items = elements(value)?;
            let seen = items.clone();
            Ok(V::from_elements(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| eager(item, index, &seen[..=index]))
                    .collect(),
            ))
        },
        LazyDescriptor::new(move || {
            let function = Rc::clone(&function);
            move |item: V, index: usize, seen: &[V]| -> Result<LazyResult<V>, BoxError> {
                Ok(LazyResult::next(function(item, index, seen)))
            }
        })
        .indexed(),
    )
}

/// Calls `function` on every element and passes it through unchanged.
pub fn tap<V, F>(function: F) -> Stage<V>
where
    V: Sequence + Clone + 'static,
    F: Fn(&V) + 'static,
{
    let function = Rc::new(function);
    let eager = Rc::clone(&function);
    Stage::lazy(
        move |value: V| {
            let items = elements(value)?;
            items.iter().for_each(|item| eager(item));
            Ok(V::from_elements(items))
        },
        LazyDescriptor::new(move || {
            let function = Rc::clone(&function);
            move |item: V, _index: usize, _seen: &[V]| -> Result<LazyResult<V>, BoxError> {
                function(&item);
                Ok(LazyResult::next(item))
            }
        }),
    )
}
