//! Stages that collapse their run to a scalar.
//!
//! Both stages here are `single`: the fused run they close yields the first
//! survivor itself rather than a one-element container, or
//! [`Sequence::empty`] when nothing survives.

use std::rc::Rc;

use super::elements;
use crate::error::BoxError;
use crate::lazy::{LazyDescriptor, LazyResult};
use crate::stage::Stage;
use crate::value::Sequence;

/// Returns the first element satisfying `predicate`.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::catalog::find;
/// use lambars_fusion::value::Value;
///
/// let over_two = find(|value: &Value| value.as_int().is_some_and(|number| number > 2));
/// assert_eq!(over_two.apply(Value::from(vec![1, 3, 5])).unwrap(), Value::from(3));
/// assert_eq!(over_two.apply(Value::from(vec![1])).unwrap(), Value::Undefined);
/// ```
pub fn find<V, P>(predicate: P) -> Stage<V>
where
    V: Sequence + Clone + 'static,
    P: Fn(&V) -> bool + 'static,
{
    let predicate = Rc::new(predicate);
    let eager = Rc::clone(&predicate);
    Stage::lazy(
        move |value: V| {
            Ok(elements(value)?
                .into_iter()
                .find(|item| eager(item))
                .unwrap_or_else(V::empty))
        },
        LazyDescriptor::new(move || {
            let predicate = Rc::clone(&predicate);
            move |item: V, _index: usize, _seen: &[V]| -> Result<LazyResult<V>, BoxError> {
                Ok(if predicate(&item) {
                    LazyResult::next(item).done()
                } else {
                    LazyResult::skip()
                })
            }
        })
        .single(),
    )
}

/// Returns the first element.
pub fn first<V>() -> Stage<V>
where
    V: Sequence + Clone + 'static,
{
    Stage::lazy(
        |value: V| Ok(elements(value)?.into_iter().next().unwrap_or_else(V::empty)),
        LazyDescriptor::new(|| {
            |item: V, _index: usize, _seen: &[V]| -> Result<LazyResult<V>, BoxError> {
                Ok(LazyResult::next(item).done())
            }
        })
        .single(),
    )
}
