//! Stages without a lazy form.
//!
//! These need the whole container at once, so they always split fused runs.

use super::elements;
use crate::stage::Stage;
use crate::value::{Sequence, Value};

/// Reverses a container.
pub fn reverse<V>() -> Stage<V>
where
    V: Sequence + Clone + 'static,
{
    Stage::from_transform(|value: V| {
        let mut items = elements(value)?;
        items.reverse();
        Ok(V::from_elements(items))
    })
}

/// Replaces a list with its length.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::catalog::length;
/// use lambars_fusion::value::Value;
///
/// assert_eq!(length().apply(Value::from(vec![1, 2, 3])).unwrap(), Value::from(3));
/// ```
pub fn length() -> Stage<Value> {
    Stage::from_transform(|value: Value| {
        let count = elements(value)?.len();
        Ok(Value::Int(i64::try_from(count).unwrap_or(i64::MAX)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipeError;
    use rstest::rstest;

    #[rstest]
    fn test_reverse_is_plain() {
        let stage = reverse::<Value>();
        assert!(!stage.is_lazy());
        assert_eq!(
            stage.apply(Value::from(vec![1, 2, 3])).unwrap(),
            Value::from(vec![3, 2, 1])
        );
    }

    #[rstest]
    fn test_length_of_scalar_fails() {
        let error = length().apply(Value::from("abc")).unwrap_err();
        assert!(matches!(error, PipeError::NotSequence { found: "string" }));
    }
}
