//! The `pipe!` macro for left-to-right stage evaluation.

/// Evaluates a value through a series of stages from left to right.
///
/// `pipe!(x, a, b, c)` is equivalent to
/// [`evaluate(x, &[a, b, c])`](crate::pipe::evaluate): consecutive
/// lazy-capable stages are fused into single passes.
///
/// # Syntax
///
/// - `pipe!(x)` - Returns `Ok(x)`
/// - `pipe!(x, a)` - Applies one stage
/// - `pipe!(x, a, b, ...)` - Applies stages left to right
///
/// # Examples
///
/// ```
/// use lambars_fusion::catalog::{map, take};
/// use lambars_fusion::pipe;
/// use lambars_fusion::value::Value;
///
/// let result = pipe!(
///     Value::from(vec![1, 2, 3]),
///     map(|value: Value| Value::Int(value.as_int().unwrap_or(0) * 10)),
///     take(2),
/// );
/// assert_eq!(result.unwrap(), Value::from(vec![10, 20]));
/// ```
///
/// ## Value only
///
/// ```
/// use lambars_fusion::pipe;
/// use lambars_fusion::value::Value;
///
/// assert_eq!(pipe!(Value::from("unchanged")).unwrap(), Value::from("unchanged"));
/// ```
#[macro_export]
macro_rules! pipe {
    // Value only: identity
    ($value:expr $(,)?) => {
        $crate::pipe::evaluate($value, &[])
    };

    // One or more stages
    ($value:expr, $($stage:expr),+ $(,)?) => {
        $crate::pipe::evaluate($value, &[$($stage),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::stage::Stage;
    use crate::value::Value;

    #[test]
    fn test_pipe_value_only() {
        let result = pipe!(Value::from(42));
        assert_eq!(result.unwrap(), Value::from(42));
    }

    #[test]
    fn test_pipe_single() {
        let wrap = Stage::plain(|value: Value| Value::List(vec![value]));
        let result = pipe!(Value::from(5), wrap);
        assert_eq!(result.unwrap(), Value::from(vec![5]));
    }

    #[test]
    fn test_pipe_two() {
        let wrap = Stage::plain(|value: Value| Value::List(vec![value]));
        let wrap_again = Stage::plain(|value: Value| Value::List(vec![value]));
        let result = pipe!(Value::from(5), wrap, wrap_again);
        assert_eq!(result.unwrap(), Value::List(vec![Value::from(vec![5])]));
    }
}
