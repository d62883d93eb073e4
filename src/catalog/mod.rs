//! Built-in stages.
//!
//! Every function here builds a [`Stage`] in "data last" form: the stage is
//! handed to a pipeline and receives its data there. Calling
//! [`Stage::apply`] on the result is the "data first" form.
//!
//! All list stages except [`reverse`] and [`length`] are lazy-capable, and
//! their eager transforms agree with their lazy evaluators.
//!
//! | Stage                               | Lazy outcome                         |
//! |-------------------------------------|--------------------------------------|
//! | [`map`], [`try_map`], [`map_indexed`], [`tap`] | replace                   |
//! | [`filter`], [`filter_indexed`], [`uniq`]      | keep or drop               |
//! | [`take`], [`take_while`], [`skip`]            | bound (may signal `done`)  |
//! | [`flat_map`], [`flatten`]                     | expand                     |
//! | [`find`], [`first`]                           | single (collapse to scalar)|
//!
//! # Examples
//!
//! ```rust
//! use lambars_fusion::catalog::{find, map};
//! use lambars_fusion::pipe;
//! use lambars_fusion::value::Value;
//!
//! let found = pipe!(
//!     Value::from(vec![3, 8, 12, 20]),
//!     map(|value: Value| Value::Int(value.as_int().unwrap_or(0) + 1)),
//!     find(|value: &Value| value.as_int().is_some_and(|number| number > 10)),
//! );
//! assert_eq!(found.unwrap(), Value::from(13));
//!
//! // data first
//! let doubled = map(|value: Value| Value::Int(value.as_int().unwrap_or(0) * 2))
//!     .apply(Value::from(vec![1, 2]));
//! assert_eq!(doubled.unwrap(), Value::from(vec![2, 4]));
//! ```
//!
//! [`Stage`]: crate::stage::Stage
//! [`Stage::apply`]: crate::stage::Stage::apply

mod bound;
mod eager;
mod expand;
mod select;
mod single;
mod transform;

pub use bound::{skip, take, take_while};
pub use eager::{length, reverse};
pub use expand::{flat_map, flatten};
pub use select::{filter, filter_indexed, uniq};
pub use single::{find, first};
pub use transform::{map, map_indexed, tap, try_map};

use crate::error::PipeError;
use crate::value::Sequence;

/// Splits a container for an eager transform.
fn elements<V: Sequence>(value: V) -> Result<Vec<V>, PipeError> {
    value
        .into_elements()
        .map_err(|value| PipeError::NotSequence { found: value.kind() })
}
