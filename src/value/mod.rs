//! Values flowing through a pipeline.
//!
//! The engine never looks inside a value except through the [`Sequence`]
//! trait: a fused run needs to split its input into elements, collect its
//! survivors back into a container, and produce an "empty" sentinel when a
//! scalar-collapsing run finds nothing.
//!
//! [`Value`] is the dynamic value type shipped with the crate. Any other
//! type can take part in a pipeline by implementing [`Sequence`].
//!
//! # Examples
//!
//! ```rust
//! use lambars_fusion::value::{Sequence, Value};
//!
//! let list = Value::from(vec![1, 2, 3]);
//! let elements = list.into_elements().unwrap();
//! assert_eq!(elements, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
//!
//! assert_eq!(Value::empty(), Value::Undefined);
//! ```

mod dynamic;
mod sequence;

pub use dynamic::Value;
pub use sequence::Sequence;
