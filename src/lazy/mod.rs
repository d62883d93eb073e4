//! The lazy-evaluation protocol between stages and the fusion executor.
//!
//! A lazy-capable stage carries a [`LazyDescriptor`]. At the start of every
//! fused run the descriptor's factory produces a fresh [`LazyEvaluator`],
//! wrapped in an [`ActiveEvaluator`] that keeps the per-run bookkeeping
//! (running index and, for indexed stages, the items received so far).
//!
//! For each element it receives, an evaluator answers with a [`LazyResult`]:
//!
//! | Outcome                 | Meaning                                          |
//! |-------------------------|--------------------------------------------------|
//! | [`Emit::Skip`]          | drop the element                                 |
//! | [`Emit::Next`]          | replace the element and continue downstream      |
//! | [`Emit::Many`]          | expand into several elements, depth-first        |
//! | `done`                  | consume no further upstream elements afterwards  |
//!
//! # Examples
//!
//! ```rust
//! use lambars_fusion::BoxError;
//! use lambars_fusion::lazy::{LazyDescriptor, LazyResult};
//! use lambars_fusion::value::Value;
//!
//! // keep every other element
//! let descriptor = LazyDescriptor::new(|| {
//!     |item: Value, index: usize, _seen: &[Value]| -> Result<LazyResult<Value>, BoxError> {
//!         Ok(if index % 2 == 0 {
//!             LazyResult::next(item)
//!         } else {
//!             LazyResult::skip()
//!         })
//!     }
//! });
//!
//! let mut evaluator = descriptor.instantiate();
//! assert!(evaluator.feed(Value::from(1)).unwrap().has_next());
//! assert!(!evaluator.feed(Value::from(2)).unwrap().has_next());
//! ```

mod descriptor;
mod evaluator;
mod result;

pub use descriptor::LazyDescriptor;
pub use evaluator::{ActiveEvaluator, LazyEvaluator};
pub use result::{Emit, LazyResult};
