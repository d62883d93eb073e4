//! # lambars-fusion
//!
//! Lazy pipeline fusion for value transformations.
//!
//! ## Overview
//!
//! A pipeline is an initial value and an ordered list of stages. Naively,
//! every stage would consume a whole container and build a new one for the
//! next stage. This crate instead fuses consecutive lazy-capable stages so
//! that each element travels through all of them before the next element is
//! read:
//!
//! - **Fusion**: N fused stages build one output container, not N
//! - **Short-circuit**: a downstream bound (`take`) stops upstream work,
//!   even over unbounded input
//! - **Expansion**: one-to-many stages (`flat_map`) feed the rest of the
//!   run element by element
//! - **Scalar collapse**: runs ending in `find`/`first` yield the element
//!   itself
//!
//! The crate is organised leaves first:
//!
//! - [`value`]: the [`Sequence`](value::Sequence) seam and the dynamic [`Value`]
//! - [`lazy`]: lazy results, evaluators and descriptors
//! - [`stage`]: the [`Stage`] variant (plain or lazy-capable)
//! - [`fusion`]: the single-pass executor for one fused run
//! - [`pipe`]: the driver, [`evaluate`] and [`Pipeline`]
//! - [`catalog`]: built-in stages
//!
//! ## Feature Flags
//!
//! - `catalog` (default): built-in stages (`map`, `filter`, `take`, ...)
//! - `serde`: `Serialize`/`Deserialize` for [`Value`] and [`PipeOptions`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lambars_fusion::prelude::*;
//!
//! let result = pipe!(
//!     Value::from(vec![1, 2, 3]),
//!     map(|value: Value| Value::Int(value.as_int().unwrap_or(0) * 10)),
//!     take(2),
//! );
//! assert_eq!(result.unwrap(), Value::from(vec![10, 20]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types, functions and the [`pipe!`] macro.
///
/// # Usage
///
/// ```rust
/// use lambars_fusion::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{BoxError, PipeError};
    pub use crate::lazy::{Emit, LazyDescriptor, LazyEvaluator, LazyResult};
    pub use crate::pipe;
    pub use crate::pipe::{Fusion, PipeOptions, Pipeline, evaluate, evaluate_with};
    pub use crate::stage::Stage;
    pub use crate::value::{Sequence, Value};

    #[cfg(feature = "catalog")]
    pub use crate::catalog::*;
}

mod error;

pub mod fusion;
pub mod lazy;
pub mod pipe;
pub mod stage;
pub mod value;

#[cfg(feature = "catalog")]
pub mod catalog;

pub use error::{BoxError, PipeError};
pub use pipe::{PipeOptions, Pipeline, evaluate, evaluate_with};
pub use stage::Stage;
pub use value::Value;
