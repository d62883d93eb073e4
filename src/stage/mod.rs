//! Pipeline stages.
//!
//! A [`Stage`] is a unary transform from one value to the next. It is either
//! [`Stage::Plain`], applied eagerly to the whole value, or
//! [`Stage::LazyCapable`], which additionally carries a [`LazyDescriptor`]
//! so that consecutive lazy stages can be fused into a single pass.
//!
//! The variant is fixed when the stage is built; the engine never probes a
//! stage for capabilities at run time.
//!
//! # Examples
//!
//! ```rust
//! use lambars_fusion::stage::Stage;
//! use lambars_fusion::value::Value;
//!
//! let wrap = Stage::plain(|value: Value| Value::List(vec![value]));
//! assert!(!wrap.is_lazy());
//! assert_eq!(wrap.apply(Value::from(1)).unwrap(), Value::from(vec![1]));
//! ```

use std::fmt;
use std::rc::Rc;

use crate::error::{BoxError, PipeError};
use crate::lazy::LazyDescriptor;
use crate::value::Value;

/// The eager form of a stage.
pub type Transform<V> = Rc<dyn Fn(V) -> Result<V, PipeError>>;

/// One step of a pipeline.
pub enum Stage<V = Value> {
    /// A stage that can only be applied to the whole value.
    Plain(Transform<V>),
    /// A stage that can also be fused with its lazy neighbours.
    LazyCapable {
        /// Applied when the stage runs on its own.
        transform: Transform<V>,
        /// Used when the stage takes part in a fused run.
        lazy: LazyDescriptor<V>,
    },
}

impl<V: 'static> Stage<V> {
    /// Creates an eager-only stage from an infallible function.
    pub fn plain<F>(function: F) -> Self
    where
        F: Fn(V) -> V + 'static,
    {
        Self::Plain(Rc::new(move |value: V| -> Result<V, PipeError> {
            Ok(function(value))
        }))
    }

    /// Creates an eager-only stage from a fallible function.
    ///
    /// The function's error reaches the caller as [`PipeError::Stage`].
    pub fn try_plain<F, E>(function: F) -> Self
    where
        F: Fn(V) -> Result<V, E> + 'static,
        E: Into<BoxError>,
    {
        Self::Plain(Rc::new(move |value: V| {
            function(value).map_err(PipeError::stage)
        }))
    }

    /// Creates an eager-only stage from a transform that reports engine errors itself.
    pub fn from_transform<F>(transform: F) -> Self
    where
        F: Fn(V) -> Result<V, PipeError> + 'static,
    {
        Self::Plain(Rc::new(transform))
    }

    /// Creates a lazy-capable stage.
    ///
    /// `transform` and the evaluators built by `lazy` must agree: applying
    /// the transform to a container must equal running the lazy evaluator
    /// over its elements.
    pub fn lazy<F>(transform: F, lazy: LazyDescriptor<V>) -> Self
    where
        F: Fn(V) -> Result<V, PipeError> + 'static,
    {
        Self::LazyCapable {
            transform: Rc::new(transform),
            lazy,
        }
    }
}

impl<V> Stage<V> {
    /// Applies the stage eagerly to a whole value.
    ///
    /// # Errors
    ///
    /// Whatever the stage's transform fails with.
    pub fn apply(&self, value: V) -> Result<V, PipeError> {
        (self.transform())(value)
    }

    /// The eager transform, present on every stage.
    pub fn transform(&self) -> &Transform<V> {
        match self {
            Self::Plain(transform) | Self::LazyCapable { transform, .. } => transform,
        }
    }

    /// The lazy capability, if the stage has one.
    pub const fn lazy_descriptor(&self) -> Option<&LazyDescriptor<V>> {
        match self {
            Self::Plain(_) => None,
            Self::LazyCapable { lazy, .. } => Some(lazy),
        }
    }

    /// Returns `true` for [`Stage::LazyCapable`].
    pub const fn is_lazy(&self) -> bool {
        matches!(self, Self::LazyCapable { .. })
    }

    /// Returns `true` if the stage collapses its fused run to a scalar.
    pub const fn is_single(&self) -> bool {
        match self {
            Self::Plain(_) => false,
            Self::LazyCapable { lazy, .. } => lazy.is_single(),
        }
    }
}

impl<V> Clone for Stage<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(transform) => Self::Plain(Rc::clone(transform)),
            Self::LazyCapable { transform, lazy } => Self::LazyCapable {
                transform: Rc::clone(transform),
                lazy: lazy.clone(),
            },
        }
    }
}

impl<V> fmt::Debug for Stage<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(_) => formatter.write_str("Stage::Plain"),
            Self::LazyCapable { lazy, .. } => formatter
                .debug_struct("Stage::LazyCapable")
                .field("indexed", &lazy.is_indexed())
                .field("single", &lazy.is_single())
                .finish_non_exhaustive(),
        }
    }
}

static_assertions::assert_not_impl_any!(Stage<Value>: Send, Sync);
