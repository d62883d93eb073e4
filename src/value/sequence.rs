//! The container seam between the engine and its values.

/// A value that may be a container of values of the same type.
///
/// Elements have the same type as the container so that a pipeline can
/// freely move between scalars and sequences (a run collapsing to a scalar,
/// an eager stage wrapping a scalar back into a list, and so on).
///
/// # Laws
///
/// - **Round trip**: if `v.into_elements()` is `Ok(items)`, then
///   `Self::from_elements(items)` is equivalent to `v`.
/// - **Empty is not a match**: `Self::empty()` is what a scalar-collapsing
///   run yields when nothing survived; it should be distinguishable from
///   any element a stage can produce.
pub trait Sequence: Sized {
    /// Splits the value into its elements, in order.
    ///
    /// # Errors
    ///
    /// Returns the value itself when it is not a container.
    fn into_elements(self) -> Result<Vec<Self>, Self>;

    /// Builds a container from elements, preserving order.
    fn from_elements(elements: Vec<Self>) -> Self;

    /// The sentinel produced by a scalar-collapsing run with no survivor.
    fn empty() -> Self;

    /// A short name for the kind of value, used in diagnostics.
    fn kind(&self) -> &'static str;
}
