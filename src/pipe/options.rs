//! Evaluation options.

/// Whether lazy-capable stages are fused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Fusion {
    /// Consecutive lazy-capable stages share a single pass.
    #[default]
    Enabled,
    /// Every stage runs through its eager transform, materializing a full
    /// container between stages. Useful as a reference when debugging a
    /// stage whose lazy and eager forms disagree.
    Disabled,
}

/// Options controlling how a [`Pipeline`](super::Pipeline) evaluates.
///
/// # Examples
///
/// ```rust
/// use lambars_fusion::pipe::{Fusion, PipeOptions};
///
/// let options = PipeOptions::default();
/// assert_eq!(options.fusion, Fusion::Enabled);
///
/// let eager = PipeOptions::eager();
/// assert!(!eager.fuses());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipeOptions {
    /// Fusion mode; enabled by default.
    pub fusion: Fusion,
}

impl PipeOptions {
    /// Options that disable fusion.
    pub const fn eager() -> Self {
        Self {
            fusion: Fusion::Disabled,
        }
    }

    /// Returns `true` if lazy-capable stages will be fused.
    pub const fn fuses(&self) -> bool {
        matches!(self.fusion, Fusion::Enabled)
    }
}
