//! # Layer Composition
//!
//! Turns content plus settings into an ordered stack of layer descriptors,
//! and hands finished stacks to presentation adapters.

pub mod compositor;
pub mod presenter;

// Re-exports for convenience
pub use compositor::{
    tint_filters, Background, LayerCompositor, LayerDescriptor, LayerKind, TintFilter, TintMatrix,
};
pub use presenter::{CssContainer, CssLayer, CssPresenter, CssScene, LayerPresenter, Scene};
