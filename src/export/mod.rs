//! # Vector Export
//!
//! Re-expresses the layer stack as a standalone vector document. Layers are
//! taken from the same [`LayerCompositor`](crate::composition::LayerCompositor)
//! that drives the preview, so both always agree on order, displacement,
//! opacity, blend and tint; only the transform representation changes.

pub mod document;
pub mod svg;

pub use document::{ExportGroup, GeometryExporter, VectorDocument};
