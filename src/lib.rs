//! # RGB-Split
//!
//! Deterministic chromatic-aberration compositing for vector graphics.
//!
//! This library splits a graphic (SVG markup or generated text) into red,
//! green and blue layers, displaces each layer with a pluggable algorithm,
//! and describes the result either as a layer stack for live preview or as
//! a standalone SVG document for export.
//!
//! ## Quick Start
//!
//! ```rust
//! use rgb_split::{Bounds, Content, RenderSession, Settings, TextStyle};
//!
//! let mut session = RenderSession::new(Settings::default());
//! session.apply_preset("glitch")?;
//!
//! let content = Content::from_text("RGB", &TextStyle::default());
//! let layers = session.compose(content.as_ref(), Bounds::new(400.0, 300.0));
//! assert_eq!(layers.len(), 3);
//!
//! let svg = session.export(content.as_ref(), Bounds::new(400.0, 300.0)).to_svg();
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), rgb_split::SplitError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`noise`] - Seeded gradient noise
//! - [`algorithms`] - Displacement algorithms and their registry
//! - [`composition`] - Layer stack construction and presentation adapters
//! - [`export`] - Vector document export
//! - [`session`] - Settings, noise and export bookkeeping for a caller
//! - [`config`] - Settings and configuration files
//!
//! ## Custom Algorithms
//!
//! New displacement rules implement the
//! [`DisplacementAlgorithm`](algorithms::DisplacementAlgorithm) trait:
//!
//! ```rust
//! use rgb_split::algorithms::{AlgorithmRegistry, DisplacementAlgorithm, SampleContext};
//! use rgb_split::{Channel, Offset, Point};
//!
//! struct Stillness;
//!
//! impl DisplacementAlgorithm for Stillness {
//!     fn name(&self) -> &str {
//!         "still"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "No displacement at all"
//!     }
//!
//!     fn displace(&self, _channel: Channel, _point: Point, _ctx: &SampleContext<'_>) -> Offset {
//!         Offset::ZERO
//!     }
//! }
//!
//! let mut registry = AlgorithmRegistry::new();
//! registry.register("still", Stillness);
//! assert!(registry.has_algorithm("still"));
//! ```

pub mod algorithms;
pub mod composition;
pub mod config;
pub mod content;
pub mod error;
pub mod export;
pub mod geometry;
pub mod noise;
pub mod presets;
pub mod session;

// Re-export commonly used types for convenience
pub use crate::{
    algorithms::AlgorithmRegistry,
    composition::{LayerCompositor, LayerDescriptor, LayerKind, TintMatrix},
    config::{BlendMode, Channel, ChannelParams, Config, RenderConfig, Settings, TextStyle},
    content::Content,
    error::{Result, SplitError},
    export::{GeometryExporter, VectorDocument},
    geometry::{AffineTransform, Bounds, Offset, Point},
    noise::SeededNoise,
    presets::ColorProfile,
    session::RenderSession,
};
