//! # Displacement Algorithms
//!
//! Each algorithm maps a channel and a sample point to a pixel offset.
//! All of them start from the channel's configured offset scaled by the
//! global intensity and add their own, possibly position-dependent, term.
//!
//! ## Built-in Algorithms
//!
//! - **classic**: the configured offset only
//! - **radial**: red and blue split outward/inward from the center
//! - **angular**: red and blue pushed along a fixed angle
//! - **wave**: sinusoidal displacement with per-channel phase
//! - **noise**: seeded gradient-noise displacement
//! - **barrel** / **pincushion**: lens distortion with per-channel strength
//!
//! ## Usage
//!
//! ```rust
//! use rgb_split::algorithms::{AlgorithmRegistry, SampleContext};
//! use rgb_split::{Bounds, Channel, Point, SeededNoise, Settings};
//!
//! let registry = AlgorithmRegistry::new();
//! let settings = Settings::default();
//! let noise = SeededNoise::new(settings.noise_seed);
//! let ctx = SampleContext::new(&settings, Bounds::default(), &noise);
//!
//! let offset = registry.evaluate("classic", Channel::Red, Point::new(200.0, 150.0), &ctx);
//! assert_eq!((offset.x, offset.y), (5.0, -3.0));
//! ```

pub mod registry;
pub mod traits;

mod angular;
mod classic;
mod lens;
mod noise_field;
mod radial;
mod wave;

pub use registry::{AlgorithmRegistry, FALLBACK_ALGORITHM};
pub use traits::{AlgorithmMetadata, DisplacementAlgorithm, SampleContext};

pub use angular::AngularSplit;
pub use classic::ClassicOffset;
pub use lens::{BarrelDistortion, PincushionDistortion};
pub use noise_field::NoiseDisplacement;
pub use radial::RadialSplit;
pub use wave::WaveDisplacement;

// Settings fields read by the algorithms
pub const ANGLE: &str = "angle";
pub const FREQUENCY: &str = "frequency";
pub const AMPLITUDE: &str = "amplitude";
pub const NOISE_SCALE: &str = "noiseScale";
pub const NOISE_SEED: &str = "noiseSeed";
pub const DISTORTION: &str = "distortion";

/// Degrees to radians, evaluated as `deg * PI / 180`
pub(crate) fn radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}
