use crate::{
    config::{Channel, Settings},
    geometry::{Bounds, Offset, Point},
    noise::SeededNoise,
};

/// Core trait that all displacement algorithms implement
///
/// An algorithm is a pure function from a channel and a sample point to a
/// pixel offset. Implementations must not keep state between calls.
pub trait DisplacementAlgorithm: Send + Sync {
    /// Returns the unique name of this algorithm
    fn name(&self) -> &str;

    /// Returns a human-readable description of this algorithm
    fn description(&self) -> &str;

    /// Compute the displacement of `channel` at `point`
    fn displace(&self, channel: Channel, point: Point, ctx: &SampleContext<'_>) -> Offset;

    /// Get algorithm-specific metadata
    fn metadata(&self) -> AlgorithmMetadata {
        AlgorithmMetadata::default()
    }
}

/// Everything an algorithm may read while evaluating one sample
#[derive(Debug, Clone, Copy)]
pub struct SampleContext<'a> {
    pub settings: &'a Settings,
    pub bounds: Bounds,
    pub noise: &'a SeededNoise,
}

impl<'a> SampleContext<'a> {
    pub fn new(settings: &'a Settings, bounds: Bounds, noise: &'a SeededNoise) -> Self {
        Self { settings, bounds, noise }
    }

    /// Global intensity as a multiplier
    pub fn intensity(&self) -> f64 {
        self.settings.intensity / 100.0
    }

    /// The channel's configured offset scaled by intensity; every
    /// algorithm starts from this
    pub fn base_offset(&self, channel: Channel) -> Offset {
        let params = self.settings.channel(channel);
        let intensity = self.intensity();
        Offset::new(params.x * intensity, params.y * intensity)
    }
}

/// Metadata about an algorithm's inputs and characteristics
#[derive(Debug, Clone, Default)]
pub struct AlgorithmMetadata {
    /// Whether the output depends on the sample position
    pub spatially_varying: bool,

    /// Whether the output depends on the noise seed
    pub seeded: bool,

    /// Settings fields read besides the channel offsets, with descriptions
    pub parameters: Vec<(String, String)>,
}
