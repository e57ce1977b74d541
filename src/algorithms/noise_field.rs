use crate::{
    algorithms::{DisplacementAlgorithm, SampleContext, NOISE_SCALE, NOISE_SEED},
    algorithms::traits::AlgorithmMetadata,
    config::Channel,
    geometry::{Offset, Point},
};

/// Noise output is multiplied by this many px
const NOISE_STRENGTH: f64 = 20.0;

/// Offset between the x and y sample positions, in noise space
const AXIS_SEPARATION: f64 = 50.0;

/// Organic displacement driven by the seeded noise field
///
/// Each channel samples its own region of the field; x and y use two
/// separated sample positions so they vary independently.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseDisplacement;

impl NoiseDisplacement {
    fn sample_offset(channel: Channel) -> f64 {
        match channel {
            Channel::Red => 0.0,
            Channel::Green => 100.0,
            Channel::Blue => 200.0,
        }
    }
}

impl DisplacementAlgorithm for NoiseDisplacement {
    fn name(&self) -> &str {
        "noise"
    }

    fn description(&self) -> &str {
        "Organic displacement using seeded simplex noise"
    }

    fn displace(&self, channel: Channel, point: Point, ctx: &SampleContext<'_>) -> Offset {
        let intensity = ctx.intensity();
        let scale = ctx.settings.noise_scale / 100.0;
        let channel_offset = Self::sample_offset(channel);

        let sx = (point.x / ctx.bounds.width()) * scale * 5.0;
        let sy = (point.y / ctx.bounds.height()) * scale * 5.0;

        let noise_x = ctx.noise.query(sx + channel_offset, sy);
        let noise_y = ctx.noise.query(
            sx + channel_offset + AXIS_SEPARATION,
            sy + AXIS_SEPARATION,
        );

        ctx.base_offset(channel)
            + Offset::new(
                noise_x * NOISE_STRENGTH * intensity,
                noise_y * NOISE_STRENGTH * intensity,
            )
    }

    fn metadata(&self) -> AlgorithmMetadata {
        AlgorithmMetadata {
            spatially_varying: true,
            seeded: true,
            parameters: vec![
                (NOISE_SCALE.to_string(), "Spatial frequency of the noise (percent)".to_string()),
                (NOISE_SEED.to_string(), "Seed of the noise field".to_string()),
            ],
        }
    }
}
