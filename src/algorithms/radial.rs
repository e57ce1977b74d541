use crate::{
    algorithms::{radians, DisplacementAlgorithm, SampleContext, ANGLE},
    algorithms::traits::AlgorithmMetadata,
    config::Channel,
    geometry::{Offset, Point},
};

/// Fraction of the distance from center added as extra split
const DISTANCE_FACTOR: f64 = 0.02;

/// Channels split outward from the render center
///
/// The extra term grows with distance from the center and points along the
/// center-to-sample direction rotated by `angle`. Red moves outward, blue
/// inward, green stays on its base offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialSplit;

impl DisplacementAlgorithm for RadialSplit {
    fn name(&self) -> &str {
        "radial"
    }

    fn description(&self) -> &str {
        "Channels split outward from the center"
    }

    fn displace(&self, channel: Channel, point: Point, ctx: &SampleContext<'_>) -> Offset {
        let center = ctx.bounds.center();
        let dx = point.x - center.x;
        let dy = point.y - center.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let angle = dy.atan2(dx) + radians(ctx.settings.angle);

        let magnitude = distance * DISTANCE_FACTOR * channel.polarity() * ctx.intensity();

        ctx.base_offset(channel) + Offset::polar(angle, magnitude)
    }

    fn metadata(&self) -> AlgorithmMetadata {
        AlgorithmMetadata {
            spatially_varying: true,
            seeded: false,
            parameters: vec![
                (ANGLE.to_string(), "Rotation of the split direction (degrees)".to_string()),
            ],
        }
    }
}
