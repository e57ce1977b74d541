use crate::{
    algorithms::{DisplacementAlgorithm, SampleContext, DISTORTION},
    algorithms::traits::AlgorithmMetadata,
    config::Channel,
    geometry::{Offset, Point},
};

/// Lens model shared by barrel and pincushion distortion
///
/// The sample is normalized to [-1, 1] around the center and pushed along
/// its radius by a factor that grows with r². Channels use slightly
/// different strengths, which produces the fringe.
fn lens_offset(
    channel: Channel,
    point: Point,
    ctx: &SampleContext<'_>,
    factor: impl Fn(f64, f64) -> f64,
    channel_scale: f64,
) -> Offset {
    let center = ctx.bounds.center();
    let dx = (point.x - center.x) / center.x;
    let dy = (point.y - center.y) / center.y;
    let r = (dx * dx + dy * dy).sqrt();

    let distortion = ctx.settings.distortion / 100.0;
    let factor = factor(distortion * r * r, channel_scale);

    ctx.base_offset(channel)
        + Offset::new(
            (dx * factor - dx) * center.x * distortion,
            (dy * factor - dy) * center.y * distortion,
        )
}

/// Outward lens distortion; red spreads more than blue
#[derive(Debug, Clone, Copy, Default)]
pub struct BarrelDistortion;

impl BarrelDistortion {
    fn channel_scale(channel: Channel) -> f64 {
        match channel {
            Channel::Red => 1.02,
            Channel::Green => 1.0,
            Channel::Blue => 0.98,
        }
    }
}

impl DisplacementAlgorithm for BarrelDistortion {
    fn name(&self) -> &str {
        "barrel"
    }

    fn description(&self) -> &str {
        "Barrel lens distortion (outward)"
    }

    fn displace(&self, channel: Channel, point: Point, ctx: &SampleContext<'_>) -> Offset {
        lens_offset(
            channel,
            point,
            ctx,
            |strength, scale| 1.0 + strength * (scale - 1.0) * 5.0,
            Self::channel_scale(channel),
        )
    }

    fn metadata(&self) -> AlgorithmMetadata {
        lens_metadata()
    }
}

/// Inward lens distortion; blue spreads more than red
#[derive(Debug, Clone, Copy, Default)]
pub struct PincushionDistortion;

impl PincushionDistortion {
    fn channel_scale(channel: Channel) -> f64 {
        match channel {
            Channel::Red => 0.98,
            Channel::Green => 1.0,
            Channel::Blue => 1.02,
        }
    }
}

impl DisplacementAlgorithm for PincushionDistortion {
    fn name(&self) -> &str {
        "pincushion"
    }

    fn description(&self) -> &str {
        "Pincushion lens distortion (inward)"
    }

    fn displace(&self, channel: Channel, point: Point, ctx: &SampleContext<'_>) -> Offset {
        lens_offset(
            channel,
            point,
            ctx,
            |strength, scale| 1.0 - strength * (1.0 - scale) * 5.0,
            Self::channel_scale(channel),
        )
    }

    fn metadata(&self) -> AlgorithmMetadata {
        lens_metadata()
    }
}

fn lens_metadata() -> AlgorithmMetadata {
    AlgorithmMetadata {
        spatially_varying: true,
        seeded: false,
        parameters: vec![
            (DISTORTION.to_string(), "Lens distortion strength (percent)".to_string()),
        ],
    }
}
