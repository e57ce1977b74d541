use crate::{
    algorithms::{radians, DisplacementAlgorithm, SampleContext, ANGLE},
    algorithms::traits::AlgorithmMetadata,
    config::Channel,
    geometry::{Offset, Point},
};

/// Length of the extra split before intensity, in px
const SPLIT_LENGTH: f64 = 10.0;

/// Red and blue pushed in opposite directions along `angle`
#[derive(Debug, Clone, Copy, Default)]
pub struct AngularSplit;

impl DisplacementAlgorithm for AngularSplit {
    fn name(&self) -> &str {
        "angular"
    }

    fn description(&self) -> &str {
        "Channels offset along a specified angle"
    }

    fn displace(&self, channel: Channel, _point: Point, ctx: &SampleContext<'_>) -> Offset {
        let angle = radians(ctx.settings.angle);
        let split = SPLIT_LENGTH * channel.polarity();
        let intensity = ctx.intensity();

        ctx.base_offset(channel)
            + Offset::new(
                angle.cos() * split * intensity,
                angle.sin() * split * intensity,
            )
    }

    fn metadata(&self) -> AlgorithmMetadata {
        AlgorithmMetadata {
            spatially_varying: false,
            seeded: false,
            parameters: vec![
                (ANGLE.to_string(), "Direction of the split (degrees)".to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{assert_close, bounds, noise};
    use crate::config::Settings;

    #[test]
    fn test_horizontal_split() {
        let settings = Settings::default();
        let noise = noise(&settings);
        let ctx = SampleContext::new(&settings, bounds(), &noise);

        let red = AngularSplit.displace(Channel::Red, Point::default(), &ctx);
        assert_close(red.x, 15.0);
        assert_close(red.y, -3.0);

        let blue = AngularSplit.displace(Channel::Blue, Point::default(), &ctx);
        assert_close(blue.x, -15.0);
        assert_close(blue.y, 3.0);
    }

    #[test]
    fn test_intensity_scales_split() {
        let settings = Settings {
            angle: 90.0,
            intensity: 50.0,
            ..Settings::default()
        };
        let noise = noise(&settings);
        let ctx = SampleContext::new(&settings, bounds(), &noise);

        let red = AngularSplit.displace(Channel::Red, Point::new(10.0, 10.0), &ctx);
        assert_close(red.x, 2.5);
        assert_close(red.y, -1.5 + 5.0);
    }
}
