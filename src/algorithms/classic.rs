use crate::{
    algorithms::{DisplacementAlgorithm, SampleContext},
    algorithms::traits::AlgorithmMetadata,
    config::Channel,
    geometry::{Offset, Point},
};

/// Plain per-channel offset, identical everywhere
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicOffset;

impl DisplacementAlgorithm for ClassicOffset {
    fn name(&self) -> &str {
        "classic"
    }

    fn description(&self) -> &str {
        "Simple X/Y displacement per channel"
    }

    fn displace(&self, channel: Channel, _point: Point, ctx: &SampleContext<'_>) -> Offset {
        ctx.base_offset(channel)
    }

    fn metadata(&self) -> AlgorithmMetadata {
        AlgorithmMetadata::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::test_support::{bounds, noise};
    use crate::config::Settings;

    #[test]
    fn test_literal_offsets() {
        let mut settings = Settings::default();
        settings.red.x = 5.0;
        settings.red.y = -3.0;
        let noise = noise(&settings);

        let ctx = SampleContext::new(&settings, bounds(), &noise);
        assert_eq!(ClassicOffset.displace(Channel::Red, Point::default(), &ctx), Offset::new(5.0, -3.0));

        settings.intensity = 50.0;
        let ctx = SampleContext::new(&settings, bounds(), &noise);
        assert_eq!(ClassicOffset.displace(Channel::Red, Point::default(), &ctx), Offset::new(2.5, -1.5));
    }

    #[test]
    fn test_position_independent() {
        let settings = Settings::default();
        let noise = noise(&settings);
        let ctx = SampleContext::new(&settings, bounds(), &noise);

        let a = ClassicOffset.displace(Channel::Blue, Point::new(0.0, 0.0), &ctx);
        let b = ClassicOffset.displace(Channel::Blue, Point::new(399.0, 17.0), &ctx);
        assert_eq!(a, b);
        assert_eq!(a, Offset::new(-5.0, 3.0));
    }
}
