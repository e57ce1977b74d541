use std::f64::consts::PI;

use crate::{
    algorithms::{DisplacementAlgorithm, SampleContext, AMPLITUDE, FREQUENCY},
    algorithms::traits::AlgorithmMetadata,
    config::Channel,
    geometry::{Offset, Point},
};

/// Sinusoidal displacement, one third of a period apart per channel
///
/// Horizontal displacement varies with the sample's row, vertical
/// displacement (at half amplitude) with its column.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveDisplacement;

impl WaveDisplacement {
    fn phase(channel: Channel) -> f64 {
        match channel {
            Channel::Red => 0.0,
            Channel::Green => 2.094,
            Channel::Blue => 4.189,
        }
    }
}

impl DisplacementAlgorithm for WaveDisplacement {
    fn name(&self) -> &str {
        "wave"
    }

    fn description(&self) -> &str {
        "Oscillating sinusoidal displacement"
    }

    fn displace(&self, channel: Channel, point: Point, ctx: &SampleContext<'_>) -> Offset {
        let settings = ctx.settings;
        let intensity = ctx.intensity();
        let phase = Self::phase(channel);

        let wave_x = ((point.y / ctx.bounds.height()) * settings.frequency * PI + phase).sin()
            * settings.amplitude;
        let wave_y = ((point.x / ctx.bounds.width()) * settings.frequency * PI + phase).cos()
            * settings.amplitude
            * 0.5;

        ctx.base_offset(channel) + Offset::new(wave_x * intensity, wave_y * intensity)
    }

    fn metadata(&self) -> AlgorithmMetadata {
        AlgorithmMetadata {
            spatially_varying: true,
            seeded: false,
            parameters: vec![
                (FREQUENCY.to_string(), "Number of half periods across the bounds".to_string()),
                (AMPLITUDE.to_string(), "Peak horizontal displacement (px)".to_string()),
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
    fn test_center_sample() {
        let settings = Settings::default();
        let noise = noise(&settings);
        let ctx = SampleContext::new(&settings, bounds(), &noise);
        let center = bounds().center();

        // frequency 5 at the half-way row: sin(2.5 pi) = 1, cos(2.5 pi) = 0
        let red = WaveDisplacement.displace(Channel::Red, center, &ctx);
        assert_close(red.x, 5.0 + 10.0);
        assert_close(red.y, -3.0);

        let green = WaveDisplacement.displace(Channel::Green, center, &ctx);
        assert_close(green.x, -4.996_577_922_728_235);
        assert_close(green.y, -4.331_114_436_900_299);
    }

    #[test]
    fn test_zero_amplitude_is_classic() {
        let settings = Settings {
            amplitude: 0.0,
            ..Settings::default()
        };
        let noise = noise(&settings);
        let ctx = SampleContext::new(&settings, bounds(), &noise);

        let blue = WaveDisplacement.displace(Channel::Blue, Point::new(33.0, 71.0), &ctx);
        assert_close(blue.x, -5.0);
        assert_close(blue.y, 3.0);
    }
}
