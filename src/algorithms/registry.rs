use std::collections::HashMap;

use tracing::debug;

use crate::{
    algorithms::{
        AngularSplit, BarrelDistortion, ClassicOffset, DisplacementAlgorithm, NoiseDisplacement,
        PincushionDistortion, RadialSplit, SampleContext, WaveDisplacement,
    },
    config::Channel,
    geometry::{Offset, Point},
};

/// Name of the algorithm used for unrecognized names
pub const FALLBACK_ALGORITHM: &str = "classic";

/// Registry of available displacement algorithms
///
/// Algorithms are registered by name. Lookups through [`resolve`] and
/// [`evaluate`] never fail: an unknown name is served by the classic
/// offset.
///
/// [`resolve`]: AlgorithmRegistry::resolve
/// [`evaluate`]: AlgorithmRegistry::evaluate
pub struct AlgorithmRegistry {
    algorithms: HashMap<String, Box<dyn DisplacementAlgorithm>>,
    fallback: ClassicOffset,
}

impl AlgorithmRegistry {
    /// Create a new registry with all built-in algorithms
    pub fn new() -> Self {
        let mut registry = Self {
            algorithms: HashMap::new(),
            fallback: ClassicOffset,
        };

        registry.register_builtin_algorithms();
        registry
    }

    fn register_builtin_algorithms(&mut self) {
        self.register("classic", ClassicOffset);
        self.register("radial", RadialSplit);
        self.register("angular", AngularSplit);
        self.register("wave", WaveDisplacement);
        self.register("noise", NoiseDisplacement);
        self.register("barrel", BarrelDistortion);
        self.register("pincushion", PincushionDistortion);
    }

    /// Register a custom algorithm, replacing any previous one with that name
    pub fn register<S, A>(&mut self, name: S, algorithm: A)
    where
        S: Into<String>,
        A: DisplacementAlgorithm + 'static,
    {
        self.algorithms.insert(name.into(), Box::new(algorithm));
    }

    /// Get an algorithm by name, or None if it is not registered
    pub fn get(&self, name: &str) -> Option<&dyn DisplacementAlgorithm> {
        self.algorithms.get(name).map(|algorithm| algorithm.as_ref())
    }

    /// Get an algorithm by name, falling back to the classic offset
    pub fn resolve(&self, name: &str) -> &dyn DisplacementAlgorithm {
        match self.get(name) {
            Some(algorithm) => algorithm,
            None => {
                debug!("Unknown algorithm '{}', using {}", name, FALLBACK_ALGORITHM);
                &self.fallback
            }
        }
    }

    /// Displacement of `channel` at `point` using the named algorithm
    pub fn evaluate(
        &self,
        name: &str,
        channel: Channel,
        point: Point,
        ctx: &SampleContext<'_>,
    ) -> Offset {
        self.resolve(name).displace(channel, point, ctx)
    }

    /// Get all available algorithm names, sorted
    pub fn available_algorithms(&self) -> Vec<String> {
        let mut names: Vec<String> = self.algorithms.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if an algorithm is available
    pub fn has_algorithm(&self, name: &str) -> bool {
        self.algorithms.contains_key(name)
    }

    /// Get the number of registered algorithms
    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Settings, geometry::Bounds, noise::SeededNoise};

    struct Fixed;

    impl DisplacementAlgorithm for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn description(&self) -> &str {
            "Always moves one pixel right"
        }

        fn displace(&self, _channel: Channel, _point: Point, _ctx: &SampleContext<'_>) -> Offset {
            Offset::new(1.0, 0.0)
        }
    }

    #[test]
    fn test_builtin_algorithms_available() {
        let registry = AlgorithmRegistry::new();

        for name in ["classic", "radial", "angular", "wave", "noise", "barrel", "pincushion"] {
            assert!(registry.has_algorithm(name), "missing {}", name);
            assert_eq!(registry.get(name).unwrap().name(), name);
        }

        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_unknown_name_falls_back_to_classic() {
        let registry = AlgorithmRegistry::new();
        let settings = Settings::default();
        let noise = SeededNoise::new(settings.noise_seed);
        let ctx = SampleContext::new(&settings, Bounds::default(), &noise);
        let point = Point::new(13.0, 250.0);

        assert!(registry.get("swirl").is_none());
        assert_eq!(registry.resolve("swirl").name(), "classic");

        for channel in Channel::ALL {
            assert_eq!(
                registry.evaluate("swirl", channel, point, &ctx),
                registry.evaluate("classic", channel, point, &ctx)
            );
        }
    }

    #[test]
    fn test_evaluate_is_pure() {
        let registry = AlgorithmRegistry::new();
        let settings = Settings {
            intensity: 135.0,
            angle: 30.0,
            distortion: 45.0,
            ..Settings::default()
        };
        let before = settings.clone();
        let noise = SeededNoise::new(settings.noise_seed);
        let ctx = SampleContext::new(&settings, Bounds::new(640.0, 360.0), &noise);

        // a fresh generator and registry must not change anything either
        let other_registry = AlgorithmRegistry::new();
        let other_noise = SeededNoise::new(settings.noise_seed);
        let other_ctx = SampleContext::new(&settings, Bounds::new(640.0, 360.0), &other_noise);

        let points = [
            Point::new(13.0, 250.0),
            Point::new(600.5, 7.25),
            Point::new(-40.0, 400.0),
            Point::new(321.0, 179.0),
        ];

        for name in registry.available_algorithms() {
            for channel in Channel::ALL {
                for point in points {
                    let first = registry.evaluate(&name, channel, point, &ctx);
                    let second = registry.evaluate(&name, channel, point, &ctx);
                    let third = other_registry.evaluate(&name, channel, point, &other_ctx);

                    for offset in [second, third] {
                        assert_eq!(first.x.to_bits(), offset.x.to_bits(), "{} {:?} {:?}", name, channel, point);
                        assert_eq!(first.y.to_bits(), offset.y.to_bits(), "{} {:?} {:?}", name, channel, point);
                    }
                }
            }
        }

        assert_eq!(settings, before);
    }

    #[test]
    fn test_available_algorithms_sorted() {
        let registry = AlgorithmRegistry::new();
        let names = registry.available_algorithms();
        assert_eq!(names.first().map(String::as_str), Some("angular"));
        assert_eq!(names.last().map(String::as_str), Some("wave"));
    }

    #[test]
    fn test_custom_algorithm_registration() {
        let mut registry = AlgorithmRegistry::new();
        registry.register("fixed", Fixed);

        assert!(registry.has_algorithm("fixed"));
        assert_eq!(registry.len(), 8);

        let settings = Settings::default();
        let noise = SeededNoise::new(1);
        let ctx = SampleContext::new(&settings, Bounds::default(), &noise);
        let offset = registry.evaluate("fixed", Channel::Blue, Point::default(), &ctx);
        assert_eq!(offset, Offset::new(1.0, 0.0));
    }
}
