use tracing::debug;

use crate::{
    algorithms::{AlgorithmRegistry, SampleContext},
    config::{parse_hex_rgb, BlendMode, Channel, Settings},
    content::Content,
    geometry::{Bounds, Offset},
    noise::SeededNoise,
};

/// Diagonal linear color transform recoloring a layer toward one color
///
/// Components are normalized to [0, 1]. Alpha passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TintMatrix {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl TintMatrix {
    /// Used for colors that are not `#rrggbb`
    pub const FALLBACK: TintMatrix = TintMatrix { r: 1.0, g: 0.0, b: 0.0 };

    /// Build from a hex color, falling back to pure red when malformed
    pub fn from_hex(hex: &str) -> Self {
        match parse_hex_rgb(hex) {
            Some([r, g, b]) => Self {
                r: r as f64 / 255.0,
                g: g as f64 / 255.0,
                b: b as f64 / 255.0,
            },
            None => Self::FALLBACK,
        }
    }

    /// The 3x3 RGB matrix, row-major
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.r, 0.0, 0.0],
            [0.0, self.g, 0.0],
            [0.0, 0.0, self.b],
        ]
    }

    /// Tint a linear RGB color
    pub fn apply(&self, rgb: [f64; 3]) -> [f64; 3] {
        [rgb[0] * self.r, rgb[1] * self.g, rgb[2] * self.b]
    }

    /// Values for an SVG `feColorMatrix type="matrix"` (4x5, RGBA)
    pub fn color_matrix_values(&self) -> String {
        format!(
            "{} 0 0 0 0 0 {} 0 0 0 0 0 {} 0 0 0 0 0 1 0",
            self.r, self.g, self.b
        )
    }
}

/// Named tint definition layers refer to by id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TintFilter {
    pub channel: Channel,
    pub tint: TintMatrix,
}

impl TintFilter {
    pub fn id(&self) -> &'static str {
        self.channel.filter_id()
    }
}

/// One tint filter per channel, in red, green, blue order
pub fn tint_filters(settings: &Settings) -> Vec<TintFilter> {
    Channel::ALL
        .into_iter()
        .map(|channel| TintFilter {
            channel,
            tint: TintMatrix::from_hex(settings.channel_color(channel)),
        })
        .collect()
}

/// What sits behind the layer stack
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Transparent,
    Color(String),
}

impl Background {
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.bg_transparent {
            Self::Transparent
        } else {
            Self::Color(settings.bg_color.clone())
        }
    }
}

/// Identity of a layer in the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Untransformed reference copy of the content
    Base,
    Channel(Channel),
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Channel(channel) => channel.name(),
        }
    }

    pub fn channel(&self) -> Option<Channel> {
        match self {
            Self::Base => None,
            Self::Channel(channel) => Some(*channel),
        }
    }
}

/// Presentation-agnostic description of one layer
///
/// The translation is relative to the content being centered in the render
/// bounds. Descriptors are created fresh on every compose and are read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDescriptor {
    kind: LayerKind,
    translation: Offset,
    scale: f64,
    rotation: f64,
    opacity: f64,
    blend: BlendMode,
    tint: Option<TintMatrix>,
    content: Content,
}

impl LayerDescriptor {
    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Displacement from the centered position, in px
    pub fn translation(&self) -> Offset {
        self.translation
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rotation in degrees
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Opacity as a fraction; not clamped
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    pub fn tint(&self) -> Option<TintMatrix> {
        self.tint
    }

    /// This layer's own copy of the content
    pub fn content(&self) -> &Content {
        &self.content
    }
}

/// Builds the ordered layer stack for one render
pub struct LayerCompositor {
    registry: AlgorithmRegistry,
}

impl LayerCompositor {
    /// Create a compositor with the built-in algorithms
    pub fn new() -> Self {
        Self::with_registry(AlgorithmRegistry::new())
    }

    /// Create a compositor using a custom algorithm registry
    pub fn with_registry(registry: AlgorithmRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Compose the layer stack
    ///
    /// The base layer (if enabled) comes first, followed by one layer per
    /// recognized `layerOrder` selector in the order given. No content
    /// yields an empty stack.
    pub fn compose(
        &self,
        content: Option<&Content>,
        settings: &Settings,
        bounds: Bounds,
        noise: &SeededNoise,
    ) -> Vec<LayerDescriptor> {
        let Some(content) = content else {
            debug!("No content, composing empty stack");
            return Vec::new();
        };

        let ctx = SampleContext::new(settings, bounds, noise);
        let algorithm = self.registry.resolve(&settings.algorithm);

        let mut layers = Vec::with_capacity(settings.layer_order.len() + 1);

        if settings.show_base {
            layers.push(LayerDescriptor {
                kind: LayerKind::Base,
                translation: Offset::ZERO,
                scale: 1.0,
                rotation: 0.0,
                opacity: settings.base_opacity / 100.0,
                blend: BlendMode::Normal,
                tint: None,
                content: content.clone(),
            });
        }

        // Channels are sampled at the bounds center
        let center = bounds.center();

        for channel in settings.layer_channels() {
            let params = settings.channel(channel);
            layers.push(LayerDescriptor {
                kind: LayerKind::Channel(channel),
                translation: algorithm.displace(channel, center, &ctx),
                scale: params.scale / 100.0,
                rotation: params.rotation,
                opacity: params.opacity / 100.0,
                blend: params.blend,
                tint: Some(TintMatrix::from_hex(settings.channel_color(channel))),
                content: content.clone(),
            });
        }

        debug!(
            "Composed {} layers with '{}' over {}x{}",
            layers.len(),
            algorithm.name(),
            bounds.width(),
            bounds.height()
        );

        layers
    }
}

impl Default for LayerCompositor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextStyle;

    fn content() -> Content {
        Content::from_text("RGB", &TextStyle::default()).unwrap()
    }

    fn compose(settings: &Settings) -> Vec<LayerDescriptor> {
        let noise = SeededNoise::new(settings.noise_seed);
        LayerCompositor::new().compose(Some(&content()), settings, Bounds::default(), &noise)
    }

    fn kinds(layers: &[LayerDescriptor]) -> Vec<LayerKind> {
        layers.iter().map(LayerDescriptor::kind).collect()
    }

    #[test]
    fn test_layer_order_without_base() {
        let settings = Settings {
            layer_order: "bgr".to_string(),
            show_base: false,
            ..Settings::default()
        };

        assert_eq!(
            kinds(&compose(&settings)),
            vec![
                LayerKind::Channel(Channel::Blue),
                LayerKind::Channel(Channel::Green),
                LayerKind::Channel(Channel::Red),
            ]
        );
    }

    #[test]
    fn test_duplicates_preserved() {
        let settings = Settings {
            layer_order: "rrg".to_string(),
            show_base: false,
            ..Settings::default()
        };

        assert_eq!(
            kinds(&compose(&settings)),
            vec![
                LayerKind::Channel(Channel::Red),
                LayerKind::Channel(Channel::Red),
                LayerKind::Channel(Channel::Green),
            ]
        );
    }

    #[test]
    fn test_base_always_first() {
        for order in ["rgb", "bgr", "gx", "", "bbb"] {
            let settings = Settings {
                layer_order: order.to_string(),
                show_base: true,
                base_opacity: 35.0,
                ..Settings::default()
            };
            let layers = compose(&settings);

            assert_eq!(layers[0].kind(), LayerKind::Base, "order {:?}", order);
            assert_eq!(layers[0].opacity(), 0.35);
            assert_eq!(layers[0].translation(), Offset::ZERO);
            assert_eq!(layers[0].tint(), None);
            assert!(layers[1..].iter().all(|l| l.kind() != LayerKind::Base));
        }
    }

    #[test]
    fn test_unknown_selectors_skipped() {
        let settings = Settings {
            layer_order: "r?Gb".to_string(),
            show_base: false,
            ..Settings::default()
        };

        assert_eq!(
            kinds(&compose(&settings)),
            vec![LayerKind::Channel(Channel::Red), LayerKind::Channel(Channel::Blue)]
        );
    }

    #[test]
    fn test_normalization() {
        let mut settings = Settings {
            layer_order: "r".to_string(),
            show_base: false,
            ..Settings::default()
        };
        settings.red.opacity = 150.0;
        settings.red.scale = 50.0;
        settings.red.rotation = -7.0;
        settings.red.blend = BlendMode::Multiply;

        let layers = compose(&settings);
        assert_eq!(layers[0].opacity(), 1.5);
        assert_eq!(layers[0].scale(), 0.5);
        assert_eq!(layers[0].rotation(), -7.0);
        assert_eq!(layers[0].blend(), BlendMode::Multiply);
        assert_eq!(layers[0].translation(), Offset::new(5.0, -3.0));
    }

    #[test]
    fn test_tints_follow_channel_colors() {
        let mut settings = Settings {
            show_base: false,
            ..Settings::default()
        };
        settings.channel1_color = "#00ffff".to_string();
        settings.channel3_color = "not a color".to_string();

        let layers = compose(&settings);
        assert_eq!(layers[0].tint(), Some(TintMatrix { r: 0.0, g: 1.0, b: 1.0 }));
        assert_eq!(layers[1].tint(), Some(TintMatrix { r: 0.0, g: 1.0, b: 0.0 }));
        assert_eq!(layers[2].tint(), Some(TintMatrix::FALLBACK));
    }

    #[test]
    fn test_no_content_is_empty_stack() {
        let settings = Settings::default();
        let noise = SeededNoise::new(settings.noise_seed);
        let layers = LayerCompositor::new().compose(None, &settings, Bounds::default(), &noise);
        assert!(layers.is_empty());
    }

    #[test]
    fn test_settings_untouched_and_layers_independent() {
        let settings = Settings::default();
        let before = settings.clone();
        let layers = compose(&settings);

        assert_eq!(settings, before);
        assert_eq!(layers.len(), 4);
        assert_eq!(layers[1].content(), layers[2].content());
        assert!(!std::ptr::eq(layers[1].content().markup(), layers[2].content().markup()));
    }

    #[test]
    fn test_unknown_algorithm_composes_as_classic() {
        let settings = Settings {
            algorithm: "swirl".to_string(),
            ..Settings::default()
        };
        let classic = Settings::default();
        assert_eq!(compose(&settings), compose(&classic));
    }

    #[test]
    fn test_preset_blend_after_shared_blend() {
        let mut settings = Settings {
            show_base: false,
            ..Settings::default()
        };
        settings.set_all_channels_blend(Some(BlendMode::Difference));
        crate::presets::apply_preset("glitch", &mut settings).unwrap();

        let layers = compose(&settings);
        assert_eq!(layers[0].blend(), BlendMode::Screen);
        assert_eq!(layers[1].blend(), BlendMode::Lighten);
        assert_eq!(layers[2].blend(), BlendMode::Screen);

        settings.green.blend = BlendMode::Overlay;
        assert_eq!(compose(&settings)[1].blend(), BlendMode::Overlay);
    }

    #[test]
    fn test_tint_matrix() {
        let tint = TintMatrix::from_hex("#ff8000");
        assert_eq!(tint.r, 1.0);
        assert!((tint.g - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(tint.matrix()[2], [0.0, 0.0, 0.0]);
        assert_eq!(tint.apply([1.0, 1.0, 1.0])[0], 1.0);
        assert_eq!(
            TintMatrix::from_hex("#0000ff").color_matrix_values(),
            "0 0 0 0 0 0 0 0 0 0 0 0 1 0 0 0 0 0 1 0"
        );
    }
}
