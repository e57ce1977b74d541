use crate::{
    composition::compositor::{Background, LayerDescriptor, LayerKind, TintFilter},
    config::BlendMode,
    export::svg::write_filter_defs,
    geometry::Bounds,
};

/// A finished render handed to a presentation adapter
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub layers: &'a [LayerDescriptor],
    pub bounds: Bounds,
    pub background: Background,
    /// Blend of the whole stack against its container
    pub global_blend: BlendMode,
    pub filters: &'a [TintFilter],
}

/// Consumes a layer stack and turns it into a concrete presentation
///
/// Implement this per target (DOM/CSS, immediate-mode canvas, ...). The
/// core never depends on a particular implementation.
pub trait LayerPresenter {
    type Output;

    fn present(&mut self, scene: &Scene<'_>) -> Self::Output;
}

/// Container styling for a CSS presentation
#[derive(Debug, Clone, PartialEq)]
pub struct CssContainer {
    /// CSS background color, or `transparent`
    pub background_color: String,

    /// Whether a checkerboard should indicate transparency
    pub checkerboard: bool,

    pub mix_blend_mode: BlendMode,
}

/// One absolutely positioned, center-anchored layer element
#[derive(Debug, Clone, PartialEq)]
pub struct CssLayer {
    pub class_name: String,
    pub transform: String,
    pub opacity: f64,
    pub mix_blend_mode: BlendMode,
    /// `url(#id)` of the tint filter, or `none`
    pub filter: String,
    pub markup: String,
}

impl CssLayer {
    /// Inline `style` attribute value
    pub fn style(&self) -> String {
        format!(
            "transform: {}; opacity: {}; mix-blend-mode: {}; filter: {}",
            self.transform, self.opacity, self.mix_blend_mode, self.filter
        )
    }
}

/// Output of [`CssPresenter`]
#[derive(Debug, Clone, PartialEq)]
pub struct CssScene {
    pub container: CssContainer,
    /// Hidden `<svg>` holding the tint filter definitions
    pub filter_defs: String,
    pub layers: Vec<CssLayer>,
}

impl CssScene {
    /// Render as an HTML fragment
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(&self.filter_defs);
        for layer in &self.layers {
            html.push_str(&format!(
                r#"<div class="{}" style="{}">{}</div>"#,
                layer.class_name,
                layer.style(),
                layer.markup
            ));
        }
        html
    }
}

/// Presents layers as center-anchored CSS boxes
///
/// Each layer is positioned at 50%/50% of its container and pulled back by
/// half its own size, then displaced by the layer translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssPresenter;

impl CssPresenter {
    fn layer(descriptor: &LayerDescriptor) -> CssLayer {
        let kind = descriptor.kind();
        let (transform, filter) = match kind {
            LayerKind::Base => ("translate(-50%, -50%)".to_string(), "none".to_string()),
            LayerKind::Channel(channel) => {
                let offset = descriptor.translation();
                (
                    format!(
                        "translate(calc(-50% + {}px), calc(-50% + {}px)) scale({}) rotate({}deg)",
                        offset.x,
                        offset.y,
                        descriptor.scale(),
                        descriptor.rotation()
                    ),
                    format!("url(#{})", channel.filter_id()),
                )
            }
        };

        CssLayer {
            class_name: format!("rgb-layer {}-layer", kind.name()),
            transform,
            opacity: descriptor.opacity(),
            mix_blend_mode: descriptor.blend(),
            filter,
            markup: descriptor.content().markup().to_string(),
        }
    }
}

impl LayerPresenter for CssPresenter {
    type Output = CssScene;

    fn present(&mut self, scene: &Scene<'_>) -> CssScene {
        let container = match &scene.background {
            Background::Transparent => CssContainer {
                background_color: "transparent".to_string(),
                checkerboard: true,
                mix_blend_mode: scene.global_blend,
            },
            Background::Color(color) => CssContainer {
                background_color: color.clone(),
                checkerboard: false,
                mix_blend_mode: scene.global_blend,
            },
        };

        let mut filter_defs = String::from(
            r#"<svg width="0" height="0" style="position: absolute">"#,
        );
        write_filter_defs(&mut filter_defs, scene.filters);
        filter_defs.push_str("</svg>");

        CssScene {
            container,
            filter_defs,
            layers: scene.layers.iter().map(Self::layer).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        composition::{tint_filters, LayerCompositor},
        config::{Settings, TextStyle},
        content::Content,
        noise::SeededNoise,
    };

    fn present(settings: &Settings) -> CssScene {
        let content = Content::from_text("Hi", &TextStyle::default()).unwrap();
        let noise = SeededNoise::new(settings.noise_seed);
        let bounds = Bounds::default();
        let layers = LayerCompositor::new().compose(Some(&content), settings, bounds, &noise);
        let filters = tint_filters(settings);

        CssPresenter.present(&Scene {
            layers: &layers,
            bounds,
            background: Background::from_settings(settings),
            global_blend: settings.global_blend,
            filters: &filters,
        })
    }

    #[test]
    fn test_channel_layer_transform() {
        let scene = present(&Settings::default());

        assert_eq!(scene.layers.len(), 4);
        assert_eq!(scene.layers[0].class_name, "rgb-layer base-layer");
        assert_eq!(scene.layers[0].transform, "translate(-50%, -50%)");
        assert_eq!(scene.layers[0].filter, "none");

        let red = &scene.layers[1];
        assert_eq!(red.class_name, "rgb-layer red-layer");
        assert_eq!(
            red.transform,
            "translate(calc(-50% + 5px), calc(-50% + -3px)) scale(1) rotate(0deg)"
        );
        assert_eq!(red.filter, "url(#redChannel)");
        assert_eq!(red.mix_blend_mode, BlendMode::Screen);
        assert!(red.style().contains("mix-blend-mode: screen"));
    }

    #[test]
    fn test_container_background() {
        let scene = present(&Settings::default());
        assert_eq!(scene.container.background_color, "#0a0a0f");
        assert!(!scene.container.checkerboard);

        let scene = present(&Settings {
            bg_transparent: true,
            global_blend: BlendMode::Difference,
            ..Settings::default()
        });
        assert_eq!(
            scene.container,
            crate::composition::CssContainer {
                background_color: "transparent".to_string(),
                checkerboard: true,
                mix_blend_mode: BlendMode::Difference,
            }
        );
    }

    #[test]
    fn test_html_contains_defs_and_layers() {
        let html = present(&Settings::default()).to_html();
        assert!(html.starts_with("<svg width=\"0\""));
        assert!(html.contains(r#"<filter id="greenChannel""#));
        assert_eq!(html.matches("<div class=\"rgb-layer").count(), 4);
    }
}
