use tracing::debug;

use crate::{
    composition::{tint_filters, Background, LayerCompositor, LayerDescriptor, LayerKind, TintFilter, TintMatrix},
    config::{BlendMode, Settings},
    content::Content,
    geometry::{AffineTransform, Bounds, Point},
    noise::SeededNoise,
};

/// One positioned layer of an exported document
#[derive(Debug, Clone, PartialEq)]
pub struct ExportGroup {
    pub kind: LayerKind,

    /// Absolute placement of the content's center in document space
    pub transform: AffineTransform,

    pub opacity: f64,

    /// Compositing operator; the base layer draws normally
    pub blend: Option<BlendMode>,

    /// Id of the tint filter applied to this group
    pub filter: Option<&'static str>,

    /// Tint the filter applies, kept for consumers that skip filters
    pub tint: Option<TintMatrix>,

    /// Local position of the content's top-left corner, which centers the
    /// content box on the group origin
    pub content_origin: Point,

    pub content: Content,
}

/// Resolution-independent document equivalent to one preview render
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    pub width: f64,
    pub height: f64,

    /// Tint definitions, one per channel
    pub filters: Vec<TintFilter>,

    /// Opaque background fill; `None` when transparency is requested
    pub background: Option<String>,

    /// Layers in paint order
    pub groups: Vec<ExportGroup>,
}

impl VectorDocument {
    /// Pixel size of a raster made from this document at `supersample`x
    pub fn raster_size(&self, supersample: u32) -> (u32, u32) {
        let factor = supersample.max(1) as f64;
        (
            (self.width * factor).ceil() as u32,
            (self.height * factor).ceil() as u32,
        )
    }
}

/// Builds [`VectorDocument`]s from the compositor's layer stack
pub struct GeometryExporter<'a> {
    compositor: &'a LayerCompositor,
}

impl<'a> GeometryExporter<'a> {
    pub fn new(compositor: &'a LayerCompositor) -> Self {
        Self { compositor }
    }

    /// Export the composition for the given inputs
    ///
    /// With no content the document still carries its size, filters and
    /// background, but no groups.
    pub fn export(
        &self,
        content: Option<&Content>,
        settings: &Settings,
        bounds: Bounds,
        noise: &SeededNoise,
    ) -> VectorDocument {
        let layers = self.compositor.compose(content, settings, bounds, noise);
        let center = bounds.center();

        let background = match Background::from_settings(settings) {
            Background::Transparent => None,
            Background::Color(color) => Some(color),
        };

        let groups: Vec<ExportGroup> = layers
            .into_iter()
            .map(|layer| Self::group(layer, center))
            .collect();

        debug!("Exported {} groups at {}x{}", groups.len(), bounds.width(), bounds.height());

        VectorDocument {
            width: bounds.width(),
            height: bounds.height(),
            filters: tint_filters(settings),
            background,
            groups,
        }
    }

    /// Convert a center-relative descriptor into an absolute group
    fn group(layer: LayerDescriptor, center: Point) -> ExportGroup {
        let content_box = layer.content().content_box();
        let content_origin = Point::new(-content_box.width / 2.0, -content_box.height / 2.0);
        let kind = layer.kind();

        let (blend, filter) = match kind {
            LayerKind::Base => (None, None),
            LayerKind::Channel(channel) => (Some(layer.blend()), Some(channel.filter_id())),
        };

        ExportGroup {
            kind,
            transform: AffineTransform::new(
                center + layer.translation(),
                layer.scale(),
                layer.rotation(),
            ),
            opacity: layer.opacity(),
            blend,
            filter,
            tint: layer.tint(),
            content_origin,
            content: layer.content().clone(),
        }
    }
}
