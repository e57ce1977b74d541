//! # Content Input
//!
//! The graphic being split: either user-supplied SVG markup or a single
//! line of generated text. Content is an immutable value; every layer
//! holds its own copy.

use tracing::warn;

use crate::{
    config::TextStyle,
    error::{ContentError, Result},
    geometry::Point,
};

/// Size used when an SVG declares neither a viewBox nor a size
const FALLBACK_EXTENT: f64 = 100.0;

/// Where the content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Svg,
    Text,
}

/// Intrinsic size of the content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBox {
    pub width: f64,
    pub height: f64,
}

/// A vector graphic ready to be placed in a layer
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    kind: ContentKind,
    root: RootElement,
    markup: String,
    content_box: ContentBox,
}

/// Serialized root `<svg>`, split so its viewport can be replaced
#[derive(Debug, Clone, PartialEq)]
struct RootElement {
    name: String,
    /// Namespace declarations and attributes, each with a leading space
    attributes: String,
    /// The root's own `x`/`y`/`width`/`height`, if any
    placement: String,
    body: String,
}

impl RootElement {
    fn write(&self, out: &mut String, placement: &str) {
        out.push('<');
        out.push_str(&self.name);
        out.push_str(&self.attributes);
        out.push_str(placement);
        if self.body.is_empty() {
            out.push_str("/>");
        } else {
            out.push('>');
            out.push_str(&self.body);
            out.push_str(&format!("</{}>", self.name));
        }
    }

    fn markup(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, &self.placement);
        out
    }
}

impl Content {
    /// Parse SVG markup, returning `None` for empty or malformed input
    pub fn from_svg(markup: &str) -> Option<Self> {
        match Self::parse_svg(markup) {
            Ok(content) => Some(content),
            Err(ContentError::Empty) => None,
            Err(e) => {
                warn!("Ignoring SVG input: {}", e);
                None
            }
        }
    }

    /// Parse SVG markup, reporting why it was rejected
    pub fn parse_svg(markup: &str) -> std::result::Result<Self, ContentError> {
        let markup = markup.trim();
        if markup.is_empty() {
            return Err(ContentError::Empty);
        }

        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let document = roxmltree::Document::parse_with_options(markup, options)
            .map_err(|e| ContentError::MalformedMarkup { reason: e.to_string() })?;

        let root = document.root_element();
        if root.tag_name().name() != "svg" {
            return Err(ContentError::NotSvg {
                found: root.tag_name().name().to_string(),
            });
        }

        let content_box = root
            .attribute("viewBox")
            .and_then(parse_view_box)
            .unwrap_or_else(|| ContentBox {
                width: parse_length(root.attribute("width")).unwrap_or(FALLBACK_EXTENT),
                height: parse_length(root.attribute("height")).unwrap_or(FALLBACK_EXTENT),
            });

        // Re-serialize the root element: prologs and doctypes must not end
        // up nested inside another document, and entities declared in a
        // DTD are only valid next to that DTD.
        let mut attributes = String::new();
        let mut placement = String::new();
        write_declarations(&mut attributes, root);
        for attribute in root.attributes() {
            let target = match (attribute.namespace(), attribute.name()) {
                (None, "x" | "y" | "width" | "height") => &mut placement,
                _ => &mut attributes,
            };
            write_attribute(target, root, attribute);
        }

        let mut body = String::new();
        write_children(&mut body, root);

        let root = RootElement {
            name: qualified_name(root, root.tag_name().namespace(), root.tag_name().name(), false),
            attributes,
            placement,
            body,
        };

        Ok(Self {
            kind: ContentKind::Svg,
            markup: root.markup(),
            root,
            content_box,
        })
    }

    /// Generate centered single-line text content
    ///
    /// Returns `None` for blank text. The box is estimated from the
    /// character count since no font metrics are available.
    pub fn from_text(text: &str, style: &TextStyle) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let char_width = style.font_size * 0.6;
        let width = text.chars().count() as f64 * char_width + 40.0;
        let height = style.font_size * 1.5;

        let root = RootElement {
            name: "svg".to_string(),
            attributes: format!(
                concat!(
                    r#" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}""#,
                    r#" preserveAspectRatio="xMidYMid meet" overflow="visible""#,
                ),
                w = width,
                h = height,
            ),
            placement: String::new(),
            body: format!(
                concat!(
                    r#"<text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" "#,
                    r#"fill="{fill}" font-family="{family}" font-size="{size}" font-weight="{weight}">"#,
                    "{text}</text>"
                ),
                fill = escape_xml(&style.text_color),
                family = escape_xml(&style.font_family),
                size = style.font_size,
                weight = style.font_weight,
                text = escape_xml(text),
            ),
        };

        Some(Self {
            kind: ContentKind::Text,
            markup: root.markup(),
            root,
            content_box: ContentBox { width, height },
        })
    }

    /// Parse an SVG input, failing on blank markup too
    pub fn require_svg(markup: &str) -> Result<Self> {
        Ok(Self::parse_svg(markup)?)
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Markup of the root `<svg>` element
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn content_box(&self) -> ContentBox {
        self.content_box
    }

    /// Root element as a nested viewport the size of the content box,
    /// with its top-left corner at `origin`
    ///
    /// Any size or position the root carried itself is replaced.
    pub fn placed_markup(&self, origin: Point) -> String {
        let placement = format!(
            r#" x="{}" y="{}" width="{}" height="{}""#,
            origin.x, origin.y, self.content_box.width, self.content_box.height
        );
        let mut out = String::with_capacity(self.markup.len() + placement.len());
        self.root.write(&mut out, &placement);
        out
    }
}

/// `min-x min-y width height`, separated by whitespace and/or commas
fn parse_view_box(value: &str) -> Option<ContentBox> {
    let parts: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<std::result::Result<_, _>>()
        .ok()?;

    match parts.as_slice() {
        [_, _, width, height] if width.is_finite() && height.is_finite() => {
            Some(ContentBox { width: *width, height: *height })
        }
        _ => None,
    }
}

/// Leading number of a length attribute such as `"120"` or `"120px"`
fn parse_length(value: Option<&str>) -> Option<f64> {
    let value = value?.trim();
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || c == 'e' || c == 'E'))
        .unwrap_or(value.len());

    value[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v != 0.0)
}

/// Write `node` and its subtree with entities resolved
///
/// Namespace declarations are emitted where they first come into scope.
/// Comments and processing instructions are dropped.
fn write_element(out: &mut String, node: roxmltree::Node<'_, '_>) {
    let tag = node.tag_name();
    let name = qualified_name(node, tag.namespace(), tag.name(), false);

    out.push('<');
    out.push_str(&name);
    write_declarations(out, node);
    for attribute in node.attributes() {
        write_attribute(out, node, attribute);
    }

    if !node.has_children() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    write_children(out, node);
    out.push_str(&format!("</{}>", name));
}

fn write_declarations(out: &mut String, node: roxmltree::Node<'_, '_>) {
    let parent = node.parent_element();

    for ns in node.namespaces() {
        if ns.name() == Some("xml") {
            continue;
        }
        let inherited = parent.map_or(false, |p| {
            p.namespaces().any(|outer| outer.name() == ns.name() && outer.uri() == ns.uri())
        });
        if inherited {
            continue;
        }
        match ns.name() {
            Some(prefix) => out.push_str(&format!(r#" xmlns:{}="{}""#, prefix, escape_xml(ns.uri()))),
            None => out.push_str(&format!(r#" xmlns="{}""#, escape_xml(ns.uri()))),
        }
    }

    if node.tag_name().namespace().is_none() && parent.map_or(false, |p| p.default_namespace().is_some()) {
        out.push_str(r#" xmlns="""#);
    }
}

fn write_attribute(out: &mut String, node: roxmltree::Node<'_, '_>, attribute: roxmltree::Attribute<'_, '_>) {
    let name = qualified_name(node, attribute.namespace(), attribute.name(), true);
    out.push_str(&format!(r#" {}="{}""#, name, escape_xml(attribute.value())));
}

fn write_children(out: &mut String, node: roxmltree::Node<'_, '_>) {
    for child in node.children() {
        if child.is_element() {
            write_element(out, child);
        } else if child.is_text() {
            out.push_str(&escape_xml(child.text().unwrap_or_default()));
        }
    }
}

/// Prefixed name for an element or attribute in `uri`
///
/// Attributes never take the default namespace, so they only match
/// prefixed declarations.
fn qualified_name(node: roxmltree::Node<'_, '_>, uri: Option<&str>, local: &str, attribute: bool) -> String {
    let Some(uri) = uri else {
        return local.to_string();
    };
    if uri == roxmltree::NS_XML_URI {
        return format!("xml:{}", local);
    }

    if !attribute && node.default_namespace() == Some(uri) {
        return local.to_string();
    }

    match node
        .namespaces()
        .find(|ns| ns.uri() == uri && ns.name().is_some())
        .and_then(|ns| ns.name())
    {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

pub(crate) fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
