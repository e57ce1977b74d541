use crate::{
    composition::TintFilter,
    content::escape_xml,
    export::document::{ExportGroup, VectorDocument},
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Append a `<defs>` block with one color-matrix filter per tint
pub(crate) fn write_filter_defs(out: &mut String, filters: &[TintFilter]) {
    out.push_str("<defs>");
    for filter in filters {
        out.push_str(&format!(
            r#"<filter id="{}" color-interpolation-filters="sRGB"><feColorMatrix type="matrix" values="{}"/></filter>"#,
            filter.id(),
            filter.tint.color_matrix_values()
        ));
    }
    out.push_str("</defs>");
}

fn write_group(out: &mut String, group: &ExportGroup) {
    out.push_str(&format!(
        r#"<g opacity="{}" transform="{}""#,
        group.opacity,
        group.transform.to_svg()
    ));
    if let Some(filter) = group.filter {
        out.push_str(&format!(r#" filter="url(#{})""#, filter));
    }
    if let Some(blend) = group.blend {
        out.push_str(&format!(r#" style="mix-blend-mode: {}""#, blend));
    }
    out.push('>');

    // Nested viewport sized to the content box, centered on the origin
    out.push_str(&group.content.placed_markup(group.content_origin));
    out.push_str("</g>");
}

impl VectorDocument {
    /// Serialize as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let mut out = format!(
            r#"<svg xmlns="{ns}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            ns = SVG_NS,
            w = self.width,
            h = self.height,
        );

        write_filter_defs(&mut out, &self.filters);

        if let Some(color) = &self.background {
            out.push_str(&format!(
                r#"<rect width="100%" height="100%" fill="{}"/>"#,
                escape_xml(color)
            ));
        }

        for group in &self.groups {
            write_group(&mut out, group);
        }

        out.push_str("</svg>");
        out
    }
}
