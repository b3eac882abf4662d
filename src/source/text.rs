use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::BezPath;
use crate::foundation::error::{TrailsError, TrailsResult};
use crate::source::svg::{collect_paths, parse_svg_str};

/// Font size, in pixels, glyph outlines are generated at before fitting.
pub const TEXT_FONT_SIZE: f64 = 48.0;

/// Where the font for text outlines comes from.
#[derive(Clone, Debug)]
pub enum FontSource {
    /// A TrueType/OpenType font file on disk.
    File(PathBuf),
    /// Raw font file bytes.
    Bytes(Arc<Vec<u8>>),
}

impl FontSource {
    fn read(&self) -> TrailsResult<Arc<Vec<u8>>> {
        match self {
            Self::Bytes(bytes) => Ok(bytes.clone()),
            Self::File(path) => std::fs::read(path)
                .with_context(|| format!("read font '{}'", path.display()))
                .map(Arc::new)
                .map_err(|e| TrailsError::font_load(format!("{e:#}"))),
        }
    }
}

/// Lay `text` out in the given font and return the glyph outlines as one path.
pub fn text_outline(text: &str, font: &FontSource) -> TrailsResult<BezPath> {
    if text.trim().is_empty() {
        return Err(TrailsError::missing_input("text must be non-empty"));
    }

    let bytes = font.read()?;
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(bytes.to_vec());
    let family = db
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        .ok_or_else(|| TrailsError::font_load("font data contains no usable face"))?;

    let svg = text_svg(text, &family);
    let opts = usvg::Options {
        fontdb: Arc::new(db),
        ..Default::default()
    };
    let tree = parse_svg_str(&svg, &opts)?;

    let mut outline = BezPath::new();
    collect_paths(tree.root(), &mut outline);
    if outline.elements().is_empty() {
        return Err(TrailsError::missing_input(format!(
            "font '{family}' produced no outlines for the given text"
        )));
    }
    tracing::debug!(%family, elements = outline.elements().len(), "built text outline");
    Ok(outline)
}

fn text_svg(text: &str, family: &str) -> String {
    let size = TEXT_FONT_SIZE;
    let width = size * (text.chars().count() as f64 + 1.0);
    let height = size * 2.0;
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><text x="0" y="{size}" font-family="{}" font-size="{size}">{}</text></svg>"#,
        escape_xml(family),
        escape_xml(text),
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/source/text.rs"]
mod tests;
