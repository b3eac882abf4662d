use anyhow::Context;
use kurbo::Affine;
use usvg::tiny_skia_path::PathSegment;

use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{TrailsError, TrailsResult};

/// Parse an SVG document and return its first path, in document order, in user space.
pub fn first_path_in_svg(svg: &str) -> TrailsResult<BezPath> {
    if svg.trim().is_empty() {
        return Err(TrailsError::missing_input("svg text must be non-empty"));
    }
    let tree = parse_svg_str(svg, &usvg::Options::default())?;
    find_first_path(tree.root())
        .map(bez_from_usvg)
        .ok_or_else(|| TrailsError::missing_input("svg document contains no path"))
}

pub(crate) fn parse_svg_str(svg: &str, opts: &usvg::Options<'_>) -> TrailsResult<usvg::Tree> {
    usvg::Tree::from_str(svg, opts)
        .context("parse svg tree")
        .map_err(|e| TrailsError::parse(format!("{e:#}")))
}

fn find_first_path(group: &usvg::Group) -> Option<&usvg::Path> {
    group.children().iter().find_map(|node| match node {
        usvg::Node::Path(path) => Some(&**path),
        usvg::Node::Group(g) => find_first_path(g),
        usvg::Node::Text(text) => find_first_path(text.flattened()),
        usvg::Node::Image(_) => None,
    })
}

/// Append every path under `group` (text included, as flattened glyph outlines) to `out`.
pub(crate) fn collect_paths(group: &usvg::Group, out: &mut BezPath) {
    for node in group.children() {
        match node {
            usvg::Node::Path(path) => {
                for el in bez_from_usvg(path).elements() {
                    out.push(*el);
                }
            }
            usvg::Node::Group(g) => collect_paths(g, out),
            usvg::Node::Text(text) => collect_paths(text.flattened(), out),
            usvg::Node::Image(_) => {}
        }
    }
}

fn bez_from_usvg(path: &usvg::Path) -> BezPath {
    fn pt(p: usvg::tiny_skia_path::Point) -> Point {
        Point::new(f64::from(p.x), f64::from(p.y))
    }

    let mut out = BezPath::new();
    for seg in path.data().segments() {
        match seg {
            PathSegment::MoveTo(p) => out.move_to(pt(p)),
            PathSegment::LineTo(p) => out.line_to(pt(p)),
            PathSegment::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathSegment::CubicTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathSegment::Close => out.close_path(),
        }
    }

    let ts = path.abs_transform();
    out.apply_affine(Affine::new([
        f64::from(ts.sx),
        f64::from(ts.ky),
        f64::from(ts.kx),
        f64::from(ts.sy),
        f64::from(ts.tx),
        f64::from(ts.ty),
    ]));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/source/svg.rs"]
mod tests;
