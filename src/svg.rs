//! SVG wireframe of a tessellated mesh.
//!
//! Draws the bound as a panel, every triangle as an outlined polygon, and a
//! label with vertex/triangle counts. Mesh coordinates are y-up; the SVG is
//! flipped so the mesh appears the right way up.
//!
//! # Example
//!
//! ```
//! use zenfit::{Layer, Rect, RoundCorner, Size, Rgba, render_layer, svg::render_mesh_svg};
//!
//! let bound = Rect::new(0.0, 0.0, 320.0, 180.0);
//! let layer = Layer::new(Size::new(64.0, 64.0), Rect::UNIT)
//!     .round_corner(RoundCorner::new(0.25, 6));
//! let mesh = render_layer(&layer, bound, Rgba::WHITE);
//!
//! let svg = render_mesh_svg(&mesh, bound);
//! assert!(svg.starts_with("<svg"));
//! ```

use alloc::format;
use alloc::string::String;

use num_traits::Float;

use crate::geometry::Rect;
use crate::mesh::Mesh;

/// Maximum pixel width of the panel.
const MAX_PANEL_W: f32 = 400.0;
/// Maximum pixel height of the panel.
const MAX_PANEL_H: f32 = 300.0;
/// Horizontal margin.
const MARGIN_X: f32 = 30.0;
/// Top and bottom margin.
const MARGIN_Y: f32 = 20.0;
/// Height of the label text area above the panel.
const LABEL_H: f32 = 22.0;
/// Height of the annotation text area below the panel.
const ANNOTATION_H: f32 = 18.0;

/// Render `mesh` inside `bound` as a complete SVG document.
///
/// Triangles with out-of-range indices or non-finite positions are skipped.
pub fn render_mesh_svg(mesh: &Mesh, bound: Rect) -> String {
    let (pw, ph, scale) = scale_to_fit(&bound);
    let total_w = pw + 2.0 * MARGIN_X;
    let total_h = MARGIN_Y + LABEL_H + ph + ANNOTATION_H + MARGIN_Y;
    let panel_x = MARGIN_X;
    let panel_y = MARGIN_Y + LABEL_H;

    // Mesh space (y-up) → panel space (y-down).
    let to_svg = |[x, y]: [f32; 2]| {
        (
            panel_x + (x - bound.x0) * scale,
            panel_y + (bound.y1 - y) * scale,
        )
    };

    let mut svg = String::with_capacity(1024 + mesh.triangles.len() * 96);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        Float::ceil(total_w) as u32,
        Float::ceil(total_h) as u32,
        total_w,
        total_h
    ));
    svg.push('\n');

    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .bound { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .tri { fill: #6ba3d6; fill-opacity: 0.35; stroke: #2c6faa; stroke-width: 0.75; stroke-linejoin: round; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .bound { fill: #2d2d2d; stroke: #555; }
    .tri { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##,
    );

    let center_x = total_w / 2.0;
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" class="label" text-anchor="middle">Mesh  {} vertices, {} triangles</text>"#,
        center_x,
        MARGIN_Y + 14.0,
        mesh.vertices.len(),
        mesh.triangles.len()
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="bound"/>"#,
        panel_x, panel_y, pw, ph
    ));
    svg.push('\n');

    for tri in &mesh.triangles {
        let Some(points) = triangle_points(mesh, tri) else {
            continue;
        };
        let [a, b, c] = points.map(to_svg);
        svg.push_str(&format!(
            r#"<polygon points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" class="tri"/>"#,
            a.0, a.1, b.0, b.1, c.0, c.1
        ));
        svg.push('\n');
    }

    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" class="annotation" text-anchor="middle">bound {}×{} at ({}, {})</text>"#,
        center_x,
        panel_y + ph + 14.0,
        bound.width(),
        bound.height(),
        bound.x0,
        bound.y0
    ));
    svg.push('\n');

    svg.push_str("</svg>\n");
    svg
}

/// Positions of one triangle, or `None` if it can't be drawn.
fn triangle_points(mesh: &Mesh, tri: &[u32; 3]) -> Option<[[f32; 2]; 3]> {
    let mut out = [[0.0; 2]; 3];
    for (slot, &i) in out.iter_mut().zip(tri) {
        let p = mesh.vertices.get(i as usize)?.position;
        if !p.iter().all(|c| c.is_finite()) {
            return None;
        }
        *slot = p;
    }
    Some(out)
}

/// Scale the bound to fit MAX_PANEL_W × MAX_PANEL_H, preserving aspect ratio.
fn scale_to_fit(bound: &Rect) -> (f32, f32, f32) {
    let w = bound.width();
    let h = bound.height();
    if !(w > 0.0 && h > 0.0) {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}
