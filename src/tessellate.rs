//! Rectangle tessellation: plain quads and rounded-corner meshes.
//!
//! A rounded rect is three axis-aligned strips (a "plus sign" outline of 12
//! vertices, 6 triangles) plus one quarter-circle fan per corner. Corner
//! fans share their center with a strip vertex, and their first and last
//! rim vertices duplicate the strip vertices they meet, so the outline has
//! no cracks.
//!
//! ```text
//!        2 ────────── 6
//!   0 ── 3            7 ── 10
//!   │    │            │    │
//!   1 ── 4            8 ── 11
//!        5 ────────── 9
//! ```
//!
//! UVs follow positions linearly: the corner radius maps into UV space
//! independently per axis (`radius / width * uv_width`), not aspect-corrected.

use core::f32::consts::FRAC_PI_2;

use num_traits::Float;

use crate::error::ConfigError;
use crate::geometry::{Rect, Rgba};
use crate::mesh::MeshBuilder;

/// Fewest triangles per quarter circle.
pub const MIN_SEGMENTS: u32 = 1;
/// Most triangles per quarter circle.
pub const MAX_SEGMENTS: u32 = 20;
/// Largest radius ratio; the radius is a fraction of the shorter side.
pub const MAX_RADIUS_RATIO: f32 = 0.5;

/// Round-corner settings for one layer.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundCorner {
    pub enabled: bool,
    /// Corner radius as a fraction of the shorter side of the draw rect,
    /// `0.0..=0.5`.
    pub radius_ratio: f32,
    /// Triangles per quarter circle, `1..=20`.
    pub segments: u32,
}

impl Default for RoundCorner {
    fn default() -> Self {
        Self {
            enabled: false,
            radius_ratio: 0.25,
            segments: 6,
        }
    }
}

impl RoundCorner {
    /// Enabled round corners. Out-of-range values are clamped at use time.
    pub fn new(radius_ratio: f32, segments: u32) -> Self {
        Self {
            enabled: true,
            radius_ratio,
            segments,
        }
    }

    /// Like [`new`](Self::new), but rejects out-of-range values.
    pub fn try_new(radius_ratio: f32, segments: u32) -> Result<Self, ConfigError> {
        if !radius_ratio.is_finite() {
            return Err(ConfigError::NonFinite);
        }
        if !(0.0..=MAX_RADIUS_RATIO).contains(&radius_ratio) {
            return Err(ConfigError::RadiusRatioOutOfRange);
        }
        if !(MIN_SEGMENTS..=MAX_SEGMENTS).contains(&segments) {
            return Err(ConfigError::SegmentsOutOfRange);
        }
        Ok(Self::new(radius_ratio, segments))
    }

    /// Radius in pixels for `draw`, clamped to `[0, shorter side / 2]`.
    ///
    /// Zero when disabled, when the ratio is negative or NaN, or when `draw`
    /// has no area.
    pub fn radius(&self, draw: &Rect) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        let short = draw.width().min(draw.height());
        let half = (short * 0.5).max(0.0);
        (self.radius_ratio * short).max(0.0).min(half)
    }

    /// Segment count clamped to `1..=20`.
    pub fn effective_segments(&self) -> u32 {
        self.segments.clamp(MIN_SEGMENTS, MAX_SEGMENTS)
    }

    /// Vertex and triangle counts [`tessellate`] emits for `draw`.
    pub fn mesh_size(&self, draw: &Rect) -> (u32, usize) {
        if self.radius(draw) > 0.0 {
            let s = self.effective_segments();
            (12 + 4 * (s + 1), 6 + 4 * s as usize)
        } else {
            (4, 2)
        }
    }
}

/// Append `draw` textured with `uv` to `builder`.
///
/// Emits a plain quad when round corners are disabled or the radius
/// resolves to zero, otherwise the strip-and-fan mesh.
pub fn tessellate(
    builder: &mut MeshBuilder,
    draw: Rect,
    uv: Rect,
    color: Rgba,
    round: &RoundCorner,
) {
    let radius = round.radius(&draw);
    if radius <= 0.0 {
        tessellate_quad(builder, draw, uv, color);
        return;
    }
    if !(0.0..=MAX_RADIUS_RATIO).contains(&round.radius_ratio) {
        log::debug!(
            "radius ratio {} clamped to radius {radius} for {}x{} rect",
            round.radius_ratio,
            draw.width(),
            draw.height()
        );
    }
    let segments = round.effective_segments();
    if segments != round.segments {
        log::debug!("corner segments {} clamped to {segments}", round.segments);
    }
    tessellate_rounded(builder, draw, uv, color, radius, segments);
}

/// Append a two-triangle quad: bottom-left, bottom-right, top-right, top-left.
pub fn tessellate_quad(builder: &mut MeshBuilder, draw: Rect, uv: Rect, color: Rgba) {
    let base = builder.vertex_count();
    builder.add_vertex([draw.x0, draw.y0], color, [uv.x0, uv.y0]);
    builder.add_vertex([draw.x1, draw.y0], color, [uv.x1, uv.y0]);
    builder.add_vertex([draw.x1, draw.y1], color, [uv.x1, uv.y1]);
    builder.add_vertex([draw.x0, draw.y1], color, [uv.x0, uv.y1]);
    builder.add_triangle_at(base, 0, 1, 2);
    builder.add_triangle_at(base, 2, 3, 0);
}

// ============================================================================
// Rounded mesh tables
// ============================================================================

/// Outline vertices as (column, row) into the edge/inset grid.
/// Columns: x0, x0+r, x1-r, x1. Rows: y0, y0+r, y1-r, y1.
const OUTLINE: [(usize, usize); 12] = [
    (0, 2),
    (0, 1),
    (1, 3),
    (1, 2),
    (1, 1),
    (1, 0),
    (2, 3),
    (2, 2),
    (2, 1),
    (2, 0),
    (3, 2),
    (3, 1),
];

/// Left, middle and right strips, two triangles each.
const STRIPS: [[u32; 3]; 6] = [
    [1, 4, 3],
    [3, 0, 1],
    [5, 9, 6],
    [6, 2, 5],
    [8, 11, 10],
    [10, 7, 8],
];

/// Corner fans as `[center, first rim, last rim]` outline indices:
/// top-right, top-left, bottom-left, bottom-right. Fan `k` sweeps
/// `[k·π/2, (k+1)·π/2]`.
const FANS: [[usize; 3]; 4] = [[7, 10, 6], [3, 2, 0], [4, 1, 5], [8, 9, 11]];

fn tessellate_rounded(
    builder: &mut MeshBuilder,
    draw: Rect,
    uv: Rect,
    color: Rgba,
    radius: f32,
    segments: u32,
) {
    // radius > 0 implies both extents are positive.
    let uv_rx = radius / draw.width() * uv.width();
    let uv_ry = radius / draw.height() * uv.height();

    let xs = [draw.x0, draw.x0 + radius, draw.x1 - radius, draw.x1];
    let ys = [draw.y0, draw.y0 + radius, draw.y1 - radius, draw.y1];
    let us = [uv.x0, uv.x0 + uv_rx, uv.x1 - uv_rx, uv.x1];
    let vs = [uv.y0, uv.y0 + uv_ry, uv.y1 - uv_ry, uv.y1];
    let outline = OUTLINE.map(|(c, r)| ([xs[c], ys[r]], [us[c], vs[r]]));

    let base = builder.vertex_count();
    for (position, tex) in outline {
        builder.add_vertex(position, color, tex);
    }
    for [a, b, c] in STRIPS {
        builder.add_triangle_at(base, a, b, c);
    }

    let step = FRAC_PI_2 / segments as f32;
    for (quadrant, [center, first, last]) in FANS.into_iter().enumerate() {
        let ([cx, cy], [cu, cv]) = outline[center];
        let rim = builder.vertex_count();
        for j in 0..=segments {
            let (position, tex) = if j == 0 {
                outline[first]
            } else if j == segments {
                outline[last]
            } else {
                let angle = quadrant as f32 * FRAC_PI_2 + j as f32 * step;
                let (sin, cos) = (Float::sin(angle), Float::cos(angle));
                (
                    [cx + cos * radius, cy + sin * radius],
                    [cu + cos * uv_rx, cv + sin * uv_ry],
                )
            };
            builder.add_vertex(position, color, tex);
        }
        for j in 0..segments {
            builder.add_triangle(base + center as u32, rim + j, rim + j + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    const DRAW: Rect = Rect::new(0.0, 0.0, 100.0, 50.0);

    fn build(draw: Rect, uv: Rect, round: RoundCorner) -> Mesh {
        let mut b = MeshBuilder::new();
        tessellate(&mut b, draw, uv, Rgba::WHITE, &round);
        b.into_mesh()
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-4
    }

    // ── quad ────────────────────────────────────────────────────────────

    #[test]
    fn disabled_emits_quad() {
        let mesh = build(DRAW, Rect::UNIT, RoundCorner::default());
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangles, [[0, 1, 2], [2, 3, 0]]);
        assert_eq!(mesh.vertices[0].position, [0.0, 0.0]);
        assert_eq!(mesh.vertices[2].position, [100.0, 50.0]);
        assert_eq!(mesh.vertices[2].uv, [1.0, 1.0]);
        assert_eq!(mesh.signed_area(0), 5000.0);
        assert_eq!(mesh.signed_area(1), 5000.0);
    }

    #[test]
    fn zero_radius_emits_quad() {
        let mesh = build(DRAW, Rect::UNIT, RoundCorner::new(0.0, 6));
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangles.len(), 2);
    }

    #[test]
    fn degenerate_draw_emits_quad() {
        for draw in [
            Rect::new(10.0, 10.0, 10.0, 60.0),
            Rect::new(0.0, 0.0, 0.0, 0.0),
            Rect::new(5.0, 5.0, 0.0, 0.0),
        ] {
            let mesh = build(draw, Rect::UNIT, RoundCorner::new(0.25, 6));
            assert_eq!(mesh.vertices.len(), 4, "{draw:?}");
            for v in &mesh.vertices {
                assert!(v.position.iter().chain(&v.uv).all(|c| c.is_finite()));
            }
        }
    }

    #[test]
    fn nan_and_negative_ratio_emit_quad() {
        assert_eq!(build(DRAW, Rect::UNIT, RoundCorner::new(f32::NAN, 6)).vertices.len(), 4);
        assert_eq!(build(DRAW, Rect::UNIT, RoundCorner::new(-0.3, 6)).vertices.len(), 4);
    }

    // ── radius ──────────────────────────────────────────────────────────

    #[test]
    fn radius_uses_shorter_side() {
        assert_eq!(RoundCorner::new(0.25, 6).radius(&DRAW), 12.5);
        assert_eq!(RoundCorner::default().radius(&DRAW), 0.0);
    }

    #[test]
    fn radius_clamped_to_half_short_side() {
        assert_eq!(RoundCorner::new(3.0, 6).radius(&DRAW), 25.0);
    }

    // ── rounded ─────────────────────────────────────────────────────────

    #[test]
    fn rounded_counts() {
        for s in MIN_SEGMENTS..=MAX_SEGMENTS {
            let round = RoundCorner::new(0.25, s);
            let mesh = build(DRAW, Rect::UNIT, round);
            assert_eq!(mesh.vertices.len() as u32, 12 + 4 * (s + 1), "s={s}");
            assert_eq!(mesh.triangles.len() as u32, 6 + 4 * s, "s={s}");
            let (nv, nt) = round.mesh_size(&DRAW);
            assert_eq!(nv as usize, mesh.vertices.len());
            assert_eq!(nt, mesh.triangles.len());
        }
    }

    #[test]
    fn rounded_all_triangles_ccw() {
        let mesh = build(DRAW, Rect::UNIT, RoundCorner::new(0.3, 5));
        for t in 0..mesh.triangles.len() {
            assert!(mesh.signed_area(t) > 0.0, "triangle {t} not CCW");
        }
    }

    #[test]
    fn outline_positions() {
        let mesh = build(DRAW, Rect::UNIT, RoundCorner::new(0.2, 4));
        // radius = 0.2 * 50 = 10
        assert_eq!(mesh.vertices[0].position, [0.0, 40.0]);
        assert_eq!(mesh.vertices[2].position, [10.0, 50.0]);
        assert_eq!(mesh.vertices[7].position, [90.0, 40.0]);
        assert_eq!(mesh.vertices[11].position, [100.0, 10.0]);
    }

    #[test]
    fn fan_endpoints_touch_strip_vertices() {
        let s = 4;
        let mesh = build(DRAW, Rect::UNIT, RoundCorner::new(0.2, s));
        let rim =
            |corner: usize, j: u32| mesh.vertices[12 + corner * (s as usize + 1) + j as usize];
        // Top-right fan runs from vertex 10 to vertex 6.
        assert_eq!(rim(0, 0).position, mesh.vertices[10].position);
        assert_eq!(rim(0, s).position, mesh.vertices[6].position);
        // Bottom-left fan runs from vertex 1 to vertex 5.
        assert_eq!(rim(2, 0).position, mesh.vertices[1].position);
        assert_eq!(rim(2, s).position, mesh.vertices[5].position);
        assert_eq!(rim(2, s).uv, mesh.vertices[5].uv);
    }

    #[test]
    fn fan_triangles_use_center() {
        let s = 3;
        let mesh = build(DRAW, Rect::UNIT, RoundCorner::new(0.2, s));
        let fans = &mesh.triangles[6..];
        for (corner, [center, _, _]) in FANS.into_iter().enumerate() {
            for tri in &fans[corner * s as usize..(corner + 1) * s as usize] {
                assert_eq!(tri[0], center as u32);
            }
        }
    }

    #[test]
    fn rim_on_circle() {
        let mesh = build(DRAW, Rect::UNIT, RoundCorner::new(0.5, 7));
        // radius = 25; top-left center is vertex 3.
        let [cx, cy] = mesh.vertices[3].position;
        let start = 12 + 8;
        for v in &mesh.vertices[start..start + 8] {
            let d = ((v.position[0] - cx).powi(2) + (v.position[1] - cy).powi(2)).sqrt();
            assert!(close(d, 25.0), "{d}");
        }
    }

    #[test]
    fn uv_follows_position_linearly() {
        let draw = Rect::new(10.0, 20.0, 210.0, 120.0);
        let uv = Rect::new(0.5, 0.25, 0.75, 0.75);
        let mesh = build(draw, uv, RoundCorner::new(0.35, 9));
        for v in &mesh.vertices {
            let u = uv.x0 + (v.position[0] - draw.x0) / draw.width() * uv.width();
            let w = uv.y0 + (v.position[1] - draw.y0) / draw.height() * uv.height();
            assert!(close(v.uv[0], u) && close(v.uv[1], w), "{v:?}");
        }
    }

    #[test]
    fn segments_clamped() {
        let mesh = build(DRAW, Rect::UNIT, RoundCorner::new(0.25, 0));
        assert_eq!(mesh.triangles.len(), 6 + 4);
        let mesh = build(DRAW, Rect::UNIT, RoundCorner::new(0.25, 500));
        assert_eq!(mesh.triangles.len(), 6 + 4 * 20);
    }

    #[test]
    fn appends_with_base_offset() {
        let mut b = MeshBuilder::new();
        tessellate(&mut b, DRAW, Rect::UNIT, Rgba::WHITE, &RoundCorner::default());
        tessellate(&mut b, DRAW, Rect::UNIT, Rgba::BLACK, &RoundCorner::new(0.25, 2));
        let mesh = b.into_mesh();
        assert_eq!(mesh.triangles[2], [4 + 1, 4 + 4, 4 + 3]);
        assert!(mesh.triangles[2..].iter().flatten().all(|&i| i >= 4));
        assert_eq!(mesh.vertices[4].color, Rgba::BLACK);
    }

    // ── validation ──────────────────────────────────────────────────────

    #[test]
    fn try_new_validates() {
        assert!(RoundCorner::try_new(0.5, 20).is_ok());
        assert!(RoundCorner::try_new(0.0, 1).is_ok());
        assert_eq!(
            RoundCorner::try_new(0.6, 6),
            Err(ConfigError::RadiusRatioOutOfRange)
        );
        assert_eq!(
            RoundCorner::try_new(-0.1, 6),
            Err(ConfigError::RadiusRatioOutOfRange)
        );
        assert_eq!(
            RoundCorner::try_new(0.2, 0),
            Err(ConfigError::SegmentsOutOfRange)
        );
        assert_eq!(
            RoundCorner::try_new(f32::INFINITY, 6),
            Err(ConfigError::NonFinite)
        );
    }
}
