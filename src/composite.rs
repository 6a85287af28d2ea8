//! Layers and the two-layer composite pipeline.
//!
//! Each layer runs resolve → tessellate into a shared [`MeshBuilder`].
//! The background fills the whole bound and is drawn first; the optional
//! foreground is drawn over it, inset by the clamped padding.
//!
//! # Example
//!
//! ```
//! use zenfit::{CompositeSpec, Layer, Rect, RoundCorner, ScaleType, Size, composite};
//!
//! let background = Layer::new(Size::new(512.0, 512.0), Rect::UNIT);
//! let foreground = Layer::new(Size::new(64.0, 32.0), Rect::new(0.0, 0.5, 0.25, 0.75))
//!     .scale_type(ScaleType::FitCenter)
//!     .round_corner(RoundCorner::new(0.25, 6));
//!
//! let spec = CompositeSpec::new(background).foreground(foreground).padding(8.0);
//! let mesh = composite(&spec, Rect::new(0.0, 0.0, 200.0, 100.0));
//!
//! // Background quad + rounded foreground.
//! assert_eq!(mesh.vertices.len(), 4 + 12 + 4 * 7);
//! ```

use crate::error::ConfigError;
use crate::geometry::{Rect, Rgba, Size};
use crate::mesh::{Mesh, MeshBuilder};
use crate::scale::{Placement, ScaleType, resolve};
use crate::tessellate::{RoundCorner, tessellate};

/// One scale-fit-able drawable: content size, its UV rect, and how to fit it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layer {
    /// Intrinsic content size in pixels. [`Size::ZERO`] = no content.
    pub content: Size,
    /// Outer UV rect of the content within its texture.
    pub uv: Rect,
    pub scale_type: ScaleType,
    pub round_corner: RoundCorner,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            content: Size::ZERO,
            uv: Rect::UNIT,
            scale_type: ScaleType::default(),
            round_corner: RoundCorner::default(),
        }
    }
}

impl Layer {
    /// Layer with default scale type (CenterCrop) and square corners.
    pub fn new(content: Size, uv: Rect) -> Self {
        Self {
            content,
            uv,
            ..Self::default()
        }
    }

    pub fn scale_type(mut self, scale_type: ScaleType) -> Self {
        self.scale_type = scale_type;
        self
    }

    pub fn round_corner(mut self, round_corner: RoundCorner) -> Self {
        self.round_corner = round_corner;
        self
    }

    /// Resolve this layer against `bound`.
    pub fn placement(&self, bound: Rect) -> Placement {
        resolve(bound, self.content, self.uv, self.scale_type)
    }
}

/// Background layer, optional foreground layer, and the padding between them.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeSpec {
    /// Always drawn, against the full bound.
    pub background: Layer,
    /// Drawn over the background, against the bound inset by `padding`.
    pub foreground: Option<Layer>,
    /// Inset of the foreground bound in pixels; clamped at use time to
    /// `[0, min(width, height) / 2]`.
    pub padding: f32,
    /// Tint for every vertex of both layers.
    pub color: Rgba,
}

impl Default for CompositeSpec {
    fn default() -> Self {
        Self::new(Layer::default())
    }
}

impl CompositeSpec {
    /// Background-only spec with zero padding and a white tint.
    pub fn new(background: Layer) -> Self {
        Self {
            background,
            foreground: None,
            padding: 0.0,
            color: Rgba::WHITE,
        }
    }

    pub fn foreground(mut self, layer: Layer) -> Self {
        self.foreground = Some(layer);
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Like [`padding`](Self::padding), but rejects negative or non-finite
    /// values.
    pub fn try_padding(self, padding: f32) -> Result<Self, ConfigError> {
        if !padding.is_finite() {
            return Err(ConfigError::NonFinite);
        }
        if padding < 0.0 {
            return Err(ConfigError::NegativePadding);
        }
        Ok(self.padding(padding))
    }

    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Padding actually used for `bound`: `min(w / 2, h / 2, padding)`,
    /// with negative or NaN padding treated as zero.
    pub fn effective_padding(&self, bound: &Rect) -> f32 {
        let half = (bound.width() * 0.5).min(bound.height() * 0.5).max(0.0);
        self.padding.max(0.0).min(half)
    }
}

/// Resolve `layer` against `bound` and append its mesh to `builder`.
pub fn draw_layer(builder: &mut MeshBuilder, layer: &Layer, bound: Rect, color: Rgba) {
    let placement = layer.placement(bound);
    let (vertices, triangles) = layer.round_corner.mesh_size(&placement.draw);
    builder.reserve(vertices as usize, triangles);
    tessellate(
        builder,
        placement.draw,
        placement.uv,
        color,
        &layer.round_corner,
    );
}

/// Mesh for a single layer filling `bound`.
pub fn render_layer(layer: &Layer, bound: Rect, color: Rgba) -> Mesh {
    let mut builder = MeshBuilder::new();
    draw_layer(&mut builder, layer, bound, color);
    builder.into_mesh()
}

/// Build the composite mesh for `spec` inside `bound` with a fresh builder.
pub fn composite(spec: &CompositeSpec, bound: Rect) -> Mesh {
    let mut builder = MeshBuilder::new();
    composite_into(spec, bound, &mut builder);
    builder.into_mesh()
}

/// Rebuild the composite mesh into `builder`, replacing its contents.
///
/// Reusing one builder across rebuilds only saves allocations; the result
/// is identical to [`composite`].
pub fn composite_into(spec: &CompositeSpec, bound: Rect, builder: &mut MeshBuilder) {
    builder.clear();

    let Some(foreground) = &spec.foreground else {
        draw_layer(builder, &spec.background, bound, spec.color);
        log_rebuild("background", &bound, builder);
        return;
    };

    let p = spec.effective_padding(&bound);
    if p < spec.padding {
        log::debug!(
            "padding {} clamped to {p} for {}x{} bound",
            spec.padding,
            bound.width(),
            bound.height()
        );
    }

    // No room for a visible background: the foreground covers the bound.
    if p == 0.0 {
        draw_layer(builder, foreground, bound, spec.color);
        log_rebuild("foreground", &bound, builder);
        return;
    }

    draw_layer(builder, &spec.background, bound, spec.color);
    draw_layer(builder, foreground, bound.inset(p), spec.color);
    log_rebuild("background+foreground", &bound, builder);
}

fn log_rebuild(layers: &str, bound: &Rect, builder: &MeshBuilder) {
    log::trace!(
        "composite {layers} in {}x{}: {} vertices, {} triangles",
        bound.width(),
        bound.height(),
        builder.vertex_count(),
        builder.triangle_count()
    );
}
