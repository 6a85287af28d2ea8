//! Scale-fit resolution: where content lands inside a bound, and which part
//! of its UV rectangle is sampled.
//!
//! Pure geometry, no allocations. Aspect ratios are compared by exact
//! cross-multiplication in `f64`, so "same aspect" is an exact test and no
//! branch divides by a bound dimension.
//!
//! # Example
//!
//! ```
//! use zenfit::{Rect, ScaleType, Size, resolve};
//!
//! // Square content into a 2:1 bound: CenterCrop keeps the bound and
//! // samples the middle half of the texture vertically.
//! let p = resolve(
//!     Rect::new(0.0, 0.0, 200.0, 100.0),
//!     Size::new(100.0, 100.0),
//!     Rect::UNIT,
//!     ScaleType::CenterCrop,
//! );
//! assert_eq!(p.draw, Rect::new(0.0, 0.0, 200.0, 100.0));
//! assert_eq!(p.uv, Rect::new(0.0, 0.25, 1.0, 0.75));
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::error::ConfigError;
use crate::geometry::{Pivot, Rect, Size};

/// How content is reconciled with the bound it is drawn into.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScaleType {
    /// Native pixel size, centered. Smaller content is inset; larger
    /// content is cropped symmetrically in UV space.
    Center,

    /// Native pixel size, centered, never cropped. Content larger than the
    /// bound on either axis is uniformly downscaled until it fits.
    /// Never upscales.
    CenterInside,

    /// Fill the bound exactly, preserving aspect ratio by cropping the
    /// sampled UV symmetrically on the overflowing axis.
    #[default]
    CenterCrop,

    /// Stretch to the bound on both axes, ignoring aspect ratio.
    FitXY,

    /// Largest aspect-preserving size that fits, centered.
    /// Upscales or downscales as needed.
    FitCenter,

    /// Like [`FitCenter`](Self::FitCenter), aligned left / bottom.
    FitStart,

    /// Like [`FitCenter`](Self::FitCenter), aligned right / top.
    FitEnd,
}

impl ScaleType {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Center,
        Self::CenterInside,
        Self::CenterCrop,
        Self::FitXY,
        Self::FitCenter,
        Self::FitStart,
        Self::FitEnd,
    ];

    /// Canonical snake_case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::CenterInside => "center_inside",
            Self::CenterCrop => "center_crop",
            Self::FitXY => "fit_xy",
            Self::FitCenter => "fit_center",
            Self::FitStart => "fit_start",
            Self::FitEnd => "fit_end",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScaleType {
    type Err = ConfigError;

    /// Case-insensitive; `_` and `-` are ignored, so `center_crop`,
    /// `CenterCrop` and `center-crop` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| loose_eq(s, t.name()))
            .ok_or(ConfigError::UnknownScaleType)
    }
}

fn loose_eq(input: &str, canonical: &str) -> bool {
    fn strip(s: &str) -> impl Iterator<Item = u8> + '_ {
        s.bytes()
            .filter(|b| *b != b'_' && *b != b'-')
            .map(|b| b.to_ascii_lowercase())
    }
    strip(input).eq(strip(canonical))
}

/// Result of scale-fit resolution.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Box the content occupies, always inside the bound.
    pub draw: Rect,
    /// Part of the input UV rect mapped onto `draw`.
    pub uv: Rect,
}

/// Resolve where `content` is drawn inside `bound` and which part of `uv`
/// it samples.
///
/// Empty content returns `(bound, uv)` unchanged. When bound and content
/// have exactly the same aspect ratio, every aspect-dependent adjustment
/// is skipped.
pub fn resolve(bound: Rect, content: Size, uv: Rect, scale_type: ScaleType) -> Placement {
    if content.is_empty() {
        return Placement { draw: bound, uv };
    }
    match scale_type {
        ScaleType::Center => center(bound, content, uv),
        ScaleType::CenterInside => center_inside(bound, content, uv),
        ScaleType::CenterCrop => center_crop(bound, content, uv),
        ScaleType::FitXY => Placement { draw: bound, uv },
        ScaleType::FitCenter => Placement {
            draw: fit_inside(bound, content, Anchor::Center),
            uv,
        },
        ScaleType::FitStart => Placement {
            draw: fit_inside(bound, content, Anchor::Start),
            uv,
        },
        ScaleType::FitEnd => Placement {
            draw: fit_inside(bound, content, Anchor::End),
            uv,
        },
    }
}

/// Shrink `bound` to the aspect ratio of `content`.
///
/// The leftover space on the shrunk axis is distributed by `pivot`:
/// `0.0` keeps the start edge, `1.0` keeps the end edge. Empty content or
/// an empty bound returns the bound unchanged.
pub fn preserve_aspect(bound: Rect, content: Size, pivot: Pivot) -> Rect {
    if content.is_empty() || bound.is_empty() {
        return bound;
    }
    let bs = bound.size();
    match compare_aspect(bs, content) {
        // Content wider: keep width, shrink height.
        Ordering::Less => {
            let h = (bs.width as f64 * content.height as f64 / content.width as f64) as f32;
            let y0 = bound.y0 + (bs.height - h) * pivot.y;
            Rect::new(bound.x0, y0, bound.x1, y0 + h)
        }
        Ordering::Greater => {
            let w = (bs.height as f64 * content.width as f64 / content.height as f64) as f32;
            let x0 = bound.x0 + (bs.width - w) * pivot.x;
            Rect::new(x0, bound.y0, x0 + w, bound.y1)
        }
        Ordering::Equal => bound,
    }
}

// ============================================================================
// Per-policy geometry
// ============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Anchor {
    Start,
    Center,
    End,
}

/// Compare the aspect ratio of `bound` against `content`.
///
/// `Greater` = bound is wider than content, `Less` = bound is taller.
/// Products of two `f32`s are exact in `f64`. NaN compares as `Equal`,
/// which skips every adjustment.
fn compare_aspect(bound: Size, content: Size) -> Ordering {
    let cross_b = bound.width as f64 * content.height as f64;
    let cross_c = content.width as f64 * bound.height as f64;
    cross_b.partial_cmp(&cross_c).unwrap_or(Ordering::Equal)
}

/// Non-negative bound extent; inverted bounds behave as zero-area.
fn bound_size(bound: &Rect) -> Size {
    Size::new(bound.width().max(0.0), bound.height().max(0.0))
}

fn center(bound: Rect, content: Size, uv: Rect) -> Placement {
    let bs = bound_size(&bound);
    let (x0, x1, u0, u1) = native_1d(
        (bound.x0, bound.x1),
        (uv.x0, uv.x1),
        bs.width,
        content.width,
    );
    let (y0, y1, v0, v1) = native_1d(
        (bound.y0, bound.y1),
        (uv.y0, uv.y1),
        bs.height,
        content.height,
    );
    Placement {
        draw: Rect::new(x0, y0, x1, y1),
        uv: Rect::new(u0, v0, u1, v1),
    }
}

/// One axis of [`ScaleType::Center`]: inset the draw span when content is
/// smaller than the bound, crop the UV span when it is larger.
fn native_1d(
    draw: (f32, f32),
    uv: (f32, f32),
    extent: f32,
    content: f32,
) -> (f32, f32, f32, f32) {
    if extent > content {
        let offset = (extent - content) * 0.5;
        (draw.0 + offset, draw.1 - offset, uv.0, uv.1)
    } else if content > extent {
        let ratio = ((content - extent) as f64 * 0.5 / content as f64) as f32;
        let (u0, u1) = crop_1d(uv, ratio);
        (draw.0, draw.1, u0, u1)
    } else {
        (draw.0, draw.1, uv.0, uv.1)
    }
}

fn center_inside(bound: Rect, content: Size, uv: Rect) -> Placement {
    let bs = bound_size(&bound);
    let draw = if content.width > bs.width || content.height > bs.height {
        fit_inside(bound, content, Anchor::Center)
    } else {
        bound.inset_xy(
            (bs.width - content.width) * 0.5,
            (bs.height - content.height) * 0.5,
        )
    };
    Placement { draw, uv }
}

fn center_crop(bound: Rect, content: Size, uv: Rect) -> Placement {
    let bs = bound_size(&bound);
    let (cw, ch) = (content.width as f64, content.height as f64);
    let (bw, bh) = (bs.width as f64, bs.height as f64);
    let uv = match compare_aspect(bs, content) {
        // Content wider than bound: crop width. bh > 0 on this branch.
        Ordering::Less => {
            let visible = ch * bw / bh;
            let ratio = ((cw - visible) * 0.5 / cw) as f32;
            let (u0, u1) = crop_1d((uv.x0, uv.x1), ratio);
            Rect::new(u0, uv.y0, u1, uv.y1)
        }
        // Content taller than bound: crop height. bw > 0 on this branch.
        Ordering::Greater => {
            let visible = cw * bh / bw;
            let ratio = ((ch - visible) * 0.5 / ch) as f32;
            let (v0, v1) = crop_1d((uv.y0, uv.y1), ratio);
            Rect::new(uv.x0, v0, uv.x1, v1)
        }
        Ordering::Equal => uv,
    };
    Placement { draw: bound, uv }
}

/// Largest box with the content's aspect ratio inside `bound`, placed on the
/// shrunk axis by `anchor`. The limiting axis keeps the bound's edges.
fn fit_inside(bound: Rect, content: Size, anchor: Anchor) -> Rect {
    let bs = bound_size(&bound);
    let (cw, ch) = (content.width as f64, content.height as f64);
    match compare_aspect(bs, content) {
        Ordering::Greater => {
            let w = bs.height as f64 * cw / ch;
            let slack = ((bs.width as f64 - w).max(0.0)) as f32;
            let (x0, x1) = place_1d(bound.x0, bound.x1, slack, anchor);
            Rect::new(x0, bound.y0, x1, bound.y1)
        }
        Ordering::Less => {
            let h = bs.width as f64 * ch / cw;
            let slack = ((bs.height as f64 - h).max(0.0)) as f32;
            let (y0, y1) = place_1d(bound.y0, bound.y1, slack, anchor);
            Rect::new(bound.x0, y0, bound.x1, y1)
        }
        Ordering::Equal => bound,
    }
}

/// Remove `slack` from the span `[lo, hi]`, keeping the edge(s) `anchor` names.
fn place_1d(lo: f32, hi: f32, slack: f32, anchor: Anchor) -> (f32, f32) {
    match anchor {
        Anchor::Start => (lo, hi - slack),
        Anchor::Center => (lo + slack * 0.5, hi - slack * 0.5),
        Anchor::End => (lo + slack, hi),
    }
}

/// Move both ends of a UV span inward by `ratio` of its length.
fn crop_1d(span: (f32, f32), ratio: f32) -> (f32, f32) {
    let offset = ratio.max(0.0).min(0.5) * (span.1 - span.0);
    (span.0 + offset, span.1 - offset)
}
