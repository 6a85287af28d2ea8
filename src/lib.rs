//! Scale-fit image geometry: draw/UV rect resolution, rounded-corner
//! tessellation, and two-layer compositing into a flat triangle mesh.
//!
//! Pure geometry. No pixel operations, no rendering, `no_std` compatible
//! (needs `alloc` for the mesh buffers). Coordinates are y-up; triangles
//! are wound counter-clockwise.
//!
//! # Modules
//!
//! - [`geometry`]: `Rect`, `Size`, edges, pivots, colors
//! - [`scale`]: the seven scale types and draw/UV resolution
//! - [`tessellate`]: quads and rounded-corner meshes
//! - [`mesh`]: vertex/triangle mesh and its builder
//! - [`composite`]: background + padded foreground pipeline
//! - [`query`]: `key=value` configuration strings
//! - [`svg`]: wireframe rendering for debugging (`svg` feature)
//!
//! # Example
//!
//! ```
//! use zenfit::{CompositeSpec, Layer, Rect, ScaleType, Size, composite};
//!
//! let spec = CompositeSpec::new(Layer::new(Size::new(400.0, 300.0), Rect::UNIT))
//!     .foreground(Layer::new(Size::new(32.0, 32.0), Rect::UNIT).scale_type(ScaleType::Center))
//!     .padding(10.0);
//!
//! let mesh = composite(&spec, Rect::new(0.0, 0.0, 100.0, 100.0));
//! assert_eq!(mesh.triangles.len(), 4);
//! assert!((0..mesh.triangles.len()).all(|t| mesh.signed_area(t) > 0.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod composite;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod query;
pub mod scale;
#[cfg(feature = "svg")]
pub mod svg;
pub mod tessellate;

pub use composite::{CompositeSpec, Layer, composite, composite_into, draw_layer, render_layer};
pub use error::ConfigError;
pub use geometry::{Edges, Pivot, Rect, Rgba, Size};
pub use mesh::{Mesh, MeshBuilder, Vertex};
pub use scale::{Placement, ScaleType, preserve_aspect, resolve};
pub use tessellate::{RoundCorner, tessellate, tessellate_quad};
