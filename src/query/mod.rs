//! Query-string configuration for a [`CompositeSpec`].
//!
//! Parses strings like `?bg.w=512&bg.h=512&fg.scale=fit_center&padding=8`
//! into a spec plus non-fatal warnings. Layer keys take a `bg.` or `fg.`
//! prefix; unprefixed layer keys go to the background. Any recognized
//! `fg.` key makes the foreground present.
//!
//! | key | value |
//! |-----|-------|
//! | `scale` | scale type name, e.g. `center_crop`, `FitXY` |
//! | `round` | `true`/`false`/`1`/`0`/`yes`/`no`/`on`/`off` |
//! | `radius` | corner radius ratio; implies `round=true` unless given |
//! | `segments` | triangles per corner |
//! | `w`, `h` | content size in pixels |
//! | `uv` | `x0,y0,x1,y1` |
//! | `padding` | foreground inset in pixels |
//! | `color` | `rgb`, `rgba`, `rrggbb` or `rrggbbaa` hex, `#` optional |
//!
//! Out-of-range numbers are kept (the engine clamps them at use time) but
//! reported as [`ParseWarning::ValueInvalid`].
//!
//! # Example
//!
//! ```
//! use zenfit::{Rect, ScaleType, query};
//!
//! let result = query::parse("bg.w=512&bg.h=512&fg.w=64&fg.h=32&fg.scale=fit_center&padding=8");
//! assert!(result.warnings.is_empty());
//!
//! let fg = result.spec.foreground.expect("foreground present");
//! assert_eq!(fg.scale_type, ScaleType::FitCenter);
//!
//! let mesh = zenfit::composite(&result.spec, Rect::new(0.0, 0.0, 200.0, 100.0));
//! assert_eq!(mesh.vertices.len(), 8);
//! ```

mod parse;

use alloc::string::String;
use alloc::vec::Vec;

use crate::composite::CompositeSpec;

/// Result of parsing a configuration query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub spec: CompositeSpec,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value is unusable or out of range.
    ValueInvalid {
        key: String,
        value: String,
        reason: &'static str,
    },
}

/// Parse a configuration query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let (spec, warnings) = parse::parse_query(query);
    if !warnings.is_empty() {
        log::debug!("query parsed with {} warning(s)", warnings.len());
    }
    ParseResult { spec, warnings }
}
