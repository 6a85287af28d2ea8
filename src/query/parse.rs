//! Query string tokenizer and value parsers.

use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use crate::composite::{CompositeSpec, Layer};
use crate::geometry::{Rect, Rgba, Size};
use crate::scale::ScaleType;
use crate::tessellate::{MIN_SEGMENTS, RoundCorner};

/// Layer fields seen so far; `None` = not given.
#[derive(Default)]
struct LayerKeys {
    scale_type: Option<ScaleType>,
    round: Option<bool>,
    radius: Option<f32>,
    segments: Option<u32>,
    width: Option<f32>,
    height: Option<f32>,
    uv: Option<Rect>,
}

impl LayerKeys {
    fn into_layer(self) -> Layer {
        let defaults = RoundCorner::default();
        Layer {
            content: Size::new(self.width.unwrap_or(0.0), self.height.unwrap_or(0.0)),
            uv: self.uv.unwrap_or(Rect::UNIT),
            scale_type: self.scale_type.unwrap_or_default(),
            round_corner: RoundCorner {
                enabled: self.round.unwrap_or(self.radius.is_some()),
                radius_ratio: self.radius.unwrap_or(defaults.radius_ratio),
                segments: self.segments.unwrap_or(defaults.segments),
            },
        }
    }
}

#[derive(Default)]
struct QueryKeys {
    background: LayerKeys,
    foreground: LayerKeys,
    has_foreground: bool,
    padding: Option<f32>,
    color: Option<Rgba>,
}

/// Parse a query string into a spec + warnings.
pub(crate) fn parse_query(query: &str) -> (CompositeSpec, Vec<ParseWarning>) {
    let mut keys = QueryKeys::default();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(raw_key).to_ascii_lowercase();
        let value = percent_decode(raw_value);

        dispatch_key(&key, &value, &mut keys, &mut warnings);
    }

    let foreground = keys.foreground.into_layer();
    let mut spec = CompositeSpec::new(keys.background.into_layer());
    if keys.has_foreground {
        spec = spec.foreground(foreground);
    }
    if let Some(padding) = keys.padding {
        spec = spec.padding(padding);
    }
    if let Some(color) = keys.color {
        spec = spec.color(color);
    }
    (spec, warnings)
}

fn dispatch_key(key: &str, value: &str, keys: &mut QueryKeys, warnings: &mut Vec<ParseWarning>) {
    match key {
        "padding" => match parse_f32(value) {
            Some(p) => {
                if let Err(e) = CompositeSpec::default().try_padding(p) {
                    invalid(warnings, key, value, e.message());
                }
                set_or_warn(&mut keys.padding, Some(p), key, value, warnings);
            }
            None => invalid(warnings, key, value, "expected a finite number"),
        },
        "color" | "tint" => match parse_color(value) {
            Some(c) => set_or_warn(&mut keys.color, Some(c), key, value, warnings),
            None => invalid(warnings, key, value, "expected rgb|rgba|rrggbb|rrggbbaa hex"),
        },
        _ => {
            let (layer, name, foreground) = match key.strip_prefix("fg.") {
                Some(name) => (&mut keys.foreground, name, true),
                None => (
                    &mut keys.background,
                    key.strip_prefix("bg.").unwrap_or(key),
                    false,
                ),
            };
            if dispatch_layer_key(name, key, value, layer, warnings) {
                keys.has_foreground |= foreground;
            } else {
                warnings.push(ParseWarning::KeyNotRecognized {
                    key: String::from(key),
                    value: String::from(value),
                });
            }
        }
    }
}

/// Returns false when `name` is not a layer key.
fn dispatch_layer_key(
    name: &str,
    key: &str,
    value: &str,
    layer: &mut LayerKeys,
    warnings: &mut Vec<ParseWarning>,
) -> bool {
    match name {
        "scale" | "scaletype" => match value.parse::<ScaleType>() {
            Ok(t) => set_or_warn(&mut layer.scale_type, Some(t), key, value, warnings),
            Err(_) => invalid(
                warnings,
                key,
                value,
                "expected center|center_crop|center_inside|fit_center|fit_start|fit_end|fit_xy",
            ),
        },
        "round" => match parse_bool(value) {
            Some(b) => set_or_warn(&mut layer.round, Some(b), key, value, warnings),
            None => invalid(warnings, key, value, "expected true|false|1|0|yes|no|on|off"),
        },
        "radius" => match parse_f32(value) {
            Some(r) => {
                if let Err(e) = RoundCorner::try_new(r, MIN_SEGMENTS) {
                    invalid(warnings, key, value, e.message());
                }
                set_or_warn(&mut layer.radius, Some(r), key, value, warnings);
            }
            None => invalid(warnings, key, value, "expected a finite number"),
        },
        "segments" => match value.trim().parse::<u32>() {
            Ok(s) => {
                if let Err(e) = RoundCorner::try_new(0.0, s) {
                    invalid(warnings, key, value, e.message());
                }
                set_or_warn(&mut layer.segments, Some(s), key, value, warnings);
            }
            Err(_) => invalid(warnings, key, value, "expected a whole number"),
        },
        "w" | "width" => match parse_dimension(value) {
            Some(w) => set_or_warn(&mut layer.width, Some(w), key, value, warnings),
            None => invalid(warnings, key, value, "expected a non-negative number"),
        },
        "h" | "height" => match parse_dimension(value) {
            Some(h) => set_or_warn(&mut layer.height, Some(h), key, value, warnings),
            None => invalid(warnings, key, value, "expected a non-negative number"),
        },
        "uv" => match parse_rect(value) {
            Some(r) => set_or_warn(&mut layer.uv, Some(r), key, value, warnings),
            None => invalid(warnings, key, value, "expected x0,y0,x1,y1 (4 numbers)"),
        },
        _ => return false,
    }
    true
}

/// Set a field, warning on duplicate.
fn set_or_warn<T>(
    field: &mut Option<T>,
    parsed: Option<T>,
    key: &str,
    value: &str,
    warnings: &mut Vec<ParseWarning>,
) {
    if let Some(v) = parsed {
        if field.is_some() {
            warnings.push(ParseWarning::DuplicateKey {
                key: String::from(key),
                value: String::from(value),
            });
        }
        *field = Some(v);
    }
}

fn invalid(warnings: &mut Vec<ParseWarning>, key: &str, value: &str, reason: &'static str) {
    warnings.push(ParseWarning::ValueInvalid {
        key: String::from(key),
        value: String::from(value),
        reason,
    });
}

// ---- Value parsers ----

fn parse_f32(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_dimension(s: &str) -> Option<f32> {
    parse_f32(s).filter(|&v| v >= 0.0)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Four comma-separated numbers, optionally wrapped in parens.
fn parse_rect(s: &str) -> Option<Rect> {
    let s = s.trim().trim_start_matches('(').trim_end_matches(')');
    let mut parts = s.split(',').map(parse_f32);
    let x0 = parts.next()??;
    let y0 = parts.next()??;
    let x1 = parts.next()??;
    let y1 = parts.next()??;
    if parts.next().is_some() {
        return None;
    }
    Some(Rect::new(x0, y0, x1, y1))
}

/// Hex color: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`; `#` optional.
fn parse_color(s: &str) -> Option<Rgba> {
    let s = s.trim();
    let hex = s.strip_prefix('#').unwrap_or(s).as_bytes();
    let digits = hex
        .iter()
        .map(|&b| hex_digit(b))
        .collect::<Option<Vec<u8>>>()?;

    match digits.len() {
        3 | 4 => {
            let n = |i: usize| digits.get(i).map_or(0xFF, |&d| d << 4 | d);
            Some(Rgba::new(n(0), n(1), n(2), n(3)))
        }
        6 | 8 => {
            let b = |i: usize| digits.get(2 * i..2 * i + 2).map_or(0xFF, |p| p[0] << 4 | p[1]);
            Some(Rgba::new(b(0), b(1), b(2), b(3)))
        }
        _ => None,
    }
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
/// Malformed escapes pass through; invalid UTF-8 is replaced.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_invalid(warnings: &[ParseWarning], name: &str) -> bool {
        warnings
            .iter()
            .any(|w| matches!(w, ParseWarning::ValueInvalid { key, .. } if key == name))
    }

    // ── layers ──────────────────────────────────────────────────────────

    #[test]
    fn empty_query_is_default() {
        let (spec, warnings) = parse_query("");
        assert_eq!(spec, CompositeSpec::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn background_keys() {
        let (spec, warnings) = parse_query("bg.w=640&bg.h=480&bg.scale=fit_xy&bg.uv=0,0.5,0.5,1");
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(spec.background.content, Size::new(640.0, 480.0));
        assert_eq!(spec.background.scale_type, ScaleType::FitXY);
        assert_eq!(spec.background.uv, Rect::new(0.0, 0.5, 0.5, 1.0));
        assert!(spec.foreground.is_none());
    }

    #[test]
    fn unprefixed_keys_go_to_background() {
        let (spec, _) = parse_query("width=100&height=50&scale=Center");
        assert_eq!(spec.background.content, Size::new(100.0, 50.0));
        assert_eq!(spec.background.scale_type, ScaleType::Center);
    }

    #[test]
    fn any_fg_key_adds_foreground() {
        let (spec, _) = parse_query("fg.scale=fitend");
        let fg = spec.foreground.expect("foreground");
        assert_eq!(fg.scale_type, ScaleType::FitEnd);
        assert_eq!(fg.content, Size::ZERO);
    }

    #[test]
    fn round_corner_keys() {
        let (spec, _) = parse_query("fg.radius=0.3&fg.segments=9&bg.round=on");
        let fg = spec.foreground.expect("foreground");
        assert_eq!(fg.round_corner, RoundCorner::new(0.3, 9));
        assert!(spec.background.round_corner.enabled);
        assert_eq!(spec.background.round_corner.radius_ratio, 0.25);
    }

    #[test]
    fn explicit_round_off_wins_over_radius() {
        let (spec, _) = parse_query("radius=0.4&round=false");
        assert!(!spec.background.round_corner.enabled);
        assert_eq!(spec.background.round_corner.radius_ratio, 0.4);
    }

    // ── composite keys ──────────────────────────────────────────────────

    #[test]
    fn padding_and_color() {
        let (spec, warnings) = parse_query("padding=12.5&color=%23ff000080");
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(spec.padding, 12.5);
        assert_eq!(spec.color, Rgba::new(255, 0, 0, 128));
    }

    #[test]
    fn short_hex_colors() {
        assert_eq!(parse_color("f00"), Some(Rgba::new(255, 0, 0, 255)));
        assert_eq!(parse_color("#0f08"), Some(Rgba::new(0, 255, 0, 136)));
        assert_eq!(parse_color("123456"), Some(Rgba::new(0x12, 0x34, 0x56, 255)));
        assert_eq!(parse_color("12345"), None);
        assert_eq!(parse_color("red"), None);
    }

    // ── warnings ────────────────────────────────────────────────────────

    #[test]
    fn out_of_range_values_kept_with_warning() {
        let (spec, warnings) = parse_query("fg.radius=0.9&fg.segments=64&padding=-3");
        let fg = spec.foreground.expect("foreground");
        assert_eq!(fg.round_corner.radius_ratio, 0.9);
        assert_eq!(fg.round_corner.segments, 64);
        assert_eq!(spec.padding, -3.0);
        assert!(has_invalid(&warnings, "fg.radius"));
        assert!(has_invalid(&warnings, "fg.segments"));
        assert!(has_invalid(&warnings, "padding"));
    }

    #[test]
    fn unparseable_values_warn_and_are_ignored() {
        let (spec, warnings) = parse_query("w=abc&h=-5&scale=zoom&uv=1,2,3&padding=NaN");
        assert_eq!(spec, CompositeSpec::default());
        for key in ["w", "h", "scale", "uv", "padding"] {
            assert!(has_invalid(&warnings, key), "{key}: {warnings:?}");
        }
    }

    #[test]
    fn unknown_key_warns() {
        let (_, warnings) = parse_query("w=800&fg.foobar=baz");
        assert!(warnings.iter().any(|w| matches!(
            w,
            ParseWarning::KeyNotRecognized { key, .. } if key == "fg.foobar"
        )));
    }

    #[test]
    fn unknown_fg_key_does_not_add_foreground() {
        let (spec, _) = parse_query("fg.foobar=1");
        assert!(spec.foreground.is_none());
    }

    #[test]
    fn duplicate_key_warns_last_wins() {
        let (spec, warnings) = parse_query("padding=4&padding=6");
        assert_eq!(spec.padding, 6.0);
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ParseWarning::DuplicateKey { .. }))
        );
    }

    // ── tokenizer ───────────────────────────────────────────────────────

    #[test]
    fn keys_case_insensitive_and_question_mark_stripped() {
        let (spec, warnings) = parse_query("?BG.W=10&Fg.H=20");
        assert!(warnings.is_empty());
        assert_eq!(spec.background.content.width, 10.0);
        assert_eq!(spec.foreground.map(|l| l.content.height), Some(20.0));
    }

    #[test]
    fn percent_decoding() {
        assert_eq!(percent_decode("a%2Cb+c"), "a,b c");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%C3%A9"), "é");
    }

    #[test]
    fn uv_accepts_parens() {
        assert_eq!(parse_rect("(0, 0, 0.5, 1)"), Some(Rect::new(0.0, 0.0, 0.5, 1.0)));
        assert_eq!(parse_rect("0,0,1,1,1"), None);
    }
}
