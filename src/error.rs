//! Configuration validation errors.
//!
//! The geometry itself never fails; these are only produced by the checked
//! constructors a host uses to validate user-entered fields.

use core::fmt;

/// A configuration value rejected by a checked constructor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// Corner radius ratio outside `0.0..=0.5`.
    RadiusRatioOutOfRange,
    /// Segments per corner outside `1..=20`.
    SegmentsOutOfRange,
    /// Padding below zero.
    NegativePadding,
    /// NaN or infinite value.
    NonFinite,
    /// Name does not match any [`ScaleType`](crate::ScaleType).
    UnknownScaleType,
}

impl ConfigError {
    /// Static description, also used as the reason in query parse warnings.
    pub fn message(&self) -> &'static str {
        match self {
            Self::RadiusRatioOutOfRange => "radius ratio must be within 0.0..=0.5",
            Self::SegmentsOutOfRange => "segments per corner must be within 1..=20",
            Self::NegativePadding => "padding must not be negative",
            Self::NonFinite => "value must be finite",
            Self::UnknownScaleType => "unknown scale type",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl core::error::Error for ConfigError {}
