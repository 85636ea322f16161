use core::fmt;

use crate::Backend;

/// Why a blit (or backend binding) was refused.
///
/// Blits validate their extents once per call, before any pixel is touched,
/// so a refused call leaves the destination unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlitError {
    /// The source holds fewer indices than the extents require.
    SourceTooSmall { needed: usize, actual: usize },
    /// The destination holds fewer texels than the extents require.
    DestinationTooSmall { needed: usize, actual: usize },
    /// A row stride is shorter than the row width.
    InvalidStride,
    /// `width × height` (or the strided extent) does not fit in `usize`.
    DimensionOverflow,
    /// Source and destination images disagree on width or height.
    DimensionMismatch,
    /// A palette slice did not have exactly 256 entries.
    PaletteLength(usize),
    /// The requested backend is not supported by this CPU.
    BackendUnavailable(Backend),
    /// No backend at all could be bound.
    NoBackend,
}

impl fmt::Display for BlitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceTooSmall { needed, actual } => {
                write!(f, "source too small: need {needed} indices, have {actual}")
            }
            Self::DestinationTooSmall { needed, actual } => {
                write!(f, "destination too small: need {needed} texels, have {actual}")
            }
            Self::InvalidStride => f.write_str("stride is shorter than the row width"),
            Self::DimensionOverflow => f.write_str("image extent overflows usize"),
            Self::DimensionMismatch => {
                f.write_str("source and destination dimensions differ")
            }
            Self::PaletteLength(len) => {
                write!(f, "palette must have 256 entries, got {len}")
            }
            Self::BackendUnavailable(backend) => {
                write!(f, "{backend} backend is not available on this CPU")
            }
            Self::NoBackend => f.write_str("no blit backend could be bound"),
        }
    }
}

impl core::error::Error for BlitError {}
