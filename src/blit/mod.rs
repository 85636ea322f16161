// ---------------------------------------------------------------------------
// Palette blits (8-bit indices -> 16-bit texels) with SIMD dispatch.
//
// Architecture: #[rite] row functions contain the SIMD loops and fall back
// to the scalar row routines for the pixels left over after the last full
// batch. #[arcane] wrappers expand the palette into lookup tables once per
// call, then either run one contiguous row or loop over strided rows.
// Public functions validate extents, then dispatch via incant! over the
// tiers in `Backend::PREFERENCE`. Bound `Blitter` handles skip detection and
// call their tier directly via `Kernel`; that is the only way to reach the
// x86-64-v3 kernel.
// ---------------------------------------------------------------------------

use archmage::incant;
use archmage::prelude::*;

use crate::{BlitError, Palette};

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "aarch64")]
use neon::*;

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
use wasm::*;


/// Row traversal order for a blit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// `dst[x] = palette[src[x]]`.
    #[default]
    Forward,
    /// Each row is mirrored: `dst[x] = palette[src[width - 1 - x]]`.
    Reversed,
}

// ===========================================================================
// Validation helpers
// ===========================================================================

/// Elements spanned by `height` rows of `width` at `stride`, or `None` when
/// the extent is empty.
#[inline]
fn extent(width: usize, height: usize, stride: usize) -> Result<Option<usize>, BlitError> {
    if width == 0 || height == 0 {
        return Ok(None);
    }
    if width > stride {
        return Err(BlitError::InvalidStride);
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|rows| rows.checked_add(width))
        .map(Some)
        .ok_or(BlitError::DimensionOverflow)
}

#[inline]
fn check_src(len: usize, needed: usize) -> Result<(), BlitError> {
    if len < needed {
        Err(BlitError::SourceTooSmall { needed, actual: len })
    } else {
        Ok(())
    }
}

#[inline]
fn check_dst(len: usize, needed: usize) -> Result<(), BlitError> {
    if len < needed {
        Err(BlitError::DestinationTooSmall { needed, actual: len })
    } else {
        Ok(())
    }
}

/// Pixel count of a tightly packed `width × height` blit, or `None` when
/// there is nothing to do.
#[inline]
fn check_contiguous(
    src_len: usize,
    dst_len: usize,
    width: usize,
    height: usize,
) -> Result<Option<usize>, BlitError> {
    if width == 0 || height == 0 {
        return Ok(None);
    }
    let n = width
        .checked_mul(height)
        .ok_or(BlitError::DimensionOverflow)?;
    check_src(src_len, n)?;
    check_dst(dst_len, n)?;
    Ok(Some(n))
}

#[inline]
fn check_strided(
    src_len: usize,
    dst_len: usize,
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<bool, BlitError> {
    let Some(src_needed) = extent(width, height, src_stride)? else {
        return Ok(false);
    };
    let Some(dst_needed) = extent(width, height, dst_stride)? else {
        return Ok(false);
    };
    check_src(src_len, src_needed)?;
    check_dst(dst_len, dst_needed)?;
    Ok(true)
}

// ===========================================================================
// Bound kernels
// ===========================================================================

/// A capability token fixed at `Blitter` construction. Dispatch is a match
/// on this enum; no feature detection happens per call.
#[derive(Clone, Copy)]
pub(crate) enum Kernel {
    #[cfg(target_arch = "x86_64")]
    V3(X64V3Token),
    #[cfg(target_arch = "aarch64")]
    Neon(NeonToken),
    #[cfg(target_arch = "wasm32")]
    Wasm128(Wasm128Token),
    Scalar(ScalarToken),
}

impl Kernel {
    pub(crate) fn forward(self, palette: &Palette, src: &[u8], dst: &mut [u16]) {
        match self {
            #[cfg(target_arch = "x86_64")]
            Self::V3(t) => forward_impl_v3(t, palette, src, dst),
            #[cfg(target_arch = "aarch64")]
            Self::Neon(t) => forward_impl_neon(t, palette, src, dst),
            #[cfg(target_arch = "wasm32")]
            Self::Wasm128(t) => forward_impl_wasm128(t, palette, src, dst),
            Self::Scalar(t) => forward_impl_scalar(t, palette, src, dst),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn forward_strided(
        self,
        palette: &Palette,
        src: &[u8],
        dst: &mut [u16],
        w: usize,
        h: usize,
        ss: usize,
        ds: usize,
    ) {
        match self {
            #[cfg(target_arch = "x86_64")]
            Self::V3(t) => forward_strided_v3(t, palette, src, dst, w, h, ss, ds),
            #[cfg(target_arch = "aarch64")]
            Self::Neon(t) => forward_strided_neon(t, palette, src, dst, w, h, ss, ds),
            #[cfg(target_arch = "wasm32")]
            Self::Wasm128(t) => forward_strided_wasm128(t, palette, src, dst, w, h, ss, ds),
            Self::Scalar(t) => forward_strided_scalar(t, palette, src, dst, w, h, ss, ds),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn reversed_strided(
        self,
        palette: &Palette,
        src: &[u8],
        dst: &mut [u16],
        w: usize,
        h: usize,
        ss: usize,
        ds: usize,
    ) {
        match self {
            #[cfg(target_arch = "x86_64")]
            Self::V3(t) => reversed_strided_v3(t, palette, src, dst, w, h, ss, ds),
            #[cfg(target_arch = "aarch64")]
            Self::Neon(t) => reversed_strided_neon(t, palette, src, dst, w, h, ss, ds),
            #[cfg(target_arch = "wasm32")]
            Self::Wasm128(t) => reversed_strided_wasm128(t, palette, src, dst, w, h, ss, ds),
            Self::Scalar(t) => reversed_strided_scalar(t, palette, src, dst, w, h, ss, ds),
        }
    }
}

/// Validated entry points shared by `Blitter`. Each returns after validation
/// without touching `dst` when the extent is empty or invalid.
pub(crate) fn run_contiguous(
    kernel: Kernel,
    direction: Direction,
    src: &[u8],
    dst: &mut [u16],
    palette: &Palette,
    width: usize,
    height: usize,
) -> Result<(), BlitError> {
    let Some(n) = check_contiguous(src.len(), dst.len(), width, height)? else {
        return Ok(());
    };
    let (src, dst) = (&src[..n], &mut dst[..n]);
    match direction {
        // Rows are tightly packed, so a forward blit is one long row.
        Direction::Forward => kernel.forward(palette, src, dst),
        Direction::Reversed => {
            kernel.reversed_strided(palette, src, dst, width, height, width, width)
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_strided(
    kernel: Kernel,
    direction: Direction,
    src: &[u8],
    dst: &mut [u16],
    palette: &Palette,
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), BlitError> {
    if !check_strided(src.len(), dst.len(), width, height, src_stride, dst_stride)? {
        return Ok(());
    }
    match direction {
        Direction::Forward => kernel.forward_strided(
            palette, src, dst, width, height, src_stride, dst_stride,
        ),
        Direction::Reversed => kernel.reversed_strided(
            palette, src, dst, width, height, src_stride, dst_stride,
        ),
    }
    Ok(())
}

// ===========================================================================
// Public API — contiguous
// ===========================================================================

/// Look up every index of a `width × height` image in `palette`.
///
/// Rows are tightly packed in both buffers (stride == `width`). Only the
/// first `width × height` elements of `dst` are written. A zero `width` or
/// `height` is a no-op.
pub fn blit_forward(
    src: &[u8],
    dst: &mut [u16],
    palette: &Palette,
    width: usize,
    height: usize,
) -> Result<(), BlitError> {
    let Some(n) = check_contiguous(src.len(), dst.len(), width, height)? else {
        return Ok(());
    };
    let (src, dst) = (&src[..n], &mut dst[..n]);
    incant!(forward_impl(palette, src, dst), [neon, wasm128, scalar]);
    Ok(())
}

/// Like [`blit_forward`], but every row is mirrored horizontally:
/// `dst[y][x] = palette[src[y][width - 1 - x]]`.
///
/// Row order is unchanged; only traversal within each row is reversed.
pub fn blit_reversed(
    src: &[u8],
    dst: &mut [u16],
    palette: &Palette,
    width: usize,
    height: usize,
) -> Result<(), BlitError> {
    let Some(n) = check_contiguous(src.len(), dst.len(), width, height)? else {
        return Ok(());
    };
    let (src, dst) = (&src[..n], &mut dst[..n]);
    incant!(
        reversed_strided(palette, src, dst, width, height, width, width),
        [neon, wasm128, scalar]
    );
    Ok(())
}

/// [`blit_forward`] or [`blit_reversed`], chosen by `direction`.
pub fn blit(
    direction: Direction,
    src: &[u8],
    dst: &mut [u16],
    palette: &Palette,
    width: usize,
    height: usize,
) -> Result<(), BlitError> {
    match direction {
        Direction::Forward => blit_forward(src, dst, palette, width, height),
        Direction::Reversed => blit_reversed(src, dst, palette, width, height),
    }
}

// ===========================================================================
// Public API — strided
// ===========================================================================

/// Forward blit between strided buffers.
///
/// `src_stride` is the distance in bytes (indices) between the starts of
/// consecutive source rows; `dst_stride` is the distance in texels between
/// destination rows. Both must be ≥ `width`. Padding between rows is never
/// read or written.
#[allow(clippy::too_many_arguments)]
pub fn blit_forward_strided(
    src: &[u8],
    dst: &mut [u16],
    palette: &Palette,
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), BlitError> {
    if !check_strided(src.len(), dst.len(), width, height, src_stride, dst_stride)? {
        return Ok(());
    }
    incant!(
        forward_strided(palette, src, dst, width, height, src_stride, dst_stride),
        [neon, wasm128, scalar]
    );
    Ok(())
}

/// Mirrored blit between strided buffers. See [`blit_forward_strided`] for
/// the stride rules.
#[allow(clippy::too_many_arguments)]
pub fn blit_reversed_strided(
    src: &[u8],
    dst: &mut [u16],
    palette: &Palette,
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), BlitError> {
    if !check_strided(src.len(), dst.len(), width, height, src_stride, dst_stride)? {
        return Ok(());
    }
    incant!(
        reversed_strided(palette, src, dst, width, height, src_stride, dst_stride),
        [neon, wasm128, scalar]
    );
    Ok(())
}

/// [`blit_forward_strided`] or [`blit_reversed_strided`], chosen by
/// `direction`.
#[allow(clippy::too_many_arguments)]
pub fn blit_strided(
    direction: Direction,
    src: &[u8],
    dst: &mut [u16],
    palette: &Palette,
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
) -> Result<(), BlitError> {
    match direction {
        Direction::Forward => {
            blit_forward_strided(src, dst, palette, width, height, src_stride, dst_stride)
        }
        Direction::Reversed => {
            blit_reversed_strided(src, dst, palette, width, height, src_stride, dst_stride)
        }
    }
}
