use archmage::prelude::*;

use crate::Palette;

// ===========================================================================
// Scalar row implementations (also the tail path of every SIMD tier)
// ===========================================================================

#[inline(always)]
pub(super) fn forward_row(palette: &Palette, src: &[u8], dst: &mut [u16]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = palette.get(s);
    }
}

#[inline(always)]
pub(super) fn reversed_row(palette: &Palette, src: &[u8], dst: &mut [u16]) {
    for (d, &s) in dst.iter_mut().zip(src.iter().rev()) {
        *d = palette.get(s);
    }
}

// ===========================================================================
// Scalar dispatch targets for incant!
// ===========================================================================

pub(super) fn forward_impl_scalar(_t: ScalarToken, p: &Palette, s: &[u8], d: &mut [u16]) {
    forward_row(p, s, d);
}

#[allow(clippy::too_many_arguments)]
pub(super) fn forward_strided_scalar(
    _t: ScalarToken,
    p: &Palette,
    src: &[u8],
    dst: &mut [u16],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        forward_row(p, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn reversed_strided_scalar(
    _t: ScalarToken,
    p: &Palette,
    src: &[u8],
    dst: &mut [u16],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        reversed_row(p, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}
