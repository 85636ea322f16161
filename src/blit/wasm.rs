use core::arch::wasm32::{i8x16_swizzle, u8x16_shuffle, u8x16_splat, v128, v128_or, v128_xor};

use archmage::prelude::*;
use safe_unaligned_simd::wasm32::{v128_load, v128_store};

use super::scalar::{forward_row, reversed_row};
use crate::Palette;
use crate::palette::Planes;

struct Tables {
    lo: [v128; 16],
    hi: [v128; 16],
}

// ===========================================================================
// WASM SIMD128 — rite helpers
// ===========================================================================

#[rite]
fn load_tables_wasm128(_token: Wasm128Token, planes: &Planes) -> Tables {
    let mut t = Tables {
        lo: [u8x16_splat(0); 16],
        hi: [u8x16_splat(0); 16],
    };
    for k in 0..16 {
        t.lo[k] = v128_load(&planes.lo[k]);
        t.hi[k] = v128_load(&planes.hi[k]);
    }
    t
}

/// Look up 16 indices, returning texels 0..8 and 8..16.
///
/// `swizzle` zeroes every lane whose selector is ≥ 16, and `idx ^ (k << 4)`
/// is < 16 only when the high nibble of `idx` is `k`.
#[rite]
fn lookup_wasm128(_token: Wasm128Token, t: &Tables, idx: v128) -> [v128; 2] {
    let mut lo = u8x16_splat(0);
    let mut hi = u8x16_splat(0);
    for k in 0..16 {
        let sel = v128_xor(idx, u8x16_splat((k << 4) as u8));
        lo = v128_or(lo, i8x16_swizzle(t.lo[k], sel));
        hi = v128_or(hi, i8x16_swizzle(t.hi[k], sel));
    }
    [
        u8x16_shuffle::<0, 16, 1, 17, 2, 18, 3, 19, 4, 20, 5, 21, 6, 22, 7, 23>(lo, hi),
        u8x16_shuffle::<8, 24, 9, 25, 10, 26, 11, 27, 12, 28, 13, 29, 14, 30, 15, 31>(lo, hi),
    ]
}

// ===========================================================================
// WASM SIMD128 — rite row implementations
// ===========================================================================

#[rite]
fn forward_row_wasm128(token: Wasm128Token, p: &Palette, t: &Tables, src: &[u8], dst: &mut [u16]) {
    let (blocks, _) = src.as_chunks::<16>();
    let done = blocks.len() * 16;
    let dst_bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut dst[..done]);
    let (halves, _) = dst_bytes.as_chunks_mut::<16>();
    let (pairs, _) = halves.as_chunks_mut::<2>();
    for (s, [d0, d1]) in blocks.iter().zip(pairs.iter_mut()) {
        let [first, second] = lookup_wasm128(token, t, v128_load(s));
        v128_store(d0, first);
        v128_store(d1, second);
    }
    forward_row(p, &src[done..], &mut dst[done..]);
}

#[rite]
fn reversed_row_wasm128(token: Wasm128Token, p: &Palette, t: &Tables, src: &[u8], dst: &mut [u16]) {
    let (head, blocks) = src.as_rchunks::<16>();
    let done = blocks.len() * 16;
    let dst_bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut dst[..done]);
    let (halves, _) = dst_bytes.as_chunks_mut::<16>();
    let (pairs, _) = halves.as_chunks_mut::<2>();
    for (s, [d0, d1]) in blocks.iter().rev().zip(pairs.iter_mut()) {
        let v = v128_load(s);
        let idx = u8x16_shuffle::<15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0>(v, v);
        let [first, second] = lookup_wasm128(token, t, idx);
        v128_store(d0, first);
        v128_store(d1, second);
    }
    reversed_row(p, head, &mut dst[done..]);
}

// ===========================================================================
// WASM arcane wrappers
// ===========================================================================

#[arcane]
pub(super) fn forward_impl_wasm128(t: Wasm128Token, p: &Palette, s: &[u8], d: &mut [u16]) {
    let tables = load_tables_wasm128(t, &p.planes());
    forward_row_wasm128(t, p, &tables, s, d);
}

#[arcane]
#[allow(clippy::too_many_arguments)]
pub(super) fn forward_strided_wasm128(
    t: Wasm128Token,
    p: &Palette,
    src: &[u8],
    dst: &mut [u16],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    let tables = load_tables_wasm128(t, &p.planes());
    for y in 0..h {
        forward_row_wasm128(t, p, &tables, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}

#[arcane]
#[allow(clippy::too_many_arguments)]
pub(super) fn reversed_strided_wasm128(
    t: Wasm128Token,
    p: &Palette,
    src: &[u8],
    dst: &mut [u16],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    let tables = load_tables_wasm128(t, &p.planes());
    for y in 0..h {
        reversed_row_wasm128(t, p, &tables, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}
