use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm_loadu_si128, _mm256_loadu_si256, _mm256_storeu_si256};

use super::scalar::{forward_row, reversed_row};
use crate::Palette;
use crate::palette::Planes;

// ===========================================================================
// SIMD constants
// ===========================================================================

// Byte reversal within each 128-bit lane; a lane swap completes the
// 32-byte reversal.
const LANE_REVERSE_AVX: [i8; 32] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4,
    3, 2, 1, 0,
];

/// The palette as 16 sub-tables of 16 entries, each broadcast to both lanes.
struct Tables {
    lo: [__m256i; 16],
    hi: [__m256i; 16],
}

// ===========================================================================
// x86-64 AVX2 — rite helpers
// ===========================================================================

#[rite]
fn load_tables_v3(_token: X64V3Token, planes: &Planes) -> Tables {
    let mut t = Tables {
        lo: [_mm256_setzero_si256(); 16],
        hi: [_mm256_setzero_si256(); 16],
    };
    for k in 0..16 {
        t.lo[k] = _mm256_broadcastsi128_si256(_mm_loadu_si128(&planes.lo[k]));
        t.hi[k] = _mm256_broadcastsi128_si256(_mm_loadu_si128(&planes.hi[k]));
    }
    t
}

/// Look up 32 indices, returning texels 0..16 and 16..32 as little-endian
/// `u16` vectors.
///
/// `(idx ^ (k << 4)) +sat 0x70` keeps the low nibble and leaves bit 7 clear
/// only when the high nibble of `idx` is `k`, so `vpshufb` on sub-table `k`
/// yields zero for every other lane and the 16 probes can be OR-ed together.
#[rite]
fn lookup_v3(_token: X64V3Token, t: &Tables, idx: __m256i) -> [__m256i; 2] {
    let bias = _mm256_set1_epi8(0x70);
    let mut lo = _mm256_setzero_si256();
    let mut hi = _mm256_setzero_si256();
    for k in 0..16 {
        let group = _mm256_set1_epi8((k << 4) as u8 as i8);
        let sel = _mm256_adds_epu8(_mm256_xor_si256(idx, group), bias);
        lo = _mm256_or_si256(lo, _mm256_shuffle_epi8(t.lo[k], sel));
        hi = _mm256_or_si256(hi, _mm256_shuffle_epi8(t.hi[k], sel));
    }
    // unpack is per lane: a = texels 0..8 | 16..24, b = 8..16 | 24..32
    let a = _mm256_unpacklo_epi8(lo, hi);
    let b = _mm256_unpackhi_epi8(lo, hi);
    [
        _mm256_permute2x128_si256::<0x20>(a, b),
        _mm256_permute2x128_si256::<0x31>(a, b),
    ]
}

// ===========================================================================
// x86-64 AVX2 — rite row implementations
// ===========================================================================

#[rite]
fn forward_row_v3(token: X64V3Token, p: &Palette, t: &Tables, src: &[u8], dst: &mut [u16]) {
    let (blocks, _) = src.as_chunks::<32>();
    let done = blocks.len() * 32;
    let dst_bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut dst[..done]);
    let (halves, _) = dst_bytes.as_chunks_mut::<32>();
    let (pairs, _) = halves.as_chunks_mut::<2>();
    for (s, [d0, d1]) in blocks.iter().zip(pairs.iter_mut()) {
        let [first, second] = lookup_v3(token, t, _mm256_loadu_si256(s));
        _mm256_storeu_si256(d0, first);
        _mm256_storeu_si256(d1, second);
    }
    forward_row(p, &src[done..], &mut dst[done..]);
}

#[rite]
fn reversed_row_v3(token: X64V3Token, p: &Palette, t: &Tables, src: &[u8], dst: &mut [u16]) {
    let reverse = _mm256_loadu_si256(&LANE_REVERSE_AVX);
    // Full batches come from the end of the source row; the leftover head
    // of the source fills the tail of the destination.
    let (head, blocks) = src.as_rchunks::<32>();
    let done = blocks.len() * 32;
    let dst_bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut dst[..done]);
    let (halves, _) = dst_bytes.as_chunks_mut::<32>();
    let (pairs, _) = halves.as_chunks_mut::<2>();
    for (s, [d0, d1]) in blocks.iter().rev().zip(pairs.iter_mut()) {
        let v = _mm256_shuffle_epi8(_mm256_loadu_si256(s), reverse);
        let v = _mm256_permute4x64_epi64::<0x4E>(v);
        let [first, second] = lookup_v3(token, t, v);
        _mm256_storeu_si256(d0, first);
        _mm256_storeu_si256(d1, second);
    }
    reversed_row(p, head, &mut dst[done..]);
}

// ===========================================================================
// x86-64 arcane wrappers
// ===========================================================================

#[arcane]
pub(super) fn forward_impl_v3(t: X64V3Token, p: &Palette, s: &[u8], d: &mut [u16]) {
    let tables = load_tables_v3(t, &p.planes());
    forward_row_v3(t, p, &tables, s, d);
}

#[arcane]
#[allow(clippy::too_many_arguments)]
pub(super) fn forward_strided_v3(
    t: X64V3Token,
    p: &Palette,
    src: &[u8],
    dst: &mut [u16],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    let tables = load_tables_v3(t, &p.planes());
    for y in 0..h {
        forward_row_v3(t, p, &tables, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}

#[arcane]
#[allow(clippy::too_many_arguments)]
pub(super) fn reversed_strided_v3(
    t: X64V3Token,
    p: &Palette,
    src: &[u8],
    dst: &mut [u16],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    let tables = load_tables_v3(t, &p.planes());
    for y in 0..h {
        reversed_row_v3(t, p, &tables, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}
