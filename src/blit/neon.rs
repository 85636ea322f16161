use core::arch::aarch64::{
    uint8x16_t, uint8x16x4_t, vdupq_n_u8, vextq_u8, vqtbl4q_u8, vqtbx4q_u8, vrev64q_u8,
    vsubq_u8, vzip1q_u8, vzip2q_u8,
};

use archmage::prelude::*;
use safe_unaligned_simd::aarch64::{vld1q_u8, vst1q_u8};

use super::scalar::{forward_row, reversed_row};
use crate::Palette;
use crate::palette::Planes;

/// The palette as four 64-entry `tbl` quads per byte plane.
struct Tables {
    lo: [uint8x16x4_t; 4],
    hi: [uint8x16x4_t; 4],
}

// ===========================================================================
// ARM NEON — rite helpers
// ===========================================================================

#[rite]
fn quad_neon(_token: NeonToken, rows: &[[u8; 16]]) -> uint8x16x4_t {
    uint8x16x4_t(
        vld1q_u8(&rows[0]),
        vld1q_u8(&rows[1]),
        vld1q_u8(&rows[2]),
        vld1q_u8(&rows[3]),
    )
}

#[rite]
fn load_tables_neon(token: NeonToken, planes: &Planes) -> Tables {
    Tables {
        lo: [
            quad_neon(token, &planes.lo[0..4]),
            quad_neon(token, &planes.lo[4..8]),
            quad_neon(token, &planes.lo[8..12]),
            quad_neon(token, &planes.lo[12..16]),
        ],
        hi: [
            quad_neon(token, &planes.hi[0..4]),
            quad_neon(token, &planes.hi[4..8]),
            quad_neon(token, &planes.hi[8..12]),
            quad_neon(token, &planes.hi[12..16]),
        ],
    }
}

// tbl zeroes out-of-range lanes and tbx leaves them alone; wrapping the
// index down by 64 per quad lands each lane in range exactly once.
#[rite]
fn lookup_plane_neon(_token: NeonToken, quads: &[uint8x16x4_t; 4], idx: uint8x16_t) -> uint8x16_t {
    let step = vdupq_n_u8(64);
    let idx1 = vsubq_u8(idx, step);
    let idx2 = vsubq_u8(idx1, step);
    let idx3 = vsubq_u8(idx2, step);
    let v = vqtbl4q_u8(quads[0], idx);
    let v = vqtbx4q_u8(v, quads[1], idx1);
    let v = vqtbx4q_u8(v, quads[2], idx2);
    vqtbx4q_u8(v, quads[3], idx3)
}

#[rite]
fn reverse_neon(_token: NeonToken, v: uint8x16_t) -> uint8x16_t {
    let r = vrev64q_u8(v);
    vextq_u8::<8>(r, r)
}

// ===========================================================================
// ARM NEON — rite row implementations
// ===========================================================================

#[rite]
fn forward_row_neon(token: NeonToken, p: &Palette, t: &Tables, src: &[u8], dst: &mut [u16]) {
    let (blocks, _) = src.as_chunks::<16>();
    let done = blocks.len() * 16;
    let dst_bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut dst[..done]);
    let (halves, _) = dst_bytes.as_chunks_mut::<16>();
    let (pairs, _) = halves.as_chunks_mut::<2>();
    for (s, [d0, d1]) in blocks.iter().zip(pairs.iter_mut()) {
        let idx = vld1q_u8(s);
        let lo = lookup_plane_neon(token, &t.lo, idx);
        let hi = lookup_plane_neon(token, &t.hi, idx);
        vst1q_u8(d0, vzip1q_u8(lo, hi));
        vst1q_u8(d1, vzip2q_u8(lo, hi));
    }
    forward_row(p, &src[done..], &mut dst[done..]);
}

#[rite]
fn reversed_row_neon(token: NeonToken, p: &Palette, t: &Tables, src: &[u8], dst: &mut [u16]) {
    let (head, blocks) = src.as_rchunks::<16>();
    let done = blocks.len() * 16;
    let dst_bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut dst[..done]);
    let (halves, _) = dst_bytes.as_chunks_mut::<16>();
    let (pairs, _) = halves.as_chunks_mut::<2>();
    for (s, [d0, d1]) in blocks.iter().rev().zip(pairs.iter_mut()) {
        let idx = reverse_neon(token, vld1q_u8(s));
        let lo = lookup_plane_neon(token, &t.lo, idx);
        let hi = lookup_plane_neon(token, &t.hi, idx);
        vst1q_u8(d0, vzip1q_u8(lo, hi));
        vst1q_u8(d1, vzip2q_u8(lo, hi));
    }
    reversed_row(p, head, &mut dst[done..]);
}

// ===========================================================================
// ARM NEON — arcane wrappers
// ===========================================================================

// Zipped byte planes are little-endian texels; big-endian targets take the
// scalar rows instead.

#[arcane]
pub(super) fn forward_impl_neon(t: NeonToken, p: &Palette, s: &[u8], d: &mut [u16]) {
    if cfg!(target_endian = "big") {
        forward_row(p, s, d);
        return;
    }
    let tables = load_tables_neon(t, &p.planes());
    forward_row_neon(t, p, &tables, s, d);
}

#[arcane]
#[allow(clippy::too_many_arguments)]
pub(super) fn forward_strided_neon(
    t: NeonToken,
    p: &Palette,
    src: &[u8],
    dst: &mut [u16],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    if cfg!(target_endian = "big") {
        for y in 0..h {
            forward_row(p, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
        }
        return;
    }
    let tables = load_tables_neon(t, &p.planes());
    for y in 0..h {
        forward_row_neon(t, p, &tables, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}

#[arcane]
#[allow(clippy::too_many_arguments)]
pub(super) fn reversed_strided_neon(
    t: NeonToken,
    p: &Palette,
    src: &[u8],
    dst: &mut [u16],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    if cfg!(target_endian = "big") {
        for y in 0..h {
            reversed_row(p, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
        }
        return;
    }
    let tables = load_tables_neon(t, &p.planes());
    for y in 0..h {
        reversed_row_neon(t, p, &tables, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}
