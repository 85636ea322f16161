//! # palblit
//!
//! Palette-indexed blits for retro framebuffers.
//!
//! Converts an 8-bit indexed pixel buffer into a 16-bit true-color buffer
//! through a 256-entry palette, either straight or horizontally mirrored
//! (for flipped sprites and tiles). ARM NEON and WASM SIMD128 are picked
//! automatically, with fallback to scalar code; an x86-64 AVX2 kernel is
//! available on request through [`Blitter::new`]. Every tier produces output
//! identical to the scalar reference.
//!
//! ## Two ways in
//!
//! - [`Blitter`] — probe the CPU once with [`Blitter::detect`] and keep the
//!   returned handle. Every call goes straight to the bound backend.
//! - Free functions ([`blit_forward`], [`blit_reversed`], [`blit`] and their
//!   `_strided` variants) — dispatch to the best tier on each call.
//!
//! ```rust
//! use palblit::{Blitter, Direction, Palette};
//!
//! let blitter = Blitter::detect().unwrap();
//! let mut palette = Palette::default();
//! palette.set(5, 0xABCD);
//!
//! let src = [5u8, 0, 5, 0];
//! let mut dst = [0u16; 4];
//! blitter.blit(Direction::Reversed, &src, &mut dst, &palette, 2, 2).unwrap();
//! assert_eq!(dst, [0, 0xABCD, 0, 0xABCD]);
//! ```
//!
//! ## Feature flags
//!
//! - **`rgb`** — build palettes from [`rgb`] crate `Rgb<u8>` colors, packed
//!   to RGB565.
//! - **`imgref`** — whole-image blits over [`imgref`] types (`ImgRef`,
//!   `ImgRefMut`, `ImgVec`).

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod backend;
mod blit;
mod error;
mod palette;

pub use backend::{Backend, Blitter};
pub use blit::*;
pub use error::BlitError;
pub use palette::Palette;

#[cfg(feature = "rgb")]
pub use palette::pack_rgb565;

#[cfg(feature = "imgref")]
pub mod imgref;
