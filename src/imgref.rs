//! Whole-image blits using [`imgref`] types.
//!
//! Strides come from the images themselves, so padded framebuffers and
//! sub-image views work without copying.
//!
//! ```rust
//! use ::imgref::{ImgRefMut, ImgVec};
//! use palblit::{Direction, Palette, imgref};
//!
//! let mut palette = Palette::default();
//! palette.set(1, 0xF800);
//!
//! let frame = ImgVec::new(vec![0u8, 1, 1, 0], 2, 2);
//! let mut out_buf = vec![0u16; 4];
//! let out = ImgRefMut::new(&mut out_buf, 2, 2);
//! imgref::blit(frame.as_ref(), out, &palette, Direction::Forward).unwrap();
//! assert_eq!(out_buf, [0, 0xF800, 0xF800, 0]);
//! ```

use alloc::vec;

use imgref::{ImgRef, ImgRefMut, ImgVec};

use crate::{BlitError, Direction, Palette};

fn check_dims(sw: usize, sh: usize, dw: usize, dh: usize) -> Result<(), BlitError> {
    if sw != dw || sh != dh {
        Err(BlitError::DimensionMismatch)
    } else {
        Ok(())
    }
}

/// Blit `src` into `dst`, row by row, honoring both strides.
///
/// Padding past each row's width is neither read nor written.
pub fn blit(
    src: ImgRef<'_, u8>,
    mut dst: ImgRefMut<'_, u16>,
    palette: &Palette,
    direction: Direction,
) -> Result<(), BlitError> {
    check_dims(src.width(), src.height(), dst.width(), dst.height())?;
    let (width, height) = (src.width(), src.height());
    let (src_stride, dst_stride) = (src.stride(), dst.stride());
    crate::blit_strided(
        direction,
        src.buf(),
        dst.buf_mut(),
        palette,
        width,
        height,
        src_stride,
        dst_stride,
    )
}

/// Blit `src` into a newly allocated, tightly packed image.
pub fn blit_to_vec(
    src: ImgRef<'_, u8>,
    palette: &Palette,
    direction: Direction,
) -> Result<ImgVec<u16>, BlitError> {
    let (width, height) = (src.width(), src.height());
    let len = width
        .checked_mul(height)
        .ok_or(BlitError::DimensionOverflow)?;
    let mut out = ImgVec::new(vec![0u16; len], width, height);
    blit(src, out.as_mut(), palette, direction)?;
    Ok(out)
}
