//! Backend selection: probe once, bind a handle, blit through it.

use core::fmt;

use archmage::SimdToken;
use archmage::prelude::*;
use log::{debug, warn};

use crate::blit::{Kernel, run_contiguous, run_strided};
use crate::{BlitError, Direction, Palette};

/// A concrete implementation of the blit contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Portable pixel-by-pixel lookup. Always available; the reference.
    Scalar,
    /// x86-64 AVX2 (x86-64-v3), 32 pixels per step. Bound only on request.
    Avx2,
    /// AArch64 NEON, 16 pixels per step.
    Neon,
    /// WebAssembly SIMD128, 16 pixels per step.
    Wasm128,
}

impl Backend {
    /// Every backend, bindable or not.
    pub const ALL: [Backend; 4] = [
        Backend::Scalar,
        Backend::Avx2,
        Backend::Neon,
        Backend::Wasm128,
    ];

    /// The order `Blitter::detect` tries, fastest measured first.
    ///
    /// `Avx2` is left out: its shuffle lookup trails the scalar loop on
    /// x86-64 in `benches/blit.rs`, so it binds only through `Blitter::new`.
    pub const PREFERENCE: [Backend; 3] = [Backend::Neon, Backend::Wasm128, Backend::Scalar];

    /// Short lowercase name, as used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Avx2 => "avx2",
            Self::Neon => "neon",
            Self::Wasm128 => "wasm128",
        }
    }

    /// Whether this CPU (and build target) can run the backend.
    pub fn is_available(self) -> bool {
        kernel_for(self).is_some()
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn kernel_for(backend: Backend) -> Option<Kernel> {
    match backend {
        #[cfg(target_arch = "x86_64")]
        Backend::Avx2 => X64V3Token::summon().map(Kernel::V3),
        #[cfg(target_arch = "aarch64")]
        Backend::Neon => NeonToken::summon().map(Kernel::Neon),
        #[cfg(target_arch = "wasm32")]
        Backend::Wasm128 => Wasm128Token::summon().map(Kernel::Wasm128),
        Backend::Scalar => ScalarToken::summon().map(Kernel::Scalar),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

/// A blit backend bound once at startup.
///
/// Holds only zero-sized capability tokens, so it is `Copy` and can be
/// shared freely across threads. Detection never reruns; every call goes to
/// the backend chosen at construction.
///
/// Extents are validated on every call in every build profile, before any
/// pixel is written, identically for all backends.
#[derive(Clone, Copy)]
pub struct Blitter {
    kernel: Kernel,
    backend: Backend,
}

impl Blitter {
    /// Probe the CPU and bind the first available backend in
    /// [`Backend::PREFERENCE`].
    ///
    /// Fails only if not even the scalar backend can be bound, which does
    /// not happen on any supported target.
    pub fn detect() -> Result<Self, BlitError> {
        for backend in Backend::PREFERENCE {
            if let Some(kernel) = kernel_for(backend) {
                debug!(target: "palblit", "bound {backend} blit backend");
                return Ok(Self { kernel, backend });
            }
        }
        Err(BlitError::NoBackend)
    }

    /// Bind a specific backend.
    pub fn new(backend: Backend) -> Result<Self, BlitError> {
        match kernel_for(backend) {
            Some(kernel) => {
                debug!(target: "palblit", "bound {backend} blit backend");
                Ok(Self { kernel, backend })
            }
            None => {
                warn!(target: "palblit", "{backend} blit backend requested but not available");
                Err(BlitError::BackendUnavailable(backend))
            }
        }
    }

    /// The portable reference backend.
    pub fn scalar() -> Result<Self, BlitError> {
        Self::new(Backend::Scalar)
    }

    /// The backend bound at construction.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// See [`crate::blit_forward`].
    pub fn forward(
        &self,
        src: &[u8],
        dst: &mut [u16],
        palette: &Palette,
        width: usize,
        height: usize,
    ) -> Result<(), BlitError> {
        run_contiguous(self.kernel, Direction::Forward, src, dst, palette, width, height)
    }

    /// See [`crate::blit_reversed`].
    pub fn reversed(
        &self,
        src: &[u8],
        dst: &mut [u16],
        palette: &Palette,
        width: usize,
        height: usize,
    ) -> Result<(), BlitError> {
        run_contiguous(self.kernel, Direction::Reversed, src, dst, palette, width, height)
    }

    /// See [`crate::blit`].
    pub fn blit(
        &self,
        direction: Direction,
        src: &[u8],
        dst: &mut [u16],
        palette: &Palette,
        width: usize,
        height: usize,
    ) -> Result<(), BlitError> {
        run_contiguous(self.kernel, direction, src, dst, palette, width, height)
    }

    /// See [`crate::blit_forward_strided`].
    #[allow(clippy::too_many_arguments)]
    pub fn forward_strided(
        &self,
        src: &[u8],
        dst: &mut [u16],
        palette: &Palette,
        width: usize,
        height: usize,
        src_stride: usize,
        dst_stride: usize,
    ) -> Result<(), BlitError> {
        run_strided(
            self.kernel,
            Direction::Forward,
            src,
            dst,
            palette,
            width,
            height,
            src_stride,
            dst_stride,
        )
    }

    /// See [`crate::blit_reversed_strided`].
    #[allow(clippy::too_many_arguments)]
    pub fn reversed_strided(
        &self,
        src: &[u8],
        dst: &mut [u16],
        palette: &Palette,
        width: usize,
        height: usize,
        src_stride: usize,
        dst_stride: usize,
    ) -> Result<(), BlitError> {
        run_strided(
            self.kernel,
            Direction::Reversed,
            src,
            dst,
            palette,
            width,
            height,
            src_stride,
            dst_stride,
        )
    }

    /// See [`crate::blit_strided`].
    #[allow(clippy::too_many_arguments)]
    pub fn blit_strided(
        &self,
        direction: Direction,
        src: &[u8],
        dst: &mut [u16],
        palette: &Palette,
        width: usize,
        height: usize,
        src_stride: usize,
        dst_stride: usize,
    ) -> Result<(), BlitError> {
        run_strided(
            self.kernel, direction, src, dst, palette, width, height, src_stride, dst_stride,
        )
    }
}

impl fmt::Debug for Blitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blitter")
            .field("backend", &self.backend)
            .finish()
    }
}
