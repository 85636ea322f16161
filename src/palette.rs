use core::ops::Index;

use crate::BlitError;

/// A 256-entry table of 16-bit display colors.
///
/// The color format (RGB565, BGR565, ARGB1555, ...) is whatever the display
/// surface expects; blits copy entries verbatim. Every `u8` is a valid index,
/// so lookups are never bounds-checked at runtime.
#[derive(Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Palette([u16; 256]);

impl Palette {
    /// Number of entries; one per `u8` index.
    pub const LEN: usize = 256;

    /// Wrap a full table of 16-bit colors.
    pub const fn new(entries: [u16; 256]) -> Self {
        Self(entries)
    }

    /// `palette[i] == i` for every index. Blitting through it zero-extends
    /// the source.
    pub const fn identity() -> Self {
        let mut entries = [0u16; 256];
        let mut i = 0;
        while i < 256 {
            entries[i] = i as u16;
            i += 1;
        }
        Self(entries)
    }

    /// The color at `index`.
    #[inline(always)]
    pub fn get(&self, index: u8) -> u16 {
        self.0[index as usize]
    }

    /// Replace the color at `index`.
    pub fn set(&mut self, index: u8, color: u16) {
        self.0[index as usize] = color;
    }

    /// All 256 entries, in index order.
    pub fn as_array(&self) -> &[u16; 256] {
        &self.0
    }

    /// All 256 entries, mutable.
    pub fn as_mut_array(&mut self) -> &mut [u16; 256] {
        &mut self.0
    }

    /// Build from 8-bit RGB colors, packing each to RGB565.
    #[cfg(feature = "rgb")]
    pub fn from_rgb8(colors: &[rgb::Rgb<u8>; 256]) -> Self {
        Self((*colors).map(pack_rgb565))
    }

    /// Split into 16 groups of 16 entries, separated into low-byte and
    /// high-byte planes. SIMD backends probe these with byte shuffles.
    #[cfg_attr(
        not(any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "wasm32")),
        allow(dead_code)
    )]
    pub(crate) fn planes(&self) -> Planes {
        let mut planes = Planes {
            lo: [[0; 16]; 16],
            hi: [[0; 16]; 16],
        };
        for (i, &color) in self.0.iter().enumerate() {
            let [lo, hi] = color.to_le_bytes();
            planes.lo[i >> 4][i & 15] = lo;
            planes.hi[i >> 4][i & 15] = hi;
        }
        planes
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self([0; 256])
    }
}

impl core::fmt::Debug for Palette {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl Index<u8> for Palette {
    type Output = u16;

    #[inline(always)]
    fn index(&self, index: u8) -> &u16 {
        &self.0[index as usize]
    }
}

impl From<[u16; 256]> for Palette {
    fn from(entries: [u16; 256]) -> Self {
        Self(entries)
    }
}

impl TryFrom<&[u16]> for Palette {
    type Error = BlitError;

    fn try_from(entries: &[u16]) -> Result<Self, BlitError> {
        let entries: [u16; 256] = entries
            .try_into()
            .map_err(|_| BlitError::PaletteLength(entries.len()))?;
        Ok(Self(entries))
    }
}

/// Pack an 8-bit RGB color to RGB565 (red in the top five bits).
#[cfg(feature = "rgb")]
pub fn pack_rgb565(c: rgb::Rgb<u8>) -> u16 {
    (((c.r as u16) >> 3) << 11) | (((c.g as u16) >> 2) << 5) | ((c.b as u16) >> 3)
}

/// Palette bytes regrouped for table-lookup shuffles: `lo[k][j]` is the low
/// byte of entry `k * 16 + j`.
#[cfg_attr(
    not(any(target_arch = "x86_64", target_arch = "aarch64", target_arch = "wasm32")),
    allow(dead_code)
)]
pub(crate) struct Planes {
    pub(crate) lo: [[u8; 16]; 16],
    pub(crate) hi: [[u8; 16]; 16],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_maps_index_to_itself() {
        let p = Palette::identity();
        for i in 0..=255u8 {
            assert_eq!(p.get(i), i as u16);
            assert_eq!(p[i], i as u16);
        }
    }

    #[test]
    fn try_from_slice_checks_length() {
        let short = [0u16; 255];
        assert_eq!(
            Palette::try_from(&short[..]),
            Err(BlitError::PaletteLength(255))
        );
        let exact = [7u16; 256];
        assert_eq!(Palette::try_from(&exact[..]).unwrap().get(200), 7);
    }

    #[test]
    fn planes_split_bytes_by_group() {
        let mut p = Palette::default();
        p.set(0x00, 0x1234);
        p.set(0x3F, 0xABCD);
        p.set(0xFF, 0xFF01);
        let planes = p.planes();
        assert_eq!((planes.lo[0][0], planes.hi[0][0]), (0x34, 0x12));
        assert_eq!((planes.lo[3][15], planes.hi[3][15]), (0xCD, 0xAB));
        assert_eq!((planes.lo[15][15], planes.hi[15][15]), (0x01, 0xFF));
        assert_eq!(planes.lo[1][1], 0);
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn rgb565_packing() {
        use rgb::Rgb;
        assert_eq!(pack_rgb565(Rgb::new(255, 255, 255)), 0xFFFF);
        assert_eq!(pack_rgb565(Rgb::new(255, 0, 0)), 0xF800);
        assert_eq!(pack_rgb565(Rgb::new(0, 255, 0)), 0x07E0);
        assert_eq!(pack_rgb565(Rgb::new(0, 0, 255)), 0x001F);

        let mut colors = [Rgb::new(0u8, 0, 0); 256];
        colors[9] = Rgb::new(0, 0, 255);
        let p = Palette::from_rgb8(&colors);
        assert_eq!(p.get(9), 0x001F);
        assert_eq!(p.get(8), 0);
    }
}
