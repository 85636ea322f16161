//! Public-API properties, checked against every backend this CPU can bind.

use palblit::{Backend, BlitError, Blitter, Direction, Palette};

fn bound_backends() -> Vec<Blitter> {
    Backend::ALL
        .iter()
        .filter_map(|&b| Blitter::new(b).ok())
        .collect()
}

fn nes_like_palette() -> Palette {
    let mut entries = [0u16; 256];
    for (i, e) in entries.iter_mut().enumerate() {
        // 64 base colors (a 6-bit NES index space), each quarter tagged in bits 14-15.
        *e = ((i % 64) as u16).wrapping_mul(0x0421) ^ (((i / 64) as u16) << 14);
    }
    Palette::new(entries)
}

fn frame(w: usize, h: usize) -> Vec<u8> {
    (0..w * h).map(|i| ((i * 7) ^ (i >> 3)) as u8).collect()
}

#[test]
fn every_backend_agrees_with_scalar() {
    let palette = nes_like_palette();
    let scalar = Blitter::scalar().unwrap();
    let (w, h) = (256, 240);
    let src = frame(w, h);
    for direction in [Direction::Forward, Direction::Reversed] {
        let mut expected = vec![0u16; w * h];
        scalar
            .blit(direction, &src, &mut expected, &palette, w, h)
            .unwrap();
        for blitter in bound_backends() {
            let mut dst = vec![0u16; w * h];
            blitter.blit(direction, &src, &mut dst, &palette, w, h).unwrap();
            assert_eq!(dst, expected, "{direction:?} on {}", blitter.backend());
        }
    }
}

#[test]
fn reversing_twice_is_forward() {
    let palette = Palette::identity();
    let (w, h) = (41, 6);
    let src = frame(w, h);
    for blitter in bound_backends() {
        let mut once = vec![0u16; w * h];
        blitter.reversed(&src, &mut once, &palette, w, h).unwrap();
        // Identity palette: texels are the indices, so feed them back.
        let back: Vec<u8> = once.iter().map(|&t| t as u8).collect();
        let mut twice = vec![0u16; w * h];
        blitter.reversed(&back, &mut twice, &palette, w, h).unwrap();
        let mut fwd = vec![0u16; w * h];
        blitter.forward(&src, &mut fwd, &palette, w, h).unwrap();
        assert_eq!(twice, fwd, "{}", blitter.backend());
    }
}

#[test]
fn free_functions_agree_with_bound_handle() {
    let palette = nes_like_palette();
    let blitter = Blitter::detect().unwrap();
    let (w, h) = (99, 4);
    let src = frame(w, h);
    let mut a = vec![0u16; w * h];
    let mut b = vec![0u16; w * h];
    palblit::blit_reversed(&src, &mut a, &palette, w, h).unwrap();
    blitter.reversed(&src, &mut b, &palette, w, h).unwrap();
    assert_eq!(a, b);
}

#[test]
fn strided_matches_contiguous_when_tight() {
    let palette = nes_like_palette();
    let (w, h) = (50, 3);
    let src = frame(w, h);
    for blitter in bound_backends() {
        for direction in [Direction::Forward, Direction::Reversed] {
            let mut tight = vec![0u16; w * h];
            let mut strided = vec![0u16; w * h];
            blitter.blit(direction, &src, &mut tight, &palette, w, h).unwrap();
            blitter
                .blit_strided(direction, &src, &mut strided, &palette, w, h, w, w)
                .unwrap();
            assert_eq!(tight, strided, "{direction:?} on {}", blitter.backend());
        }
    }
}

#[test]
fn errors_leave_destination_untouched() {
    let palette = nes_like_palette();
    for blitter in bound_backends() {
        let mut dst = vec![0xBEEFu16; 16];
        assert_eq!(
            blitter.forward(&[0; 15], &mut dst, &palette, 4, 4),
            Err(BlitError::SourceTooSmall { needed: 16, actual: 15 })
        );
        assert_eq!(
            blitter.reversed_strided(&[0; 64], &mut dst, &palette, 4, 4, 8, 8),
            Err(BlitError::DestinationTooSmall { needed: 28, actual: 16 })
        );
        assert_eq!(
            blitter.forward_strided(&[0; 64], &mut dst, &palette, 4, 4, 8, 3),
            Err(BlitError::InvalidStride)
        );
        assert!(dst.iter().all(|&t| t == 0xBEEF), "{}", blitter.backend());
    }
}

#[test]
fn palette_from_slice_checks_length() {
    let short = [0u16; 255];
    assert_eq!(
        Palette::try_from(&short[..]),
        Err(BlitError::PaletteLength(255))
    );
    let exact = [0x1234u16; 256];
    let palette = Palette::try_from(&exact[..]).unwrap();
    assert_eq!(palette[200], 0x1234);
}

#[test]
fn error_messages() {
    assert_eq!(
        BlitError::DestinationTooSmall { needed: 4, actual: 2 }.to_string(),
        "destination too small: need 4 texels, have 2"
    );
    assert_eq!(
        BlitError::BackendUnavailable(Backend::Neon).to_string(),
        "neon backend is not available on this CPU"
    );
}
