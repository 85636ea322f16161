//! Validates the code examples from README.md compile and behave correctly.

#[test]
fn readme_core_api() {
    use palblit::{Blitter, Direction, Palette};

    let blitter = Blitter::detect().unwrap();

    let mut palette = Palette::default();
    palette.set(1, 0xF800);
    palette.set(2, 0x001F);

    let frame = [1u8, 1, 2, 0, 0, 2, 2, 1];
    let mut out = [0u16; 8];

    blitter.forward(&frame, &mut out, &palette, 4, 2).unwrap();
    assert_eq!(out, [0xF800, 0xF800, 0x001F, 0, 0, 0x001F, 0x001F, 0xF800]);

    blitter
        .blit(Direction::Reversed, &frame, &mut out, &palette, 4, 2)
        .unwrap();
    assert_eq!(out, [0, 0x001F, 0xF800, 0xF800, 0xF800, 0x001F, 0x001F, 0]);
}

#[test]
fn readme_free_functions() {
    use palblit::{Palette, blit_reversed};

    let palette = Palette::identity();
    let mut out = [0u16; 3];
    blit_reversed(&[10, 20, 30], &mut out, &palette, 3, 1).unwrap();
    assert_eq!(out, [30, 20, 10]);
}

#[test]
fn readme_backends() {
    use palblit::{Backend, BlitError, Blitter};

    let scalar = Blitter::new(Backend::Scalar).unwrap();
    assert_eq!(scalar.backend(), Backend::Scalar);

    match Blitter::new(Backend::Avx2) {
        Ok(b) => assert_eq!(b.backend(), Backend::Avx2),
        Err(e) => assert_eq!(e, BlitError::BackendUnavailable(Backend::Avx2)),
    }
}

#[test]
fn readme_strided() {
    use palblit::{Palette, blit_forward_strided};

    let palette = Palette::identity();
    let src = [1u8, 2, 0xFF, 3, 4, 0xFF];
    let mut dst = [0u16; 8];
    blit_forward_strided(&src, &mut dst, &palette, 2, 2, 3, 4).unwrap();
    assert_eq!(dst, [1, 2, 0, 0, 3, 4, 0, 0]);
}

#[cfg(feature = "rgb")]
#[test]
fn readme_rgb_palette() {
    use palblit::{Palette, pack_rgb565};
    use rgb::Rgb;

    let mut colors = [Rgb::new(0u8, 0, 0); 256];
    colors[1] = Rgb::new(255, 0, 0);
    let palette = Palette::from_rgb8(&colors);
    assert_eq!(palette[1], 0xF800);
    assert_eq!(pack_rgb565(Rgb::new(0, 255, 0)), 0x07E0);
}

#[cfg(feature = "imgref")]
#[test]
fn readme_imgref() {
    use ::imgref::ImgVec;
    use palblit::{Direction, Palette, imgref};

    let frame = ImgVec::new(vec![0u8; 256 * 240], 256, 240);
    let out =
        imgref::blit_to_vec(frame.as_ref(), &Palette::identity(), Direction::Forward).unwrap();
    assert_eq!(out.width(), 256);
    assert_eq!(out.height(), 240);
}
