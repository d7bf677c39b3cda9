use super::*;
use crate::test_support::{test_font, scratch_dir, solid, write_png};

#[test]
fn background_fill_follows_stencil_alpha() {
    let dir = scratch_dir("prepare_background");
    let mut stencil = solid(4, 4, [0, 0, 0, 0]);
    stencil.put_pixel(0, 0, image::Rgba([0, 0, 0, 255]));
    let path = dir.join("underlay.png");
    write_png(&path, &stencil);

    let fill = background_fill(Rgba8::rgb(255, 170, 0), &path, Size::new(4, 4)).unwrap();
    assert_eq!(fill.get_pixel(0, 0).0, [255, 170, 0, 255]);
    assert_eq!(fill.get_pixel(3, 3)[3], 0);
}

#[test]
fn avatar_alpha_never_exceeds_source_or_mask() {
    let dir = scratch_dir("prepare_avatar");
    let mut avatar = RgbaImage::new(8, 8);
    let mut mask = RgbaImage::new(8, 8);
    for (x, y, px) in avatar.enumerate_pixels_mut() {
        *px = image::Rgba([200, 100, 50, ((x * 32) as u8).saturating_add(3)]);
        mask.put_pixel(x, y, image::Rgba([0, 0, 0, 255 - (y * 30) as u8]));
    }
    let avatar_path = dir.join("avatar.png");
    write_png(&avatar_path, &avatar);

    let url = format!("file://{}", avatar_path.display());
    let out = prepare_avatar(&url, 8, &mask).unwrap();
    assert_eq!(out.dimensions(), (8, 8));
    for (x, y, px) in out.enumerate_pixels() {
        assert!(px[3] <= avatar.get_pixel(x, y)[3]);
        assert!(px[3] <= mask.get_pixel(x, y)[3]);
    }
}

#[test]
fn undecodable_avatar_names_the_url() {
    let dir = scratch_dir("prepare_bad_avatar");
    let path = dir.join("avatar.png");
    std::fs::write(&path, b"<html>rate limited</html>").unwrap();
    let err = prepare_avatar(&path.display().to_string(), 8, &solid(8, 8, [0; 4]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("avatar.png"), "{err}");
}

#[test]
fn nameplate_width_is_floor_plus_padding_and_monotone() {
    let font = test_font();
    let mut engine = TextLayoutEngine::from_path(&font).unwrap();
    let mut last = 0;
    for tag in ["", "a", "ab", "abc#1234", "abc#1234 boar enjoyer"] {
        let measured = engine.measure(tag, 30.0).unwrap();
        let width = nameplate_width(&mut engine, tag, 30.0, 24).unwrap();
        assert_eq!(width, measured.floor() as u32 + 24);
        assert!(width >= last);
        last = width;
    }
    assert_eq!(nameplate_width(&mut engine, "", 30.0, 24).unwrap(), 24);
    assert_eq!(nameplate_width(&mut engine, "\u{7}", 30.0, 10).unwrap(), 10);
}

#[test]
fn nameplate_is_resized_to_the_tag() {
    let font = test_font();
    let dir = scratch_dir("prepare_nameplate");
    let path = dir.join("nameplate.png");
    write_png(&path, &solid(50, 10, [40, 40, 40, 255]));

    let mut engine = TextLayoutEngine::from_path(&font).unwrap();
    let expected = nameplate_width(&mut engine, "boar#0001", 20.0, 10).unwrap();
    let plate = prepare_nameplate(&path, &mut engine, "boar#0001", 20.0, 10, 12).unwrap();
    assert_eq!(plate.dimensions(), (expected, 12));
}
