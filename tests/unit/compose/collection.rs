use super::*;
use crate::{
    assets::decode::SourceFrame,
    test_support::{test_font, scratch_dir, solid, write_png},
};

fn configs(dir: &std::path::Path, font: &std::path::Path) -> (PathConfig, ColorTable, NumberConfig) {
    let paths = PathConfig {
        item_assets: format!("{}/", dir.display()),
        other_assets: String::new(),
        item_underlay: "underlay.png".into(),
        item_backplate: "backplate.png".into(),
        item_overlay: "overlay.png".into(),
        main_font: font.display().to_string(),
        ..PathConfig::default()
    };
    let colors: ColorTable =
        serde_json::from_str(r##"{"font": "#FFFFFF", "rarity2": "#33CC33"}"##).unwrap();
    let nums: NumberConfig = serde_json::from_str(
        r#"{"itemImageSize": [90, 90], "fontMedium": 12,
            "itemBadgeSize": [30, 30], "itemBadgePos": [30, 30],
            "itemBoarSize": [60, 60], "itemBoarPos": [15, 15],
            "itemTitlePos": [45, 12], "itemNamePos": [45, 84]}"#,
    )
    .unwrap();
    (paths, colors, nums)
}

#[test]
fn name_uses_the_rarity_color() {
    let (paths, colors, nums) = configs(std::path::Path::new("x"), std::path::Path::new("f.ttf"));
    let job = CollectionJob::resolve(&paths, &colors, &nums, "rarity2", ItemPreset::Badge, "T", "N")
        .unwrap();
    assert_eq!(job.rarity_color, Rgba8::rgb(0x33, 0xCC, 0x33));
    assert_eq!(job.font_color, Rgba8::rgb(255, 255, 255));
    assert_eq!(job.item_size, Size::new(30, 30));
    assert_eq!(job.font, PathBuf::from("f.ttf"));
}

#[test]
fn collection_downscales_and_inherits_delays() {
    let font = test_font();
    let dir = scratch_dir("compose_collection");
    let mut underlay = solid(90, 90, [0, 0, 0, 0]);
    for y in 0..45 {
        for x in 0..90 {
            underlay.put_pixel(x, y, image::Rgba([0, 0, 0, 255]));
        }
    }
    write_png(&dir.join("underlay.png"), &underlay);
    write_png(&dir.join("backplate.png"), &solid(90, 90, [0, 0, 0, 0]));
    write_png(&dir.join("overlay.png"), &solid(90, 90, [0, 0, 0, 0]));

    let (paths, colors, nums) = configs(&dir, &font);
    let job = CollectionJob::resolve(&paths, &colors, &nums, "rarity2", ItemPreset::Badge, "Title", "Name")
        .unwrap();
    let plan = job.plan().unwrap();
    assert_eq!(plan.output_size(), Size::new(30, 30));

    let frames = [
        SourceFrame {
            image: solid(5, 5, [200, 0, 0, 255]),
            delay_ms: 70,
        },
        SourceFrame {
            image: solid(5, 5, [0, 0, 200, 255]),
            delay_ms: 120,
        },
    ];
    let out = plan.render_all(&frames).unwrap();
    assert_eq!(out.iter().map(|f| f.delay_ms).collect::<Vec<_>>(), vec![70, 120]);
    assert_eq!(out[0].image.dimensions(), (30, 30));
    // Bottom-left corner: outside the underlay and the item, so fully transparent.
    assert_eq!(out[0].image.get_pixel(1, 28)[3], 0);
    // Top-left corner: rarity fill.
    let px = out[0].image.get_pixel(1, 1).0;
    assert_eq!(px[3], 255);
    assert!(px[1] > 150 && px[0] < 100);
}
