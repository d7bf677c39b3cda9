use super::*;

#[test]
fn item_config_reads_camel_case_and_ignores_unknown_keys() {
    let cfg: ItemConfig = serde_json::from_str(
        r##"{
            "pathConfig": {"itemAssets": "assets/items/", "itemOverlay": "overlay.png", "extra": 1},
            "colorConfig": {"font": "#FFFFFF", "rarity1": [1, 2, 3]},
            "numberConfig": {"itemImageSize": [930, 1080], "itemBoarPos": [-5, 12], "fontMedium": 40}
        }"##,
    )
    .unwrap();
    assert_eq!(
        cfg.path_config.overlay().unwrap(),
        PathBuf::from("assets/items/overlay.png")
    );
    assert_eq!(cfg.color_config.font().unwrap(), Rgba8::rgb(255, 255, 255));
    assert_eq!(cfg.color_config.get("rarity1").unwrap(), Rgba8::rgb(1, 2, 3));
    assert_eq!(cfg.number_config.image_size().unwrap(), Size::new(930, 1080));
    assert_eq!(cfg.number_config.item_boar_pos, Some(Pos::new(-5, 12)));
    assert_eq!(cfg.number_config.font_medium().unwrap(), 40.0);
}

#[test]
fn missing_keys_name_the_key() {
    let cfg = ItemConfig::default();
    let err = cfg.path_config.backplate().unwrap_err().to_string();
    assert!(err.contains("pathConfig.itemBackplate"), "{err}");
    let err = cfg.number_config.image_size().unwrap_err().to_string();
    assert!(err.contains("numberConfig.itemImageSize"), "{err}");
    let err = cfg.color_config.dark().unwrap_err().to_string();
    assert!(err.contains("'dark'"), "{err}");
}

#[test]
fn malformed_color_only_fails_on_lookup() {
    let table: ColorTable =
        serde_json::from_str(r##"{"font": "#FFF", "broken": "not-a-color"}"##).unwrap();
    assert_eq!(table.font().unwrap(), Rgba8::rgb(255, 255, 255));
    assert!(table.get("broken").is_err());
    assert!(table.contains("broken"));
}

#[test]
fn item_presets_pick_their_own_keys() {
    let nums: NumberConfig = serde_json::from_str(
        r#"{"itemBadgeSize": [10, 10], "itemBadgePos": [1, 2],
            "itemBoarSize": [20, 30], "itemBoarPos": [3, 4]}"#,
    )
    .unwrap();
    assert_eq!(
        nums.item_rect(ItemPreset::Badge).unwrap(),
        (Size::new(10, 10), Pos::new(1, 2))
    );
    assert_eq!(
        nums.item_rect(ItemPreset::Boar).unwrap(),
        (Size::new(20, 30), Pos::new(3, 4))
    );
    // No itemPos/itemSize: fall back to the boar preset.
    assert_eq!(
        nums.explicit_item_rect().unwrap(),
        (Size::new(20, 30), Pos::new(3, 4))
    );
}

#[test]
fn zero_sized_presets_are_rejected() {
    let nums: NumberConfig =
        serde_json::from_str(r#"{"itemSize": [0, 10], "itemPos": [0, 0]}"#).unwrap();
    assert!(nums.explicit_item_rect().is_err());
}

#[test]
fn profile_boxes_parse_from_number_config() {
    let boxes: ProfileBoxConfig = serde_json::from_str(
        r#"{"itemBoxX": 20, "itemBoxOneY": 40.5, "itemUserAvatarYOffset": 4,
            "itemTextYOffset": 30, "itemUserAvatarWidth": 36, "fontMedium": 40}"#,
    )
    .unwrap();
    assert_eq!(boxes.item_box_x, Some(20.0));
    assert_eq!(boxes.item_box_one_y, Some(40.5));
    assert_eq!(boxes.item_user_avatar_y_offset, Some(4.0));
    assert_eq!(boxes.item_text_y_offset, Some(30.0));
    assert_eq!(boxes.item_user_avatar_width, Some(36));
    assert_eq!(boxes.border, None);
}
