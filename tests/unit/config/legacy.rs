use super::*;

#[test]
fn missing_sections_default_to_empty() {
    let cfg: LegacyConfig = serde_json::from_str("{}").unwrap();
    assert!(cfg.rarities_info.is_empty());
    assert!(cfg.boar_ids.is_empty());
    assert!(cfg.paths.scripts.is_empty());
    assert!(cfg.paths.data.global_file.is_empty());
    assert_eq!(cfg.numbers.announce_add.image_size, None);
}

#[test]
fn id_tables_use_upper_case_keys() {
    let cfg: LegacyConfig = serde_json::from_str(
        r#"{
            "boarIDs": {"common": {"file": "common.png", "name": "Common Boar"}},
            "badgeIDs": {"badge_hunter": {"file": "hunter.png"}},
            "raritiesInfo": {"common": {"boars": ["common"], "weight": 1}}
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.boar_ids["common"].file, "common.png");
    assert!(cfg.badge_ids.contains_key("badge_hunter"));
    assert_eq!(cfg.rarities_info["common"].boars, vec!["common".to_string()]);
}

#[test]
fn table_files_join_the_base_path() {
    let cfg: LegacyConfig = serde_json::from_str(
        r#"{"paths": {"assets": {
            "announceAdd": {"basePath": "assets/announce/", "overlay": "overlay.png"},
            "other": {"basePath": "assets/other/", "font": "main.ttf"}
        }}}"#,
    )
    .unwrap();
    assert_eq!(
        cfg.announce_asset("overlay").unwrap(),
        PathBuf::from("assets/announce/overlay.png")
    );
    assert_eq!(cfg.font().unwrap(), PathBuf::from("assets/other/main.ttf"));
    let err = cfg.announce_asset("nameplate").unwrap_err().to_string();
    assert!(err.contains("paths.assets.announceAdd.nameplate"), "{err}");
}

#[test]
fn announce_numbers_parse_points_and_sizes() {
    let cfg: LegacyConfig = serde_json::from_str(
        r#"{"numbers": {
            "general": {"fontSizes": {"big": 60, "medium": 41}},
            "announceAdd": {"imageSize": [931, 1081], "titlePos": [465, -3]}
        }}"#,
    )
    .unwrap();
    assert_eq!(cfg.numbers.general.font_sizes.big, Some(60));
    assert_eq!(cfg.numbers.announce_add.image_size, Some(Size::new(931, 1081)));
    assert_eq!(cfg.numbers.announce_add.title_pos, Some(Pos::new(465, -3)));
}
