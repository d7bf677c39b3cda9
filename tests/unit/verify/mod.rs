use std::collections::BTreeSet;

use super::*;
use crate::test_support::scratch_dir;

/// Only the listed paths open.
struct FakeProbe(BTreeSet<PathBuf>);

impl FakeProbe {
    fn with(paths: &[&str]) -> Self {
        Self(paths.iter().map(PathBuf::from).collect())
    }
}

impl PathProbe for FakeProbe {
    fn can_open(&self, path: &Path) -> bool {
        self.0.contains(path)
    }
}

fn clean_config() -> LegacyConfig {
    serde_json::from_str(
        r##"{
            "raritiesInfo": {"common": {"boars": ["boar_a"]}, "rare": {"boars": ["boar_b"]}},
            "boarIDs": {"boar_a": {"file": "a.png"}, "boar_b": {"file": "b.png"}},
            "badgeIDs": {"badge_hunter": {"file": "hunter.png"}},
            "hexColors": {"common": "#FFFFFF", "rare": "#0000FF"},
            "paths": {
                "assets": {
                    "boars": "boars/", "badges": "badges/",
                    "announceAdd": {"basePath": "ann/", "overlay": "overlay.png"},
                    "collection": {"basePath": "col/", "underlay": "underlay.png"},
                    "other": {"basePath": "other/", "font": "font.ttf"}
                },
                "scripts": {"basePath": "scripts/", "dynamic": "dynamic.py"},
                "data": {"globalFile": "data/global.json"}
            }
        }"##,
    )
    .unwrap()
}

fn all_present() -> FakeProbe {
    FakeProbe::with(&[
        "boars/a.png",
        "boars/b.png",
        "badges/hunter.png",
        "ann/overlay.png",
        "col/underlay.png",
        "other/font.ttf",
        "scripts/dynamic.py",
        "data/global.json",
    ])
}

fn lines(diags: &[Diagnostic]) -> Vec<String> {
    diags.iter().map(ToString::to_string).collect()
}

#[test]
fn clean_config_has_no_diagnostics() {
    assert!(verify(&clean_config(), &all_present()).is_empty());
}

#[test]
fn undeclared_rarity_id_yields_exactly_one_invalid_line() {
    let mut cfg = clean_config();
    cfg.rarities_info
        .get_mut("rare")
        .unwrap()
        .boars
        .push("boar_ghost".into());
    let out = lines(&verify(&cfg, &all_present()));
    assert_eq!(out, vec!["Invalid boar ID 'boar_ghost' found used in rarities"]);
    assert!(out[0].contains("Invalid") && out[0].contains("boar_ghost"));
}

#[test]
fn duplicate_unused_and_uncolored_are_reported() {
    let mut cfg = clean_config();
    cfg.rarities_info
        .get_mut("rare")
        .unwrap()
        .boars
        .push("boar_a".into());
    cfg.rarities_info.get_mut("rare").unwrap().boars.retain(|b| b != "boar_b");
    cfg.rarities_info.insert("mythic".into(), Default::default());

    let out = lines(&verify(&cfg, &all_present()));
    assert_eq!(
        out,
        vec![
            "Boar ID 'boar_a' is used more than once",
            "Rarity 'mythic' has no color assigned",
            "Unused boar ID 'boar_b'",
        ]
    );
}

#[test]
fn broken_paths_are_reported_per_key_and_base_path_is_skipped() {
    let out = lines(&verify(&clean_config(), &FakeProbe::with(&[])));
    assert_eq!(
        out,
        vec![
            "Boar 'boar_a' references an invalid file path",
            "Boar 'boar_b' references an invalid file path",
            "Badge 'badge_hunter' references an invalid file path",
            "Asset 'overlay' references an invalid file path",
            "Asset 'underlay' references an invalid file path",
            "Asset 'font' references an invalid file path",
            "Script 'dynamic' references an invalid file path",
            "Global file references an invalid path",
        ]
    );
}

#[test]
fn diagnostics_follow_document_order() {
    let cfg: LegacyConfig = serde_json::from_str(
        r##"{
            "raritiesInfo": {"zeta": {"boars": []}, "alpha": {"boars": []}},
            "boarIDs": {"boar_z": {"file": "z.png"}, "boar_a": {"file": "a.png"}},
            "badgeIDs": {"badge_hunter": {"file": "hunter.png"}},
            "paths": {
                "assets": {"boars": "boars/", "badges": "badges/"},
                "scripts": {"second": "s2.py", "first": "s1.py"},
                "data": {"globalFile": "data/global.json"}
            }
        }"##,
    )
    .unwrap();
    let probe = FakeProbe::with(&[
        "boars/z.png",
        "boars/a.png",
        "badges/hunter.png",
        "data/global.json",
    ]);
    assert_eq!(
        lines(&verify(&cfg, &probe)),
        vec![
            "Rarity 'zeta' has no color assigned",
            "Rarity 'alpha' has no color assigned",
            "Unused boar ID 'boar_z'",
            "Unused boar ID 'boar_a'",
            "Script 'second' references an invalid file path",
            "Script 'first' references an invalid file path",
        ]
    );
}

#[test]
fn missing_hunter_badge_is_reported() {
    let mut cfg = clean_config();
    cfg.badge_ids.clear();
    let out = lines(&verify(&cfg, &all_present()));
    assert_eq!(out, vec!["Hunter badge ID is wrong!"]);
}

#[test]
fn empty_document_still_runs_every_check() {
    let cfg: LegacyConfig = serde_json::from_str("{}").unwrap();
    let out = lines(&verify(&cfg, &FakeProbe::with(&[])));
    assert_eq!(
        out,
        vec!["Hunter badge ID is wrong!", "Global file references an invalid path"]
    );
}

#[test]
fn fs_probe_rejects_directories_and_missing_files() {
    let dir = scratch_dir("verify_fs_probe");
    let file = dir.join("present.txt");
    std::fs::write(&file, b"ok").unwrap();
    assert!(FsProbe.can_open(&file));
    assert!(!FsProbe.can_open(&dir));
    assert!(!FsProbe.can_open(&dir.join("absent.txt")));
}

#[test]
fn verify_file_fails_on_unreadable_or_malformed_config() {
    let dir = scratch_dir("verify_file");
    assert!(verify_file(&dir.join("config.json")).is_err());
    let path = dir.join("bad.json");
    std::fs::write(&path, b"{ not json").unwrap();
    assert!(verify_file(&path).is_err());
    let path = dir.join("empty.json");
    std::fs::write(&path, b"{}").unwrap();
    assert_eq!(verify_file(&path).unwrap().len(), 2);
}
