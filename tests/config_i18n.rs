//! 설정 파일과 번역 테스트.
mod common;

use std::fs;

use co_fitting::config::{self, Config};
use co_fitting::i18n::{self, keys, Language, Translator};

#[test]
fn missing_config_is_created_with_defaults() {
    let path = common::temp_path("new_config.toml");
    fs::remove_file(&path).ok();
    let cfg = config::load_or_default(&path).expect("load");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
    fs::remove_file(&path).ok();
}

#[test]
fn config_round_trips_through_file() {
    let path = common::temp_path("saved_config.toml");
    let cfg = Config {
        language: Some("ko".to_string()),
        show_percentage: true,
        locales_dir: Some("packs".to_string()),
    };
    cfg.save(&path).expect("save");
    let loaded = config::load_or_default(&path).expect("load");
    fs::remove_file(&path).ok();
    assert_eq!(loaded, cfg);
    assert_eq!(loaded.locales_path(), Some(std::path::PathBuf::from("packs")));
}

#[test]
fn partial_config_uses_defaults() {
    let path = common::temp_path("partial_config.toml");
    fs::write(&path, "show_percentage = true\n").expect("write");
    let loaded = config::load_or_default(&path).expect("load");
    fs::remove_file(&path).ok();
    assert!(loaded.show_percentage);
    assert_eq!(loaded.language, None);
}

#[test]
fn broken_config_is_an_error() {
    let path = common::temp_path("broken_config.toml");
    fs::write(&path, "show_percentage = \"maybe\"\n").expect("write");
    let result = config::load_or_default(&path);
    fs::remove_file(&path).ok();
    assert!(matches!(result, Err(config::ConfigError::Serde(_))));
}

#[test]
fn translator_picks_language_tables() {
    assert_eq!(Translator::new("ja").t(keys::PARAM_RATIO), "比率");
    assert_eq!(Translator::new("ko").t(keys::PARAM_RATIO), "비율");
    assert_eq!(Translator::new("en-US").t(keys::PARAM_RATIO), "Ratio");
    assert_eq!(Translator::new("fr").language(), Language::Ja);
}

#[test]
fn unknown_key_falls_back_to_itself() {
    let tr = Translator::new("en");
    assert_eq!(tr.t("no.such.key"), "no.such.key");
}

#[test]
fn language_pack_overrides_built_in_strings() {
    let dir = common::temp_path("locales");
    fs::create_dir_all(&dir).expect("dir");
    fs::write(
        dir.join("en.toml"),
        "[param]\nratio = \"Brew ratio\"\n",
    )
    .expect("write");
    let tr = Translator::new_with_pack("en", Some(&dir));
    fs::remove_dir_all(&dir).ok();

    assert_eq!(tr.t(keys::PARAM_RATIO), "Brew ratio");
    assert_eq!(tr.lookup(keys::PARAM_RATIO).as_deref(), Some("Brew ratio"));
    assert_eq!(tr.t(keys::PARAM_BEAN), "Beans");
}

#[test]
fn explicit_language_wins() {
    assert_eq!(i18n::resolve_language("ko", Some("ja")), "ko");
    assert_eq!(i18n::resolve_language("auto", Some("ja_JP")), "ja");
    assert_eq!(i18n::resolve_language("EN", None), "en");
}

#[test]
fn nested_tables_flatten_to_dotted_keys() {
    let map = i18n::parse_toml_to_map("[a]\nb = \"x\"\n[a.c]\nd = \"y\"\ne = 1\n")
        .expect("map");
    assert_eq!(map.get("a.b").map(String::as_str), Some("x"));
    assert_eq!(map.get("a.c.d").map(String::as_str), Some("y"));
    assert!(!map.contains_key("a.c.e"));
}
