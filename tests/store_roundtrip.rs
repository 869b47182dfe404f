//! Persistence across store instances
//!
//! Each test opens a file-backed store in a temp directory, writes through it,
//! then reopens the directory to check what a fresh session sees.

use almumin_core::storage::models::{Bookmark, FontSize, LastRead, Settings, Theme};
use almumin_core::storage::Store;
use tempfile::TempDir;

fn bookmark(surah: u32, ayah: u32) -> Bookmark {
    Bookmark {
        surah_number: surah,
        surah_name: "Yaseen".to_string(),
        ayah_number: ayah,
        text: "يسٓ".to_string(),
        translation: "O thou human being!".to_string(),
    }
}

#[test]
fn test_all_keys_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let settings = Settings {
        translation: "ru.kuliev".to_string(),
        reciter: "ar.sudais".to_string(),
        font_size: FontSize::Large,
        theme: Theme::Light,
    };
    let last_read = LastRead::now(36, 1, "Yaseen");
    {
        let store = Store::open(dir.path()).unwrap();
        store.set_settings(&settings).unwrap();
        store.toggle_bookmark(bookmark(36, 1)).unwrap();
        store.toggle_bookmark(bookmark(36, 12)).unwrap();
        store.set_last_read(last_read.clone()).unwrap();
    }

    let reopened = Store::open(dir.path()).unwrap();
    assert_eq!(reopened.settings(), settings);
    let keys: Vec<_> = reopened.bookmarks().iter().map(Bookmark::key).collect();
    assert_eq!(keys, vec![(36, 1), (36, 12)]);
    assert_eq!(reopened.last_read(), Some(last_read));
}

#[test]
fn test_documents_use_camel_case_fields() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.update_settings(|s| s.font_size = FontSize::Small).unwrap();
    store.toggle_bookmark(bookmark(1, 2)).unwrap();
    store.set_last_read(LastRead::now(1, 1, "Al-Faatiha")).unwrap();

    let settings = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
    assert!(settings.contains(r#""fontSize":"small""#));

    let bookmarks: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("bookmarks.json")).unwrap()).unwrap();
    assert_eq!(bookmarks[0]["surahNumber"], 1);
    assert_eq!(bookmarks[0]["ayahNumber"], 2);

    let last_read = std::fs::read_to_string(dir.path().join("lastRead.json")).unwrap();
    assert!(last_read.contains(r#""surahName":"Al-Faatiha""#));
}

#[test]
fn test_hand_written_documents_are_tolerated() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), r#"{"theme":"light"}"#).unwrap();
    std::fs::write(
        dir.path().join("bookmarks.json"),
        r#"[
            {"surahNumber":2,"surahName":"Al-Baqara","ayahNumber":255,"text":"a","translation":"first"},
            {"surahNumber":2,"surahName":"Al-Baqara","ayahNumber":255,"text":"a","translation":"second"},
            {"surahNumber":1,"surahName":"Al-Faatiha","ayahNumber":1,"text":"b"}
        ]"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("lastRead.json"), "not json at all").unwrap();

    let store = Store::open(dir.path()).unwrap();

    let settings = store.settings();
    assert_eq!(settings.theme, Theme::Light);
    assert_eq!(settings.translation, "en.asad");
    assert_eq!(settings.font_size, FontSize::Medium);

    let bookmarks = store.bookmarks();
    assert_eq!(bookmarks.len(), 2);
    assert_eq!(bookmarks.get(2, 255).unwrap().translation, "first");
    assert_eq!(bookmarks.get(1, 1).unwrap().translation, "");

    assert_eq!(store.last_read(), None);
}

#[test]
fn test_toggle_twice_restores_original_set() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.toggle_bookmark(bookmark(36, 1)).unwrap();
    store.toggle_bookmark(bookmark(36, 2)).unwrap();
    let before = store.bookmarks();

    for (surah, ayah) in [(36, 3), (36, 1), (112, 1)] {
        store.toggle_bookmark(bookmark(surah, ayah)).unwrap();
        store.toggle_bookmark(bookmark(surah, ayah)).unwrap();
        let after = Store::open(dir.path()).unwrap().bookmarks();
        let mut expected: Vec<_> = before.iter().map(Bookmark::key).collect();
        let mut actual: Vec<_> = after.iter().map(Bookmark::key).collect();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected, "toggling {}:{} twice changed the set", surah, ayah);
    }
}

#[test]
fn test_clearing_returns_to_defaults() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(dir.path()).unwrap();
    store.set_last_read(LastRead::now(2, 1, "Al-Baqara")).unwrap();
    store.toggle_bookmark(bookmark(2, 1)).unwrap();

    store.clear_last_read().unwrap();
    store.clear_bookmarks().unwrap();

    let reopened = Store::open(dir.path()).unwrap();
    assert_eq!(reopened.last_read(), None);
    assert!(reopened.bookmarks().is_empty());
    assert!(!dir.path().join("lastRead.json").exists());
}
