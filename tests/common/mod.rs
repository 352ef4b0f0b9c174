#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub enum Format {
    Binary,
    Xml,
}

/// Write a preferences file the way the engine would, with a couple of reserved keys mixed in.
pub fn write_prefs(path: &Path, format: Format, entries: &[(&str, plist::Value)]) -> Result<()> {
    let mut dict = plist::Dictionary::new();
    for (key, value) in entries {
        dict.insert(key.to_string(), value.clone());
    }
    let root = plist::Value::Dictionary(dict);
    match format {
        Format::Binary => root.to_file_binary(path)?,
        Format::Xml => root.to_file_xml(path)?,
    }
    Ok(())
}

pub fn engine_prefs() -> Vec<(&'static str, plist::Value)> {
    vec![
        ("unity.cloud_userid", plist::Value::String("abc123".to_string())),
        ("unity.player_sessionid", plist::Value::Integer(77_i64.into())),
        ("HighScore", plist::Value::Integer(1200_i64.into())),
        ("Volume", plist::Value::Real(0.5)),
        ("PlayerName", plist::Value::String("Ada".to_string())),
    ]
}

pub fn prefs_file(dir: &tempfile::TempDir) -> PathBuf {
    ppe::prefs_path(dir.path(), "Acme", "Rocket")
}

pub fn store_for(path: &Path) -> ppe::PrefStore<ppe::PlistPrefs> {
    ppe::PrefStore::new(path, ppe::PlistPrefs::new(path))
}
