mod common;

use common::{Format, Result, engine_prefs, prefs_file, store_for, write_prefs};
use ppe::{EditError, NativePrefs, PrefType, PrefValue};
use pretty_assertions::assert_eq;

#[test]
fn string_values_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = prefs_file(&dir);
    let mut store = store_for(&path);

    let value = store.set_value(PrefType::String, "k", "v")?;
    assert_eq!(value, PrefValue::String("v".to_string()));

    let set = store.load_all().ok_or("expected a set")?;
    assert_eq!(set.get("k"), Some(&PrefValue::String("v".to_string())));
    Ok(())
}

#[test]
fn integer_round_trip_keeps_type() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prefs.plist");
    let mut store = store_for(&path);

    store.set_value(PrefType::Int, "x", "42")?;
    let set = store.load_all().ok_or("expected a set")?;
    let x = set.get("x").ok_or("x missing")?;
    assert_eq!(x.pref_type(), PrefType::Int);
    assert_eq!(x, &PrefValue::Int(42));
    Ok(())
}

#[test]
fn float_is_stored_within_tolerance() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prefs.plist");
    let mut store = store_for(&path);

    store.set_value(PrefType::Float, "k", "3.14")?;
    let set = store.load_all().ok_or("expected a set")?;
    let Some(PrefValue::Float(v)) = set.get("k") else {
        return Err("k should be a float".into());
    };
    let expected: f32 = "3.14".parse()?;
    assert!((v - expected).abs() < 1e-5, "stored {v}");
    Ok(())
}

#[test]
fn bad_integer_is_rejected_without_writing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prefs.plist");
    write_prefs(&path, Format::Binary, &engine_prefs())?;
    let before = std::fs::read(&path)?;

    let mut store = store_for(&path);
    let err = store.set_value(PrefType::Int, "k", "abc").expect_err("must fail");
    assert_eq!(
        err,
        EditError::Parse {
            ty: PrefType::Int,
            raw: "abc".to_string()
        }
    );
    assert_eq!(std::fs::read(&path)?, before);
    assert!(!store.native_mut().has_key("k"));
    Ok(())
}

#[test]
fn empty_key_and_undefined_type_are_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prefs.plist");
    let mut store = store_for(&path);

    assert_eq!(
        store.set_value(PrefType::String, "   ", "v"),
        Err(EditError::EmptyKey)
    );
    assert_eq!(
        store.set_value(PrefType::Undefined, "k", "v"),
        Err(EditError::UndefinedType)
    );
    assert!(!path.exists(), "nothing should have been written");
    Ok(())
}

#[test]
fn writes_keep_reserved_engine_keys() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prefs.plist");
    write_prefs(&path, Format::Xml, &engine_prefs())?;

    let mut store = store_for(&path);
    store.set_value(PrefType::Int, "HighScore", "1500")?;

    let raw = ppe::read_pref_file(&path)?;
    assert!(raw.contains_key("unity.cloud_userid"));
    assert!(raw.contains_key("unity.player_sessionid"));
    assert_eq!(store.native_mut().get_int("HighScore"), Some(1500));
    Ok(())
}

#[test]
fn deleting_missing_key_is_idempotent() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prefs.plist");
    write_prefs(&path, Format::Binary, &engine_prefs())?;

    let mut store = store_for(&path);
    let before = store.load_all().ok_or("expected a set")?;
    store.delete_key("missing")?;
    store.delete_key("missing")?;
    assert_eq!(store.load_all().ok_or("expected a set")?, before);

    store.delete_key("Volume")?;
    let after = store.load_all().ok_or("expected a set")?;
    assert!(!after.contains_key("Volume"));
    assert_eq!(after.len(), before.len() - 1);
    Ok(())
}

#[test]
fn unreadable_file_surfaces_persist_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prefs.plist");
    std::fs::write(&path, b"<<not a plist>>")?;

    let mut store = store_for(&path);
    let err = store.set_value(PrefType::Int, "k", "1").expect_err("must fail");
    assert!(matches!(err, EditError::Persist(_)), "got {err:?}");
    assert_eq!(std::fs::read(&path)?, b"<<not a plist>>".to_vec());
    Ok(())
}

#[test]
fn reserved_engine_keys_are_not_writable() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prefs.plist");
    write_prefs(&path, Format::Binary, &engine_prefs())?;
    let before = std::fs::read(&path)?;

    let mut store = store_for(&path);
    assert_eq!(
        store.set_value(PrefType::String, "unity.cloud_userid", "hijacked"),
        Err(EditError::ReservedKey("unity.cloud_userid".to_string()))
    );
    assert_eq!(std::fs::read(&path)?, before);
    assert_eq!(
        store.native_mut().get_string("unity.cloud_userid").as_deref(),
        Some("abc123")
    );
    Ok(())
}
