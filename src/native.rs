use crate::store::{LoadError, read_pref_file};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// The host's key/value preference API. Setters only touch the in-memory domain;
/// nothing is durable until `save` returns.
pub trait NativePrefs {
    fn get_int(&mut self, key: &str) -> Option<i32>;
    fn get_float(&mut self, key: &str) -> Option<f32>;
    fn get_string(&mut self, key: &str) -> Option<String>;
    fn has_key(&mut self, key: &str) -> bool;
    fn set_int(&mut self, key: &str, value: i32);
    fn set_float(&mut self, key: &str, value: f32);
    fn set_string(&mut self, key: &str, value: &str);
    fn delete_key(&mut self, key: &str);
    /// Flush pending writes to durable storage.
    fn save(&mut self) -> Result<(), NativeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NativeError {
    #[error("refusing to overwrite unreadable preferences file {path:?}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
    #[error("serializing preferences: {0}")]
    Serialize(#[from] plist::Error),
    #[error("writing {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Preference domain backed by a property list file.
///
/// The whole file (reserved engine keys and non-scalar values included) is kept in memory
/// between writes and flushes, and reloaded from disk on the first access after each flush.
#[derive(Debug)]
pub struct PlistPrefs {
    path: PathBuf,
    domain: Option<Domain>,
}

#[derive(Debug)]
struct Domain {
    entries: plist::Dictionary,
    unreadable: Option<String>,
    dirty: bool,
}

impl PlistPrefs {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            domain: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn domain(&mut self) -> &mut Domain {
        let path = &self.path;
        self.domain.get_or_insert_with(|| match read_pref_file(path) {
            Ok(entries) => Domain {
                entries,
                unreadable: None,
                dirty: false,
            },
            Err(LoadError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Domain {
                    entries: plist::Dictionary::new(),
                    unreadable: None,
                    dirty: false,
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "preferences file unreadable");
                Domain {
                    entries: plist::Dictionary::new(),
                    unreadable: Some(e.to_string()),
                    dirty: false,
                }
            }
        })
    }

    fn get(&mut self, key: &str) -> Option<&plist::Value> {
        self.domain().entries.get(key)
    }

    fn insert(&mut self, key: &str, value: plist::Value) {
        let domain = self.domain();
        domain.entries.insert(key.to_string(), value);
        domain.dirty = true;
    }
}

impl NativePrefs for PlistPrefs {
    fn get_int(&mut self, key: &str) -> Option<i32> {
        self.get(key)
            .and_then(plist::Value::as_signed_integer)
            .and_then(|v| i32::try_from(v).ok())
    }

    fn get_float(&mut self, key: &str) -> Option<f32> {
        self.get(key).and_then(plist::Value::as_real).map(|v| v as f32)
    }

    fn get_string(&mut self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(plist::Value::as_string)
            .map(str::to_string)
    }

    fn has_key(&mut self, key: &str) -> bool {
        self.domain().entries.contains_key(key)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.insert(key, plist::Value::Integer(i64::from(value).into()));
    }

    fn set_float(&mut self, key: &str, value: f32) {
        self.insert(key, plist::Value::Real(f64::from(value)));
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.insert(key, plist::Value::String(value.to_string()));
    }

    fn delete_key(&mut self, key: &str) {
        let domain = self.domain();
        if domain.entries.remove(key).is_some() {
            domain.dirty = true;
        }
    }

    fn save(&mut self) -> Result<(), NativeError> {
        let Some(domain) = self.domain.take() else {
            return Ok(());
        };
        if !domain.dirty {
            return Ok(());
        }
        if let Some(reason) = domain.unreadable {
            return Err(NativeError::Unreadable {
                path: self.path.clone(),
                reason,
            });
        }

        let mut bytes = Vec::new();
        plist::Value::Dictionary(domain.entries).to_writer_binary(&mut bytes)?;
        write_replace(&self.path, &bytes).map_err(|source| NativeError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Write to a sibling temp file and rename it over `path`, so readers never see a torn file.
fn write_replace(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::{NativeError, NativePrefs, PlistPrefs};

    #[test]
    fn missing_file_is_empty_domain_and_save_creates_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("Library").join("Preferences").join("p.plist");
        let mut prefs = PlistPrefs::new(&path);

        assert!(!prefs.has_key("a"));
        prefs.set_int("a", 3);
        prefs.set_float("b", 1.5);
        prefs.set_string("c", "x");
        prefs.save().expect("save");
        assert!(path.exists());

        let mut reopened = PlistPrefs::new(&path);
        assert_eq!(reopened.get_int("a"), Some(3));
        assert_eq!(reopened.get_float("b"), Some(1.5));
        assert_eq!(reopened.get_string("c").as_deref(), Some("x"));
    }

    #[test]
    fn save_without_changes_does_not_touch_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("p.plist");
        let mut prefs = PlistPrefs::new(&path);
        prefs.delete_key("missing");
        prefs.save().expect("save");
        assert!(!path.exists());
    }

    #[test]
    fn unreadable_file_is_never_overwritten() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("p.plist");
        std::fs::write(&path, b"definitely not a plist").expect("write");

        let mut prefs = PlistPrefs::new(&path);
        prefs.set_int("a", 1);
        let err = prefs.save().expect_err("must refuse");
        assert!(matches!(err, NativeError::Unreadable { .. }));
        assert_eq!(
            std::fs::read(&path).expect("read"),
            b"definitely not a plist".to_vec()
        );
    }

    #[test]
    fn writes_preserve_non_scalar_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("p.plist");
        let mut dict = plist::Dictionary::new();
        dict.insert("flag".to_string(), plist::Value::Boolean(true));
        plist::Value::Dictionary(dict)
            .to_file_binary(&path)
            .expect("fixture");

        let mut prefs = PlistPrefs::new(&path);
        prefs.set_string("name", "n");
        prefs.save().expect("save");

        let root = plist::Value::from_file(&path).expect("reparse");
        let dict = root.as_dictionary().expect("dict");
        assert_eq!(dict.get("flag"), Some(&plist::Value::Boolean(true)));
        assert!(dict.contains_key("name"));
    }
}
