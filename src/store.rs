use crate::native::NativePrefs;
use crate::value::{EditError, PrefType, PrefValue};
use crate::statics;
use indexmap::IndexMap;
use std::{
    fmt,
    fs,
    io::Cursor,
    path::{Path, PathBuf},
};

/// Preferences currently stored, keyed by name, in backing file order.
/// Reserved engine keys are never present.
pub type PrefSet = IndexMap<String, PrefValue>;

const BINARY_PLIST_MAGIC: &[u8] = b"bplist";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("reading {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("couldn't read {format} prefs: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    #[error("{format} prefs root is not a dictionary")]
    NotADictionary { format: &'static str },
}

struct PlistParser {
    format: &'static str,
    parse: fn(&[u8]) -> Result<plist::Value, String>,
}

/// Parsers tried in order; the first success wins.
const PARSERS: [PlistParser; 2] = [
    PlistParser {
        format: "binary",
        parse: parse_binary,
    },
    PlistParser {
        format: "xml",
        parse: parse_xml,
    },
];

fn parse_binary(bytes: &[u8]) -> Result<plist::Value, String> {
    if !bytes.starts_with(BINARY_PLIST_MAGIC) {
        return Err("missing bplist header".to_string());
    }
    plist::Value::from_reader(Cursor::new(bytes)).map_err(|e| e.to_string())
}

fn parse_xml(bytes: &[u8]) -> Result<plist::Value, String> {
    plist::Value::from_reader_xml(Cursor::new(bytes)).map_err(|e| e.to_string())
}

/// Read a property list file as a dictionary, trying binary then XML.
/// On failure, the error of the last attempt is returned.
pub fn read_pref_file(path: &Path) -> Result<plist::Dictionary, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut last_err = None;
    for parser in &PARSERS {
        match (parser.parse)(&bytes) {
            Ok(value) => match value.into_dictionary() {
                Some(dict) => return Ok(dict),
                None => {
                    last_err = Some(LoadError::NotADictionary {
                        format: parser.format,
                    })
                }
            },
            Err(message) => {
                tracing::debug!(format = parser.format, %message, "prefs parse attempt failed");
                last_err = Some(LoadError::Parse {
                    format: parser.format,
                    message,
                });
            }
        }
    }
    Err(last_err.unwrap_or(LoadError::Parse {
        format: "any",
        message: "no parser available".to_string(),
    }))
}

pub fn is_reserved_key(key: &str) -> bool {
    key.starts_with(statics::PP_RESERVED_PREFIX)
}

/// `<home>/Library/Preferences/unity.<company>.<product>.plist`
pub fn prefs_path(home: &Path, company: &str, product: &str) -> PathBuf {
    let mut path = home.to_path_buf();
    path.extend(statics::PP_PREFS_DIR);
    path.join(format!(
        "{}{company}.{product}.{}",
        statics::PP_RESERVED_PREFIX,
        statics::PP_PLIST_EXTENSION
    ))
}

/// Bridges the displayed preference set and the platform store:
/// reads go through the backing file, writes through the native API.
#[derive(Debug)]
pub struct PrefStore<N> {
    path: PathBuf,
    native: N,
    verbose: bool,
}

impl<N: NativePrefs> PrefStore<N> {
    pub fn new(path: impl Into<PathBuf>, native: N) -> Self {
        Self {
            path: path.into(),
            native,
            verbose: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn native(&self) -> &N {
        &self.native
    }

    pub fn native_mut(&mut self) -> &mut N {
        &mut self.native
    }

    /// Promote write diagnostics from debug to info level.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Load every non-reserved preference, or `None` if the file can't be read in any format.
    pub fn load_all(&self) -> Option<PrefSet> {
        let dict = match read_pref_file(&self.path) {
            Ok(dict) => dict,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "couldn't read prefs");
                return None;
            }
        };

        let mut set = PrefSet::with_capacity(dict.len());
        for (key, value) in dict {
            if is_reserved_key(&key) {
                continue;
            }
            match PrefValue::from_plist(&value) {
                Some(v) => {
                    set.insert(key, v);
                }
                None => tracing::debug!(%key, "skipping non-scalar pref"),
            }
        }
        Some(set)
    }

    /// Validate `text` against `ty`, write it under `key` and flush.
    pub fn set_value(&mut self, ty: PrefType, key: &str, text: &str) -> Result<PrefValue, EditError> {
        if key.trim().is_empty() {
            return Err(EditError::EmptyKey);
        }
        if is_reserved_key(key) {
            return Err(EditError::ReservedKey(key.to_string()));
        }
        let value = ty.parse_value(text)?;

        self.log_write(format_args!("set {} {key} {value}", ty));
        match &value {
            PrefValue::Int(v) => self.native.set_int(key, *v),
            PrefValue::Float(v) => self.native.set_float(key, *v),
            PrefValue::String(s) => self.native.set_string(key, s),
        }
        self.flush()?;
        Ok(value)
    }

    /// Remove `key` and flush. Deleting a missing key is not an error.
    pub fn delete_key(&mut self, key: &str) -> Result<(), EditError> {
        self.log_write(format_args!("delete {key}"));
        self.native.delete_key(key);
        self.flush()
    }

    fn flush(&mut self) -> Result<(), EditError> {
        self.native.save().map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "prefs flush failed");
            EditError::Persist(e.to_string())
        })
    }

    fn log_write(&self, op: fmt::Arguments<'_>) {
        if self.verbose {
            tracing::info!(path = %self.path.display(), "{op}");
        } else {
            tracing::debug!(path = %self.path.display(), "{op}");
        }
    }
}
