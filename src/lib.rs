//! Core library for PPE, the PlayerPrefs Editor.
//! Lists, edits, creates and deletes a game's locally stored preferences, read from the
//! platform property list file and written back through a key/value preference API.

mod cache;
pub mod config;
mod editor;
mod gui;
mod native;
mod session;
pub mod statics;
mod store;
mod value;

pub use cache::PrefCache;
pub use config::{Args, Config};
pub use editor::PrefsEditor;
pub use gui::run_gui;
pub use native::{NativeError, NativePrefs, PlistPrefs};
pub use session::{CommitOutcome, EditingSession, PendingField};
pub use store::{LoadError, PrefSet, PrefStore, is_reserved_key, prefs_path, read_pref_file};
pub use value::{EditError, PrefEntry, PrefType, PrefValue};
