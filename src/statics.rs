// Central place for UI strings and other non-localized constants.
// Keep these out of gui.rs to reduce duplication and make tweaks safer.

use std::time::Duration;

// Host engine preference store layout (PP_ prefix)
/// Keys with this prefix belong to the engine itself and are never shown or edited.
pub const PP_RESERVED_PREFIX: &str = "unity.";
pub const PP_PREFS_DIR: [&str; 2] = ["Library", "Preferences"];
pub const PP_PLIST_EXTENSION: &str = "plist";
pub const PP_DEFAULT_COMPANY: &str = "DefaultCompany";
pub const PP_DEFAULT_RELOAD_INTERVAL: Duration = Duration::from_millis(1500);

// Fresh editing form contents.
pub const PP_DEFAULT_PENDING_KEY: &str = "key";
pub const PP_DEFAULT_PENDING_VALUE: &str = "value";

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "PPE: PlayerPrefs Editor";

pub const EN_BTN_OPEN: &str = "Open plist...";
pub const EN_BTN_RELOAD: &str = "Reload";
pub const EN_BTN_ABOUT: &str = "About";
pub const EN_BTN_TOGGLE_THEME: &str = "Theme";
pub const EN_CHECKBOX_DEBUG: &str = "Debug mode";

pub const EN_WINDOW_ABOUT: &str = "About";
pub const EN_ABOUT_HEADING: &str = "PPE: PlayerPrefs Editor";
pub const EN_ABOUT_VERSION: &str = "Version:";
pub const EN_ABOUT_DEBUG: &str = "Debug mode logs every write and delete at info level.";

pub const EN_HEADING_SET_PREF: &str = "Set PlayerPref";
pub const EN_HEADING_EXISTING: &str = "Existing PlayerPrefs";
pub const EN_LABEL_KEY: &str = "PlayerPref key:";
pub const EN_LABEL_VALUE: &str = "Value:";
pub const EN_LABEL_FILE: &str = "File:";
pub const EN_BTN_SET: &str = "Set";
pub const EN_BTN_EDIT: &str = "Edit";
pub const EN_BTN_DELETE: &str = "-";

pub const EN_COL_KEY: &str = "Key";
pub const EN_COL_TYPE: &str = "Type";
pub const EN_COL_VALUE: &str = "Value";

pub const EN_NO_PREFS_FILE: &str = "No readable preferences file (yet).";
pub const EN_NO_PREFS: &str = "No PlayerPrefs.";

pub const EN_TYPE_UNDEFINED: &str = "undefined";
pub const EN_TYPE_INT: &str = "int";
pub const EN_TYPE_FLOAT: &str = "float";
pub const EN_TYPE_STRING: &str = "string";

pub const EN_FILTER_PLIST: &str = "Property List";
