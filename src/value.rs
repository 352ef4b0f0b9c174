use crate::statics;
use std::fmt;

/// The declared type of a preference, as picked in the editing form.
/// `Undefined` is only ever a transient form state; stored values always carry a concrete tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefType {
    Undefined,
    #[default]
    Int,
    Float,
    String,
}

impl PrefType {
    /// Types offered in the type picker (Undefined is never selectable).
    pub const SELECTABLE: [PrefType; 3] = [PrefType::Int, PrefType::Float, PrefType::String];

    pub fn name(self) -> &'static str {
        match self {
            PrefType::Undefined => statics::EN_TYPE_UNDEFINED,
            PrefType::Int => statics::EN_TYPE_INT,
            PrefType::Float => statics::EN_TYPE_FLOAT,
            PrefType::String => statics::EN_TYPE_STRING,
        }
    }

    /// Parse user text into a value of this type.
    /// Numeric parsing is locale-invariant and ignores surrounding whitespace.
    /// Strings are taken verbatim.
    pub fn parse_value(self, text: &str) -> Result<PrefValue, EditError> {
        let parse_err = || EditError::Parse {
            ty: self,
            raw: text.to_string(),
        };
        match self {
            PrefType::Undefined => Err(EditError::UndefinedType),
            PrefType::Int => text
                .trim()
                .parse::<i32>()
                .map(PrefValue::Int)
                .map_err(|_| parse_err()),
            PrefType::Float => text
                .trim()
                .parse::<f32>()
                .map(PrefValue::Float)
                .map_err(|_| parse_err()),
            PrefType::String => Ok(PrefValue::String(text.to_string())),
        }
    }
}

impl fmt::Display for PrefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single preference value. The tag is the preference's type.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefValue {
    Int(i32),
    Float(f32),
    String(String),
}

impl PrefValue {
    pub fn pref_type(&self) -> PrefType {
        match self {
            PrefValue::Int(_) => PrefType::Int,
            PrefValue::Float(_) => PrefType::Float,
            PrefValue::String(_) => PrefType::String,
        }
    }

    /// Text suitable for the value field of the editing form.
    pub fn to_edit_text(&self) -> String {
        self.to_string()
    }

    /// Convert a property list value read from the backing store.
    /// Returns `None` for kinds the host engine never writes as a preference.
    pub fn from_plist(value: &plist::Value) -> Option<PrefValue> {
        match value {
            plist::Value::Integer(i) => i
                .as_signed()
                .and_then(|v| i32::try_from(v).ok())
                .map(PrefValue::Int),
            plist::Value::Real(r) => Some(PrefValue::Float(*r as f32)),
            plist::Value::String(s) => Some(PrefValue::String(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Int(v) => write!(f, "{v}"),
            PrefValue::Float(v) => write!(f, "{v}"),
            PrefValue::String(s) => f.write_str(s),
        }
    }
}

/// An entry of the displayed preference set.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefEntry {
    pub key: String,
    pub value: PrefValue,
}

/// Errors raised while validating or persisting an edit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("Empty key for pref")]
    EmptyKey,
    #[error("\"{0}\" is reserved by the engine")]
    ReservedKey(String),
    #[error("Type is undefined. Pick int, float or string")]
    UndefinedType,
    #[error("Cannot cast \"{raw}\" to {ty}")]
    Parse { ty: PrefType, raw: String },
    #[error("Failed to save preferences: {0}")]
    Persist(String),
}
