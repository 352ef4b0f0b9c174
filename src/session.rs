use crate::cache::PrefCache;
use crate::native::NativePrefs;
use crate::statics;
use crate::store::PrefStore;
use crate::value::{PrefEntry, PrefType, PrefValue};

/// One field of the editing form.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingField {
    Key(String),
    Type(PrefType),
    Value(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Success(PrefValue),
    Failure(String),
}

/// The key/type/value the user is composing, plus the error banner state.
///
/// The banner has two parts: `last_error` keeps the latest message, `error_visible`
/// controls whether it's shown. Editing a field hides the banner but keeps the text
/// around until the next commit replaces or clears it.
#[derive(Debug, Clone, PartialEq)]
pub struct EditingSession {
    pub pending_key: String,
    pub pending_type: PrefType,
    pub pending_value: String,
    last_error: Option<String>,
    error_visible: bool,
}

impl Default for EditingSession {
    fn default() -> Self {
        Self {
            pending_key: statics::PP_DEFAULT_PENDING_KEY.to_string(),
            pending_type: PrefType::Int,
            pending_value: statics::PP_DEFAULT_PENDING_VALUE.to_string(),
            last_error: None,
            error_visible: false,
        }
    }
}

impl EditingSession {
    pub fn select_existing(&mut self, entry: &PrefEntry) {
        self.pending_key = entry.key.clone();
        self.pending_type = entry.value.pref_type();
        self.pending_value = entry.value.to_edit_text();
        self.last_error = None;
        self.error_visible = false;
    }

    pub fn update_field(&mut self, field: PendingField) {
        match field {
            PendingField::Key(key) => self.pending_key = key,
            PendingField::Type(ty) => self.pending_type = ty,
            PendingField::Value(value) => self.pending_value = value,
        }
        self.error_visible = false;
    }

    pub fn commit<N: NativePrefs>(
        &mut self,
        store: &mut PrefStore<N>,
        cache: &mut PrefCache,
    ) -> CommitOutcome {
        match store.set_value(self.pending_type, &self.pending_key, &self.pending_value) {
            Ok(value) => {
                cache.apply_local_update(&self.pending_key, value.clone());
                self.last_error = None;
                self.error_visible = false;
                CommitOutcome::Success(value)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::debug!(key = %self.pending_key, %message, "commit rejected");
                self.report_error(message.clone());
                CommitOutcome::Failure(message)
            }
        }
    }

    /// Show `message` in the banner.
    pub fn report_error(&mut self, message: String) {
        self.last_error = Some(message);
        self.error_visible = true;
    }

    /// The message to show in the banner, if it is currently shown.
    pub fn visible_error(&self) -> Option<&str> {
        if self.error_visible {
            self.last_error.as_deref()
        } else {
            None
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn error_visible(&self) -> bool {
        self.error_visible
    }
}
