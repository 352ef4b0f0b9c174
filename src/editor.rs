use crate::cache::PrefCache;
use crate::native::NativePrefs;
use crate::session::{CommitOutcome, EditingSession, PendingField};
use crate::store::PrefStore;
use crate::value::PrefEntry;
use std::time::{Duration, Instant};

/// Owns everything the preferences window needs: the store, the displayed snapshot,
/// the form being edited and the debug flag. The GUI only talks to this type.
#[derive(Debug)]
pub struct PrefsEditor<N> {
    store: PrefStore<N>,
    cache: PrefCache,
    session: EditingSession,
    pending_deletes: Vec<String>,
    debug: bool,
}

impl<N: NativePrefs> PrefsEditor<N> {
    /// Build the editor and perform the initial read.
    pub fn new(store: PrefStore<N>, reload_interval: Duration, now: Instant) -> Self {
        let mut editor = Self {
            store,
            cache: PrefCache::new(reload_interval),
            session: EditingSession::default(),
            pending_deletes: Vec::new(),
            debug: false,
        };
        editor.reload(now);
        editor
    }

    pub fn store(&self) -> &PrefStore<N> {
        &self.store
    }

    pub fn cache(&self) -> &PrefCache {
        &self.cache
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
        self.store.set_verbose(debug);
        tracing::info!(enabled = self.debug, "debug mode switched");
    }

    /// Per-frame hook: reloads from disk once the interval has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.cache.reload_if_due(&self.store, now)
    }

    /// Reload immediately, regardless of the interval.
    pub fn reload(&mut self, now: Instant) {
        self.cache.reload(&self.store, now);
    }

    /// `None` when there is nothing to show (no readable file yet).
    pub fn display_set(&self) -> Option<Vec<PrefEntry>> {
        self.cache.display_set()
    }

    pub fn on_entry_selected(&mut self, entry: &PrefEntry) {
        self.session.select_existing(entry);
    }

    pub fn on_field_changed(&mut self, field: PendingField) {
        self.session.update_field(field);
    }

    pub fn on_commit(&mut self) -> CommitOutcome {
        self.session.commit(&mut self.store, &mut self.cache)
    }

    /// Queue a deletion. Applied by `end_frame` so the snapshot being drawn stays intact.
    pub fn on_delete_requested(&mut self, key: &str) {
        if !self.pending_deletes.iter().any(|k| k == key) {
            self.pending_deletes.push(key.to_string());
        }
    }

    pub fn pending_deletes(&self) -> &[String] {
        &self.pending_deletes
    }

    /// Apply deletions queued during the display pass.
    pub fn end_frame(&mut self) {
        for key in std::mem::take(&mut self.pending_deletes) {
            match self.store.delete_key(&key) {
                Ok(()) => self.cache.apply_local_delete(&key),
                Err(e) => self.session.report_error(e.to_string()),
            }
        }
    }

    pub fn pending(&self) -> &EditingSession {
        &self.session
    }

    /// The error banner text, if it is currently shown.
    pub fn error_state(&self) -> Option<&str> {
        self.session.visible_error()
    }
}
