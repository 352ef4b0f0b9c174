use crate::native::NativePrefs;
use crate::store::{PrefSet, PrefStore};
use crate::value::{PrefEntry, PrefValue};
use std::time::{Duration, Instant};

/// Displayed snapshot of the preference set.
///
/// Two update paths: a rate-limited reload from the backing file, and optimistic local
/// edits. Local edits stand until the next successful reload, which replaces everything.
#[derive(Debug, Clone)]
pub struct PrefCache {
    set: Option<PrefSet>,
    interval: Duration,
    last_reload: Option<Instant>,
    reload_count: u64,
    generation: u64,
}

impl PrefCache {
    pub fn new(interval: Duration) -> Self {
        Self {
            set: None,
            interval,
            last_reload: None,
            reload_count: 0,
            generation: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether enough wall-clock time has passed since the last reload.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_reload {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Reload unconditionally. A failed read keeps the previous set.
    pub fn reload<N: NativePrefs>(&mut self, store: &PrefStore<N>, now: Instant) {
        self.reload_count += 1;
        self.last_reload = Some(now);
        match store.load_all() {
            Some(set) => self.set = Some(set),
            None => tracing::debug!("reload failed, keeping last known prefs"),
        }
        self.generation += 1;
    }

    /// Reload only if the interval has elapsed. Returns whether a reload happened.
    pub fn reload_if_due<N: NativePrefs>(&mut self, store: &PrefStore<N>, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.reload(store, now);
        true
    }

    pub fn apply_local_update(&mut self, key: &str, value: PrefValue) {
        self.set
            .get_or_insert_with(PrefSet::new)
            .insert(key.to_string(), value);
        self.generation += 1;
    }

    pub fn apply_local_delete(&mut self, key: &str) {
        if let Some(set) = self.set.as_mut() {
            set.shift_remove(key);
        }
        self.generation += 1;
    }

    pub fn get(&self, key: &str) -> Option<&PrefValue> {
        self.set.as_ref()?.get(key)
    }

    /// `None` when no set has ever been read; that means "nothing to show", not "empty".
    pub fn set(&self) -> Option<&PrefSet> {
        self.set.as_ref()
    }

    /// Snapshot ordered by key.
    pub fn display_set(&self) -> Option<Vec<PrefEntry>> {
        let set = self.set.as_ref()?;
        let mut entries: Vec<PrefEntry> = set
            .iter()
            .map(|(key, value)| PrefEntry {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Some(entries)
    }

    /// Number of store reads performed so far.
    pub fn reload_count(&self) -> u64 {
        self.reload_count
    }

    /// Bumped on every reload attempt and local mutation; the UI repaints when it changes.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
