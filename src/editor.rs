use chrono::NaiveDate;

use crate::config::ScheduleConfig;
use crate::store::{AssignmentRecord, ScheduleStore, StoreError};

/// Editing workflow for a single day. Either closed (no draft) or editing
/// exactly one draft; there is never more than one editing session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DayEditor {
    draft: Option<AssignmentRecord>,
}

impl DayEditor {
    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&AssignmentRecord> {
        self.draft.as_ref()
    }

    /// Opens `day` for editing. An existing record is copied into the draft
    /// (the store stays untouched until commit); otherwise a fresh draft is
    /// sized from the day's service configuration. Opening while another day
    /// is open replaces the draft outright, no confirmation.
    pub fn open(&mut self, day: NaiveDate, store: &ScheduleStore, config: &ScheduleConfig) {
        let draft = match store.find(day) {
            Some(record) => record.clone(),
            None => {
                let service = config.service_for_day(day);
                AssignmentRecord {
                    date: day,
                    service: service.name.clone(),
                    coordinator: config.default_coordinator().to_string(),
                    slots: vec![String::new(); service.slot_count],
                }
            }
        };
        self.draft = Some(draft);
    }

    pub fn set_coordinator(&mut self, name: &str) {
        if let Some(draft) = self.draft.as_mut() {
            draft.coordinator = name.to_string();
        }
    }

    /// Re-sizes `slots` to the selected service's count and drops every
    /// previously entered name; names are never carried across a service
    /// change. Unknown names (and the empty selection) size to the default.
    pub fn set_service(&mut self, name: &str, config: &ScheduleConfig) {
        if let Some(draft) = self.draft.as_mut() {
            draft.service = name.to_string();
            draft.slots = vec![String::new(); config.slot_count_for(name)];
        }
    }

    /// Panics when no draft is open or `index` is out of range; both are
    /// caller bugs, not user-facing errors.
    pub fn set_slot(&mut self, index: usize, name: &str) {
        let draft = self.draft.as_mut().expect("set_slot on a closed editor");
        draft.slots[index] = name.to_string();
    }

    /// Promotes the draft into the store and closes the editor. The editor
    /// closes even when persistence fails; the error is the caller's to
    /// surface.
    pub fn commit(&mut self, store: &mut ScheduleStore) -> Result<(), StoreError> {
        match self.draft.take() {
            Some(draft) => store.upsert(draft),
            None => Ok(()),
        }
    }

    /// Closes the editor without touching the store.
    pub fn discard(&mut self) {
        self.draft = None;
    }

    /// Removes the draft's date from the store (no-op when unscheduled) and
    /// closes the editor.
    pub fn delete(&mut self, store: &mut ScheduleStore) -> Result<(), StoreError> {
        match self.draft.take() {
            Some(draft) => store.remove(draft.date),
            None => Ok(()),
        }
    }
}
