use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{RecordId, TimelineRecord};

/// A committed inline rename, to be applied upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameMutation {
    pub id: RecordId,
    pub name: String,
}

/// Tracks which record, if any, has its label open for editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    editing: Option<RecordId>,
}

impl EditSession {
    #[must_use]
    pub fn editing(&self) -> Option<&RecordId> {
        self.editing.as_ref()
    }

    #[must_use]
    pub fn is_editing(&self, id: &RecordId) -> bool {
        self.editing.as_ref() == Some(id)
    }

    pub fn begin(&mut self, id: RecordId) {
        debug!(%id, "rename started");
        self.editing = Some(id);
    }

    /// Closes the editor and returns the rename to apply.
    ///
    /// Returns `None` when nothing was being edited.
    pub fn commit(&mut self, draft: &str) -> Option<RenameMutation> {
        let id = self.editing.take()?;
        debug!(%id, "rename committed");
        Some(RenameMutation {
            id,
            name: draft.to_owned(),
        })
    }

    pub fn cancel(&mut self) -> bool {
        self.editing.take().is_some()
    }

    /// Closes the editor when its record is no longer in `records`.
    pub fn retain_existing(&mut self, records: &[TimelineRecord]) {
        let Some(id) = &self.editing else {
            return;
        };
        if !records.iter().any(|record| record.id.as_ref() == Some(id)) {
            debug!(%id, "rename target disappeared; closing editor");
            self.editing = None;
        }
    }
}
