//! Entity identity: the base unit every level of the hierarchy embeds.
//!
//! An [`Identity`] holds the name, creation timestamp and note log shared by
//! projects, folders, data records, data series, channels and epochs. The
//! owning container is the only party allowed to change the name, since it
//! must re-key its ordered mapping and rewrite set members at the same time.

use serde::{Deserialize, Serialize};

use crate::notes::{timestamp, Notes};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    name: String,
    created: String,
    notes: Notes,
}

impl Identity {
    /// Build an identity. The name is validated by the container on
    /// `create` or `insert`, not here.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: timestamp(),
            notes: Notes::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn notes(&self) -> &Notes {
        &self.notes
    }

    pub fn add_note(&mut self, text: impl Into<String>) {
        self.notes.add(text);
    }

    /// Rename, recording the change in the note log. Container-internal:
    /// callers go through `ObjectContainer::rename` so that keys and set
    /// members stay consistent.
    pub(crate) fn set_name(&mut self, new_name: String) {
        let note = format!("name: {} -> {}", self.name, new_name);
        self.name = new_name;
        self.notes.add(note);
    }

    /// Reset the creation timestamp; used when duplicating an entity so the
    /// copy records its own creation time.
    pub(crate) fn touch_created(&mut self) {
        self.created = timestamp();
    }
}

/// Implemented by every entity variant a container can hold.
pub trait NmEntity {
    fn identity(&self) -> &Identity;
    fn identity_mut(&mut self) -> &mut Identity;

    /// Construct a fresh entity around the given identity, with default
    /// payload and (for tree levels) eagerly created child containers.
    fn from_identity(identity: Identity) -> Self
    where
        Self: Sized;

    fn name(&self) -> &str {
        self.identity().name()
    }
}
