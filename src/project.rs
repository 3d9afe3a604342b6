//! Projects: the root level of the hierarchy.

use serde::{Deserialize, Serialize};

use crate::container::ObjectContainer;
use crate::entity::{Identity, NmEntity};
use crate::folder::{Folder, FOLDER_PREFIX};

pub const PROJECT_PREFIX: &str = "project";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    identity: Identity,
    folders: ObjectContainer<Folder>,
}

impl NmEntity for Project {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn from_identity(identity: Identity) -> Self {
        Self {
            identity,
            folders: ObjectContainer::new(FOLDER_PREFIX),
        }
    }
}

impl Project {
    pub fn folders(&self) -> &ObjectContainer<Folder> {
        &self.folders
    }

    pub fn folders_mut(&mut self) -> &mut ObjectContainer<Folder> {
        &mut self.folders
    }
}
