//! Folders: one experiment's records and series under a project.

use serde::{Deserialize, Serialize};

use crate::container::ObjectContainer;
use crate::data::{Data, DATA_PREFIX};
use crate::dataseries::{DataSeries, DATASERIES_PREFIX};
use crate::entity::{Identity, NmEntity};

pub const FOLDER_PREFIX: &str = "folder";

/// A folder owns two sibling containers: flat data records and the series
/// that organize them into channel x epoch grids. Both exist from the
/// moment the folder does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    identity: Identity,
    data: ObjectContainer<Data>,
    dataseries: ObjectContainer<DataSeries>,
}

impl NmEntity for Folder {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn from_identity(identity: Identity) -> Self {
        Self {
            identity,
            data: ObjectContainer::new(DATA_PREFIX),
            dataseries: ObjectContainer::new(DATASERIES_PREFIX),
        }
    }
}

impl Folder {
    pub fn data(&self) -> &ObjectContainer<Data> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ObjectContainer<Data> {
        &mut self.data
    }

    pub fn dataseries(&self) -> &ObjectContainer<DataSeries> {
        &self.dataseries
    }

    pub fn dataseries_mut(&mut self) -> &mut ObjectContainer<DataSeries> {
        &mut self.dataseries
    }
}
