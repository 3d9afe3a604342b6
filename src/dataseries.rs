//! Data series: the channel x epoch grid over a folder's records.
//!
//! A series named `rec` conceptually covers records `recA0, recA1, recB0...`
//! in the owning folder. It holds two child containers, channels and epochs,
//! which the execute axis expands as a cartesian product when the series
//! level is active.

use serde::{Deserialize, Serialize};

use crate::channel::{Channel, CHANNEL_PREFIX, CHANNEL_SEQ};
use crate::container::ObjectContainer;
use crate::entity::{Identity, NmEntity};
use crate::epoch::{Epoch, EPOCH_PREFIX};

pub const DATASERIES_PREFIX: &str = "series";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSeries {
    identity: Identity,
    channels: ObjectContainer<Channel>,
    epochs: ObjectContainer<Epoch>,
}

impl NmEntity for DataSeries {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn from_identity(identity: Identity) -> Self {
        Self {
            identity,
            channels: ObjectContainer::with_sequence(CHANNEL_PREFIX, CHANNEL_SEQ),
            epochs: ObjectContainer::new(EPOCH_PREFIX),
        }
    }
}

impl DataSeries {
    pub fn channels(&self) -> &ObjectContainer<Channel> {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut ObjectContainer<Channel> {
        &mut self.channels
    }

    pub fn epochs(&self) -> &ObjectContainer<Epoch> {
        &self.epochs
    }

    pub fn epochs_mut(&mut self) -> &mut ObjectContainer<Epoch> {
        &mut self.epochs
    }
}
