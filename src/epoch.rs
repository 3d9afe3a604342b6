//! Epochs: one acquisition sweep within a data series.
//!
//! An epoch is pure identity (name, timestamp, notes); the samples live in
//! the folder's data records. Epochs exist so that set algebra and the
//! execute axis can address sweeps (`E0`, `E1`, ...) independently of
//! channels.

use serde::{Deserialize, Serialize};

use crate::entity::{Identity, NmEntity};

pub const EPOCH_PREFIX: &str = "E";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Epoch {
    identity: Identity,
}

impl NmEntity for Epoch {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn from_identity(identity: Identity) -> Self {
        Self { identity }
    }
}
