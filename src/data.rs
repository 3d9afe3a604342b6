//! Data records: one sampled waveform plus its axis metadata.

use serde::{Deserialize, Serialize};

use crate::entity::{Identity, NmEntity};
use crate::scale::Scale;

/// Default name prefix for records in a folder's data container.
pub const DATA_PREFIX: &str = "record";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data {
    identity: Identity,
    pub samples: Vec<f64>,
    pub xscale: Scale,
    pub yscale: Scale,
}

impl NmEntity for Data {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn from_identity(identity: Identity) -> Self {
        Self {
            identity,
            samples: Vec::new(),
            xscale: Scale::default(),
            yscale: Scale::default(),
        }
    }
}

impl Data {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
