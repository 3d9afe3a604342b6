//! Channels: per-channel axis metadata within a data series.
//!
//! Channel names use the alphabetic sequence (`A`, `B`, ...), matching the
//! acquisition convention where record `recA0` is channel `A`, epoch 0.

use serde::{Deserialize, Serialize};

use crate::entity::{Identity, NmEntity};
use crate::name::SeqFormat;
use crate::scale::Scale;

/// Channels have no name prefix; the alphabetic suffix is the whole name.
pub const CHANNEL_PREFIX: &str = "";

pub const CHANNEL_SEQ: SeqFormat = SeqFormat::Alpha { width: 1 };

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    identity: Identity,
    pub xscale: Scale,
    pub yscale: Scale,
}

impl NmEntity for Channel {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn identity_mut(&mut self) -> &mut Identity {
        &mut self.identity
    }

    fn from_identity(identity: Identity) -> Self {
        Self {
            identity,
            xscale: Scale::default(),
            yscale: Scale::default(),
        }
    }
}
