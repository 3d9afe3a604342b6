//! Session preferences.

use serde::{Deserialize, Serialize};

use crate::name::SeqFormat;

/// Behavior toggles a frontend reads before acting on the session.
///
/// `quiet` suppresses informational output; `confirm_delete` asks the user
/// before destructive operations. The core library never prompts itself;
/// these are advisory flags a UI layer honors. `name_seq` sets the
/// auto-name format for the session's project container (levels below keep
/// their own conventions, e.g. alphabetic channels).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub quiet: bool,
    pub confirm_delete: bool,
    pub name_seq: SeqFormat,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            quiet: false,
            confirm_delete: true,
            name_seq: SeqFormat::default(),
        }
    }
}
