//! In-memory organization of electrophysiology measurement data.
//!
//! The hierarchy is project → folder → {data, dataseries} →
//! {channel, epoch}. Every level is an [`ObjectContainer`]: an ordered,
//! uniquely-named collection with a select key, an execute target and
//! named set algebra over its keys. [`Session`] is the root context and
//! provides the cross-level views (selected path, execute path expansion).
//!
//! The crate holds state and addressing only. Analysis, persistence
//! formats and UI concerns live in consumers of this API; everything here
//! is serde-serializable so a persistence layer can rehydrate a session
//! without replaying operations.

pub mod channel;
pub mod container;
pub mod data;
pub mod dataseries;
pub mod entity;
pub mod epoch;
pub mod errors;
pub mod folder;
pub mod name;
pub mod notes;
pub mod preferences;
pub mod project;
pub mod scale;
pub mod session;
pub mod sets;

pub use channel::Channel;
pub use container::{ExecuteTarget, ObjectContainer};
pub use data::Data;
pub use dataseries::DataSeries;
pub use entity::{Identity, NmEntity};
pub use epoch::Epoch;
pub use errors::{CoreError, CoreResult};
pub use folder::Folder;
pub use name::SeqFormat;
pub use notes::{Note, Notes};
pub use preferences::Preferences;
pub use project::Project;
pub use scale::Scale;
pub use session::{ExecutePath, Session};
pub use sets::ALL_SET;
