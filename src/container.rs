//! Ordered, uniquely-keyed container of entities at one tree level.
//!
//! Entries are stored in creation order (iteration order is creation order,
//! nothing more). Keys are entity names, compared case-insensitively at the
//! lookup boundary. Each container owns its sets, tracks one optional
//! select key and one execute target, and hands out auto-generated names
//! from its prefix and sequence format.
//!
//! Mutation takes `&mut self` and queries take `&self`, so the borrow
//! checker enforces the single-writer model: mutating during an open
//! iteration does not compile. Callers driving a container from several
//! threads must serialize access externally; the container carries no lock.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entity::{Identity, NmEntity};
use crate::errors::{CoreError, CoreResult};
use crate::name::{self, eq_ignore_case, SeqFormat};
use crate::sets::SetTable;

/// What a container executes bulk operations against.
///
/// `Select` is the sentinel meaning "track the select key". A key target
/// that no longer exists resolves to the empty set; deleting the targeted
/// entry resets the target to `Select`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecuteTarget {
    #[default]
    Select,
    Key(String),
    Set(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectContainer<T> {
    prefix: String,
    format: SeqFormat,
    entries: Vec<T>,
    sets: SetTable,
    select_key: Option<String>,
    execute: ExecuteTarget,
}

impl<T: NmEntity> ObjectContainer<T> {
    /// Container with numeric auto-naming: `prefix0, prefix1, ...`
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_sequence(prefix, SeqFormat::default())
    }

    /// Container with an explicit sequence format (e.g. alphabetic channel
    /// names `A, B, C...`).
    pub fn with_sequence(prefix: impl Into<String>, format: SeqFormat) -> Self {
        Self {
            prefix: prefix.into(),
            format,
            entries: Vec::new(),
            sets: SetTable::new(),
            select_key: None,
            execute: ExecuteTarget::Select,
        }
    }

    pub fn name_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| eq_ignore_case(e.name(), key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.position(key).map(|i| &self.entries[i])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.position(key).map(|i| &mut self.entries[i])
    }

    /// Keys in creation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.identity().name())
    }

    /// `(key, entity)` pairs in creation order. Restartable: each call
    /// walks from the first entry again.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|e| (e.identity().name(), e))
    }

    fn universe(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.identity().name()).collect()
    }

    fn check_new_name(&self, name: &str) -> CoreResult<()> {
        name::validate(name)?;
        if self.contains_key(name) {
            return Err(CoreError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Create an entry. With `None`, the next free auto-generated name is
    /// used (smallest unused sequence value, scanning from 0; deleted
    /// slots are reused). The first entry in an empty container becomes
    /// selected.
    pub fn create(&mut self, name: Option<&str>) -> CoreResult<String> {
        let key = match name {
            Some(n) => {
                self.check_new_name(n)?;
                n.to_string()
            }
            None => name::next_name(&self.prefix, self.format, self.entries.len(), |c| {
                self.contains_key(c)
            })?,
        };
        debug!("create: {key}");
        self.push_entry(T::from_identity(Identity::new(key.clone())));
        Ok(key)
    }

    /// Insert a pre-built entity, keyed by its own name. This is the
    /// bulk-load path: a persistence layer rehydrates a container by
    /// inserting entities in creation order without triggering auto-naming.
    pub fn insert(&mut self, entity: T) -> CoreResult<String> {
        self.check_new_name(entity.name())?;
        let key = entity.name().to_string();
        debug!("insert: {key}");
        self.push_entry(entity);
        Ok(key)
    }

    fn push_entry(&mut self, entity: T) {
        let first = self.entries.is_empty();
        let key = entity.name().to_string();
        self.entries.push(entity);
        if first {
            self.select_key = Some(key);
        }
    }

    /// Remove an entry and everything it owns. Literal set members drop the
    /// key; if the entry was selected, selection moves to the entry that
    /// preceded it in creation order (the new first entry if it had none);
    /// a key execute target pointing at it resets to the select sentinel.
    pub fn delete(&mut self, key: &str) -> CoreResult<T> {
        let idx = self.position(key).ok_or_else(|| CoreError::KeyNotFound {
            key: key.to_string(),
        })?;
        let canonical = self.entries[idx].name().to_string();
        debug!("delete: {canonical}");
        let removed = self.entries.remove(idx);
        self.sets.remove_key_everywhere(&canonical);
        if self
            .select_key
            .as_deref()
            .is_some_and(|s| eq_ignore_case(s, &canonical))
        {
            self.select_key = if self.entries.is_empty() {
                None
            } else {
                Some(self.entries[idx.saturating_sub(1)].name().to_string())
            };
        }
        if let ExecuteTarget::Key(k) = &self.execute {
            if eq_ignore_case(k, &canonical) {
                self.execute = ExecuteTarget::Select;
            }
        }
        Ok(removed)
    }

    /// Rename an entry in place. Creation order is preserved, literal set
    /// members referencing the old key are rewritten, and selection and
    /// execute targets follow the new key. The whole step is atomic, never
    /// observable as delete-then-create.
    pub fn rename(&mut self, key: &str, new_name: &str) -> CoreResult<()> {
        let idx = self.position(key).ok_or_else(|| CoreError::KeyNotFound {
            key: key.to_string(),
        })?;
        let old = self.entries[idx].name().to_string();
        name::validate(new_name)?;
        // Renaming to a different spelling of the same key is a case change,
        // not a collision.
        if !eq_ignore_case(&old, new_name) && self.contains_key(new_name) {
            return Err(CoreError::DuplicateName {
                name: new_name.to_string(),
            });
        }
        debug!("rename: {old} -> {new_name}");
        self.entries[idx]
            .identity_mut()
            .set_name(new_name.to_string());
        self.sets.rename_key(&old, new_name);
        if self
            .select_key
            .as_deref()
            .is_some_and(|s| eq_ignore_case(s, &old))
        {
            self.select_key = Some(new_name.to_string());
        }
        if let ExecuteTarget::Key(k) = &self.execute {
            if eq_ignore_case(k, &old) {
                self.execute = ExecuteTarget::Key(new_name.to_string());
            }
        }
        Ok(())
    }

    /// Copy an entry under a new name (auto-generated when `None`). The
    /// copy gets a fresh creation timestamp and inherits no set membership.
    pub fn duplicate(&mut self, key: &str, new_name: Option<&str>) -> CoreResult<String>
    where
        T: Clone,
    {
        let idx = self.position(key).ok_or_else(|| CoreError::KeyNotFound {
            key: key.to_string(),
        })?;
        let name = match new_name {
            Some(n) => {
                self.check_new_name(n)?;
                n.to_string()
            }
            None => name::next_name(&self.prefix, self.format, self.entries.len(), |c| {
                self.contains_key(c)
            })?,
        };
        debug!("duplicate: {key} -> {name}");
        let mut copy = self.entries[idx].clone();
        copy.identity_mut().set_name(name.clone());
        copy.identity_mut().touch_created();
        self.push_entry(copy);
        Ok(name)
    }

    /// Permute creation order. `order` must name every current entry
    /// exactly once.
    pub fn reorder(&mut self, order: &[&str]) -> CoreResult<()> {
        let mut indices = Vec::with_capacity(order.len());
        for key in order {
            let idx = self.position(key).ok_or_else(|| CoreError::KeyNotFound {
                key: key.to_string(),
            })?;
            if indices.contains(&idx) {
                return Err(CoreError::DuplicateName {
                    name: key.to_string(),
                });
            }
            indices.push(idx);
        }
        if indices.len() != self.entries.len() {
            let missing = self
                .keys()
                .find(|k| !order.iter().any(|o| eq_ignore_case(o, k)))
                .unwrap_or_default()
                .to_string();
            return Err(CoreError::KeyNotFound { key: missing });
        }
        let mut old: Vec<Option<T>> = self.entries.drain(..).map(Some).collect();
        for idx in indices {
            self.entries.push(old[idx].take().expect("index used once"));
        }
        Ok(())
    }

    /// Delete everything: entries, set members and selection. Set
    /// definitions survive empty.
    pub fn clear(&mut self) {
        debug!("clear: {} entries", self.entries.len());
        let keys: Vec<String> = self.keys().map(String::from).collect();
        self.entries.clear();
        for key in &keys {
            self.sets.remove_key_everywhere(key);
        }
        self.select_key = None;
        self.execute = ExecuteTarget::Select;
    }

    // --- selection -------------------------------------------------------

    pub fn select(&mut self, key: &str) -> CoreResult<()> {
        let idx = self.position(key).ok_or_else(|| CoreError::KeyNotFound {
            key: key.to_string(),
        })?;
        self.select_key = Some(self.entries[idx].name().to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.select_key = None;
    }

    pub fn select_key(&self) -> Option<&str> {
        self.select_key.as_deref()
    }

    pub fn selected(&self) -> Option<&T> {
        self.select_key.as_deref().and_then(|k| self.get(k))
    }

    pub fn selected_mut(&mut self) -> Option<&mut T> {
        let key = self.select_key.clone()?;
        self.get_mut(&key)
    }

    // --- execute target --------------------------------------------------

    /// Point bulk execution at a key, a set, or back at the select
    /// sentinel. Key and set targets must exist now.
    pub fn set_execute(&mut self, target: ExecuteTarget) -> CoreResult<()> {
        match &target {
            ExecuteTarget::Select => {}
            ExecuteTarget::Key(key) => {
                if !self.contains_key(key) {
                    return Err(CoreError::KeyNotFound {
                        key: key.clone(),
                    });
                }
            }
            ExecuteTarget::Set(name) => {
                if !self.sets.contains_set(name) {
                    return Err(CoreError::SetNotFound { name: name.clone() });
                }
            }
        }
        self.execute = target;
        Ok(())
    }

    pub fn execute_target(&self) -> &ExecuteTarget {
        &self.execute
    }

    /// Keys the execute target currently resolves to, in creation order.
    /// Empty is legal: it means "operate on nothing".
    pub fn resolve_execute(&self) -> CoreResult<Vec<String>> {
        match &self.execute {
            ExecuteTarget::Select => Ok(self.select_key.iter().cloned().collect()),
            ExecuteTarget::Key(key) => Ok(self
                .get(key)
                .map(|e| vec![e.name().to_string()])
                .unwrap_or_default()),
            ExecuteTarget::Set(name) => {
                let universe = self.universe();
                match self.sets.evaluate(name, &universe) {
                    Ok(keys) => Ok(keys),
                    // A dangling set target behaves like a stale key target.
                    Err(CoreError::SetNotFound { .. }) => Ok(Vec::new()),
                    Err(e) => Err(e),
                }
            }
        }
    }

    // --- sets ------------------------------------------------------------

    pub fn create_set(&mut self, name: &str) -> CoreResult<()> {
        self.sets.create(name)
    }

    pub fn create_set_expression(&mut self, name: &str, expr: &str) -> CoreResult<()> {
        self.sets.create_expression(name, expr)
    }

    /// Delete a set; an execute target pointing at it resets to the select
    /// sentinel.
    pub fn delete_set(&mut self, name: &str) -> CoreResult<()> {
        self.sets.delete(name)?;
        if let ExecuteTarget::Set(s) = &self.execute {
            if eq_ignore_case(s, name) {
                self.execute = ExecuteTarget::Select;
            }
        }
        Ok(())
    }

    pub fn rename_set(&mut self, name: &str, new_name: &str) -> CoreResult<()> {
        self.sets.rename(name, new_name)?;
        if let ExecuteTarget::Set(s) = &self.execute {
            if eq_ignore_case(s, name) {
                self.execute = ExecuteTarget::Set(new_name.to_string());
            }
        }
        Ok(())
    }

    pub fn set_add(&mut self, set_name: &str, key: &str) -> CoreResult<()> {
        let universe: Vec<String> = self.keys().map(String::from).collect();
        let refs: Vec<&str> = universe.iter().map(String::as_str).collect();
        self.sets.add(set_name, key, &refs)
    }

    pub fn set_remove(&mut self, set_name: &str, key: &str) -> CoreResult<bool> {
        self.sets.remove(set_name, key)
    }

    pub fn set_contains(&self, set_name: &str, key: &str) -> CoreResult<bool> {
        self.sets.contains(set_name, key, &self.universe())
    }

    /// Evaluate a set (including the implicit `all`) against current
    /// entries, in creation order.
    pub fn evaluate(&self, set_name: &str) -> CoreResult<Vec<String>> {
        self.sets.evaluate(set_name, &self.universe())
    }

    /// User-defined set names in creation order.
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.names()
    }
}
