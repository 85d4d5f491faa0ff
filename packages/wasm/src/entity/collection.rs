//! Ordered, uniquely-keyed collection of entity states.
//!
//! An [`EntityCollection`] behaves as an immutable value. Both the id order
//! and the state map are reference counted: [`EntityCollection::with`]
//! shares the id order with the collection it was derived from, and
//! [`EntityCollection::set`] only copies the state map when another
//! collection still shares it.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{EntityKind, GraphResult, GraphWorldError};

/// A state type that can live in an [`EntityCollection`].
pub trait Entity: Clone {
    /// Collection kind reported in lookup errors.
    const KIND: EntityKind;
}

/// Ordered id sequence plus an id -> state mapping.
///
/// The key set of `states` is always exactly the set of `ids`, and the
/// iteration order of the collection is the order of `ids`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCollection<T> {
    ids: Rc<[String]>,
    states: Rc<HashMap<String, T>>,
}

impl<T: Entity> EntityCollection<T> {
    /// Build a collection from ordered `(id, state)` entries.
    ///
    /// Fails with [`GraphWorldError::DuplicateId`] if two entries share an id.
    pub fn create<I, S>(entries: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        let entries = entries.into_iter();
        let (lower, _) = entries.size_hint();
        let mut ids = Vec::with_capacity(lower);
        let mut states = HashMap::with_capacity(lower);

        for (id, state) in entries {
            let id = id.into();
            if states.contains_key(&id) {
                return Err(GraphWorldError::DuplicateId { kind: T::KIND, id });
            }
            states.insert(id.clone(), state);
            ids.push(id);
        }

        Ok(Self {
            ids: ids.into(),
            states: Rc::new(states),
        })
    }

    /// Build a collection from a separate id order and state map.
    ///
    /// This is the shape of the interchange format, so both halves are
    /// checked against each other.
    pub fn from_parts(ids: Vec<String>, mut states: HashMap<String, T>) -> GraphResult<Self> {
        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id.as_str()) {
                return Err(GraphWorldError::DuplicateId {
                    kind: T::KIND,
                    id: id.clone(),
                });
            }
            if !states.contains_key(id) {
                return Err(GraphWorldError::CollectionMismatch { id: id.clone() });
            }
        }
        if states.len() != ids.len() {
            let extra = states
                .keys()
                .find(|key| !seen.contains(key.as_str()))
                .cloned()
                .unwrap_or_default();
            return Err(GraphWorldError::CollectionMismatch { id: extra });
        }
        states.shrink_to_fit();

        Ok(Self {
            ids: ids.into(),
            states: Rc::new(states),
        })
    }

    /// Get the state for an id.
    pub fn get(&self, id: &str) -> GraphResult<&T> {
        self.states.get(id).ok_or_else(|| GraphWorldError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
    }

    /// Copy-on-write replacement of a single entry.
    ///
    /// The id order is unchanged and shared with `self`. Fails with
    /// [`GraphWorldError::NotFound`] if `id` is absent; nothing is inserted.
    pub fn with(&self, id: &str, state: T) -> GraphResult<Self> {
        let mut next = self.clone();
        next.set(id, state)?;
        Ok(next)
    }

    /// Replace a single entry in place.
    ///
    /// The state map is copied first only if another collection shares it,
    /// so collections derived from `self` never observe the change. Fails
    /// with [`GraphWorldError::NotFound`] if `id` is absent.
    pub fn set(&mut self, id: &str, state: T) -> GraphResult<()> {
        if !self.states.contains_key(id) {
            return Err(GraphWorldError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            });
        }

        if let Some(slot) = Rc::make_mut(&mut self.states).get_mut(id) {
            *slot = state;
        }
        Ok(())
    }
}

impl<T> EntityCollection<T> {
    /// Ids in collection order.
    #[inline]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.states.contains_key(id)
    }

    /// Shared handle to the id order; no copy is made.
    #[inline]
    pub fn shared_ids(&self) -> Rc<[String]> {
        Rc::clone(&self.ids)
    }

    /// Iterate `(id, state)` pairs in collection order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.ids
            .iter()
            .filter_map(|id| self.states.get(id).map(|state| (id.as_str(), state)))
    }

    /// Check whether two collections share the same id order allocation.
    #[cfg(test)]
    pub(crate) fn shares_ids_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.ids, &other.ids)
    }

    /// Check whether two collections share the same state map allocation.
    #[cfg(test)]
    pub(crate) fn shares_states_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.states, &other.states)
    }
}

impl<T> Default for EntityCollection<T> {
    fn default() -> Self {
        Self {
            ids: Rc::from(Vec::new()),
            states: Rc::default(),
        }
    }
}

// ============================================================================
// Interchange format: { ids: [...], states: { <id>: state } }
// ============================================================================

/// Unvalidated collection as it appears in an interchange document.
#[derive(Debug, Deserialize)]
pub(crate) struct RawCollection<T> {
    pub ids: Vec<String>,
    pub states: HashMap<String, T>,
}

impl<T: Entity> RawCollection<T> {
    pub(crate) fn validate(self) -> GraphResult<EntityCollection<T>> {
        EntityCollection::from_parts(self.ids, self.states)
    }
}

struct OrderedStates<'a, T>(&'a EntityCollection<T>);

impl<T: Serialize> Serialize for OrderedStates<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

impl<T: Serialize> Serialize for EntityCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EntityCollection", 2)?;
        state.serialize_field("ids", &*self.ids)?;
        state.serialize_field("states", &OrderedStates(self))?;
        state.end()
    }
}

impl<'de, T> Deserialize<'de> for EntityCollection<T>
where
    T: Entity + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCollection::<T>::deserialize(deserializer)?;
        raw.validate().map_err(de::Error::custom)
    }
}
