//! Named, identified containers of typed attributes.
//!
//! An entity stands for an agent or task in a workflow. It is a plain value
//! owned by whatever workflow created it; there is no registry.

mod value;

pub use value::AttributeValue;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

const DEFAULT_ENTITY_NAME: &str = "entity";

/// Unique identifier for an entity
///
/// Wraps a UUID v4. A fresh id is minted for every constructed or duplicated
/// entity, so two entities never share one even when their names match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(Uuid);

impl EntityId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an EntityId from a string representation
    ///
    /// Returns None if the string is not a valid UUID.
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Agent or task with a name, a fixed identity, and free-form attributes.
///
/// `Entity` does not implement `Clone`: a copy must carry a new identity, so
/// copying goes through [`Entity::duplicate`].
///
/// # Example
///
/// ```rust
/// use aios_core::Entity;
///
/// let mut researcher = Entity::new("Researcher");
/// researcher.set_attribute("role", "research");
/// researcher.set_attribute("max_iterations", 5_i64);
///
/// let backup = researcher.duplicate(Some("Researcher-2"));
/// assert_ne!(backup.id(), researcher.id());
/// assert_eq!(backup.get_attribute("role").and_then(|v| v.as_str()), Some("research"));
/// ```
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    name: String,
    attributes: BTreeMap<String, AttributeValue>,
    created_at: DateTime<Utc>,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new(DEFAULT_ENTITY_NAME)
    }
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_attributes(name, BTreeMap::new())
    }

    pub fn with_attributes(
        name: impl Into<String>,
        attributes: BTreeMap<String, AttributeValue>,
    ) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            attributes,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Insert or overwrite an attribute, returning the previous value.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.attributes.insert(key.into(), value.into())
    }

    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Stored value, or `default` when the key is absent.
    pub fn get_attribute_or(
        &self,
        key: &str,
        default: impl Into<AttributeValue>,
    ) -> AttributeValue {
        self.attributes
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<AttributeValue> {
        self.attributes.remove(key)
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttributeValue> {
        &self.attributes
    }

    /// Copy with a fresh identity. Keeps the current name unless `name` is
    /// given; attributes are copied and independent from then on.
    pub fn duplicate(&self, name: Option<&str>) -> Entity {
        Entity::with_attributes(
            name.unwrap_or(&self.name).to_string(),
            self.attributes.clone(),
        )
    }

    /// Owned copy of the entity for reporting.
    pub fn describe(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            created_at: self.created_at,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}, id={})", self.name, self.id)
    }
}

/// Detached view of an entity, safe to mutate or serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub name: String,
    pub attributes: BTreeMap<String, AttributeValue>,
    pub created_at: DateTime<Utc>,
}
