//! Domain entities. Pure data structures for the core business.
//!
//! Payload types mirror the remote API shapes we rely on and nothing more; unknown
//! fields are ignored, missing required fields fail deserialization.

use crate::domain::handle::Handle;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// Link relation and media type identifying the actor's ActivityPub document.
pub const SELF_REL: &str = "self";
pub const ACTIVITY_JSON: &str = "application/activity+json";

/// Identifier of a remote record. Servers send either a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(i64),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => RecordId(s),
            Raw::Number(n) => RecordId(n.to_string()),
        })
    }
}

/// Webfinger JRD. Only `links` is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebfingerDocument {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub links: Vec<WebfingerLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebfingerLink {
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(rename = "type", default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

impl WebfingerDocument {
    /// The `href` of the first `rel=self` link typed `application/activity+json`.
    pub fn activity_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel.as_deref() == Some(SELF_REL) && l.media_type.as_deref() == Some(ACTIVITY_JSON))
            .and_then(|l| l.href.as_deref())
    }
}

/// One account in a server's public directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: RecordId,
    pub uri: String,
    #[serde(default)]
    pub acct: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// A single status (post) of an actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: RecordId,
    pub created_at: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub uri: String,
}

impl Status {
    /// Tag membership, case-insensitive (servers normalise tags to lowercase).
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// Resolved remote account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub handle: Handle,
    pub activity_url: Url,
    pub server_base: Url,
    pub profile_id: RecordId,
}

/// Records merged across pages, keyed by an identifier field.
///
/// Re-inserting an existing key replaces the value but keeps its first position.
#[derive(Debug, Clone)]
pub struct KeyedCollection<T> {
    order: Vec<String>,
    items: HashMap<String, T>,
}

impl<T> Default for KeyedCollection<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            items: HashMap::new(),
        }
    }
}

impl<T> KeyedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, value: T) {
        if self.items.insert(key.clone(), value).is_none() {
            self.order.push(key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.items.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.order
            .iter()
            .filter_map(|k| self.items.get(k).map(|v| (k.as_str(), v)))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, v)| v)
    }
}

impl<T: Serialize> Serialize for KeyedCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Snapshot fetched once per run. Everything downstream is a pure transform of it.
#[derive(Debug, Clone)]
pub struct FetchedData {
    pub actor: Actor,
    pub statuses: KeyedCollection<Status>,
}
