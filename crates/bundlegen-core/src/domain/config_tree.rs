//! Structured configuration tree.
//!
//! A configuration document reduced to a tagged union of mapping, sequence,
//! and scalar nodes. Adapters convert concrete formats (YAML) to and from
//! this tree; the domain only walks and edits it. Mapping entries preserve
//! insertion order so a rewritten file keeps its keys where the author put
//! them.

/// A scalar leaf, keeping enough type information to round-trip cleanly.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigScalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// One node of a configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigNode {
    /// Key-value pairs, insertion order preserved.
    Mapping(Vec<(String, ConfigNode)>),
    Sequence(Vec<ConfigNode>),
    Scalar(ConfigScalar),
    Null,
}

impl ConfigNode {
    pub fn empty_mapping() -> Self {
        Self::Mapping(Vec::new())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::Scalar(ConfigScalar::Str(s.into()))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// Value stored under `key`, if this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        match self {
            Self::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace `key` in a mapping node. Non-mapping nodes are
    /// promoted to a mapping first (a null node is an empty mapping in
    /// disguise, common for files that are empty or comment-only).
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigNode) {
        if !self.is_mapping() {
            *self = Self::empty_mapping();
        }
        let Self::Mapping(entries) = self else {
            unreachable!("node was just promoted to a mapping");
        };
        let key = key.into();
        match entries.iter().position(|(k, _)| *k == key) {
            Some(i) => entries[i].1 = value,
            None => entries.push((key, value)),
        }
    }

    /// Depth-first search for the first value stored under `key`, anywhere
    /// in the tree. Mapping entries are visited in order; sequences are
    /// descended into. Returns the value node itself (whatever its kind) so
    /// the caller can decide how to edit it.
    pub fn find_key_mut(&mut self, key: &str) -> Option<&mut ConfigNode> {
        match self {
            Self::Mapping(entries) => {
                for (k, v) in entries.iter_mut() {
                    if k.as_str() == key {
                        return Some(v);
                    }
                    if let Some(found) = v.find_key_mut(key) {
                        return Some(found);
                    }
                }
                None
            }
            Self::Sequence(items) => {
                for item in items.iter_mut() {
                    if let Some(found) = item.find_key_mut(key) {
                        return Some(found);
                    }
                }
                None
            }
            _ => None,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
