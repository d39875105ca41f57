// Strongly-typed IR for codegen. No serde_json::Value here.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    String,
    Integer,
    Long,                    // integer outside the 32-bit range
    Double,
    Boolean,
    DateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum Ty {
    Primitive(Primitive),
    List(Box<Ty>),           // homogeneous: typed from the first element
    Reference(String),       // name of a `RecordType` in the same tree
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordType {
    pub name: String,
    pub fields: BTreeMap<String, Ty>, // iteration is lexicographic
}

/// Every record inferred from one document.
///
/// Records are kept in allocation order; the root is always the first entry.
#[derive(Debug, Clone, Serialize)]
pub struct TypeTree {
    root: String,
    records: IndexMap<String, RecordType>,
}

impl Ty {
    pub fn list(item: Ty) -> Self { Ty::List(Box::new(item)) }

    /// Innermost non-list descriptor.
    pub fn element(&self) -> &Ty {
        match self {
            Ty::List(item) => item.element(),
            other => other,
        }
    }
}

impl RecordType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fields: BTreeMap::new() }
    }
}

impl TypeTree {
    /// `records` must contain `root`. Built by `inference::Inference`.
    pub(crate) fn new(root: String, records: IndexMap<String, RecordType>) -> Self {
        debug_assert!(records.contains_key(&root));
        Self { root, records }
    }

    pub fn root_name(&self) -> &str { &self.root }

    pub fn root(&self) -> &RecordType {
        &self.records[self.root.as_str()]
    }

    pub fn get(&self, name: &str) -> Option<&RecordType> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Record names in allocation order (root first).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Every record except the root, sorted by name.
    pub fn nested_sorted(&self) -> Vec<&RecordType> {
        let mut out: Vec<&RecordType> = self.records
            .values()
            .filter(|r| r.name != self.root)
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    /// References that do not resolve to a record of this tree.
    pub fn dangling_references(&self) -> Vec<&str> {
        self.records
            .values()
            .flat_map(|r| r.fields.values())
            .filter_map(|ty| match ty.element() {
                Ty::Reference(name) if !self.records.contains_key(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}
