//! Single-sample record inference.
//!
//! Walk one JSON object depth-first and give every nested object its own
//! named record type. The result is a flat `TypeTree`:
//! - scalars map to a fixed primitive (null degrades to `String`);
//! - arrays are typed from their first element only;
//! - objects allocate `T<Key>`, suffixed `2`, `3`, … on collision.
//!
//! Names are allocated in key order, parent before children, so the same
//! document always yields the same tree.
pub mod str;
pub mod num;
pub mod names;

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::InferError;
use crate::ir::{Primitive, RecordType, Ty, TypeTree};
use names::NameTable;

/// Default name of the root record.
pub const DEFAULT_ROOT_NAME: &str = "TRoot";

const ROOT_PATH: &str = "$";

// ------------------------------ State ------------------------------------ //

/// Builder for one `TypeTree`. Consumed by `infer`.
#[derive(Debug)]
pub struct Inference {
    root: String,
    names: NameTable,
    records: IndexMap<String, RecordType>,
}

pub fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null      => "null",
        Value::Bool(_)   => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_)  => "array",
        Value::Object(_) => "object",
    }
}

fn child_path(parent: &str, key: &str) -> String {
    let plain = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        format!("{parent}.{key}")
    } else {
        format!("{parent}[{key:?}]")
    }
}

// ------------------------------ Observe ---------------------------------- //

impl Inference {
    fn allocate_record(&mut self, key: &str, path: &str) -> String {
        let name = self.names.allocate(&names::record_name(key));
        tracing::trace!(record = %name, path, "allocated record type");
        self.records.insert(name.clone(), RecordType::new(name.clone()));
        name
    }

    fn observe_value(&mut self, key: &str, v: &Value, path: &str) -> Result<Ty, InferError> {
        let ty = match v {
            Value::Null => Ty::Primitive(Primitive::String),
            Value::Bool(_) => Ty::Primitive(Primitive::Boolean),
            Value::Number(n) => Ty::Primitive(num::classify_number(n)),
            Value::String(s) => Ty::Primitive(str::classify_str(s)),
            Value::Array(xs) => {
                // assumes every element has the type of the first
                let Some(first) = xs.first() else {
                    return Err(InferError::EmptyArray { path: path.to_string() });
                };
                let item = self.observe_value(key, first, &format!("{path}[0]"))?;
                Ty::list(item)
            }
            Value::Object(m) => {
                let name = self.allocate_record(key, path);
                self.observe_object(&name, m, path)?;
                Ty::Reference(name)
            }
        };
        Ok(ty)
    }

    fn observe_object(&mut self, name: &str, map: &Map<String, Value>, path: &str) -> Result<(), InferError> {
        let mut fields = BTreeMap::new();
        for (k, v) in map {
            let ty = self.observe_value(k, v, &child_path(path, k))?;
            fields.insert(k.clone(), ty);
        }
        self.records[name].fields = fields;
        Ok(())
    }
}

// ------------------------------- Front API -------------------------------- //

impl Inference {
    /// Seed a builder whose root record is called `root_name`.
    /// The root name is reserved up front so nested records never take it.
    pub fn new(root_name: &str) -> Result<Self, InferError> {
        if root_name.is_empty() {
            return Err(InferError::EmptyRootName { name: root_name.to_string() });
        }
        let mut names = NameTable::new();
        names.reserve(root_name);
        let mut records = IndexMap::new();
        records.insert(root_name.to_string(), RecordType::new(root_name));
        Ok(Self { root: root_name.to_string(), names, records })
    }

    pub fn infer(mut self, document: &Value) -> Result<TypeTree, InferError> {
        let Value::Object(map) = document else {
            return Err(InferError::NotAnObject { found: kind_name(document) });
        };
        let root = self.root.clone();
        self.observe_object(&root, map, ROOT_PATH)?;
        Ok(TypeTree::new(self.root, self.records))
    }
}

/// Infer the record tree of `document`, naming the top-level record `root_name`.
pub fn infer(document: &Value, root_name: &str) -> Result<TypeTree, InferError> {
    Inference::new(root_name)?.infer(document)
}

// ------------------------------- Tests ------------------------------------ //
