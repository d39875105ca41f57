use serde_json::Value;

use crate::error::{Error, Result};

/// Parse a JSON document, reporting the JSON path reached when parsing failed.
pub fn document_from_str(src: &str) -> Result<Value> {
    let de = &mut serde_json::Deserializer::from_str(src);
    let value = serde_path_to_error::deserialize::<_, Value>(&mut *de).map_err(|err| Error::Parse {
        path: err.path().to_string(),
        source: err.into_inner(),
    })?;
    // reject trailing garbage after the document
    de.end().map_err(|source| Error::Parse { path: ".".to_string(), source })?;
    Ok(value)
}

/// Select the sub-document at `pointer` (RFC 6901). `None` keeps the whole document.
pub fn select(mut document: Value, pointer: Option<&str>) -> Result<Value> {
    match pointer {
        None | Some("") => Ok(document),
        Some(p) => document
            .pointer_mut(p)
            .map(Value::take)
            .ok_or_else(|| Error::PointerNotFound { pointer: p.to_string() }),
    }
}
