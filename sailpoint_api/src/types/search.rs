use serde_json::{Map, Value};

/// One search hit. Its fields depend on the index it came from, so it is
/// kept as a loosely typed JSON object.
pub type SearchDocument = Map<String, Value>;

/// The document's `_type` discriminator (`identity`, `role`, ...).
pub fn document_type(doc: &SearchDocument) -> Option<&str> {
    doc.get("_type").and_then(Value::as_str)
}

/// The document's `name`, when it has one.
pub fn document_name(doc: &SearchDocument) -> Option<&str> {
    doc.get("name").and_then(Value::as_str)
}
