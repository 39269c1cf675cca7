use serde::{Deserialize, Serialize};

/// Pointer to another object (owner, source, identity, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type", default)]
    pub ref_type: Option<String>,
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}
