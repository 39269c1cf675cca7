use serde::{Deserialize, Serialize};

/// An attribute transform definition.
///
/// `attributes` is kept as raw JSON because its shape depends on
/// `transform_type`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transform {
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub transform_type: String,

    #[serde(default)]
    pub attributes: Option<serde_json::Value>,

    /// Built-in transforms cannot be edited.
    #[serde(default)]
    pub internal: bool,
}
