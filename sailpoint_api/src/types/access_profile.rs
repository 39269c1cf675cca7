use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Reference;

/// A bundle of entitlements from one source, requestable as a unit.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessProfile {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub requestable: bool,

    pub owner: Option<Reference>,

    pub source: Option<Reference>,

    #[serde(default)]
    pub entitlements: Vec<Reference>,
}
