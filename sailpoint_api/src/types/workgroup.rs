use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Reference;

/// A governance group (beta API).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workgroup {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub owner: Option<Reference>,

    #[serde(default)]
    pub member_count: i64,

    #[serde(default)]
    pub connection_count: i64,

    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}
