//! Account records returned by `GET /v3/accounts`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for an account.
pub type AccountID = String;

/// An account on a connected source, correlated (or not) to an identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountID,

    pub name: String,

    #[serde(default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,

    pub source_id: String,

    #[serde(default)]
    pub source_name: Option<String>,

    /// Identity this account is correlated to; absent when uncorrelated.
    #[serde(default)]
    pub identity_id: Option<String>,

    /// Account identifier on the source system itself.
    #[serde(default)]
    pub native_identity: Option<String>,

    #[serde(default)]
    pub authoritative: bool,

    #[serde(default)]
    pub disabled: bool,

    #[serde(default)]
    pub locked: bool,

    #[serde(default)]
    pub uncorrelated: bool,

    #[serde(default)]
    attributes: Option<serde_json::Value>,
}

impl Account {
    /// Raw source attributes, if the API returned them.
    pub fn attributes(&self) -> Option<&serde_json::Value> {
        self.attributes.as_ref()
    }
}
