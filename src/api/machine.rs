//! Machine list payload returned by the registry.
//!
//! Only `name` and `ipAddresses` feed the hosts file; the remaining fields
//! are decoded so the records stay useful in logs and tests. Missing or
//! `null` fields fall back to their defaults, mirroring how the registry
//! omits empty values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Response body of `GET /api/v1/machine`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MachineList {
    /// Machines in the order returned by the server
    #[serde(default, deserialize_with = "null_as_default")]
    pub machines: Vec<MachineRecord>,
}

impl MachineList {
    /// Decodes a machine list from a JSON body.
    ///
    /// A bare `null` body decodes to an empty list.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body is not a valid machine list.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<Option<Self>>(body).map(Option::unwrap_or_default)
    }

    /// Total number of IP addresses across all machines.
    #[must_use]
    pub fn address_count(&self) -> usize {
        self.machines.iter().map(|m| m.ip_addresses.len()).sum()
    }
}

/// A single registered machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachineRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub machine_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub node_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub disco_key: String,
    /// Addresses in the order returned by the server, not validated
    #[serde(deserialize_with = "null_as_default")]
    pub ip_addresses: Vec<String>,
    /// Display name, used as the hostname stem
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub namespace: Namespace,
    pub last_seen: Option<DateTime<Utc>>,
    pub last_successful_update: Option<DateTime<Utc>>,
    pub expiry: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub pre_auth_key: PreAuthKey,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "null_as_default")]
    pub register_method: String,
}

impl MachineRecord {
    /// Creates a record with only the fields used for rendering.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, ip_addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ip_addresses: ip_addresses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Namespace a machine belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Namespace {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Pre-auth key a machine registered with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreAuthKey {
    #[serde(deserialize_with = "null_as_default")]
    pub namespace: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reusable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub ephemeral: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub used: bool,
    pub expiration: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
