// Data models for Fraud Case Sync service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Page numbers: `null` or negative values count as zero
fn page_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<i64>::deserialize(deserializer)?.unwrap_or_default();
    Ok(u32::try_from(value.max(0)).unwrap_or(u32::MAX))
}

/// Fraud case as returned by the source API
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FraudCase {
    #[serde(deserialize_with = "null_as_default")]
    pub cdl_id: String,
    /// Epoch timestamp of the attack
    #[serde(deserialize_with = "null_as_default")]
    pub date_of_attack: i64,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub case_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub business_partner_country_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_account: BankAccount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BankAccount {
    #[serde(deserialize_with = "null_as_default")]
    pub bank_country_code: String,
}

/// One page of the source API's fraud case listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FraudCasePage {
    #[serde(deserialize_with = "page_number")]
    pub page: u32,
    #[serde(deserialize_with = "page_number")]
    pub number_of_pages: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub fraud_cases: Vec<FraudCase>,
}

/// Fraud case in the shape the destination API expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRecord {
    pub cdl_id: String,
    pub date_of_attack: i64,
    #[serde(rename = "type")]
    pub case_type: String,
    pub country_code: String,
}

/// Destination API reply to an upsert
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResponse {
    pub updated_at: DateTime<Utc>,
}

/// Source API key taken from a queue message body
///
/// Scoped to a single message. `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncCredential(String);

impl SyncCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn from_payload(payload: &[u8]) -> Self {
        Self(String::from_utf8_lossy(payload).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SyncCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SyncCredential(***)")
    }
}

/// Summary of one completed sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub pages: u32,
    pub records: usize,
    /// Deletion boundary sent to the destination
    pub cutoff: DateTime<Utc>,
}
