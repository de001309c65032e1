//! File version record as listed by the backend.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One stored version of one logical file.
///
/// `(parent_url, version_number)` identifies a record within a listing.
/// The client never mutates a record; it only receives fresh snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileVersionRecord {
    /// Backend identifier. Accepted as a JSON number or string.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Original file name, used when saving a download.
    pub file_name: String,
    /// Sequential version number within the parent URL.
    pub version_number: u32,
    /// Logical path grouping all versions of one file.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub parent_url: String,
    /// When this version was uploaded.
    pub upload_time: DateTime<Utc>,
    /// Whether the owner may read this version.
    #[serde(default = "default_true")]
    pub can_read: bool,
    /// Whether the owner may overwrite this version.
    #[serde(default = "default_true")]
    pub can_write: bool,
    /// SHA-256 of the content, when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
}

impl FileVersionRecord {
    /// Upload time converted to the local time zone.
    pub fn uploaded_at_local(&self) -> DateTime<Local> {
        self.upload_time.with_timezone(&Local)
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_true() -> bool {
    true
}
