//! Data model for generated mapping documents.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered attribute map parsed from one CSV row.
///
/// Always contains a non-empty `key` once it leaves the reader; ignored
/// columns such as `comment` are stripped before this point.
pub type Entry = IndexMap<String, String>;

/// One generated entry: a stable numeric id plus the source attributes
/// in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRecord {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Entry,
}

impl MappingRecord {
    /// The record's key attribute, if present.
    pub fn key(&self) -> Option<&str> {
        self.fields.get("key").map(String::as_str)
    }
}

/// The persisted JSON document for one mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub data: Vec<MappingRecord>,
}

impl MappingDocument {
    /// Keys of the generated records in document order.
    pub fn keys(&self) -> Vec<String> {
        self.data
            .iter()
            .filter_map(MappingRecord::key)
            .map(str::to_string)
            .collect()
    }
}
