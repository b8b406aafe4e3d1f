use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::Status;

/// Opaque record identifier, unwrapped from `{"$oid": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "RawId")]
pub struct RecordId(String);

impl RecordId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawId {
    Wrapped {
        #[serde(rename = "$oid")]
        oid: String,
    },
    Plain(String),
}

impl From<RawId> for RecordId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Wrapped { oid } => RecordId(oid),
            RawId::Plain(id) => RecordId(id),
        }
    }
}

impl From<RecordId> for RawId {
    fn from(id: RecordId) -> Self {
        RawId::Wrapped { oid: id.0 }
    }
}

/// Wrapped epoch-millis timestamp (`{"$date": 1490000000000}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    #[serde(rename = "$date")]
    pub millis: i64,
}

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.millis)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
}

/// One raw result record. Every domain field is optional; endpoints project
/// different subsets through the `field` parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defconfig: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defconfig_full: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub created_on: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            job: None,
            kernel: None,
            board: None,
            defconfig: None,
            defconfig_full: None,
            lab_name: None,
            arch: None,
            status: None,
            created_on: None,
            git_branch: None,
            metadata: None,
        }
    }

    /// Branch name, either top-level or nested under `metadata`.
    pub fn branch(&self) -> Option<&str> {
        self.git_branch
            .as_deref()
            .or_else(|| self.metadata.as_ref()?.git_branch.as_deref())
    }

    pub fn status(&self) -> Status {
        Status::from_raw(self.status.as_deref())
    }

    /// Field lookup by wire name, used by path templates.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "_id" => Some(self.id.as_str()),
            "job" => self.job.as_deref(),
            "kernel" => self.kernel.as_deref(),
            "board" => self.board.as_deref(),
            "defconfig" => self.defconfig.as_deref(),
            "defconfig_full" => self.defconfig_full.as_deref(),
            "lab_name" => self.lab_name.as_deref(),
            "arch" => self.arch.as_deref(),
            "status" => self.status.as_deref(),
            "git_branch" => self.branch(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_boot_record() {
        let json = r#"{
            "_id": {"$oid": "58d2ab5e59b5146d3b4e0b52"},
            "job": "mainline",
            "kernel": "v4.9",
            "board": "sun7i",
            "status": "PASS",
            "created_on": {"$date": 1490201438000},
            "unknown_field": 42
        }"#;

        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "58d2ab5e59b5146d3b4e0b52");
        assert_eq!(record.job.as_deref(), Some("mainline"));
        assert_eq!(record.created_on, Some(Timestamp::from_millis(1490201438000)));
        assert_eq!(record.status(), Status::Pass);
    }

    #[test]
    fn test_null_created_on() {
        let record: Record =
            serde_json::from_str(r#"{"_id": "abc", "created_on": null}"#).unwrap();
        assert_eq!(record.id.as_str(), "abc");
        assert!(record.created_on.is_none());
    }

    #[test]
    fn test_branch_from_metadata() {
        let record: Record = serde_json::from_str(
            r#"{"_id": "a", "metadata": {"git_branch": "master", "other": 1}}"#,
        )
        .unwrap();
        assert_eq!(record.branch(), Some("master"));
        assert_eq!(record.field("git_branch"), Some("master"));
    }

    #[test]
    fn test_top_level_branch_wins() {
        let mut record = Record::new("a");
        record.git_branch = Some("next".into());
        record.metadata = Some(Metadata {
            git_branch: Some("master".into()),
        });
        assert_eq!(record.branch(), Some("next"));
    }

    #[test]
    fn test_id_serializes_wrapped() {
        let json = serde_json::to_value(Record::new("xyz")).unwrap();
        assert_eq!(json["_id"]["$oid"], "xyz");
    }
}
