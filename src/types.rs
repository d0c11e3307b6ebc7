use crate::error::{MembershipError, Result};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::path::PathBuf;

/// Untyped tabular data as read from the export
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// column names, from the header row
    pub headers: Vec<String>,
    /// each data row, one String per field
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// One supporter as listed in the membership export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberRecord {
    pub name: String,
    pub profile_url: String,
    pub membership_level: String,
    /// Months spent in the current level
    pub total_time_in_level: f64,
    /// Months as a paying member
    pub total_time_as_member: f64,
    pub last_update: String,
    pub last_update_timestamp: String,
}

impl MemberRecord {
    /// Parses `last_update_timestamp` (RFC 3339 / ISO-8601 with offset)
    pub fn last_update_at(&self) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.last_update_timestamp).map_err(|source| {
            MembershipError::InvalidTimestamp {
                value: self.last_update_timestamp.clone(),
                source,
            }
        })
    }
}

/// Members in export order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemberList {
    pub members: Vec<MemberRecord>,
}

impl MemberList {
    pub fn new(members: Vec<MemberRecord>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemberRecord> {
        self.members.iter()
    }
}

impl<'a> IntoIterator for &'a MemberList {
    type Item = &'a MemberRecord;
    type IntoIter = std::slice::Iter<'a, MemberRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Presentation data derived for a single member. Never stored with the member list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraInfo {
    pub photo_url: Option<String>,
    pub badge_image_path: PathBuf,
    pub photo_art: Option<String>,
}
