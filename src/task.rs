//! Task data structure and its persisted field formats.
//!
//! A `Task` serializes with camelCase keys (`dueDate`), its time as
//! `HH:MM:SS` and a missing due date as the empty string, which keeps the
//! stored blob readable by anything that understands the plain layout.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::fields::{Category, Priority};

/// A single to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub time: NaiveTime,
    #[serde(default, with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub category: Category,
}

impl Task {
    /// Numeric value of the id, when the id is a decimal counter value.
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }
}

mod due_date_format {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s, FORMAT)
                .map(Some)
                .map_err(de::Error::custom),
        }
    }
}
