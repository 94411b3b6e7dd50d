use crate::utils::parse_record_date;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// A discovered post reference.
///
/// `date` is the day the post was discovered, not when it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub url: String,
    pub text: String,
    #[serde(rename = "keyword")]
    pub topic: String,
    #[serde(default, skip_serializing_if = "RecordDate::is_absent")]
    pub date: RecordDate,
    /// Fields written by other versions, carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(url: String, text: String, topic: String, date: NaiveDate) -> Self {
        Self {
            url,
            text,
            topic,
            date: RecordDate::from(date),
            extra: BTreeMap::new(),
        }
    }
}

/// Discovery date of a record.
///
/// The stored value is written back exactly as it was read; the calendar day is
/// only derived for ordering and display. A value no format recognizes has no day
/// and sorts as the oldest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordDate {
    day: Option<NaiveDate>,
    // None when the field was missing from the stored record
    raw: Option<Value>,
}

impl RecordDate {
    const FORMAT: &'static str = "%Y-%m-%d";

    pub fn from_value(raw: Value) -> Self {
        let day = raw.as_str().and_then(parse_record_date);
        Self {
            day,
            raw: Some(raw),
        }
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.day
    }

    /// Stored text of the date, empty when it is not a string
    pub fn raw(&self) -> &str {
        self.raw.as_ref().and_then(Value::as_str).unwrap_or("")
    }

    pub fn is_absent(&self) -> bool {
        self.raw.is_none()
    }
}

impl From<NaiveDate> for RecordDate {
    fn from(day: NaiveDate) -> Self {
        Self {
            day: Some(day),
            raw: Some(Value::String(day.format(Self::FORMAT).to_string())),
        }
    }
}

impl PartialEq<NaiveDate> for RecordDate {
    fn eq(&self, other: &NaiveDate) -> bool {
        self.day == Some(*other)
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day {
            Some(day) => write!(f, "{}", day.format(Self::FORMAT)),
            None => f.write_str(self.raw()),
        }
    }
}

impl Serialize for RecordDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.raw {
            Some(raw) => raw.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for RecordDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// URLs already seen, seeded from history and grown as a run accepts records.
#[derive(Debug, Clone, Default)]
pub struct KnownUrls {
    urls: HashSet<String>,
}

impl KnownUrls {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            urls: records.iter().map(|record| record.url.clone()).collect(),
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Returns true when the URL was not known before.
    pub fn insert(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

pub fn known_urls(records: &[Record]) -> KnownUrls {
    KnownUrls::from_records(records)
}
