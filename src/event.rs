// src/event.rs
//! Change notifications — parsing S3-style event JSON into a batch

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

pub type Result<T> = std::result::Result<T, RelayError>;

/// One created object, exactly as the trigger delivered it
///
/// `key` is still URL-encoded; use [`ChangeNotification::decoded_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub bucket: String,
    pub key: String,
}

impl ChangeNotification {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Notification for a plain object key, encoded the way a trigger would
    pub fn for_object(bucket: impl Into<String>, object_key: &str) -> Self {
        Self::new(bucket, encode_key(object_key))
    }

    pub fn decoded_key(&self) -> Result<String> {
        decode_key(&self.key)
    }
}

/// `+` becomes a space first, then percent-decoding
pub fn decode_key(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|key| key.into_owned())
        .map_err(|e| RelayError::InvalidNotification(format!("key '{raw}' is not UTF-8: {e}")))
}

/// Percent-encode an object key (every reserved byte, including `/` and `+`)
pub fn encode_key(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

/// Ordered notifications for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    records: Vec<ChangeNotification>,
}

impl Batch {
    pub fn new(records: Vec<ChangeNotification>) -> Self {
        Self { records }
    }

    /// Parse an S3 event; records without an `s3` entity are skipped
    pub fn from_event_json(json: &str) -> Result<Self> {
        let event: S3Event = serde_json::from_str(json)?;
        Ok(event.into_batch())
    }

    pub fn from_event_reader<R: Read>(reader: R) -> Result<Self> {
        let event: S3Event = serde_json::from_reader(reader)?;
        Ok(event.into_batch())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeNotification> {
        self.records.iter()
    }
}

impl FromIterator<ChangeNotification> for Batch {
    fn from_iter<I: IntoIterator<Item = ChangeNotification>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a ChangeNotification;
    type IntoIter = std::slice::Iter<'a, ChangeNotification>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// Wire shape of the trigger payload; only the fields the pipeline reads

#[derive(Debug, Deserialize)]
struct S3Event {
    #[serde(rename = "Records", alias = "records", default)]
    records: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    #[serde(default)]
    s3: Option<S3Entity>,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    #[serde(default)]
    bucket: BucketRef,
    #[serde(default)]
    object: ObjectRef,
}

#[derive(Debug, Default, Deserialize)]
struct BucketRef {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ObjectRef {
    #[serde(default)]
    key: Option<String>,
}

impl S3Event {
    fn into_batch(self) -> Batch {
        self.records
            .into_iter()
            .filter_map(|record| record.s3)
            .map(|s3| {
                // Missing names surface later as a per-record failure
                ChangeNotification::new(
                    s3.bucket.name.unwrap_or_default(),
                    s3.object.key.unwrap_or_default(),
                )
            })
            .collect()
    }
}
