// src/transfer.rs
//! Per-record relocation: fetch → decrypt → upload → delete
//!
//! The source object is only deleted after the destination write has
//! succeeded, and never when source and destination are the same bucket.
//! Any failure stops the record where it is, so the source stays in place
//! for remediation.

use tracing::{debug, info, warn};

use crate::crypto::{KeyMaterial, ObjectDecryptor};
use crate::enums::{RecordStage, StoreOp};
use crate::error::{BackendError, RelayError};
use crate::event::ChangeNotification;
use crate::store::ObjectStore;

/// Final state of one record
#[derive(Debug)]
pub enum RecordStatus {
    Relocated { plaintext_len: usize },
    Failed { stage: RecordStage, error: RelayError },
}

#[derive(Debug)]
pub struct RecordOutcome {
    pub source_bucket: String,
    /// Decoded object key, or the raw key when it could not be decoded
    pub key: String,
    pub status: RecordStatus,
}

impl RecordOutcome {
    pub fn is_relocated(&self) -> bool {
        matches!(self.status, RecordStatus::Relocated { .. })
    }

    /// `Done` on success, otherwise the stage that failed
    pub fn stage(&self) -> RecordStage {
        match &self.status {
            RecordStatus::Relocated { .. } => RecordStage::Done,
            RecordStatus::Failed { stage, .. } => *stage,
        }
    }

    pub fn error(&self) -> Option<&RelayError> {
        match &self.status {
            RecordStatus::Relocated { .. } => None,
            RecordStatus::Failed { error, .. } => Some(error),
        }
    }
}

type StepResult<T> = Result<T, (RecordStage, RelayError)>;

pub struct TransferCoordinator<'a, O: ObjectStore + ?Sized> {
    objects: &'a O,
    decryptor: ObjectDecryptor,
    destination_bucket: &'a str,
}

impl<'a, O: ObjectStore + ?Sized> TransferCoordinator<'a, O> {
    pub fn new(objects: &'a O, decryptor: ObjectDecryptor, destination_bucket: &'a str) -> Self {
        Self {
            objects,
            decryptor,
            destination_bucket,
        }
    }

    /// Move one notified object to the destination bucket
    ///
    /// Never returns an error: failures are reported in the outcome.
    pub fn transfer(&self, notification: &ChangeNotification, key: &KeyMaterial) -> RecordOutcome {
        let source_bucket = notification.bucket.clone();

        let object_key = match resolve(notification) {
            Ok(object_key) => object_key,
            Err(error) => {
                warn!("Skipping notification {notification:?}: {error}");
                return RecordOutcome {
                    source_bucket,
                    key: notification.key.clone(),
                    status: RecordStatus::Failed {
                        stage: RecordStage::Fetching,
                        error,
                    },
                };
            }
        };

        if source_bucket == self.destination_bucket {
            let error = RelayError::InvalidNotification(format!(
                "source and destination bucket are the same ('{source_bucket}')"
            ));
            warn!("Skipping {source_bucket}/{object_key}: {error}");
            return RecordOutcome {
                source_bucket,
                key: object_key,
                status: RecordStatus::Failed {
                    stage: RecordStage::Fetching,
                    error,
                },
            };
        }

        info!("Processing {source_bucket}/{object_key}");
        let status = match self.relocate(&source_bucket, &object_key, key) {
            Ok(plaintext_len) => {
                info!(
                    "Relocated {source_bucket}/{object_key} → {}/{object_key} ({plaintext_len} bytes)",
                    self.destination_bucket
                );
                RecordStatus::Relocated { plaintext_len }
            }
            Err((stage, error)) => {
                warn!("FAILED {source_bucket}/{object_key} while {stage}: {error}");
                RecordStatus::Failed { stage, error }
            }
        };

        RecordOutcome {
            source_bucket,
            key: object_key,
            status,
        }
    }

    fn relocate(&self, bucket: &str, object_key: &str, key: &KeyMaterial) -> StepResult<usize> {
        let ciphertext = self
            .fetch(bucket, object_key)
            .map_err(|e| (RecordStage::Fetching, e))?;
        debug!("{bucket}/{object_key}: fetched {} bytes", ciphertext.len());

        let plaintext = self
            .decryptor
            .decrypt(key, &ciphertext)
            .map_err(|e| (RecordStage::Decrypting, e))?;
        let plaintext_len = plaintext.expose_secret().len();
        debug!("{bucket}/{object_key}: decrypted with {}", self.decryptor.padding());

        self.objects
            .put_object(self.destination_bucket, object_key, plaintext.expose_secret())
            .map_err(|e| {
                let error = store_error(StoreOp::Put, self.destination_bucket, object_key, e);
                (RecordStage::Uploading, error)
            })?;
        debug!("{bucket}/{object_key}: written to {}", self.destination_bucket);

        match self.objects.delete_object(bucket, object_key) {
            Ok(()) | Err(BackendError::NotFound) => {}
            Err(e) => {
                let error = store_error(StoreOp::Delete, bucket, object_key, e);
                return Err((RecordStage::Deleting, error));
            }
        }
        debug!("{bucket}/{object_key}: source deleted");

        Ok(plaintext_len)
    }

    fn fetch(&self, bucket: &str, object_key: &str) -> Result<Vec<u8>, RelayError> {
        let body = self
            .objects
            .get_object(bucket, object_key)
            .map_err(|e| match e {
                BackendError::NotFound => RelayError::ObjectNotFound {
                    bucket: bucket.to_owned(),
                    key: object_key.to_owned(),
                },
                other => store_error(StoreOp::Get, bucket, object_key, other),
            })?;

        if body.is_empty() {
            return Err(RelayError::EmptyObject {
                bucket: bucket.to_owned(),
                key: object_key.to_owned(),
            });
        }
        Ok(body)
    }
}

fn resolve(notification: &ChangeNotification) -> Result<String, RelayError> {
    if notification.bucket.trim().is_empty() {
        return Err(RelayError::InvalidNotification("missing bucket name".into()));
    }
    if notification.key.is_empty() {
        return Err(RelayError::InvalidNotification("missing object key".into()));
    }
    notification.decoded_key()
}

fn store_error(op: StoreOp, bucket: &str, key: &str, err: BackendError) -> RelayError {
    match err {
        BackendError::InvalidKey(bad) => {
            RelayError::InvalidNotification(format!("store rejected key '{bad}'"))
        }
        other => RelayError::StoreUnavailable {
            op,
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            reason: other.to_string(),
        },
    }
}
