// src/batch.rs
//! One invocation: fetch the key once, relocate every record independently

use tracing::{info, warn};

use crate::config::PipelineSettings;
use crate::crypto::ObjectDecryptor;
use crate::error::RelayError;
use crate::event::Batch;
use crate::secret::{SecretKeyProvider, SecretStore};
use crate::store::ObjectStore;
use crate::transfer::{RecordOutcome, TransferCoordinator};

/// Per-record outcomes of one invocation, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    pub fn relocated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_relocated()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.relocated()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.is_relocated())
    }

    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}

/// Runs a batch against injected store clients
///
/// The clients are owned by the host and only borrowed here, so one set can
/// serve any number of invocations.
pub struct BatchProcessor<'a, S, O>
where
    S: SecretStore + ?Sized,
    O: ObjectStore + ?Sized,
{
    secrets: &'a S,
    objects: &'a O,
    settings: &'a PipelineSettings,
}

impl<'a, S, O> BatchProcessor<'a, S, O>
where
    S: SecretStore + ?Sized,
    O: ObjectStore + ?Sized,
{
    pub fn new(secrets: &'a S, objects: &'a O, settings: &'a PipelineSettings) -> Self {
        Self {
            secrets,
            objects,
            settings,
        }
    }

    /// Relocate every record of `batch`
    ///
    /// Errors only when the private key cannot be obtained; that happens before
    /// any object is touched. Per-record failures land in the report.
    pub fn process(&self, batch: &Batch) -> Result<BatchReport, RelayError> {
        if batch.is_empty() {
            info!("Empty batch, nothing to do");
            return Ok(BatchReport::default());
        }

        let provider = SecretKeyProvider::new(self.secrets, &self.settings.secret_id);
        let key = provider.fetch()?;

        let coordinator = TransferCoordinator::new(
            self.objects,
            ObjectDecryptor::new(self.settings.padding),
            &self.settings.destination_bucket,
        );

        info!(
            "Processing {} record(s) → bucket '{}'",
            batch.len(),
            self.settings.destination_bucket
        );

        let outcomes: Vec<RecordOutcome> = batch
            .iter()
            .map(|notification| coordinator.transfer(notification, key))
            .collect();
        let report = BatchReport { outcomes };

        if report.is_clean() {
            info!("Batch complete: {} relocated", report.relocated());
        } else {
            warn!(
                "Batch complete: {} relocated, {} failed",
                report.relocated(),
                report.failed()
            );
        }
        Ok(report)
    }
}
