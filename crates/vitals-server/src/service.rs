use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use vitals_core::error::ValidationError;
use vitals_core::models::patient::{Patient, PatientDraft, PatientUpdate};
use vitals_core::sort::{self, SortError, SortField, SortOrder};
use vitals_storage::error::StorageError;
use vitals_storage::store::PatientStore;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("patient '{0}' not found")]
    NotFound(String),

    #[error("patient '{0}' already exists")]
    Conflict(String),

    #[error("{0}")]
    InvalidArgument(#[from] SortError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// The four record operations over a [`PatientStore`].
///
/// Each call loads the full collection; writes save it back whole. Writers
/// are serialized by `writes` so concurrent load-modify-save cycles cannot
/// drop each other's changes. Reads take no lock.
pub struct PatientService {
    store: Arc<dyn PatientStore>,
    writes: Mutex<()>,
}

impl PatientService {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self {
            store,
            writes: Mutex::new(()),
        }
    }

    pub fn get(&self, id: &str) -> Result<Patient, RecordError> {
        self.store
            .load_all()?
            .patient(id)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))
    }

    /// All records ordered by `sort_by`. `order` defaults to descending.
    /// Arguments are checked before the store is read.
    pub fn list_sorted(
        &self,
        sort_by: &str,
        order: Option<&str>,
    ) -> Result<Vec<Patient>, RecordError> {
        let field: SortField = sort_by.parse()?;
        let order = order
            .map(str::parse::<SortOrder>)
            .transpose()?
            .unwrap_or_default();

        let mut patients = self.store.load_all()?.patients();
        sort::sort_patients(&mut patients, field, order);
        Ok(patients)
    }

    pub async fn create(&self, draft: PatientDraft) -> Result<Patient, RecordError> {
        let patient = draft.into_patient()?;

        let _guard = self.writes.lock().await;
        let mut patients = self.store.load_all()?;
        if patients.contains(&patient.id) {
            return Err(RecordError::Conflict(patient.id));
        }
        patients.insert(patient.id.clone(), patient.attributes.clone());
        self.store.save_all(&patients)?;

        tracing::info!(patient_id = %patient.id, bmi = patient.attributes.bmi(), "patient created");
        Ok(patient)
    }

    /// Merge `update` over the stored record and commit only if the merged
    /// record passes full validation. An empty update saves nothing.
    pub async fn update(&self, id: &str, update: PatientUpdate) -> Result<Patient, RecordError> {
        let _guard = self.writes.lock().await;
        let mut patients = self.store.load_all()?;
        let existing = patients
            .get(id)
            .ok_or_else(|| RecordError::NotFound(id.to_string()))?;

        if update.is_empty() {
            tracing::debug!(patient_id = %id, "empty update, nothing to save");
            return Ok(Patient {
                id: id.to_string(),
                attributes: existing.clone(),
            });
        }

        let attributes = update.apply(existing)?;
        patients.insert(id.to_string(), attributes.clone());
        self.store.save_all(&patients)?;

        tracing::info!(patient_id = %id, bmi = attributes.bmi(), "patient updated");
        Ok(Patient {
            id: id.to_string(),
            attributes,
        })
    }
}
