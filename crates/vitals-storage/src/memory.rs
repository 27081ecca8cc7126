use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use vitals_core::models::collection::PatientCollection;

use crate::error::StorageError;
use crate::store::PatientStore;

/// In-process store. Counts loads and saves so callers can assert which
/// operations touched it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    patients: Mutex<PatientCollection>,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_patients(patients: PatientCollection) -> Self {
        Self {
            patients: Mutex::new(patients),
            ..Self::default()
        }
    }

    /// Current contents without counting as a load.
    pub fn snapshot(&self) -> PatientCollection {
        self.patients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl PatientStore for MemoryStore {
    fn load_all(&self) -> Result<PatientCollection, StorageError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot())
    }

    fn save_all(&self, patients: &PatientCollection) -> Result<(), StorageError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.patients.lock().unwrap_or_else(PoisonError::into_inner) = patients.clone();
        Ok(())
    }
}
