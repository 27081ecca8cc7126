use std::sync::Arc;

use vitals_storage::store::PatientStore;

use crate::service::PatientService;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub patients: Arc<PatientService>,
}

impl AppState {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self {
            patients: Arc::new(PatientService::new(store)),
        }
    }
}
