use serde_json::{Map, Value};
use vitals_core::models::collection::PatientCollection;
use vitals_core::models::patient::PatientAttributes;

use crate::error::StorageError;

/// A backing for the whole patient collection.
///
/// Every write replaces the full collection. Implementations do no locking
/// of their own; callers that mutate concurrently must serialize
/// load-modify-save themselves.
pub trait PatientStore: Send + Sync {
    fn load_all(&self) -> Result<PatientCollection, StorageError>;

    fn save_all(&self, patients: &PatientCollection) -> Result<(), StorageError>;
}

/// Parse a persisted collection: one JSON object keyed by patient id.
///
/// Each value is validated and its derived fields recomputed. Key order in
/// the document becomes collection order.
pub fn decode(bytes: &[u8]) -> Result<PatientCollection, StorageError> {
    let raw: Map<String, Value> =
        serde_json::from_slice(bytes).map_err(|e| StorageError::Malformed(e.to_string()))?;

    raw.into_iter()
        .map(|(id, value)| {
            if id.trim().is_empty() {
                return Err(StorageError::InvalidRecord {
                    id,
                    reason: "empty patient id".to_string(),
                });
            }
            match serde_json::from_value::<PatientAttributes>(value) {
                Ok(attributes) => Ok((id, attributes)),
                Err(e) => Err(StorageError::InvalidRecord {
                    id,
                    reason: e.to_string(),
                }),
            }
        })
        .collect()
}

/// Serialize a collection as pretty JSON, preserving collection order.
pub fn encode(patients: &PatientCollection) -> Result<Vec<u8>, StorageError> {
    let mut doc = Map::new();
    for (id, attributes) in patients.iter() {
        doc.insert(id.to_string(), serde_json::to_value(attributes)?);
    }
    Ok(serde_json::to_vec_pretty(&Value::Object(doc))?)
}
