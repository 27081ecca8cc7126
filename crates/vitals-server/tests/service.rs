use std::sync::Arc;

use vitals_core::bmi::Verdict;
use vitals_core::models::patient::{PatientDraft, PatientUpdate};
use vitals_server::service::{PatientService, RecordError};
use vitals_storage::error::StorageError;
use vitals_storage::file::JsonFileStore;
use vitals_storage::memory::MemoryStore;

fn draft(id: &str, height: f64, weight: f64) -> PatientDraft {
    PatientDraft {
        id: Some(id.to_string()),
        name: Some("A".to_string()),
        city: Some("X".to_string()),
        age: Some(30),
        gender: Some("male".to_string()),
        height: Some(height),
        weight: Some(weight),
    }
}

async fn seeded(records: &[(&str, f64, f64)]) -> (Arc<MemoryStore>, PatientService) {
    let store = Arc::new(MemoryStore::new());
    let service = PatientService::new(store.clone());
    for (id, height, weight) in records {
        service.create(draft(id, *height, *weight)).await.unwrap();
    }
    (store, service)
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let (_, service) = seeded(&[]).await;
    service.create(draft("P001", 1.8, 90.0)).await.unwrap();

    let patient = service.get("P001").unwrap();
    assert_eq!(patient.id, "P001");
    assert_eq!(patient.attributes.name(), "A");
    assert_eq!(patient.attributes.city(), "X");
    assert_eq!(patient.attributes.age(), 30);
    assert_eq!(patient.attributes.height(), 1.8);
    assert_eq!(patient.attributes.weight(), 90.0);
    assert_eq!(patient.attributes.bmi(), 27.78);
    assert_eq!(patient.attributes.verdict(), Verdict::Normal);
}

#[tokio::test]
async fn duplicate_create_conflicts_without_writing() {
    let (store, service) = seeded(&[("P001", 1.8, 90.0)]).await;
    let before = store.snapshot();
    let saves = store.save_count();

    let err = service.create(draft("P001", 1.6, 50.0)).await.unwrap_err();
    assert!(matches!(err, RecordError::Conflict(ref id) if id == "P001"));
    assert_eq!(store.save_count(), saves);
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn invalid_create_never_reads_the_store() {
    let (store, service) = seeded(&[]).await;
    let mut bad = draft("P002", 1.7, 60.0);
    bad.age = Some(0);

    let err = service.create(bad).await.unwrap_err();
    assert!(matches!(err, RecordError::Validation(ref v) if v.has_field("age")));
    assert_eq!(store.load_count(), 0);
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found_without_writing() {
    let (store, service) = seeded(&[("P001", 1.8, 90.0)]).await;
    let saves = store.save_count();

    let update = PatientUpdate {
        weight: Some(Some(70.0)),
        ..Default::default()
    };
    let err = service.update("P999", update).await.unwrap_err();
    assert!(matches!(err, RecordError::NotFound(ref id) if id == "P999"));
    assert_eq!(store.save_count(), saves);
}

#[tokio::test]
async fn partial_update_preserves_untouched_fields() {
    let (store, service) = seeded(&[("P001", 1.8, 90.0)]).await;
    let before = service.get("P001").unwrap().attributes;

    let update = PatientUpdate {
        weight: Some(Some(110.0)),
        ..Default::default()
    };
    let updated = service.update("P001", update).await.unwrap();

    assert_eq!(updated.attributes.weight(), 110.0);
    assert_eq!(updated.attributes.bmi(), 33.95);
    assert_eq!(updated.attributes.verdict(), Verdict::Obese);
    assert_eq!(updated.attributes.name(), before.name());
    assert_eq!(updated.attributes.city(), before.city());
    assert_eq!(updated.attributes.age(), before.age());
    assert_eq!(updated.attributes.gender(), before.gender());
    assert_eq!(updated.attributes.height(), before.height());
    assert_eq!(store.snapshot().get("P001"), Some(&updated.attributes));
}

#[tokio::test]
async fn invalid_merged_update_is_not_committed() {
    let (store, service) = seeded(&[("P001", 1.8, 90.0)]).await;
    let before = store.snapshot();

    let update = PatientUpdate {
        height: Some(Some(-1.0)),
        ..Default::default()
    };
    let err = service.update("P001", update).await.unwrap_err();
    assert!(matches!(err, RecordError::Validation(_)));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn empty_update_saves_nothing() {
    let (store, service) = seeded(&[("P001", 1.8, 90.0)]).await;
    let saves = store.save_count();

    let unchanged = service
        .update("P001", PatientUpdate::default())
        .await
        .unwrap();
    assert_eq!(unchanged.attributes.bmi(), 27.78);
    assert_eq!(store.save_count(), saves);

    let err = service
        .update("P404", PatientUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::NotFound(_)));
}

#[tokio::test]
async fn list_sorted_by_bmi_is_stable() {
    let (_, service) = seeded(&[
        ("P1", 2.0, 100.0),
        ("P2", 1.0, 20.0),
        ("P3", 1.0, 25.0),
        ("P4", 1.6, 80.0),
    ])
    .await;

    let asc: Vec<_> = service
        .list_sorted("bmi", Some("asc"))
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(asc, ["P2", "P1", "P3", "P4"]);

    let desc: Vec<_> = service
        .list_sorted("bmi", None)
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(desc, ["P4", "P1", "P3", "P2"]);
}

#[tokio::test]
async fn bad_sort_arguments_never_read_the_store() {
    let (store, service) = seeded(&[]).await;

    let err = service.list_sorted("name", Some("asc")).unwrap_err();
    assert!(matches!(err, RecordError::InvalidArgument(_)));
    let err = service.list_sorted("bmi", Some("sideways")).unwrap_err();
    assert!(matches!(err, RecordError::InvalidArgument(_)));
    assert_eq!(store.load_count(), 0);
}

#[tokio::test]
async fn missing_store_file_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let service = PatientService::new(Arc::new(JsonFileStore::new(dir.path().join("absent.json"))));

    let err = service.get("P001").unwrap_err();
    assert!(matches!(err, RecordError::Storage(StorageError::NotFound { .. })));
    let err = service.create(draft("P001", 1.8, 90.0)).await.unwrap_err();
    assert!(matches!(err, RecordError::Storage(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_are_all_kept() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("patients.json"));
    store.create_if_missing().unwrap();
    let service = Arc::new(PatientService::new(Arc::new(store)));

    let mut tasks = Vec::new();
    for i in 0..16 {
        let service = service.clone();
        tasks.push(tokio::spawn(async move {
            service.create(draft(&format!("P{i:03}"), 1.7, 65.0)).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let all = service.list_sorted("height", Some("asc")).unwrap();
    assert_eq!(all.len(), 16);
}
