use tessera_database::Database;
use tessera_domain::legacy::{JobStatus, MappingType, SyncDirection};
use tessera_event_bus::EventBus;
use tessera_legacy::{JobProgress, JobTracker, LegacyError, MappingStore, OverrideValue};

async fn test_db(name: &str) -> Database {
    Database::builder()
        .url("mem://")
        .session("test_ns", name)
        .init()
        .await
        .expect("connect to mem://")
}

#[tokio::test]
async fn mapping_pair_is_unique() {
    let store = MappingStore::new(test_db("legacy_unique_pair").await);

    let mapping = store
        .create(101, "content-1", MappingType::Imported, SyncDirection::LegacyToCms)
        .await
        .expect("first mapping");
    assert!(mapping.is_active);

    let err = store
        .create(101, "content-1", MappingType::Linked, SyncDirection::None)
        .await
        .unwrap_err();
    assert!(matches!(err, LegacyError::DuplicateMapping { .. }));

    // Same article to a different item is a separate mapping.
    store
        .create(101, "content-2", MappingType::Redirect, SyncDirection::None)
        .await
        .expect("different pair");
}

#[tokio::test]
async fn overrides_keep_one_active_per_field() {
    let store = MappingStore::new(test_db("legacy_overrides").await);
    let mapping = store
        .create(7, "content-7", MappingType::Linked, SyncDirection::LegacyToCms)
        .await
        .expect("mapping");

    store
        .set_override(&mapping.id, "title", OverrideValue::Str("Old title".to_owned()))
        .await
        .expect("first override");
    store
        .set_override(&mapping.id, "title", OverrideValue::Str("New title".to_owned()))
        .await
        .expect("second override");
    store
        .set_override(&mapping.id, "priority", OverrideValue::Int(3))
        .await
        .expect("other field");

    let active = store.active_overrides(&mapping.id).await.expect("active overrides");
    assert_eq!(active.len(), 2);

    let title = active.iter().find(|o| o.field_name == "title").expect("title override");
    assert_eq!(title.value, OverrideValue::Str("New title".to_owned()));
    let priority = active.iter().find(|o| o.field_name == "priority").expect("priority override");
    assert_eq!(priority.value, OverrideValue::Int(3));
}

#[tokio::test]
async fn job_progress_is_clamped_and_published() {
    let events = EventBus::new();
    let mut rx = events.subscribe::<JobProgress>();
    let tracker = JobTracker::new(test_db("legacy_progress").await, events);

    let job = tracker.start_job("bulk_import", 10, false).await.expect("start");
    assert_eq!(job.status, JobStatus::Running);

    let updated = tracker.record_progress(&job.job_id, 25, 1, 2).await.expect("progress");
    assert_eq!(updated.processed_items, 10, "processed is clamped to total");
    assert_eq!(updated.error_count, 1);
    assert_eq!(updated.warning_count, 2);

    let event = rx.recv().await.expect("progress event");
    assert_eq!(event.job_id, job.job_id);
    assert_eq!(event.processed_items, 10);
}

#[tokio::test]
async fn terminal_jobs_reject_further_transitions() {
    let tracker = JobTracker::new(test_db("legacy_terminal").await, EventBus::new());

    let job = tracker.start_job("resync", 5, false).await.expect("start");
    let done = tracker.complete(&job.job_id).await.expect("complete");
    assert_eq!(done.status, JobStatus::Completed);
    assert!(done.completed_at.is_some());

    let err = tracker.cancel(&job.job_id).await.unwrap_err();
    assert!(matches!(err, LegacyError::Terminal { status: JobStatus::Completed, .. }));

    let err = tracker.record_progress(&job.job_id, 5, 0, 0).await.unwrap_err();
    assert!(matches!(err, LegacyError::Terminal { .. }));
}

#[tokio::test]
async fn exclusive_jobs_refuse_a_second_runner() {
    let tracker = JobTracker::new(test_db("legacy_exclusive").await, EventBus::new());

    let first = tracker.start_job("bulk_import", 100, true).await.expect("first");
    let err = tracker.start_job("bulk_import", 50, true).await.unwrap_err();
    assert!(matches!(err, LegacyError::AlreadyRunning { .. }));

    // A different kind is unaffected, and finishing frees the kind.
    tracker.start_job("resync", 10, true).await.expect("other kind");
    tracker.fail(&first.job_id).await.expect("fail first");
    tracker.start_job("bulk_import", 50, true).await.expect("after terminal");
}

#[tokio::test]
async fn listing_filters_running_jobs() {
    let tracker = JobTracker::new(test_db("legacy_listing").await, EventBus::new());

    let a = tracker.start_job("bulk_import", 10, false).await.expect("a");
    tracker.start_job("resync", 10, false).await.expect("b");
    tracker.complete(&a.job_id).await.expect("complete a");

    let running = tracker.list(true).await.expect("running");
    assert_eq!(running.len(), 1);
    assert_eq!(running[0].kind, "resync");

    let all = tracker.list(false).await.expect("all");
    assert_eq!(all.len(), 2);
}
