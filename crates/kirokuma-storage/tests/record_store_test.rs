//! Record and artifact stores on SQLite.

use chrono::{Duration, Utc};
use kirokuma_core::errors::{EpochError, KirokumaError};
use kirokuma_core::models::{Artifact, MealRecord, NewMealRecord, RecordWindow};
use kirokuma_core::traits::{IArtifactStore, IEpochStore, IRecordStore};
use kirokuma_storage::StorageEngine;

fn engine() -> StorageEngine {
    StorageEngine::open_in_memory().expect("in-memory storage")
}

fn accept(engine: &StorageEngine, user: &str, epoch: &str, label: &str) -> MealRecord {
    let input = NewMealRecord::new(label)
        .with_tags(&["homemade"])
        .with_ingredients(&["rice"]);
    let record = MealRecord::new(user, epoch, input, Some(vec![0.25, -0.5, 1.0]));
    let artifact = Artifact::for_record(&record.id, user, epoch, &format!("bear://{label}"));
    IRecordStore::create(engine, &record, &artifact).unwrap();
    record
}

#[test]
fn record_fields_survive_storage() {
    let engine = engine();
    let epoch = engine.create_if_absent("U1").unwrap().epoch;
    let record = accept(&engine, "U1", &epoch.id, "curry");

    let stored = IRecordStore::get(&engine, &record.id).unwrap().unwrap();
    assert_eq!(stored.primary_label, "curry");
    assert_eq!(stored.tags, vec!["homemade"]);
    assert_eq!(stored.ingredients, vec!["rice"]);
    assert_eq!(stored.embedding, Some(vec![0.25, -0.5, 1.0]));
    assert_eq!(stored.created_at.timestamp_micros(), record.created_at.timestamp_micros());

    let artifact = engine.get_by_record(&record.id).unwrap().unwrap();
    assert_eq!(artifact.external_ref, "bear://curry");
}

#[test]
fn record_without_embedding_reads_back_as_none() {
    let engine = engine();
    let epoch = engine.create_if_absent("U1").unwrap().epoch;
    let record = MealRecord::new("U1", &epoch.id, NewMealRecord::new("soba"), None);
    let artifact = Artifact::for_record(&record.id, "U1", &epoch.id, "ref");
    IRecordStore::create(&engine, &record, &artifact).unwrap();
    assert!(IRecordStore::get(&engine, &record.id).unwrap().unwrap().embedding.is_none());
}

#[test]
fn list_is_newest_first_and_limited() {
    let engine = engine();
    let epoch = engine.create_if_absent("U1").unwrap().epoch;
    let ids: Vec<String> = (0..5)
        .map(|i| accept(&engine, "U1", &epoch.id, &format!("dish-{i}")).id)
        .collect();

    let listed = IRecordStore::list_by_epoch(&engine, "U1", &epoch.id, RecordWindow::latest(3)).unwrap();
    let listed_ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(listed_ids, vec![ids[4].as_str(), ids[3].as_str(), ids[2].as_str()]);
    assert_eq!(engine.count("U1", &epoch.id).unwrap(), 5);
}

#[test]
fn window_since_filters_old_records() {
    let engine = engine();
    let epoch = engine.create_if_absent("U1").unwrap().epoch;

    let mut old = MealRecord::new("U1", &epoch.id, NewMealRecord::new("old"), None);
    old.created_at = Utc::now() - Duration::days(10);
    let old_artifact = Artifact::for_record(&old.id, "U1", &epoch.id, "ref");
    IRecordStore::create(&engine, &old, &old_artifact).unwrap();
    accept(&engine, "U1", &epoch.id, "fresh");

    let window = RecordWindow::recent(30, Some(7), Utc::now());
    let listed = IRecordStore::list_by_epoch(&engine, "U1", &epoch.id, window).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].primary_label, "fresh");
    assert_eq!(engine.count("U1", &epoch.id).unwrap(), 2);
}

#[test]
fn reset_keeps_old_epoch_records_intact() {
    let engine = engine();
    let e1 = engine.create_if_absent("U1").unwrap().epoch;
    let before: Vec<String> = (0..3)
        .map(|i| accept(&engine, "U1", &e1.id, &format!("e1-{i}")).id)
        .collect();

    let e2 = engine.rotate("U1").unwrap().started;
    accept(&engine, "U1", &e2.id, "e2-0");

    let e1_records = IRecordStore::list_by_epoch(&engine, "U1", &e1.id, RecordWindow::default()).unwrap();
    let mut after: Vec<String> = e1_records.iter().map(|r| r.id.clone()).collect();
    after.reverse();
    assert_eq!(after, before);
    assert_eq!(engine.count("U1", &e2.id).unwrap(), 1);
    assert_eq!(IArtifactStore::list_by_epoch(&engine, "U1", &e1.id, 30).unwrap().len(), 3);
}

#[test]
fn writing_to_ended_epoch_is_rejected() {
    let engine = engine();
    let e1 = engine.create_if_absent("U1").unwrap().epoch;
    engine.rotate("U1").unwrap();

    let record = MealRecord::new("U1", &e1.id, NewMealRecord::new("late"), None);
    let artifact = Artifact::for_record(&record.id, "U1", &e1.id, "ref");
    let err = IRecordStore::create(&engine, &record, &artifact).unwrap_err();
    assert!(matches!(err, KirokumaError::EpochError(EpochError::Ended { .. })));
    assert!(IRecordStore::get(&engine, &record.id).unwrap().is_none());
}

#[test]
fn writing_to_foreign_epoch_is_rejected() {
    let engine = engine();
    let theirs = engine.create_if_absent("U2").unwrap().epoch;
    let record = MealRecord::new("U1", &theirs.id, NewMealRecord::new("curry"), None);
    let artifact = Artifact::for_record(&record.id, "U1", &theirs.id, "ref");
    let err = IRecordStore::create(&engine, &record, &artifact).unwrap_err();
    assert!(matches!(err, KirokumaError::EpochError(EpochError::Foreign { .. })));
}

#[test]
fn mismatched_artifact_is_invalid_input() {
    let engine = engine();
    let epoch = engine.create_if_absent("U1").unwrap().epoch;
    let record = MealRecord::new("U1", &epoch.id, NewMealRecord::new("curry"), None);
    let artifact = Artifact::for_record("some-other-record", "U1", &epoch.id, "ref");
    assert!(matches!(
        IRecordStore::create(&engine, &record, &artifact),
        Err(KirokumaError::InvalidInput { .. })
    ));
}

#[test]
fn artifact_history_is_newest_first_and_capped() {
    let engine = engine();
    let epoch = engine.create_if_absent("U1").unwrap().epoch;
    for i in 0..35 {
        accept(&engine, "U1", &epoch.id, &format!("dish-{i}"));
    }
    let history = IArtifactStore::list_by_epoch(&engine, "U1", &epoch.id, 100).unwrap();
    assert_eq!(history.len(), 30);
    assert_eq!(history[0].external_ref, "bear://dish-34");

    let latest = engine.latest("U1", &epoch.id).unwrap().unwrap();
    assert_eq!(latest.id, history[0].id);
    assert!(engine.latest("U1", "no-such-epoch").unwrap().is_none());
}
