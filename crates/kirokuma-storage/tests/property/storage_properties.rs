use kirokuma_core::models::{Artifact, MealRecord, NewMealRecord, RecordWindow};
use kirokuma_core::traits::{IEpochStore, IRecordStore};
use kirokuma_storage::StorageEngine;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Listing never crosses epochs, respects the limit, and is newest first.
    #[test]
    fn listing_stays_inside_one_epoch(
        before in 0usize..12,
        after in 0usize..12,
        limit in 1usize..30,
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let e1 = engine.create_if_absent("U1").unwrap().epoch;
        for i in 0..before {
            let r = MealRecord::new("U1", &e1.id, NewMealRecord::new(format!("a{i}")), None);
            IRecordStore::create(&engine, &r, &Artifact::for_record(&r.id, "U1", &e1.id, "x")).unwrap();
        }
        let e2 = engine.rotate("U1").unwrap().started;
        for i in 0..after {
            let r = MealRecord::new("U1", &e2.id, NewMealRecord::new(format!("b{i}")), None);
            IRecordStore::create(&engine, &r, &Artifact::for_record(&r.id, "U1", &e2.id, "x")).unwrap();
        }

        let listed = IRecordStore::list_by_epoch(&engine, "U1", &e2.id, RecordWindow::latest(limit)).unwrap();
        prop_assert_eq!(listed.len(), after.min(limit));
        prop_assert!(listed.iter().all(|r| r.epoch_id == e2.id));
        prop_assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        prop_assert_eq!(engine.count("U1", &e1.id).unwrap(), before as u64);
    }
}
