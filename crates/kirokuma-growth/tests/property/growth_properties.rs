use kirokuma_growth::GrowthStageEngine;
use proptest::prelude::*;

/// Four strictly increasing breakpoints, the first above zero.
fn arb_breakpoints() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..50, 4).prop_map(|gaps| {
        let mut acc = 0;
        gaps.into_iter()
            .map(|g| {
                acc += g;
                acc
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn stage_is_monotonic(table in arb_breakpoints(), n in 0u64..10_000) {
        let engine = GrowthStageEngine::new(table).unwrap();
        prop_assert!(engine.stage(n) <= engine.stage(n + 1));
    }

    #[test]
    fn stage_is_always_in_range(table in arb_breakpoints(), n in any::<u64>()) {
        let engine = GrowthStageEngine::new(table).unwrap();
        let stage = engine.stage(n).value();
        prop_assert!((1..=5).contains(&stage));
    }

    #[test]
    fn each_breakpoint_advances_one_stage(table in arb_breakpoints()) {
        let engine = GrowthStageEngine::new(table.clone()).unwrap();
        for (i, b) in table.iter().enumerate() {
            prop_assert_eq!(engine.stage(*b).value() as usize, i + 2);
            prop_assert_eq!(engine.stage(*b - 1).value() as usize, i + 1);
        }
    }
}
