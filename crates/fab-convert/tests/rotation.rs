use fab_convert::correct_rotation;
use fab_model::{PartType, Side};
use proptest::prelude::*;

fn part_type() -> impl Strategy<Value = PartType> {
    prop_oneof![
        Just(PartType::Cap),
        Just(PartType::Tcap),
        Just(PartType::Res),
        Just(PartType::ResNetwork),
        Just(PartType::Trx),
        Just(PartType::Mosfet),
        Just(PartType::Led),
        Just(PartType::Ic),
    ]
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Top), Just(Side::Bottom)]
}

fn offset(part_type: &PartType, side: &Side) -> f64 {
    match (part_type, side) {
        (PartType::Tcap, _) => 180.0,
        (PartType::Trx | PartType::Mosfet, Side::Top) => 270.0,
        (PartType::Trx | PartType::Mosfet, Side::Bottom) => 90.0,
        (PartType::ResNetwork, _) => 270.0,
        _ => 0.0,
    }
}

proptest! {
    #[test]
    fn in_range_below_one_full_wrap(
        part_type in part_type(),
        side in side(),
        rotation in 0.0f64..360.0,
    ) {
        let corrected = correct_rotation(&part_type, &side, rotation);
        prop_assert!(corrected.in_range);
        prop_assert!((0.0..360.0).contains(&corrected.degrees));
    }

    #[test]
    fn flags_exactly_the_uncovered_inputs(
        part_type in part_type(),
        side in side(),
        rotation in -360.0f64..1000.0,
    ) {
        let corrected = correct_rotation(&part_type, &side, rotation);
        let combined = rotation + offset(&part_type, &side);
        prop_assert_eq!(corrected.in_range, (0.0..720.0).contains(&combined));
    }

    #[test]
    fn negative_results_are_emitted_unchanged(
        part_type in part_type(),
        side in side(),
        rotation in -360.0f64..0.0,
    ) {
        let combined = rotation + offset(&part_type, &side);
        prop_assume!(combined < 0.0);
        let corrected = correct_rotation(&part_type, &side, rotation);
        prop_assert!(!corrected.in_range);
        prop_assert_eq!(corrected.degrees, combined);
    }
}
