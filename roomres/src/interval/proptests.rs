//! Property-based tests for the overlap test and `TimeRange`.

use super::{overlaps, TimeRange};
use chrono::NaiveTime;
use proptest::prelude::*;

const MINUTES_PER_DAY: u32 = 24 * 60;

fn time_at(minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap()
}

// Non-empty ranges on whole minutes within one day
fn range_strategy() -> impl Strategy<Value = (u32, u32)> {
    (0..MINUTES_PER_DAY - 1).prop_flat_map(|start| (Just(start), start + 1..MINUTES_PER_DAY))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn overlap_is_symmetric(a in range_strategy(), b in range_strategy()) {
        let (a0, a1) = (time_at(a.0), time_at(a.1));
        let (b0, b1) = (time_at(b.0), time_at(b.1));
        prop_assert_eq!(overlaps(a0, a1, b0, b1), overlaps(b0, b1, a0, a1));
    }

    #[test]
    fn adjacent_ranges_never_overlap(start in 0..MINUTES_PER_DAY - 2, len1 in 1u32..60, len2 in 1u32..60) {
        let mid = (start + len1).min(MINUTES_PER_DAY - 2);
        let end = (mid + len2).min(MINUTES_PER_DAY - 1);
        prop_assume!(start < mid && mid < end);
        prop_assert!(!overlaps(time_at(start), time_at(mid), time_at(mid), time_at(end)));
        prop_assert!(!overlaps(time_at(mid), time_at(end), time_at(start), time_at(mid)));
    }

    #[test]
    fn every_range_overlaps_itself(r in range_strategy()) {
        let range = TimeRange::new(time_at(r.0), time_at(r.1)).unwrap();
        prop_assert!(range.overlaps(&range));
    }

    #[test]
    fn overlap_matches_shared_minute(a in range_strategy(), b in range_strategy()) {
        let shares_minute = (a.0..a.1).any(|m| (b.0..b.1).contains(&m));
        prop_assert_eq!(
            overlaps(time_at(a.0), time_at(a.1), time_at(b.0), time_at(b.1)),
            shares_minute
        );
    }

    #[test]
    fn inverted_ranges_rejected(r in range_strategy()) {
        prop_assert!(TimeRange::new(time_at(r.1), time_at(r.0)).is_err());
    }
}
