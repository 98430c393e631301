pub mod master;
pub mod sub;

pub use master::{master, MasterKey};
pub use sub::{sub, SubKey};

use crate::battle::unit::Unit;

/// sentinel identity for an unrevealed or absent unit
pub(crate) const NONE_SPECIES: &str = "none";

/// coarse health bucket: green / yellow / red. a fainted or absent unit
/// lands in bucket 0.
pub fn hp_bucket(hp: u32, max_hp: u32) -> u8 {
    if max_hp == 0 || hp == 0 {
        return 0;
    }
    let ratio = hp as f64 / max_hp as f64;
    if ratio > 0.5 {
        2
    } else if ratio > 0.2 {
        1
    } else {
        0
    }
}

/// (any stage raised, any stage at the +6 cap)
pub fn boost_flags(unit: &Unit) -> (bool, bool) {
    let stages = unit.boosts.stages();
    let any = stages.iter().any(|s| *s > 0);
    let max = stages.iter().any(|s| *s == crate::MAX_BOOST_STAGE);
    (any, max)
}

/// whether `unit` outruns `other` on raw speed. unknown units lose ties.
pub fn speed_check(unit: Option<&Unit>, other: Option<&Unit>) -> bool {
    match (unit, other) {
        (Some(a), Some(b)) => a.stats.spe > b.stats.spe,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::element::Element;
    use crate::battle::unit::{Boosts, Stats};

    fn unit() -> Unit {
        Unit {
            species: "starmie".to_string(),
            hp: 50,
            max_hp: 100,
            fainted: false,
            status: None,
            boosts: Boosts::default(),
            ability: None,
            elements: vec![Element::Water, Element::Psychic],
            stats: Stats {
                spe: 115,
                ..Stats::default()
            },
            moves: vec![],
        }
    }

    #[test]
    fn hp_bucket_boundaries() {
        assert_eq!(hp_bucket(100, 100), 2);
        assert_eq!(hp_bucket(51, 100), 2);
        assert_eq!(hp_bucket(50, 100), 1);
        assert_eq!(hp_bucket(21, 100), 1);
        assert_eq!(hp_bucket(20, 100), 0);
        assert_eq!(hp_bucket(1, 100), 0);
        assert_eq!(hp_bucket(0, 100), 0);
        assert_eq!(hp_bucket(10, 0), 0);
    }

    #[test]
    fn boost_flags_scan_all_stages() {
        let mut u = unit();
        assert_eq!(boost_flags(&u), (false, false));
        u.boosts.evasion = 1;
        assert_eq!(boost_flags(&u), (true, false));
        u.boosts.spa = 6;
        assert_eq!(boost_flags(&u), (true, true));
        u.boosts = Boosts {
            def: -2,
            ..Boosts::default()
        };
        assert_eq!(boost_flags(&u), (false, false));
    }

    #[test]
    fn speed_check_degrades_on_missing() {
        let fast = unit();
        let mut slow = unit();
        slow.stats.spe = 30;
        assert!(speed_check(Some(&fast), Some(&slow)));
        assert!(!speed_check(Some(&slow), Some(&fast)));
        assert!(!speed_check(Some(&fast), None));
        assert!(!speed_check(None, Some(&slow)));
    }
}
