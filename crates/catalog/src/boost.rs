//! Boost aggregation
//!
//! Two reductions over the selected parts: plain per-stat totals for display,
//! and the fixed remapping onto the seven `updateCarSetup` parameters.

use crate::part::{Part, PartCategory, Stat};
use crate::selection::Selection;
use rally_championship_trait::SetupParameters;
use serde::Serialize;

/// Total boost per stat across a set of parts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatTotals {
    pub speed: u32,
    pub acceleration: u32,
    pub handling: u32,
    pub durability: u32,
}

impl StatTotals {
    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Speed => self.speed,
            Stat::Acceleration => self.acceleration,
            Stat::Handling => self.handling,
            Stat::Durability => self.durability,
        }
    }
}

/// Sum each stat over `parts`, absent boosts counting as zero
pub fn aggregate<'a>(parts: impl IntoIterator<Item = &'a Part>) -> StatTotals {
    parts
        .into_iter()
        .fold(StatTotals::default(), |acc, part| StatTotals {
            speed: acc.speed + u32::from(part.boost.value(Stat::Speed)),
            acceleration: acc.acceleration + u32::from(part.boost.value(Stat::Acceleration)),
            handling: acc.handling + u32::from(part.boost.value(Stat::Handling)),
            durability: acc.durability + u32::from(part.boost.value(Stat::Durability)),
        })
}

/// Map the selection onto the contract's setup parameters:
///
/// | parameter          | source                                  |
/// |--------------------|-----------------------------------------|
/// | engine_tuning      | engine speed + engine acceleration      |
/// | suspension_balance | suspension handling + durability        |
/// | aero_package       | body speed + body handling              |
/// | tire_compound      | wheels handling + wheels speed          |
/// | boost_response     | transmission acceleration               |
/// | brake_bias         | wheels durability                       |
/// | traction_control   | transmission handling                   |
///
/// Missing categories and missing boost fields contribute zero. The exhaust
/// category does not feed any parameter.
pub fn map_to_contract_parameters(selection: &Selection) -> SetupParameters {
    let boost = |category: PartCategory, stat: Stat| -> u8 {
        selection
            .part(category)
            .map(|part| part.boost.value(stat))
            .unwrap_or(0)
    };
    let pair = |category: PartCategory, a: Stat, b: Stat| -> u16 {
        u16::from(boost(category, a)) + u16::from(boost(category, b))
    };

    SetupParameters {
        engine_tuning: pair(PartCategory::Engine, Stat::Speed, Stat::Acceleration),
        suspension_balance: pair(PartCategory::Suspension, Stat::Handling, Stat::Durability),
        aero_package: pair(PartCategory::Body, Stat::Speed, Stat::Handling),
        tire_compound: pair(PartCategory::Wheels, Stat::Handling, Stat::Speed),
        boost_response: boost(PartCategory::Transmission, Stat::Acceleration),
        brake_bias: boost(PartCategory::Wheels, Stat::Durability),
        traction_control: boost(PartCategory::Transmission, Stat::Handling),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find_car, find_part};

    fn selection(part_ids: &[&str]) -> Selection {
        let mut selection = Selection::new(find_car("bmw-m3").unwrap());
        for id in part_ids {
            selection.add_part(find_part(id).unwrap());
        }
        selection
    }

    #[test]
    fn test_empty_selection_maps_to_zero() {
        let params = map_to_contract_parameters(&selection(&[]));
        assert!(params.is_zero());
        assert_eq!(aggregate(selection(&[]).parts()), StatTotals::default());
    }

    #[test]
    fn test_stage_one_turbo_only() {
        let params = map_to_contract_parameters(&selection(&["turbo-v1"]));
        assert_eq!(
            params,
            SetupParameters {
                engine_tuning: 8,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_full_build() {
        let params = map_to_contract_parameters(&selection(&[
            "turbo-v3",         // speed 12, accel 8
            "trans-race",       // accel 8, handling 5
            "susp-race",        // handling 8, durability 4
            "wheels-magnesium", // speed 6, accel 3, handling 8, durability 4
            "body-carbon",      // speed 8, accel 3, handling 5
            "exhaust-titanium", // ignored by the mapping
        ]));

        assert_eq!(params.engine_tuning, 20);
        assert_eq!(params.suspension_balance, 12);
        assert_eq!(params.aero_package, 13);
        assert_eq!(params.tire_compound, 14);
        assert_eq!(params.boost_response, 8);
        assert_eq!(params.brake_bias, 4);
        assert_eq!(params.traction_control, 5);
    }

    #[test]
    fn test_aggregate_totals() {
        let totals = aggregate(selection(&["turbo-v1", "wheels-carbon", "exhaust-sport"]).parts());
        assert_eq!(totals.speed, 5 + 4 + 3);
        assert_eq!(totals.acceleration, 3 + 2 + 2);
        assert_eq!(totals.handling, 6);
        assert_eq!(totals.durability, 0);
        assert_eq!(totals.get(Stat::Speed), 12);
    }
}
