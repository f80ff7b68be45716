//! Upgrade selection state for a single session

use crate::catalog::{Car, parse_price};
use crate::part::{Part, PartCategory};
use std::collections::BTreeMap;
use tracing::debug;

/// One selected car plus at most one part per category
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    car: &'static Car,
    parts: BTreeMap<PartCategory, &'static Part>,
}

impl Selection {
    pub fn new(car: &'static Car) -> Self {
        Self {
            car,
            parts: BTreeMap::new(),
        }
    }

    pub fn car(&self) -> &'static Car {
        self.car
    }

    /// Switch cars. Choosing a different car clears the selected parts.
    pub fn select_car(&mut self, car: &'static Car) {
        if self.car.id != car.id {
            debug!("Switching car {} -> {}, clearing {} parts", self.car.id, car.id, self.parts.len());
            self.parts.clear();
        }
        self.car = car;
    }

    /// Select `part`, returning the part it replaced in the same category
    pub fn add_part(&mut self, part: &'static Part) -> Option<&'static Part> {
        let replaced = self.parts.insert(part.category, part);
        if let Some(previous) = replaced {
            debug!("Replaced {} with {}", previous.id, part.id);
        }
        replaced
    }

    /// Deselect the part with `id`, if selected
    pub fn remove_part(&mut self, id: &str) -> Option<&'static Part> {
        let category = self.parts.values().find(|part| part.id == id)?.category;
        self.parts.remove(&category)
    }

    /// Selected part for `category`
    pub fn part(&self, category: PartCategory) -> Option<&'static Part> {
        self.parts.get(&category).copied()
    }

    /// Selected parts in category order
    pub fn parts(&self) -> impl Iterator<Item = &'static Part> + '_ {
        self.parts.values().copied()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Sum of the selected part prices (currency of the catalog, ETH)
    pub fn total_price(&self) -> f64 {
        self.parts()
            .filter_map(|part| parse_price(part.price))
            .map(|(amount, _)| amount)
            .sum()
    }
}
