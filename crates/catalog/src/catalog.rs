//! Static car and part catalog

use crate::error::{CatalogError, Result};
use crate::part::{Boost, Part, PartCategory};
use serde::Serialize;

/// Base statistics of a car, each in 1..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarSpecs {
    pub speed: u8,
    pub acceleration: u8,
    pub handling: u8,
    pub durability: u8,
}

impl CarSpecs {
    pub fn values(&self) -> [u8; 4] {
        [self.speed, self.acceleration, self.handling, self.durability]
    }
}

/// A rally car from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Car {
    pub id: &'static str,
    pub brand: &'static str,
    pub model: &'static str,
    pub image: &'static str,
    pub specs: CarSpecs,
    /// Decimal amount with currency suffix, e.g. "2.5 ETH"
    pub price: &'static str,
}

impl Car {
    /// Label submitted to the contract as `carModel`
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }
}

/// Split a catalog price such as `"2.5 ETH"` into amount and currency
pub fn parse_price(price: &str) -> Option<(f64, &str)> {
    let (amount, currency) = price.split_once(char::is_whitespace)?;
    let currency = currency.trim();

    let mut parts = amount.splitn(2, '.');
    let whole = parts.next()?;
    let well_formed = !whole.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && parts
            .next()
            .is_none_or(|frac| !frac.is_empty() && frac.chars().all(|c| c.is_ascii_digit()));

    if !well_formed || currency.is_empty() {
        return None;
    }

    amount.parse().ok().map(|value| (value, currency))
}

/// All cars, in display order
pub fn list_cars() -> &'static [Car] {
    &CARS
}

/// All parts, or only those of `category`
pub fn list_parts(category: Option<PartCategory>) -> Vec<&'static Part> {
    PARTS
        .iter()
        .filter(|part| category.is_none_or(|c| part.category == c))
        .collect()
}

pub fn find_car(id: &str) -> Result<&'static Car> {
    CARS.iter()
        .find(|car| car.id == id)
        .ok_or_else(|| CatalogError::UnknownCar(id.to_string()))
}

pub fn find_part(id: &str) -> Result<&'static Part> {
    PARTS
        .iter()
        .find(|part| part.id == id)
        .ok_or_else(|| CatalogError::UnknownPart(id.to_string()))
}

const fn specs(speed: u8, acceleration: u8, handling: u8, durability: u8) -> CarSpecs {
    CarSpecs {
        speed,
        acceleration,
        handling,
        durability,
    }
}

const fn boost(
    speed: Option<u8>,
    acceleration: Option<u8>,
    handling: Option<u8>,
    durability: Option<u8>,
) -> Boost {
    Boost {
        speed,
        acceleration,
        handling,
        durability,
    }
}

static CARS: [Car; 9] = [
    Car {
        id: "bmw-m3",
        brand: "BMW",
        model: "M3 Competition",
        image: "assets/bmw-rally.jpg",
        specs: specs(92, 88, 85, 80),
        price: "2.5 ETH",
    },
    Car {
        id: "bmw-m4",
        brand: "BMW",
        model: "M4 CSL",
        image: "assets/bmw-rally.jpg",
        specs: specs(94, 90, 88, 82),
        price: "2.8 ETH",
    },
    Car {
        id: "bmw-m5",
        brand: "BMW",
        model: "M5 CS",
        image: "assets/bmw-rally.jpg",
        specs: specs(95, 91, 86, 84),
        price: "3.2 ETH",
    },
    Car {
        id: "mercedes-amg-gt",
        brand: "Mercedes-AMG",
        model: "GT Black Series",
        image: "assets/mercedes-rally.jpg",
        specs: specs(97, 93, 89, 85),
        price: "3.5 ETH",
    },
    Car {
        id: "mercedes-amg-c63",
        brand: "Mercedes-AMG",
        model: "C63 S E Performance",
        image: "assets/mercedes-rally.jpg",
        specs: specs(93, 90, 87, 83),
        price: "2.9 ETH",
    },
    Car {
        id: "mercedes-amg-a45",
        brand: "Mercedes-AMG",
        model: "A45 S",
        image: "assets/mercedes-rally.jpg",
        specs: specs(90, 94, 91, 82),
        price: "2.3 ETH",
    },
    Car {
        id: "honda-civic-type-r",
        brand: "Honda",
        model: "Civic Type R",
        image: "assets/honda-rally.jpg",
        specs: specs(88, 92, 93, 86),
        price: "2.0 ETH",
    },
    Car {
        id: "honda-nsx",
        brand: "Honda",
        model: "NSX Type S",
        image: "assets/honda-rally.jpg",
        specs: specs(96, 95, 94, 87),
        price: "4.0 ETH",
    },
    Car {
        id: "porsche-911-gt3",
        brand: "Porsche",
        model: "911 GT3 RS",
        image: "assets/mercedes-rally.jpg",
        specs: specs(98, 94, 96, 86),
        price: "4.5 ETH",
    },
];

static PARTS: [Part; 18] = [
    // Engine
    Part {
        id: "turbo-v1",
        name: "Stage 1 Turbocharger",
        category: PartCategory::Engine,
        tier: 1,
        boost: boost(Some(5), Some(3), None, None),
        price: "0.5 ETH",
    },
    Part {
        id: "turbo-v2",
        name: "Stage 2 Turbocharger",
        category: PartCategory::Engine,
        tier: 2,
        boost: boost(Some(8), Some(5), None, None),
        price: "0.8 ETH",
    },
    Part {
        id: "turbo-v3",
        name: "Stage 3 Turbocharger",
        category: PartCategory::Engine,
        tier: 3,
        boost: boost(Some(12), Some(8), None, None),
        price: "1.2 ETH",
    },
    // Transmission
    Part {
        id: "trans-sport",
        name: "Sport Transmission",
        category: PartCategory::Transmission,
        tier: 1,
        boost: boost(None, Some(5), Some(3), None),
        price: "0.6 ETH",
    },
    Part {
        id: "trans-race",
        name: "Racing Transmission",
        category: PartCategory::Transmission,
        tier: 2,
        boost: boost(None, Some(8), Some(5), None),
        price: "1.0 ETH",
    },
    Part {
        id: "trans-sequential",
        name: "Sequential Rally Gearbox",
        category: PartCategory::Transmission,
        tier: 3,
        boost: boost(None, Some(12), Some(7), None),
        price: "1.4 ETH",
    },
    // Suspension
    Part {
        id: "susp-sport",
        name: "Sport Suspension",
        category: PartCategory::Suspension,
        tier: 1,
        boost: boost(None, None, Some(5), Some(2)),
        price: "0.4 ETH",
    },
    Part {
        id: "susp-race",
        name: "Racing Suspension",
        category: PartCategory::Suspension,
        tier: 2,
        boost: boost(None, None, Some(8), Some(4)),
        price: "0.7 ETH",
    },
    Part {
        id: "susp-rally",
        name: "Long-Travel Rally Coilovers",
        category: PartCategory::Suspension,
        tier: 3,
        boost: boost(None, None, Some(11), Some(6)),
        price: "1.1 ETH",
    },
    // Wheels
    Part {
        id: "wheels-sport",
        name: "Sport Wheels",
        category: PartCategory::Wheels,
        tier: 1,
        boost: boost(Some(2), None, Some(4), None),
        price: "0.3 ETH",
    },
    Part {
        id: "wheels-carbon",
        name: "Carbon Fiber Wheels",
        category: PartCategory::Wheels,
        tier: 2,
        boost: boost(Some(4), Some(2), Some(6), None),
        price: "0.9 ETH",
    },
    Part {
        id: "wheels-magnesium",
        name: "Forged Magnesium Wheels",
        category: PartCategory::Wheels,
        tier: 3,
        boost: boost(Some(6), Some(3), Some(8), Some(4)),
        price: "1.3 ETH",
    },
    // Body
    Part {
        id: "body-aero",
        name: "Aerodynamic Body Kit",
        category: PartCategory::Body,
        tier: 1,
        boost: boost(Some(6), None, Some(3), None),
        price: "0.5 ETH",
    },
    Part {
        id: "body-carbon",
        name: "Carbon Fiber Body Kit",
        category: PartCategory::Body,
        tier: 2,
        boost: boost(Some(8), Some(3), Some(5), None),
        price: "1.5 ETH",
    },
    Part {
        id: "body-wing",
        name: "Rally Aero Wing Package",
        category: PartCategory::Body,
        tier: 3,
        boost: boost(Some(10), Some(4), Some(8), None),
        price: "2.0 ETH",
    },
    // Exhaust
    Part {
        id: "exhaust-sport",
        name: "Sport Exhaust",
        category: PartCategory::Exhaust,
        tier: 1,
        boost: boost(Some(3), Some(2), None, None),
        price: "0.3 ETH",
    },
    Part {
        id: "exhaust-titanium",
        name: "Titanium Exhaust System",
        category: PartCategory::Exhaust,
        tier: 2,
        boost: boost(Some(5), Some(4), None, None),
        price: "0.8 ETH",
    },
    Part {
        id: "exhaust-race",
        name: "Straight-Pipe Race Exhaust",
        category: PartCategory::Exhaust,
        tier: 3,
        boost: boost(Some(7), Some(6), None, None),
        price: "1.2 ETH",
    },
];
