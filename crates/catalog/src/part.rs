//! Performance part types

use crate::error::CatalogError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Category a part upgrades; a selection holds at most one part per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartCategory {
    Engine,
    Transmission,
    Suspension,
    Wheels,
    Body,
    Exhaust,
}

impl PartCategory {
    /// All categories in display order
    pub const ALL: [PartCategory; 6] = [
        Self::Engine,
        Self::Transmission,
        Self::Suspension,
        Self::Wheels,
        Self::Body,
        Self::Exhaust,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engine => "engine",
            Self::Transmission => "transmission",
            Self::Suspension => "suspension",
            Self::Wheels => "wheels",
            Self::Body => "body",
            Self::Exhaust => "exhaust",
        }
    }
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Car statistic a part can boost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Speed,
    Acceleration,
    Handling,
    Durability,
}

impl Stat {
    pub const ALL: [Stat; 4] = [
        Self::Speed,
        Self::Acceleration,
        Self::Handling,
        Self::Durability,
    ];
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Speed => write!(f, "speed"),
            Self::Acceleration => write!(f, "acceleration"),
            Self::Handling => write!(f, "handling"),
            Self::Durability => write!(f, "durability"),
        }
    }
}

/// Partial stat boost; absent fields count as zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Boost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handling: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub durability: Option<u8>,
}

impl Boost {
    pub fn get(&self, stat: Stat) -> Option<u8> {
        match stat {
            Stat::Speed => self.speed,
            Stat::Acceleration => self.acceleration,
            Stat::Handling => self.handling,
            Stat::Durability => self.durability,
        }
    }

    /// Boost for `stat`, zero when the field is absent
    pub fn value(&self, stat: Stat) -> u8 {
        self.get(stat).unwrap_or(0)
    }

    /// Whether at least one stat is boosted
    pub fn is_empty(&self) -> bool {
        Stat::ALL.iter().all(|stat| self.get(*stat).is_none())
    }
}

impl fmt::Display for Boost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for stat in Stat::ALL {
            if let Some(value) = self.get(stat) {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{} +{}", stat, value)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A performance part from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Part {
    pub id: &'static str,
    pub name: &'static str,
    pub category: PartCategory,
    /// Quality tier 1..=3; prices rise with the tier
    pub tier: u8,
    pub boost: Boost,
    /// Decimal amount with currency suffix, e.g. "0.5 ETH"
    pub price: &'static str,
}
