//! Business entities and their destination tables

use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// The six business record types handled by the pipelines
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Entity {
    Users,
    Cards,
    Stores,
    Products,
    Orders,
    DateEvents,
}

impl Entity {
    /// All entities in the order the driver runs them
    pub const ALL: [Entity; 6] = [
        Entity::Users,
        Entity::Cards,
        Entity::Stores,
        Entity::Products,
        Entity::Orders,
        Entity::DateEvents,
    ];

    /// Destination table name for the cleaned entity
    pub fn target_table(&self) -> &'static str {
        match self {
            Self::Users => "dim_users",
            Self::Cards => "dim_card_details",
            Self::Stores => "dim_store_details",
            Self::Products => "dim_products",
            Self::Orders => "orders_table",
            Self::DateEvents => "dim_date_times",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Users => write!(f, "users"),
            Self::Cards => write!(f, "cards"),
            Self::Stores => write!(f, "stores"),
            Self::Products => write!(f, "products"),
            Self::Orders => write!(f, "orders"),
            Self::DateEvents => write!(f, "date-events"),
        }
    }
}

impl FromStr for Entity {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "users" => Ok(Self::Users),
            "cards" => Ok(Self::Cards),
            "stores" => Ok(Self::Stores),
            "products" => Ok(Self::Products),
            "orders" => Ok(Self::Orders),
            "date-events" => Ok(Self::DateEvents),
            _ => Err(()),
        }
    }
}
