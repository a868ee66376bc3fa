use std::fmt;

use err_derive::Error;
use serde::{Deserialize, Serialize};

use infra::ids::{Entity, Id};

/// One orderable item. The catalog is fixed at startup and never mutated;
/// cart lines copy these fields at add-time.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MenuItem {
    pub id: Id<MenuItem>,
    pub category: Category,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub image: String,
    pub veg: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Snacks,
    #[serde(rename = "Main Course")]
    MainCourse,
    Beverages,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Snacks, Category::MainCourse, Category::Beverages];
}

impl fmt::Display for Category {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Category::Snacks => write!(fmt, "Snacks"),
            Category::MainCourse => write!(fmt, "Main Course"),
            Category::Beverages => write!(fmt, "Beverages"),
        }
    }
}

/// Dietary filter on the catalog, as offered by the menu surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietFilter {
    All,
    Veg,
    NonVeg,
}

#[derive(Debug, Clone, Error)]
#[error(display = "Unknown diet filter; expected all, veg or nonveg")]
pub struct DietFilterParseError;

impl DietFilter {
    pub fn admits(&self, item: &MenuItem) -> bool {
        match self {
            DietFilter::All => true,
            DietFilter::Veg => item.veg,
            DietFilter::NonVeg => !item.veg,
        }
    }
}

impl std::str::FromStr for DietFilter {
    type Err = DietFilterParseError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        match src {
            "all" => Ok(DietFilter::All),
            "veg" => Ok(DietFilter::Veg),
            "nonveg" => Ok(DietFilter::NonVeg),
            _ => Err(DietFilterParseError),
        }
    }
}

impl Entity for MenuItem {
    const PREFIX: &'static str = "item";
}
